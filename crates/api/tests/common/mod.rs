#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use launcher_ads::error::AdsApiError;
use launcher_ads::resources::MutateResponse;
use launcher_ads::service::{AdsService, MutateRequest};
use launcher_api::config::ServerConfig;
use launcher_api::router::build_app_router;
use launcher_api::state::{AdsHandle, AppState};
use launcher_core::customer::CustomerRecord;
use launcher_core::error::DirectoryUnavailable;
use launcher_core::templates::TemplateCatalog;
use launcher_db::directory::{CustomerDirectory, CustomerSource};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        directory_cache_secs: 60,
    }
}

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

/// Customer source answering with a fixed result.
pub struct FixedSource(pub Result<Vec<CustomerRecord>, DirectoryUnavailable>);

#[async_trait]
impl CustomerSource for FixedSource {
    async fn fetch_customers(&self) -> Result<Vec<CustomerRecord>, DirectoryUnavailable> {
        self.0.clone()
    }
}

pub fn customer(id: i64, name: &str, code: &str) -> CustomerRecord {
    CustomerRecord {
        id,
        company_name: name.to_string(),
        ads_code: code.to_string(),
    }
}

/// Advertising double: records every call and numbers resource names.
/// Fails with `error()` on calls to `fail_on`, and sleeps before answering
/// calls to `slow_on`, if set.
#[derive(Default)]
pub struct RecordingAds {
    pub calls: Mutex<Vec<MutateRequest>>,
    pub fail_on: Option<(&'static str, fn() -> AdsApiError)>,
    pub slow_on: Option<(&'static str, Duration)>,
}

impl RecordingAds {
    pub fn failing_on(service: &'static str, error: fn() -> AdsApiError) -> Self {
        Self {
            fail_on: Some((service, error)),
            ..Self::default()
        }
    }

    pub fn slow_on(service: &'static str, delay: Duration) -> Self {
        Self {
            slow_on: Some((service, delay)),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<MutateRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AdsService for RecordingAds {
    async fn mutate(
        &self,
        customer_id: &str,
        request: MutateRequest,
    ) -> Result<MutateResponse, AdsApiError> {
        let service = request.service_path();
        let count = request.operation_count();
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(request);
            calls.len()
        };

        if let Some((slow, delay)) = self.slow_on {
            if slow == service {
                tokio::time::sleep(delay).await;
            }
        }
        if let Some((failing, error)) = self.fail_on {
            if failing == service {
                return Err(error());
            }
        }
        Ok(MutateResponse::from_names(
            (0..count).map(|i| format!("customers/{customer_id}/{service}/{call}{i}")),
        ))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build the full application router around the given doubles.
pub fn build_test_app(source: FixedSource, ads: AdsHandle) -> Router {
    build_test_app_with_config(test_config(), source, ads)
}

pub fn build_test_app_with_config(
    config: ServerConfig,
    source: FixedSource,
    ads: AdsHandle,
) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        directory: Arc::new(CustomerDirectory::new(
            Arc::new(source),
            Duration::from_secs(config.directory_cache_secs),
        )),
        catalog: Arc::new(TemplateCatalog::builtin()),
        ads,
    };
    build_app_router(state, &config)
}

/// Directory with two customers (in store order) and a configured
/// advertising double.
pub fn configured_app(ads: Arc<RecordingAds>) -> Router {
    build_test_app(
        FixedSource(Ok(vec![
            customer(1, "Clinica Sorriso", "111-111-1111"),
            customer(2, "Oficina Bom Jesus", "222-222-2222"),
        ])),
        AdsHandle::Ready(ads),
    )
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
