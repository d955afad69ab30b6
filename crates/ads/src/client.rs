//! REST client for the Google Ads API.
//!
//! Wraps the `customers/{id}/{resource}:mutate` endpoints using
//! [`reqwest`], authenticating with a developer token, the manager
//! account id, and an OAuth access token from [`TokenProvider`].

use std::time::Duration;

use async_trait::async_trait;
use launcher_core::provisioning::ApiErrorDetail;
use serde::Deserialize;

use crate::config::{AdsCredentials, AdsSettings};
use crate::error::AdsApiError;
use crate::oauth::TokenProvider;
use crate::resources::MutateResponse;
use crate::service::{AdsService, MutateRequest};

/// HTTP client for the Google Ads REST API.
pub struct GoogleAdsClient {
    http: reqwest::Client,
    settings: AdsSettings,
    developer_token: String,
    login_customer_id: String,
    tokens: TokenProvider,
}

// ---------------------------------------------------------------------------
// Error body (google.rpc.Status carrying a GoogleAdsFailure)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Debug, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleAdsFailure {
    #[serde(default)]
    errors: Vec<GoogleAdsError>,
    #[serde(default)]
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleAdsError {
    #[serde(default)]
    error_code: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    message: String,
}

impl GoogleAdsError {
    /// Flatten `{"campaignError": "DUPLICATE_CAMPAIGN_NAME"}` into
    /// `campaignError.DUPLICATE_CAMPAIGN_NAME`.
    fn code(&self) -> String {
        self.error_code
            .iter()
            .map(|(category, value)| match value.as_str() {
                Some(v) => format!("{category}.{v}"),
                None => format!("{category}.{value}"),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Extract structured Google Ads errors from a non-2xx body.
///
/// Returns `None` when the body carries no `GoogleAdsFailure` detail, in
/// which case the caller reports the raw status and body.
fn parse_failure(body: &str) -> Option<(Option<String>, Vec<ApiErrorDetail>)> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    let mut request_id = None;
    let mut errors = Vec::new();

    for detail in envelope.error.details {
        let is_ads_failure = detail
            .get("@type")
            .and_then(|t| t.as_str())
            .is_some_and(|t| t.ends_with("GoogleAdsFailure"));
        if !is_ads_failure {
            continue;
        }
        let Ok(failure) = serde_json::from_value::<GoogleAdsFailure>(detail) else {
            continue;
        };
        request_id = request_id.or(failure.request_id);
        errors.extend(failure.errors.iter().map(|e| ApiErrorDetail {
            code: e.code(),
            message: e.message.clone(),
        }));
    }

    (!errors.is_empty()).then_some((request_id, errors))
}

impl GoogleAdsClient {
    /// Build a client with its own connection pool and request timeout.
    pub fn new(credentials: AdsCredentials, settings: AdsSettings) -> Result<Self, AdsApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(http, credentials, settings))
    }

    /// Build a client reusing an existing [`reqwest::Client`].
    pub fn with_client(
        http: reqwest::Client,
        credentials: AdsCredentials,
        settings: AdsSettings,
    ) -> Self {
        let tokens = TokenProvider::new(
            http.clone(),
            settings.token_url.clone(),
            credentials.client_id,
            credentials.client_secret,
            credentials.refresh_token,
        );
        Self {
            http,
            settings,
            developer_token: credentials.developer_token,
            login_customer_id: credentials.login_customer_id,
            tokens,
        }
    }

    fn mutate_url(&self, customer_id: &str, request: &MutateRequest) -> String {
        format!(
            "{}/{}/customers/{}/{}:mutate",
            self.settings.base_url,
            self.settings.api_version,
            customer_id,
            request.service_path()
        )
    }

    async fn parse_response(response: reqwest::Response) -> Result<MutateResponse, AdsApiError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());

        if !status.is_success() {
            return Err(match parse_failure(&body) {
                Some((request_id, errors)) => AdsApiError::Rejected { request_id, errors },
                None => AdsApiError::Http {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        serde_json::from_str(&body).map_err(|e| AdsApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AdsService for GoogleAdsClient {
    async fn mutate(
        &self,
        customer_id: &str,
        request: MutateRequest,
    ) -> Result<MutateResponse, AdsApiError> {
        let url = self.mutate_url(customer_id, &request);
        let body = request
            .to_body()
            .map_err(|e| AdsApiError::Decode(format!("could not encode request: {e}")))?;
        let access_token = self.tokens.access_token().await?;

        tracing::debug!(
            service = request.service_path(),
            operations = request.operation_count(),
            customer_id,
            "Submitting Google Ads mutate",
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(access_token)
            .header("developer-token", &self.developer_token)
            .header("login-customer-id", &self.login_customer_id)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
