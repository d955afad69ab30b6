//! OAuth 2.0 refresh-token exchange with access-token caching.

use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::error::AdsApiError;

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

struct CachedToken {
    value: String,
    refresh_at: Instant,
}

/// Exchanges a long-lived refresh token for short-lived access tokens.
///
/// The current access token is cached and shared; the lock is held for
/// the whole exchange so concurrent callers trigger a single refresh.
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        token_url: String,
        client_id: String,
        client_secret: String,
        refresh_token: String,
    ) -> Self {
        Self {
            http,
            token_url,
            client_id,
            client_secret,
            refresh_token,
            cached: Mutex::new(None),
        }
    }

    /// Return a valid access token, refreshing it if needed.
    pub async fn access_token(&self) -> Result<String, AdsApiError> {
        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.value.clone());
            }
        }

        let fresh = self.exchange().await?;
        let value = fresh.access_token.clone();
        *cached = Some(fresh_to_cached(fresh));
        Ok(value)
    }

    async fn exchange(&self) -> Result<TokenResponse, AdsApiError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", self.refresh_token.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AdsApiError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AdsApiError::Auth(format!("malformed token response: {e}")))?;
        if token.access_token.is_empty() {
            return Err(AdsApiError::Auth("token response carried no access_token".into()));
        }

        tracing::debug!(expires_in = ?token.expires_in, "Refreshed Google Ads access token");
        Ok(token)
    }
}

fn fresh_to_cached(token: TokenResponse) -> CachedToken {
    let lifetime = Duration::from_secs(token.expires_in.unwrap_or(0));
    CachedToken {
        value: token.access_token,
        refresh_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
    }
}
