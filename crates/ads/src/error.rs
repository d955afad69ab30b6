use launcher_core::provisioning::ApiErrorDetail;

/// Errors from the Google Ads REST layer.
#[derive(Debug, thiserror::Error)]
pub enum AdsApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform rejected the mutation with structured errors.
    #[error("Google Ads rejected the request: {}", summarize(.errors))]
    Rejected {
        request_id: Option<String>,
        errors: Vec<ApiErrorDetail>,
    },

    /// Non-2xx status without a structured Google Ads failure body.
    #[error("Google Ads API error ({status}): {body}")]
    Http { status: u16, body: String },

    /// The OAuth refresh-token exchange failed.
    #[error("OAuth token exchange failed: {0}")]
    Auth(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Unexpected Google Ads response: {0}")]
    Decode(String),
}

fn summarize(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}
