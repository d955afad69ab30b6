use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use launcher_core::error::CoreError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors. Implements [`IntoResponse`] to
/// render an operator-facing HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `launcher_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "Invalid campaign input", msg.clone())
                }
                CoreError::UnknownTemplate(_) => {
                    (StatusCode::BAD_REQUEST, "Unknown template", core.to_string())
                }
                CoreError::ConfigurationMissing(names) => {
                    tracing::warn!(missing = ?names, "Provisioning refused: credentials missing");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Google Ads is not configured",
                        core.to_string(),
                    )
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal error",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        (status, Html(views::error_page(title, &message))).into_response()
    }
}
