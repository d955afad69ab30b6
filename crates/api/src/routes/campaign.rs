//! Route definitions for the operator form.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Form page, mounted at the root.
///
/// ```text
/// GET  /           -> form_page
/// ```
pub fn form_router() -> Router<AppState> {
    Router::new().route("/", get(campaign::form_page))
}

/// Campaign submission.
///
/// ```text
/// POST /campaigns  -> submit_campaign  (urlencoded form)
/// ```
///
/// Kept outside the request timeout: a started run always finishes and
/// reports every step.
pub fn submit_router() -> Router<AppState> {
    Router::new().route("/campaigns", post(campaign::submit_campaign))
}
