//! Handlers for the campaign form and its submission.
//!
//! A submission is checked in full before anything remote happens: form
//! fields, then the template, then the advertising credentials. Only then
//! does the five-step provisioning run start.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use launcher_core::campaign::CampaignForm;
use launcher_core::error::CoreError;

use crate::error::AppResult;
use crate::state::AppState;
use crate::views::{self, RunSummary};

/// GET /
///
/// Render the form with the current customer directory and template list.
pub async fn form_page(State(state): State<AppState>) -> Html<String> {
    let listing = state.directory.list_customers().await;
    let templates = state.catalog.list_template_names();
    Html(views::form_page(&listing, &templates, state.ads.missing()))
}

/// POST /campaigns
///
/// Run one provisioning and render its step log. A failed run answers
/// `502 Bad Gateway` with the partial log. Once started, a run is never
/// cancelled.
pub async fn submit_campaign(
    State(state): State<AppState>,
    Form(form): Form<CampaignForm>,
) -> AppResult<(StatusCode, Html<String>)> {
    let request = form.into_request()?;
    let customer_id = form.customer_id()?;
    let template_name = form.template_name()?;
    let bundle = state.catalog.resolve_template(template_name)?;
    let provisioner = state.ads.provisioner()?;

    let customer = match customer_id {
        Some(id) => Some(
            state
                .directory
                .list_customers()
                .await
                .customers
                .into_iter()
                .find(|c| c.id == id)
                .map(|c| c.display_name())
                .unwrap_or_else(|| format!("customer #{id}")),
        ),
        None => None,
    };

    tracing::info!(
        customer = customer.as_deref().unwrap_or("-"),
        account = %request.target_account_id,
        template = %bundle.name,
        "Campaign submission accepted",
    );

    // The run lives on its own task: a dropped connection must not stop
    // it between two remote mutations.
    let run = {
        let request = request.clone();
        let bundle = bundle.clone();
        tokio::spawn(async move { provisioner.provision(&request, &bundle).await })
    };
    let result = run
        .await
        .map_err(|e| CoreError::Internal(format!("Provisioning task failed: {e}")))?;

    let summary = RunSummary {
        customer,
        template: &bundle.name,
        request: &request,
    };
    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((status, Html(views::result_page(&summary, &result))))
}
