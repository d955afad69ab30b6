//! Server-rendered HTML for the operator surface.
//!
//! Plain string templates: the pages are small and every interpolated
//! value goes through [`escape_html`].

use std::fmt::Write as _;

use launcher_core::campaign::{CampaignRequest, MICROS_PER_UNIT};
use launcher_core::error::DirectoryUnavailable;
use launcher_core::provisioning::{FailureKind, ProvisioningResult, ProvisioningStep};
use launcher_core::types::Micros;
use launcher_db::directory::DirectoryListing;

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem}input,select{width:100%;padding:.3rem}\
.notice{padding:.6rem;border:1px solid #c90;background:#fff8e0}\
.ok{color:#070}.fail{color:#b00}pre{background:#f4f4f4;padding:.6rem;white-space:pre-wrap}";

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\">\
         <title>{}</title><style>{STYLE}</style></head>\n<body>\n<h1>{}</h1>\n{body}\n</body>\n</html>\n",
        escape_html(title),
        escape_html(title),
    )
}

/// `12_500_000` -> `12.50`.
pub fn format_budget(micros: Micros) -> String {
    let units = micros / MICROS_PER_UNIT;
    let cents = (micros % MICROS_PER_UNIT) / (MICROS_PER_UNIT / 100);
    format!("{units}.{cents:02}")
}

// ---------------------------------------------------------------------------
// Form page
// ---------------------------------------------------------------------------

fn directory_notice(reason: &DirectoryUnavailable) -> String {
    let lead = match reason {
        DirectoryUnavailable::SchemaMissing { .. } => "The customer table has not been created yet.",
        DirectoryUnavailable::ConnectionFailed(_) => "Could not reach the customer database.",
    };
    format!(
        "<p class=\"notice\">{} {}</p>",
        escape_html(lead),
        escape_html(&reason.to_string())
    )
}

/// Render the campaign form.
///
/// The customer picker degrades to a notice when the directory is
/// unavailable or empty; the rest of the form always renders.
pub fn form_page(
    listing: &DirectoryListing,
    templates: &[&str],
    missing_credentials: &[&'static str],
) -> String {
    let mut body = String::new();

    if !missing_credentials.is_empty() {
        let _ = write!(
            body,
            "<p class=\"notice\">Google Ads credentials missing: {}. Campaigns cannot be \
             created until they are set.</p>",
            escape_html(&missing_credentials.join(", "))
        );
    }

    body.push_str("<form method=\"post\" action=\"/campaigns\">\n");

    match &listing.unavailable {
        Some(reason) => body.push_str(&directory_notice(reason)),
        None if listing.customers.is_empty() => {
            body.push_str("<p class=\"notice\">No customers found.</p>");
        }
        None => {
            body.push_str(
                "<label for=\"customer_id\">Customer</label>\
                 <select id=\"customer_id\" name=\"customer_id\">\
                 <option value=\"\">(none)</option>",
            );
            for customer in &listing.customers {
                let _ = write!(
                    body,
                    "<option value=\"{}\">{}</option>",
                    customer.id,
                    escape_html(&customer.display_name())
                );
            }
            body.push_str("</select>\n");
        }
    }

    for (name, label, kind) in [
        ("target_account_id", "Google Ads account id", "text"),
        ("landing_page_url", "Landing page URL", "url"),
        ("contact_phone", "Contact phone", "tel"),
        ("daily_budget", "Daily budget", "text"),
    ] {
        let _ = write!(
            body,
            "<label for=\"{name}\">{label}</label>\
             <input id=\"{name}\" name=\"{name}\" type=\"{kind}\" required>\n"
        );
    }

    body.push_str("<label for=\"template\">Template</label><select id=\"template\" name=\"template\">");
    for template in templates {
        let escaped = escape_html(template);
        let _ = write!(body, "<option value=\"{escaped}\">{escaped}</option>");
    }
    body.push_str("</select>\n<p><button type=\"submit\">Create paused campaign</button></p>\n</form>");

    page("Campaign Launcher", &body)
}

// ---------------------------------------------------------------------------
// Result page
// ---------------------------------------------------------------------------

/// What the operator submitted, echoed at the top of the run log.
#[derive(Debug, Clone)]
pub struct RunSummary<'a> {
    /// Display name of the selected customer, if any.
    pub customer: Option<String>,
    pub template: &'a str,
    pub request: &'a CampaignRequest,
}

fn step_prefix(step: ProvisioningStep) -> String {
    format!(
        "Step {}/{} {}",
        step.number(),
        ProvisioningStep::ALL.len(),
        step.label()
    )
}

/// One line per event of the run, in order.
pub fn run_log(summary: &RunSummary<'_>, result: &ProvisioningResult) -> Vec<String> {
    let request = summary.request;
    let mut lines = vec![
        format!(
            "Customer: {}",
            summary.customer.as_deref().unwrap_or("(not selected)")
        ),
        format!("Account: {}", request.target_account_id),
        format!("Template: {}", summary.template),
        format!("Landing page: {}", request.landing_page_url),
        format!("Contact phone: {}", request.contact_phone),
        format!(
            "Daily budget: {} ({} micros)",
            format_budget(request.daily_budget_micros),
            request.daily_budget_micros
        ),
    ];

    for record in result.completed_steps() {
        lines.push(format!(
            "{}: created {}",
            step_prefix(record.step),
            record.reference()
        ));
    }

    if let Some(failure) = result.failure() {
        lines.push(format!("{}: FAILED", step_prefix(failure.step)));
        match &failure.kind {
            FailureKind::Rejected { request_id, errors } => {
                for error in errors {
                    lines.push(format!("  [{}] {}", error.code, error.message));
                }
                if let Some(id) = request_id {
                    lines.push(format!("  Request id: {id}"));
                }
            }
            FailureKind::Unexpected { message } => {
                lines.push(format!("  Unexpected failure: {message}"));
            }
        }
        if result.completed_steps().is_empty() {
            lines.push("Nothing was created.".to_string());
        } else {
            lines.push(
                "Resources created before the failure were NOT rolled back; remove them by hand:"
                    .to_string(),
            );
            for record in result.completed_steps() {
                for name in &record.resource_names {
                    lines.push(format!("  {name}"));
                }
            }
        }
    }

    lines
}

/// Render the step log and the final outcome of one provisioning run.
pub fn result_page(summary: &RunSummary<'_>, result: &ProvisioningResult) -> String {
    let log = run_log(summary, result)
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("\n");

    let outcome = match result.failure() {
        None => "<p class=\"ok\"><strong>Success:</strong> the campaign was created PAUSED. \
                 Review it in Google Ads before enabling it.</p>"
            .to_string(),
        Some(failure) => format!(
            "<p class=\"fail\"><strong>Failed</strong> at {}.</p>",
            escape_html(&step_prefix(failure.step))
        ),
    };

    let body = format!("<pre>{log}</pre>\n{outcome}\n<p><a href=\"/\">Back to the form</a></p>");
    page("Campaign run", &body)
}

/// Render a standalone error page.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<p class=\"fail\">{}</p>\n<p><a href=\"/\">Back to the form</a></p>",
        escape_html(message)
    );
    page(title, &body)
}
