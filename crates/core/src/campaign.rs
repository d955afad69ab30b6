//! Campaign submission input and its conversion into a provisioning request.
//!
//! The form only checks presence and type. Business legality (URL
//! reachability, phone format, whether the account exists) is left to
//! the advertising platform.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Micros};

/// Micro-units per major currency unit.
pub const MICROS_PER_UNIT: Micros = 1_000_000;

/// Number of fractional digits representable in micro-units.
const MICRO_DIGITS: usize = 6;

/// Validated input for one provisioning run.
///
/// Constructed once per submission and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignRequest {
    /// Target advertising account, digits only.
    pub target_account_id: String,
    pub landing_page_url: String,
    pub contact_phone: String,
    /// Daily budget in micro-units; always positive.
    pub daily_budget_micros: Micros,
}

/// Raw operator input as posted by the campaign form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignForm {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub target_account_id: String,
    #[serde(default)]
    pub landing_page_url: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub daily_budget: String,
    #[serde(default)]
    pub template: String,
}

impl CampaignForm {
    /// Convert the posted fields into a [`CampaignRequest`].
    pub fn into_request(&self) -> Result<CampaignRequest, CoreError> {
        let target_account_id =
            normalize_account_id(require("Target account id", &self.target_account_id)?)?;
        let landing_page_url = require("Landing page URL", &self.landing_page_url)?.to_string();
        let contact_phone = require("Contact phone", &self.contact_phone)?.to_string();
        let daily_budget_micros = parse_budget_micros(&self.daily_budget)?;

        Ok(CampaignRequest {
            target_account_id,
            landing_page_url,
            contact_phone,
            daily_budget_micros,
        })
    }

    /// The selected template name, required.
    pub fn template_name(&self) -> Result<&str, CoreError> {
        require("Template", &self.template)
    }

    /// The selected customer, if the operator picked one.
    pub fn customer_id(&self) -> Result<Option<DbId>, CoreError> {
        let raw = self.customer_id.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<DbId>()
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("Invalid customer id: '{raw}'")))
    }
}

fn require<'a>(label: &str, value: &'a str) -> Result<&'a str, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    Ok(trimmed)
}

/// Strip hyphens from an account id (`123-456-7890` -> `1234567890`).
///
/// The result must be non-empty and contain only ASCII digits.
pub fn normalize_account_id(raw: &str) -> Result<String, CoreError> {
    let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "Account id '{raw}' must contain only digits and hyphens"
        )));
    }
    Ok(digits)
}

/// Parse a decimal currency amount into micro-units.
///
/// The amount is multiplied by 1,000,000 exactly; fractional digits
/// beyond the sixth are truncated. Accepts `.` or a lone `,` as the
/// decimal separator (`12,5` == `12.5`). The result must be positive.
pub fn parse_budget_micros(raw: &str) -> Result<Micros, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Daily budget is required".into()));
    }

    let invalid = || CoreError::Validation(format!("Daily budget '{trimmed}' is not a number"));

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let (whole, fraction) = match normalized.split_once('.') {
        Some((w, f)) => (w, f),
        None => (normalized.as_str(), ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let whole_units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid())?
    };

    let mut frac_digits: String = fraction.chars().take(MICRO_DIGITS).collect();
    while frac_digits.len() < MICRO_DIGITS {
        frac_digits.push('0');
    }
    let frac_micros: i64 = frac_digits.parse().map_err(|_| invalid())?;

    let micros = whole_units
        .checked_mul(MICROS_PER_UNIT)
        .and_then(|m| m.checked_add(frac_micros))
        .ok_or_else(|| CoreError::Validation(format!("Daily budget '{trimmed}' is too large")))?;

    if micros <= 0 {
        return Err(CoreError::Validation(
            "Daily budget must be greater than zero".into(),
        ));
    }
    Ok(micros)
}
