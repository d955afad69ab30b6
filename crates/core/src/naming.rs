//! Resource naming for provisioning runs.
//!
//! Budget and campaign names must be unique per advertising account, so
//! every run embeds a freshly generated token. The ad group name is fixed
//! because it only has to be unique within its campaign.

/// Ad group name used for every provisioned campaign.
pub const AD_GROUP_NAME: &str = "Launcher Search Ad Group";

/// Names generated for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub token: String,
    pub budget: String,
    pub campaign: String,
    pub ad_group: String,
    /// Tracking parameters appended to every final URL of the campaign.
    pub final_url_suffix: String,
}

impl ResourceNames {
    /// Generate names around a new UUID v4 token.
    pub fn generate() -> Self {
        Self::from_token(&uuid::Uuid::new_v4().to_string())
    }

    /// Build names around an explicit token.
    ///
    /// # Examples
    ///
    /// ```
    /// use launcher_core::naming::ResourceNames;
    ///
    /// let names = ResourceNames::from_token("abc");
    /// assert_eq!(names.budget, "launcher-budget-abc");
    /// assert_eq!(names.campaign, "launcher-search-abc");
    /// assert_eq!(
    ///     names.final_url_suffix,
    ///     "utm_source=google&utm_medium=cpc&utm_campaign=launcher-search-abc"
    /// );
    /// ```
    pub fn from_token(token: &str) -> Self {
        let campaign = format!("launcher-search-{token}");
        Self {
            token: token.to_string(),
            budget: format!("launcher-budget-{token}"),
            final_url_suffix: format!("utm_source=google&utm_medium=cpc&utm_campaign={campaign}"),
            campaign,
            ad_group: AD_GROUP_NAME.to_string(),
        }
    }
}
