//! Mutate payloads for the resources the launcher creates.
//!
//! Field names follow the Google Ads REST (proto3 JSON) encoding:
//! camelCase keys, SCREAMING_SNAKE_CASE enum values, and 64-bit
//! integers as strings.

use serde::{Deserialize, Serialize, Serializer};

fn i64_as_string<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

// ---------------------------------------------------------------------------
// Operation envelope
// ---------------------------------------------------------------------------

/// A single create operation. The launcher never updates or removes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutateOperation<T> {
    pub create: T,
}

impl<T> MutateOperation<T> {
    pub fn create(resource: T) -> Self {
        Self { create: resource }
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetDeliveryMethod {
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    Enabled,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertisingChannelType {
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupStatus {
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupType {
    SearchStandard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionStatus {
    Enabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordMatchType {
    Broad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupAdStatus {
    Enabled,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignBudget {
    pub name: String,
    #[serde(serialize_with = "i64_as_string")]
    pub amount_micros: i64,
    pub delivery_method: BudgetDeliveryMethod,
    pub explicitly_shared: bool,
}

/// Manual CPC bidding; an empty message selects the strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualCpc {}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSettings {
    pub target_google_search: bool,
    pub target_search_network: bool,
    pub target_content_network: bool,
    pub target_partner_search_network: bool,
}

impl NetworkSettings {
    /// Google Search only: no search partners, no display network.
    pub fn search_only() -> Self {
        Self {
            target_google_search: true,
            target_search_network: false,
            target_content_network: false,
            target_partner_search_network: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub name: String,
    pub status: CampaignStatus,
    pub advertising_channel_type: AdvertisingChannelType,
    /// Resource name of the budget.
    pub campaign_budget: String,
    pub manual_cpc: ManualCpc,
    pub network_settings: NetworkSettings,
    pub final_url_suffix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroup {
    pub name: String,
    /// Resource name of the parent campaign.
    pub campaign: String,
    pub status: AdGroupStatus,
    #[serde(rename = "type")]
    pub ad_group_type: AdGroupType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordInfo {
    pub text: String,
    pub match_type: KeywordMatchType,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupCriterion {
    /// Resource name of the parent ad group.
    pub ad_group: String,
    pub status: CriterionStatus,
    pub keyword: KeywordInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdTextAsset {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveSearchAdInfo {
    pub headlines: Vec<AdTextAsset>,
    pub descriptions: Vec<AdTextAsset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub final_urls: Vec<String>,
    pub responsive_search_ad: ResponsiveSearchAdInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdGroupAd {
    /// Resource name of the parent ad group.
    pub ad_group: String,
    pub status: AdGroupAdStatus,
    pub ad: Ad,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// One entry of a mutate response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutateResult {
    #[serde(default)]
    pub resource_name: String,
}

/// Body of a successful `:mutate` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MutateResponse {
    #[serde(default)]
    pub results: Vec<MutateResult>,
}

impl MutateResponse {
    /// Build a response from resource names (used by test doubles).
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            results: names
                .into_iter()
                .map(|n| MutateResult {
                    resource_name: n.into(),
                })
                .collect(),
        }
    }

    /// Resource names in operation order.
    pub fn resource_names(&self) -> Vec<String> {
        self.results.iter().map(|r| r.resource_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn budget_serializes_amount_as_string() {
        let op = MutateOperation::create(CampaignBudget {
            name: "b".into(),
            amount_micros: 50_000_000,
            delivery_method: BudgetDeliveryMethod::Standard,
            explicitly_shared: false,
        });
        assert_eq!(
            serde_json::to_value(&op).unwrap(),
            json!({
                "create": {
                    "name": "b",
                    "amountMicros": "50000000",
                    "deliveryMethod": "STANDARD",
                    "explicitlyShared": false
                }
            })
        );
    }

    #[test]
    fn campaign_uses_rest_field_names() {
        let campaign = Campaign {
            name: "c".into(),
            status: CampaignStatus::Paused,
            advertising_channel_type: AdvertisingChannelType::Search,
            campaign_budget: "customers/1/campaignBudgets/2".into(),
            manual_cpc: ManualCpc::default(),
            network_settings: NetworkSettings::search_only(),
            final_url_suffix: "utm_campaign=c".into(),
        };
        let value = serde_json::to_value(&campaign).unwrap();
        assert_eq!(value["status"], "PAUSED");
        assert_eq!(value["advertisingChannelType"], "SEARCH");
        assert_eq!(value["campaignBudget"], "customers/1/campaignBudgets/2");
        assert_eq!(value["manualCpc"], json!({}));
        assert_eq!(value["networkSettings"]["targetGoogleSearch"], true);
        assert_eq!(value["networkSettings"]["targetSearchNetwork"], false);
        assert_eq!(value["networkSettings"]["targetContentNetwork"], false);
        assert_eq!(value["finalUrlSuffix"], "utm_campaign=c");
    }

    #[test]
    fn ad_group_type_field_is_named_type() {
        let value = serde_json::to_value(AdGroup {
            name: "g".into(),
            campaign: "customers/1/campaigns/3".into(),
            status: AdGroupStatus::Enabled,
            ad_group_type: AdGroupType::SearchStandard,
        })
        .unwrap();
        assert_eq!(value["type"], "SEARCH_STANDARD");
        assert_eq!(value["status"], "ENABLED");
    }

    #[test]
    fn keyword_criterion_shape() {
        let value = serde_json::to_value(AdGroupCriterion {
            ad_group: "customers/1/adGroups/4".into(),
            status: CriterionStatus::Enabled,
            keyword: KeywordInfo {
                text: "dentista".into(),
                match_type: KeywordMatchType::Broad,
            },
        })
        .unwrap();
        assert_eq!(
            value,
            json!({
                "adGroup": "customers/1/adGroups/4",
                "status": "ENABLED",
                "keyword": { "text": "dentista", "matchType": "BROAD" }
            })
        );
    }

    #[test]
    fn response_without_results_is_empty() {
        let response: MutateResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.resource_names().is_empty());
    }
}
