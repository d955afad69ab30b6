//! The narrow seam between the orchestrator and the advertising platform.

use async_trait::async_trait;

use crate::error::AdsApiError;
use crate::resources::{
    AdGroup, AdGroupAd, AdGroupCriterion, Campaign, CampaignBudget, MutateOperation,
    MutateResponse,
};

/// One batched mutate call against a single resource service.
#[derive(Debug, Clone, PartialEq)]
pub enum MutateRequest {
    CampaignBudgets(Vec<MutateOperation<CampaignBudget>>),
    Campaigns(Vec<MutateOperation<Campaign>>),
    AdGroups(Vec<MutateOperation<AdGroup>>),
    AdGroupCriteria(Vec<MutateOperation<AdGroupCriterion>>),
    AdGroupAds(Vec<MutateOperation<AdGroupAd>>),
}

impl MutateRequest {
    /// Resource collection segment of the `:mutate` URL.
    pub fn service_path(&self) -> &'static str {
        match self {
            Self::CampaignBudgets(_) => "campaignBudgets",
            Self::Campaigns(_) => "campaigns",
            Self::AdGroups(_) => "adGroups",
            Self::AdGroupCriteria(_) => "adGroupCriteria",
            Self::AdGroupAds(_) => "adGroupAds",
        }
    }

    pub fn operation_count(&self) -> usize {
        match self {
            Self::CampaignBudgets(ops) => ops.len(),
            Self::Campaigns(ops) => ops.len(),
            Self::AdGroups(ops) => ops.len(),
            Self::AdGroupCriteria(ops) => ops.len(),
            Self::AdGroupAds(ops) => ops.len(),
        }
    }

    /// JSON request body: `{"operations": [...]}`.
    pub fn to_body(&self) -> Result<serde_json::Value, serde_json::Error> {
        let operations = match self {
            Self::CampaignBudgets(ops) => serde_json::to_value(ops)?,
            Self::Campaigns(ops) => serde_json::to_value(ops)?,
            Self::AdGroups(ops) => serde_json::to_value(ops)?,
            Self::AdGroupCriteria(ops) => serde_json::to_value(ops)?,
            Self::AdGroupAds(ops) => serde_json::to_value(ops)?,
        };
        Ok(serde_json::json!({ "operations": operations }))
    }
}

/// Remote mutation capability of the advertising platform.
///
/// Each call is one blocking round trip that either applies every
/// operation or none of them.
#[async_trait]
pub trait AdsService: Send + Sync {
    /// Apply `request` to the account `customer_id` (digits only).
    ///
    /// Returns one resource name per operation, in operation order.
    async fn mutate(
        &self,
        customer_id: &str,
        request: MutateRequest,
    ) -> Result<MutateResponse, AdsApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{CriterionStatus, KeywordInfo, KeywordMatchType};

    fn criterion(text: &str) -> MutateOperation<AdGroupCriterion> {
        MutateOperation::create(AdGroupCriterion {
            ad_group: "customers/1/adGroups/2".into(),
            status: CriterionStatus::Enabled,
            keyword: KeywordInfo {
                text: text.into(),
                match_type: KeywordMatchType::Broad,
            },
        })
    }

    #[test]
    fn body_wraps_operations() {
        let request = MutateRequest::AdGroupCriteria(vec![criterion("a"), criterion("b")]);
        let body = request.to_body().unwrap();
        let ops = body["operations"].as_array().unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[1]["create"]["keyword"]["text"], "b");
        assert_eq!(request.operation_count(), 2);
        assert_eq!(request.service_path(), "adGroupCriteria");
    }
}
