//! Builders for the mutate request of each provisioning step.
//!
//! Pure functions: every safety default (paused campaign, search-only
//! networks, broad match) is fixed here and cannot be changed by input.

use launcher_ads::resources::{
    Ad, AdGroup, AdGroupAd, AdGroupAdStatus, AdGroupCriterion, AdGroupStatus, AdGroupType,
    AdTextAsset, AdvertisingChannelType, BudgetDeliveryMethod, Campaign, CampaignBudget,
    CampaignStatus, CriterionStatus, KeywordInfo, KeywordMatchType, ManualCpc, MutateOperation,
    NetworkSettings, ResponsiveSearchAdInfo,
};
use launcher_ads::service::MutateRequest;
use launcher_core::campaign::CampaignRequest;
use launcher_core::naming::ResourceNames;
use launcher_core::templates::TemplateBundle;

/// Step 1: a non-shared daily budget.
pub fn budget(request: &CampaignRequest, names: &ResourceNames) -> MutateRequest {
    MutateRequest::CampaignBudgets(vec![MutateOperation::create(CampaignBudget {
        name: names.budget.clone(),
        amount_micros: request.daily_budget_micros,
        delivery_method: BudgetDeliveryMethod::Standard,
        explicitly_shared: false,
    })])
}

/// Step 2: a paused Search campaign on Google Search only.
pub fn campaign(budget_ref: &str, names: &ResourceNames) -> MutateRequest {
    MutateRequest::Campaigns(vec![MutateOperation::create(Campaign {
        name: names.campaign.clone(),
        status: CampaignStatus::Paused,
        advertising_channel_type: AdvertisingChannelType::Search,
        campaign_budget: budget_ref.to_string(),
        manual_cpc: ManualCpc::default(),
        network_settings: NetworkSettings::search_only(),
        final_url_suffix: names.final_url_suffix.clone(),
    })])
}

/// Step 3: one enabled standard ad group.
pub fn ad_group(campaign_ref: &str, names: &ResourceNames) -> MutateRequest {
    MutateRequest::AdGroups(vec![MutateOperation::create(AdGroup {
        name: names.ad_group.clone(),
        campaign: campaign_ref.to_string(),
        status: AdGroupStatus::Enabled,
        ad_group_type: AdGroupType::SearchStandard,
    })])
}

/// Step 4: every template keyword, broad match, in one batch.
pub fn keywords(ad_group_ref: &str, bundle: &TemplateBundle) -> MutateRequest {
    MutateRequest::AdGroupCriteria(
        bundle
            .keywords
            .iter()
            .map(|text| {
                MutateOperation::create(AdGroupCriterion {
                    ad_group: ad_group_ref.to_string(),
                    status: CriterionStatus::Enabled,
                    keyword: KeywordInfo {
                        text: text.clone(),
                        match_type: KeywordMatchType::Broad,
                    },
                })
            })
            .collect(),
    )
}

/// Step 5: one responsive search ad carrying every headline and
/// description, pointing at the operator's landing page.
pub fn responsive_ad(
    ad_group_ref: &str,
    request: &CampaignRequest,
    bundle: &TemplateBundle,
) -> MutateRequest {
    let assets = |texts: &[String]| {
        texts
            .iter()
            .map(|text| AdTextAsset { text: text.clone() })
            .collect()
    };

    MutateRequest::AdGroupAds(vec![MutateOperation::create(AdGroupAd {
        ad_group: ad_group_ref.to_string(),
        status: AdGroupAdStatus::Enabled,
        ad: Ad {
            final_urls: vec![request.landing_page_url.clone()],
            responsive_search_ad: ResponsiveSearchAdInfo {
                headlines: assets(&bundle.headlines),
                descriptions: assets(&bundle.descriptions),
            },
        },
    })])
}
