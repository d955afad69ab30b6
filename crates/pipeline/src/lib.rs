//! Campaign provisioning pipeline.
//!
//! Runs the five dependent Google Ads mutations (budget, campaign, ad
//! group, keywords, responsive search ad) in order for one validated
//! [`CampaignRequest`](launcher_core::campaign::CampaignRequest).

pub mod operations;
pub mod provisioner;

pub use provisioner::Provisioner;
