//! Five-step provisioning orchestrator.
//!
//! Each step is one awaited mutate call whose resource name feeds the
//! next step. The run stops at the first failure and never issues
//! compensating calls: resources created by earlier steps stay in the
//! account and are listed in the result for manual cleanup.

use std::sync::Arc;

use launcher_ads::error::AdsApiError;
use launcher_ads::service::{AdsService, MutateRequest};
use launcher_core::campaign::CampaignRequest;
use launcher_core::naming::ResourceNames;
use launcher_core::provisioning::{
    FailureKind, ProvisioningResult, ProvisioningState, ProvisioningStep, StepFailure, StepRecord,
};
use launcher_core::templates::TemplateBundle;

use crate::operations;

/// Runs provisioning against an injected advertising service.
#[derive(Clone)]
pub struct Provisioner {
    ads: Arc<dyn AdsService>,
}

impl Provisioner {
    pub fn new(ads: Arc<dyn AdsService>) -> Self {
        Self { ads }
    }

    /// Provision one campaign with freshly generated resource names.
    pub async fn provision(
        &self,
        request: &CampaignRequest,
        bundle: &TemplateBundle,
    ) -> ProvisioningResult {
        self.provision_with_names(request, bundle, ResourceNames::generate())
            .await
    }

    /// Provision one campaign using the given resource names.
    pub async fn provision_with_names(
        &self,
        request: &CampaignRequest,
        bundle: &TemplateBundle,
        names: ResourceNames,
    ) -> ProvisioningResult {
        tracing::info!(
            account = %request.target_account_id,
            template = %bundle.name,
            budget_micros = request.daily_budget_micros,
            token = %names.token,
            "Starting campaign provisioning",
        );

        let mut run = Run::new(self.ads.as_ref(), &request.target_account_id);
        let outcome = run.execute(request, bundle, &names).await;
        match outcome {
            Ok(()) => {
                tracing::info!(
                    account = %request.target_account_id,
                    campaign = %names.campaign,
                    "Campaign provisioned (paused)",
                );
                ProvisioningResult::Succeeded {
                    steps: run.completed,
                }
            }
            Err(failure) => {
                let left_behind: Vec<String> = run
                    .completed
                    .iter()
                    .flat_map(|record| record.resource_names.iter().cloned())
                    .collect();
                tracing::warn!(
                    account = %request.target_account_id,
                    step = %failure.step,
                    left_behind = ?left_behind,
                    "Provisioning aborted; created resources were not rolled back",
                );
                ProvisioningResult::Failed {
                    completed: run.completed,
                    failure,
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// One run
// ---------------------------------------------------------------------------

struct Run<'a> {
    ads: &'a dyn AdsService,
    customer_id: &'a str,
    state: ProvisioningState,
    completed: Vec<StepRecord>,
}

impl<'a> Run<'a> {
    fn new(ads: &'a dyn AdsService, customer_id: &'a str) -> Self {
        Self {
            ads,
            customer_id,
            state: ProvisioningState::Start,
            completed: Vec::with_capacity(ProvisioningStep::ALL.len()),
        }
    }

    async fn execute(
        &mut self,
        request: &CampaignRequest,
        bundle: &TemplateBundle,
        names: &ResourceNames,
    ) -> Result<(), StepFailure> {
        let budget = self
            .submit(
                ProvisioningStep::CreateBudget,
                operations::budget(request, names),
            )
            .await?;

        let campaign = self
            .submit(
                ProvisioningStep::CreateCampaign,
                operations::campaign(&budget, names),
            )
            .await?;

        let ad_group = self
            .submit(
                ProvisioningStep::CreateAdGroup,
                operations::ad_group(&campaign, names),
            )
            .await?;

        self.submit(
            ProvisioningStep::CreateKeywords,
            operations::keywords(&ad_group, bundle),
        )
        .await?;

        self.submit(
            ProvisioningStep::CreateResponsiveAd,
            operations::responsive_ad(&ad_group, request, bundle),
        )
        .await?;

        Ok(())
    }

    /// Submit one step and record it. Returns the first resource name,
    /// which is the reference later steps build on.
    async fn submit(
        &mut self,
        step: ProvisioningStep,
        request: MutateRequest,
    ) -> Result<String, StepFailure> {
        if self.state.next_step() != Some(step) {
            return Err(StepFailure {
                step,
                kind: FailureKind::Unexpected {
                    message: format!("step {step} submitted out of order"),
                },
            });
        }

        let expected = request.operation_count();
        tracing::debug!(
            step = %step,
            service = request.service_path(),
            operations = expected,
            "Submitting provisioning step",
        );

        let outcome = self
            .ads
            .mutate(self.customer_id, request)
            .await
            .map_err(failure_kind)
            .and_then(|response| checked_names(response.resource_names(), expected));

        match outcome {
            Ok(resource_names) => {
                let reference = resource_names.first().cloned().unwrap_or_default();
                tracing::info!(
                    step = %step,
                    resource = %resource_names.join(", "),
                    "Provisioning step completed",
                );
                self.state = self.state.complete(step).unwrap_or(self.state);
                self.completed.push(StepRecord {
                    step,
                    resource_names,
                });
                Ok(reference)
            }
            Err(kind) => {
                tracing::error!(step = %step, failure = ?kind, "Provisioning step failed");
                self.state = self.state.fail(step).unwrap_or(self.state);
                Err(StepFailure { step, kind })
            }
        }
    }
}

fn failure_kind(err: AdsApiError) -> FailureKind {
    match err {
        AdsApiError::Rejected { request_id, errors } => {
            FailureKind::Rejected { request_id, errors }
        }
        other => FailureKind::Unexpected {
            message: other.to_string(),
        },
    }
}

/// A step only counts as done when every operation came back with a
/// non-empty resource name.
fn checked_names(names: Vec<String>, expected: usize) -> Result<Vec<String>, FailureKind> {
    if names.len() != expected {
        return Err(FailureKind::Unexpected {
            message: format!(
                "expected {expected} resource name(s) in the response, got {}",
                names.len()
            ),
        });
    }
    if names.iter().any(|name| name.trim().is_empty()) {
        return Err(FailureKind::Unexpected {
            message: "response is missing a resource name".to_string(),
        });
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use launcher_core::provisioning::ApiErrorDetail;

    use super::*;

    #[test]
    fn count_mismatch_is_unexpected() {
        let result = checked_names(vec!["customers/1/campaigns/2".into()], 2);
        assert_matches!(result, Err(FailureKind::Unexpected { message }) if message.contains("expected 2"));
    }

    #[test]
    fn blank_resource_name_is_unexpected() {
        let result = checked_names(vec![String::new()], 1);
        assert_matches!(result, Err(FailureKind::Unexpected { .. }));
    }

    #[test]
    fn rejection_keeps_details() {
        let errors = vec![ApiErrorDetail {
            code: "campaignError.DUPLICATE_CAMPAIGN_NAME".into(),
            message: "duplicate".into(),
        }];
        let kind = failure_kind(AdsApiError::Rejected {
            request_id: Some("r1".into()),
            errors: errors.clone(),
        });
        assert_eq!(
            kind,
            FailureKind::Rejected {
                request_id: Some("r1".into()),
                errors
            }
        );
    }

    #[test]
    fn other_errors_become_unexpected_with_message() {
        let kind = failure_kind(AdsApiError::Http {
            status: 502,
            body: "bad gateway".into(),
        });
        assert_matches!(kind, FailureKind::Unexpected { message } if message.contains("502"));
    }
}
