//! Provisioning step model.
//!
//! A provisioning run is a linear chain of five remote mutations. Each
//! step's resource feeds a later step, so the order is fixed and the
//! state machine only moves forward. A failure ends the run where it
//! stands: resources created by earlier steps are left in place.

use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// One of the five provisioning steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStep {
    CreateBudget,
    CreateCampaign,
    CreateAdGroup,
    CreateKeywords,
    CreateResponsiveAd,
}

impl ProvisioningStep {
    /// All steps in the order they run.
    pub const ALL: [ProvisioningStep; 5] = [
        Self::CreateBudget,
        Self::CreateCampaign,
        Self::CreateAdGroup,
        Self::CreateKeywords,
        Self::CreateResponsiveAd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateBudget => "create_budget",
            Self::CreateCampaign => "create_campaign",
            Self::CreateAdGroup => "create_ad_group",
            Self::CreateKeywords => "create_keywords",
            Self::CreateResponsiveAd => "create_responsive_ad",
        }
    }

    /// Human-readable label for the operator log.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateBudget => "Budget",
            Self::CreateCampaign => "Campaign",
            Self::CreateAdGroup => "Ad group",
            Self::CreateKeywords => "Keywords",
            Self::CreateResponsiveAd => "Responsive search ad",
        }
    }

    /// 1-based position in the chain.
    pub fn number(&self) -> usize {
        match self {
            Self::CreateBudget => 1,
            Self::CreateCampaign => 2,
            Self::CreateAdGroup => 3,
            Self::CreateKeywords => 4,
            Self::CreateResponsiveAd => 5,
        }
    }
}

impl fmt::Display for ProvisioningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Progress of one provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisioningState {
    Start,
    BudgetCreated,
    CampaignCreated,
    AdGroupCreated,
    KeywordsCreated,
    AdCreated,
    Failed(ProvisioningStep),
}

impl ProvisioningState {
    /// The step to attempt next, or `None` once the run is terminal.
    pub fn next_step(&self) -> Option<ProvisioningStep> {
        match self {
            Self::Start => Some(ProvisioningStep::CreateBudget),
            Self::BudgetCreated => Some(ProvisioningStep::CreateCampaign),
            Self::CampaignCreated => Some(ProvisioningStep::CreateAdGroup),
            Self::AdGroupCreated => Some(ProvisioningStep::CreateKeywords),
            Self::KeywordsCreated => Some(ProvisioningStep::CreateResponsiveAd),
            Self::AdCreated | Self::Failed(_) => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_step().is_none()
    }

    /// Record that `step` succeeded.
    ///
    /// Returns `None` if `step` is not the next step, which keeps
    /// transitions strictly forward.
    pub fn complete(self, step: ProvisioningStep) -> Option<Self> {
        if self.next_step() != Some(step) {
            return None;
        }
        Some(match step {
            ProvisioningStep::CreateBudget => Self::BudgetCreated,
            ProvisioningStep::CreateCampaign => Self::CampaignCreated,
            ProvisioningStep::CreateAdGroup => Self::AdGroupCreated,
            ProvisioningStep::CreateKeywords => Self::KeywordsCreated,
            ProvisioningStep::CreateResponsiveAd => Self::AdCreated,
        })
    }

    /// Record that `step` failed. Only the pending step can fail.
    pub fn fail(self, step: ProvisioningStep) -> Option<Self> {
        (self.next_step() == Some(step)).then_some(Self::Failed(step))
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// One structured rejection returned by the advertising platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorDetail {
    pub code: String,
    pub message: String,
}

/// A completed step and the resources it created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: ProvisioningStep,
    /// Resource names in operation order. One entry except for keywords,
    /// which carries one entry per keyword.
    pub resource_names: Vec<String>,
}

impl StepRecord {
    /// Single reference for display: the resource name, or the keyword
    /// criteria joined with `, `.
    pub fn reference(&self) -> String {
        self.resource_names.join(", ")
    }
}

/// Why a step failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The platform rejected the mutation; details are kept verbatim.
    Rejected {
        request_id: Option<String>,
        errors: Vec<ApiErrorDetail>,
    },
    /// Anything else (transport, malformed response, auth). No detail
    /// beyond a message.
    Unexpected { message: String },
}

/// The step that ended a run and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    pub step: ProvisioningStep,
    pub kind: FailureKind,
}

impl StepFailure {
    /// Structured (code, message) pairs, empty for unexpected failures.
    pub fn errors(&self) -> &[ApiErrorDetail] {
        match &self.kind {
            FailureKind::Rejected { errors, .. } => errors,
            FailureKind::Unexpected { .. } => &[],
        }
    }
}

/// Terminal outcome of a provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProvisioningResult {
    /// All five steps completed, in order.
    Succeeded { steps: Vec<StepRecord> },
    /// A step failed. `completed` lists resources that now exist and were
    /// not rolled back.
    Failed {
        completed: Vec<StepRecord>,
        failure: StepFailure,
    },
}

impl ProvisioningResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Steps that created resources, whatever the outcome.
    pub fn completed_steps(&self) -> &[StepRecord] {
        match self {
            Self::Succeeded { steps } => steps,
            Self::Failed { completed, .. } => completed,
        }
    }

    pub fn failure(&self) -> Option<&StepFailure> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { failure, .. } => Some(failure),
        }
    }
}
