use serde::{Deserialize, Serialize};

use super::domain::{Actor, ActorRole, EmployeeId, EvaluationStage};

/// Stage-advancing operations exposed by the workflow controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowOperation {
    SubmitSelf,
    SubmitManager,
    SubmitConsensus,
}

impl WorkflowOperation {
    pub const fn required_stage(self) -> EvaluationStage {
        match self {
            WorkflowOperation::SubmitSelf => EvaluationStage::PendingSelf,
            WorkflowOperation::SubmitManager => EvaluationStage::PendingManager,
            WorkflowOperation::SubmitConsensus => EvaluationStage::PendingConsensus,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            WorkflowOperation::SubmitSelf => "submit_self",
            WorkflowOperation::SubmitManager => "submit_manager",
            WorkflowOperation::SubmitConsensus => "submit_consensus",
        }
    }
}

/// What the acting identity is allowed to do for a given evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterCapability {
    Subject,
    Manager,
    ConsensusApprover,
    Unrelated,
}

/// Reporting line for one evaluation subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewChain {
    pub subject: EmployeeId,
    pub manager: EmployeeId,
    pub approver: Option<EmployeeId>,
}

impl ReviewChain {
    /// Resolves the caller's capability for one operation. HR administrators may act as the
    /// consensus approver, except on evaluations where they are already the subject or the
    /// manager.
    pub fn capability(&self, actor: &Actor, operation: WorkflowOperation) -> RaterCapability {
        match operation {
            WorkflowOperation::SubmitSelf if actor.id == self.subject => RaterCapability::Subject,
            WorkflowOperation::SubmitManager if actor.id == self.manager => {
                RaterCapability::Manager
            }
            WorkflowOperation::SubmitConsensus => {
                let is_chain_approver = self.approver.as_ref() == Some(&actor.id);
                let is_independent_admin = actor.role == ActorRole::HrAdmin
                    && actor.id != self.subject
                    && actor.id != self.manager;
                if is_chain_approver || is_independent_admin {
                    RaterCapability::ConsensusApprover
                } else {
                    RaterCapability::Unrelated
                }
            }
            _ => RaterCapability::Unrelated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error(
        "{} requires stage {}, evaluation is {}",
        .operation.label(),
        .expected.label(),
        .actual.label()
    )]
    InvalidStage {
        operation: WorkflowOperation,
        expected: EvaluationStage,
        actual: EvaluationStage,
    },
    #[error("{capability:?} may not perform {}", .operation.label())]
    Forbidden {
        operation: WorkflowOperation,
        capability: RaterCapability,
    },
}

/// The workflow state machine. The stage precondition is checked before the caller's
/// capability, so a late duplicate submission always reports the stage mismatch.
pub fn transition(
    stage: EvaluationStage,
    operation: WorkflowOperation,
    capability: RaterCapability,
) -> Result<EvaluationStage, TransitionError> {
    use EvaluationStage::{Completed, PendingConsensus, PendingManager, PendingSelf};
    use RaterCapability::{ConsensusApprover, Manager, Subject};
    use WorkflowOperation::{SubmitConsensus, SubmitManager, SubmitSelf};

    match (stage, operation, capability) {
        (PendingSelf, SubmitSelf, Subject) => Ok(PendingManager),
        (PendingManager, SubmitManager, Manager) => Ok(PendingConsensus),
        (PendingConsensus, SubmitConsensus, ConsensusApprover) => Ok(Completed),
        (actual, operation, _) if actual != operation.required_stage() => {
            Err(TransitionError::InvalidStage {
                operation,
                expected: operation.required_stage(),
                actual,
            })
        }
        (_, operation, capability) => Err(TransitionError::Forbidden {
            operation,
            capability,
        }),
    }
}
