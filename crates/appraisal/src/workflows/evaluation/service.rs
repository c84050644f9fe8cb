use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::directory::{DirectoryError, OrgDirectory};
use super::domain::{
    Actor, CycleId, EmployeeId, EvaluationId, EvaluationRecord, EvaluationStage,
    EvaluationStatusView, ItemResponse, RaterRole, ResponseSet,
};
use super::notifications::{
    DispatchWarning, NotificationGateway, NotificationKind, NotificationOutbox,
    NotificationRequest,
};
use super::repository::{EvaluationRepository, RepositoryError, StageCommit};
use super::scoring::{ScoreResult, ScoringConfig, ScoringEngine, ScoringError};
use super::transition::{transition, ReviewChain, TransitionError, WorkflowOperation};
use super::validation::{check_override, ResponseGuard, ValidationError};

/// Workflow controller: guards each transition, persists it atomically, runs the scoring
/// pipeline at consensus, and dispatches notifications once the commit has landed.
pub struct EvaluationWorkflowService<R, D, N> {
    repository: Arc<R>,
    directory: Arc<D>,
    notifier: Arc<N>,
    engine: Arc<ScoringEngine>,
    guard: Arc<ResponseGuard>,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// Consensus input from the approver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusDecision {
    #[serde(default)]
    pub final_score_override: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Result of a successful transition. `warnings` lists notifications that failed after the
/// commit; they never undo it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub evaluation_id: EvaluationId,
    pub stage: EvaluationStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<DispatchWarning>,
}

impl<R, D, N> EvaluationWorkflowService<R, D, N>
where
    R: EvaluationRepository + 'static,
    D: OrgDirectory + 'static,
    N: NotificationGateway + 'static,
{
    pub fn new(
        repository: Arc<R>,
        directory: Arc<D>,
        notifier: Arc<N>,
        config: ScoringConfig,
    ) -> Self {
        let guard = Arc::new(ResponseGuard::new(config.clone()));
        let engine = Arc::new(ScoringEngine::new(config));

        Self {
            repository,
            directory,
            notifier,
            engine,
            guard,
        }
    }

    pub fn scoring_config(&self) -> &ScoringConfig {
        self.engine.config()
    }

    /// Open an evaluation for one employee in one cycle.
    pub fn create_evaluation(
        &self,
        employee_id: EmployeeId,
        cycle_id: CycleId,
    ) -> Result<EvaluationRecord, WorkflowError> {
        if !self.directory.contains(&employee_id)? {
            return Err(WorkflowError::NotFound(format!("employee {}", employee_id.0)));
        }

        let record =
            EvaluationRecord::new(next_evaluation_id(), employee_id, cycle_id, Utc::now());
        let stored = self.repository.insert(record)?;
        info!(
            evaluation_id = %stored.id.0,
            employee_id = %stored.employee_id.0,
            cycle_id = %stored.cycle_id.0,
            "evaluation opened"
        );
        Ok(stored)
    }

    /// Stage 1: the subject rates themself.
    pub fn submit_self(
        &self,
        evaluation_id: &EvaluationId,
        actor: &Actor,
        responses: Vec<ItemResponse>,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        self.submit_ratings(
            evaluation_id,
            actor,
            WorkflowOperation::SubmitSelf,
            RaterRole::SelfReview,
            responses,
        )
    }

    /// Stage 2: the subject's registered manager rates them.
    pub fn submit_manager(
        &self,
        evaluation_id: &EvaluationId,
        actor: &Actor,
        responses: Vec<ItemResponse>,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        self.submit_ratings(
            evaluation_id,
            actor,
            WorkflowOperation::SubmitManager,
            RaterRole::Manager,
            responses,
        )
    }

    /// Stage 3: the manager's manager (or an independent HR administrator) finalizes the
    /// evaluation. Scores both response sets and stores the result with the commit.
    pub fn submit_consensus(
        &self,
        evaluation_id: &EvaluationId,
        actor: &Actor,
        decision: ConsensusDecision,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        let operation = WorkflowOperation::SubmitConsensus;
        let record = self.load(evaluation_id)?;
        let chain = self.review_chain(&record.employee_id)?;
        let next = transition(record.stage, operation, chain.capability(actor, operation))?;
        let override_score = check_override(decision.final_score_override)?;

        let self_set = record
            .response_set(RaterRole::SelfReview)
            .ok_or_else(|| WorkflowError::Internal("self responses missing".to_string()))?;
        let manager_set = record
            .response_set(RaterRole::Manager)
            .ok_or_else(|| WorkflowError::Internal("manager responses missing".to_string()))?;
        let score = self.engine.score(&[self_set, manager_set])?;
        let final_score = override_score.unwrap_or(score.overall);

        let mut payload = BTreeMap::new();
        payload.insert("final_score".to_string(), final_score.to_string());
        payload.insert("profile".to_string(), score.profile.label.clone());
        payload.insert(
            "dominant_dimension".to_string(),
            score.dominant_dimension.key().to_string(),
        );
        let mut outbox = NotificationOutbox::default();
        outbox.stage(NotificationRequest {
            recipient: record.employee_id.clone(),
            kind: NotificationKind::EvaluationCompleted,
            evaluation_id: record.id.clone(),
            payload,
        });

        let notes = decision
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());
        let commit = StageCommit::new(next, Utc::now())
            .with_score(score, final_score)
            .with_notes(notes);
        let stored = self
            .repository
            .advance(evaluation_id, operation.required_stage(), commit)?;

        info!(
            evaluation_id = %stored.id.0,
            approver = %actor.id.0,
            final_score,
            overridden = override_score.is_some(),
            stage = stored.stage.label(),
            "evaluation completed"
        );

        let warnings = outbox.flush(self.notifier.as_ref());
        Ok(SubmissionOutcome {
            evaluation_id: stored.id,
            stage: stored.stage,
            final_score: stored.final_score,
            warnings,
        })
    }

    /// Current stage and completion markers. Read only.
    pub fn get_status(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<EvaluationStatusView, WorkflowError> {
        Ok(self.load(evaluation_id)?.status_view())
    }

    /// Stored score of a completed evaluation.
    pub fn get_score(&self, evaluation_id: &EvaluationId) -> Result<ScoreResult, WorkflowError> {
        self.load(evaluation_id)?
            .score
            .ok_or_else(|| WorkflowError::NotFound(format!("score for {}", evaluation_id.0)))
    }

    pub fn list_by_stage(
        &self,
        stage: EvaluationStage,
        limit: usize,
    ) -> Result<Vec<EvaluationStatusView>, WorkflowError> {
        Ok(self
            .repository
            .by_stage(stage, limit)?
            .iter()
            .map(EvaluationRecord::status_view)
            .collect())
    }

    fn submit_ratings(
        &self,
        evaluation_id: &EvaluationId,
        actor: &Actor,
        operation: WorkflowOperation,
        role: RaterRole,
        responses: Vec<ItemResponse>,
    ) -> Result<SubmissionOutcome, WorkflowError> {
        let record = self.load(evaluation_id)?;
        let chain = self.review_chain(&record.employee_id)?;
        let next = transition(record.stage, operation, chain.capability(actor, operation))?;
        self.guard.check(role, &responses)?;

        let mut outbox = NotificationOutbox::default();
        let mut warnings = Vec::new();
        match (role, chain.approver.clone()) {
            (RaterRole::SelfReview, _) => outbox.stage(NotificationRequest {
                recipient: chain.manager.clone(),
                kind: NotificationKind::SelfReviewSubmitted,
                evaluation_id: record.id.clone(),
                payload: subject_payload(&record),
            }),
            (RaterRole::Manager, Some(approver)) => outbox.stage(NotificationRequest {
                recipient: approver,
                kind: NotificationKind::ManagerReviewSubmitted,
                evaluation_id: record.id.clone(),
                payload: subject_payload(&record),
            }),
            (RaterRole::Manager, None) => {
                warn!(
                    evaluation_id = %record.id.0,
                    manager = %chain.manager.0,
                    "no approver above manager; consensus needs an HR administrator"
                );
                warnings.push(DispatchWarning {
                    recipient: chain.manager.clone(),
                    kind: NotificationKind::ManagerReviewSubmitted,
                    message: "no consensus approver registered above the manager".to_string(),
                });
            }
        }

        let now = Utc::now();
        let item_count = responses.len();
        let set = ResponseSet {
            evaluation_id: record.id.clone(),
            rater_id: actor.id.clone(),
            role,
            submitted_at: now,
            items: responses,
        };
        let stored = self.repository.advance(
            evaluation_id,
            operation.required_stage(),
            StageCommit::new(next, now).with_responses(set),
        )?;

        info!(
            evaluation_id = %stored.id.0,
            rater = %actor.id.0,
            role = role.label(),
            items = item_count,
            stage = stored.stage.label(),
            "responses recorded"
        );

        warnings.extend(outbox.flush(self.notifier.as_ref()));
        Ok(SubmissionOutcome {
            evaluation_id: stored.id,
            stage: stored.stage,
            final_score: stored.final_score,
            warnings,
        })
    }

    fn load(&self, evaluation_id: &EvaluationId) -> Result<EvaluationRecord, WorkflowError> {
        self.repository
            .fetch(evaluation_id)?
            .ok_or_else(|| WorkflowError::NotFound(format!("evaluation {}", evaluation_id.0)))
    }

    fn review_chain(&self, subject: &EmployeeId) -> Result<ReviewChain, WorkflowError> {
        if !self.directory.contains(subject)? {
            return Err(WorkflowError::NotFound(format!("employee {}", subject.0)));
        }
        let manager = self
            .directory
            .manager_of(subject)?
            .ok_or_else(|| WorkflowError::NotFound(format!("manager of {}", subject.0)))?;
        if !self.directory.contains(&manager)? {
            return Err(WorkflowError::NotFound(format!("employee {}", manager.0)));
        }
        let approver = self.directory.manager_of(&manager)?;

        Ok(ReviewChain {
            subject: subject.clone(),
            manager,
            approver,
        })
    }
}

fn subject_payload(record: &EvaluationRecord) -> BTreeMap<String, String> {
    let mut payload = BTreeMap::new();
    payload.insert("employee_id".to_string(), record.employee_id.0.clone());
    payload.insert("cycle_id".to_string(), record.cycle_id.0.clone());
    payload
}

/// Error raised by the workflow service.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid stage: expected {}, found {}", .expected.label(), .actual.label())]
    InvalidStage {
        expected: EvaluationStage,
        actual: EvaluationStage,
    },
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    pub const fn kind(&self) -> &'static str {
        match self {
            WorkflowError::NotFound(_) => "not_found",
            WorkflowError::InvalidStage { .. } => "invalid_stage",
            WorkflowError::Forbidden(_) => "forbidden",
            WorkflowError::Validation(_) => "validation_error",
            WorkflowError::Conflict(_) => "conflict",
            WorkflowError::Internal(_) => "internal_error",
        }
    }
}

impl From<TransitionError> for WorkflowError {
    fn from(value: TransitionError) -> Self {
        match value {
            TransitionError::InvalidStage {
                expected, actual, ..
            } => Self::InvalidStage { expected, actual },
            forbidden @ TransitionError::Forbidden { .. } => {
                Self::Forbidden(forbidden.to_string())
            }
        }
    }
}

impl From<RepositoryError> for WorkflowError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound("evaluation".to_string()),
            RepositoryError::StageConflict { expected, actual } => {
                Self::InvalidStage { expected, actual }
            }
            RepositoryError::Conflict(detail) => Self::Conflict(detail),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DirectoryError> for WorkflowError {
    fn from(value: DirectoryError) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<ScoringError> for WorkflowError {
    fn from(value: ScoringError) -> Self {
        Self::Internal(value.to_string())
    }
}
