//! Sequential multi-rater evaluation workflow.
//!
//! An evaluation moves `pending_self -> pending_manager -> pending_consensus -> completed`.
//! Each step is a guarded transition persisted through a compare-and-swap on the stored
//! stage. The consensus step feeds the self and manager response sets through the scoring
//! pipeline (aggregate, normalize, classify, synthesize) and stores the result with the
//! same commit. Notifications go out only after the commit and cannot undo it.

pub mod directory;
pub mod domain;
pub mod notifications;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod transition;
pub mod validation;

#[cfg(test)]
mod tests;

pub use directory::{DirectoryError, InMemoryDirectory, OrgDirectory};
pub use domain::{
    Actor, ActorRole, CycleId, EmployeeId, EvaluationId, EvaluationRecord, EvaluationStage,
    EvaluationStatusView, ItemResponse, RaterRole, ResponseSet,
};
pub use notifications::{
    DispatchWarning, NotificationError, NotificationGateway, NotificationKind,
    NotificationOutbox, NotificationRequest,
};
pub use repository::{
    EvaluationRepository, InMemoryEvaluationRepository, RepositoryError, StageCommit,
};
pub use router::evaluation_router;
pub use scoring::{
    Classification, Dimension, DimensionScore, Profile, RaterBreakdown, RaterDimensionScore,
    ScoreResult, ScoringConfig, ScoringEngine,
};
pub use service::{ConsensusDecision, EvaluationWorkflowService, SubmissionOutcome, WorkflowError};
pub use transition::{transition, RaterCapability, ReviewChain, WorkflowOperation};
pub use validation::{ResponseGuard, ValidationError};
