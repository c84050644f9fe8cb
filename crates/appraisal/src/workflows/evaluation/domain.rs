use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{Dimension, ScoreResult};

/// Identifier wrapper for evaluation records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

/// Identifier wrapper for employees (subjects, managers, and approvers alike).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

/// Identifier wrapper for review cycles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleId(pub String);

/// Lifecycle stage of an evaluation. Variants are declared in workflow order so the
/// derived `Ord` matches forward progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStage {
    PendingSelf,
    PendingManager,
    PendingConsensus,
    Completed,
}

impl EvaluationStage {
    pub const fn label(self) -> &'static str {
        match self {
            EvaluationStage::PendingSelf => "pending_self",
            EvaluationStage::PendingManager => "pending_manager",
            EvaluationStage::PendingConsensus => "pending_consensus",
            EvaluationStage::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending_self" => Some(Self::PendingSelf),
            "pending_manager" => Some(Self::PendingManager),
            "pending_consensus" => Some(Self::PendingConsensus),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Which rater produced a response set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterRole {
    #[serde(rename = "self")]
    SelfReview,
    Manager,
}

impl RaterRole {
    pub const fn label(self) -> &'static str {
        match self {
            RaterRole::SelfReview => "self",
            RaterRole::Manager => "manager",
        }
    }
}

/// Role supplied by the already-authenticated identity context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    #[default]
    Member,
    HrAdmin,
}

impl ActorRole {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "hr_admin" | "admin" => Self::HrAdmin,
            _ => Self::Member,
        }
    }
}

/// Acting identity for a workflow call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EmployeeId,
    #[serde(default)]
    pub role: ActorRole,
}

impl Actor {
    pub fn member(id: impl Into<String>) -> Self {
        Self {
            id: EmployeeId(id.into()),
            role: ActorRole::Member,
        }
    }

    pub fn hr_admin(id: impl Into<String>) -> Self {
        Self {
            id: EmployeeId(id.into()),
            role: ActorRole::HrAdmin,
        }
    }
}

/// One questionnaire answer as submitted by a rater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemResponse {
    pub item_id: String,
    pub dimension: Dimension,
    pub answer: u8,
    #[serde(default)]
    pub reverse: bool,
}

/// Immutable batch of answers from one rater for one evaluation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSet {
    pub evaluation_id: EvaluationId,
    pub rater_id: EmployeeId,
    pub role: RaterRole,
    pub submitted_at: DateTime<Utc>,
    pub items: Vec<ItemResponse>,
}

/// Persisted evaluation, one per (employee, cycle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: EvaluationId,
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    pub stage: EvaluationStage,
    pub created_at: DateTime<Utc>,
    pub self_completed_at: Option<DateTime<Utc>>,
    pub manager_completed_at: Option<DateTime<Utc>>,
    pub consensus_completed_at: Option<DateTime<Utc>>,
    pub final_score: Option<u8>,
    pub consensus_notes: Option<String>,
    pub responses: Vec<ResponseSet>,
    pub score: Option<ScoreResult>,
}

impl EvaluationRecord {
    pub fn new(
        id: EvaluationId,
        employee_id: EmployeeId,
        cycle_id: CycleId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            employee_id,
            cycle_id,
            stage: EvaluationStage::PendingSelf,
            created_at,
            self_completed_at: None,
            manager_completed_at: None,
            consensus_completed_at: None,
            final_score: None,
            consensus_notes: None,
            responses: Vec::new(),
            score: None,
        }
    }

    pub fn response_set(&self, role: RaterRole) -> Option<&ResponseSet> {
        self.responses.iter().find(|set| set.role == role)
    }

    pub fn status_view(&self) -> EvaluationStatusView {
        EvaluationStatusView {
            evaluation_id: self.id.clone(),
            employee_id: self.employee_id.clone(),
            cycle_id: self.cycle_id.clone(),
            stage: self.stage,
            self_completed: self.self_completed_at.is_some(),
            manager_completed: self.manager_completed_at.is_some(),
            self_completed_at: self.self_completed_at,
            manager_completed_at: self.manager_completed_at,
            consensus_completed_at: self.consensus_completed_at,
            final_score: self.final_score,
        }
    }
}

/// Read-only projection returned by status queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationStatusView {
    pub evaluation_id: EvaluationId,
    pub employee_id: EmployeeId,
    pub cycle_id: CycleId,
    pub stage: EvaluationStage,
    pub self_completed: bool,
    pub manager_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_completed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
}
