use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use super::domain::{EvaluationId, EvaluationRecord, EvaluationStage, RaterRole, ResponseSet};
use super::scoring::ScoreResult;

/// Everything a single stage transition writes. Implementations must apply it together
/// with the stage compare-and-swap, or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct StageCommit {
    pub next: EvaluationStage,
    pub at: DateTime<Utc>,
    pub responses: Option<ResponseSet>,
    pub score: Option<ScoreResult>,
    pub final_score: Option<u8>,
    pub notes: Option<String>,
}

impl StageCommit {
    pub fn new(next: EvaluationStage, at: DateTime<Utc>) -> Self {
        Self {
            next,
            at,
            responses: None,
            score: None,
            final_score: None,
            notes: None,
        }
    }

    pub fn with_responses(mut self, responses: ResponseSet) -> Self {
        self.responses = Some(responses);
        self
    }

    pub fn with_score(mut self, score: ScoreResult, final_score: u8) -> Self {
        self.score = Some(score);
        self.final_score = Some(final_score);
        self
    }

    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Applies the commit to a record whose stage already matched the expected stage.
    /// Checks run before the first mutation so a rejected commit leaves `record` untouched.
    pub fn apply(self, record: &mut EvaluationRecord) -> Result<(), RepositoryError> {
        if self.next <= record.stage {
            return Err(RepositoryError::BackwardTransition {
                from: record.stage,
                to: self.next,
            });
        }
        if let Some(set) = &self.responses {
            if record.response_set(set.role).is_some() {
                return Err(RepositoryError::DuplicateResponseSet(set.role));
            }
        }
        if self.score.is_some() && record.score.is_some() {
            return Err(RepositoryError::ScoreAlreadyRecorded);
        }

        match self.next {
            EvaluationStage::PendingManager => record.self_completed_at = Some(self.at),
            EvaluationStage::PendingConsensus => record.manager_completed_at = Some(self.at),
            EvaluationStage::Completed => record.consensus_completed_at = Some(self.at),
            EvaluationStage::PendingSelf => {}
        }
        record.stage = self.next;
        if let Some(set) = self.responses {
            record.responses.push(set);
        }
        if let Some(score) = self.score {
            record.score = Some(score);
        }
        if self.final_score.is_some() {
            record.final_score = self.final_score;
        }
        if self.notes.is_some() {
            record.consensus_notes = self.notes;
        }
        Ok(())
    }
}

/// Storage abstraction for evaluation records.
pub trait EvaluationRepository: Send + Sync {
    /// Rejects a duplicate id or a second record for the same (employee, cycle) pair.
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError>;
    /// Atomic read-check-write: applies `commit` only if the persisted stage equals
    /// `expected`, otherwise fails with `StageConflict` and writes nothing.
    fn advance(
        &self,
        id: &EvaluationId,
        expected: EvaluationStage,
        commit: StageCommit,
    ) -> Result<EvaluationRecord, RepositoryError>;
    fn by_stage(
        &self,
        stage: EvaluationStage,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists: {0}")]
    Conflict(String),
    #[error("record not found")]
    NotFound,
    #[error(
        "stage changed concurrently: expected {}, found {}",
        .expected.label(),
        .actual.label()
    )]
    StageConflict {
        expected: EvaluationStage,
        actual: EvaluationStage,
    },
    #[error("refusing to move stage from {} to {}", .from.label(), .to.label())]
    BackwardTransition {
        from: EvaluationStage,
        to: EvaluationStage,
    },
    #[error("{} responses already recorded", .0.label())]
    DuplicateResponseSet(RaterRole),
    #[error("score already recorded")]
    ScoreAlreadyRecorded,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

type Records = BTreeMap<EvaluationId, EvaluationRecord>;

/// Mutex-guarded map used by the service binary and the test suites. The lock is held for
/// the whole compare-and-swap in `advance`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEvaluationRepository {
    records: Arc<Mutex<Records>>,
}

impl InMemoryEvaluationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Records>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, record: EvaluationRecord) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict(format!("evaluation {}", record.id.0)));
        }
        if guard.values().any(|existing| {
            existing.employee_id == record.employee_id && existing.cycle_id == record.cycle_id
        }) {
            return Err(RepositoryError::Conflict(format!(
                "employee {} already has an evaluation in cycle {}",
                record.employee_id.0, record.cycle_id.0
            )));
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<EvaluationRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn advance(
        &self,
        id: &EvaluationId,
        expected: EvaluationStage,
        commit: StageCommit,
    ) -> Result<EvaluationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        let record = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        if record.stage != expected {
            return Err(RepositoryError::StageConflict {
                expected,
                actual: record.stage,
            });
        }

        commit.apply(record)?;
        Ok(record.clone())
    }

    fn by_stage(
        &self,
        stage: EvaluationStage,
        limit: usize,
    ) -> Result<Vec<EvaluationRecord>, RepositoryError> {
        Ok(self
            .lock()?
            .values()
            .filter(|record| record.stage == stage)
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::evaluation::domain::{CycleId, EmployeeId};

    fn record(id: &str, employee: &str, cycle: &str) -> EvaluationRecord {
        EvaluationRecord::new(
            EvaluationId(id.to_string()),
            EmployeeId(employee.to_string()),
            CycleId(cycle.to_string()),
            Utc::now(),
        )
    }

    fn self_set(id: &str) -> ResponseSet {
        ResponseSet {
            evaluation_id: EvaluationId(id.to_string()),
            rater_id: EmployeeId("emp-1".to_string()),
            role: RaterRole::SelfReview,
            submitted_at: Utc::now(),
            items: Vec::new(),
        }
    }

    #[test]
    fn insert_rejects_second_record_for_same_employee_and_cycle() {
        let repository = InMemoryEvaluationRepository::default();
        repository
            .insert(record("eval-1", "emp-1", "2025"))
            .expect("first insert");

        let err = repository
            .insert(record("eval-2", "emp-1", "2025"))
            .expect_err("duplicate pair");
        assert!(matches!(err, RepositoryError::Conflict(_)));

        repository
            .insert(record("eval-3", "emp-1", "2026"))
            .expect("new cycle is fine");
        let stored = repository
            .by_stage(EvaluationStage::PendingSelf, 10)
            .expect("query");
        assert_eq!(stored.len(), 2);
    }

    #[test]
    fn advance_is_a_compare_and_swap() {
        let repository = InMemoryEvaluationRepository::default();
        repository
            .insert(record("eval-1", "emp-1", "2025"))
            .expect("insert");
        let id = EvaluationId("eval-1".to_string());
        let commit = StageCommit::new(EvaluationStage::PendingManager, Utc::now())
            .with_responses(self_set("eval-1"));

        let stored = repository
            .advance(&id, EvaluationStage::PendingSelf, commit.clone())
            .expect("first advance");
        assert_eq!(stored.stage, EvaluationStage::PendingManager);
        assert!(stored.self_completed_at.is_some());
        assert_eq!(stored.responses.len(), 1);

        let err = repository
            .advance(&id, EvaluationStage::PendingSelf, commit)
            .expect_err("stale expectation");
        assert_eq!(
            err,
            RepositoryError::StageConflict {
                expected: EvaluationStage::PendingSelf,
                actual: EvaluationStage::PendingManager,
            }
        );
        let unchanged = repository.fetch(&id).expect("fetch").expect("present");
        assert_eq!(unchanged.responses.len(), 1);
    }

    #[test]
    fn apply_refuses_backward_moves_and_leaves_record_untouched() {
        let mut stored = record("eval-1", "emp-1", "2025");
        stored.stage = EvaluationStage::PendingConsensus;
        let before = stored.clone();

        let err = StageCommit::new(EvaluationStage::PendingManager, Utc::now())
            .with_responses(self_set("eval-1"))
            .apply(&mut stored)
            .expect_err("backward");
        assert!(matches!(err, RepositoryError::BackwardTransition { .. }));
        assert_eq!(stored, before);
    }

    #[test]
    fn by_stage_filters_and_limits() {
        let repository = InMemoryEvaluationRepository::default();
        for index in 0..3 {
            repository
                .insert(record(&format!("eval-{index}"), &format!("emp-{index}"), "2025"))
                .expect("insert");
        }
        let pending = repository
            .by_stage(EvaluationStage::PendingSelf, 2)
            .expect("query");
        assert_eq!(pending.len(), 2);
        assert!(repository
            .by_stage(EvaluationStage::Completed, 10)
            .expect("query")
            .is_empty());
    }
}
