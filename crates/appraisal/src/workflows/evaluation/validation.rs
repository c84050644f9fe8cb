use std::collections::HashSet;

use super::domain::{ItemResponse, RaterRole};
use super::scoring::{Dimension, ScoringConfig};

/// Malformed input rejected before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{role} responses must not be empty")]
    EmptyResponses { role: &'static str },
    #[error("item {item_id} answered {answer}, expected 1..={scale_max}")]
    ScoreOutOfRange {
        item_id: String,
        answer: u8,
        scale_max: u8,
    },
    #[error("item {0} appears more than once")]
    DuplicateItem(String),
    #[error("item {item_id} targets unconfigured dimension {dimension}")]
    UnknownDimension {
        item_id: String,
        dimension: Dimension,
    },
    #[error("no responses for required dimension {0}")]
    MissingDimension(Dimension),
    #[error("dimension {dimension} has {answered} items, at most {expected} expected")]
    TooManyItems {
        dimension: Dimension,
        answered: u32,
        expected: u32,
    },
    #[error("final score override {0} outside 0..=100")]
    OverrideOutOfRange(u8),
}

/// Intake checks for a rater's answers against the scoring configuration.
#[derive(Debug, Clone)]
pub struct ResponseGuard {
    config: ScoringConfig,
}

impl ResponseGuard {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, role: RaterRole, items: &[ItemResponse]) -> Result<(), ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyResponses { role: role.label() });
        }

        let scale_max = self.config.scale_max;
        let mut seen = HashSet::with_capacity(items.len());
        for item in items {
            if item.answer < 1 || item.answer > scale_max {
                return Err(ValidationError::ScoreOutOfRange {
                    item_id: item.item_id.clone(),
                    answer: item.answer,
                    scale_max,
                });
            }
            if !seen.insert(item.item_id.as_str()) {
                return Err(ValidationError::DuplicateItem(item.item_id.clone()));
            }
            if self.config.expected_items(item.dimension).is_none() {
                return Err(ValidationError::UnknownDimension {
                    item_id: item.item_id.clone(),
                    dimension: item.dimension,
                });
            }
        }

        for spec in &self.config.dimensions {
            let answered = items
                .iter()
                .filter(|item| item.dimension == spec.dimension)
                .count() as u32;
            if answered == 0 {
                return Err(ValidationError::MissingDimension(spec.dimension));
            }
            if answered > spec.expected_items {
                return Err(ValidationError::TooManyItems {
                    dimension: spec.dimension,
                    answered,
                    expected: spec.expected_items,
                });
            }
        }

        Ok(())
    }
}

pub(crate) fn check_override(value: Option<u8>) -> Result<Option<u8>, ValidationError> {
    match value {
        Some(score) if score > 100 => Err(ValidationError::OverrideOutOfRange(score)),
        other => Ok(other),
    }
}
