use serde::{Deserialize, Serialize};

use super::Dimension;

/// Expected questionnaire shape for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSpec {
    pub dimension: Dimension,
    pub expected_items: u32,
}

/// Scoring configuration: Likert scale ceiling plus the canonical dimension order and the
/// number of items each dimension is expected to carry. The order of `dimensions` is the
/// tie-break order for the dominant dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub scale_max: u8,
    pub dimensions: Vec<DimensionSpec>,
}

impl ScoringConfig {
    pub const DEFAULT_SCALE_MAX: u8 = 5;
    pub const DEFAULT_ITEMS_PER_DIMENSION: u32 = 10;

    /// Every known dimension in declaration order with the same expected item count.
    pub fn uniform(expected_items: u32) -> Self {
        Self {
            scale_max: Self::DEFAULT_SCALE_MAX,
            dimensions: Dimension::ALL
                .iter()
                .map(|&dimension| DimensionSpec {
                    dimension,
                    expected_items,
                })
                .collect(),
        }
    }

    pub fn expected_items(&self, dimension: Dimension) -> Option<u32> {
        self.dimensions
            .iter()
            .find(|spec| spec.dimension == dimension)
            .map(|spec| spec.expected_items)
    }

    pub fn canonical_order(&self) -> impl Iterator<Item = Dimension> + '_ {
        self.dimensions.iter().map(|spec| spec.dimension)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.scale_max < 2 {
            return Err(ScoringConfigError::ScaleTooSmall(self.scale_max));
        }
        if self.dimensions.is_empty() {
            return Err(ScoringConfigError::NoDimensions);
        }
        for (index, spec) in self.dimensions.iter().enumerate() {
            if spec.expected_items == 0 {
                return Err(ScoringConfigError::ZeroItems(spec.dimension));
            }
            if self.dimensions[..index]
                .iter()
                .any(|earlier| earlier.dimension == spec.dimension)
            {
                return Err(ScoringConfigError::DuplicateDimension(spec.dimension));
            }
        }
        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_ITEMS_PER_DIMENSION)
    }
}

/// Rejected scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scale maximum must be at least 2, got {0}")]
    ScaleTooSmall(u8),
    #[error("at least one dimension must be configured")]
    NoDimensions,
    #[error("dimension {0} must expect at least one item")]
    ZeroItems(Dimension),
    #[error("dimension {0} is configured more than once")]
    DuplicateDimension(Dimension),
}
