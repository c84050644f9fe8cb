mod aggregate;
mod classify;
mod config;
mod normalize;
mod profile;
mod templates;

pub use aggregate::{aggregate, effective_answer, AggregateScores, DimensionTally};
pub use classify::{classify, dominant_dimension, Classification};
pub use config::{DimensionSpec, ScoringConfig, ScoringConfigError};
pub use normalize::{mean_score, normalize};
pub use profile::{profile_label, synthesize, Profile};

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{RaterRole, ResponseSet};

/// Trait axes scored independently. Declaration order is the default canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    PeopleInterest,
    DataInterest,
    ThingsInterest,
    Stability,
    Flexibility,
    Autonomy,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::PeopleInterest,
        Dimension::DataInterest,
        Dimension::ThingsInterest,
        Dimension::Stability,
        Dimension::Flexibility,
        Dimension::Autonomy,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Dimension::PeopleInterest => "people_interest",
            Dimension::DataInterest => "data_interest",
            Dimension::ThingsInterest => "things_interest",
            Dimension::Stability => "stability",
            Dimension::Flexibility => "flexibility",
            Dimension::Autonomy => "autonomy",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Final per-dimension result after normalization and classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub raw: u32,
    pub normalized: u8,
    pub classification: Classification,
    pub answered_items: u32,
    pub expected_items: u32,
    pub complete: bool,
}

/// Scores from a single rater, kept for side-by-side review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaterBreakdown {
    pub role: RaterRole,
    pub dimensions: Vec<RaterDimensionScore>,
    pub overall: u8,
}

impl RaterBreakdown {
    pub fn dimension(&self, dimension: Dimension) -> Option<&RaterDimensionScore> {
        self.dimensions
            .iter()
            .find(|score| score.dimension == dimension)
    }
}

/// One rater's raw sum over their own answers and its normalized value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaterDimensionScore {
    pub dimension: Dimension,
    pub raw: u32,
    pub answered_items: u32,
    pub normalized: u8,
}

/// Immutable output of the scoring pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub dimensions: Vec<DimensionScore>,
    pub raters: Vec<RaterBreakdown>,
    pub dominant_dimension: Dimension,
    pub overall: u8,
    pub profile: Profile,
}

impl ScoreResult {
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionScore> {
        self.dimensions
            .iter()
            .find(|score| score.dimension == dimension)
    }

    pub fn classification(&self, dimension: Dimension) -> Option<Classification> {
        self.dimension(dimension).map(|score| score.classification)
    }
}

/// Stateless pipeline: aggregate, normalize, classify, synthesize.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores the given response sets. With several sets the combined score is the mean of
    /// the raters; each rater's own normalized scores are reported alongside.
    pub fn score(&self, sets: &[&ResponseSet]) -> Result<ScoreResult, ScoringError> {
        if self.config.dimensions.is_empty() {
            return Err(ScoringError::NoDimensions);
        }

        let per_rater: Vec<(RaterRole, AggregateScores)> = sets
            .iter()
            .map(|set| (set.role, aggregate(&set.items, &self.config)))
            .collect();

        let parts: Vec<AggregateScores> = per_rater.iter().map(|(_, part)| part.clone()).collect();
        let combined = AggregateScores::combine(&parts).ok_or(ScoringError::NoResponses)?;

        let dimensions: Vec<DimensionScore> = combined
            .tallies
            .iter()
            .map(|tally| {
                let normalized = normalize(tally.raw, tally.expected, self.config.scale_max);
                DimensionScore {
                    dimension: tally.dimension,
                    raw: tally.raw,
                    normalized,
                    classification: classify(normalized),
                    answered_items: tally.answered,
                    expected_items: tally.expected,
                    complete: tally.complete(),
                }
            })
            .collect();

        let dominant = dominant_dimension(
            dimensions
                .iter()
                .map(|score| (score.dimension, score.normalized)),
        )
        .ok_or(ScoringError::NoDimensions)?;

        let raters = per_rater
            .iter()
            .map(|(role, part)| self.breakdown(*role, part))
            .collect();

        Ok(ScoreResult {
            overall: mean_score(dimensions.iter().map(|score| score.normalized)),
            profile: synthesize(&dimensions, dominant),
            dominant_dimension: dominant,
            raters,
            dimensions,
        })
    }

    fn breakdown(&self, role: RaterRole, part: &AggregateScores) -> RaterBreakdown {
        let dimensions: Vec<RaterDimensionScore> = part
            .tallies
            .iter()
            .map(|tally| RaterDimensionScore {
                dimension: tally.dimension,
                raw: tally.raw,
                answered_items: tally.answered,
                normalized: normalize(tally.raw, tally.expected, self.config.scale_max),
            })
            .collect();
        let overall = mean_score(dimensions.iter().map(|score| score.normalized));
        RaterBreakdown {
            role,
            dimensions,
            overall,
        }
    }
}

/// Pipeline failures; both indicate a misconfigured caller rather than bad answers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("no response sets supplied to the scoring pipeline")]
    NoResponses,
    #[error("scoring configuration has no dimensions")]
    NoDimensions,
}
