use serde::{Deserialize, Serialize};

use super::super::domain::ItemResponse;
use super::{Dimension, ScoringConfig};

/// Raw sum for one dimension together with how many items fed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionTally {
    pub dimension: Dimension,
    pub raw: u32,
    pub answered: u32,
    pub expected: u32,
}

impl DimensionTally {
    /// A dimension is complete once every expected item has an answer. A dimension with no
    /// answers at all still reports a zero tally rather than disappearing.
    pub fn complete(&self) -> bool {
        self.answered > 0 && self.answered >= self.expected
    }
}

/// Per-dimension tallies in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateScores {
    pub tallies: Vec<DimensionTally>,
}

impl AggregateScores {
    pub fn get(&self, dimension: Dimension) -> Option<&DimensionTally> {
        self.tallies
            .iter()
            .find(|tally| tally.dimension == dimension)
    }

    /// Merge several raters' tallies. Both raw sums and expected counts add up, so the
    /// normalized result is the mean across raters.
    pub fn combine(parts: &[AggregateScores]) -> Option<AggregateScores> {
        let (first, rest) = parts.split_first()?;
        let mut merged = first.clone();
        for part in rest {
            for tally in &mut merged.tallies {
                if let Some(other) = part.get(tally.dimension) {
                    tally.raw += other.raw;
                    tally.answered += other.answered;
                    tally.expected += other.expected;
                }
            }
        }
        Some(merged)
    }
}

/// Applies reverse keying: on a 1..=5 scale a reversed 5 counts as 1 and a reversed 1 as 5.
pub fn effective_answer(answer: u8, reverse: bool, scale_max: u8) -> u8 {
    if reverse {
        (scale_max + 1).saturating_sub(answer)
    } else {
        answer
    }
}

/// Sums effective answers per configured dimension. Items tagged with a dimension outside
/// the configuration are ignored; intake validation rejects them before they get here.
pub fn aggregate(items: &[ItemResponse], config: &ScoringConfig) -> AggregateScores {
    let mut tallies: Vec<DimensionTally> = config
        .dimensions
        .iter()
        .map(|spec| DimensionTally {
            dimension: spec.dimension,
            raw: 0,
            answered: 0,
            expected: spec.expected_items,
        })
        .collect();

    for item in items {
        if let Some(tally) = tallies
            .iter_mut()
            .find(|tally| tally.dimension == item.dimension)
        {
            tally.raw += u32::from(effective_answer(item.answer, item.reverse, config.scale_max));
            tally.answered += 1;
        }
    }

    AggregateScores { tallies }
}
