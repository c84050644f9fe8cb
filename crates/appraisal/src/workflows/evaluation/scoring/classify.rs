use std::fmt;

use serde::{Deserialize, Serialize};

use super::Dimension;

/// Ordinal bucket for a normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Low,
    Medium,
    High,
}

impl Classification {
    pub const LOW_CEILING: u8 = 40;
    pub const MEDIUM_CEILING: u8 = 70;

    pub const fn label(self) -> &'static str {
        match self {
            Classification::Low => "low",
            Classification::Medium => "medium",
            Classification::High => "high",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `<= 40` is Low, `41..=70` is Medium, anything above is High.
pub fn classify(normalized: u8) -> Classification {
    if normalized <= Classification::LOW_CEILING {
        Classification::Low
    } else if normalized <= Classification::MEDIUM_CEILING {
        Classification::Medium
    } else {
        Classification::High
    }
}

/// Highest normalized score wins; on a tie the dimension seen first (canonical order)
/// is kept. Returns `None` only for an empty input.
pub fn dominant_dimension(scores: impl IntoIterator<Item = (Dimension, u8)>) -> Option<Dimension> {
    let mut best: Option<(Dimension, u8)> = None;
    for (dimension, score) in scores {
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((dimension, score)),
        }
    }
    best.map(|(dimension, _)| dimension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_at_the_ceiling() {
        assert_eq!(classify(0), Classification::Low);
        assert_eq!(classify(40), Classification::Low);
        assert_eq!(classify(41), Classification::Medium);
        assert_eq!(classify(70), Classification::Medium);
        assert_eq!(classify(71), Classification::High);
        assert_eq!(classify(100), Classification::High);
    }

    #[test]
    fn dominant_prefers_highest_score() {
        let scores = vec![
            (Dimension::PeopleInterest, 40),
            (Dimension::Stability, 90),
            (Dimension::Autonomy, 60),
        ];
        assert_eq!(dominant_dimension(scores), Some(Dimension::Stability));
    }

    #[test]
    fn ties_resolve_to_first_in_canonical_order() {
        let scores = vec![
            (Dimension::ThingsInterest, 60),
            (Dimension::DataInterest, 60),
            (Dimension::Flexibility, 60),
        ];
        assert_eq!(dominant_dimension(scores), Some(Dimension::ThingsInterest));
        assert_eq!(
            dominant_dimension([(Dimension::Autonomy, 0), (Dimension::Stability, 0)]),
            Some(Dimension::Autonomy)
        );
        assert_eq!(dominant_dimension(Vec::new()), None);
    }
}
