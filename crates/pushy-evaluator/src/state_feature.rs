//! State features weighed by the evaluator.
//!
//! Each feature extracts one raw measurement from a [`StateAnalysis`] and carries a
//! [`FeatureSignal`] telling whether a larger raw value is good or bad for the perspective
//! player. The evaluator multiplies the signed value by the weight it picks for the feature.
//!
//! **Lives**:
//! - [`SelfLives`] - Own remaining lives
//! - [`DiffLives`] - Own lives minus the best living opponent's lives
//!
//! **Formation**:
//! - [`SelfSpread`] - How scattered the own squares are
//! - [`OpponentSpread`] - How scattered the opponents' squares are
//!
//! **Threats**:
//! - [`SelfInDanger`] - Own squares one push away from a void
//! - [`OpponentInDanger`] - Opponent squares one push away from a void

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state_analysis::StateAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSignal {
    Positive,
    Negative,
}

impl FeatureSignal {
    #[must_use]
    pub fn apply(self, value: f32) -> f32 {
        match self {
            Self::Positive => value,
            Self::Negative => -value,
        }
    }
}

pub const ALL_STATE_FEATURES: &[&dyn StateFeatureSource] = &[
    &SelfLives,
    &DiffLives,
    &SelfSpread,
    &OpponentSpread,
    &SelfInDanger,
    &OpponentInDanger,
];

pub trait StateFeatureSource: fmt::Debug + Send + Sync {
    #[must_use]
    fn id(&self) -> &str;
    #[must_use]
    fn name(&self) -> &str;
    #[must_use]
    fn signal(&self) -> FeatureSignal;
    #[must_use]
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32;

    /// Raw value with the signal applied.
    #[must_use]
    fn signed_value(&self, analysis: &StateAnalysis) -> f32 {
        self.signal().apply(self.extract_raw(analysis))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SelfLives;

impl StateFeatureSource for SelfLives {
    fn id(&self) -> &'static str {
        "self_lives"
    }
    fn name(&self) -> &'static str {
        "Own Lives"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Positive
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.self_lives() as f32
    }
}

/// Lead in lives over the strongest living opponent (negative when behind).
#[derive(Debug, Clone, Copy)]
pub struct DiffLives;

impl StateFeatureSource for DiffLives {
    fn id(&self) -> &'static str {
        "diff_lives"
    }
    fn name(&self) -> &'static str {
        "Lives Lead"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Positive
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.diff_lives() as f32
    }
}

/// Mean Manhattan distance of the own squares from their centroid.
///
/// Scattered squares are harder to push off the board in a single move.
#[derive(Debug, Clone, Copy)]
pub struct SelfSpread;

impl StateFeatureSource for SelfSpread {
    fn id(&self) -> &'static str {
        "self_spread"
    }
    fn name(&self) -> &'static str {
        "Own Spread"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Positive
    }
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.self_spread()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OpponentSpread;

impl StateFeatureSource for OpponentSpread {
    fn id(&self) -> &'static str {
        "opponent_spread"
    }
    fn name(&self) -> &'static str {
        "Opponent Spread"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Negative
    }
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.opponent_spread()
    }
}

/// Number of own squares that some push would destroy.
#[derive(Debug, Clone, Copy)]
pub struct SelfInDanger;

impl StateFeatureSource for SelfInDanger {
    fn id(&self) -> &'static str {
        "self_in_danger"
    }
    fn name(&self) -> &'static str {
        "Own Squares in Danger"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Negative
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.self_in_danger() as f32
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OpponentInDanger;

impl StateFeatureSource for OpponentInDanger {
    fn id(&self) -> &'static str {
        "opponent_in_danger"
    }
    fn name(&self) -> &'static str {
        "Opponent Squares in Danger"
    }
    fn signal(&self) -> FeatureSignal {
        FeatureSignal::Positive
    }
    #[expect(clippy::cast_precision_loss)]
    fn extract_raw(&self, analysis: &StateAnalysis) -> f32 {
        analysis.opponent_in_danger() as f32
    }
}

#[cfg(test)]
mod tests {
    use pushy_engine::{Color, Player};

    use super::*;

    #[test]
    fn test_feature_ids_are_unique() {
        let mut ids: Vec<&str> = ALL_STATE_FEATURES.iter().map(|f| f.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ALL_STATE_FEATURES.len());
    }

    #[test]
    fn test_signed_values() {
        let board = "
            xB.R
            .R..
        "
        .parse()
        .unwrap();
        let players = [Player::new(Color::Red, 4, 3), Player::new(Color::Blue, 2, 3)];
        let a = StateAnalysis::new(&board, &players, Color::Red);

        assert!((SelfLives.signed_value(&a) - 4.0).abs() < f32::EPSILON);
        assert!((DiffLives.signed_value(&a) - 2.0).abs() < f32::EPSILON);
        assert!((OpponentInDanger.signed_value(&a) - 1.0).abs() < f32::EPSILON);
        assert!(SelfInDanger.signed_value(&a).abs() < f32::EPSILON);
        // red squares at (3, 0) and (1, 1), 1.5 away from their centroid each
        assert!((SelfSpread.signed_value(&a) - 1.5).abs() < f32::EPSILON);
        assert!(OpponentSpread.signed_value(&a).abs() < f32::EPSILON);
    }

    #[test]
    fn test_negative_signal_flips_value() {
        assert!((FeatureSignal::Negative.apply(3.0) + 3.0).abs() < f32::EPSILON);
        assert!((FeatureSignal::Positive.apply(3.0) - 3.0).abs() < f32::EPSILON);
    }
}
