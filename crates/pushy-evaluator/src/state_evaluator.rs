//! State evaluation: scoring a position for one player.
//!
//! The [`WeightedStateEvaluator`] computes a linear combination of the six
//! [state features](crate::state_feature):
//!
//! ```text
//! score = w_lives        · self_lives
//!       + w_diff         · diff_lives
//!       + w_spread(T)    · self_spread
//!       - w_opp_spread   · opponent_spread
//!       - w_danger       · self_in_danger
//!       + w_opp_danger(T)· opponent_in_danger
//! ```
//!
//! `w_spread(T)` is `self_spread_below_threshold` while the player owns at most
//! `square_threshold` squares and `self_spread_above_threshold` once it owns more.
//! `w_opp_danger(T)` switches the same way on the number of squares all living opponents own
//! together.

use std::fmt;

use pushy_engine::{Board, Color, Player};

use crate::{
    personality::AiWeights,
    state_analysis::StateAnalysis,
    state_feature::{
        DiffLives, OpponentInDanger, OpponentSpread, SelfInDanger, SelfLives, SelfSpread,
        StateFeatureSource,
    },
};

/// Scores positions (higher is better for the perspective player).
pub trait StateEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_state(&self, analysis: &StateAnalysis) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedStateEvaluator {
    weights: AiWeights,
}

impl WeightedStateEvaluator {
    #[must_use]
    pub fn new(weights: AiWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &AiWeights {
        &self.weights
    }

    /// Each feature with the weight it gets in `analysis`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn feature_weights(
        &self,
        analysis: &StateAnalysis,
    ) -> [(&'static dyn StateFeatureSource, f32); 6] {
        let w = &self.weights;
        let self_spread = if (analysis.self_square_count() as f32) <= w.square_threshold {
            w.self_spread_below_threshold
        } else {
            w.self_spread_above_threshold
        };
        let opponent_in_danger = if (analysis.opponent_square_count() as f32) <= w.square_threshold
        {
            w.opponent_in_danger_below_threshold
        } else {
            w.opponent_in_danger_above_threshold
        };
        [
            (&SelfLives, w.self_lives),
            (&DiffLives, w.diff_lives),
            (&SelfSpread, self_spread),
            (&OpponentSpread, w.opponent_spread),
            (&SelfInDanger, w.self_in_danger),
            (&OpponentInDanger, opponent_in_danger),
        ]
    }
}

impl StateEvaluator for WeightedStateEvaluator {
    fn evaluate_state(&self, analysis: &StateAnalysis) -> f32 {
        self.feature_weights(analysis)
            .iter()
            .map(|(feature, weight)| feature.signed_value(analysis) * weight)
            .sum()
    }
}

/// Scores `board` and `players` from the point of view of `perspective`.
#[must_use]
pub fn score(board: &Board, players: &[Player], perspective: Color, weights: &AiWeights) -> f32 {
    let analysis = StateAnalysis::new(board, players, perspective);
    WeightedStateEvaluator::new(*weights).evaluate_state(&analysis)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: AiWeights = AiWeights::from_array([0.0; AiWeights::LEN]);

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn two_players(red_lives: u32, blue_lives: u32) -> [Player; 2] {
        [
            Player::new(Color::Red, red_lives, 3),
            Player::new(Color::Blue, blue_lives, 3),
        ]
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_zero_weights_score_zero() {
        let b = board("xRB.\n.R..");
        assert!(approx_eq(score(&b, &two_players(5, 5), Color::Red, &ZERO), 0.0));
    }

    #[test]
    fn test_lives_terms() {
        let b = board("R..B");
        let weights = AiWeights {
            self_lives: 10.0,
            diff_lives: 100.0,
            ..ZERO
        };
        // 10 * 3 + 100 * (3 - 5)
        let s = score(&b, &two_players(3, 5), Color::Red, &weights);
        assert!(approx_eq(s, -170.0), "score {s}");
        // from blue's side: 10 * 5 + 100 * 2
        let s = score(&b, &two_players(3, 5), Color::Blue, &weights);
        assert!(approx_eq(s, 250.0), "score {s}");
    }

    #[test]
    fn test_spread_weight_switches_at_threshold() {
        // red: two squares with spread 1, blue: one square
        let b = board("R.R\n...\n..B");
        let players = two_players(5, 5);
        let mut weights = AiWeights {
            square_threshold: 3.0,
            self_spread_below_threshold: 7.0,
            self_spread_above_threshold: 11.0,
            ..ZERO
        };
        assert!(approx_eq(score(&b, &players, Color::Red, &weights), 7.0));

        // a count equal to the threshold still uses the lower weight
        weights.square_threshold = 2.0;
        let s = score(&b, &players, Color::Red, &weights);
        assert!(approx_eq(s, 7.0), "score {s}");

        weights.square_threshold = 1.0;
        let s = score(&b, &players, Color::Red, &weights);
        assert!(approx_eq(s, 11.0), "score {s}");
    }

    #[test]
    fn test_opponent_danger_weight_switches_at_threshold() {
        // blue owns one square, which is in danger
        let b = board("xB..\n....\n..R.");
        let players = two_players(5, 5);
        let mut weights = AiWeights {
            square_threshold: 1.0,
            opponent_in_danger_below_threshold: 3.0,
            opponent_in_danger_above_threshold: 1000.0,
            ..ZERO
        };
        let s = score(&b, &players, Color::Red, &weights);
        assert!(approx_eq(s, 3.0), "score {s}");

        weights.square_threshold = 0.0;
        let s = score(&b, &players, Color::Red, &weights);
        assert!(approx_eq(s, 1000.0), "score {s}");
    }

    #[test]
    fn test_danger_signs() {
        // blue can be pushed into the void, red cannot
        let b = board("xB..\n....\n..R.");
        let players = two_players(5, 5);
        let weights = AiWeights {
            square_threshold: 5.0,
            self_in_danger: 4.0,
            opponent_in_danger_below_threshold: 3.0,
            opponent_in_danger_above_threshold: 1000.0,
            ..ZERO
        };
        assert!(approx_eq(score(&b, &players, Color::Red, &weights), 3.0));
        assert!(approx_eq(score(&b, &players, Color::Blue, &weights), -4.0));
    }

    #[test]
    fn test_opponent_spread_counts_against() {
        let b = board("B.B\n...\nR..");
        let weights = AiWeights {
            opponent_spread: 2.0,
            ..ZERO
        };
        assert!(approx_eq(
            score(&b, &two_players(5, 5), Color::Red, &weights),
            -2.0
        ));
    }

    #[test]
    fn test_feature_weights_follow_feature_order() {
        let b = board("R.B");
        let players = two_players(5, 5);
        let analysis = StateAnalysis::new(&b, &players, Color::Red);
        let evaluator = WeightedStateEvaluator::new(AiWeights::TWO_PLAYER);
        let feature_weights = evaluator.feature_weights(&analysis);
        let ids: Vec<&str> = feature_weights
            .iter()
            .map(|(f, _)| f.id())
            .collect();
        let expected: Vec<&str> = crate::state_feature::ALL_STATE_FEATURES
            .iter()
            .map(|f| f.id())
            .collect();
        assert_eq!(ids, expected);
    }
}
