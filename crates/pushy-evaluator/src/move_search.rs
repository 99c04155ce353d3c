//! Move search: selecting the direction for the current turn.
//!
//! # How It Works
//!
//! 1. **Simulate** - Apply each of the four directions to its own copy of the match
//! 2. **Skip No-ops** - Directions in which nothing moves are not legal moves
//! 3. **Score** - Evaluate the resulting position from the AI's point of view
//! 4. **Select** - Keep the highest score; on ties the earlier direction in
//!    [`Direction::ALL`] (up, right, down, left) wins
//!
//! # Design: Greedy One-Step Lookahead
//!
//! [`GameAi`] only looks at the position right after its own move. Opponent replies are not
//! simulated. This keeps a decision down to four simulations and four evaluations.
//!
//! The AI owns an independent copy of the match, so it can be moved to another thread while
//! the real match stays with the caller.

use arrayvec::ArrayVec;
use log::trace;
use pushy_engine::{Color, Direction, Match};
use rand::Rng;

use crate::{
    personality::{AiWeights, Personality},
    state_analysis::StateAnalysis,
    state_evaluator::{StateEvaluator, WeightedStateEvaluator},
};

#[derive(Debug, Clone)]
pub struct GameAi {
    game: Match,
    color: Color,
    evaluator: WeightedStateEvaluator,
}

impl GameAi {
    /// Creates an AI playing `color` on its own copy of a match.
    #[must_use]
    pub fn new(game: Match, color: Color, weights: AiWeights) -> Self {
        Self {
            game,
            color,
            evaluator: WeightedStateEvaluator::new(weights),
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn weights(&self) -> &AiWeights {
        self.evaluator.weights()
    }

    /// Scores of the legal directions, in [`Direction::ALL`] order.
    ///
    /// Empty when every direction is a no-op or the match is over.
    #[must_use]
    pub fn scored_moves(&self) -> ArrayVec<(Direction, f32), 4> {
        let mut scored = ArrayVec::new();
        for direction in Direction::ALL {
            let mut game = self.game.clone();
            let Ok(result) = game.apply_move(direction) else {
                break;
            };
            if result.is_noop() {
                continue;
            }
            let analysis = StateAnalysis::from_match(&game, self.color);
            let score = self.evaluator.evaluate_state(&analysis);
            trace!("{} considers {direction}: {score}", self.color);
            scored.push((direction, score));
        }
        scored
    }

    /// The best legal direction, or `None` if nothing can move in any direction.
    #[must_use]
    pub fn next_move(&self) -> Option<Direction> {
        let mut best: Option<(Direction, f32)> = None;
        for (direction, score) in self.scored_moves() {
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((direction, score));
            }
        }
        best.map(|(direction, _)| direction)
    }
}

/// Chooses the move of the current player of `game` for an AI with `personality`.
pub fn choose_move<R>(game: &Match, personality: &Personality, rng: &mut R) -> Option<Direction>
where
    R: Rng + ?Sized,
{
    let living = game.living_players().count();
    let weights = personality.weights_for(living, rng);
    GameAi::new(game.clone(), game.current_player().color(), weights).next_move()
}

#[cfg(test)]
mod tests {
    use pushy_engine::{Board, MatchConfig, Position};
    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    const ZERO: AiWeights = AiWeights::from_array([0.0; AiWeights::LEN]);

    fn game(layout: &str, seats: &[(Color, Position)]) -> Match {
        let board: Board = layout.parse().unwrap();
        Match::from_board("test", board, seats, MatchConfig::default()).unwrap()
    }

    fn random_weights(rng: &mut Pcg32) -> AiWeights {
        let mut values = [0.0; AiWeights::LEN];
        for v in &mut values {
            *v = rng.random_range(0.0..10_000.0);
        }
        values[AiWeights::THRESHOLD_INDEX] = rng.random_range(0.0..8.0);
        AiWeights::from_array(values)
    }

    #[test]
    fn test_single_legal_move_is_chosen_regardless_of_weights() {
        // red can only move right, blue is boxed in
        let g = game(
            "
            R.#
            ##B
            ",
            &[
                (Color::Red, Position::new(0, 0)),
                (Color::Blue, Position::new(2, 1)),
            ],
        );
        let mut rng = Pcg32::seed_from_u64(5);
        let mut candidates = vec![ZERO, AiWeights::TWO_PLAYER];
        candidates.extend(AiWeights::MULTIPLAYER_POOL);
        candidates.extend((0..20).map(|_| random_weights(&mut rng)));

        for weights in candidates {
            let ai = GameAi::new(g.clone(), Color::Red, weights);
            assert_eq!(ai.scored_moves().len(), 1);
            assert_eq!(ai.next_move(), Some(Direction::Right), "weights {weights:?}");
        }
    }

    #[test]
    fn test_no_legal_move() {
        let g = game(
            "
            R#
            #B
            ",
            &[
                (Color::Red, Position::new(0, 0)),
                (Color::Blue, Position::new(1, 1)),
            ],
        );
        let ai = GameAi::new(g, Color::Red, AiWeights::TWO_PLAYER);
        assert!(ai.scored_moves().is_empty());
        assert_eq!(ai.next_move(), None);
    }

    #[test]
    fn test_ties_resolve_in_direction_order() {
        let g = game(
            "
            .....
            .....
            ..R..
            .....
            ....B
            ",
            &[
                (Color::Red, Position::new(2, 2)),
                (Color::Blue, Position::new(4, 4)),
            ],
        );
        let ai = GameAi::new(g, Color::Red, ZERO);
        assert_eq!(ai.scored_moves().len(), 4);
        assert_eq!(ai.next_move(), Some(Direction::Up));
    }

    #[test]
    fn test_pushes_opponent_into_void() {
        let g = game(
            "
            xB...
            .....
            ..R..
            ",
            &[
                (Color::Red, Position::new(2, 2)),
                (Color::Blue, Position::new(4, 0)),
            ],
        );
        let weights = AiWeights {
            diff_lives: 1.0,
            ..ZERO
        };
        let ai = GameAi::new(g, Color::Red, weights);
        assert_eq!(ai.next_move(), Some(Direction::Left));
    }

    #[test]
    fn test_search_leaves_original_match_untouched() {
        let map = pushy_engine::Map::from_name("standard").unwrap();
        let g = Match::new(&map, 4, MatchConfig::default()).unwrap();
        let before = g.board().clone();
        let ai = GameAi::new(g.clone(), g.current_player().color(), AiWeights::TWO_PLAYER);
        let direction = ai.next_move();
        assert!(direction.is_some());
        assert_eq!(g.board(), &before);
        assert_eq!(g.turn(), 0);
    }

    #[test]
    fn test_choose_move_uses_current_player() {
        let g = game(
            "
            R.#
            ##B
            ",
            &[
                (Color::Red, Position::new(0, 0)),
                (Color::Blue, Position::new(2, 1)),
            ],
        );
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(
            choose_move(&g, &Personality::Preset, &mut rng),
            Some(Direction::Right)
        );
    }
}
