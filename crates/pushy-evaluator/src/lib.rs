//! Evaluator system for scoring Pushy Squares positions and playing moves.
//!
//! This crate implements a three-level evaluation architecture:
//!
//! 1. **State Evaluation** ([`state_evaluator`]) - Scores a board and its players from the
//!    point of view of one color, as a weighted sum of state features.
//!
//! 2. **Move Search** ([`move_search`]) - Selects the move for the current turn by simulating
//!    each of the four directions on an independent copy of the match and keeping the best.
//!
//! 3. **Session Evaluation** ([`session_evaluator`]) - Plays complete matches between AIs and
//!    turns the outcome into a fitness score for training.
//!
//! # Architecture
//!
//! ```text
//! Session Evaluation (fitness for training)
//!     ↓ uses
//! Move Search (select best direction)
//!     ↓ uses
//! State Evaluation (score the position after a move)
//! ```
//!
//! # Supporting Modules
//!
//! - [`board_analysis`] - Lazily computed board metrics (squares per color, spread, squares
//!   in danger) used by the features
//! - [`state_analysis`] - A board analysis combined with the players and the perspective color
//! - [`state_feature`] - The six features the evaluator weighs
//! - [`personality`] - The nine-weight [`AiWeights`](personality::AiWeights) and the built-in
//!   presets
//!
//! # Example
//!
//! ```
//! use pushy_engine::{Map, Match, MatchConfig};
//! use pushy_evaluator::{move_search::GameAi, personality::AiWeights};
//!
//! let map = Map::from_name("small").unwrap();
//! let game = Match::new(&map, 2, MatchConfig::default()).unwrap();
//!
//! let me = game.current_player().color();
//! let ai = GameAi::new(game.clone(), me, AiWeights::TWO_PLAYER);
//! let direction = ai.next_move().expect("a fresh match always has a legal move");
//! # let _ = direction;
//! ```

pub mod board_analysis;
pub mod move_search;
pub mod personality;
pub mod session_evaluator;
pub mod state_analysis;
pub mod state_evaluator;
pub mod state_feature;
