//! Game rules on top of the [`core`](crate::core) data types.
//!
//! - [`resolve_push`] - resolves one directional push on a [`Board`](crate::Board)
//! - [`Match`] - seats players on a map and applies moves: lives, elimination, spawning,
//!   turn order and game over
//! - [`MoveResult`] - everything a move changed, handed to the [`MoveObserver`]
//! - [`MatchConfig`] - tunable rules (lives, spawn interval, initial squares)
//! - [`MatchSeed`] - seed for the random streams that drive a match's participants
//!
//! # Move Flow
//!
//! 1. The driver calls [`Match::apply_move`] with a direction
//! 2. The push is resolved; if nothing moved the call returns an empty result and the turn
//!    does not advance
//! 3. Destroyed squares cost their owners a life; players at zero lives are eliminated and
//!    their remaining squares turn grey
//! 4. The acting player's spawn countdown ticks and may place a new square
//! 5. The turn passes to the next living player, or the match ends
//! 6. The result is returned and forwarded to the registered observer

pub use self::{config::*, game_match::*, move_result::*, observer::*, player::*, push::*, seed::*};

mod config;
mod game_match;
mod move_result;
mod observer;
mod player;
mod push;
mod seed;
