//! Board, push resolution and match bookkeeping for Pushy Squares.
//!
//! The crate is split the same way the game is reasoned about:
//!
//! - [`core`] - plain data: positions, directions, colors, tiles, the [`Board`] and the
//!   named [`Map`] catalog
//! - [`engine`] - rules: [`resolve_push`] turns a board and a direction into the next board,
//!   and [`Match`] drives lives, spawns, elimination and turn order from its results
//!
//! # Example
//!
//! ```
//! use pushy_engine::{Direction, Map, Match, MatchConfig};
//!
//! let map = Map::from_name("standard").unwrap();
//! let mut game = Match::new(&map, 2, MatchConfig::default()).unwrap();
//!
//! let result = game.apply_move(Direction::Right).unwrap();
//! if result.is_noop() {
//!     println!("nothing moved, still {}'s turn", game.current_player().color());
//! }
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Errors raised while looking up a map or seating players on it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MapError {
    #[display("unknown map: {name}")]
    UnknownMap { name: String },
    #[display("map {map} seats at most {available} players, {requested} requested")]
    TooManyPlayers {
        map: String,
        requested: usize,
        available: usize,
    },
    #[display("a match needs at least two players, {requested} requested")]
    TooFewPlayers { requested: usize },
    #[display("invalid layout of map {map}: {reason}")]
    InvalidLayout { map: String, reason: String },
}

/// Errors raised by [`Match`] construction and by moves on a finished match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    #[display("{_0}")]
    Map(MapError),
    #[display("spawnpoint of {color} at {position} is not a free cell")]
    InvalidSpawnpoint { color: Color, position: Position },
    #[display("{color} cannot be seated")]
    UnseatableColor { color: Color },
    #[display("{color} is seated twice")]
    DuplicateSeat { color: Color },
    #[display("match is already over")]
    MatchOver,
}

impl From<MapError> for MatchError {
    fn from(err: MapError) -> Self {
        Self::Map(err)
    }
}
