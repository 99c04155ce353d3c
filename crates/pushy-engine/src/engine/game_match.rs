use std::{collections::BTreeMap, fmt};

use log::{debug, info};

use crate::{
    MapError, MatchError,
    core::{Board, Color, Direction, Map, Position, Tile},
};

use super::{
    MatchConfig, MoveObserver, MoveResult, Player, Spawn,
    push::{PushResolution, resolve_push},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MatchState {
    InProgress,
    /// Terminal. `winner` is `None` when the last players were eliminated together.
    Over { winner: Option<Color> },
}

/// A game in progress: the board, the seated players and whose turn it is.
///
/// The only way to change a match is [`Self::apply_move`]. Cloning produces a fully
/// independent copy (the observer is not carried over), which is what the AI simulates on.
pub struct Match {
    map_name: String,
    board: Board,
    players: Vec<Player>,
    current_player_index: usize,
    spawnpoints: BTreeMap<Color, Position>,
    config: MatchConfig,
    state: MatchState,
    turn: usize,
    observer: Option<Box<dyn MoveObserver>>,
}

impl fmt::Debug for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("map_name", &self.map_name)
            .field("board", &self.board)
            .field("players", &self.players)
            .field("current_player_index", &self.current_player_index)
            .field("spawnpoints", &self.spawnpoints)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

impl Clone for Match {
    fn clone(&self) -> Self {
        Self {
            map_name: self.map_name.clone(),
            board: self.board.clone(),
            players: self.players.clone(),
            current_player_index: self.current_player_index,
            spawnpoints: self.spawnpoints.clone(),
            config: self.config,
            state: self.state,
            turn: self.turn,
            observer: None,
        }
    }
}

impl Match {
    /// Seats `player_count` players on `map` and gives each its initial squares.
    ///
    /// Fails if the map cannot seat that many players.
    pub fn new(map: &Map, player_count: usize, config: MatchConfig) -> Result<Self, MatchError> {
        let seats = map.seats(player_count)?;
        let mut board = map.board().clone();
        for (color, spawnpoint) in &seats {
            place_initial_squares(&mut board, *color, *spawnpoint, config.initial_squares);
        }
        Self::from_board(map.name(), board, &seats, config)
    }

    /// Builds a match on an arbitrary board, taken as is.
    ///
    /// `seats` lists the players in seating order with their spawnpoints. No squares are
    /// added; whatever squares `board` holds belong to the players of their colors.
    pub fn from_board(
        map_name: impl Into<String>,
        board: Board,
        seats: &[(Color, Position)],
        config: MatchConfig,
    ) -> Result<Self, MatchError> {
        if seats.len() < 2 {
            return Err(MapError::TooFewPlayers {
                requested: seats.len(),
            }
            .into());
        }

        let mut spawnpoints = BTreeMap::new();
        for &(color, position) in seats {
            if color.is_grey() {
                return Err(MatchError::UnseatableColor { color });
            }
            match board.get(position) {
                Some(Tile::Empty | Tile::Square(_)) => {}
                Some(Tile::Wall | Tile::Void) | None => {
                    return Err(MatchError::InvalidSpawnpoint { color, position });
                }
            }
            if spawnpoints.insert(color, position).is_some() {
                return Err(MatchError::DuplicateSeat { color });
            }
        }

        let players = seats
            .iter()
            .map(|(color, _)| Player::new(*color, config.initial_lives, config.spawn_interval))
            .collect::<Vec<_>>();
        let current_player_index = players.iter().position(Player::is_alive).unwrap_or(0);

        let mut this = Self {
            map_name: map_name.into(),
            board,
            players,
            current_player_index,
            spawnpoints,
            config,
            state: MatchState::InProgress,
            turn: 0,
            observer: None,
        };
        this.update_state();
        Ok(this)
    }

    #[must_use]
    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in seating order, eliminated ones included.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, color: Color) -> Option<&Player> {
        self.players.iter().find(|p| p.color() == color)
    }

    fn player_mut(&mut self, color: Color) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.color() == color)
    }

    pub fn living_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Number of squares of `color` on the board.
    #[must_use]
    pub fn square_count(&self, color: Color) -> usize {
        self.board.square_count(color)
    }

    /// The player whose move is next. Once the match is over this is the last player to move.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    #[must_use]
    pub fn spawnpoints(&self) -> &BTreeMap<Color, Position> {
        &self.spawnpoints
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> MatchState {
        self.state
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// The sole survivor of a finished match.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self.state {
            MatchState::Over { winner } => winner,
            MatchState::InProgress => None,
        }
    }

    /// Number of effective (non no-op) moves applied so far.
    #[must_use]
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Registers the observer that receives every effective move, replacing any previous one.
    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: MoveObserver + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn take_observer(&mut self) -> Option<Box<dyn MoveObserver>> {
        self.observer.take()
    }

    /// Moves the current player in `direction`.
    ///
    /// Returns an empty [`MoveResult`] (see [`MoveResult::is_noop`]) when nothing can move; in
    /// that case the turn does not pass, no countdown ticks and the observer is not called.
    ///
    /// Otherwise destroyed squares cost their owners a life, eliminated players' squares turn
    /// grey, the mover's spawn countdown ticks (possibly spawning a square) and the turn passes
    /// to the next living player. The result is forwarded to the observer before it is
    /// returned.
    ///
    /// Fails with [`MatchError::MatchOver`] once the match has ended.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveResult, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }

        let mover = self.current_player_index;
        let resolution = resolve_push(&self.board, direction);
        if resolution.is_noop() {
            debug!(
                "{} moved {direction}: nothing can move",
                self.players[mover].color()
            );
            return Ok(MoveResult::noop(direction));
        }

        let (moved, destroyed) = self.apply_push(resolution);
        let greyed_out = self.grey_out_eliminated();
        let spawned = self.tick_spawn(mover);
        self.turn += 1;
        self.update_state();

        let result = MoveResult {
            direction,
            moved,
            destroyed,
            greyed_out,
            spawned,
        };
        debug!(
            "turn {}: {} moved {direction} ({} moved, {} destroyed, {} greyed out, spawn: {:?})",
            self.turn,
            self.players[mover].color(),
            result.moved.len(),
            result.destroyed.len(),
            result.greyed_out.len(),
            result.spawned,
        );

        if let Some(observer) = &mut self.observer {
            observer.on_move(&result);
        }
        Ok(result)
    }

    fn apply_push(&mut self, resolution: PushResolution) -> (Vec<Position>, Vec<Position>) {
        let moved = resolution.moved().to_vec();
        let mut destroyed = Vec::with_capacity(resolution.destroyed().len());
        for &(pos, color) in resolution.destroyed() {
            destroyed.push(pos);
            if let Some(player) = self.player_mut(color) {
                player.lose_life();
            }
        }
        self.board = resolution.into_board();
        (moved, destroyed)
    }

    /// Turns the squares of players without lives grey and returns their positions.
    fn grey_out_eliminated(&mut self) -> Vec<Position> {
        let eliminated: Vec<Color> = self
            .players
            .iter()
            .filter(|p| !p.is_alive())
            .map(Player::color)
            .collect();

        let mut greyed_out: Vec<Position> = self
            .board
            .squares()
            .filter(|(_, color)| eliminated.contains(color))
            .map(|(pos, _)| pos)
            .collect();
        greyed_out.sort_by_key(|p| (p.y, p.x));

        for pos in &greyed_out {
            // positions were just read from the board
            let greyed = self.board.set(*pos, Tile::Square(Color::Grey));
            debug_assert!(greyed.is_ok(), "greyed square {pos} is off the board");
        }
        if !greyed_out.is_empty() {
            info!("{eliminated:?} eliminated, {} squares greyed out", greyed_out.len());
        }
        greyed_out
    }

    fn tick_spawn(&mut self, mover: usize) -> Option<Spawn> {
        let player = &mut self.players[mover];
        if !player.is_alive() || !player.tick_countdown() {
            return None;
        }
        let color = player.color();
        let position = *self.spawnpoints.get(&color)?;
        if self.board.get(position) != Some(Tile::Empty) {
            debug!("spawnpoint of {color} at {position} is occupied, retrying next turn");
            return None;
        }
        self.board.set(position, Tile::Square(color)).ok()?;
        self.players[mover].reset_countdown(self.config.spawn_interval);
        Some(Spawn { color, position })
    }

    /// Ends the match when at most one player survives, otherwise passes the turn.
    fn update_state(&mut self) {
        let mut living = self.players.iter().filter(|p| p.is_alive()).map(Player::color);
        let first = living.next();
        if first.is_some() && living.next().is_some() {
            if self.turn > 0 {
                self.advance_turn();
            }
            return;
        }
        info!(
            "match on {} over after {} turns, winner: {first:?}",
            self.map_name, self.turn
        );
        self.state = MatchState::Over { winner: first };
    }

    fn advance_turn(&mut self) {
        let count = self.players.len();
        let next = (1..=count)
            .map(|offset| (self.current_player_index + offset) % count)
            .find(|i| self.players[*i].is_alive());
        if let Some(next) = next {
            self.current_player_index = next;
        }
    }
}

/// Places up to `count` squares of `color`: the first on the spawnpoint, the rest on empty
/// cells next to it.
fn place_initial_squares(board: &mut Board, color: Color, spawnpoint: Position, count: u32) {
    let candidates = std::iter::once(spawnpoint)
        .chain(Direction::ALL.map(|dir| spawnpoint.step(dir)))
        .filter(|pos| board.get(*pos) == Some(Tile::Empty))
        .collect::<Vec<_>>();
    for pos in candidates.into_iter().take(count as usize) {
        let placed = board.set(pos, Tile::Square(color));
        debug_assert!(placed.is_ok(), "initial square {pos} is off the board");
    }
}
