//! A position seen from one player's point of view.
//!
//! [`StateAnalysis`] couples the lazily computed [`BoardAnalysis`] with the seated players and
//! a perspective color. Every state feature reads from it, so the expensive board metrics
//! (the four trial pushes behind the danger counts in particular) are computed at most once
//! per evaluated position.

use pushy_engine::{Board, Color, Match, Player};

use crate::board_analysis::BoardAnalysis;

#[derive(Debug)]
pub struct StateAnalysis {
    perspective: Color,
    players: Vec<Player>,
    board_analysis: BoardAnalysis,
}

impl StateAnalysis {
    #[must_use]
    pub fn new(board: &Board, players: &[Player], perspective: Color) -> Self {
        Self {
            perspective,
            players: players.to_vec(),
            board_analysis: BoardAnalysis::from_board(board),
        }
    }

    #[must_use]
    pub fn from_match(game: &Match, perspective: Color) -> Self {
        Self::new(game.board(), game.players(), perspective)
    }

    #[must_use]
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn board_analysis(&self) -> &BoardAnalysis {
        &self.board_analysis
    }

    fn own_player(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.color() == self.perspective)
    }

    pub fn living_opponents(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players
            .iter()
            .filter(|p| p.color() != self.perspective && p.is_alive())
    }

    #[must_use]
    pub fn self_lives(&self) -> u32 {
        self.own_player().map_or(0, Player::lives)
    }

    /// Own lives minus the most lives any living opponent has.
    #[must_use]
    pub fn diff_lives(&self) -> i64 {
        let best_opponent = self.living_opponents().map(Player::lives).max().unwrap_or(0);
        i64::from(self.self_lives()) - i64::from(best_opponent)
    }

    #[must_use]
    pub fn self_square_count(&self) -> usize {
        self.board_analysis.square_count(self.perspective)
    }

    /// Squares of all living opponents together.
    #[must_use]
    pub fn opponent_square_count(&self) -> usize {
        self.living_opponents()
            .map(|p| self.board_analysis.square_count(p.color()))
            .sum()
    }

    #[must_use]
    pub fn self_spread(&self) -> f32 {
        self.board_analysis.spread(self.perspective)
    }

    /// Mean spread over the living opponents.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn opponent_spread(&self) -> f32 {
        let spreads = self
            .living_opponents()
            .map(|p| self.board_analysis.spread(p.color()))
            .collect::<Vec<_>>();
        if spreads.is_empty() {
            return 0.0;
        }
        spreads.iter().sum::<f32>() / spreads.len() as f32
    }

    #[must_use]
    pub fn self_in_danger(&self) -> usize {
        self.board_analysis.in_danger_count(self.perspective)
    }

    #[must_use]
    pub fn opponent_in_danger(&self) -> usize {
        self.living_opponents()
            .map(|p| self.board_analysis.in_danger_count(p.color()))
            .sum()
    }
}
