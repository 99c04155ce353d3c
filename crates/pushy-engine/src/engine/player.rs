use serde::{Deserialize, Serialize};

use crate::core::Color;

/// A seated player: its color, remaining lives and spawn countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    lives: u32,
    turns_until_new_square: u32,
}

impl Player {
    #[must_use]
    pub const fn new(color: Color, lives: u32, turns_until_new_square: u32) -> Self {
        Self {
            color,
            lives,
            turns_until_new_square,
        }
    }

    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub const fn turns_until_new_square(&self) -> u32 {
        self.turns_until_new_square
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.lives > 0
    }

    pub(crate) const fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Ticks the spawn countdown and returns `true` once it has run out.
    ///
    /// The countdown stays at zero until [`Self::reset_countdown`] is called.
    pub(crate) const fn tick_countdown(&mut self) -> bool {
        self.turns_until_new_square = self.turns_until_new_square.saturating_sub(1);
        self.turns_until_new_square == 0
    }

    pub(crate) const fn reset_countdown(&mut self, interval: u32) {
        self.turns_until_new_square = interval;
    }
}
