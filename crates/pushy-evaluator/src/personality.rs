//! AI personalities: the nine evaluator weights and the built-in presets.
//!
//! A personality is nothing more than an [`AiWeights`] value. The evaluator uses the
//! `*_below_threshold` weights while a square count is at most `square_threshold` and the
//! `*_above_threshold` weights once it is greater, so the threshold is a weight only in the
//! sense that training tunes it.
//!
//! Two canonical sets ship with the crate:
//!
//! - [`AiWeights::TWO_PLAYER`] - used whenever exactly two players are left
//! - [`AiWeights::MULTIPLAYER_POOL`] - one of these is picked at random while three or more
//!   players are alive

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiWeights {
    pub self_lives: f32,
    pub diff_lives: f32,
    pub square_threshold: f32,
    pub self_spread_below_threshold: f32,
    pub self_spread_above_threshold: f32,
    pub opponent_spread: f32,
    pub self_in_danger: f32,
    pub opponent_in_danger_below_threshold: f32,
    pub opponent_in_danger_above_threshold: f32,
}

impl AiWeights {
    pub const LEN: usize = 9;

    /// Field names in array order.
    pub const NAMES: [&str; Self::LEN] = [
        "self_lives",
        "diff_lives",
        "square_threshold",
        "self_spread_below_threshold",
        "self_spread_above_threshold",
        "opponent_spread",
        "self_in_danger",
        "opponent_in_danger_below_threshold",
        "opponent_in_danger_above_threshold",
    ];

    /// Index of `square_threshold` in array order.
    pub const THRESHOLD_INDEX: usize = 2;

    pub const TWO_PLAYER: Self = Self::from_array([
        553.0, 8371.0, 3.0, 5646.0, 3791.0, 8583.0, 6187.0, 680.0, 9157.0,
    ]);

    /// Hand-tuned placeholder sets for three or more survivors, meant to be replaced by
    /// weights from `pushy train-ai`.
    pub const MULTIPLAYER_POOL: [Self; 3] = [
        Self::from_array([
            1200.0, 5400.0, 4.0, 3100.0, 4200.0, 2600.0, 7800.0, 1500.0, 6400.0,
        ]),
        Self::from_array([
            800.0, 6900.0, 3.0, 4800.0, 2900.0, 5100.0, 8800.0, 900.0, 7200.0,
        ]),
        Self::from_array([
            2100.0, 4300.0, 5.0, 2500.0, 3600.0, 3900.0, 6500.0, 2200.0, 5300.0,
        ]),
    ];

    #[must_use]
    pub const fn from_array(values: [f32; Self::LEN]) -> Self {
        let [
            self_lives,
            diff_lives,
            square_threshold,
            self_spread_below_threshold,
            self_spread_above_threshold,
            opponent_spread,
            self_in_danger,
            opponent_in_danger_below_threshold,
            opponent_in_danger_above_threshold,
        ] = values;
        Self {
            self_lives,
            diff_lives,
            square_threshold,
            self_spread_below_threshold,
            self_spread_above_threshold,
            opponent_spread,
            self_in_danger,
            opponent_in_danger_below_threshold,
            opponent_in_danger_above_threshold,
        }
    }

    #[must_use]
    pub const fn to_array(&self) -> [f32; Self::LEN] {
        [
            self.self_lives,
            self.diff_lives,
            self.square_threshold,
            self.self_spread_below_threshold,
            self.self_spread_above_threshold,
            self.opponent_spread,
            self.self_in_danger,
            self.opponent_in_danger_below_threshold,
            self.opponent_in_danger_above_threshold,
        ]
    }

    /// Picks the preset for a match with `living_players` survivors.
    pub fn for_living_players<R>(living_players: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        if living_players == 2 {
            return Self::TWO_PLAYER;
        }
        Self::MULTIPLAYER_POOL[rng.random_range(0..Self::MULTIPLAYER_POOL.len())]
    }
}

/// How an AI seat chooses its weights each turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Personality {
    /// Always plays with the same weights, such as a trained model.
    Fixed(AiWeights),
    /// Follows the built-in presets for the current number of survivors.
    Preset,
}

impl Personality {
    pub fn weights_for<R>(&self, living_players: usize, rng: &mut R) -> AiWeights
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Fixed(weights) => *weights,
            Self::Preset => AiWeights::for_living_players(living_players, rng),
        }
    }
}
