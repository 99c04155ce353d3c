//! Session evaluation: fitness of a personality over complete matches.
//!
//! # How It Works
//!
//! 1. **Set Up** - A [`SessionSetup`] fixes the map, the number of players, the rules and a
//!    [`MatchSeed`]. The seed decides which seat the evaluated personality takes and which
//!    presets its opponents pick, so the same setup always replays the same match.
//! 2. **Play** - [`play_session`] lets AIs move until the match is over, nobody can move, or
//!    the turn limit is reached.
//! 3. **Score** - [`SessionOutcome::fitness`] turns the outcome into a value in \[0.0, 1.0\]:
//!
//! ```text
//! fitness = 1.0                          if the personality won
//!         = 0.5                          if nobody won and it lasted until the end
//!         = 0.5 · survived / turns       otherwise
//! ```
//!
//! Every opponent plays the built-in presets ([`Personality::Preset`]). A personality that
//! reliably beats them scores close to 1.0.

use std::{collections::BTreeMap, fmt};

use log::{debug, warn};
use pushy_engine::{Color, Map, MapError, Match, MatchConfig, MatchSeed, Player};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{
    move_search::choose_move,
    personality::{AiWeights, Personality},
};

/// Evaluates personalities by playing sessions.
///
/// Used by the genetic algorithm to compute fitness scores for individuals.
pub trait SessionEvaluator: fmt::Debug + Send + Sync {
    /// Plays and evaluates a single session.
    fn play_and_evaluate_session(&self, session: &SessionSetup, weights: &AiWeights) -> f32;

    /// Plays and evaluates multiple sessions, returning the average fitness.
    #[expect(clippy::cast_precision_loss)]
    fn play_and_evaluate_sessions(&self, sessions: &[SessionSetup], weights: &AiWeights) -> f32 {
        if sessions.is_empty() {
            return 0.0;
        }
        let total: f32 = sessions
            .iter()
            .map(|session| self.play_and_evaluate_session(session, weights))
            .sum();
        total / sessions.len() as f32
    }
}

/// Everything needed to replay a training match.
#[derive(Debug, Clone)]
pub struct SessionSetup {
    map: Map,
    player_count: usize,
    config: MatchConfig,
    seed: MatchSeed,
}

impl SessionSetup {
    pub fn new(
        map: Map,
        player_count: usize,
        config: MatchConfig,
        seed: MatchSeed,
    ) -> Result<Self, MapError> {
        map.seating(player_count)?;
        Ok(Self {
            map,
            player_count,
            config,
            seed,
        })
    }

    /// Picks a map, a player count the map supports and a fresh seed.
    pub fn random<R>(maps: &[Map], config: MatchConfig, rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        let map = maps.choose(rng)?;
        let player_count = rng.random_range(2..=map.max_players().max(2));
        Self::new(map.clone(), player_count, config, rng.random()).ok()
    }

    #[must_use]
    pub fn map(&self) -> &Map {
        &self.map
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> MatchSeed {
        self.seed
    }
}

/// How a played session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub winner: Option<Color>,
    /// Effective moves played.
    pub turns: usize,
    /// `true` if the match reached game over (as opposed to a stall or the turn limit).
    pub finished: bool,
    /// Turn after which each eliminated player had no lives left.
    pub eliminated_at: BTreeMap<Color, usize>,
}

impl SessionOutcome {
    #[must_use]
    pub fn survived_turns(&self, color: Color) -> usize {
        self.eliminated_at.get(&color).copied().unwrap_or(self.turns)
    }

    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn fitness(&self, color: Color) -> f32 {
        if self.winner == Some(color) {
            return 1.0;
        }
        let survived = self.survived_turns(color);
        if self.winner.is_none() && survived == self.turns {
            return 0.5;
        }
        if self.turns == 0 {
            return 0.0;
        }
        0.5 * survived as f32 / self.turns as f32
    }
}

/// Lets AIs play `game` until it is over, stalls, or `turn_limit` effective moves are made.
///
/// Seats missing from `personalities` play the presets.
pub fn play_session<R>(
    game: &mut Match,
    personalities: &BTreeMap<Color, Personality>,
    turn_limit: usize,
    rng: &mut R,
) -> SessionOutcome
where
    R: Rng + ?Sized,
{
    let mut eliminated_at = BTreeMap::new();
    while !game.is_over() && game.turn() < turn_limit {
        let color = game.current_player().color();
        let personality = personalities.get(&color).unwrap_or(&Personality::Preset);
        let Some(direction) = choose_move(game, personality, rng) else {
            debug!("no square can move, stopping after {} turns", game.turn());
            break;
        };
        if game.apply_move(direction).is_err() {
            break;
        }
        for player in game.players().iter().filter(|p| !p.is_alive()) {
            eliminated_at.entry(player.color()).or_insert(game.turn());
        }
    }
    SessionOutcome {
        winner: game.winner(),
        turns: game.turn(),
        finished: game.is_over(),
        eliminated_at,
    }
}

/// Plays the evaluated weights in one seat against preset opponents.
#[derive(Debug, Clone, Copy)]
pub struct MatchSessionEvaluator {
    turn_limit: usize,
}

impl MatchSessionEvaluator {
    #[must_use]
    pub fn new(turn_limit: usize) -> Self {
        Self { turn_limit }
    }

    #[must_use]
    pub fn turn_limit(&self) -> usize {
        self.turn_limit
    }

    /// Plays `session` and returns the evaluated color with the outcome.
    pub fn play(
        &self,
        session: &SessionSetup,
        weights: &AiWeights,
    ) -> Result<(Color, SessionOutcome), pushy_engine::MatchError> {
        let mut rng = session.seed.rng();
        let mut game = Match::new(&session.map, session.player_count, session.config)?;
        let seats: Vec<Color> = game.players().iter().map(Player::color).collect();
        let candidate = *seats.choose(&mut rng).ok_or(MapError::TooFewPlayers {
            requested: seats.len(),
        })?;
        let personalities = BTreeMap::from([(candidate, Personality::Fixed(*weights))]);
        let outcome = play_session(&mut game, &personalities, self.turn_limit, &mut rng);
        Ok((candidate, outcome))
    }
}

impl SessionEvaluator for MatchSessionEvaluator {
    fn play_and_evaluate_session(&self, session: &SessionSetup, weights: &AiWeights) -> f32 {
        match self.play(session, weights) {
            Ok((candidate, outcome)) => outcome.fitness(candidate),
            Err(e) => {
                warn!("session on {} could not be played: {e}", session.map.name());
                0.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn outcome(winner: Option<Color>, turns: usize, eliminated: &[(Color, usize)]) -> SessionOutcome {
        SessionOutcome {
            winner,
            turns,
            finished: true,
            eliminated_at: eliminated.iter().copied().collect(),
        }
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_fitness_of_outcomes() {
        let won = outcome(Some(Color::Red), 40, &[(Color::Blue, 40)]);
        assert!(approx_eq(won.fitness(Color::Red), 1.0));
        assert!(approx_eq(won.fitness(Color::Blue), 0.5));

        let lost_early = outcome(Some(Color::Blue), 40, &[(Color::Red, 10)]);
        assert!(approx_eq(lost_early.fitness(Color::Red), 0.125));

        let draw = outcome(None, 30, &[(Color::Red, 30), (Color::Blue, 30)]);
        assert!(approx_eq(draw.fitness(Color::Red), 0.5));

        let stalled = SessionOutcome {
            finished: false,
            ..outcome(None, 0, &[])
        };
        assert!(approx_eq(stalled.fitness(Color::Red), 0.5));
    }

    #[test]
    fn test_setup_rejects_unseatable_player_count() {
        let map = Map::from_name("small").unwrap();
        let seed = MatchSeed::from_u64(1);
        assert!(SessionSetup::new(map.clone(), 2, MatchConfig::default(), seed).is_ok());
        assert!(SessionSetup::new(map, 4, MatchConfig::default(), seed).is_err());
    }

    #[test]
    fn test_random_setup_fits_the_map() {
        let maps = Map::all().unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..20 {
            let setup = SessionSetup::random(&maps, MatchConfig::default(), &mut rng).unwrap();
            assert!(setup.player_count() >= 2);
            assert!(setup.player_count() <= setup.map().max_players());
        }
        assert!(SessionSetup::random(&[], MatchConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn test_play_session_respects_turn_limit() {
        let map = Map::from_name("standard").unwrap();
        let mut game = Match::new(&map, 4, MatchConfig::default()).unwrap();
        let mut rng = Pcg32::seed_from_u64(4);
        let outcome = play_session(&mut game, &BTreeMap::new(), 25, &mut rng);
        assert!(outcome.turns <= 25);
        assert_eq!(outcome.turns, game.turn());
        assert_eq!(outcome.finished, game.is_over());
        for (color, turn) in &outcome.eliminated_at {
            assert!(!game.player(*color).unwrap().is_alive());
            assert!(*turn <= outcome.turns);
        }
    }

    #[test]
    fn test_session_replays_identically() {
        let map = Map::from_name("small").unwrap();
        let config = MatchConfig {
            initial_lives: 2,
            ..MatchConfig::default()
        };
        let setup = SessionSetup::new(map, 2, config, MatchSeed::from_u64(11)).unwrap();
        let evaluator = MatchSessionEvaluator::new(150);

        let first = evaluator.play(&setup, &AiWeights::TWO_PLAYER).unwrap();
        let second = evaluator.play(&setup, &AiWeights::TWO_PLAYER).unwrap();
        assert_eq!(first, second);

        let fitness = evaluator.play_and_evaluate_session(&setup, &AiWeights::TWO_PLAYER);
        assert!((0.0..=1.0).contains(&fitness));
    }

    #[test]
    fn test_average_over_sessions() {
        let maps = Map::all().unwrap();
        let mut rng = Pcg32::seed_from_u64(8);
        let sessions: Vec<SessionSetup> = (0..3)
            .filter_map(|_| SessionSetup::random(&maps, MatchConfig::default(), &mut rng))
            .collect();
        let evaluator = MatchSessionEvaluator::new(60);
        let fitness = evaluator.play_and_evaluate_sessions(&sessions, &AiWeights::TWO_PLAYER);
        assert!((0.0..=1.0).contains(&fitness));
        assert!(approx_eq(
            evaluator.play_and_evaluate_sessions(&[], &AiWeights::TWO_PLAYER),
            0.0
        ));
    }
}
