//! Training system for evolving AI personalities using genetic algorithms.
//!
//! This crate optimizes the nine [`AiWeights`](pushy_evaluator::personality::AiWeights) of the
//! evaluator. Each individual of a population is one set of weights; its fitness is measured
//! by playing complete matches against the built-in presets.
//!
//! # How Training Works
//!
//! 1. **Population** - Create a population of individuals with random weights
//! 2. **Evaluation** - Each individual plays a few seeded matches with its weights
//! 3. **Fitness** - The session evaluator turns each match outcome into a score
//! 4. **Selection** - Select top performers based on fitness
//! 5. **Reproduction** - Create the next generation through crossover and mutation
//! 6. **Repeat** - Continue for the configured number of generations
//!
//! # Architecture
//!
//! ```text
//! Genetic Algorithm
//!     ↓ evolves
//! AI Weights (individuals)
//!     ↓ used by
//! Move Search (pushy-evaluator)
//!     ↓ played by
//! Session Evaluator (fitness function)
//!     ↓ produces
//! Fitness Score
//!     ↓ guides
//! Selection & Reproduction
//! ```
//!
//! # Genes
//!
//! Eight of the nine genes are plain weights in `[0, max_weight]`. The square threshold is
//! compared with square counts, so it gets its own, much smaller range (see
//! [`weights::GeneBounds`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use pushy_engine::{Map, MatchConfig};
//! use pushy_evaluator::session_evaluator::{MatchSessionEvaluator, SessionSetup};
//! use pushy_training::{
//!     genetic::{Population, PopulationEvolver},
//!     weights::GeneBounds,
//! };
//!
//! let mut rng = rand::rng();
//! let maps = Map::all().unwrap();
//! let evaluator = MatchSessionEvaluator::new(300);
//! let evolver = PopulationEvolver::default();
//!
//! let mut population = Population::random(20, &GeneBounds::default(), &mut rng);
//! for _generation in 0..50 {
//!     let sessions: Vec<SessionSetup> = (0..3)
//!         .filter_map(|_| SessionSetup::random(&maps, MatchConfig::default(), &mut rng))
//!         .collect();
//!     population.evaluate_fitness(&sessions, &evaluator);
//!     population = evolver.evolve(&population, &mut rng);
//! }
//! ```

pub mod genetic;
pub mod stats;
pub mod weights;
