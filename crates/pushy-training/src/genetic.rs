//! Genetic algorithm evolving AI weights.
//!
//! The algorithm follows this cycle:
//!
//! 1. **Evaluate Fitness** - Each individual plays the generation's sessions
//! 2. **Elite Selection** - Top performers are kept unchanged in the next generation
//! 3. **Tournament Selection** - Parents are the best of a few randomly drawn individuals
//! 4. **Crossover (BLX-α)** - Two parents' genes are blended into a child
//! 5. **Mutation** - Random Gaussian noise is added to some of the child's genes
//!
//! # Parallelization
//!
//! Fitness evaluation runs one scoped thread per individual. Matches are independent
//! values, so no state is shared between the threads.
//!
//! # Parameter Control
//!
//! [`PopulationEvolver`] holds the parameters of a single generation step. Callers that want a
//! schedule (for example wide exploration first, fine-tuning later) create a different
//! evolver for each phase.

use std::thread;

use log::debug;
use pushy_evaluator::{
    personality::AiWeights,
    session_evaluator::{SessionEvaluator, SessionSetup},
};
use rand::{Rng, seq::IndexedRandom};

use crate::{
    stats::DescriptiveStats,
    weights::{self, GeneBounds, Genes},
};

/// A candidate set of weights and its fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    genes: Genes,
    fitness: f32,
}

impl Individual {
    pub fn random<R>(rng: &mut R, bounds: &GeneBounds) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::from_weights(AiWeights::from_array(weights::random(rng, bounds)))
    }

    /// An individual seeded with known weights, such as a preset or a previous model.
    #[must_use]
    pub fn from_weights(weights: AiWeights) -> Self {
        Self {
            genes: weights.to_array(),
            fitness: f32::MIN,
        }
    }

    #[must_use]
    pub fn genes(&self) -> &Genes {
        &self.genes
    }

    #[must_use]
    pub fn weights(&self) -> AiWeights {
        AiWeights::from_array(self.genes)
    }

    /// Fitness from the last evaluation; `f32::MIN` before the first one.
    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    #[must_use]
    pub fn random<R>(count: usize, bounds: &GeneBounds, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let individuals = (0..count).map(|_| Individual::random(rng, bounds)).collect();
        Self { individuals }
    }

    #[must_use]
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Individuals, best first after [`Self::evaluate_fitness`].
    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn best_individual(&self) -> Option<&Individual> {
        self.individuals.first()
    }

    /// Evaluates every individual on `sessions` in parallel, then sorts by fitness (best first).
    pub fn evaluate_fitness<E>(&mut self, sessions: &[SessionSetup], session_evaluator: &E)
    where
        E: SessionEvaluator + ?Sized,
    {
        thread::scope(|s| {
            for ind in &mut self.individuals {
                s.spawn(move || {
                    ind.fitness =
                        session_evaluator.play_and_evaluate_sessions(sessions, &ind.weights());
                });
            }
        });

        // sort by fitness descending
        self.individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        if let Some(best) = self.individuals.first() {
            debug!("best fitness {:.3} with {:?}", best.fitness, best.weights());
        }
    }

    /// Statistics of each gene across the population, in gene order.
    #[must_use]
    pub fn compute_gene_stats(&self) -> Vec<DescriptiveStats> {
        (0..AiWeights::LEN)
            .filter_map(|i| DescriptiveStats::new(self.individuals.iter().map(|ind| ind.genes[i])))
            .collect()
    }

    #[must_use]
    pub fn compute_fitness_stats(&self) -> Option<DescriptiveStats> {
        DescriptiveStats::new(self.individuals.iter().map(|ind| ind.fitness))
    }
}

/// Parameters of one generation step.
#[derive(Debug, Clone, Copy)]
pub struct PopulationEvolver {
    /// Number of top individuals preserved unchanged (elitism)
    pub elite_count: usize,
    /// Tournament size for selection (larger = stronger selection pressure)
    pub tournament_size: usize,
    /// BLX-α crossover parameter (controls exploration beyond parent range)
    pub blx_alpha: f32,
    /// Standard deviation of the mutation noise, relative to each gene's range
    pub mutation_sigma: f32,
    /// Probability of mutating each gene
    pub mutation_rate: f32,
    pub bounds: GeneBounds,
}

impl Default for PopulationEvolver {
    fn default() -> Self {
        Self {
            elite_count: 2,
            tournament_size: 2,
            blx_alpha: 0.2,
            mutation_sigma: 0.05,
            mutation_rate: 0.3,
            bounds: GeneBounds::default(),
        }
    }
}

impl PopulationEvolver {
    /// Creates the next generation, the same size as `population`.
    ///
    /// `population` must be sorted by fitness, best first, as left by
    /// [`Population::evaluate_fitness`].
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Population
    where
        R: Rng + ?Sized,
    {
        let individuals = &population.individuals;
        debug_assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let elite_count = self.elite_count.min(individuals.len());
        let mut next_individuals = individuals[..elite_count].to_vec();

        while next_individuals.len() < individuals.len() {
            let (Some(p1), Some(p2)) = (
                tournament_select(individuals, self.tournament_size, rng),
                tournament_select(individuals, self.tournament_size, rng),
            ) else {
                break;
            };
            let mut child =
                weights::blx_alpha(&p1.genes, &p2.genes, self.blx_alpha, &self.bounds, rng);
            weights::mutate(
                &mut child,
                self.mutation_sigma,
                self.mutation_rate,
                &self.bounds,
                rng,
            );
            next_individuals.push(Individual {
                genes: child,
                fitness: f32::MIN,
            });
        }

        Population {
            individuals: next_individuals,
        }
    }
}

/// Picks the fittest of `tournament_size` randomly drawn individuals.
fn tournament_select<'a, R>(
    population: &'a [Individual],
    tournament_size: usize,
    rng: &mut R,
) -> Option<&'a Individual>
where
    R: Rng + ?Sized,
{
    population
        .choose_multiple(rng, tournament_size.max(1))
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
}
