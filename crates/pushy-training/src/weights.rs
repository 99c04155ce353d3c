//! Gene vector operations for the genetic algorithm.
//!
//! Genes are the nine evaluator weights in [`AiWeights`] array order. Every gene lives in
//! `[0, max]`, where `max` comes from [`GeneBounds`]. These operations are used by
//! [`genetic::PopulationEvolver`](crate::genetic::PopulationEvolver) to implement
//! initialization, crossover and mutation.
//!
//! # Operations
//!
//! - **Initialization**: [`random`] draws every gene uniformly from its range
//! - **Crossover**: [`blx_alpha`] implements the BLX-α crossover operator
//! - **Mutation**: [`mutate`] applies Gaussian mutation scaled to each gene's range
//!
//! Weights are not normalized: the evaluator compares scores of the four directions only, so
//! scaling all weights leaves the chosen move unchanged, but the threshold gene is not a scale
//! factor and must keep its absolute value.

use pushy_evaluator::personality::AiWeights;
use rand::Rng;
use rand_distr::Normal;

pub type Genes = [f32; AiWeights::LEN];

/// Upper bounds of the genes. Lower bounds are always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneBounds {
    /// Bound of every weight gene.
    pub max_weight: f32,
    /// Bound of the square threshold gene.
    pub max_threshold: f32,
}

impl Default for GeneBounds {
    fn default() -> Self {
        Self {
            max_weight: 10_000.0,
            max_threshold: 8.0,
        }
    }
}

impl GeneBounds {
    #[must_use]
    pub fn max(&self, index: usize) -> f32 {
        if index == AiWeights::THRESHOLD_INDEX {
            self.max_threshold
        } else {
            self.max_weight
        }
    }

    fn clamp(&self, index: usize, value: f32) -> f32 {
        value.clamp(0.0, self.max(index))
    }
}

/// Draws every gene uniformly from `[0, max]`.
pub fn random<R>(rng: &mut R, bounds: &GeneBounds) -> Genes
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|i| rng.random_range(0.0..=bounds.max(i)))
}

/// Performs BLX-α (Blend Crossover) between two parents.
///
/// For parent genes `x1` and `x2` with `d = |x2 - x1|`, the child gene is drawn uniformly
/// from `[min - α·d, max + α·d]` and clamped to the gene's range. `alpha = 0` keeps children
/// strictly between their parents.
pub fn blx_alpha<R>(p1: &Genes, p2: &Genes, alpha: f32, bounds: &GeneBounds, rng: &mut R) -> Genes
where
    R: Rng + ?Sized,
{
    std::array::from_fn(|i| {
        let min = f32::min(p1[i], p2[i]);
        let max = f32::max(p1[i], p2[i]);
        let d = max - min;
        let value = rng.random_range((min - alpha * d)..=(max + alpha * d));
        bounds.clamp(i, value)
    })
}

/// Applies Gaussian mutation in place.
///
/// Each gene is mutated with probability `rate` by adding noise from `N(0, sigma · max)`, so
/// `sigma` is relative to the gene's range.
pub fn mutate<R>(genes: &mut Genes, sigma: f32, rate: f32, bounds: &GeneBounds, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for (i, gene) in genes.iter_mut().enumerate() {
        if !rng.random_bool(rate.clamp(0.0, 1.0).into()) {
            continue;
        }
        let Ok(normal) = Normal::new(0.0, sigma * bounds.max(i)) else {
            continue;
        };
        *gene = bounds.clamp(i, *gene + rng.sample(normal));
    }
}
