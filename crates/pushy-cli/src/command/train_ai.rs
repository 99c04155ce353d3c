use std::path::PathBuf;

use chrono::Utc;
use pushy_engine::Map;
use pushy_evaluator::{
    personality::AiWeights,
    session_evaluator::{MatchSessionEvaluator, SessionSetup},
};
use pushy_training::{
    genetic::{Individual, Population, PopulationEvolver},
    weights::GeneBounds,
};
use rand::SeedableRng as _;
use rand_pcg::Pcg32;

use crate::{model::ai_model::AiModel, util};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvolutionPhase {
    Exploration,
    Transition,
    Convergence,
}

impl EvolutionPhase {
    fn from_generation(generation: usize, max_generations: usize) -> Self {
        let exploration_end = max_generations * 15 / 100;
        let transition_end = max_generations * 40 / 100;
        if generation < exploration_end {
            Self::Exploration
        } else if generation < transition_end {
            Self::Transition
        } else {
            Self::Convergence
        }
    }
}

const ELITE_COUNT: usize = 2;
const MUTATION_RATE: f32 = 0.3;
const BLX_ALPHA: f32 = 0.2;

const fn tournament_size_by_phase(phase: EvolutionPhase) -> usize {
    match phase {
        EvolutionPhase::Exploration => 2,
        EvolutionPhase::Transition | EvolutionPhase::Convergence => 3,
    }
}

const fn mutation_sigma_by_phase(phase: EvolutionPhase) -> f32 {
    match phase {
        EvolutionPhase::Exploration => 0.05,
        EvolutionPhase::Transition => 0.02,
        EvolutionPhase::Convergence => 0.01,
    }
}

fn evolver_by_phase(phase: EvolutionPhase) -> PopulationEvolver {
    PopulationEvolver {
        elite_count: ELITE_COUNT,
        tournament_size: tournament_size_by_phase(phase),
        blx_alpha: BLX_ALPHA,
        mutation_sigma: mutation_sigma_by_phase(phase),
        mutation_rate: MUTATION_RATE,
        bounds: GeneBounds::default(),
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainAiArg {
    /// Name stored in the model file
    #[arg(long, default_value = "trained")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of generations to evolve
    #[arg(long, default_value_t = 200)]
    generations: usize,
    /// Number of individuals per generation
    #[arg(long, default_value_t = 30)]
    population: usize,
    /// Matches each individual plays per generation
    #[arg(long, default_value_t = 3)]
    games: usize,
    /// Effective moves after which a training match is stopped
    #[arg(long, default_value_t = 300)]
    turn_limit: usize,
    /// Path to the match rules (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the whole training run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Start from the built-in presets instead of a fully random population
    #[arg(long)]
    from_presets: bool,
}

impl Default for TrainAiArg {
    fn default() -> Self {
        Self {
            name: "trained".to_owned(),
            output: None,
            generations: 200,
            population: 30,
            games: 3,
            turn_limit: 300,
            config: None,
            seed: None,
            from_presets: false,
        }
    }
}

pub(crate) fn run(arg: &TrainAiArg) -> anyhow::Result<()> {
    let TrainAiArg {
        name,
        output,
        generations,
        population: population_count,
        games,
        turn_limit,
        config,
        seed,
        from_presets,
    } = arg;
    anyhow::ensure!(*population_count > 0, "population must not be empty");
    anyhow::ensure!(*generations > 0, "at least one generation is required");

    let config = util::read_match_config(config.as_ref())?;
    let maps = Map::all()?;
    let session_evaluator = MatchSessionEvaluator::new(*turn_limit);

    let mut rng = match seed {
        Some(seed) => Pcg32::seed_from_u64(*seed),
        None => Pcg32::from_rng(&mut rand::rng()),
    };
    let bounds = GeneBounds::default();
    let mut population = if *from_presets {
        let individuals = [AiWeights::TWO_PLAYER]
            .into_iter()
            .chain(AiWeights::MULTIPLAYER_POOL)
            .map(Individual::from_weights)
            .chain(std::iter::repeat_with(|| Individual::random(&mut rng, &bounds)))
            .take(*population_count)
            .collect();
        Population::from_individuals(individuals)
    } else {
        Population::random(*population_count, &bounds, &mut rng)
    };

    for generation in 0..*generations {
        let phase = EvolutionPhase::from_generation(generation, *generations);
        eprintln!("Generation #{generation} ({phase:?}):");
        let evolver = evolver_by_phase(phase);
        let sessions: Vec<SessionSetup> = (0..*games)
            .filter_map(|_| SessionSetup::random(&maps, config, &mut rng))
            .collect();
        population.evaluate_fitness(&sessions, &session_evaluator);

        let gene_stats = population.compute_gene_stats();
        #[expect(clippy::cast_precision_loss)]
        let gene_norm_std_dev_mean = gene_stats
            .iter()
            .map(|s| s.normalized_std_dev)
            .sum::<f32>()
            / gene_stats.len().max(1) as f32;

        eprintln!("  Sessions:");
        for session in &sessions {
            eprintln!(
                "    {} with {} players (seed {})",
                session.map().name(),
                session.player_count(),
                session.seed()
            );
        }

        eprintln!("  Individuals:");
        for (i, ind) in population.individuals().iter().enumerate() {
            eprintln!("  {i:2}: {:.0?} => {:.3}", ind.genes(), ind.fitness());
        }

        eprintln!("  Genes Stats:");
        eprintln!(
            "    Min:        {:.0?}",
            gene_stats.iter().map(|s| s.min).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Max:        {:.0?}",
            gene_stats.iter().map(|s| s.max).collect::<Vec<_>>(),
        );
        eprintln!(
            "    Mean:       {:.0?}",
            gene_stats.iter().map(|s| s.mean).collect::<Vec<_>>(),
        );
        eprintln!(
            "    NormStddev: {:.3?}",
            gene_stats
                .iter()
                .map(|s| s.normalized_std_dev)
                .collect::<Vec<_>>(),
        );
        eprintln!("    => Mean:    {gene_norm_std_dev_mean:.3}");

        if let Some(fitness_stats) = population.compute_fitness_stats() {
            eprintln!("  Fitness Stats:");
            eprintln!("    Min:  {:.3}", fitness_stats.min);
            eprintln!("    Max:  {:.3}", fitness_stats.max);
            eprintln!("    Mean: {:.3}", fitness_stats.mean);
        }

        if generation + 1 < *generations {
            population = evolver.evolve(&population, &mut rng);
        }
    }

    eprintln!("Best Individuals:");
    for (i, ind) in population.individuals().iter().take(5).enumerate() {
        eprintln!("  {i:2}: {:?} => {}", ind.weights(), ind.fitness());
    }

    let best_individual = population
        .best_individual()
        .ok_or_else(|| anyhow::anyhow!("population is empty"))?;
    let model = AiModel {
        name: name.clone(),
        trained_at: Utc::now(),
        final_fitness: best_individual.fitness(),
        weights: best_individual.weights(),
    };
    model.save(output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Final fitness: {:.3}", model.final_fitness);

    Ok(())
}
