use std::{
    collections::BTreeMap,
    io::{self, BufRead as _, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use log::info;
use pushy_engine::{Color, Direction, Map, Match, Player, resolve_push};
use pushy_evaluator::{move_search::choose_move, personality::Personality};
use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg32;

use crate::{model::ai_model::AiModel, render, util};

/// Who controls a seat.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub(crate) enum Seat {
    #[display("human")]
    Human,
    #[display("ai")]
    Ai(Personality),
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct MatchArg {
    /// Map to play on (see `pushy maps`)
    #[arg(long, default_value = "standard")]
    map: String,
    /// Number of seated players
    #[arg(long, default_value_t = 2)]
    players: usize,
    /// Seed for seat assignment and AI choices (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Path to the match rules (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Path to an AI model file (JSON format) used by every AI seat instead of the presets
    #[arg(long)]
    model: Option<PathBuf>,
}

impl Default for MatchArg {
    fn default() -> Self {
        Self {
            map: "standard".to_owned(),
            players: 2,
            seed: None,
            config: None,
            model: None,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ManualPlayArg {
    #[command(flatten)]
    game: MatchArg,
    /// Number of human players; their colors are drawn at random
    #[arg(long, default_value_t = 1)]
    humans: usize,
}

impl Default for ManualPlayArg {
    fn default() -> Self {
        Self {
            game: MatchArg::default(),
            humans: 1,
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AutoPlayArg {
    #[command(flatten)]
    game: MatchArg,
    /// Stop after this many effective moves
    #[arg(long)]
    turn_limit: Option<usize>,
    /// Only print the final board
    #[arg(long)]
    quiet: bool,
}

struct Table {
    game: Match,
    seats: BTreeMap<Color, Seat>,
    rng: Pcg32,
}

impl Table {
    fn new(arg: &MatchArg, humans: usize) -> anyhow::Result<Self> {
        let map = Map::from_name(&arg.map)?;
        let config = util::read_match_config(arg.config.as_ref())?;
        let personality = match &arg.model {
            Some(path) => AiModel::open(path)?.personality(),
            None => Personality::Preset,
        };
        let game = Match::new(&map, arg.players, config)
            .with_context(|| format!("Failed to set up a match on {}", map.name()))?;
        anyhow::ensure!(
            humans <= arg.players,
            "{humans} humans do not fit in a {}-player match",
            arg.players
        );

        let seed = util::match_seed(arg.seed);
        info!("match seed: {seed}");
        let mut rng = seed.rng();
        let colors: Vec<Color> = game.players().iter().map(Player::color).collect();
        let seats = assign_seats(&colors, humans, personality, &mut rng);
        Ok(Self { game, seats, rng })
    }

    fn seat(&self, color: Color) -> Seat {
        self.seats
            .get(&color)
            .copied()
            .unwrap_or(Seat::Ai(Personality::Preset))
    }

    fn print(&self) {
        print!("{}", render::match_view(&self.game, &self.seats));
    }
}

/// Seats `humans` players on randomly chosen colors; the others are AIs with `personality`.
fn assign_seats<R>(
    colors: &[Color],
    humans: usize,
    personality: Personality,
    rng: &mut R,
) -> BTreeMap<Color, Seat>
where
    R: Rng + ?Sized,
{
    let mut seats: BTreeMap<Color, Seat> = colors
        .iter()
        .map(|color| (*color, Seat::Ai(personality)))
        .collect();
    for color in colors.choose_multiple(rng, humans) {
        seats.insert(*color, Seat::Human);
    }
    seats
}

/// Returns `true` if no square on the board can move in any direction.
fn is_stalled(game: &Match) -> bool {
    Direction::ALL
        .iter()
        .all(|direction| resolve_push(game.board(), *direction).is_noop())
}

fn read_direction<I>(lines: &mut I, color: Color) -> anyhow::Result<Option<Direction>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        print!("{color} to move [w/a/s/d, q to quit]: ");
        io::stdout().flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("Failed to read from stdin")?;
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match line.parse::<Direction>() {
            Ok(direction) => return Ok(Some(direction)),
            Err(e) => println!("{e}"),
        }
    }
}

pub(crate) fn run_manual(arg: &ManualPlayArg) -> anyhow::Result<()> {
    let ManualPlayArg { game, humans } = arg;
    let mut table = Table::new(game, *humans)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !table.game.is_over() {
        if is_stalled(&table.game) {
            println!("no square can move");
            break;
        }
        let color = table.game.current_player().color();
        let direction = match table.seat(color) {
            Seat::Human => {
                table.print();
                let Some(direction) = read_direction(&mut lines, color)? else {
                    println!("quit");
                    return Ok(());
                };
                direction
            }
            Seat::Ai(personality) => {
                let Some(direction) = choose_move(&table.game, &personality, &mut table.rng) else {
                    break;
                };
                direction
            }
        };

        let result = table.game.apply_move(direction)?;
        if result.is_noop() {
            println!("nothing moved, {color} moves again");
            continue;
        }
        println!("{}", render::move_summary(color, &result));
    }

    table.print();
    println!("{}", render::result_line(&table.game));
    Ok(())
}

pub(crate) fn run_auto(arg: &AutoPlayArg) -> anyhow::Result<()> {
    let AutoPlayArg {
        game,
        turn_limit,
        quiet,
    } = arg;
    let mut table = Table::new(game, 0)?;

    while !table.game.is_over() && turn_limit.is_none_or(|limit| table.game.turn() < limit) {
        let color = table.game.current_player().color();
        let personality = match table.seat(color) {
            Seat::Ai(personality) => personality,
            Seat::Human => Personality::Preset,
        };
        let Some(direction) = choose_move(&table.game, &personality, &mut table.rng) else {
            println!("no square can move");
            break;
        };
        let result = table.game.apply_move(direction)?;
        if !*quiet {
            table.print();
            println!("{}", render::move_summary(color, &result));
            println!();
        }
    }

    table.print();
    println!("{}", render::result_line(&table.game));
    Ok(())
}
