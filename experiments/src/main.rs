use anyhow::{ensure, Result};
use clap::{Parser, ValueEnum};
use othello_agent::{
    AlphaBeta, Board, Color, DepthLimit, Engine, Heuristic, Logger, Minimax, StaticEvaluator,
    Utility,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;

const LOG_LEVEL: u8 = 1;

/// Plays engines against each other from randomized openings and prints
/// one JSON record per game.
#[derive(Parser, Debug)]
struct Cli {
    /// Engine playing dark
    #[arg(long, default_value = "alpha-beta")]
    dark: Kind,
    /// Engine playing light
    #[arg(long, default_value = "minimax")]
    light: Kind,
    #[arg(short, long, default_value = "10")]
    games: usize,
    /// Board size, even and at least 4
    #[arg(short, long, default_value = "6")]
    size: usize,
    /// Depth limit for both engines; negative searches to the end
    #[arg(short, long, default_value = "3", allow_hyphen_values = true)]
    depth: i64,
    /// Number of random moves played before the engines take over
    #[arg(short, long, default_value = "4")]
    random_openings: usize,
    #[arg(long)]
    caching: bool,
    #[arg(long)]
    ordering: bool,
    /// Score cutoffs with the heuristic instead of the disc difference
    #[arg(long)]
    heuristic: bool,
    #[arg(long, default_value = "0")]
    seed: u64,
}

#[derive(ValueEnum, Copy, Clone, Debug, Serialize)]
enum Kind {
    Minimax,
    AlphaBeta,
}

#[derive(Serialize, Debug, Default)]
struct Side {
    discs: i32,
    nodes_visited: u64,
    nodes_cached: u64,
    prunes: u64,
}

#[derive(Serialize, Debug)]
struct GameRecord {
    game: usize,
    dark_engine: Kind,
    light_engine: Kind,
    moves: usize,
    dark: Side,
    light: Side,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ensure!(cli.size >= 4 && cli.size % 2 == 0, "board size must be even and at least 4");

    let mut logger = Logger::new(LOG_LEVEL);
    let mut rng = StdRng::seed_from_u64(cli.seed);

    let mut dark_wins = 0;
    let mut light_wins = 0;

    logger.time_start(1, "all games");
    for game in 0..cli.games {
        // Fresh engines per game so one game's table can't leak into the next
        let mut dark = build_engine(&cli, cli.dark);
        let mut light = build_engine(&cli, cli.light);

        let record = run_single_match(&cli, game, dark.as_mut(), light.as_mut(), &mut rng);
        if record.dark.discs > record.light.discs {
            dark_wins += 1;
        } else if record.light.discs > record.dark.discs {
            light_wins += 1;
        }
        println!("{}", serde_json::to_string(&record)?);
    }
    logger.time_end(1, "all games");

    logger.log(
        1,
        &format!(
            "dark ({:?}) won {}, light ({:?}) won {}, {} drawn",
            cli.dark,
            dark_wins,
            cli.light,
            light_wins,
            cli.games - dark_wins - light_wins
        ),
    );

    Ok(())
}

fn build_engine(cli: &Cli, kind: Kind) -> Box<dyn Engine> {
    let evaluator: Box<dyn StaticEvaluator> =
        if cli.heuristic { Box::new(Heuristic::default()) } else { Box::new(Utility) };
    let depth_limit = DepthLimit::from_int(cli.depth);
    match kind {
        Kind::Minimax => Box::new(Minimax::new(evaluator, depth_limit, cli.caching, 0)),
        Kind::AlphaBeta => {
            Box::new(AlphaBeta::new(evaluator, depth_limit, cli.caching, cli.ordering, 0))
        }
    }
}

fn run_single_match(
    cli: &Cli, game: usize, dark_player: &mut dyn Engine, light_player: &mut dyn Engine,
    rng: &mut StdRng,
) -> GameRecord {
    let mut board = Board::starting(cli.size);
    let mut color = Color::Dark;
    let mut moves = 0;
    let mut dark = Side::default();
    let mut light = Side::default();

    while !board.is_game_over() {
        let mv = if moves < cli.random_openings {
            board.legal_moves(color).choose(rng).copied()
        } else {
            let (player, side) = match color {
                Color::Dark => (&mut *dark_player, &mut dark),
                Color::Light => (&mut *light_player, &mut light),
            };
            let mv = player.select_move(&board, color);
            let total = player.stats().total();
            side.nodes_visited += total.visited;
            side.nodes_cached += total.cached;
            side.prunes += total.prunes;
            mv
        };

        if let Some(mv) = mv {
            board = board.apply_move(color, mv);
            moves += 1;
        }
        color = !color;
    }

    let (dark_discs, light_discs) = board.disc_counts();
    dark.discs = dark_discs;
    light.discs = light_discs;

    GameRecord { game, dark_engine: cli.dark, light_engine: cli.light, moves, dark, light }
}
