use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use othello_agent::{
    format_move, parse_board, parse_status, AgentConfig, AlphaBeta, Algorithm, DepthLimit, Engine,
    Heuristic, Logger, Minimax, StaticEvaluator, Status, Utility,
};

/// Arguments to the agent. The game settings themselves come from the game
/// manager's config line on stdin.
#[derive(Parser, Debug)]
#[command(
    name = "Othello Agent",
    about = "Plays Othello against a game manager over stdin/stdout."
)]
struct Cli {
    /// The name announced to the game manager
    #[arg(short, long, default_value = "Othello AI")]
    name: String,
    /// How much to log to stderr, from 0 (nothing) to 10 (everything)
    #[arg(short, long, default_value = "1")]
    log_level: u8,
    /// Score cutoff positions with the corner/mobility heuristic instead of
    /// the plain disc difference
    #[arg(long)]
    heuristic: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&cli, &mut stdin.lock().lines(), &mut stdout.lock())
}

fn run(
    cli: &Cli, input: &mut impl Iterator<Item = io::Result<String>>, output: &mut impl Write,
) -> Result<()> {
    writeln!(output, "{}", cli.name)?;
    output.flush()?;

    let config_line = next_line(input).context("reading config line")?;
    let config = AgentConfig::parse(&config_line)?;

    let logger = Logger::new(cli.log_level);
    log_config(&logger, &config);

    let mut engine = build_engine(cli, &config);

    loop {
        // The manager may just hang up once the game is decided
        let Some(line) = input.next() else {
            logger.log(1, "Input closed");
            return Ok(());
        };
        match parse_status(&line?)? {
            Status::Final { dark, light } => {
                logger.log(1, &format!("Game over: dark {} light {}", dark, light));
                return Ok(());
            }
            Status::Score { dark, light } => {
                logger.log(3, &format!("Score: dark {} light {}", dark, light));
            }
        }

        let board = parse_board(&next_line(input).context("reading board")?)?;
        let mv = engine.select_move(&board, config.color);
        if mv.is_none() {
            logger.log(1, "No legal move, passing");
        }

        writeln!(output, "{}", format_move(mv))?;
        output.flush()?;
    }
}

fn next_line(input: &mut impl Iterator<Item = io::Result<String>>) -> Result<String> {
    match input.next() {
        Some(line) => Ok(line?),
        None => Err(othello_agent::ProtocolError::UnexpectedEof.into()),
    }
}

fn build_engine(cli: &Cli, config: &AgentConfig) -> Box<dyn Engine> {
    let evaluator: Box<dyn StaticEvaluator> =
        if cli.heuristic { Box::new(Heuristic::default()) } else { Box::new(Utility) };
    match config.algorithm {
        Algorithm::Minimax => {
            Box::new(Minimax::new(evaluator, config.depth_limit, config.caching, cli.log_level))
        }
        Algorithm::AlphaBeta => Box::new(AlphaBeta::new(
            evaluator,
            config.depth_limit,
            config.caching,
            config.ordering,
            cli.log_level,
        )),
    }
}

fn log_config(logger: &Logger, config: &AgentConfig) {
    logger.log(1, &format!("Running {} as {:?}", config.algorithm, config.color));
    logger.log(1, &format!("State caching is {}", if config.caching { "ON" } else { "OFF" }));
    logger.log(1, &format!("Node ordering is {}", if config.ordering { "ON" } else { "OFF" }));
    match config.depth_limit {
        DepthLimit::Unbounded => logger.log(1, "Depth limit is OFF"),
        limit => logger.log(1, &format!("Depth limit is {}", limit)),
    }
    if config.algorithm == Algorithm::Minimax && config.ordering {
        logger.log(1, "Node ordering has no effect on minimax");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(args: &[&str], input: &str) -> Result<String> {
        let cli = Cli::parse_from(std::iter::once("engine-app").chain(args.iter().copied()));
        let mut lines = input.lines().map(|l| Ok::<_, io::Error>(l.to_string()));
        let mut output = Vec::new();
        run(&cli, &mut lines, &mut output)?;
        Ok(String::from_utf8(output)?)
    }

    #[test]
    fn test_full_exchange() {
        let input = "1,1,1,0,0\n\
            SCORE 2 2\n\
            ((0, 0, 0, 0), (0, 2, 1, 0), (0, 1, 2, 0), (0, 0, 0, 0))\n\
            FINAL 9 7\n";
        assert_eq!(play(&["-l", "0"], input).unwrap(), "Othello AI\n0 1\n");
    }

    #[test]
    fn test_alphabeta_with_heuristic_and_custom_name() {
        let input = "2,3,0,1,1\n\
            SCORE 2 2\n\
            [[0,0,0,0],[0,2,1,0],[0,1,2,0],[0,0,0,0]]\n";
        let output = play(&["--name", "Tester", "-l", "0", "--heuristic"], input).unwrap();
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Tester"));
        let reply: Vec<usize> =
            lines.next().unwrap().split(' ').map(|n| n.parse().unwrap()).collect();
        let board = othello_agent::Board::starting(4);
        assert!(board.is_legal(othello_agent::Color::Light, othello_agent::Move::new(reply[0], reply[1])));
    }

    #[test]
    fn test_pass_is_reported() {
        let input = "2,2,0,0,0\n\
            SCORE 4 0\n\
            ((1,1,0,0),(1,1,0,0),(0,0,0,0),(0,0,0,0))\n";
        assert_eq!(play(&["-l", "0"], input).unwrap(), "Othello AI\nPASS\n");
    }

    #[test]
    fn test_bad_config_is_rejected() {
        assert!(play(&["-l", "0"], "1,2,0,5,0\n").is_err());
        assert!(play(&["-l", "0"], "").is_err());
    }

    #[test]
    fn test_malformed_board_fails_loudly() {
        let input = "1,2,0,0,0\nSCORE 2 2\n((0, 0), (0\n";
        assert!(play(&["-l", "0"], input).is_err());
    }
}
