use clap::Parser;
use crossterm::style::{style, Stylize};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::{fs, io};
use tracing::error;
use tracing_subscriber::{fmt, EnvFilter};

use npuzzle::input::parse_board;
use npuzzle::report::write_solution;
use npuzzle::{solve, Heuristic, Outcome, PuzzleError, Solution, State};

/// Solve a sliding-tile puzzle optimally with A*.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board file: the side k followed by k*k tiles, 0 for the blank.
    /// Read from stdin when omitted.
    input: Option<PathBuf>,

    /// Heuristic to guide the search (h, m, e, l for short)
    #[arg(short = 'H', long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,

    /// Scramble a solved board of this size instead of reading one
    #[arg(long, value_name = "K", conflicts_with = "input")]
    random: Option<usize>,

    /// Random blank moves used by --random
    #[arg(long, default_value_t = 30, requires = "random")]
    moves: usize,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Write the solution path to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();
}

fn read_start(args: &Args) -> Result<State, PuzzleError> {
    if let Some(size) = args.random {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return State::scrambled(size, args.moves, &mut rng);
    }

    let (text, path) = match &args.input {
        Some(path) => (fs::read_to_string(path), path.clone()),
        None => {
            let mut text = String::new();
            let read = io::stdin().read_to_string(&mut text).map(|_| text);
            (read, PathBuf::from("<stdin>"))
        }
    };
    let text = text.map_err(|source| PuzzleError::Io { path, source })?;
    parse_board(&text)
}

fn print_board(state: &State) {
    let width = (state.tiles().len() - 1).to_string().len();
    for row in state.rows() {
        for &tile in row {
            let cell = format!("{:>width$} ", tile, width = width);
            if tile == 0 {
                print!("{}", style(cell).dark_grey());
            } else {
                print!("{}", cell);
            }
        }
        println!();
    }
}

fn print_solution(solution: &Solution) {
    println!(
        "{}",
        style(format!("Solution found in {} moves.", solution.cost())).bold()
    );
    println!("Expanded nodes: {}", solution.stats.expanded);
    println!("Explored nodes: {}", solution.stats.generated);
    println!();

    let mut states = solution.states();
    if let Some(start) = states.next() {
        print_board(start);
    }
    for (movement, state) in solution.moves().into_iter().zip(states) {
        println!("\n{}", style(movement).bold());
        print_board(state);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let start = read_start(args)?;

    println!("{}", style("Initial board:").bold());
    print_board(&start);
    println!();

    match solve(&start, args.heuristic)? {
        Outcome::Unsolvable(report) => {
            println!("Number of inversions: {}", report.inversions);
            println!("The puzzle is not solvable.");
        }
        Outcome::Solved(solution) => {
            println!("Number of inversions: {}", solution.solvability.inversions);
            println!("Heuristic: {}", solution.heuristic);
            print_solution(&solution);
            if let Some(path) = &args.output {
                write_solution(&solution, path)?;
                println!("\nSolution written to {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "solver failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
