use anyhow::{bail, Context, Result};
use clap::Parser;
use genoku::{grid::Grid, logger::DevLogger, solver::{Solver, SolverConfig}};
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
#[command(name = "genoku", version, about = "Genetic-algorithm Sudoku solver with devlogs")]
struct Cli {
    /// Path to a puzzle file (81 chars with 0 or . for blanks). If omitted, reads from stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Seed for the random source (omit for a fresh search each run)
    #[arg(long)]
    seed: Option<u64>,

    /// Candidate grids per generation
    #[arg(long, default_value_t = 180)]
    population: usize,

    /// Global generation budget before the search gives up
    #[arg(long, default_value_t = 100_000)]
    max_iterations: usize,

    /// Maximum devlogs to write (0 = unlimited)
    #[arg(long, default_value_t = 0)]
    max_logs: usize,

    /// Emit devlogs to console with colors
    #[arg(long)]
    color: bool,
}

fn read_puzzle(input: &Option<PathBuf>) -> Result<String> {
    let s = match input {
        Some(p) => fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?,
        None => {
            use std::io::{self, Read};
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let filtered: String = s.chars().filter(|ch| matches!(ch, '0'..='9' | '.')).collect();
    if filtered.len() < 81 { bail!("expected at least 81 digits/dots in input (have {})", filtered.len()) }
    Ok(filtered.chars().take(81).collect())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let puzzle = read_puzzle(&cli.input)?;
    let blueprint = Grid::from_compact(&puzzle).context("parse puzzle")?;
    let mut logger = DevLogger::new("devlogs", cli.color, cli.max_logs)?;

    println!("Blueprint:\n{}", blueprint.to_pretty_string());

    let mut solver = Solver::new(SolverConfig {
        population_size: cli.population,
        max_iterations: cli.max_iterations,
        seed: cli.seed,
    });

    match solver.solve(&blueprint, &mut logger)? {
        Some(answer) => println!(
            "Solved in {} generations ({} restarts):\n{}",
            solver.generations(),
            solver.restarts(),
            answer.to_pretty_string()
        ),
        None => println!(
            "No solution found within {} generations ({} restarts).",
            solver.generations(),
            solver.restarts()
        ),
    }
    Ok(())
}
