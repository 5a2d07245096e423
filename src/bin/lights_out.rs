use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use lights_out_solver::engine::{GridState, TransitionSet};
use lights_out_solver::heuristics::{count_zeros, neighbour_weighted_zeros, zero_heuristic, HeuristicFn};
use lights_out_solver::node::{path_to_root, SearchNode};
use lights_out_solver::solver::{run_search_with_progress, Progress, Strategy};
use lights_out_solver::SearchError;
use log::info;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Bfs,
    Ids,
    BestFirst,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HeuristicArg {
    /// Number of cells still at 0
    H1,
    /// Zero cells weighted by their lit neighbours
    H2,
    /// Constant 0 (best-first degenerates to BFS)
    Zero,
}

impl HeuristicArg {
    fn function(self) -> HeuristicFn {
        match self {
            HeuristicArg::H1 => count_zeros,
            HeuristicArg::H2 => neighbour_weighted_zeros,
            HeuristicArg::Zero => zero_heuristic,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve the N×N Lights Out puzzle", long_about = None)]
struct Args {
    /// Side length N of the grid
    size: usize,

    /// Search strategy to run
    #[clap(short, long, value_enum, default_value = "bfs")]
    strategy: StrategyArg,

    /// First depth limit tried by IDS
    #[clap(long, default_value_t = 0)]
    initial_depth: u32,

    /// Exclusive upper depth limit for IDS
    #[clap(long, default_value_t = 16)]
    final_depth: u32,

    /// Heuristic used by best-first search
    #[clap(long, value_enum, default_value = "h2")]
    heuristic: HeuristicArg,

    /// Path to a goal grid file (N lines of 0/1 cells) replacing the all-ones goal
    #[clap(long, conflicts_with = "random_goal")]
    goal_file: Option<PathBuf>,

    /// Seed for a random goal reachable from all zeros
    #[clap(long)]
    random_goal: Option<u64>,

    /// Number of random presses used to build the random goal
    #[clap(long, default_value_t = 6)]
    presses: usize,
}

fn read_goal_file(path: &PathBuf, size: usize) -> anyhow::Result<GridState> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read goal file {}", path.display()))?;
    let goal = lights_out_solver::utils::grid_from_text(&content)
        .with_context(|| format!("Invalid goal grid in {}", path.display()))?;
    if goal.size() != size {
        bail!("Goal grid is {0}x{0}, expected {1}x{1}", goal.size(), size);
    }
    Ok(goal)
}

fn build_initial_node(args: &Args) -> anyhow::Result<SearchNode> {
    let goal = match (&args.goal_file, args.random_goal) {
        (Some(path), _) => Some(read_goal_file(path, args.size)?),
        (None, Some(seed)) => Some(GridState::new_random_reachable(args.size, args.presses, seed)),
        (None, None) => None,
    };
    match goal {
        Some(goal) => {
            println!("Goal state:\n{}\n", goal);
            Ok(SearchNode::with_goal(args.size, goal)?)
        }
        None => Ok(SearchNode::new_initial_node(args.size)),
    }
}

fn print_progress(progress: Progress) {
    let depth = progress
        .depth
        .map_or_else(|| "?".to_string(), |d| d.to_string());
    eprint!(
        "\rDepth: {}, visited set length: {}",
        depth, progress.visited_len
    );
    let _ = std::io::stderr().flush();
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let strategy = match args.strategy {
        StrategyArg::Bfs => Strategy::Bfs,
        StrategyArg::Ids => Strategy::Ids {
            initial_depth: args.initial_depth,
            final_depth: args.final_depth,
        },
        StrategyArg::BestFirst => Strategy::BestFirst {
            heuristic: args.heuristic.function(),
        },
    };
    info!("Solving {0}x{0} grid with {1:?}", args.size, strategy);

    let initial = build_initial_node(&args)?;
    let transitions = TransitionSet::new(args.size);
    let result = run_search_with_progress(strategy, initial, &transitions, print_progress);
    eprintln!();

    let final_node = match result {
        Ok(node) => node,
        Err(SearchError::Exhausted { expanded }) => {
            println!("Solution not found ({} nodes expanded).", expanded);
            return Ok(());
        }
        Err(e) => return Err(e).context("Search failed"),
    };

    let solution = path_to_root(&final_node);
    println!("Initial state:\n{}", solution[0]);
    for node in solution.iter().skip(1) {
        if let Some((r, c)) = node.parent_transition() {
            println!("T: ({}, {}) ->", r, c);
        }
        println!("{}", node);
    }
    println!("\nSolution has {} steps.", solution.len() - 1);
    Ok(())
}
