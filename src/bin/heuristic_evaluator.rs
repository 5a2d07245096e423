use clap::Parser;
use lights_out_solver::engine::{GridState, TransitionSet};
use lights_out_solver::heuristics::{count_zeros, neighbour_weighted_zeros, zero_heuristic};
use lights_out_solver::node::SearchNode;
use lights_out_solver::solver::{run_search_with_progress, Strategy};
use lights_out_solver::SearchError;
use log::{info, warn};
use std::collections::HashMap;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare best-first heuristics on random reachable goals", long_about = None)]
struct Args {
    /// Side length N of the grid
    #[clap(short = 'n', long, default_value_t = 3)]
    size: usize,

    /// Number of random goals to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first goal; later goals use consecutive seeds
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Random presses used to build each goal
    #[clap(long, default_value_t = 8)]
    presses: usize,
}

#[derive(Default)]
struct Tally {
    steps: Vec<u32>,
    visited: Vec<usize>,
    failures: usize,
}

fn average<T: Copy + Into<f64>>(values: &[T]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v.into()).sum::<f64>() / values.len() as f64
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let strategies: Vec<(&str, Strategy)> = vec![
        ("BFS", Strategy::Bfs),
        ("H1", Strategy::BestFirst { heuristic: count_zeros }),
        ("H2", Strategy::BestFirst { heuristic: neighbour_weighted_zeros }),
        ("ZERO", Strategy::BestFirst { heuristic: zero_heuristic }),
    ];
    let transitions = TransitionSet::new(args.size);
    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    info!(
        "Starting heuristic evaluation for {} goals on a {1}x{1} grid...",
        args.boards, args.size
    );

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let goal = GridState::new_random_reachable(args.size, args.presses, seed);
        println!("\nEvaluating Goal {} (Seed: {})\n{}", board_idx, seed, goal);

        for (name, strategy) in &strategies {
            let root = match SearchNode::with_goal(args.size, goal.clone()) {
                Ok(root) => root,
                Err(e) => {
                    warn!("Skipping goal {}: {}", board_idx, e);
                    continue;
                }
            };
            let mut visited = 0usize;
            let result = run_search_with_progress(*strategy, root, &transitions, |p| {
                visited = visited.max(p.visited_len)
            });
            let tally = tallies.entry(*name).or_default();
            match result {
                Ok(node) => {
                    let steps = node.depth().unwrap_or(0);
                    println!("  Strategy: {:<6}, Steps: {:<4}, Visited: {}", name, steps, visited);
                    tally.steps.push(steps);
                    tally.visited.push(visited);
                }
                Err(SearchError::Exhausted { expanded }) => {
                    warn!("{} exhausted after {} expansions on seed {}", name, expanded, seed);
                    tally.failures += 1;
                }
                Err(e) => {
                    warn!("{} failed on seed {}: {}", name, seed, e);
                    tally.failures += 1;
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of goals evaluated: {}", args.boards);
    println!("\n--- Averages ---");

    let mut rows: Vec<(&str, f64, f64, usize)> = strategies
        .iter()
        .filter_map(|(name, _)| {
            tallies.get(name).map(|t| {
                let visited: Vec<f64> = t.visited.iter().map(|&v| v as f64).collect();
                (*name, average(&t.steps), average(&visited), t.failures)
            })
        })
        .collect();

    // Shortest average solutions first.
    rows.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    for (name, avg_steps, avg_visited, failures) in rows {
        println!(
            "Strategy {:<6}: Average Steps = {:.2}, Average Visited = {:.1}, Failures = {}",
            name, avg_steps, avg_visited, failures
        );
    }
}
