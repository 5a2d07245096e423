use crate::engine::GridState;

/// Signature shared by every heuristic the binaries can select.
///
/// `solve_best_first` itself accepts any `Fn(&GridState) -> u32`, closures included.
pub type HeuristicFn = fn(&GridState) -> u32;

/// Estimates remaining work by weighting each 0 cell with its lit neighbours.
///
/// For every cell valued 0, adds 1 for the cell itself plus 1 for each in-bounds
/// orthogonal neighbour valued 1. A dark cell surrounded by lit cells is expensive
/// because toggling it also darkens those neighbours. The estimate is not admissible.
///
/// # Examples
/// ```
/// use lights_out_solver::engine::GridState;
/// use lights_out_solver::heuristics::neighbour_weighted_zeros;
/// assert_eq!(neighbour_weighted_zeros(&GridState::new_zeros(3)), 9);
/// assert_eq!(neighbour_weighted_zeros(&GridState::new_ones(3)), 0);
/// ```
pub fn neighbour_weighted_zeros(state: &GridState) -> u32 {
    let n = state.size();
    let mut total = 0;
    for r in 0..n {
        for c in 0..n {
            if !state.get(r, c) {
                total += 1;
                total += state
                    .neighbours(r, c)
                    .map(|(nr, nc)| state.value(nr, nc))
                    .sum::<u32>();
            }
        }
    }
    total
}

/// Counts the cells still valued 0.
pub fn count_zeros(state: &GridState) -> u32 {
    (state.size() * state.size() - state.count_ones()) as u32
}

/// Scores every state the same. Best-first search with this heuristic expands
/// nodes in exactly the order breadth-first search does.
pub fn zero_heuristic(_state: &GridState) -> u32 {
    0
}

/// Looks up a heuristic by the short name used on the command line.
pub fn heuristic_by_name(name: &str) -> Option<HeuristicFn> {
    match name {
        "h1" => Some(count_zeros),
        "h2" => Some(neighbour_weighted_zeros),
        "zero" => Some(zero_heuristic),
        _ => None,
    }
}
