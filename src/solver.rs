//! Search strategies over the Lights Out state graph.
//!
//! Three interchangeable strategies share the same inputs: a root `SearchNode`
//! and the `TransitionSet` for its grid size.
//! - `solve_bfs`: FIFO frontier, returns a minimum-length solution.
//! - `solve_ids`: iterative deepening over a depth-limited DFS, no visited set.
//! - `solve_best_first`: greedy, frontier ordered by a heuristic score.
//!
//! All of them return `Err(SearchError::Exhausted)` when the space they explore
//! runs out without reaching a terminal node.
use crate::engine::{GridState, TransitionSet};
use crate::error::{SearchError, SearchResult};
use crate::heuristics::HeuristicFn;
use crate::node::SearchNode;
use log::{debug, trace};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::rc::Rc;

/// Snapshot handed to progress callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    /// Depth of the node being expanded (BFS, best-first) or the current depth limit (IDS).
    pub depth: Option<u32>,
    /// Nodes waiting in the frontier. Always 0 for IDS.
    pub frontier_len: usize,
    /// States in the visited set. Always 0 for IDS.
    pub visited_len: usize,
}

/// Selects a strategy and its parameters for `run_search`.
#[derive(Clone, Copy, Debug)]
pub enum Strategy {
    Bfs,
    /// Tries depth limits `initial_depth..final_depth`.
    Ids { initial_depth: u32, final_depth: u32 },
    BestFirst { heuristic: HeuristicFn },
}

/// Runs `strategy` from `initial_node` without progress reporting.
///
/// # Examples
/// ```
/// use lights_out_solver::engine::TransitionSet;
/// use lights_out_solver::node::SearchNode;
/// use lights_out_solver::solver::{run_search, Strategy};
///
/// let solution = run_search(Strategy::Bfs, SearchNode::new_initial_node(1), &TransitionSet::new(1)).unwrap();
/// assert_eq!(solution.depth(), Some(1));
/// ```
pub fn run_search(
    strategy: Strategy,
    initial_node: SearchNode,
    transitions: &TransitionSet,
) -> SearchResult<Rc<SearchNode>> {
    run_search_with_progress(strategy, initial_node, transitions, |_| {})
}

/// Runs `strategy` from `initial_node`, calling `on_progress` as the search advances.
pub fn run_search_with_progress<F>(
    strategy: Strategy,
    initial_node: SearchNode,
    transitions: &TransitionSet,
    on_progress: F,
) -> SearchResult<Rc<SearchNode>>
where
    F: FnMut(Progress),
{
    match strategy {
        Strategy::Bfs => solve_bfs(initial_node, transitions, on_progress),
        Strategy::Ids {
            initial_depth,
            final_depth,
        } => solve_ids(
            initial_node,
            transitions,
            initial_depth,
            final_depth,
            on_progress,
        ),
        Strategy::BestFirst { heuristic } => {
            solve_best_first(initial_node, transitions, heuristic, on_progress)
        }
    }
}

/// Breadth-first search. The first terminal node found is at minimum depth.
///
/// The root is returned as-is if it is already terminal. Otherwise nodes are
/// expanded in FIFO order; a successor whose state is already in the visited set
/// is dropped, and the search stops at the first terminal successor.
pub fn solve_bfs<F>(
    start_node: SearchNode,
    transitions: &TransitionSet,
    mut on_progress: F,
) -> SearchResult<Rc<SearchNode>>
where
    F: FnMut(Progress),
{
    transitions.check_compatible(start_node.state())?;
    let start = Rc::new(start_node);
    if start.is_final() {
        return Ok(start);
    }
    debug!("BFS: starting on {0}x{0} grid", start.state().size());

    let mut visited: HashSet<GridState> = HashSet::new();
    visited.insert(start.state().clone());
    let mut queue = VecDeque::new();
    queue.push_back(start);
    let mut expanded = 0;

    while let Some(current) = queue.pop_front() {
        expanded += 1;
        on_progress(Progress {
            depth: current.depth(),
            frontier_len: queue.len(),
            visited_len: visited.len(),
        });
        trace!("BFS: expanding node at depth {:?}", current.depth());

        for coord in transitions.iter() {
            let next = current.child(coord);
            if visited.contains(next.state()) {
                continue;
            }
            if next.is_final() {
                debug!(
                    "BFS: solution at depth {:?} after {} expansions",
                    next.depth(),
                    expanded
                );
                return Ok(Rc::new(next));
            }
            visited.insert(next.state().clone());
            queue.push_back(Rc::new(next));
        }
    }

    debug!("BFS: frontier empty after {} expansions", expanded);
    Err(SearchError::Exhausted { expanded })
}

/// Iterative-deepening search over depth limits `initial_depth..final_depth`.
///
/// Each limit runs a fresh depth-limited DFS from the root, trying transitions in
/// the set's fixed order. The first limit that yields a terminal node wins. No
/// visited set is kept, so states may be revisited within and across limits.
pub fn solve_ids<F>(
    start_node: SearchNode,
    transitions: &TransitionSet,
    initial_depth: u32,
    final_depth: u32,
    mut on_progress: F,
) -> SearchResult<Rc<SearchNode>>
where
    F: FnMut(Progress),
{
    transitions.check_compatible(start_node.state())?;
    let start = Rc::new(start_node);
    debug!(
        "IDS: depth limits {}..{} on {2}x{2} grid",
        initial_depth,
        final_depth,
        start.state().size()
    );

    let mut expanded = 0;
    for limit in initial_depth..final_depth {
        on_progress(Progress {
            depth: Some(limit),
            frontier_len: 0,
            visited_len: 0,
        });
        trace!("IDS: trying depth limit {}", limit);
        if let Some(found) = depth_limited(&start, transitions, limit, &mut expanded) {
            debug!(
                "IDS: solution at depth {:?} with limit {}",
                found.depth(),
                limit
            );
            return Ok(found);
        }
    }

    debug!("IDS: no solution below depth {}", final_depth);
    Err(SearchError::Exhausted { expanded })
}

/// Depth-limited DFS. `None` means nothing terminal within `limit` transitions.
///
/// Runs on an explicit stack of `(node, next transition index)` frames. Visiting
/// order matches the recursive formulation: a node is tested when generated, and
/// its children are tried in transition order until one succeeds.
fn depth_limited(
    start: &Rc<SearchNode>,
    transitions: &TransitionSet,
    limit: u32,
    expanded: &mut usize,
) -> Option<Rc<SearchNode>> {
    if start.is_final() {
        return Some(Rc::clone(start));
    }
    if limit == 0 {
        return None;
    }

    let coords = transitions.coords();
    let limit = limit as usize;
    let mut stack: Vec<(Rc<SearchNode>, usize)> = vec![(Rc::clone(start), 0)];

    while let Some((node, next_idx)) = stack.last_mut() {
        if *next_idx == coords.len() {
            stack.pop();
            continue;
        }
        if *next_idx == 0 {
            *expanded += 1;
        }
        let coord = coords[*next_idx];
        *next_idx += 1;

        let child = Rc::new(node.child(coord));
        if child.is_final() {
            return Some(child);
        }
        // The frame count is the child's depth below the start node.
        if stack.len() < limit {
            stack.push((child, 0));
        }
    }
    None
}

/// Frontier entry ordered by score, then by insertion sequence.
struct Scored {
    score: u32,
    seq: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for Scored {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scored {}

impl PartialOrd for Scored {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scored {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.score, self.seq).cmp(&(other.score, other.seq))
    }
}

/// Greedy best-first search guided by `heuristic`.
///
/// Each step expands the frontier node with the lowest score. Ties go to the node
/// inserted first, so a constant heuristic expands in breadth-first order and the
/// result is reproducible. Path cost is ignored; the solution is not guaranteed to
/// be the shortest.
pub fn solve_best_first<H, F>(
    start_node: SearchNode,
    transitions: &TransitionSet,
    heuristic: H,
    mut on_progress: F,
) -> SearchResult<Rc<SearchNode>>
where
    H: Fn(&GridState) -> u32,
    F: FnMut(Progress),
{
    transitions.check_compatible(start_node.state())?;
    let start = Rc::new(start_node);
    if start.is_final() {
        return Ok(start);
    }
    debug!("BestFS: starting on {0}x{0} grid", start.state().size());

    let mut visited: HashSet<GridState> = HashSet::new();
    visited.insert(start.state().clone());
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    frontier.push(Reverse(Scored {
        score: heuristic(start.state()),
        seq,
        node: start,
    }));
    let mut expanded = 0;

    while let Some(Reverse(Scored { score, node: current, .. })) = frontier.pop() {
        expanded += 1;
        on_progress(Progress {
            depth: current.depth(),
            frontier_len: frontier.len(),
            visited_len: visited.len(),
        });
        trace!(
            "BestFS: expanding node at depth {:?} with score {}",
            current.depth(),
            score
        );

        for coord in transitions.iter() {
            let next = current.child(coord);
            if visited.contains(next.state()) {
                continue;
            }
            if next.is_final() {
                debug!(
                    "BestFS: solution at depth {:?} after {} expansions",
                    next.depth(),
                    expanded
                );
                return Ok(Rc::new(next));
            }
            visited.insert(next.state().clone());
            seq += 1;
            frontier.push(Reverse(Scored {
                score: heuristic(next.state()),
                seq,
                node: Rc::new(next),
            }));
        }
    }

    debug!("BestFS: frontier empty after {} expansions", expanded);
    Err(SearchError::Exhausted { expanded })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{count_zeros, neighbour_weighted_zeros, zero_heuristic};
    use crate::node::{path_to_root, solution_moves};
    use crate::utils::grid_from_str_array;
    use std::collections::BTreeSet;

    fn no_progress(_: Progress) {}

    /// Replays `node`'s moves from all zeros and checks they land on its state.
    fn assert_consistent_path(node: &Rc<SearchNode>) {
        let path = path_to_root(node);
        assert_eq!(path.len() as u32, node.depth().unwrap() + 1);
        let mut grid = path[0].state().clone();
        for coord in solution_moves(node) {
            grid = grid.transition(coord).unwrap();
        }
        assert_eq!(&grid, node.state());
    }

    /// A single lit corner cannot be reached on a 4x4 board.
    fn unreachable_4x4_goal() -> GridState {
        grid_from_str_array(&["1000", "0000", "0000", "0000"]).unwrap()
    }

    #[test_log::test]
    fn test_bfs_one_by_one() {
        let result = solve_bfs(SearchNode::new_initial_node(1), &TransitionSet::new(1), no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(1));
        assert_eq!(solution_moves(&result), vec![(0, 0)]);
    }

    #[test_log::test]
    fn test_bfs_two_by_two_needs_every_cell() {
        let result = solve_bfs(SearchNode::new_initial_node(2), &TransitionSet::new(2), no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(4));
        let pressed: BTreeSet<_> = solution_moves(&result).into_iter().collect();
        assert_eq!(pressed.len(), 4);
        assert_consistent_path(&result);
    }

    #[test_log::test]
    fn test_bfs_three_by_three_minimum_depth() {
        let result = solve_bfs(SearchNode::new_initial_node(3), &TransitionSet::new(3), no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(5));
        assert_consistent_path(&result);
    }

    #[test_log::test]
    fn test_bfs_root_already_final() {
        let root = SearchNode::new_root(GridState::new_ones(3), None);
        let result = solve_bfs(root, &TransitionSet::new(3), no_progress).unwrap();
        assert_eq!(result.depth(), Some(0));
        assert!(result.parent().is_none());
    }

    #[test_log::test]
    fn test_bfs_exhausts_on_unreachable_goal() {
        let goal = unreachable_4x4_goal();
        assert_eq!(goal.count_ones(), 1);
        let root = SearchNode::with_goal(4, goal).unwrap();
        let result = solve_bfs(root, &TransitionSet::new(4), no_progress);
        // 2^12 states are reachable on a 4x4 board.
        assert_eq!(result.unwrap_err(), SearchError::Exhausted { expanded: 4096 });
    }

    #[test_log::test]
    fn test_bfs_toward_explicit_goal() {
        let goal = GridState::new_zeros(3).transition((0, 2)).unwrap();
        let root = SearchNode::with_goal(3, goal.clone()).unwrap();
        let result = solve_bfs(root, &TransitionSet::new(3), no_progress).unwrap();
        assert_eq!(result.state(), &goal);
        assert_eq!(solution_moves(&result), vec![(0, 2)]);
    }

    #[test_log::test]
    fn test_bfs_reports_progress() {
        let mut reports = Vec::new();
        solve_bfs(SearchNode::new_initial_node(2), &TransitionSet::new(2), |p| reports.push(p)).unwrap();
        assert!(!reports.is_empty());
        assert_eq!(reports[0].depth, Some(0));
        assert_eq!(reports[0].visited_len, 1);
        assert!(reports.windows(2).all(|w| w[0].depth <= w[1].depth));
    }

    #[test_log::test]
    fn test_mismatched_transition_set_is_rejected() {
        let result = solve_bfs(SearchNode::new_initial_node(3), &TransitionSet::new(2), no_progress);
        assert_eq!(
            result.unwrap_err(),
            SearchError::TransitionSetMismatch { expected: 3, found: 2 }
        );
        let result = solve_ids(SearchNode::new_initial_node(3), &TransitionSet::new(2), 0, 3, no_progress);
        assert!(matches!(result, Err(SearchError::TransitionSetMismatch { .. })));
    }

    #[test_log::test]
    fn test_ids_one_by_one() {
        let result = solve_ids(SearchNode::new_initial_node(1), &TransitionSet::new(1), 0, 2, no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(1));
    }

    #[test_log::test]
    fn test_ids_two_by_two() {
        let result = solve_ids(SearchNode::new_initial_node(2), &TransitionSet::new(2), 0, 6, no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(4));
        // Fixed enumeration order makes the first hit deterministic.
        assert_eq!(solution_moves(&result), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_consistent_path(&result);
    }

    #[test_log::test]
    fn test_ids_three_by_three() {
        let result = solve_ids(SearchNode::new_initial_node(3), &TransitionSet::new(3), 3, 6, no_progress).unwrap();
        assert!(result.is_final());
        assert_eq!(result.depth(), Some(5));
        assert_consistent_path(&result);
    }

    #[test_log::test]
    fn test_ids_exhausts_when_limit_too_small() {
        let result = solve_ids(SearchNode::new_initial_node(2), &TransitionSet::new(2), 0, 3, no_progress);
        assert!(matches!(result, Err(SearchError::Exhausted { .. })));
    }

    #[test_log::test]
    fn test_ids_empty_depth_range() {
        let result = solve_ids(SearchNode::new_initial_node(1), &TransitionSet::new(1), 2, 2, no_progress);
        assert_eq!(result.unwrap_err(), SearchError::Exhausted { expanded: 0 });
    }

    #[test_log::test]
    fn test_ids_returns_final_root_at_any_limit() {
        let root = SearchNode::new_root(GridState::new_ones(2), None);
        let result = solve_ids(root, &TransitionSet::new(2), 0, 1, no_progress).unwrap();
        assert_eq!(result.depth(), Some(0));
    }

    #[test_log::test]
    fn test_ids_reports_each_limit() {
        let mut limits = Vec::new();
        solve_ids(SearchNode::new_initial_node(2), &TransitionSet::new(2), 1, 10, |p| limits.push(p.depth)).unwrap();
        assert_eq!(limits, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test_log::test]
    fn test_best_first_default_heuristic() {
        let result = solve_best_first(
            SearchNode::new_initial_node(3),
            &TransitionSet::new(3),
            neighbour_weighted_zeros,
            no_progress,
        )
        .unwrap();
        assert!(result.is_final());
        assert_consistent_path(&result);
    }

    #[test_log::test]
    fn test_best_first_count_zeros() {
        let result = solve_best_first(
            SearchNode::new_initial_node(3),
            &TransitionSet::new(3),
            count_zeros,
            no_progress,
        )
        .unwrap();
        assert!(result.is_final());
        assert!(result.depth().unwrap() >= 5);
    }

    #[test_log::test]
    fn test_best_first_zero_heuristic_matches_bfs() {
        for n in 1..4 {
            let transitions = TransitionSet::new(n);
            let bfs = solve_bfs(SearchNode::new_initial_node(n), &transitions, no_progress).unwrap();
            let best = solve_best_first(
                SearchNode::new_initial_node(n),
                &transitions,
                zero_heuristic,
                no_progress,
            )
            .unwrap();
            assert_eq!(best.depth(), bfs.depth());
            assert_eq!(solution_moves(&best), solution_moves(&bfs));
        }
    }

    #[test_log::test]
    fn test_best_first_accepts_closures() {
        let goal = GridState::new_zeros(3).transition((1, 1)).unwrap();
        let target = goal.clone();
        let mismatches = move |state: &GridState| {
            state
                .rows()
                .flatten()
                .zip(target.rows().flatten())
                .filter(|(a, b)| a != b)
                .count() as u32
        };
        let root = SearchNode::with_goal(3, goal).unwrap();
        let result = solve_best_first(root, &TransitionSet::new(3), mismatches, no_progress).unwrap();
        assert_eq!(solution_moves(&result), vec![(1, 1)]);
    }

    #[test_log::test]
    fn test_best_first_exhausts_on_unreachable_goal() {
        let root = SearchNode::with_goal(4, unreachable_4x4_goal()).unwrap();
        let result = solve_best_first(root, &TransitionSet::new(4), neighbour_weighted_zeros, no_progress);
        assert_eq!(result.unwrap_err(), SearchError::Exhausted { expanded: 4096 });
    }

    #[test_log::test]
    fn test_run_search_dispatch() {
        let transitions = TransitionSet::new(2);
        let strategies = [
            Strategy::Bfs,
            Strategy::Ids { initial_depth: 0, final_depth: 5 },
            Strategy::BestFirst { heuristic: neighbour_weighted_zeros },
        ];
        for strategy in strategies {
            let result = run_search(strategy, SearchNode::new_initial_node(2), &transitions).unwrap();
            assert!(result.is_final(), "{:?} returned a non-final node", strategy);
            assert_consistent_path(&result);
        }
    }
}
