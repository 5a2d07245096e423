//! Search nodes, the goal test and path reconstruction.
//!
//! Nodes form an implicit tree through their parent links. Parents are shared via
//! `Rc`: a node is immutable once built, and it is always created after its parent,
//! so the links can never form a cycle.
use crate::engine::{Coord, GridState};
use crate::error::{SearchError, SearchResult};
use std::fmt;
use std::rc::Rc;

/// A grid state together with the metadata the strategies need.
#[derive(Debug)]
pub struct SearchNode {
    state: GridState,
    parent: Option<Rc<SearchNode>>,
    parent_transition: Option<Coord>,
    depth: Option<u32>,
    goal_state: Option<Rc<GridState>>,
}

impl SearchNode {
    /// Builds the all-zeros root for a `size`×`size` puzzle, at depth 0, with the
    /// default all-ones goal.
    ///
    /// # Examples
    /// ```
    /// use lights_out_solver::node::SearchNode;
    /// let root = SearchNode::new_initial_node(3);
    /// assert_eq!(root.depth(), Some(0));
    /// assert!(root.parent().is_none());
    /// assert!(!root.is_final());
    /// ```
    pub fn new_initial_node(size: usize) -> Self {
        SearchNode::new_root(GridState::new_zeros(size), None)
    }

    /// Builds the all-zeros root for a search toward an explicit `goal`.
    ///
    /// # Returns
    /// * `Err(SearchError::InvalidGoalState)` if `goal` is not `size`×`size`.
    pub fn with_goal(size: usize, goal: GridState) -> SearchResult<Self> {
        if goal.size() != size {
            return Err(SearchError::InvalidGoalState {
                expected: size,
                rows: goal.size(),
                cols: goal.size(),
            });
        }
        Ok(SearchNode::new_root(
            GridState::new_zeros(size),
            Some(Rc::new(goal)),
        ))
    }

    /// Builds a root node over an arbitrary starting state.
    pub fn new_root(state: GridState, goal_state: Option<Rc<GridState>>) -> Self {
        SearchNode {
            state,
            parent: None,
            parent_transition: None,
            depth: Some(0),
            goal_state,
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn parent(&self) -> Option<&Rc<SearchNode>> {
        self.parent.as_ref()
    }

    /// The coordinate whose transition produced this node from its parent.
    pub fn parent_transition(&self) -> Option<Coord> {
        self.parent_transition
    }

    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    pub fn goal_state(&self) -> Option<&GridState> {
        self.goal_state.as_deref()
    }

    /// Goal test: equality with the explicit goal if one is set, otherwise all ones.
    pub fn is_final(&self) -> bool {
        is_final(&self.state, self.goal_state())
    }

    /// Applies the transition at `coord` to this node, producing its child.
    ///
    /// # Returns
    /// * `Err(SearchError::InvalidCoordinate)` if `coord` is outside the grid.
    pub fn transition(self: &Rc<Self>, coord: Coord) -> SearchResult<SearchNode> {
        self.state.check_coord(coord)?;
        Ok(self.child(coord))
    }

    /// Child construction for coordinates taken from a compatible `TransitionSet`.
    pub(crate) fn child(self: &Rc<Self>, coord: Coord) -> SearchNode {
        SearchNode {
            state: self.state.toggled(coord),
            parent: Some(Rc::clone(self)),
            parent_transition: Some(coord),
            depth: self.depth.map(|d| d + 1),
            goal_state: self.goal_state.clone(),
        }
    }
}

impl fmt::Display for SearchNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

/// Returns `true` if `state` is terminal.
///
/// Without a `goal_state`, a state is terminal when every cell is 1. With one, the
/// state must match it cell by cell.
pub fn is_final(state: &GridState, goal_state: Option<&GridState>) -> bool {
    match goal_state {
        Some(goal) => state == goal,
        None => state.is_all_ones(),
    }
}

/// Walks parent links from `node` back to the root and returns the chain root first.
///
/// # Examples
/// ```
/// use std::rc::Rc;
/// use lights_out_solver::node::{path_to_root, SearchNode};
/// let root = Rc::new(SearchNode::new_initial_node(2));
/// let path = path_to_root(&root);
/// assert_eq!(path.len(), 1);
/// ```
pub fn path_to_root(node: &Rc<SearchNode>) -> Vec<Rc<SearchNode>> {
    let mut nodes = Vec::new();
    let mut current = Some(Rc::clone(node));
    while let Some(n) = current {
        current = n.parent.clone();
        nodes.push(n);
    }
    nodes.reverse();
    nodes
}

/// The transitions along the path from the root to `node`, in application order.
pub fn solution_moves(node: &Rc<SearchNode>) -> Vec<Coord> {
    path_to_root(node)
        .iter()
        .filter_map(|n| n.parent_transition)
        .collect()
}
