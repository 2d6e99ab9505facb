//! Exhaustive minimax over a [`SearchTree`].
//!
//! Every node starts with the heuristic value of its state for `player_color`. Once
//! a node has children its value becomes the maximum of their values when
//! `player_color` is to move there and the minimum otherwise; terminal nodes keep
//! their heuristic value, which is already the game result.
//!
//! There is no internal depth limit: callers bound the tree through
//! [`MinimaxSearch::expand_to_depth`] or by choosing which nodes to expand.

use crate::game::analyzer::player_value;
use crate::game::{Action, Color, State};
use crate::mcts::tree::{NodeId, SearchTree};

#[derive(Debug, Clone, PartialEq)]
pub struct MinimaxStats {
    pub value: f64,
    /// The side whose value is optimised everywhere in the tree.
    pub player_color: Color,
    /// The side to move at this node.
    pub state_color: Color,
}

#[derive(Debug, Clone)]
pub struct MinimaxSearch {
    tree: SearchTree<MinimaxStats>,
}

impl MinimaxSearch {
    /// The root is a position where `player_color` moves.
    pub fn new(state: State, player_color: Color) -> Self {
        let stats = MinimaxStats {
            value: player_value(&state, player_color),
            player_color,
            state_color: player_color,
        };
        Self {
            tree: SearchTree::new(state, stats),
        }
    }

    pub fn tree(&self) -> &SearchTree<MinimaxStats> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn value(&self, id: NodeId) -> f64 {
        self.tree.stats(id).value
    }

    /// Creates the children of `id` and refreshes the values on the path to the root.
    pub fn expand(&mut self, id: NodeId) -> Vec<NodeId> {
        let created = self.expand_deferred(id);
        self.propagate_value(id);
        created
    }

    /// Creates the children of `id` without touching any value.
    ///
    /// Call [`MinimaxSearch::refresh_values`] once the expansions are done.
    pub fn expand_deferred(&mut self, id: NodeId) -> Vec<NodeId> {
        let MinimaxStats {
            player_color,
            state_color,
            ..
        } = *self.tree.stats(id);
        self.tree.add_children(id, |_, child| MinimaxStats {
            value: player_value(child, player_color),
            player_color,
            state_color: state_color.other(),
        })
    }

    /// Recomputes the value of `id` from its children, then of each ancestor.
    pub fn propagate_value(&mut self, id: NodeId) {
        let path: Vec<NodeId> = self.tree.path_to_root(id).collect();
        for node in path {
            self.recompute_value(node);
        }
    }

    /// Recomputes every value in the subtree of `id` bottom-up, then its ancestors.
    pub fn refresh_values(&mut self, id: NodeId) {
        let mut subtree = vec![id];
        let mut next = 0;
        while next < subtree.len() {
            let node = subtree[next];
            subtree.extend(self.tree.children(node).iter().map(|&(_, child)| child));
            next += 1;
        }
        for &node in subtree.iter().rev() {
            self.recompute_value(node);
        }
        if let Some(parent) = self.tree.parent(id) {
            self.propagate_value(parent);
        }
    }

    fn recompute_value(&mut self, id: NodeId) {
        if self.tree.state(id).is_end_of_game() || !self.tree.has_children(id) {
            return;
        }
        let maximize = self.maximizes(id);
        let values = self
            .tree
            .children(id)
            .iter()
            .map(|&(_, child)| self.tree.stats(child).value);
        let value = if maximize {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        };
        self.tree.stats_mut(id).value = value;
    }

    fn maximizes(&self, id: NodeId) -> bool {
        let stats = self.tree.stats(id);
        stats.state_color == stats.player_color
    }

    /// Expands every node down to `depth` plies below the root.
    ///
    /// With `eager` each expansion refreshes its whole path; otherwise values are
    /// refreshed once at the end, which visits every node exactly once.
    pub fn expand_to_depth(&mut self, depth: usize, eager: bool) {
        let mut frontier = vec![self.root()];
        for _ in 0..depth {
            let mut next = Vec::new();
            for node in frontier {
                if eager {
                    self.expand(node);
                } else {
                    self.expand_deferred(node);
                }
                next.extend(self.tree.children(node).iter().map(|&(_, child)| child));
            }
            frontier = next;
        }
        if !eager {
            self.refresh_values(self.root());
        }
    }

    /// The child the side to move at `id` prefers: highest value when that side is
    /// `player_color`, lowest otherwise. Ties go to the first child in move order.
    pub fn best_child(&self, id: NodeId) -> Option<(Action, NodeId)> {
        let maximize = self.maximizes(id);
        let mut best: Option<(Action, NodeId, f64)> = None;
        for &(action, child) in self.tree.children(id) {
            let value = self.value(child);
            let better = match best {
                None => true,
                Some((_, _, best_value)) if maximize => value > best_value,
                Some((_, _, best_value)) => value < best_value,
            };
            if better {
                best = Some((action, child, value));
            }
        }
        best.map(|(action, child, _)| (action, child))
    }

    pub fn best_action(&self) -> Option<Action> {
        self.best_child(self.root()).map(|(action, _)| action)
    }
}
