//! Pure Monte Carlo tree search: UCT selection and uniformly random playouts.

use crate::game::{Action, Color, State};
use crate::mcts::tree::{NodeId, SearchTree};
use rand::{Rng, RngExt};

/// Added to visit counts in UCT so unvisited children do not divide by zero.
pub const UCT_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonteCarloStats {
    /// Set by the first expansion.
    pub is_played: bool,
    pub visit_count: u32,
    pub white_wins: u32,
    pub brown_wins: u32,
}

impl MonteCarloStats {
    pub fn wins(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_wins,
            Color::Brown => self.brown_wins,
        }
    }
}

/// Monte Carlo search tree with its exploration weight and random source.
#[derive(Debug, Clone)]
pub struct MonteCarloSearch<R> {
    tree: SearchTree<MonteCarloStats>,
    exploration: f64,
    rng: R,
}

impl<R: Rng> MonteCarloSearch<R> {
    pub fn new(state: State, exploration: f64, rng: R) -> Self {
        Self {
            tree: SearchTree::new(state, MonteCarloStats::default()),
            exploration,
            rng,
        }
    }

    pub fn tree(&self) -> &SearchTree<MonteCarloStats> {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn stats(&self, id: NodeId) -> &MonteCarloStats {
        self.tree.stats(id)
    }

    /// One select → expand → simulate → propagate round from the root.
    pub fn search(&mut self) {
        let selected = self.select(self.root());
        let expanded = self.expand(selected);
        let final_state = self.simulate(expanded);
        self.propagate(expanded, &final_state);

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "mc search: expanded depth {} winner {:?} root visits {}",
                self.tree.depth(expanded),
                final_state.winner(),
                self.stats(self.root()).visit_count
            );
        }
    }

    /// Descends by UCT from `id` to the first node that is unplayed or terminal.
    pub fn select(&self, id: NodeId) -> NodeId {
        let mut current = id;
        loop {
            let stats = self.tree.stats(current);
            if !stats.is_played || self.tree.state(current).is_end_of_game() {
                return current;
            }
            match self.best_uct_child(current) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    fn best_uct_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &(_, child) in self.tree.children(id) {
            let uct = self.uct(child);
            if best.is_none_or(|(_, best_uct)| uct > best_uct) {
                best = Some((child, uct));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Upper confidence bound of a non-root node:
    /// `reward / n + exploration * sqrt(2 ln N / n)` with `n` offset by [`UCT_EPSILON`].
    pub fn uct(&self, id: NodeId) -> f64 {
        let stats = self.tree.stats(id);
        let visits = stats.visit_count as f64 + UCT_EPSILON;
        let parent_visits = self
            .tree
            .parent(id)
            .map_or(1, |parent| self.tree.stats(parent).visit_count.max(1));
        let value = self.reward(id) as f64 / visits;
        let exploration = ((2.0 * (parent_visits as f64).ln()) / visits).sqrt();
        value + self.exploration * exploration
    }

    /// Wins of the side that moved into `id`, i.e. the opponent of its next mover.
    fn reward(&self, id: NodeId) -> u32 {
        let mover = self.tree.state(id).next_color().other();
        self.tree.stats(id).wins(mover)
    }

    /// Marks `id` played and creates its children. Returns a random child that was
    /// never simulated, or `id` itself for terminal states.
    pub fn expand(&mut self, id: NodeId) -> NodeId {
        self.tree.stats_mut(id).is_played = true;
        if self.tree.state(id).is_end_of_game() {
            return id;
        }
        self.tree.add_children(id, |_, _| MonteCarloStats::default());

        let mut candidates = self.unvisited_children(id);
        if candidates.is_empty() {
            candidates = self.tree.children(id).iter().map(|&(_, c)| c).collect();
        }
        candidates[self.rng.random_range(0..candidates.len())]
    }

    pub fn unvisited_children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .children(id)
            .iter()
            .map(|&(_, child)| child)
            .filter(|&child| self.tree.stats(child).visit_count == 0)
            .collect()
    }

    /// Plays uniformly random moves from the state of `id` until the game ends.
    pub fn simulate(&mut self, id: NodeId) -> State {
        let mut state = *self.tree.state(id);
        while !state.is_end_of_game() {
            let actions = state.allowed_actions();
            let action = actions[self.rng.random_range(0..actions.len())];
            state = state.place(action);
        }
        state
    }

    /// Counts the playout ending in `final_state` at `id` and every ancestor.
    pub fn propagate(&mut self, id: NodeId, final_state: &State) {
        let winner = final_state.winner();
        let path: Vec<NodeId> = self.tree.path_to_root(id).collect();
        for node in path {
            let stats = self.tree.stats_mut(node);
            stats.visit_count += 1;
            stats.white_wins += u32::from(winner == Some(Color::White));
            stats.brown_wins += u32::from(winner == Some(Color::Brown));
        }
    }

    /// The most visited move at the root, first in move order on ties.
    pub fn best_action(&self) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for &(action, child) in self.tree.children(self.root()) {
            let visits = self.tree.stats(child).visit_count;
            if best.is_none_or(|(_, best_visits)| visits > best_visits) {
                best = Some((action, visits));
            }
        }
        best.map(|(action, _)| action)
    }

    pub fn find_state(&self, target: &State) -> Option<NodeId> {
        self.tree.find_state(target)
    }

    /// Drops everything outside the subtree of `id`, which becomes the root.
    pub fn reroot(&mut self, id: NodeId) {
        self.tree.reroot(id);
    }
}
