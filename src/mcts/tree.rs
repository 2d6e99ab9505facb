//! Arena-backed search tree shared by the minimax, Monte Carlo and AlphaZero searches.
//!
//! Nodes live in one `Vec` and refer to each other by index: the parent link is a
//! plain [`NodeId`] that never owns anything, while each node lists its children as
//! `(Action, NodeId)` pairs in legal-move order. Children are created once, on first
//! expansion, so the arena is a strict tree and dropping it releases everything.

use crate::game::{Action, State};
use std::collections::VecDeque;

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node<S> {
    pub state: State,
    pub parent: Option<NodeId>,
    pub children: Vec<(Action, NodeId)>,
    pub stats: S,
}

#[derive(Debug, Clone)]
pub struct SearchTree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> SearchTree<S> {
    pub const ROOT: NodeId = 0;

    pub fn new(state: State, stats: S) -> Self {
        Self {
            nodes: vec![Node {
                state,
                parent: None,
                children: Vec::new(),
                stats,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id]
    }

    pub fn state(&self, id: NodeId) -> &State {
        &self.nodes[id].state
    }

    pub fn stats(&self, id: NodeId) -> &S {
        &self.nodes[id].stats
    }

    pub fn stats_mut(&mut self, id: NodeId) -> &mut S {
        &mut self.nodes[id].stats
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[(Action, NodeId)] {
        &self.nodes[id].children
    }

    pub fn child(&self, id: NodeId, action: Action) -> Option<NodeId> {
        self.children(id)
            .iter()
            .find(|(a, _)| *a == action)
            .map(|&(_, child)| child)
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id].children.is_empty()
    }

    /// Creates one child per legal move, unless the node already has children.
    ///
    /// Terminal states have no legal move and stay childless. Returns the ids of the
    /// children created by this call, empty when nothing was created.
    pub fn add_children(
        &mut self,
        id: NodeId,
        mut make_stats: impl FnMut(&State, &State) -> S,
    ) -> Vec<NodeId> {
        if self.has_children(id) {
            return Vec::new();
        }
        let parent_state = self.nodes[id].state;
        let mut children = Vec::new();
        for (action, state) in parent_state.successors() {
            let child = self.nodes.len();
            let stats = make_stats(&parent_state, &state);
            self.nodes.push(Node {
                state,
                parent: Some(id),
                children: Vec::new(),
                stats,
            });
            children.push((action, child));
        }
        let created = children.iter().map(|&(_, child)| child).collect();
        self.nodes[id].children = children;
        created
    }

    /// `id` followed by its ancestors up to the root.
    pub fn path_to_root(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&node| self.parent(node))
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.path_to_root(id).count() - 1
    }

    /// Finds the node holding `target` in the subtree of `from`.
    ///
    /// The stone count grows by one per ply, so subtrees whose states already hold
    /// as many stones as `target` are only compared, never descended into.
    /// `None` is the normal answer when `target` was never explored.
    pub fn find_state_from(&self, from: NodeId, target: &State) -> Option<NodeId> {
        let node = &self.nodes[from];
        let stones = node.state.number_of_stones();
        let wanted = target.number_of_stones();
        if stones < wanted {
            node.children
                .iter()
                .find_map(|&(_, child)| self.find_state_from(child, target))
        } else if stones == wanted && node.state == *target {
            Some(from)
        } else {
            None
        }
    }

    pub fn find_state(&self, target: &State) -> Option<NodeId> {
        self.find_state_from(Self::ROOT, target)
    }

    /// Keeps only the subtree under `id`, which becomes the new root.
    ///
    /// Ids are reassigned breadth first, so every `NodeId` held outside the tree
    /// is invalid afterwards.
    pub fn reroot(&mut self, id: NodeId) {
        if id == Self::ROOT {
            return;
        }
        let mut slots: Vec<Option<Node<S>>> =
            std::mem::take(&mut self.nodes).into_iter().map(Some).collect();
        let mut queue = VecDeque::from([(id, None)]);
        let mut assigned = 1;
        while let Some((old, parent)) = queue.pop_front() {
            let Some(mut node) = slots[old].take() else {
                continue;
            };
            let new_id = self.nodes.len();
            node.parent = parent;
            for (_, child) in node.children.iter_mut() {
                queue.push_back((*child, Some(new_id)));
                *child = assigned;
                assigned += 1;
            }
            self.nodes.push(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> SearchTree<u32> {
        SearchTree::new(State::empty(), 0)
    }

    #[test]
    fn test_add_children_once_per_legal_move() {
        let mut tree = tree();
        let created = tree.add_children(SearchTree::<u32>::ROOT, |_, _| 1);
        assert_eq!(created.len(), 16);
        assert_eq!(tree.children(tree.root()).len(), 16);
        assert!(tree.add_children(tree.root(), |_, _| 2).is_empty());
        assert_eq!(tree.len(), 17);
        for &(action, child) in tree.children(tree.root()) {
            assert_eq!(tree.parent(child), Some(tree.root()));
            assert_eq!(*tree.state(child), State::empty().take_action(action).unwrap());
        }
    }

    #[test]
    fn test_terminal_node_has_no_children() {
        let mut state = State::empty();
        for (x, y) in [(0, 0), (1, 0), (0, 0), (1, 0), (0, 0), (1, 0), (0, 0)] {
            state = state.take_action(Action::new(x, y)).unwrap();
        }
        let mut tree = SearchTree::new(state, 0u32);
        assert!(tree.add_children(tree.root(), |_, _| 0).is_empty());
        assert!(!tree.has_children(tree.root()));
    }

    #[test]
    fn test_find_state_prunes_by_stone_count() {
        let mut tree = tree();
        tree.add_children(tree.root(), |_, _| 0);
        let first = tree.child(tree.root(), Action::new(2, 1)).unwrap();
        tree.add_children(first, |_, _| 0);

        let target = State::empty()
            .take_action(Action::new(2, 1))
            .unwrap()
            .take_action(Action::new(3, 3))
            .unwrap();
        let found = tree.find_state(&target).unwrap();
        assert_eq!(*tree.state(found), target);
        assert_eq!(tree.depth(found), 2);

        let unexplored = State::empty()
            .take_action(Action::new(0, 0))
            .unwrap()
            .take_action(Action::new(3, 3))
            .unwrap();
        assert_eq!(tree.find_state(&unexplored), None);
    }

    #[test]
    fn test_reroot_keeps_subtree_and_relinks_parents() {
        let mut tree = tree();
        tree.add_children(tree.root(), |_, _| 0);
        let chosen = tree.child(tree.root(), Action::new(1, 2)).unwrap();
        tree.add_children(chosen, |_, _| 0);
        *tree.stats_mut(chosen) = 7;
        let chosen_state = *tree.state(chosen);

        tree.reroot(chosen);

        assert_eq!(tree.len(), 17);
        assert_eq!(*tree.state(tree.root()), chosen_state);
        assert_eq!(*tree.stats(tree.root()), 7);
        assert_eq!(tree.parent(tree.root()), None);
        for &(action, child) in tree.children(tree.root()) {
            assert_eq!(tree.parent(child), Some(tree.root()));
            assert_eq!(*tree.state(child), chosen_state.take_action(action).unwrap());
        }
    }
}
