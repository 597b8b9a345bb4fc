//! Search nodes and the tree they form.

use crate::state::State;

/// Index of a node inside its [`SearchTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A state reached at path cost `g`, with heuristic estimate `h`.
///
/// `f = g + h` is fixed at construction. A cheaper path to the same state
/// produces a new node rather than editing this one.
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: State,
    /// Slides taken from the start.
    pub g: u32,
    pub h: u32,
    pub f: u32,
    /// `None` for the start node.
    pub parent: Option<NodeId>,
}

impl SearchNode {
    pub fn new(state: State, g: u32, h: u32, parent: Option<NodeId>) -> Self {
        Self {
            state,
            g,
            h,
            f: g + h,
            parent,
        }
    }
}

/// Arena owning every node created during one search. Children point at
/// their parent by [`NodeId`]; parents hold nothing.
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks predecessor links from `id` back to the start.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &SearchNode> + '_ {
        std::iter::successors(Some(self.get(id)), move |node| {
            node.parent.map(|parent| self.get(parent))
        })
    }

    /// Nodes from the start to `id`, in order.
    pub fn path_to(&self, id: NodeId) -> Vec<SearchNode> {
        let mut path: Vec<SearchNode> = self.ancestors(id).cloned().collect();
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Move;

    #[test]
    fn f_is_fixed_at_construction() {
        let node = SearchNode::new(State::goal(3).unwrap(), 4, 3, None);
        assert_eq!(node.f, 7);
    }

    #[test]
    fn path_walks_back_to_the_root() {
        let start = State::goal(3).unwrap();
        let mid = start.slide(Move::Up).unwrap();
        let end = mid.slide(Move::Left).unwrap();

        let mut tree = SearchTree::new();
        let a = tree.insert(SearchNode::new(start.clone(), 0, 0, None));
        let b = tree.insert(SearchNode::new(mid.clone(), 1, 0, Some(a)));
        let c = tree.insert(SearchNode::new(end.clone(), 2, 0, Some(b)));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.ancestors(c).count(), 3);
        let states: Vec<State> = tree.path_to(c).into_iter().map(|n| n.state).collect();
        assert_eq!(states, vec![start, mid, end]);
    }
}
