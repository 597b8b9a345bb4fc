//! Open and closed sets for A*.
//!
//! The open set pairs a binary heap with an index from state to the node
//! currently pending for it. Decrease-key inserts the cheaper node and
//! repoints the index; the stale heap entry is skipped when it surfaces.

use rustc_hash::{FxHashMap, FxHashSet};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::node::{NodeId, SearchNode, SearchTree};
use crate::state::State;

/// Extraction order: lowest `f`, then lowest `h`, then lowest `g`, then the
/// earliest inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f: u32,
    pub h: u32,
    pub g: u32,
    pub order: u64,
}

/// `BinaryHeap` is a max-heap, so the key is wrapped in `Reverse`.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    id: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// What [`Frontier::offer`] did with a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The state was not pending; the node was added.
    Inserted(NodeId),
    /// The state was pending with a larger `f`; the new node took its place.
    Replaced { new: NodeId, stale: NodeId },
    /// The state was pending with an equal or smaller `f`; nothing changed.
    Superseded,
}

/// Pending nodes, at most one per state.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    pending: FxHashMap<State, (NodeId, u32)>,
    next_order: u64,
    high_water: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` unless a node for the same state is already pending at
    /// an equal or lower `f`. Accepted nodes are stored in `tree`.
    pub fn offer(&mut self, node: SearchNode, tree: &mut SearchTree) -> Admission {
        let stale = match self.pending.get(&node.state) {
            Some(&(_, f)) if f <= node.f => return Admission::Superseded,
            Some(&(id, _)) => Some(id),
            None => None,
        };

        let key = FrontierKey {
            f: node.f,
            h: node.h,
            g: node.g,
            order: self.next_order,
        };
        self.next_order += 1;

        let state = node.state.clone();
        let f = node.f;
        let id = tree.insert(node);
        self.pending.insert(state, (id, f));
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            id,
        });
        self.high_water = self.high_water.max(self.pending.len());

        match stale {
            Some(stale) => Admission::Replaced { new: id, stale },
            None => Admission::Inserted(id),
        }
    }

    /// Removes and returns the best pending node, skipping heap entries
    /// that were replaced.
    pub fn pop(&mut self, tree: &SearchTree) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            let state = &tree.get(entry.id).state;
            match self.pending.get(state) {
                Some(&(id, _)) if id == entry.id => {
                    self.pending.remove(state);
                    return Some(entry.id);
                }
                _ => continue,
            }
        }
        None
    }

    pub fn contains(&self, state: &State) -> bool {
        self.pending.contains_key(state)
    }

    /// `f` of the node pending for `state`.
    pub fn pending_f(&self, state: &State) -> Option<u32> {
        self.pending.get(state).map(|&(_, f)| f)
    }

    /// Number of pending states. Stale heap entries are not counted.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Largest number of states pending at once.
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}

/// States already expanded. Membership is permanent for one search.
#[derive(Debug, Default)]
pub struct Explored {
    states: FxHashSet<State>,
}

impl Explored {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `state` was already explored.
    pub fn insert(&mut self, state: State) -> bool {
        self.states.insert(state)
    }

    pub fn contains(&self, state: &State) -> bool {
        self.states.contains(state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
