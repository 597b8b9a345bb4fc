//! A* over sliding-tile states.
//!
//! [`solve`] gates on the parity check and then drives an [`AStarEngine`]
//! to completion. The engine can also be stepped one expansion at a time.

use std::fmt;
use tracing::{debug, error, info, trace};

use crate::error::SearchError;
use crate::frontier::{Admission, Explored, Frontier};
use crate::heuristic::Heuristic;
use crate::node::{NodeId, SearchNode, SearchTree};
use crate::solvability::{self, Solvability};
use crate::state::{Move, State};

/// Node counters for one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes newly added to the frontier, start included. Replacing a
    /// pending node with a cheaper one is not counted.
    pub generated: u64,
    /// Nodes taken off the frontier, goal included.
    pub expanded: u64,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expanded {}, generated {}", self.expanded, self.generated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start node pending, nothing expanded yet.
    Ready,
    Running,
    /// The goal was extracted from the frontier.
    Solved(NodeId),
    /// The frontier ran dry.
    Exhausted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Solved(_) | Phase::Exhausted)
    }
}

/// One A* search from a fixed start to the goal of the same size.
///
/// Owns its frontier, explored set and node arena; none of them outlive or
/// are shared beyond this search.
#[derive(Debug)]
pub struct AStarEngine {
    heuristic: Heuristic,
    tree: SearchTree,
    frontier: Frontier,
    explored: Explored,
    stats: SearchStats,
    phase: Phase,
}

impl AStarEngine {
    /// Seeds the frontier with the start node. The caller is expected to
    /// have checked solvability already; an unsolvable start ends in
    /// [`Phase::Exhausted`].
    pub fn new(start: State, heuristic: Heuristic) -> Self {
        let mut tree = SearchTree::new();
        let mut frontier = Frontier::new();
        let h = heuristic.estimate(&start);
        frontier.offer(SearchNode::new(start, 0, h, None), &mut tree);

        Self {
            heuristic,
            tree,
            frontier,
            explored: Explored::new(),
            stats: SearchStats {
                generated: 1,
                expanded: 0,
            },
            phase: Phase::Ready,
        }
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn explored(&self) -> &Explored {
        &self.explored
    }

    /// Extracts and expands one node. Does nothing once terminal.
    pub fn step(&mut self) -> Phase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        self.phase = Phase::Running;

        let Some(id) = self.frontier.pop(&self.tree) else {
            self.phase = Phase::Exhausted;
            return self.phase;
        };
        self.stats.expanded += 1;

        let current = self.tree.get(id);
        if current.state.is_goal() {
            self.phase = Phase::Solved(id);
            return self.phase;
        }

        let state = current.state.clone();
        let g = current.g + 1;
        trace!(g = current.g, h = current.h, f = current.f, "expanding");

        for (_, next) in state.successors() {
            if self.explored.contains(&next) {
                continue;
            }
            let h = self.heuristic.estimate(&next);
            let node = SearchNode::new(next, g, h, Some(id));
            match self.frontier.offer(node, &mut self.tree) {
                Admission::Inserted(_) => self.stats.generated += 1,
                Admission::Replaced { new, stale } => {
                    debug!(
                        old_g = self.tree.get(stale).g,
                        new_g = self.tree.get(new).g,
                        "replaced pending node with a cheaper path"
                    );
                }
                Admission::Superseded => {}
            }
        }
        self.explored.insert(state);

        self.phase
    }

    /// Steps until terminal and returns the goal node.
    pub fn run(&mut self) -> Result<NodeId, SearchError> {
        loop {
            match self.step() {
                Phase::Solved(id) => return Ok(id),
                Phase::Exhausted => {
                    error!(
                        heuristic = %self.heuristic,
                        expanded = self.stats.expanded,
                        generated = self.stats.generated,
                        "frontier exhausted before reaching the goal"
                    );
                    return Err(SearchError::Exhausted { stats: self.stats });
                }
                Phase::Ready | Phase::Running => {}
            }
        }
    }

    /// Nodes from the start to `goal`.
    pub fn path_to(&self, goal: NodeId) -> Vec<SearchNode> {
        self.tree.path_to(goal)
    }
}

/// An optimal path to the goal and how much work it took.
#[derive(Debug, Clone)]
pub struct Solution {
    pub heuristic: Heuristic,
    pub solvability: Solvability,
    /// Start node first, goal node last.
    pub path: Vec<SearchNode>,
    pub stats: SearchStats,
}

impl Solution {
    pub fn goal(&self) -> &SearchNode {
        // a solution path always holds at least the start node
        &self.path[self.path.len() - 1]
    }

    /// Number of slides, i.e. the goal's `g`.
    pub fn cost(&self) -> u32 {
        self.goal().g
    }

    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.path.iter().map(|node| &node.state)
    }

    /// Direction the blank travels on each step.
    pub fn moves(&self) -> Vec<Move> {
        self.path
            .windows(2)
            .filter_map(|pair| pair[0].state.move_to(&pair[1].state))
            .collect()
    }
}

/// Result of [`solve`] for a well-formed start state.
#[derive(Debug, Clone)]
pub enum Outcome {
    Solved(Solution),
    /// Rejected by the parity check; the search never ran.
    Unsolvable(Solvability),
}

/// Checks solvability, then runs A* from `start` with `heuristic`.
///
/// An unsolvable start is a normal [`Outcome::Unsolvable`]. A solvable start
/// whose search runs dry is reported as [`SearchError::Exhausted`].
pub fn solve(start: &State, heuristic: Heuristic) -> Result<Outcome, SearchError> {
    let solvability = solvability::check(start);
    if !solvability.solvable {
        info!(inversions = solvability.inversions, "puzzle is not solvable");
        return Ok(Outcome::Unsolvable(solvability));
    }

    info!(size = start.size(), %heuristic, "starting search");
    let mut engine = AStarEngine::new(start.clone(), heuristic);
    let goal = engine.run()?;
    let stats = engine.stats();
    let path = engine.path_to(goal);

    info!(
        moves = path.len() - 1,
        expanded = stats.expanded,
        generated = stats.generated,
        "search finished"
    );

    Ok(Outcome::Solved(Solution {
        heuristic,
        solvability,
        path,
        stats,
    }))
}
