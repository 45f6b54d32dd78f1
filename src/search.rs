//! Breadth-first reachability and A* cost search over any [`Graph`].
//!
//! Both searches poll an optional [`CancelToken`] once per frontier pop and
//! return [`Cancelled`] when it is raised. An unreachable goal is not an
//! error: [`cost_between`] reports it as [`UNREACHABLE`].

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::cancel::{self, CancelToken, Cancelled};
use crate::graph::{Graph, WeightedGraph};

/// Cost reported by [`cost_between`] when no path exists.
pub const UNREACHABLE: u64 = u64::MAX;

/// Lazy breadth-first traversal yielding `(node, hops)` in non-decreasing
/// hop order. Each node is yielded once.
pub struct BreadthFirst<'g, G: Graph> {
    graph: &'g G,
    frontier: VecDeque<(G::Node, usize)>,
    visited: FxHashSet<G::Node>,
    buf: Vec<G::Node>,
}

impl<G: Graph> BreadthFirst<'_, G> {
    /// Nodes discovered so far, including ones still queued.
    ///
    /// Once the iterator is exhausted this is the full reachable set.
    pub fn into_visited(self) -> FxHashSet<G::Node> {
        self.visited
    }
}

impl<G: Graph> Iterator for BreadthFirst<'_, G> {
    type Item = (G::Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, hops) = self.frontier.pop_front()?;

        self.buf.clear();
        self.graph.neighbors(&node, &mut self.buf);
        for next in self.buf.drain(..) {
            if self.visited.insert(next.clone()) {
                self.frontier.push_back((next, hops + 1));
            }
        }

        Some((node, hops))
    }
}

/// Starts a breadth-first traversal at `start`.
pub fn breadth_first<'g, G: Graph>(graph: &'g G, start: &G::Node) -> BreadthFirst<'g, G> {
    let mut visited = FxHashSet::default();
    visited.insert(start.clone());

    BreadthFirst {
        graph,
        frontier: VecDeque::from([(start.clone(), 0)]),
        visited,
        buf: Vec::new(),
    }
}

/// Returns every node reachable from `start`, including `start` itself.
#[tracing::instrument(level = "debug", skip_all)]
pub fn reachable<G: Graph>(
    graph: &G,
    start: &G::Node,
    cancel: Option<&CancelToken>,
) -> Result<FxHashSet<G::Node>, Cancelled> {
    let mut search = breadth_first(graph, start);
    let mut expanded = 0usize;

    loop {
        cancel::check(cancel)?;
        if search.next().is_none() {
            break;
        }
        expanded += 1;
    }

    tracing::debug!(expanded, "reachability search finished");
    Ok(search.into_visited())
}

/// Hop distance from the start of a simple cycle to its farthest node, given
/// the cycle's node set as returned by [`reachable`].
pub fn farthest_on_loop<N>(cycle: &FxHashSet<N>) -> usize {
    cycle.len() / 2
}

/// Splits `nodes` into regions of mutually reachable nodes.
///
/// Regions come out in the order their first member appears in `nodes`.
/// Meant for graphs whose edges are symmetric; on directed graphs a region
/// is what is reachable from its first member.
pub fn components<G, I>(
    graph: &G,
    nodes: I,
    cancel: Option<&CancelToken>,
) -> Result<Vec<FxHashSet<G::Node>>, Cancelled>
where
    G: Graph,
    I: IntoIterator<Item = G::Node>,
{
    let mut assigned: FxHashSet<G::Node> = FxHashSet::default();
    let mut regions = Vec::new();

    for node in nodes {
        if assigned.contains(&node) {
            continue;
        }
        let region = reachable(graph, &node, cancel)?;
        assigned.extend(region.iter().cloned());
        regions.push(region);
    }

    Ok(regions)
}

/// A node waiting in the A* frontier.
///
/// Ordered by `priority`, then by `sequence` so equal priorities pop in
/// insertion order.
struct FrontierEntry<N> {
    priority: u64,
    sequence: u64,
    cost: u64,
    node: N,
}

impl<N> PartialEq for FrontierEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<N> Eq for FrontierEntry<N> {}

impl<N> PartialOrd for FrontierEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N> Ord for FrontierEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.priority, self.sequence).cmp(&(other.priority, other.sequence))
    }
}

/// Minimal total cost from `start` to `goal`, or [`UNREACHABLE`].
///
/// `heuristic` estimates the remaining cost to `goal`; it must never
/// overestimate and must be consistent with the edge costs, otherwise the
/// first cost found may not be minimal. `|_| 0` is always safe.
#[tracing::instrument(level = "debug", skip_all)]
pub fn cost_between<G, H>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: H,
    cancel: Option<&CancelToken>,
) -> Result<u64, Cancelled>
where
    G: WeightedGraph,
    H: Fn(&G::Node) -> u64,
{
    let mut best: FxHashMap<G::Node, u64> = FxHashMap::default();
    let mut frontier = BinaryHeap::new();
    let mut buf = Vec::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    best.insert(start.clone(), 0);
    frontier.push(Reverse(FrontierEntry {
        priority: heuristic(start),
        sequence,
        cost: 0,
        node: start.clone(),
    }));

    while let Some(Reverse(entry)) = frontier.pop() {
        cancel::check(cancel)?;

        if entry.node == *goal {
            tracing::debug!(expanded, cost = entry.cost, "goal reached");
            return Ok(entry.cost);
        }

        // a cheaper route to this node was queued after this entry
        if best.get(&entry.node).is_some_and(|&known| known < entry.cost) {
            continue;
        }
        expanded += 1;

        buf.clear();
        graph.neighbors(&entry.node, &mut buf);
        for next in buf.drain(..) {
            let cost = entry.cost.saturating_add(graph.cost(&entry.node, &next));
            if best.get(&next).is_some_and(|&known| known <= cost) {
                continue;
            }

            best.insert(next.clone(), cost);
            sequence += 1;
            frontier.push(Reverse(FrontierEntry {
                priority: cost.saturating_add(heuristic(&next)),
                sequence,
                cost,
                node: next,
            }));
        }
    }

    tracing::debug!(expanded, "frontier exhausted without reaching goal");
    Ok(UNREACHABLE)
}

/// True if any path leads from `start` to `goal`.
pub fn connected<G, H>(
    graph: &G,
    start: &G::Node,
    goal: &G::Node,
    heuristic: H,
    cancel: Option<&CancelToken>,
) -> Result<bool, Cancelled>
where
    G: WeightedGraph,
    H: Fn(&G::Node) -> u64,
{
    cost_between(graph, start, goal, heuristic, cancel).map(|cost| cost != UNREACHABLE)
}
