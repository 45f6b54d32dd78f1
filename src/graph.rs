//! Graph capabilities and the adjacency-list graph.
//!
//! Searches only depend on the [`Graph`] and [`WeightedGraph`] traits, so
//! grids, point clouds and labelled graphs share one implementation of each
//! algorithm without a common base type.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};

/// Neighbour enumeration over nodes of type [`Graph::Node`].
pub trait Graph {
    type Node: Clone + Eq + Hash;

    /// Appends the neighbours of `node` into `buf`. The caller clears `buf`
    /// before calling.
    fn neighbors(&self, node: &Self::Node, buf: &mut Vec<Self::Node>);
}

/// A graph whose edges carry a non-negative traversal cost.
pub trait WeightedGraph: Graph {
    /// Cost of stepping from `from` to the adjacent node `to`.
    ///
    /// Only meaningful for actual edges.
    fn cost(&self, from: &Self::Node, to: &Self::Node) -> u64;
}

/// A write-once adjacency-list graph keyed by arbitrary node identities.
///
/// There are no mutators; build one with [`AdjacencyGraph::from_rule`] or a
/// [`GraphBuilder`] and discard it after the query.
#[derive(Clone, Debug)]
pub struct AdjacencyGraph<N> {
    edges: FxHashMap<N, Vec<N>>,
}

impl<N: Clone + Eq + Hash + Debug> AdjacencyGraph<N> {
    pub fn builder() -> GraphBuilder<N> {
        GraphBuilder::default()
    }

    /// Registers every node in `nodes` and asks `rule` for its neighbours.
    ///
    /// Neighbours are not registered implicitly: a neighbour that is not
    /// itself in `nodes` panics once a search expands it.
    pub fn from_rule<I, F, E>(nodes: I, mut rule: F) -> Self
    where
        I: IntoIterator<Item = N>,
        F: FnMut(&N) -> E,
        E: IntoIterator<Item = N>,
    {
        let edges = nodes
            .into_iter()
            .map(|node| {
                let next = rule(&node).into_iter().collect();
                (node, next)
            })
            .collect();
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.edges.contains_key(node)
    }

    /// Iterates over registered nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.edges.keys()
    }

    /// Returns the neighbours of `node`, or [`Error::UnknownNode`] if it was
    /// never registered.
    pub fn try_neighbors(&self, node: &N) -> Result<&[N]> {
        self.edges
            .get(node)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownNode(format!("{node:?}")))
    }

    /// Attaches a cost function, turning this into a [`WeightedGraph`].
    pub fn with_cost<F>(self, cost: F) -> WithCost<Self, F>
    where
        F: Fn(&N, &N) -> u64,
    {
        WithCost { graph: self, cost }
    }

    /// Every edge costs 1.
    pub fn with_unit_cost(self) -> WithCost<Self, fn(&N, &N) -> u64> {
        fn unit<N>(_: &N, _: &N) -> u64 {
            1
        }
        self.with_cost(unit::<N> as fn(&N, &N) -> u64)
    }
}

impl<N: Clone + Eq + Hash + Debug> Graph for AdjacencyGraph<N> {
    type Node = N;

    /// # Panics
    ///
    /// Panics if `node` was never registered; that is a construction bug in
    /// the caller, not a data condition.
    fn neighbors(&self, node: &N, buf: &mut Vec<N>) {
        match self.edges.get(node) {
            Some(next) => buf.extend(next.iter().cloned()),
            None => panic!("node {node:?} was never registered in the graph"),
        }
    }
}

/// Incrementally registers nodes and edges, then freezes into an
/// [`AdjacencyGraph`].
#[derive(Debug)]
pub struct GraphBuilder<N> {
    edges: FxHashMap<N, Vec<N>>,
}

impl<N> Default for GraphBuilder<N> {
    fn default() -> Self {
        Self {
            edges: FxHashMap::default(),
        }
    }
}

impl<N: Clone + Eq + Hash + Debug> GraphBuilder<N> {
    /// Registers `node` with no edges (no-op if already registered).
    pub fn add_node(&mut self, node: N) -> &mut Self {
        self.edges.entry(node).or_default();
        self
    }

    /// Adds a directed edge, registering both endpoints.
    pub fn add_edge(&mut self, from: N, to: N) -> &mut Self {
        self.edges.entry(to.clone()).or_default();
        self.edges.entry(from).or_default().push(to);
        self
    }

    pub fn add_undirected(&mut self, a: N, b: N) -> &mut Self {
        self.add_edge(a.clone(), b.clone());
        self.add_edge(b, a)
    }

    pub fn build(&mut self) -> AdjacencyGraph<N> {
        AdjacencyGraph {
            edges: std::mem::take(&mut self.edges),
        }
    }
}

/// Any [`Graph`] paired with a cost closure.
#[derive(Clone, Debug)]
pub struct WithCost<G, F> {
    graph: G,
    cost: F,
}

impl<G: Graph, F> Graph for WithCost<G, F> {
    type Node = G::Node;

    #[inline]
    fn neighbors(&self, node: &G::Node, buf: &mut Vec<G::Node>) {
        self.graph.neighbors(node, buf);
    }
}

impl<G, F> WeightedGraph for WithCost<G, F>
where
    G: Graph,
    F: Fn(&G::Node, &G::Node) -> u64,
{
    #[inline]
    fn cost(&self, from: &G::Node, to: &G::Node) -> u64 {
        (self.cost)(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors_of<G: Graph>(graph: &G, node: &G::Node) -> Vec<G::Node> {
        let mut buf = Vec::new();
        graph.neighbors(node, &mut buf);
        buf
    }

    #[test]
    fn test_from_rule_keeps_rule_order() {
        let graph = AdjacencyGraph::from_rule(0..4, |&n| {
            [n - 1, n + 1].into_iter().filter(|m| (0..4).contains(m))
        });

        assert_eq!(graph.len(), 4);
        assert_eq!(neighbors_of(&graph, &0), vec![1]);
        assert_eq!(neighbors_of(&graph, &2), vec![1, 3]);
    }

    #[test]
    fn test_builder_registers_both_endpoints() {
        let graph = AdjacencyGraph::builder()
            .add_edge("a", "b")
            .add_node("c")
            .build();

        assert!(graph.contains(&"b"));
        assert_eq!(neighbors_of(&graph, &"a"), vec!["b"]);
        assert!(neighbors_of(&graph, &"b").is_empty());
        assert!(neighbors_of(&graph, &"c").is_empty());
    }

    #[test]
    fn test_undirected_edges_go_both_ways() {
        let graph = AdjacencyGraph::builder().add_undirected(1, 2).build();
        assert_eq!(neighbors_of(&graph, &1), vec![2]);
        assert_eq!(neighbors_of(&graph, &2), vec![1]);
    }

    #[test]
    fn test_try_neighbors_reports_unknown_node() {
        let graph = AdjacencyGraph::builder().add_node("only").build();
        let err = graph.try_neighbors(&"missing").unwrap_err();
        assert!(matches!(err, Error::UnknownNode(ref name) if name == "\"missing\""));
        assert!(graph.try_neighbors(&"only").unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "never registered")]
    fn test_neighbors_of_unregistered_node_panics() {
        let graph: AdjacencyGraph<u32> = AdjacencyGraph::builder().add_node(1).build();
        neighbors_of(&graph, &2);
    }

    #[test]
    fn test_with_cost_delegates_neighbors() {
        let graph = AdjacencyGraph::builder()
            .add_undirected(1, 5)
            .build()
            .with_cost(|a: &i32, b: &i32| a.abs_diff(*b) as u64);

        assert_eq!(neighbors_of(&graph, &1), vec![5]);
        assert_eq!(graph.cost(&1, &5), 4);

        let unit = AdjacencyGraph::builder().add_edge(1, 5).build().with_unit_cost();
        assert_eq!(unit.cost(&1, &5), 1);
    }
}
