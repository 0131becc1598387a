//! Solution representation.
//!
//! A [`Solution`] is the edge set of a tree recorded by a DFS, together with
//! the root that DFS started from. An [`EvaluatedSolution`] pairs it with
//! its label count and its share of the population's total fitness.

use crate::graph::{Edge, GraphInstance, Label, Node};
use std::collections::{BTreeMap, BTreeSet};

/// A candidate spanning tree.
///
/// Solutions are values: operators produce new ones and never edit an
/// existing solution, so elites can be carried forward while the same
/// solution is read again as a crossover parent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    root: Node,
    edges: BTreeSet<Edge>,
}

impl Solution {
    pub(crate) fn new(root: Node, edges: BTreeSet<Edge>) -> Self {
        Self { root, edges }
    }

    /// Root of the DFS that built this tree.
    pub fn root(&self) -> Node {
        self.root
    }

    /// Tree edges.
    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// Number of tree edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the tree has no edges (isolated root).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Distinct labels used by the tree.
    pub fn labels(&self) -> BTreeSet<Label> {
        self.edges.iter().map(Edge::label).collect()
    }

    /// Nodes touched by the tree. Always contains the root.
    pub fn nodes(&self) -> BTreeSet<Node> {
        let mut nodes = BTreeSet::from([self.root]);
        for e in &self.edges {
            nodes.insert(e.u());
            nodes.insert(e.v());
        }
        nodes
    }

    /// Adjacency map restricted to the tree edges.
    pub fn adjacency(&self) -> BTreeMap<Node, BTreeSet<(Node, Label)>> {
        let mut adj: BTreeMap<Node, BTreeSet<(Node, Label)>> = BTreeMap::new();
        for e in &self.edges {
            adj.entry(e.u()).or_default().insert((e.v(), e.label()));
            adj.entry(e.v()).or_default().insert((e.u(), e.label()));
        }
        adj
    }

    /// Whether the tree reaches every node of `instance`.
    ///
    /// A DFS tree over `k` nodes has exactly `k - 1` edges, so coverage is
    /// an edge count comparison.
    pub fn covers(&self, instance: &GraphInstance) -> bool {
        self.edges.len() + 1 == instance.node_count()
    }
}

/// A solution with its fitness and roulette weight.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluatedSolution {
    /// The tree.
    pub solution: Solution,

    /// Number of distinct labels, at least 1. Lower is better.
    pub fitness: usize,

    /// `fitness / Σ fitness` over the evaluated population.
    pub relative_weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_solution() -> Solution {
        Solution::new(
            0,
            [Edge::new(0, 1, 5), Edge::new(1, 2, 5), Edge::new(2, 3, 7)]
                .into_iter()
                .collect(),
        )
    }

    #[test]
    fn test_labels_and_nodes() {
        let s = path_solution();
        assert_eq!(s.labels().into_iter().collect::<Vec<_>>(), vec![5, 7]);
        assert_eq!(s.nodes().into_iter().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
        assert_eq!(s.len(), 3);
        assert!(!s.is_empty());
    }

    #[test]
    fn test_adjacency_symmetric() {
        let adj = path_solution().adjacency();
        assert!(adj[&1].contains(&(0, 5)));
        assert!(adj[&1].contains(&(2, 5)));
        assert!(adj[&3].contains(&(2, 7)));
        assert_eq!(adj[&0].len(), 1);
    }

    #[test]
    fn test_empty_solution_contains_root() {
        let s = Solution::new(9, BTreeSet::new());
        assert!(s.is_empty());
        assert_eq!(s.nodes().into_iter().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_covers() {
        let inst = GraphInstance::from_edges([
            Edge::new(0, 1, 5),
            Edge::new(1, 2, 5),
            Edge::new(2, 3, 7),
            Edge::new(0, 3, 1),
        ])
        .unwrap();
        assert!(path_solution().covers(&inst));

        let partial = Solution::new(0, [Edge::new(0, 1, 5)].into_iter().collect());
        assert!(!partial.covers(&inst));
    }
}
