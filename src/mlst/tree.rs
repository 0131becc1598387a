//! Randomized DFS spanning tree construction.
//!
//! Used both to create initial solutions over the whole instance and to
//! repair an arbitrary edge set (a crossover union, a mutated tree plus
//! injected edges) back into a tree.
//!
//! The neighbor order at each node is shuffled before expansion; this is
//! the source of diversity across the population, not a tie-break detail.

use super::types::Solution;
use crate::graph::{Edge, GraphInstance, Label, Node};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Builds DFS trees from a root over an edge universe.
pub struct SpanningTreeBuilder;

/// One pending node on the explicit DFS stack.
struct Frame {
    node: Node,
    neighbors: Vec<(Node, Label)>,
    next: usize,
}

impl SpanningTreeBuilder {
    /// Builds a tree from `root` over `universe`.
    ///
    /// The result is acyclic, uses only edges of `universe`, and spans
    /// exactly the nodes reachable from `root` within `universe`. An isolated
    /// root yields an empty solution.
    pub fn build<R: Rng + ?Sized>(root: Node, universe: &BTreeSet<Edge>, rng: &mut R) -> Solution {
        let mut adjacency: BTreeMap<Node, BTreeSet<(Node, Label)>> = BTreeMap::new();
        for e in universe {
            adjacency.entry(e.u()).or_default().insert((e.v(), e.label()));
            adjacency.entry(e.v()).or_default().insert((e.u(), e.label()));
        }

        Self::traverse(
            root,
            |n| {
                adjacency
                    .get(&n)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default()
            },
            rng,
        )
    }

    /// Builds a tree from `root` over every edge of `instance`.
    ///
    /// Equivalent to `build(root, instance.edges(), rng)` without
    /// materializing a separate adjacency map.
    pub fn build_over_instance<R: Rng + ?Sized>(
        root: Node,
        instance: &GraphInstance,
        rng: &mut R,
    ) -> Solution {
        Self::traverse(root, |n| instance.neighbors(n).collect(), rng)
    }

    /// Iterative DFS with the same visiting order as the recursive form:
    /// a node's neighbors are shuffled when the node is first entered and
    /// consumed one by one, descending as soon as an unvisited one is found.
    fn traverse<R, F>(root: Node, mut incident: F, rng: &mut R) -> Solution
    where
        R: Rng + ?Sized,
        F: FnMut(Node) -> Vec<(Node, Label)>,
    {
        let mut visited = BTreeSet::from([root]);
        let mut edges = BTreeSet::new();

        let mut neighbors = incident(root);
        neighbors.shuffle(rng);
        let mut stack = vec![Frame {
            node: root,
            neighbors,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&(next_node, label)) = frame.neighbors.get(frame.next) else {
                stack.pop();
                continue;
            };
            frame.next += 1;
            let from = frame.node;

            if visited.insert(next_node) {
                edges.insert(Edge::new(from, next_node, label));
                let mut neighbors = incident(next_node);
                neighbors.shuffle(rng);
                stack.push(Frame {
                    node: next_node,
                    neighbors,
                    next: 0,
                });
            }
        }

        trace!(root, edges = edges.len(), "dfs tree built");
        Solution::new(root, edges)
    }
}
