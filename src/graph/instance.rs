//! Immutable problem instance: nodes, labeled edges and adjacency index.

use super::edge::{Edge, Label, Node};
use crate::error::{MlstError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// An edge-labeled undirected graph.
///
/// Built once, read for the whole run. Node and edge sets are ordered so
/// that every traversal over them is a function of content alone, which
/// keeps seeded runs reproducible.
///
/// # Invariants
///
/// - every endpoint of every edge is in [`nodes`](Self::nodes)
/// - adjacency is symmetric: `(v, l) ∈ neighbors(u)` iff `(u, l) ∈ neighbors(v)`
/// - the node set is non-empty
#[derive(Debug, Clone)]
pub struct GraphInstance {
    nodes: BTreeSet<Node>,
    node_list: Vec<Node>,
    edges: BTreeSet<Edge>,
    labels: BTreeSet<Label>,
    adjacency: BTreeMap<Node, BTreeSet<(Node, Label)>>,
}

impl GraphInstance {
    /// Builds an instance from a collection of edges.
    ///
    /// Duplicates (in either endpoint order) collapse to one edge. The node
    /// set is the union of all endpoints.
    ///
    /// # Errors
    /// [`MlstError::Configuration`] if the resulting node set is empty.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: BTreeSet<Edge> = edges.into_iter().collect();

        let mut nodes = BTreeSet::new();
        let mut labels = BTreeSet::new();
        let mut adjacency: BTreeMap<Node, BTreeSet<(Node, Label)>> = BTreeMap::new();
        for e in &edges {
            nodes.insert(e.u());
            nodes.insert(e.v());
            labels.insert(e.label());
            adjacency.entry(e.u()).or_default().insert((e.v(), e.label()));
            adjacency.entry(e.v()).or_default().insert((e.u(), e.label()));
        }

        if nodes.is_empty() {
            return Err(MlstError::Configuration("instance has no nodes".into()));
        }

        Ok(Self {
            node_list: nodes.iter().copied().collect(),
            nodes,
            edges,
            labels,
            adjacency,
        })
    }

    /// Parses the edge-list text format.
    ///
    /// The first `header_lines` lines are skipped verbatim; every following
    /// non-blank line must hold exactly three whitespace-separated
    /// non-negative integers `u v label`.
    ///
    /// # Errors
    /// - [`MlstError::Parse`] on a malformed line (1-based line number)
    /// - [`MlstError::Configuration`] if no edge lines remain
    pub fn parse(text: &str, header_lines: usize) -> Result<Self> {
        let mut edges = Vec::new();
        for (idx, line) in text.lines().enumerate().skip(header_lines) {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() != 3 {
                return Err(MlstError::Parse {
                    line: line_no,
                    message: format!("expected 3 fields, found {}", fields.len()),
                });
            }

            let mut values = [0u32; 3];
            for (slot, token) in values.iter_mut().zip(&fields) {
                *slot = token.parse().map_err(|_| MlstError::Parse {
                    line: line_no,
                    message: format!("expected a non-negative integer, found {token:?}"),
                })?;
            }
            edges.push(Edge::new(values[0], values[1], values[2]));
        }

        Self::from_edges(edges)
    }

    /// Reads and parses an instance file. See [`parse`](Self::parse).
    pub fn load<P: AsRef<Path>>(path: P, header_lines: usize) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, header_lines)
    }

    /// All nodes, ascending.
    pub fn nodes(&self) -> &BTreeSet<Node> {
        &self.nodes
    }

    /// All nodes as an indexable slice, ascending.
    ///
    /// Used for uniform root sampling.
    pub fn node_list(&self) -> &[Node] {
        &self.node_list
    }

    /// All distinct edges.
    pub fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// All distinct labels.
    pub fn labels(&self) -> &BTreeSet<Label> {
        &self.labels
    }

    /// `(neighbor, label)` pairs incident to `node`. Empty for unknown nodes.
    pub fn neighbors(&self, node: Node) -> impl Iterator<Item = (Node, Label)> + '_ {
        self.adjacency
            .get(&node)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of distinct labels.
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Whether every node is reachable from every other node.
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.nodes.first() else {
            return true;
        };
        let mut seen = BTreeSet::from([start]);
        let mut stack = vec![start];
        while let Some(n) = stack.pop() {
            for (m, _) in self.neighbors(n) {
                if seen.insert(m) {
                    stack.push(m);
                }
            }
        }
        seen.len() == self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
10 5
0 1 2
1 2 2
2 0 4
1 0 2
";

    #[test]
    fn test_parse_dedups_swapped_edges() {
        let inst = GraphInstance::parse(SAMPLE, 1).unwrap();
        assert_eq!(inst.node_count(), 3);
        assert_eq!(inst.edge_count(), 3);
        assert_eq!(inst.label_count(), 2);
        assert!(inst.edges().contains(&Edge::new(0, 1, 2)));
    }

    #[test]
    fn test_parse_two_header_lines() {
        let text = "NODES 3\nLABELS 2\n0 1 0\n1 2 1\n";
        let inst = GraphInstance::parse(text, 2).unwrap();
        assert_eq!(inst.edge_count(), 2);
        assert_eq!(
            inst.labels().iter().copied().collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let text = "header\n\n0 1 3\n   \n";
        let inst = GraphInstance::parse(text, 1).unwrap();
        assert_eq!(inst.edge_count(), 1);
    }

    #[test]
    fn test_parse_non_integer_token() {
        let err = GraphInstance::parse("h\n0 x 3\n", 1).unwrap_err();
        match err {
            MlstError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("\"x\""), "message was {message}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let err = GraphInstance::parse("h\n0 1 3\n0 1\n", 1).unwrap_err();
        assert!(matches!(err, MlstError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_negative_rejected() {
        let err = GraphInstance::parse("h\n0 -1 3\n", 1).unwrap_err();
        assert!(matches!(err, MlstError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_instance_is_configuration_error() {
        let err = GraphInstance::parse("only a header\n", 1).unwrap_err();
        assert!(matches!(err, MlstError::Configuration(_)));
        assert!(matches!(
            GraphInstance::from_edges(Vec::new()),
            Err(MlstError::Configuration(_))
        ));
    }

    #[test]
    fn test_adjacency_symmetric() {
        let inst = GraphInstance::parse(SAMPLE, 1).unwrap();
        for &u in inst.nodes() {
            for (v, l) in inst.neighbors(u) {
                assert!(
                    inst.neighbors(v).any(|(w, m)| w == u && m == l),
                    "({u},{v},{l}) not mirrored"
                );
            }
        }
    }

    #[test]
    fn test_neighbors_of_unknown_node() {
        let inst = GraphInstance::parse(SAMPLE, 1).unwrap();
        assert_eq!(inst.neighbors(99).count(), 0);
    }

    #[test]
    fn test_is_connected() {
        let inst = GraphInstance::parse(SAMPLE, 1).unwrap();
        assert!(inst.is_connected());

        let split =
            GraphInstance::from_edges([Edge::new(0, 1, 0), Edge::new(2, 3, 0)]).unwrap();
        assert!(!split.is_connected());
    }

    #[test]
    fn test_load_missing_file() {
        let err = GraphInstance::load("/definitely/not/here.col", 1).unwrap_err();
        assert!(matches!(err, MlstError::Io(_)));
    }

    #[test]
    fn test_load_roundtrip_file() {
        let path = std::env::temp_dir().join(format!("u_mlst_load_{}.col", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let inst = GraphInstance::load(&path, 1).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(inst.edge_count(), 3);
    }
}
