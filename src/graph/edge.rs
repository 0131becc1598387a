//! Undirected labeled edge.

/// Opaque node identifier.
pub type Node = u32;

/// Opaque label ("color") identifier.
pub type Label = u32;

/// An undirected labeled edge.
///
/// Endpoints are normalized at construction so that `Edge::new(u, v, l)` and
/// `Edge::new(v, u, l)` are the same value. Equality, ordering and hashing
/// are all derived from the normalized fields.
///
/// ```
/// use u_mlst::graph::Edge;
///
/// assert_eq!(Edge::new(3, 1, 7), Edge::new(1, 3, 7));
/// assert_ne!(Edge::new(3, 1, 7), Edge::new(1, 3, 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    u: Node,
    v: Node,
    label: Label,
}

impl Edge {
    /// Creates an edge, storing the smaller endpoint first.
    pub fn new(a: Node, b: Node, label: Label) -> Self {
        Self {
            u: a.min(b),
            v: a.max(b),
            label,
        }
    }

    /// Smaller endpoint.
    pub fn u(&self) -> Node {
        self.u
    }

    /// Larger endpoint.
    pub fn v(&self) -> Node {
        self.v
    }

    /// Edge label.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Returns the endpoint opposite to `node`, or `None` if `node` is not
    /// an endpoint of this edge.
    pub fn other(&self, node: Node) -> Option<Node> {
        if node == self.u {
            Some(self.v)
        } else if node == self.v {
            Some(self.u)
        } else {
            None
        }
    }

    /// Whether both endpoints coincide.
    pub fn is_loop(&self) -> bool {
        self.u == self.v
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.u, self.v, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;
    use std::hash::{Hash, Hasher};

    fn hash_of(e: &Edge) -> u64 {
        let mut h = DefaultHasher::new();
        e.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_normalized_endpoints() {
        let e = Edge::new(9, 2, 4);
        assert_eq!(e.u(), 2);
        assert_eq!(e.v(), 9);
        assert_eq!(e.label(), 4);
    }

    #[test]
    fn test_swapped_endpoints_collapse_in_set() {
        let set: HashSet<Edge> = [Edge::new(0, 1, 5), Edge::new(1, 0, 5), Edge::new(1, 0, 6)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_other_endpoint() {
        let e = Edge::new(3, 8, 1);
        assert_eq!(e.other(3), Some(8));
        assert_eq!(e.other(8), Some(3));
        assert_eq!(e.other(5), None);
    }

    #[test]
    fn test_self_loop() {
        let e = Edge::new(4, 4, 0);
        assert!(e.is_loop());
        assert_eq!(e.other(4), Some(4));
    }

    #[test]
    fn test_display() {
        assert_eq!(Edge::new(2, 1, 3).to_string(), "(1, 2, 3)");
    }

    proptest! {
        #[test]
        fn prop_symmetric_eq_and_hash(a in 0u32..1000, b in 0u32..1000, l in 0u32..50) {
            let e1 = Edge::new(a, b, l);
            let e2 = Edge::new(b, a, l);
            prop_assert_eq!(e1, e2);
            prop_assert_eq!(hash_of(&e1), hash_of(&e2));
        }

        #[test]
        fn prop_label_distinguishes(a in 0u32..1000, b in 0u32..1000, l in 0u32..50) {
            prop_assert_ne!(Edge::new(a, b, l), Edge::new(b, a, l + 1));
        }
    }
}
