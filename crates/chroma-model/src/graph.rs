// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Immutable graph description.
//!
//! A `Graph` is a vertex count and an ordered edge list. Edges are kept exactly
//! as given: both orientations of the same pair may appear, and duplicates are
//! retained, since every copy of an edge contributes to the conflict counts of
//! a coloring. The only validation performed is that each endpoint lies in
//! `0..num_vertices` and that no edge is a self loop.

use crate::index::VertexIndex;

/// The error type returned when an edge list does not describe a valid graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraphError {
    /// An endpoint of edge `edge` is not a vertex of the graph.
    EndpointOutOfRange {
        /// Position of the offending edge in the edge list.
        edge: usize,
        /// The out-of-range endpoint.
        vertex: usize,
        /// Number of vertices in the graph.
        num_vertices: usize,
    },
    /// Edge `edge` connects `vertex` to itself.
    SelfLoop {
        /// Position of the offending edge in the edge list.
        edge: usize,
        /// The vertex on both ends of the edge.
        vertex: usize,
    },
}

impl std::fmt::Display for MalformedGraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EndpointOutOfRange {
                edge,
                vertex,
                num_vertices,
            } => write!(
                f,
                "Edge {} references vertex {} but the graph has only {} vertices",
                edge, vertex, num_vertices
            ),
            Self::SelfLoop { edge, vertex } => {
                write!(f, "Edge {} is a self loop on vertex {}", edge, vertex)
            }
        }
    }
}

impl std::error::Error for MalformedGraphError {}

/// Checks a single edge against the vertex range.
#[inline]
pub(crate) fn check_edge(
    edge: usize,
    (u, v): (usize, usize),
    num_vertices: usize,
) -> Result<(), MalformedGraphError> {
    for vertex in [u, v] {
        if vertex >= num_vertices {
            return Err(MalformedGraphError::EndpointOutOfRange {
                edge,
                vertex,
                num_vertices,
            });
        }
    }
    if u == v {
        return Err(MalformedGraphError::SelfLoop { edge, vertex: u });
    }
    Ok(())
}

/// An undirected graph given by its vertex count and edge list.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Graph {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Creates a graph after checking every edge.
    ///
    /// Fails with `MalformedGraphError` on the first edge whose endpoint is out
    /// of range or which is a self loop.
    pub fn new(num_vertices: usize, edges: Vec<(usize, usize)>) -> Result<Self, MalformedGraphError> {
        for (i, &edge) in edges.iter().enumerate() {
            check_edge(i, edge, num_vertices)?;
        }
        Ok(Self {
            num_vertices,
            edges,
        })
    }

    /// Creates a graph with `num_vertices` vertices and no edges.
    #[inline]
    pub fn empty(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            edges: Vec::new(),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Returns the number of edges, duplicates included.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_vertices == 0
    }

    /// Returns the edge list in insertion order.
    #[inline]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Returns the endpoints of edge `index` as typed vertex indices.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_edges()`.
    #[inline]
    pub fn edge(&self, index: usize) -> (VertexIndex, VertexIndex) {
        let (u, v) = self.edges[index];
        (VertexIndex::new(u), VertexIndex::new(v))
    }

    /// Iterates over all vertices.
    #[inline]
    pub fn vertices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        (0..self.num_vertices).map(VertexIndex::new)
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Graph(vertices: {}, edges: {})",
            self.num_vertices,
            self.edges.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_valid_edges() {
        let g = Graph::new(3, vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.edge(1), (VertexIndex::new(1), VertexIndex::new(2)));
        assert!(!g.is_empty());
    }

    #[test]
    fn test_new_keeps_duplicates_and_both_orientations() {
        let g = Graph::new(2, vec![(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.edges(), &[(0, 1), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_new_rejects_out_of_range_endpoint() {
        let err = Graph::new(3, vec![(0, 1), (2, 3)]).unwrap_err();
        assert_eq!(
            err,
            MalformedGraphError::EndpointOutOfRange {
                edge: 1,
                vertex: 3,
                num_vertices: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "Edge 1 references vertex 3 but the graph has only 3 vertices"
        );
    }

    #[test]
    fn test_new_rejects_self_loop() {
        let err = Graph::new(4, vec![(2, 2)]).unwrap_err();
        assert_eq!(err, MalformedGraphError::SelfLoop { edge: 0, vertex: 2 });
    }

    #[test]
    fn test_empty_graph_has_no_edges() {
        let g = Graph::empty(5);
        assert_eq!(g.num_edges(), 0);
        assert_eq!(g.vertices().count(), 5);
        assert!(Graph::empty(0).is_empty());
    }

    #[test]
    fn test_display() {
        let g = Graph::new(2, vec![(0, 1)]).unwrap();
        assert_eq!(format!("{}", g), "Graph(vertices: 2, edges: 1)");
    }
}
