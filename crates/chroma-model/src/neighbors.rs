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

//! Compressed adjacency lists.
//!
//! `NeighborIndex` stores, for every vertex, the sequence of adjacent vertices
//! in compressed sparse row form: an `offsets` array of length `n + 1` and one
//! flat `targets` array. An edge `(u, v)` contributes `v` to the list of `u`
//! and `u` to the list of `v`, in edge-list order, so duplicate edges yield
//! duplicate neighbor entries.
//!
//! | Operation    | Complexity |
//! |--------------|------------|
//! | `from_edges` | O(n + m)   |
//! | `neighbors`  | O(1)       |
//! | `degree`     | O(1)       |

use crate::{
    graph::{Graph, MalformedGraphError, check_edge},
    index::VertexIndex,
};

/// Read-only adjacency of a graph, built once per search.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct NeighborIndex {
    offsets: Vec<usize>,
    targets: Vec<usize>,
}

impl NeighborIndex {
    /// Builds the index from an already validated graph.
    pub fn new(graph: &Graph) -> Self {
        Self::build_unchecked(graph.num_vertices(), graph.edges())
    }

    /// Builds the index from a raw edge list, bounds-checking every endpoint.
    pub fn from_edges(
        num_vertices: usize,
        edges: &[(usize, usize)],
    ) -> Result<Self, MalformedGraphError> {
        for (i, &edge) in edges.iter().enumerate() {
            check_edge(i, edge, num_vertices)?;
        }
        Ok(Self::build_unchecked(num_vertices, edges))
    }

    fn build_unchecked(num_vertices: usize, edges: &[(usize, usize)]) -> Self {
        let mut offsets = vec![0usize; num_vertices + 1];
        for &(u, v) in edges {
            offsets[u + 1] += 1;
            offsets[v + 1] += 1;
        }
        for i in 0..num_vertices {
            offsets[i + 1] += offsets[i];
        }

        let mut cursor = offsets[..num_vertices].to_vec();
        let mut targets = vec![0usize; 2 * edges.len()];
        for &(u, v) in edges {
            targets[cursor[u]] = v;
            cursor[u] += 1;
            targets[cursor[v]] = u;
            cursor[v] += 1;
        }

        debug_assert!(
            (0..num_vertices).all(|i| cursor[i] == offsets[i + 1]),
            "called `NeighborIndex::build_unchecked` and ended with cursors that do not match the offsets"
        );

        Self { offsets, targets }
    }

    /// Returns the number of vertices covered by the index.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }

    /// Returns the neighbors of `vertex` as raw indices.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn neighbors(&self, vertex: VertexIndex) -> &[usize] {
        let v = vertex.get();
        debug_assert!(
            v < self.num_vertices(),
            "called `NeighborIndex::neighbors` with vertex index out of bounds: the len is {} but the index is {}",
            self.num_vertices(),
            v
        );

        &self.targets[self.offsets[v]..self.offsets[v + 1]]
    }

    /// Returns the degree of `vertex`, counting duplicate edges.
    #[inline]
    pub fn degree(&self, vertex: VertexIndex) -> usize {
        let v = vertex.get();
        self.offsets[v + 1] - self.offsets[v]
    }

    /// Returns the largest degree in the graph, or `0` for an empty graph.
    pub fn max_degree(&self) -> usize {
        self.offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }
}

impl From<&Graph> for NeighborIndex {
    fn from(graph: &Graph) -> Self {
        Self::new(graph)
    }
}
