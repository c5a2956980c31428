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

//! Bulk conflict counting backends.
//!
//! A `BulkConflictCounter` recounts the conflicting edges of a coloring from
//! scratch. The search uses it only to cross-check its incremental total, so an
//! implementation must be read-only and return exactly what a sequential scan
//! over all edges returns. Any backend may sit behind the trait; the two
//! provided here are a plain scan and a chunked data-parallel scan on `rayon`.

use crate::conflict::bulk_recount;
use chroma_model::{coloring::Coloring, graph::Graph};
use rayon::prelude::*;

/// Recounts conflicting edges without consulting any incremental state.
pub trait BulkConflictCounter: Send + Sync {
    /// Returns the name of the counter.
    fn name(&self) -> &str;

    /// Returns the number of edges whose endpoints share a color.
    fn count_conflicts(&self, graph: &Graph, coloring: &Coloring) -> usize;
}

impl std::fmt::Debug for dyn BulkConflictCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BulkConflictCounter({})", self.name())
    }
}

impl<C> BulkConflictCounter for &C
where
    C: BulkConflictCounter + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn count_conflicts(&self, graph: &Graph, coloring: &Coloring) -> usize {
        (**self).count_conflicts(graph, coloring)
    }
}

/// Single-threaded O(m) scan over the edge list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequentialConflictCounter;

impl BulkConflictCounter for SequentialConflictCounter {
    fn name(&self) -> &str {
        "SequentialConflictCounter"
    }

    #[inline]
    fn count_conflicts(&self, graph: &Graph, coloring: &Coloring) -> usize {
        bulk_recount(graph, coloring)
    }
}

/// Data-parallel scan that splits the edge list into chunks counted on the `rayon` pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelConflictCounter {
    chunk_size: usize,
}

impl ParallelConflictCounter {
    /// Default number of edges handed to one task.
    pub const DEFAULT_CHUNK_SIZE: usize = 4096;

    #[inline]
    pub fn new() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Creates a counter with a custom chunk size.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    #[inline]
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        assert!(
            chunk_size > 0,
            "called `ParallelConflictCounter::with_chunk_size` with a chunk size of zero"
        );
        Self { chunk_size }
    }

    #[inline]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for ParallelConflictCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkConflictCounter for ParallelConflictCounter {
    fn name(&self) -> &str {
        "ParallelConflictCounter"
    }

    fn count_conflicts(&self, graph: &Graph, coloring: &Coloring) -> usize {
        let colors = coloring.colors();
        graph
            .edges()
            .par_chunks(self.chunk_size)
            .map(|chunk| {
                chunk
                    .iter()
                    .filter(|&&(u, v)| colors[u] == colors[v])
                    .count()
            })
            .sum()
    }
}
