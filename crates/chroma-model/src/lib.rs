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

//! # Chroma Model
//!
//! Data structures describing a graph coloring instance for the `chroma_ls`
//! local search engine.
//!
//! * **`index`**: Strongly-typed wrappers (`VertexIndex`, `ColorIndex`) so vertices and colors
//!   cannot be used in place of one another.
//! * **`graph`**: The immutable `Graph` (vertex count plus edge list) and its construction errors.
//! * **`neighbors`**: `NeighborIndex`, a compressed adjacency layout derived once from the edges.
//! * **`coloring`**: The mutable `Coloring` assignment and the independent validity checks.
//!
//! Construction is fail-fast: a `Graph` that exists has only in-range, non-loop edges, so every
//! consumer downstream may index with its endpoints directly.

pub mod coloring;
pub mod graph;
pub mod index;
pub mod neighbors;
