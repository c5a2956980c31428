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

//! Color assignments and their validity checks.
//!
//! `Coloring` maps every vertex to a `ColorIndex`. The free functions at the
//! bottom of this module inspect a coloring directly against the edge list and
//! share nothing with the incremental accounting used by the search, which
//! makes them suitable for cross-checking its results.

use crate::{
    graph::Graph,
    index::{ColorIndex, VertexIndex},
};
use rand::Rng;

/// A color for every vertex of a graph.
///
/// Data is indexed directly by `VertexIndex`: `colors[v]` is the color of vertex `v`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Coloring {
    colors: Vec<ColorIndex>,
}

impl Coloring {
    /// Wraps an existing color vector.
    #[inline]
    pub fn from_colors(colors: Vec<ColorIndex>) -> Self {
        Self { colors }
    }

    /// Assigns the same color to `num_vertices` vertices.
    #[inline]
    pub fn uniform(num_vertices: usize, color: ColorIndex) -> Self {
        Self {
            colors: vec![color; num_vertices],
        }
    }

    /// Draws every color uniformly from `0..num_colors`.
    ///
    /// # Panics
    ///
    /// Panics if `num_colors == 0` and `num_vertices > 0`.
    pub fn random<R>(num_vertices: usize, num_colors: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let colors = (0..num_vertices)
            .map(|_| ColorIndex::new(rng.random_range(0..num_colors)))
            .collect();
        Self { colors }
    }

    /// Returns the number of colored vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if no vertex is colored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color of `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn color_of(&self, vertex: VertexIndex) -> ColorIndex {
        self.colors[vertex.get()]
    }

    /// Recolors `vertex` and returns its previous color.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn set_color(&mut self, vertex: VertexIndex, color: ColorIndex) -> ColorIndex {
        std::mem::replace(&mut self.colors[vertex.get()], color)
    }

    /// Returns all colors, indexed by vertex.
    #[inline]
    pub fn colors(&self) -> &[ColorIndex] {
        &self.colors
    }

    /// Returns the largest color in use, or `None` for an empty coloring.
    pub fn max_color(&self) -> Option<ColorIndex> {
        self.colors.iter().copied().max()
    }

    /// Returns the number of distinct colors in use.
    pub fn num_colors_used(&self) -> usize {
        let Some(max) = self.max_color() else {
            return 0;
        };
        let mut seen = vec![false; max.get() + 1];
        let mut distinct = 0;
        for c in &self.colors {
            if !std::mem::replace(&mut seen[c.get()], true) {
                distinct += 1;
            }
        }
        distinct
    }

    /// Consumes the coloring and returns the raw vector.
    #[inline]
    pub fn into_colors(self) -> Vec<ColorIndex> {
        self.colors
    }
}

impl From<Vec<ColorIndex>> for Coloring {
    fn from(colors: Vec<ColorIndex>) -> Self {
        Self::from_colors(colors)
    }
}

impl FromIterator<usize> for Coloring {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().map(ColorIndex::new).collect(),
        }
    }
}

impl std::fmt::Display for Coloring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.colors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c.get())?;
        }
        write!(f, "]")
    }
}

/// Returns `true` iff no edge of `graph` has equally colored endpoints.
///
/// # Panics
///
/// Panics if `coloring` has fewer entries than `graph` has vertices.
pub fn is_valid_coloring(graph: &Graph, coloring: &Coloring) -> bool {
    let colors = coloring.colors();
    graph.edges().iter().all(|&(u, v)| colors[u] != colors[v])
}

/// Counts the edges of `graph` whose endpoints share a color.
///
/// Every copy of a duplicated edge counts separately.
pub fn count_conflicting_edges(graph: &Graph, coloring: &Coloring) -> usize {
    let colors = coloring.colors();
    graph
        .edges()
        .iter()
        .filter(|&&(u, v)| colors[u] == colors[v])
        .count()
}
