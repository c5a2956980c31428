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

//! Move evaluation.
//!
//! A move recolors one vertex. Its delta is the number of conflicts the vertex
//! would have under the candidate color minus the number it has now; negative
//! deltas are improvements. Neither function here mutates any state.
//!
//! `evaluate_move` prices a single candidate in one pass over the neighbor
//! list. `MoveEvaluator::best_move` prices all `k - 1` alternatives at once
//! through a reusable per-color histogram and picks the smallest delta, with
//! the lowest color index winning ties. Given the same coloring both paths
//! agree on every delta.

use chroma_model::{
    coloring::Coloring,
    index::{ColorIndex, VertexIndex},
    neighbors::NeighborIndex,
};

/// Returns the change in conflicts at `vertex` if it were recolored to `candidate`.
///
/// Runs in O(deg(vertex)). A candidate equal to the current color yields `0`.
pub fn evaluate_move(
    vertex: VertexIndex,
    candidate: ColorIndex,
    neighbors: &NeighborIndex,
    coloring: &Coloring,
) -> i64 {
    let colors = coloring.colors();
    let current = coloring.color_of(vertex);

    let mut with_candidate = 0i64;
    let mut with_current = 0i64;
    for &nb in neighbors.neighbors(vertex) {
        let c = colors[nb];
        if c == candidate {
            with_candidate += 1;
        }
        if c == current {
            with_current += 1;
        }
    }
    with_candidate - with_current
}

/// A candidate recoloring together with its conflict delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub vertex: VertexIndex,
    pub color: ColorIndex,
    pub delta: i64,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Move({} -> {}, delta: {})", self.vertex, self.color, self.delta)
    }
}

/// Finds the best recoloring of a vertex.
///
/// Holds a histogram of neighbor colors that is filled and cleared on every
/// call, so repeated calls do not allocate once the buffer covers `k` colors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveEvaluator {
    histogram: Vec<u32>,
}

impl MoveEvaluator {
    /// Creates an evaluator with an empty histogram.
    #[inline]
    pub fn new() -> Self {
        Self {
            histogram: Vec::new(),
        }
    }

    /// Creates an evaluator whose histogram already covers `num_colors` colors.
    #[inline]
    pub fn preallocated(num_colors: usize) -> Self {
        Self {
            histogram: vec![0; num_colors],
        }
    }

    /// Returns the minimal-delta recoloring of `vertex` among the `num_colors - 1`
    /// colors other than its current one.
    ///
    /// Ties go to the lowest color index. Returns `None` when there is no other
    /// color to move to (`num_colors <= 1`). Runs in O(deg(vertex) + num_colors).
    pub fn best_move(
        &mut self,
        vertex: VertexIndex,
        num_colors: usize,
        neighbors: &NeighborIndex,
        coloring: &Coloring,
    ) -> Option<Move> {
        if num_colors <= 1 {
            return None;
        }
        if self.histogram.len() < num_colors {
            self.histogram.resize(num_colors, 0);
        }

        let colors = coloring.colors();
        let adjacent = neighbors.neighbors(vertex);
        for &nb in adjacent {
            let c = colors[nb].get();
            debug_assert!(
                c < num_colors,
                "called `MoveEvaluator::best_move` with neighbor color {} outside 0..{}",
                c,
                num_colors
            );
            self.histogram[c] += 1;
        }

        let current = coloring.color_of(vertex).get();
        let current_conflicts = i64::from(self.histogram[current]);

        let mut best: Option<Move> = None;
        for c in (0..num_colors).filter(|&c| c != current) {
            let delta = i64::from(self.histogram[c]) - current_conflicts;
            if best.is_none_or(|b| delta < b.delta) {
                best = Some(Move {
                    vertex,
                    color: ColorIndex::new(c),
                    delta,
                });
            }
        }

        for &nb in adjacent {
            self.histogram[colors[nb].get()] = 0;
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_model::graph::Graph;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn vi(n: usize) -> VertexIndex {
        VertexIndex::new(n)
    }

    fn ci(n: usize) -> ColorIndex {
        ColorIndex::new(n)
    }

    fn star() -> (Graph, NeighborIndex) {
        // Center 0 with leaves 1..=4.
        let g = Graph::new(5, vec![(0, 1), (0, 2), (0, 3), (0, 4)]).unwrap();
        let n = NeighborIndex::new(&g);
        (g, n)
    }

    #[test]
    fn test_evaluate_move_counts_against_current() {
        let (_, n) = star();
        let coloring: Coloring = [0, 0, 0, 1, 2].into_iter().collect();

        assert_eq!(evaluate_move(vi(0), ci(0), &n, &coloring), 0);
        assert_eq!(evaluate_move(vi(0), ci(1), &n, &coloring), -1);
        assert_eq!(evaluate_move(vi(0), ci(2), &n, &coloring), -1);
        assert_eq!(evaluate_move(vi(0), ci(3), &n, &coloring), -2);
    }

    #[test]
    fn test_best_move_prefers_lowest_index_on_ties() {
        let (_, n) = star();
        let coloring: Coloring = [0, 0, 0, 1, 2].into_iter().collect();
        let mut eval = MoveEvaluator::new();

        // Colors 1 and 2 both give -1; 1 must win.
        let best = eval.best_move(vi(0), 3, &n, &coloring).unwrap();
        assert_eq!(best.color, ci(1));
        assert_eq!(best.delta, -1);

        // A fourth, unused color beats both.
        let best = eval.best_move(vi(0), 4, &n, &coloring).unwrap();
        assert_eq!(best.color, ci(3));
        assert_eq!(best.delta, -2);
    }

    #[test]
    fn test_best_move_may_worsen() {
        // Vertex 0 is conflict free under color 0; every other color is worse or equal.
        let g = Graph::new(3, vec![(0, 1), (0, 2)]).unwrap();
        let n = NeighborIndex::new(&g);
        let coloring: Coloring = [0, 1, 1].into_iter().collect();
        let mut eval = MoveEvaluator::preallocated(2);

        let best = eval.best_move(vi(0), 2, &n, &coloring).unwrap();
        assert_eq!(best.color, ci(1));
        assert_eq!(best.delta, 2);
    }

    #[test]
    fn test_best_move_single_color_has_no_alternative() {
        let (_, n) = star();
        let coloring = Coloring::uniform(5, ci(0));
        let mut eval = MoveEvaluator::new();
        assert_eq!(eval.best_move(vi(0), 1, &n, &coloring), None);
    }

    #[test]
    fn test_best_move_isolated_vertex() {
        let g = Graph::empty(2);
        let n = NeighborIndex::new(&g);
        let coloring: Coloring = [2, 0].into_iter().collect();
        let mut eval = MoveEvaluator::new();

        let best = eval.best_move(vi(0), 3, &n, &coloring).unwrap();
        assert_eq!(best.color, ci(0));
        assert_eq!(best.delta, 0);
    }

    #[test]
    fn test_best_move_agrees_with_exhaustive_scan() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let num_vertices = 25;
        let k = 5;
        let mut edges = Vec::new();
        while edges.len() < 80 {
            let u = rng.random_range(0..num_vertices);
            let v = rng.random_range(0..num_vertices);
            if u != v {
                edges.push((u, v));
            }
        }
        let g = Graph::new(num_vertices, edges).unwrap();
        let n = NeighborIndex::new(&g);
        let coloring = Coloring::random(num_vertices, k, &mut rng);
        let mut eval = MoveEvaluator::preallocated(k);

        for v in g.vertices() {
            let current = coloring.color_of(v);
            let mut expected: Option<(ColorIndex, i64)> = None;
            for c in (0..k).map(ci).filter(|&c| c != current) {
                let delta = evaluate_move(v, c, &n, &coloring);
                if expected.is_none_or(|(_, d)| delta < d) {
                    expected = Some((c, delta));
                }
            }
            let best = eval.best_move(v, k, &n, &coloring).unwrap();
            assert_eq!(Some((best.color, best.delta)), expected, "vertex {}", v);
        }
    }

    #[test]
    fn test_histogram_is_cleared_between_calls() {
        let (_, n) = star();
        let coloring: Coloring = [0, 1, 1, 1, 1].into_iter().collect();
        let mut eval = MoveEvaluator::new();

        let first = eval.best_move(vi(0), 3, &n, &coloring).unwrap();
        let second = eval.best_move(vi(0), 3, &n, &coloring).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.color, ci(2));
        assert_eq!(first.delta, 0);
    }

    #[test]
    fn test_move_display() {
        let m = Move {
            vertex: vi(0),
            color: ci(2),
            delta: -1,
        };
        assert_eq!(m.to_string(), "Move(VertexIndex(0) -> ColorIndex(2), delta: -1)");
    }
}
