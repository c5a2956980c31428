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

//! Incremental conflict accounting.
//!
//! `ConflictState` keeps, for the current coloring, the number of neighbors of
//! every vertex that share its color, together with the sum of those counts.
//! Each conflicting edge is seen from both endpoints, so the sum is twice the
//! number of conflicting edges (duplicate edges count once per copy).
//!
//! The state is created by `ConflictState::build` in O(m) and then kept in
//! sync by `ConflictState::apply_move` in O(deg(v)) per recoloring. The only
//! other mutation is `reconcile`, which overwrites the total from a bulk
//! recount and deliberately leaves the per-vertex counts alone.

use chroma_model::{
    coloring::Coloring,
    graph::Graph,
    index::{ColorIndex, VertexIndex},
    neighbors::NeighborIndex,
};

/// Per-vertex conflict counts and their sum for one coloring.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConflictState {
    per_vertex_conflicts: Vec<usize>,
    total_conflict_weight: usize,
}

impl ConflictState {
    /// Counts, for every vertex, the neighbors sharing its color.
    ///
    /// # Panics
    ///
    /// Panics if `coloring` has fewer entries than `graph` has vertices.
    pub fn build(graph: &Graph, coloring: &Coloring) -> Self {
        let colors = coloring.colors();
        let mut per_vertex_conflicts = vec![0usize; graph.num_vertices()];
        let mut total_conflict_weight = 0usize;

        for &(u, v) in graph.edges() {
            if colors[u] == colors[v] {
                per_vertex_conflicts[u] += 1;
                per_vertex_conflicts[v] += 1;
                total_conflict_weight += 2;
            }
        }

        Self {
            per_vertex_conflicts,
            total_conflict_weight,
        }
    }

    /// Returns the number of neighbors of `vertex` sharing its color.
    #[inline]
    pub fn vertex_conflicts(&self, vertex: VertexIndex) -> usize {
        self.per_vertex_conflicts[vertex.get()]
    }

    /// Returns the per-vertex conflict counts, indexed by vertex.
    #[inline]
    pub fn per_vertex_conflicts(&self) -> &[usize] {
        &self.per_vertex_conflicts
    }

    /// Returns the sum of all per-vertex counts.
    #[inline]
    pub fn total_conflict_weight(&self) -> usize {
        self.total_conflict_weight
    }

    /// Returns the number of distinct conflicting edges.
    #[inline]
    pub fn num_conflicting_edges(&self) -> usize {
        self.total_conflict_weight / 2
    }

    /// Returns `true` if no vertex has a conflict.
    #[inline]
    pub fn is_conflict_free(&self) -> bool {
        self.per_vertex_conflicts.iter().all(|&c| c == 0)
    }

    /// Replaces the contents of `buffer` with every vertex that has a conflict, in ascending order.
    pub fn collect_conflicted(&self, buffer: &mut Vec<VertexIndex>) {
        buffer.clear();
        buffer.extend(
            self.per_vertex_conflicts
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c > 0)
                .map(|(v, _)| VertexIndex::new(v)),
        );
    }

    /// Recolors `vertex` to `new_color` and updates the counts incrementally.
    ///
    /// Neighbor counts are adjusted first, comparing against the old color of
    /// `vertex`; its own count is then recomputed from scratch against
    /// `new_color`. The entry of `vertex` is never touched inside the neighbor
    /// loop, so the edge between `vertex` and a neighbor is counted once per
    /// endpoint. Recoloring to the current color leaves the state unchanged.
    ///
    /// Returns the previous color of `vertex`.
    pub fn apply_move(
        &mut self,
        vertex: VertexIndex,
        new_color: ColorIndex,
        neighbors: &NeighborIndex,
        coloring: &mut Coloring,
    ) -> ColorIndex {
        let old_color = coloring.color_of(vertex);
        if old_color == new_color {
            return old_color;
        }

        let v = vertex.get();
        let old_count = self.per_vertex_conflicts[v];
        let colors = coloring.colors();
        let adjacent = neighbors.neighbors(vertex);

        for &nb in adjacent {
            let nb_color = colors[nb];
            if nb_color == old_color {
                debug_assert!(
                    self.per_vertex_conflicts[nb] > 0,
                    "called `ConflictState::apply_move` with a neighbor count that would underflow: vertex {}",
                    nb
                );
                debug_assert!(
                    self.total_conflict_weight > 0,
                    "called `ConflictState::apply_move` with a total that would underflow at neighbor {}",
                    nb
                );
                self.per_vertex_conflicts[nb] -= 1;
                self.total_conflict_weight = self.total_conflict_weight.saturating_sub(1);
            }
            if nb_color == new_color {
                self.per_vertex_conflicts[nb] += 1;
                self.total_conflict_weight += 1;
            }
        }

        let new_count = adjacent.iter().filter(|&&nb| colors[nb] == new_color).count();
        debug_assert!(
            self.total_conflict_weight + new_count >= old_count,
            "called `ConflictState::apply_move` with a total {} below the old count {} of vertex {}",
            self.total_conflict_weight,
            old_count,
            v
        );
        self.total_conflict_weight = (self.total_conflict_weight + new_count).saturating_sub(old_count);
        self.per_vertex_conflicts[v] = new_count;

        coloring.set_color(vertex, new_color)
    }

    /// Overwrites the total with `2 * conflicting_edges` if it disagrees.
    ///
    /// The per-vertex counts are not corrected. Returns `true` if the total was patched.
    pub fn reconcile(&mut self, conflicting_edges: usize) -> bool {
        let expected = conflicting_edges * 2;
        if expected == self.total_conflict_weight {
            return false;
        }
        self.total_conflict_weight = expected;
        true
    }
}

/// Counts the distinct conflicting edges by a direct scan of the edge list.
///
/// Shares nothing with `ConflictState`; used as the consistency oracle.
pub fn bulk_recount(graph: &Graph, coloring: &Coloring) -> usize {
    let colors = coloring.colors();
    graph
        .edges()
        .iter()
        .filter(|&&(u, v)| colors[u] == colors[v])
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chroma_model::coloring::count_conflicting_edges;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn vi(n: usize) -> VertexIndex {
        VertexIndex::new(n)
    }

    fn ci(n: usize) -> ColorIndex {
        ColorIndex::new(n)
    }

    fn random_graph(num_vertices: usize, num_edges: usize, rng: &mut ChaCha8Rng) -> Graph {
        let mut edges = Vec::with_capacity(num_edges);
        while edges.len() < num_edges {
            let u = rng.random_range(0..num_vertices);
            let v = rng.random_range(0..num_vertices);
            if u != v {
                edges.push((u, v));
            }
        }
        Graph::new(num_vertices, edges).unwrap()
    }

    fn assert_matches_direct_count(graph: &Graph, coloring: &Coloring, state: &ConflictState) {
        let colors = coloring.colors();
        let neighbors = NeighborIndex::new(graph);
        for v in graph.vertices() {
            let expected = neighbors
                .neighbors(v)
                .iter()
                .filter(|&&nb| colors[nb] == colors[v.get()])
                .count();
            assert_eq!(state.vertex_conflicts(v), expected, "vertex {}", v);
        }
        assert_eq!(
            state.total_conflict_weight(),
            2 * count_conflicting_edges(graph, coloring)
        );
    }

    #[test]
    fn test_build_triangle() {
        let g = Graph::new(3, vec![(0, 1), (1, 2), (0, 2)]).unwrap();
        let coloring: Coloring = [0, 0, 1].into_iter().collect();
        let state = ConflictState::build(&g, &coloring);

        assert_eq!(state.per_vertex_conflicts(), &[1, 1, 0]);
        assert_eq!(state.total_conflict_weight(), 2);
        assert_eq!(state.num_conflicting_edges(), 1);
        assert!(!state.is_conflict_free());
    }

    #[test]
    fn test_build_counts_duplicate_edges() {
        let g = Graph::new(2, vec![(0, 1), (1, 0)]).unwrap();
        let coloring = Coloring::uniform(2, ci(0));
        let state = ConflictState::build(&g, &coloring);

        assert_eq!(state.per_vertex_conflicts(), &[2, 2]);
        assert_eq!(state.num_conflicting_edges(), 2);
        assert_eq!(bulk_recount(&g, &coloring), 2);
    }

    #[test]
    fn test_build_matches_neighbor_scan_on_random_graph() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let g = random_graph(40, 120, &mut rng);
        let coloring = Coloring::random(40, 3, &mut rng);
        let state = ConflictState::build(&g, &coloring);
        assert_matches_direct_count(&g, &coloring, &state);
    }

    #[test]
    fn test_apply_move_same_color_is_noop() {
        let g = Graph::new(3, vec![(0, 1), (1, 2)]).unwrap();
        let neighbors = NeighborIndex::new(&g);
        let mut coloring: Coloring = [0, 0, 0].into_iter().collect();
        let mut state = ConflictState::build(&g, &coloring);
        let before = state.clone();

        let old = state.apply_move(vi(1), ci(0), &neighbors, &mut coloring);

        assert_eq!(old, ci(0));
        assert_eq!(state, before);
        assert_eq!(coloring.colors(), &[ci(0), ci(0), ci(0)]);
    }

    #[test]
    fn test_apply_move_resolves_path_conflicts() {
        let g = Graph::new(3, vec![(0, 1), (1, 2)]).unwrap();
        let neighbors = NeighborIndex::new(&g);
        let mut coloring: Coloring = [0, 0, 0].into_iter().collect();
        let mut state = ConflictState::build(&g, &coloring);
        assert_eq!(state.per_vertex_conflicts(), &[1, 2, 1]);

        state.apply_move(vi(1), ci(1), &neighbors, &mut coloring);

        assert_eq!(state.per_vertex_conflicts(), &[0, 0, 0]);
        assert_eq!(state.total_conflict_weight(), 0);
        assert!(state.is_conflict_free());
    }

    #[test]
    fn test_apply_move_equals_rebuild_for_every_vertex_and_color() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let g = random_graph(15, 40, &mut rng);
        let neighbors = NeighborIndex::new(&g);
        let base = Coloring::random(15, 4, &mut rng);
        let base_state = ConflictState::build(&g, &base);

        for v in g.vertices() {
            for c in 0..4 {
                let mut coloring = base.clone();
                let mut state = base_state.clone();
                state.apply_move(v, ci(c), &neighbors, &mut coloring);
                assert_eq!(state, ConflictState::build(&g, &coloring));
            }
        }
    }

    #[test]
    fn test_random_move_sequence_never_drifts() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let g = random_graph(30, 90, &mut rng);
        let neighbors = NeighborIndex::new(&g);
        let mut coloring = Coloring::random(30, 3, &mut rng);
        let mut state = ConflictState::build(&g, &coloring);

        for _ in 0..500 {
            let v = vi(rng.random_range(0..30));
            let c = ci(rng.random_range(0..3));
            state.apply_move(v, c, &neighbors, &mut coloring);
            assert_eq!(state.total_conflict_weight(), 2 * bulk_recount(&g, &coloring));
        }
        assert_matches_direct_count(&g, &coloring, &state);
    }

    #[test]
    fn test_apply_move_with_duplicate_edges() {
        let g = Graph::new(3, vec![(0, 1), (1, 0), (1, 2)]).unwrap();
        let neighbors = NeighborIndex::new(&g);
        let mut coloring: Coloring = [0, 1, 1].into_iter().collect();
        let mut state = ConflictState::build(&g, &coloring);

        state.apply_move(vi(1), ci(0), &neighbors, &mut coloring);

        assert_eq!(state, ConflictState::build(&g, &coloring));
        assert_eq!(state.per_vertex_conflicts(), &[2, 2, 0]);
        assert_eq!(state.num_conflicting_edges(), 2);
    }

    #[test]
    fn test_collect_conflicted() {
        let g = Graph::new(4, vec![(0, 1), (2, 3)]).unwrap();
        let coloring: Coloring = [0, 1, 2, 2].into_iter().collect();
        let state = ConflictState::build(&g, &coloring);

        let mut buffer = vec![vi(0)];
        state.collect_conflicted(&mut buffer);
        assert_eq!(buffer, vec![vi(2), vi(3)]);
    }

    #[test]
    fn test_reconcile_patches_total_only() {
        let g = Graph::new(3, vec![(0, 1), (1, 2)]).unwrap();
        let coloring: Coloring = [0, 0, 1].into_iter().collect();
        let mut state = ConflictState::build(&g, &coloring);

        assert!(!state.reconcile(1));
        assert_eq!(state.total_conflict_weight(), 2);

        assert!(state.reconcile(3));
        assert_eq!(state.total_conflict_weight(), 6);
        assert_eq!(state.per_vertex_conflicts(), &[1, 1, 0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "with a total that would underflow")]
    fn test_apply_move_rejects_corrupted_total() {
        let g = Graph::new(2, vec![(0, 1)]).unwrap();
        let mut coloring: Coloring = [0, 0].into_iter().collect();
        let neighbors = NeighborIndex::new(&g);
        let mut state = ConflictState::build(&g, &coloring);

        // Zero total while both endpoints still count one conflict.
        state.reconcile(0);
        state.apply_move(vi(0), ci(1), &neighbors, &mut coloring);
    }
}
