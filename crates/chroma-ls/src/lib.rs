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

//! # Chroma Local Search
//!
//! Incremental local search for graph k-coloring. A search keeps, for every
//! vertex, the number of neighbors sharing its color, and repairs one conflicted
//! vertex per step: usually by moving it to the color with the fewest
//! conflicts, sometimes by a random recoloring that lets it escape plateaus.
//!
//! Core flow
//! - Build a `chroma_model::graph::Graph`.
//! - Describe the run with a `config::SearchConfig` (colors, step budget,
//!   random-walk probability, forced hill-climb streak, verification).
//! - Pick a `counter::BulkConflictCounter` for periodic verification and a
//!   `monitor::search_monitor::SearchMonitor` to observe or stop the run.
//! - Drive an `engine::ColoringSearch` directly (resumable), or call `color`.
//!
//! Module map
//! - `config`: search parameters and their validating builder.
//! - `conflict`: `ConflictState`, the incremental per-vertex conflict counts.
//! - `counter`: bulk recount backends (sequential and `rayon`-parallel).
//! - `engine`: the resumable search driver.
//! - `error`: configuration errors.
//! - `eval`: move deltas and best-move selection.
//! - `monitor`: search monitors (log, time limit, interrupt, composite).
//! - `policy`: hill-climb versus random-walk decisions.
//! - `result`: termination reasons and the search outcome.
//! - `stats`: step and move counters.

pub mod config;
pub mod conflict;
pub mod counter;
pub mod engine;
pub mod error;
pub mod eval;
pub mod monitor;
pub mod policy;
pub mod result;
pub mod stats;

use crate::{
    config::SearchConfig,
    counter::{BulkConflictCounter, ParallelConflictCounter},
    engine::ColoringSearch,
    error::InvalidConfigurationError,
    monitor::{log::LogMonitor, search_monitor::SearchMonitor},
    result::SearchOutcome,
};
use chroma_model::{coloring::Coloring, graph::Graph};
use rand::Rng;

/// Colors `graph` with at most `num_colors` colors within `max_steps` steps.
///
/// Returns the final coloring and whether it is proper. Failing to find a
/// proper coloring is not an error; invalid parameters are rejected before the
/// search starts. Verification, when enabled, recounts every
/// `SearchConfig::DEFAULT_VERIFICATION_INTERVAL` steps on the parallel counter.
///
/// # Examples
///
/// ```
/// use chroma_model::{coloring::is_valid_coloring, graph::Graph};
/// use rand::SeedableRng;
///
/// let path = Graph::new(4, vec![(0, 1), (1, 2), (2, 3)]).unwrap();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
/// let (coloring, success) = chroma_ls::color(&path, 2, 10_000, 0.3, 0, false, &mut rng).unwrap();
///
/// assert!(success);
/// assert!(is_valid_coloring(&path, &coloring));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn color<R>(
    graph: &Graph,
    num_colors: usize,
    max_steps: u64,
    random_walk_probability: f64,
    min_hill_climb_streak: u64,
    use_parallel_verification: bool,
    rng: R,
) -> Result<(Coloring, bool), InvalidConfigurationError>
where
    R: Rng,
{
    let config = SearchConfig::builder(num_colors, max_steps)
        .with_random_walk_probability(random_walk_probability)
        .with_min_hill_climb_streak(min_hill_climb_streak)
        .with_parallel_verification(use_parallel_verification)
        .build()?;

    let mut monitor = LogMonitor::default();
    let outcome = color_with(
        graph,
        config,
        rng,
        ParallelConflictCounter::default(),
        &mut monitor,
    );
    Ok(outcome.into_parts())
}

/// Runs one search to termination with a prevalidated configuration.
pub fn color_with<R, C, M>(
    graph: &Graph,
    config: SearchConfig,
    rng: R,
    counter: C,
    monitor: &mut M,
) -> SearchOutcome
where
    R: Rng,
    C: BulkConflictCounter,
    M: SearchMonitor + ?Sized,
{
    let mut search = ColoringSearch::new(graph, config, rng, counter);
    search.run(monitor);
    search.into_outcome()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        counter::SequentialConflictCounter, monitor::time_limit::TimeLimitMonitor,
        result::TerminationReason,
    };
    use chroma_model::coloring::is_valid_coloring;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn cycle(n: usize) -> Graph {
        Graph::new(n, (0..n).map(|i| (i, (i + 1) % n)).collect()).unwrap()
    }

    #[test]
    fn test_color_even_cycle_with_two_colors() {
        let _ = env_logger::builder().is_test(true).try_init();
        let g = cycle(8);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let (coloring, success) = color(&g, 2, 20_000, 0.3, 0, false, &mut rng).unwrap();
        assert!(success);
        assert!(is_valid_coloring(&g, &coloring));
    }

    #[test]
    fn test_color_odd_cycle_with_two_colors_fails() {
        let g = cycle(7);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let (coloring, success) = color(&g, 2, 2000, 0.3, 2, true, &mut rng).unwrap();
        assert!(!success);
        assert!(!is_valid_coloring(&g, &coloring));
    }

    #[test]
    fn test_color_rejects_invalid_parameters() {
        let g = cycle(4);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        assert_eq!(
            color(&g, 0, 100, 0.3, 0, false, &mut rng).unwrap_err(),
            InvalidConfigurationError::NoColors
        );
        assert_eq!(
            color(&g, 2, 100, 1.5, 0, false, &mut rng).unwrap_err(),
            InvalidConfigurationError::ProbabilityOutOfRange(1.5)
        );
    }

    #[test]
    fn test_color_empty_graph() {
        let g = Graph::empty(0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let (coloring, success) = color(&g, 1, 0, 0.3, 0, false, &mut rng).unwrap();
        assert!(success);
        assert!(coloring.is_empty());
    }

    #[test]
    fn test_color_with_time_limit_aborts() {
        let g = cycle(5);
        let config = SearchConfig::builder(2, u64::MAX).build().unwrap();
        let mut monitor = TimeLimitMonitor::with_mask(Duration::ZERO, 0);

        let outcome = color_with(
            &g,
            config,
            ChaCha8Rng::seed_from_u64(3),
            SequentialConflictCounter,
            &mut monitor,
        );
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.termination_reason(),
            &TerminationReason::Aborted("Time limit exceeded".to_string())
        );
    }
}
