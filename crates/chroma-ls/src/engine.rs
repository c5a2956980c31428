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

//! Resumable local search driver for graph coloring.
//!
//! `ColoringSearch` owns everything a run mutates: the coloring, its
//! `ConflictState`, the move policy with its hill-climb streak, the step
//! counter, and the random source. Each step picks a conflicted vertex
//! uniformly at random, asks the `WalkPolicy` for a move kind, recolors the
//! vertex (best alternative color for a hill climb, uniform color for a random
//! walk), and updates the accounting incrementally. When periodic verification
//! is enabled, a `BulkConflictCounter` recounts the conflicting edges every
//! `verification_interval` steps and a disagreeing incremental total is
//! overwritten; the per-vertex counts are left as they are.
//!
//! Termination is checked before every step, in this order: no conflicted
//! vertex (success), step budget reached (exhausted), monitor request
//! (aborted). Because state persists between calls, `run_steps` can drive the
//! search in batches and `run` finishes it.

use crate::{
    config::SearchConfig,
    conflict::ConflictState,
    counter::BulkConflictCounter,
    error::InvalidConfigurationError,
    eval::{Move, MoveEvaluator, evaluate_move},
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchProgress},
    policy::{MoveKind, WalkPolicy},
    result::{SearchOutcome, SearchStatus, TerminationReason},
    stats::SearchStatistics,
};
use chroma_model::{
    coloring::Coloring,
    graph::Graph,
    index::{ColorIndex, VertexIndex},
    neighbors::NeighborIndex,
};
use rand::Rng;
use std::time::Instant;

/// One coloring search over a borrowed graph.
#[derive(Debug, Clone)]
pub struct ColoringSearch<'g, R, C> {
    graph: &'g Graph,
    neighbors: NeighborIndex,
    config: SearchConfig,
    rng: R,
    counter: C,
    coloring: Coloring,
    conflicts: ConflictState,
    evaluator: MoveEvaluator,
    policy: WalkPolicy,
    conflicted: Vec<VertexIndex>,
    statistics: SearchStatistics,
    status: SearchStatus,
    started: bool,
}

impl<'g, R, C> ColoringSearch<'g, R, C>
where
    R: Rng,
    C: BulkConflictCounter,
{
    /// Prepares a search starting from a coloring drawn uniformly from `rng`.
    pub fn new(graph: &'g Graph, config: SearchConfig, mut rng: R, counter: C) -> Self {
        let coloring = Coloring::random(graph.num_vertices(), config.num_colors(), &mut rng);
        Self::from_parts(graph, config, rng, counter, coloring)
    }

    /// Prepares a search starting from `initial`.
    ///
    /// Fails if `initial` does not have one entry per vertex or uses a color
    /// outside `0..num_colors`.
    pub fn with_initial_coloring(
        graph: &'g Graph,
        config: SearchConfig,
        initial: Coloring,
        rng: R,
        counter: C,
    ) -> Result<Self, InvalidConfigurationError> {
        if initial.len() != graph.num_vertices() {
            return Err(InvalidConfigurationError::InitialColoringLength {
                expected: graph.num_vertices(),
                found: initial.len(),
            });
        }
        if let Some((v, &color)) = initial
            .colors()
            .iter()
            .enumerate()
            .find(|(_, c)| c.get() >= config.num_colors())
        {
            return Err(InvalidConfigurationError::InitialColorOutOfRange {
                vertex: VertexIndex::new(v),
                color,
                num_colors: config.num_colors(),
            });
        }
        Ok(Self::from_parts(graph, config, rng, counter, initial))
    }

    fn from_parts(
        graph: &'g Graph,
        config: SearchConfig,
        rng: R,
        counter: C,
        coloring: Coloring,
    ) -> Self {
        let neighbors = NeighborIndex::new(graph);
        let conflicts = ConflictState::build(graph, &coloring);
        let policy = WalkPolicy::new(
            config.random_walk_probability(),
            config.min_hill_climb_streak(),
        );
        let mut statistics = SearchStatistics::default();
        statistics.observe_conflicts(conflicts.num_conflicting_edges());

        Self {
            graph,
            neighbors,
            evaluator: MoveEvaluator::preallocated(config.num_colors()),
            conflicted: Vec::with_capacity(graph.num_vertices()),
            config,
            rng,
            counter,
            coloring,
            conflicts,
            policy,
            statistics,
            status: SearchStatus::Running,
            started: false,
        }
    }

    #[inline]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn coloring(&self) -> &Coloring {
        &self.coloring
    }

    #[inline]
    pub fn conflicts(&self) -> &ConflictState {
        &self.conflicts
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// Number of steps taken so far.
    #[inline]
    pub fn step(&self) -> u64 {
        self.statistics.steps
    }

    #[inline]
    pub fn hill_climb_streak(&self) -> u64 {
        self.policy.streak()
    }

    #[inline]
    fn progress(&self) -> SearchProgress {
        SearchProgress {
            step: self.statistics.steps,
            conflicting_edges: self.conflicts.num_conflicting_edges(),
            hill_climb_streak: self.policy.streak(),
        }
    }

    /// Runs until the search terminates.
    pub fn run<M>(&mut self, monitor: &mut M) -> &SearchStatus
    where
        M: SearchMonitor + ?Sized,
    {
        self.run_steps(u64::MAX, monitor)
    }

    /// Runs at most `max_batch` further steps.
    ///
    /// Returns `SearchStatus::Running` if the batch ran out before a terminal
    /// state was reached. Calling this on a terminated search does nothing.
    pub fn run_steps<M>(&mut self, max_batch: u64, monitor: &mut M) -> &SearchStatus
    where
        M: SearchMonitor + ?Sized,
    {
        if !self.status.is_running() {
            return &self.status;
        }

        let start_time = Instant::now();

        if !self.started {
            self.started = true;
            log::debug!(
                "Starting coloring search on {} with {} (counter: {})",
                self.graph,
                self.config,
                self.counter.name()
            );
            let progress = self.progress();
            monitor.on_start(self.graph, &self.config, &progress);
        }

        let mut remaining = max_batch;
        let outcome = loop {
            self.conflicts.collect_conflicted(&mut self.conflicted);
            if self.conflicted.is_empty() {
                break Some(TerminationReason::Succeeded);
            }

            if self.statistics.steps >= self.config.max_steps() {
                break Some(TerminationReason::Exhausted);
            }

            if let SearchCommand::Terminate(reason) = monitor.search_command(&self.statistics) {
                break Some(TerminationReason::Aborted(reason));
            }

            if remaining == 0 {
                break None;
            }
            remaining -= 1;

            self.perform_step(monitor);
        };

        self.statistics.add_time(start_time.elapsed());

        if let Some(reason) = outcome {
            log::debug!(
                "Coloring search terminated after {} steps: {} ({} conflicting edges)",
                self.statistics.steps,
                reason,
                self.conflicts.num_conflicting_edges()
            );
            monitor.on_end(&self.coloring, &reason, &self.statistics);
            self.status = SearchStatus::Terminated(reason);
        }

        &self.status
    }

    /// Executes one step. The caller guarantees `self.conflicted` is current and non-empty.
    fn perform_step<M>(&mut self, monitor: &mut M)
    where
        M: SearchMonitor + ?Sized,
    {
        debug_assert!(
            !self.conflicted.is_empty(),
            "called `ColoringSearch::perform_step` without a conflicted vertex"
        );

        let pick = self.rng.random_range(0..self.conflicted.len());
        let vertex = self.conflicted[pick];
        let current = self.coloring.color_of(vertex);
        let num_colors = self.config.num_colors();

        let kind = self.policy.next_move(&mut self.rng);
        let new_color = match kind {
            MoveKind::HillClimb => {
                self.statistics.on_hill_climb();
                self.evaluator
                    .best_move(vertex, num_colors, &self.neighbors, &self.coloring)
                    .map_or(current, |m| m.color)
            }
            MoveKind::RandomWalk => {
                self.statistics.on_random_walk();
                ColorIndex::new(self.rng.random_range(0..num_colors))
            }
        };

        if log::log_enabled!(log::Level::Trace) {
            let delta = evaluate_move(vertex, new_color, &self.neighbors, &self.coloring);
            log::trace!(
                "Step {}: {} {}",
                self.statistics.steps.saturating_add(1),
                kind,
                Move {
                    vertex,
                    color: new_color,
                    delta
                }
            );
        }

        if new_color == current {
            self.statistics.on_noop();
        } else {
            self.conflicts
                .apply_move(vertex, new_color, &self.neighbors, &mut self.coloring);
        }

        self.statistics.on_step();
        self.statistics
            .observe_conflicts(self.conflicts.num_conflicting_edges());

        if self.config.parallel_verification()
            && self.statistics.steps % self.config.verification_interval() == 0
        {
            self.verify(monitor);
        }

        let progress = self.progress();
        monitor.on_step(&self.coloring, &progress, &self.statistics);
    }

    /// Cross-checks the incremental total against the bulk counter.
    fn verify<M>(&mut self, monitor: &mut M)
    where
        M: SearchMonitor + ?Sized,
    {
        let recounted = self.counter.count_conflicts(self.graph, &self.coloring);
        self.statistics.on_verification();

        let incremental = self.conflicts.num_conflicting_edges();
        if self.conflicts.reconcile(recounted) {
            self.statistics.on_reconciliation();
            log::debug!(
                "Step {}: {} reported {} conflicting edges, incremental total was {}",
                self.statistics.steps,
                self.counter.name(),
                recounted,
                incremental
            );
            monitor.on_reconcile(incremental, recounted, &self.statistics);
        }
    }

    /// Finishes the search and returns its outcome.
    ///
    /// A search that is still running is reported as aborted.
    pub fn into_outcome(self) -> SearchOutcome {
        let reason = match self.status {
            SearchStatus::Terminated(reason) => reason,
            SearchStatus::Running => TerminationReason::Aborted("Search not finished".to_string()),
        };
        let conflicting_edges = self.conflicts.num_conflicting_edges();
        SearchOutcome::new(reason, self.coloring, self.statistics, conflicting_edges)
    }
}
