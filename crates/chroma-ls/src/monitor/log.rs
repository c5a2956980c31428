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

//! Periodic progress logging through the `log` facade.
//!
//! `LogMonitor` emits one `info` line every `step_interval` steps with the step
//! number, the distinct conflicting edges, the hill-climb streak, and elapsed
//! time, plus a summary line when the search ends. Output goes wherever the
//! application's logger sends it; nothing is printed without one.

use crate::{
    config::SearchConfig,
    monitor::search_monitor::{SearchMonitor, SearchProgress},
    result::TerminationReason,
    stats::SearchStatistics,
};
use chroma_model::{coloring::Coloring, graph::Graph};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    step_interval: u64,
    reports: u64,
}

impl LogMonitor {
    /// Default number of steps between two progress lines.
    pub const DEFAULT_STEP_INTERVAL: u64 = 1000;

    /// Creates a monitor that reports every `step_interval` steps.
    ///
    /// An interval of zero disables the periodic lines; start and end are still logged.
    pub fn new(step_interval: u64) -> Self {
        Self {
            start_time: Instant::now(),
            step_interval,
            reports: 0,
        }
    }

    /// Number of periodic progress lines emitted so far.
    #[inline]
    pub fn reports(&self) -> u64 {
        self.reports
    }

    #[inline]
    pub fn step_interval(&self) -> u64 {
        self.step_interval
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_STEP_INTERVAL)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LogMonitor(step_interval: {})", self.step_interval)
    }
}

impl SearchMonitor for LogMonitor {
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_start(&mut self, graph: &Graph, config: &SearchConfig, progress: &SearchProgress) {
        self.start_time = Instant::now();
        self.reports = 0;
        log::info!(
            "Coloring {} with {}; initial conflicting edges: {}",
            graph,
            config,
            progress.conflicting_edges
        );
    }

    fn on_step(
        &mut self,
        _coloring: &Coloring,
        progress: &SearchProgress,
        _statistics: &SearchStatistics,
    ) {
        if self.step_interval == 0 || progress.step % self.step_interval != 0 {
            return;
        }
        self.reports += 1;
        log::info!(
            "Step {}, conflicting edges: {}, hill climb streak: {}, elapsed: {:.2}s",
            progress.step,
            progress.conflicting_edges,
            progress.hill_climb_streak,
            self.start_time.elapsed().as_secs_f64()
        );
    }

    fn on_reconcile(
        &mut self,
        incremental_edges: usize,
        recounted_edges: usize,
        statistics: &SearchStatistics,
    ) {
        log::debug!(
            "Step {}: incremental count {} replaced by recount {}",
            statistics.steps,
            incremental_edges,
            recounted_edges
        );
    }

    fn on_end(
        &mut self,
        coloring: &Coloring,
        reason: &TerminationReason,
        statistics: &SearchStatistics,
    ) {
        log::info!(
            "Search finished after {} steps in {:.2}s: {} ({} colors used, best conflicting edges: {})",
            statistics.steps,
            self.start_time.elapsed().as_secs_f64(),
            reason,
            coloring.num_colors_used(),
            statistics.best_conflicts
        );
    }
}
