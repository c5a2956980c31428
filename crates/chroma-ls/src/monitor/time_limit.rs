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

//! Time-based termination for coloring searches.
//!
//! `TimeLimitMonitor` stops a search once a wall-clock duration has elapsed.
//! Clock reads are throttled with a step mask: the clock is only consulted
//! when `steps & mask == 0`. The default mask `0x0FFF` checks roughly every
//! 4096 steps; `with_mask` trades responsiveness for overhead.

use crate::{
    config::SearchConfig,
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchProgress},
    result::TerminationReason,
    stats::SearchStatistics,
};
use chroma_model::{coloring::Coloring, graph::Graph};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    start_time: Instant,
    time_limit: Duration,
    clock_check_mask: u64,
}

impl TimeLimitMonitor {
    /// Checks the clock every 4096 steps.
    const DEFAULT_STEP_CLOCK_CHECK_MASK: u64 = 0x0FFF;

    pub fn new(time_limit: Duration) -> Self {
        Self::with_mask(time_limit, Self::DEFAULT_STEP_CLOCK_CHECK_MASK)
    }

    /// Lower mask values check more often; higher values check less often.
    pub fn with_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            time_limit,
            clock_check_mask,
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl SearchMonitor for TimeLimitMonitor {
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_start(&mut self, _graph: &Graph, _config: &SearchConfig, _progress: &SearchProgress) {
        self.start_time = Instant::now();
    }

    fn on_step(
        &mut self,
        _coloring: &Coloring,
        _progress: &SearchProgress,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_end(
        &mut self,
        _coloring: &Coloring,
        _reason: &TerminationReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("Time limit exceeded".to_string());
        }
        SearchCommand::Continue
    }
}
