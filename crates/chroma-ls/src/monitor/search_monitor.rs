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

//! Monitoring interface for coloring searches.
//!
//! Monitors observe the lifecycle of a search (start, every step, verification
//! corrections, end) and may stop it early by returning
//! `SearchCommand::Terminate` from `search_command`. The default command is to
//! continue, so a monitor only has to override it when it enforces a limit.

use crate::{config::SearchConfig, result::TerminationReason, stats::SearchStatistics};
use chroma_model::{coloring::Coloring, graph::Graph};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// A snapshot of the search position handed to monitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchProgress {
    /// Steps taken so far.
    pub step: u64,
    /// Distinct conflicting edges according to the incremental total.
    pub conflicting_edges: usize,
    /// Current number of consecutive hill-climb moves.
    pub hill_climb_streak: u64,
}

/// A monitor for coloring searches.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once, before the first step.
    fn on_start(&mut self, graph: &Graph, config: &SearchConfig, progress: &SearchProgress);

    /// Called after every step.
    fn on_step(
        &mut self,
        coloring: &Coloring,
        progress: &SearchProgress,
        statistics: &SearchStatistics,
    );

    /// Called when a bulk recount disagreed with the incremental total and replaced it.
    fn on_reconcile(
        &mut self,
        _incremental_edges: usize,
        _recounted_edges: usize,
        _statistics: &SearchStatistics,
    ) {
    }

    /// Called once, when the search reaches a terminal state.
    fn on_end(
        &mut self,
        coloring: &Coloring,
        reason: &TerminationReason,
        statistics: &SearchStatistics,
    );

    /// Determines the command for the next step of the search.
    fn search_command(&mut self, _statistics: &SearchStatistics) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor {{ name: {} }}", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor: {}", self.name())
    }
}
