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

use crate::{
    config::SearchConfig,
    monitor::search_monitor::{SearchMonitor, SearchProgress},
    result::TerminationReason,
    stats::SearchStatistics,
};
use chroma_model::{coloring::Coloring, graph::Graph};

/// A monitor that observes nothing and never stops the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl SearchMonitor for NoOpMonitor {
    fn name(&self) -> &str {
        "NoOpMonitor"
    }

    fn on_start(&mut self, _graph: &Graph, _config: &SearchConfig, _progress: &SearchProgress) {}

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
}
