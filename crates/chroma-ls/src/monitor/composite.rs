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
    monitor::search_monitor::{SearchCommand, SearchMonitor, SearchProgress},
    result::TerminationReason,
    stats::SearchStatistics,
};
use chroma_model::{coloring::Coloring, graph::Graph};

/// Fans every callback out to a list of monitors.
///
/// `search_command` returns the first termination request, in insertion order.
#[derive(Default)]
pub struct CompositeMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl<'a> CompositeMonitor<'a> {
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_boxed_monitor(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn monitors(&self) -> &[Box<dyn SearchMonitor + 'a>] {
        &self.monitors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a> SearchMonitor for CompositeMonitor<'a> {
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_start(&mut self, graph: &Graph, config: &SearchConfig, progress: &SearchProgress) {
        for m in &mut self.monitors {
            m.on_start(graph, config, progress);
        }
    }

    fn on_step(
        &mut self,
        coloring: &Coloring,
        progress: &SearchProgress,
        statistics: &SearchStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_step(coloring, progress, statistics);
        }
    }

    fn on_reconcile(
        &mut self,
        incremental_edges: usize,
        recounted_edges: usize,
        statistics: &SearchStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_reconcile(incremental_edges, recounted_edges, statistics);
        }
    }

    fn on_end(
        &mut self,
        coloring: &Coloring,
        reason: &TerminationReason,
        statistics: &SearchStatistics,
    ) {
        for m in &mut self.monitors {
            m.on_end(coloring, reason, statistics);
        }
    }

    fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
        for m in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = m.search_command(statistics) {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recording<'r> {
        tag: &'static str,
        events: &'r RefCell<Vec<String>>,
        stop_at: Option<u64>,
    }

    impl SearchMonitor for Recording<'_> {
        fn name(&self) -> &str {
            self.tag
        }

        fn on_start(&mut self, _graph: &Graph, _config: &SearchConfig, _progress: &SearchProgress) {
            self.events.borrow_mut().push(format!("{}:start", self.tag));
        }

        fn on_step(
            &mut self,
            _coloring: &Coloring,
            progress: &SearchProgress,
            _statistics: &SearchStatistics,
        ) {
            self.events
                .borrow_mut()
                .push(format!("{}:step{}", self.tag, progress.step));
        }

        fn on_end(
            &mut self,
            _coloring: &Coloring,
            reason: &TerminationReason,
            _statistics: &SearchStatistics,
        ) {
            self.events
                .borrow_mut()
                .push(format!("{}:end:{}", self.tag, reason));
        }

        fn search_command(&mut self, statistics: &SearchStatistics) -> SearchCommand {
            match self.stop_at {
                Some(limit) if statistics.steps >= limit => {
                    SearchCommand::Terminate(format!("{} limit", self.tag))
                }
                _ => SearchCommand::Continue,
            }
        }
    }

    #[test]
    fn test_callbacks_reach_every_monitor_in_order() {
        let events = RefCell::new(Vec::new());
        let mut composite = CompositeMonitor::with_capacity(2);
        composite.add_monitor(Recording {
            tag: "a",
            events: &events,
            stop_at: None,
        });
        composite.add_boxed_monitor(Box::new(Recording {
            tag: "b",
            events: &events,
            stop_at: None,
        }));
        assert_eq!(composite.len(), 2);

        let graph = Graph::empty(1);
        let config = SearchConfig::builder(2, 10).build().unwrap();
        let progress = SearchProgress {
            step: 1,
            ..Default::default()
        };
        let coloring = Coloring::from_iter([0]);
        let stats = SearchStatistics::default();

        composite.on_start(&graph, &config, &progress);
        composite.on_step(&coloring, &progress, &stats);
        composite.on_end(&coloring, &TerminationReason::Succeeded, &stats);

        assert_eq!(
            *events.borrow(),
            vec![
                "a:start",
                "b:start",
                "a:step1",
                "b:step1",
                "a:end:Succeeded",
                "b:end:Succeeded"
            ]
        );
    }

    #[test]
    fn test_first_termination_request_wins() {
        let events = RefCell::new(Vec::new());
        let mut composite = CompositeMonitor::new();
        composite.add_monitor(Recording {
            tag: "late",
            events: &events,
            stop_at: Some(10),
        });
        composite.add_monitor(Recording {
            tag: "early",
            events: &events,
            stop_at: Some(2),
        });

        let mut stats = SearchStatistics::default();
        assert_eq!(composite.search_command(&stats), SearchCommand::Continue);

        stats.steps = 5;
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("early limit".to_string())
        );

        stats.steps = 10;
        assert_eq!(
            composite.search_command(&stats),
            SearchCommand::Terminate("late limit".to_string())
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let mut composite = CompositeMonitor::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&SearchStatistics::default()),
            SearchCommand::Continue
        );
    }
}
