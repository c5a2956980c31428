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

//! Search outcome and termination reporting.
//!
//! `SearchOutcome` bundles the final coloring, the reason the search stopped,
//! the run statistics, and the conflict count of the final coloring. Success
//! means the search reached a coloring in which no vertex has a conflict.

use crate::stats::SearchStatistics;
use chroma_model::coloring::Coloring;

/// Lifecycle state of a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SearchStatus {
    /// Steps remain and conflicts remain.
    Running,
    /// A terminal state was reached.
    Terminated(TerminationReason),
}

impl SearchStatus {
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, SearchStatus::Running)
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchStatus::Running => write!(f, "Running"),
            SearchStatus::Terminated(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// No vertex has a conflict: the coloring is proper.
    Succeeded,

    /// The step budget ran out with conflicts remaining.
    Exhausted,

    /// A monitor requested termination.
    /// The string contains information about the reason for abortion.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Succeeded => write!(f, "Succeeded"),
            TerminationReason::Exhausted => write!(f, "Step Budget Exhausted"),
            TerminationReason::Aborted(msg) => write!(f, "Aborted: {}", msg),
        }
    }
}

/// Result of a coloring search after termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    termination_reason: TerminationReason,
    coloring: Coloring,
    statistics: SearchStatistics,
    conflicting_edges: usize,
}

impl SearchOutcome {
    #[inline]
    pub fn new(
        termination_reason: TerminationReason,
        coloring: Coloring,
        statistics: SearchStatistics,
        conflicting_edges: usize,
    ) -> Self {
        Self {
            termination_reason,
            coloring,
            statistics,
            conflicting_edges,
        }
    }

    /// Returns `true` if the search ended with a proper coloring.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.termination_reason == TerminationReason::Succeeded
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn coloring(&self) -> &Coloring {
        &self.coloring
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Number of conflicting edges in the final coloring, as tracked by the search.
    #[inline]
    pub fn conflicting_edges(&self) -> usize {
        self.conflicting_edges
    }

    /// Splits the outcome into the final coloring and the success flag.
    #[inline]
    pub fn into_parts(self) -> (Coloring, bool) {
        let success = self.is_success();
        (self.coloring, success)
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search Outcome")?;
        writeln!(f, "   Termination:        {}", self.termination_reason)?;
        writeln!(f, "   Conflicting Edges:  {}", self.conflicting_edges)?;
        writeln!(f, "   Colors Used:        {}", self.coloring.num_colors_used())?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_parts_reports_success() {
        let coloring: Coloring = [0, 1].into_iter().collect();
        let outcome = SearchOutcome::new(
            TerminationReason::Succeeded,
            coloring.clone(),
            SearchStatistics::default(),
            0,
        );
        assert!(outcome.is_success());
        assert_eq!(outcome.into_parts(), (coloring, true));
    }

    #[test]
    fn test_aborted_is_not_success() {
        let outcome = SearchOutcome::new(
            TerminationReason::Aborted("Time limit exceeded".to_string()),
            Coloring::default(),
            SearchStatistics::default(),
            3,
        );
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.termination_reason().to_string(),
            "Aborted: Time limit exceeded"
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SearchStatus::Running.to_string(), "Running");
        assert!(SearchStatus::Running.is_running());
        let done = SearchStatus::Terminated(TerminationReason::Exhausted);
        assert!(!done.is_running());
        assert_eq!(done.to_string(), "Step Budget Exhausted");
    }
}
