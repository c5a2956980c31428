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

//! Statistics reporting for coloring searches.
//!
//! `SearchStatistics` tracks aggregate counters over a run: steps taken, the
//! split between hill-climb and random-walk moves, moves that left the color
//! unchanged, verification passes and the corrections they made, the lowest
//! conflict count seen, and elapsed time. Counters saturate instead of
//! overflowing so they stay safe in the hot loop.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchStatistics {
    /// Number of steps performed.
    pub steps: u64,

    /// Number of hill-climb moves.
    pub hill_climb_moves: u64,

    /// Number of random-walk moves.
    pub random_walk_moves: u64,

    /// Number of moves whose chosen color equaled the current one.
    pub noop_moves: u64,

    /// Number of bulk recounts performed.
    pub verifications: u64,

    /// Number of bulk recounts that disagreed with the incremental total.
    pub reconciliations: u64,

    /// Lowest number of conflicting edges observed, including the initial coloring.
    pub best_conflicts: usize,

    /// Total time spent inside the search loop.
    pub time_total: Duration,
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self {
            steps: 0,
            hill_climb_moves: 0,
            random_walk_moves: 0,
            noop_moves: 0,
            verifications: 0,
            reconciliations: 0,
            best_conflicts: usize::MAX,
            time_total: Duration::ZERO,
        }
    }
}

impl SearchStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_hill_climb(&mut self) {
        self.hill_climb_moves = self.hill_climb_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_random_walk(&mut self) {
        self.random_walk_moves = self.random_walk_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_noop(&mut self) {
        self.noop_moves = self.noop_moves.saturating_add(1);
    }

    #[inline]
    pub fn on_verification(&mut self) {
        self.verifications = self.verifications.saturating_add(1);
    }

    #[inline]
    pub fn on_reconciliation(&mut self) {
        self.reconciliations = self.reconciliations.saturating_add(1);
    }

    /// Records a conflict count, keeping the minimum.
    #[inline]
    pub fn observe_conflicts(&mut self, conflicts: usize) {
        self.best_conflicts = self.best_conflicts.min(conflicts);
    }

    /// Adds `duration` to the accumulated search time.
    #[inline]
    pub fn add_time(&mut self, duration: Duration) {
        self.time_total = self.time_total.saturating_add(duration);
    }

    /// Moves that actually changed a color.
    #[inline]
    pub fn effective_moves(&self) -> u64 {
        self.steps.saturating_sub(self.noop_moves)
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Chroma-LS Statistics:")?;
        writeln!(f, "   Steps:              {}", self.steps)?;
        writeln!(f, "   Hill Climb Moves:   {}", self.hill_climb_moves)?;
        writeln!(f, "   Random Walk Moves:  {}", self.random_walk_moves)?;
        writeln!(f, "   No-op Moves:        {}", self.noop_moves)?;
        writeln!(f, "   Verifications:      {}", self.verifications)?;
        writeln!(f, "   Reconciliations:    {}", self.reconciliations)?;
        if self.best_conflicts == usize::MAX {
            writeln!(f, "   Best Conflicts:     -")?;
        } else {
            writeln!(f, "   Best Conflicts:     {}", self.best_conflicts)?;
        }
        writeln!(f, "   Total Time:         {:?}", self.time_total)?;
        Ok(())
    }
}
