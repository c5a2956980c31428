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

//! Move-type selection: forced hill climbing mixed with random walks.
//!
//! The policy counts consecutive hill-climb moves in a streak. While the streak
//! is shorter than the configured minimum, every move is a hill climb. After
//! that, each step draws one uniform number: below the random-walk probability
//! it is a random walk and the streak resets, otherwise it is another hill
//! climb. A minimum of zero makes every step eligible for a random walk.

use rand::Rng;

/// The kind of move the search performs on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Recolor to the minimal-delta alternative color.
    HillClimb,
    /// Recolor to a uniformly random color, possibly the current one.
    RandomWalk,
}

impl std::fmt::Display for MoveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveKind::HillClimb => write!(f, "HillClimb"),
            MoveKind::RandomWalk => write!(f, "RandomWalk"),
        }
    }
}

/// Streak-gated hill-climb / random-walk policy.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkPolicy {
    random_walk_probability: f64,
    min_hill_climb_streak: u64,
    streak: u64,
}

impl WalkPolicy {
    #[inline]
    pub fn new(random_walk_probability: f64, min_hill_climb_streak: u64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&random_walk_probability),
            "called `WalkPolicy::new` with probability {} outside [0, 1]",
            random_walk_probability
        );
        Self {
            random_walk_probability,
            min_hill_climb_streak,
            streak: 0,
        }
    }

    /// Current number of consecutive hill-climb moves.
    #[inline]
    pub fn streak(&self) -> u64 {
        self.streak
    }

    /// Returns `true` if the next move is a hill climb regardless of randomness.
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.streak < self.min_hill_climb_streak
    }

    /// Decides the next move and updates the streak.
    ///
    /// Draws from `rng` only when the move is not forced.
    pub fn next_move<R>(&mut self, rng: &mut R) -> MoveKind
    where
        R: Rng + ?Sized,
    {
        if self.is_forced() {
            self.streak = self.streak.saturating_add(1);
            return MoveKind::HillClimb;
        }

        if rng.random::<f64>() < self.random_walk_probability {
            self.streak = 0;
            MoveKind::RandomWalk
        } else {
            self.streak = self.streak.saturating_add(1);
            MoveKind::HillClimb
        }
    }
}
