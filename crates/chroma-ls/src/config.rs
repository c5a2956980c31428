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

//! Search parameters.
//!
//! `SearchConfig` can only be obtained through `SearchConfigBuilder::build`,
//! which validates every field, so the engine never has to re-check them.
//! The step budget is a `u64`; a negative budget cannot be expressed.

use crate::error::InvalidConfigurationError;

/// Validated parameters of a coloring search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    num_colors: usize,
    max_steps: u64,
    random_walk_probability: f64,
    min_hill_climb_streak: u64,
    parallel_verification: bool,
    verification_interval: u64,
}

impl SearchConfig {
    /// Default probability of a random-walk move once the forced streak is over.
    pub const DEFAULT_RANDOM_WALK_PROBABILITY: f64 = 0.3;

    /// Default number of steps between two verification passes.
    pub const DEFAULT_VERIFICATION_INTERVAL: u64 = 1000;

    /// Starts a builder for `num_colors` colors and a budget of `max_steps` steps.
    #[inline]
    pub fn builder(num_colors: usize, max_steps: u64) -> SearchConfigBuilder {
        SearchConfigBuilder::new(num_colors, max_steps)
    }

    /// Number of colors `k`; colors range over `0..k`.
    #[inline]
    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    /// Maximum number of steps before the search is exhausted.
    #[inline]
    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Probability of a random-walk move when a move is not forced.
    #[inline]
    pub fn random_walk_probability(&self) -> f64 {
        self.random_walk_probability
    }

    /// Number of consecutive hill-climb moves forced before a random walk may happen.
    #[inline]
    pub fn min_hill_climb_streak(&self) -> u64 {
        self.min_hill_climb_streak
    }

    /// Whether the bulk counter periodically cross-checks the incremental total.
    #[inline]
    pub fn parallel_verification(&self) -> bool {
        self.parallel_verification
    }

    /// Number of steps between verification passes.
    #[inline]
    pub fn verification_interval(&self) -> u64 {
        self.verification_interval
    }
}

impl std::fmt::Display for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchConfig(colors: {}, max_steps: {}, random_walk: {}, min_hill_climb: {}, verification: ",
            self.num_colors,
            self.max_steps,
            self.random_walk_probability,
            self.min_hill_climb_streak
        )?;
        if self.parallel_verification {
            write!(f, "every {} steps)", self.verification_interval)
        } else {
            write!(f, "off)")
        }
    }
}

/// Builder for `SearchConfig`.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfigBuilder {
    num_colors: usize,
    max_steps: u64,
    random_walk_probability: f64,
    min_hill_climb_streak: u64,
    parallel_verification: bool,
    verification_interval: u64,
}

impl SearchConfigBuilder {
    /// Creates a builder with the default optional parameters.
    #[inline]
    pub fn new(num_colors: usize, max_steps: u64) -> Self {
        Self {
            num_colors,
            max_steps,
            random_walk_probability: SearchConfig::DEFAULT_RANDOM_WALK_PROBABILITY,
            min_hill_climb_streak: 0,
            parallel_verification: false,
            verification_interval: SearchConfig::DEFAULT_VERIFICATION_INTERVAL,
        }
    }

    #[inline]
    pub fn with_random_walk_probability(mut self, probability: f64) -> Self {
        self.random_walk_probability = probability;
        self
    }

    #[inline]
    pub fn with_min_hill_climb_streak(mut self, streak: u64) -> Self {
        self.min_hill_climb_streak = streak;
        self
    }

    #[inline]
    pub fn with_parallel_verification(mut self, enabled: bool) -> Self {
        self.parallel_verification = enabled;
        self
    }

    #[inline]
    pub fn with_verification_interval(mut self, interval: u64) -> Self {
        self.verification_interval = interval;
        self
    }

    /// Validates the parameters and produces the configuration.
    pub fn build(self) -> Result<SearchConfig, InvalidConfigurationError> {
        if self.num_colors == 0 {
            return Err(InvalidConfigurationError::NoColors);
        }
        // `contains` is false for NaN.
        if !(0.0..=1.0).contains(&self.random_walk_probability) {
            return Err(InvalidConfigurationError::ProbabilityOutOfRange(
                self.random_walk_probability,
            ));
        }
        if self.verification_interval == 0 {
            return Err(InvalidConfigurationError::ZeroVerificationInterval);
        }

        Ok(SearchConfig {
            num_colors: self.num_colors,
            max_steps: self.max_steps,
            random_walk_probability: self.random_walk_probability,
            min_hill_climb_streak: self.min_hill_climb_streak,
            parallel_verification: self.parallel_verification,
            verification_interval: self.verification_interval,
        })
    }
}
