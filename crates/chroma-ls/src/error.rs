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

//! Errors raised before a search starts.
//!
//! A search that fails to reach zero conflicts is a normal outcome and is
//! reported through `SearchOutcome`, never through this type.

use chroma_model::index::{ColorIndex, VertexIndex};

/// The error type for rejected search parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidConfigurationError {
    /// The color count `k` is zero.
    NoColors,
    /// The random-walk probability is NaN or outside `[0, 1]`.
    ProbabilityOutOfRange(f64),
    /// Periodic verification was configured with an interval of zero steps.
    ZeroVerificationInterval,
    /// A warm-start coloring does not cover exactly the vertices of the graph.
    InitialColoringLength {
        /// Number of vertices in the graph.
        expected: usize,
        /// Number of entries in the supplied coloring.
        found: usize,
    },
    /// A warm-start coloring uses a color outside `0..num_colors`.
    InitialColorOutOfRange {
        /// The vertex carrying the bad color.
        vertex: VertexIndex,
        /// The color found.
        color: ColorIndex,
        /// The configured number of colors.
        num_colors: usize,
    },
}

impl std::fmt::Display for InvalidConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoColors => write!(f, "The number of colors must be positive"),
            Self::ProbabilityOutOfRange(p) => {
                write!(f, "Random walk probability {} is not in [0, 1]", p)
            }
            Self::ZeroVerificationInterval => {
                write!(f, "Verification interval must be at least one step")
            }
            Self::InitialColoringLength { expected, found } => write!(
                f,
                "Initial coloring has {} entries but the graph has {} vertices",
                found, expected
            ),
            Self::InitialColorOutOfRange {
                vertex,
                color,
                num_colors,
            } => write!(
                f,
                "Initial coloring assigns {} to {} but only {} colors are available",
                color, vertex, num_colors
            ),
        }
    }
}

impl std::error::Error for InvalidConfigurationError {}
