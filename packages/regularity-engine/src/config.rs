//! Driver configuration.
//!
//! `RegularParams` mirrors the parameters record of the regularity test:
//! a small set of independent toggles plus one policy enum, assembled
//! through presets with optional overrides rather than one flat
//! constructor call.

use crate::errors::{RegularityError, RegularityResult};
use serde::{Deserialize, Serialize};

/// Policy for picking among several valid 3-separations in S9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreeSumStrategy {
    /// Take the first 3-separation the search encounters.
    #[default]
    FirstFound,
    /// Prefer the 3-separation whose two sides share the fewest elements
    /// beyond the mandatory three-element separator.
    MinimizeSeparatorOverlap,
}

/// Parameters controlling the decomposition driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularParams {
    /// When true, S2/S3 (direct graphicness/cographicness) are attempted
    /// on any node, not just ones with ≤3 rows or columns.
    pub direct_graphicness: bool,
    /// When false, S5 is skipped: the pipeline flag is set directly
    /// without running series-parallel reduction.
    pub series_parallel: bool,
    /// When true, the driver never early-exits once irregularity is
    /// found; it keeps pumping the queue to build the full tree.
    pub complete_tree: bool,
    /// Policy for S9 when multiple 3-separations are available.
    pub three_sum_strategy: ThreeSumStrategy,
}

impl Default for RegularParams {
    fn default() -> Self {
        Self {
            direct_graphicness: false,
            series_parallel: true,
            complete_tree: false,
            three_sum_strategy: ThreeSumStrategy::default(),
        }
    }
}

impl RegularParams {
    /// Preset used by callers that only want a yes/no verdict as cheaply
    /// as possible: early-exits on the first irregularity found.
    pub fn fast() -> Self {
        Self::default()
    }

    /// Preset for callers that want the complete decomposition tree even
    /// when the matrix turns out irregular, and are willing to pay for
    /// direct graphicness/cographicness attempts at every node.
    pub fn thorough() -> Self {
        Self {
            direct_graphicness: true,
            series_parallel: true,
            complete_tree: true,
            three_sum_strategy: ThreeSumStrategy::MinimizeSeparatorOverlap,
        }
    }

    pub fn with_complete_tree(mut self, complete_tree: bool) -> Self {
        self.complete_tree = complete_tree;
        self
    }

    pub fn with_direct_graphicness(mut self, direct_graphicness: bool) -> Self {
        self.direct_graphicness = direct_graphicness;
        self
    }

    pub fn with_series_parallel(mut self, series_parallel: bool) -> Self {
        self.series_parallel = series_parallel;
        self
    }

    pub fn with_three_sum_strategy(mut self, strategy: ThreeSumStrategy) -> Self {
        self.three_sum_strategy = strategy;
        self
    }

    /// Called once by both driver entry points before anything else
    /// runs. `time_limit_secs <= 0.0` is the documented "unlimited"
    /// sentinel (§6); the only thing left to reject is a budget that
    /// can never be compared against meaningfully at all.
    pub fn validate(&self, time_limit_secs: f64) -> RegularityResult<()> {
        if time_limit_secs.is_nan() {
            return Err(RegularityError::invalid_input(
                "time_limit_secs must not be NaN",
            ));
        }
        Ok(())
    }
}
