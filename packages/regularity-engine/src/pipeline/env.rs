//! The shared environment every stage call borrows: parameters, the
//! clock and time budget, and an optional handle to the caller's stats.

use crate::config::RegularParams;
use crate::errors::RegularityResult;
use crate::stats::RegularStats;
use std::time::Instant;

/// Environment passed to every stage, bundling what the source's
/// `CMR*` environment object and per-task clock/budget fields covered.
/// Not safe for concurrent use, but this driver is single-threaded.
pub struct RegularEnv<'a> {
    pub params: RegularParams,
    pub stats: Option<&'a mut RegularStats>,
    start: Instant,
    time_limit_secs: f64,
}

impl<'a> RegularEnv<'a> {
    pub fn new(
        params: RegularParams,
        stats: Option<&'a mut RegularStats>,
        time_limit_secs: f64,
    ) -> Self {
        Self {
            params,
            stats,
            start: Instant::now(),
            time_limit_secs,
        }
    }

    /// Cooperative time-budget check: every stage calls this at entry
    /// and after any inner loop that isn't O(rows + cols).
    pub fn check_time_limit(&self, stage: &'static str) -> RegularityResult<()> {
        if self.time_limit_secs > 0.0 {
            let elapsed = self.start.elapsed();
            if elapsed.as_secs_f64() > self.time_limit_secs {
                return Err(crate::errors::RegularityError::time_limit(
                    stage,
                    elapsed.as_millis() as u64,
                ));
            }
        }
        Ok(())
    }

    pub fn record_stage(&mut self, stage: &'static str, elapsed: std::time::Duration) {
        if let Some(stats) = self.stats.as_deref_mut() {
            stats.record(stage, elapsed);
        }
    }
}
