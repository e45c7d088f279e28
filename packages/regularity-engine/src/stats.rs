//! Per-stage instrumentation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Count and accumulated wall-clock time for one stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StageStats {
    pub count: u64,
    pub time: Duration,
}

/// Aggregate counters for a single `test`/`complete_decomposition` run.
///
/// Stats are writer-owned by the caller: the driver only ever borrows
/// `&mut RegularStats` and never retains it, so there is no locking to
/// coordinate.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegularStats {
    per_stage: BTreeMap<&'static str, StageStats>,
    pub total_count: u64,
    pub total_time: Duration,
}

impl RegularStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: &'static str, elapsed: Duration) {
        let entry = self.per_stage.entry(stage).or_default();
        entry.count += 1;
        entry.time += elapsed;
        self.total_count += 1;
        self.total_time += elapsed;
    }

    pub fn stage(&self, stage: &str) -> StageStats {
        self.per_stage.get(stage).copied().unwrap_or_default()
    }
}

impl fmt::Display for RegularStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "regularity stats: {} calls, {:?} total", self.total_count, self.total_time)?;
        for (stage, stats) in &self.per_stage {
            writeln!(f, "  {stage:<24} {:>6} calls  {:?}", stats.count, stats.time)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accumulates() {
        let mut stats = RegularStats::new();
        stats.record("one_sum", Duration::from_millis(5));
        stats.record("one_sum", Duration::from_millis(3));

        let stage = stats.stage("one_sum");
        assert_eq!(stage.count, 2);
        assert_eq!(stage.time, Duration::from_millis(8));
        assert_eq!(stats.total_count, 2);
    }

    #[test]
    fn test_unknown_stage_is_zero() {
        let stats = RegularStats::new();
        assert_eq!(stats.stage("nonexistent").count, 0);
    }
}
