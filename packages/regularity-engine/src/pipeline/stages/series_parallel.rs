//! S5: series-parallel reduction. Repeatedly deletes zero rows/columns
//! (loops/coloops) and rows/columns with exactly one nonzero entry
//! (series/parallel elements) until a fixed point. What remains, if
//! anything, is handed off to the wheel-minor stage as `dense_matrix`.

use crate::domain::node::{DecompositionKind, DecompositionNode};
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::{NodePath, Task};
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use std::time::Instant;

pub const STAGE_NAME: &str = "series_parallel";

pub fn run(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(STAGE_NAME)?;
    let node = node_at_mut(root, path);

    if !env.params.series_parallel {
        node.tested_series_parallel = true;
        queue.push(Task::new(path.clone()));
        env.record_stage(STAGE_NAME, start.elapsed());
        return Ok(());
    }

    let mut dense = node.matrix.to_dense();
    let mut row_names = node.row_names.clone();
    let mut col_names = node.column_names.clone();

    loop {
        env.check_time_limit(STAGE_NAME)?;
        if let Some(r) = (0..dense.rows).find(|&r| dense.is_zero_row(r)) {
            dense.delete_row(r);
            row_names.remove(r);
            continue;
        }
        if let Some(c) = (0..dense.cols).find(|&c| dense.is_zero_col(c)) {
            dense.delete_col(c);
            col_names.remove(c);
            continue;
        }
        if let Some(r) = (0..dense.rows).find(|&r| dense.row_nonzero_count(r) == 1) {
            dense.delete_row(r);
            row_names.remove(r);
            continue;
        }
        if let Some(c) = (0..dense.cols).find(|&c| dense.col_nonzero_count(c) == 1) {
            dense.delete_col(c);
            col_names.remove(c);
            continue;
        }
        break;
    }

    if dense.rows == 0 && dense.cols == 0 {
        node.finalize_as(DecompositionKind::SeriesParallel);
    } else {
        node.dense_matrix = Some(dense);
        node.dense_row_names = Some(row_names);
        node.dense_col_names = Some(col_names);
        node.tested_series_parallel = true;
        queue.push(Task::new(path.clone()));
    }

    env.record_stage(STAGE_NAME, start.elapsed());
    Ok(())
}
