//! S1: one-sum search. Detects a block-diagonal structure (a
//! 1-separation) via union-find over the bipartite row/column
//! incidence graph, grounded on the same disjoint-set pattern the
//! points-to solver in this pipeline's ancestry uses for union of
//! abstract locations.

use crate::domain::node::{DecompositionKind, DecompositionNode};
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::{NodePath, Task};
use crate::domain::union_find::UnionFind;
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use std::time::Instant;

pub const STAGE_NAME: &str = "one_sum";

pub fn run(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(STAGE_NAME)?;

    let node = node_at_mut(root, path);
    let n_rows = node.matrix.num_rows;
    let n_cols = node.matrix.num_cols;

    // A 0xn or nx0 matrix has no rows (or columns) to union at all, so
    // every remaining column (or row) looks like its own isolated
    // component here — that's not a genuine 1-separation, just the
    // absence of one side of the incidence graph. Per §8's boundary
    // behaviour these degenerate matrices are series_parallel, not
    // one_sum; let S5 dispose of them directly.
    if n_rows == 0 || n_cols == 0 {
        node.tested_two_connected = true;
        queue.push(Task::new(path.clone()));
        env.record_stage(STAGE_NAME, start.elapsed());
        return Ok(());
    }

    let mut uf = UnionFind::new(n_rows + n_cols);
    for &(r, c, _v) in node.matrix.entries() {
        uf.union(r as u32, (n_rows + c) as u32);
    }
    let mut components = uf.components_in_first_seen_order();

    if components.len() <= 1 {
        node.tested_two_connected = true;
        queue.push(Task::new(path.clone()));
        env.record_stage(STAGE_NAME, start.elapsed());
        return Ok(());
    }

    // Row-block order: sort components by the smallest row index they
    // contain; components with no row at all (an isolated column) sort
    // after every row-bearing component, ordered by column index.
    components.sort_by_key(|members| {
        let min_row = members
            .iter()
            .filter(|&&x| (x as usize) < n_rows)
            .min()
            .copied();
        match min_row {
            Some(r) => (0u8, r),
            None => (1u8, *members.iter().min().unwrap()),
        }
    });

    node.kind = DecompositionKind::OneSum;
    let is_ternary = node.is_ternary;
    let row_names = node.row_names.clone();
    let col_names = node.column_names.clone();
    let parent_matrix = node.matrix.clone();

    for members in &components {
        let mut rows: Vec<usize> = members
            .iter()
            .filter(|&&x| (x as usize) < n_rows)
            .map(|&x| x as usize)
            .collect();
        let mut cols: Vec<usize> = members
            .iter()
            .filter(|&&x| (x as usize) >= n_rows)
            .map(|&x| x as usize - n_rows)
            .collect();
        rows.sort_unstable();
        cols.sort_unstable();

        let sub_matrix = parent_matrix.submatrix(&rows, &cols);
        let child_row_names = rows.iter().map(|&r| row_names[r].clone()).collect();
        let child_col_names = cols.iter().map(|&c| col_names[c].clone()).collect();
        let child = DecompositionNode::with_names(sub_matrix, is_ternary, child_row_names, child_col_names);
        node.attach_child(child);
    }

    let child_count = node.children.len();
    for i in 0..child_count {
        queue.push(Task::new(path.child(i)));
    }

    env.record_stage(STAGE_NAME, start.elapsed());
    Ok(())
}
