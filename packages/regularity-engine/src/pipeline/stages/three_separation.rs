//! S9: 3-separation search. The original's algorithm compares pairs of
//! minors along an incrementally-grown nested sequence. This bounded
//! reference implementation instead searches the kernel's bipartite
//! incidence graph directly for a 3-vertex cut whose removal splits it
//! into two nonempty pieces — the same structural relaxation S6 uses
//! for 2-separations, one level up. Exhaustive over `C(n, 3)` triples,
//! acceptable for the small kernels this driver reaches after one-sum,
//! series-parallel, and 2-separation reduction have already run.
//!
//! Finding no such cut concludes the node is irregular outright: by
//! Seymour's decomposition theorem a 3-connected matroid that is
//! neither graphic, cographic, nor R10, and admits no further
//! 3-separation, is irregular.
//!
//! Rule 9 is also the dispatcher's fall-through when rule 6 never fires
//! at all — `params.series_parallel == false` leaves a node with
//! `tested_series_parallel` set but no `dense_matrix` and no nested
//! sequence. In that case this stage searches the node's own matrix
//! directly rather than a sequence minor.

use crate::config::ThreeSumStrategy;
use crate::domain::node::{DecompositionKind, DecompositionNode, RegularityTag};
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::{NodePath, Task};
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use crate::pipeline::stages::wheel_minor::submatrix_by_names;
use std::time::Instant;

pub const STAGE_NAME: &str = "three_separation_search";

struct Candidate {
    separator: [usize; 3],
    side_a: Vec<usize>,
    side_b: Vec<usize>,
}

fn components_excluding_set(n: usize, adjacency: &[Vec<usize>], removed: &[usize; 3]) -> Vec<Vec<usize>> {
    let mut visited = vec![false; n];
    for &r in removed {
        visited[r] = true;
    }
    let mut components = Vec::new();
    for start in 0..n {
        if visited[start] {
            continue;
        }
        let mut comp = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(u) = stack.pop() {
            comp.push(u);
            for &v in &adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    stack.push(v);
                }
            }
        }
        components.push(comp);
    }
    components
}

fn find_candidates(kernel_rows: usize, kernel_cols: usize, get: impl Fn(usize, usize) -> i8) -> Vec<Candidate> {
    let n = kernel_rows + kernel_cols;
    if n < 5 {
        return Vec::new();
    }
    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|v| {
            if v < kernel_rows {
                (0..kernel_cols).filter(|&c| get(v, c) != 0).map(|c| kernel_rows + c).collect()
            } else {
                let c = v - kernel_rows;
                (0..kernel_rows).filter(|&r| get(r, c) != 0).collect()
            }
        })
        .collect();

    let mut candidates = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                let separator = [a, b, c];
                let mut groups = components_excluding_set(n, &adjacency, &separator);
                if groups.len() < 2 {
                    continue;
                }
                let side_a = groups.remove(0);
                let side_b: Vec<usize> = groups.into_iter().flatten().collect();
                // A genuine k-separation requires both sides to carry at
                // least k elements; anything smaller (e.g. removing an
                // entire row or column block whole) is a degenerate cut,
                // not a witness of reducibility.
                if side_a.len() < 3 || side_b.len() < 3 {
                    continue;
                }
                candidates.push(Candidate { separator, side_a, side_b });
            }
        }
    }
    candidates
}

fn pick(candidates: Vec<Candidate>, strategy: ThreeSumStrategy) -> Option<Candidate> {
    match strategy {
        ThreeSumStrategy::FirstFound => candidates.into_iter().next(),
        ThreeSumStrategy::MinimizeSeparatorOverlap => candidates.into_iter().min_by_key(|cand| {
            let sizes = (cand.side_a.len(), cand.side_b.len());
            sizes.0.max(sizes.1) - sizes.0.min(sizes.1)
        }),
    }
}

pub fn run(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(STAGE_NAME)?;

    let node = node_at_mut(root, path);
    let (kernel, row_names, col_names) = match node.nested_minors.as_ref() {
        Some(sequence) => (
            sequence.minors.last().unwrap().clone(),
            node.dense_row_names.clone().unwrap_or_default(),
            node.dense_col_names.clone().unwrap_or_default(),
        ),
        // series_parallel was disabled, so S5/S6 never built a kernel or
        // sequence; fall back to searching the node's own matrix.
        None => (
            node.matrix.to_dense(),
            node.row_names.clone(),
            node.column_names.clone(),
        ),
    };

    let candidates = find_candidates(kernel.rows, kernel.cols, |r, c| kernel.get(r, c));
    let strategy = env.params.three_sum_strategy;

    match pick(candidates, strategy) {
        Some(candidate) => {
            let to_names = |members: &[usize]| -> (Vec<String>, Vec<String>) {
                let mut rows: Vec<String> = members
                    .iter()
                    .filter(|&&v| v < kernel.rows)
                    .map(|&v| row_names[v].clone())
                    .collect();
                let mut cols: Vec<String> = members
                    .iter()
                    .filter(|&&v| v >= kernel.rows)
                    .map(|&v| col_names[v - kernel.rows].clone())
                    .collect();
                for &s in &candidate.separator {
                    if s < kernel.rows {
                        rows.push(row_names[s].clone());
                    } else {
                        cols.push(col_names[s - kernel.rows].clone());
                    }
                }
                (rows, cols)
            };
            let (rows_a, cols_a) = to_names(&candidate.side_a);
            let (rows_b, cols_b) = to_names(&candidate.side_b);

            node.kind = DecompositionKind::ThreeSum;
            let is_ternary = node.is_ternary;
            let matrix_a = submatrix_by_names(node, &rows_a, &cols_a);
            let matrix_b = submatrix_by_names(node, &rows_b, &cols_b);
            node.attach_child(DecompositionNode::with_names(matrix_a, is_ternary, rows_a, cols_a));
            node.attach_child(DecompositionNode::with_names(matrix_b, is_ternary, rows_b, cols_b));
            let child_count = node.children.len();
            for i in 0..child_count {
                queue.push(Task::new(path.child(i)));
            }
        }
        None => {
            node.kind = DecompositionKind::Irregular;
            node.regularity = RegularityTag::Irregular;
            queue.found_irregularity = true;
        }
    }

    env.record_stage(STAGE_NAME, start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matrix::{DenseMatrix, SparseMatrix};
    use crate::domain::node::NestedMinorSequence;
    use crate::RegularParams;

    #[test]
    fn test_fano_like_kernel_with_no_cut_concludes_irregular() {
        // 3x4 kernel, fully connected bipartite graph with no 3-cut
        // possible since total vertices (7) minus 3 leaves only 4,
        // and this particular kernel's connectivity keeps it whole.
        let mut kernel = DenseMatrix::zeros(3, 4);
        kernel.set(0, 0, 1);
        kernel.set(1, 0, 1);
        kernel.set(2, 0, 1);
        kernel.set(0, 1, 1);
        kernel.set(1, 1, 1);
        kernel.set(0, 2, 1);
        kernel.set(2, 2, 1);
        kernel.set(1, 3, 1);
        kernel.set(2, 3, 1);

        let mut node = DecompositionNode::create_root(
            SparseMatrix::new(3, 4, vec![], false).unwrap(),
            false,
        );
        node.dense_row_names = Some(node.row_names.clone());
        node.dense_col_names = Some(node.column_names.clone());
        node.nested_minors = Some(NestedMinorSequence::seeded_with(kernel));

        let mut queue = DecompositionQueue::new();
        let mut env = RegularEnv::new(RegularParams::default(), None, 0.0);
        run(&mut env, &mut node, &NodePath::root(), &mut queue).unwrap();

        assert_eq!(node.kind, DecompositionKind::Irregular);
        assert!(node.regularity.is_irregular());
        assert!(queue.found_irregularity);
    }

    #[test]
    fn test_falls_back_to_own_matrix_when_no_sequence_was_built() {
        // Mirrors what the dispatcher hands this stage when
        // `params.series_parallel == false`: `tested_series_parallel`
        // is true but neither `dense_matrix` nor `nested_minors` exist.
        let mut kernel = DenseMatrix::zeros(3, 4);
        kernel.set(0, 0, 1);
        kernel.set(1, 0, 1);
        kernel.set(2, 0, 1);
        kernel.set(0, 1, 1);
        kernel.set(1, 1, 1);
        kernel.set(0, 2, 1);
        kernel.set(2, 2, 1);
        kernel.set(1, 3, 1);
        kernel.set(2, 3, 1);
        let sparse = SparseMatrix::new(
            3,
            4,
            (0..kernel.rows)
                .flat_map(|r| (0..kernel.cols).map(move |c| (r, c)))
                .filter(|&(r, c)| kernel.get(r, c) != 0)
                .map(|(r, c)| (r, c, 1))
                .collect(),
            false,
        )
        .unwrap();

        let mut node = DecompositionNode::create_root(sparse, false);
        node.tested_two_connected = true;
        node.tested_r10 = true;
        node.tested_series_parallel = true;

        let mut queue = DecompositionQueue::new();
        let mut env = RegularEnv::new(RegularParams::default(), None, 0.0);
        run(&mut env, &mut node, &NodePath::root(), &mut queue).unwrap();

        assert_eq!(node.kind, DecompositionKind::Irregular);
        assert!(node.regularity.is_irregular());
    }
}
