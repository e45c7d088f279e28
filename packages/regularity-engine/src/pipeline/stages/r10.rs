//! S4: R10 recognition. R10 is the unique (up to row/column permutation
//! and signing) 10-element regular matroid that is neither graphic,
//! cographic, nor series-parallel-reducible; any representation this
//! driver reaches has exactly 10 elements split 5 rows / 5 columns, so
//! a shape mismatch is an immediate non-match and only the 5x5 case
//! pays for an isomorphism search.

use crate::domain::matrix::DenseMatrix;
use crate::domain::node::{DecompositionKind, DecompositionNode};
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::{NodePath, Task};
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use std::time::Instant;

pub const STAGE_NAME: &str = "r10_test";

/// The standard 5x5 circulant representation of R10: row i has 1s at
/// columns i, i+1, i+4 (mod 5) — the "1,1,0,0,1" circulant pattern.
fn standard_r10() -> DenseMatrix {
    let mut m = DenseMatrix::zeros(5, 5);
    for r in 0..5 {
        for &offset in &[0usize, 1, 4] {
            m.set(r, (r + offset) % 5, 1);
        }
    }
    m
}

/// Whether `m` is isomorphic to the standard R10 representation under
/// some row permutation, column permutation, and entry negation
/// (row/column scaling by -1, the ternary sign freedom). Bounded: both
/// permutation groups have only 120 elements, so the full product
/// search (14400 candidates) is cheap.
fn is_r10(m: &DenseMatrix) -> bool {
    if m.rows != 5 || m.cols != 5 {
        return false;
    }
    let target = standard_r10();
    let mut row_perm: Vec<usize> = (0..5).collect();
    loop {
        let mut col_perm: Vec<usize> = (0..5).collect();
        loop {
            if matches_up_to_sign(m, &target, &row_perm, &col_perm) {
                return true;
            }
            if !next_permutation(&mut col_perm) {
                break;
            }
        }
        if !next_permutation(&mut row_perm) {
            break;
        }
    }
    false
}

fn matches_up_to_sign(
    m: &DenseMatrix,
    target: &DenseMatrix,
    row_perm: &[usize],
    col_perm: &[usize],
) -> bool {
    // Row/column signs are free per row and per column (independently),
    // matching network-matrix row/column scaling; a row's sign is
    // pinned by its first nonzero entry, then checked consistently.
    let mut row_sign = [0i8; 5];
    for r in 0..5 {
        let pr = row_perm[r];
        for c in 0..5 {
            let pc = col_perm[c];
            let mv = m.get(pr, pc);
            let tv = target.get(r, c);
            if tv == 0 {
                if mv != 0 {
                    return false;
                }
                continue;
            }
            if mv == 0 {
                return false;
            }
            let sign = if mv == tv { 1 } else { -1 };
            if row_sign[r] == 0 {
                row_sign[r] = sign;
            } else if row_sign[r] != sign {
                return false;
            }
        }
    }
    true
}

fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
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
    let dense = node.matrix.to_dense();
    if is_r10(&dense) {
        node.finalize_as(DecompositionKind::R10);
    } else {
        node.tested_r10 = true;
        queue.push(Task::new(path.clone()));
    }
    env.record_stage(STAGE_NAME, start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_r10_is_recognised() {
        assert!(is_r10(&standard_r10()));
    }

    #[test]
    fn test_wrong_shape_is_not_r10() {
        assert!(!is_r10(&DenseMatrix::zeros(5, 6)));
        assert!(!is_r10(&DenseMatrix::zeros(4, 5)));
    }

    #[test]
    fn test_permuted_r10_is_still_recognised() {
        let mut m = standard_r10();
        m.swap_rows(0, 2);
        m.swap_cols(1, 4);
        assert!(is_r10(&m));
    }
}
