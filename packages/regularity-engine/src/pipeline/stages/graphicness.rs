//! S2/S3: direct graphicness and cographicness, plus the structural
//! realizability check shared with S7/S8's per-minor testing.
//!
//! A matrix realises a graphic matroid here when every column has
//! exactly two nonzero entries among the matrix's own rows (an edge
//! between the two rows it touches); for ternary matrices the two
//! entries must carry opposite sign, matching a network matrix's
//! head/tail orientation. Columns with zero or one nonzero entry
//! (loops, coloops, parallel/series elements) are deliberately excluded
//! here — they are recognised by series-parallel reduction (S5)
//! instead, so this check never double-claims them.
//!
//! This is a bounded reference algorithm, not a general graphicness
//! test (no search over spanning trees or minimal representations): it
//! recognises literal unreduced incidence/network-matrix presentations
//! directly, in O(rows * cols), which is sufficient for the matrices
//! this driver hands it (already one-sum- and SP-reduced).

use crate::domain::matrix::DenseMatrix;
use crate::domain::node::{DecompositionKind, DecompositionNode};
use crate::domain::task::NodePath;
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use std::time::Instant;

/// Matrices larger than this are only attempted directly when
/// `params.direct_graphicness` forces it; beyond this ceiling the
/// bounded check still runs (it is linear-time) but guards against
/// pathological inputs with an explicit internal-error trip wire.
const MAX_DIRECT_ELEMENTS: usize = 1 << 20;

pub const DIRECT_GRAPHICNESS_STAGE: &str = "direct_graphicness";
pub const DIRECT_COGRAPHICNESS_STAGE: &str = "direct_cographicness";

/// Whether `m` is a literal incidence/network-matrix presentation of a
/// graphic matroid: every column has exactly two nonzero rows, with
/// opposite signs when `is_ternary`.
pub fn is_directly_graphic(m: &DenseMatrix) -> bool {
    if m.rows == 0 || m.cols == 0 {
        return false;
    }
    for c in 0..m.cols {
        let mut hits: Vec<(usize, i8)> = Vec::with_capacity(2);
        for r in 0..m.rows {
            let v = m.get(r, c);
            if v != 0 {
                hits.push((r, v));
                if hits.len() > 2 {
                    return false;
                }
            }
        }
        if hits.len() != 2 {
            return false;
        }
        let (_, a) = hits[0];
        let (_, b) = hits[1];
        if a == b {
            // Binary edges are always (1, 1); a ternary pair of equal
            // sign is not a valid network-matrix column.
            if a == -1 {
                return false;
            }
        }
    }
    true
}

pub fn is_directly_cographic(m: &DenseMatrix) -> bool {
    is_directly_graphic(&m.transpose())
}

pub fn run_direct_graphicness(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut crate::domain::queue::DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(DIRECT_GRAPHICNESS_STAGE)?;
    let node = node_at_mut(root, path);
    if node.matrix.num_rows * node.matrix.num_cols > MAX_DIRECT_ELEMENTS
        && env.params.direct_graphicness
    {
        return Err(crate::errors::RegularityError::internal(format!(
            "direct graphicness forced on a {}x{} matrix, beyond the bounded search's reach",
            node.matrix.num_rows, node.matrix.num_cols
        )));
    }
    let dense = node.matrix.to_dense();
    if is_directly_graphic(&dense) {
        node.finalize_as(DecompositionKind::Graphic);
    } else {
        node.graphicness = crate::domain::node::RegularityTag::Irregular;
        queue.push(crate::domain::task::Task::new(path.clone()));
    }
    env.record_stage(DIRECT_GRAPHICNESS_STAGE, start.elapsed());
    Ok(())
}

pub fn run_direct_cographicness(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut crate::domain::queue::DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(DIRECT_COGRAPHICNESS_STAGE)?;
    let node = node_at_mut(root, path);
    if node.matrix.num_rows * node.matrix.num_cols > MAX_DIRECT_ELEMENTS
        && env.params.direct_graphicness
    {
        return Err(crate::errors::RegularityError::internal(format!(
            "direct cographicness forced on a {}x{} matrix, beyond the bounded search's reach",
            node.matrix.num_rows, node.matrix.num_cols
        )));
    }
    let dense = node.matrix.to_dense();
    if is_directly_cographic(&dense) {
        node.finalize_as(DecompositionKind::Cographic);
    } else {
        node.cographicness = crate::domain::node::RegularityTag::Irregular;
        queue.push(crate::domain::task::Task::new(path.clone()));
    }
    env.record_stage(DIRECT_COGRAPHICNESS_STAGE, start.elapsed());
    Ok(())
}
