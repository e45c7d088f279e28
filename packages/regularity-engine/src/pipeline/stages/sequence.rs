//! S7/S8: sequence graphicness/cographicness. Walks the nested-minor
//! sequence testing each minor with the same bounded structural check
//! S2/S3 use. In this crate's simplified wheel-minor model the
//! sequence always holds exactly one minor (the whole series-parallel
//! kernel, already confirmed 3-connected by S6), so "all graphic"
//! collapses to "the kernel itself is graphic" — at which point the
//! node is finalised directly rather than falling through to S8/S9,
//! since a graphic (or cographic) matroid is regular outright.

use crate::domain::node::{DecompositionKind, DecompositionNode};
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::{NodePath, Task};
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at_mut;
use crate::pipeline::stages::graphicness::{is_directly_cographic, is_directly_graphic};
use std::time::Instant;

pub const GRAPHICNESS_STAGE: &str = "sequence_graphicness";
pub const COGRAPHICNESS_STAGE: &str = "sequence_cographicness";

pub fn run_sequence_graphicness(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(GRAPHICNESS_STAGE)?;
    let node = node_at_mut(root, path);
    let sequence = node
        .nested_minors
        .as_mut()
        .expect("rule 7 guard ensures this is present");

    let mut failure_index = None;
    for (i, minor) in sequence.minors.iter().enumerate() {
        if !is_directly_graphic(minor) {
            failure_index = Some(i);
            break;
        }
    }
    match failure_index {
        Some(i) => {
            sequence.last_graphic = Some(i);
            queue.push(Task::new(path.clone()));
        }
        None => {
            sequence.last_graphic = Some(sequence.minors.len());
            node.finalize_as(DecompositionKind::Graphic);
        }
    }
    env.record_stage(GRAPHICNESS_STAGE, start.elapsed());
    Ok(())
}

pub fn run_sequence_cographicness(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let start = Instant::now();
    env.check_time_limit(COGRAPHICNESS_STAGE)?;
    let node = node_at_mut(root, path);
    let sequence = node
        .nested_minors
        .as_mut()
        .expect("rule 8 guard ensures this is present");

    let mut failure_index = None;
    for (i, minor) in sequence.minors.iter().enumerate() {
        if !is_directly_cographic(minor) {
            failure_index = Some(i);
            break;
        }
    }
    match failure_index {
        Some(i) => {
            sequence.last_cographic = Some(i);
            queue.push(Task::new(path.clone()));
        }
        None => {
            sequence.last_cographic = Some(sequence.minors.len());
            node.finalize_as(DecompositionKind::Cographic);
        }
    }
    env.record_stage(COGRAPHICNESS_STAGE, start.elapsed());
    Ok(())
}

/// Whether the sequence's graphicness walk concluded "all graphic".
pub fn is_sequence_fully_graphic(sequence: &crate::domain::node::NestedMinorSequence) -> bool {
    sequence.last_graphic == Some(sequence.minors.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matrix::{DenseMatrix, SparseMatrix};
    use crate::domain::node::NestedMinorSequence;
    use crate::RegularParams;

    fn node_with_kernel(kernel: DenseMatrix) -> DecompositionNode {
        let mut node = DecompositionNode::create_root(
            SparseMatrix::new(kernel.rows, kernel.cols, vec![], false).unwrap(),
            false,
        );
        node.nested_minors = Some(NestedMinorSequence::seeded_with(kernel));
        node
    }

    #[test]
    fn test_graphic_kernel_finalises_as_graphic() {
        let pairs = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let mut kernel = DenseMatrix::zeros(4, 6);
        for (c, &(a, b)) in pairs.iter().enumerate() {
            kernel.set(a, c, 1);
            kernel.set(b, c, 1);
        }
        let mut root = node_with_kernel(kernel);
        let mut queue = DecompositionQueue::new();
        let mut env = RegularEnv::new(RegularParams::default(), None, 0.0);
        run_sequence_graphicness(&mut env, &mut root, &NodePath::root(), &mut queue).unwrap();
        assert_eq!(root.kind, DecompositionKind::Graphic);
        assert!(root.is_leaf());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_non_graphic_kernel_repushes() {
        let mut kernel = DenseMatrix::zeros(3, 1);
        kernel.set(0, 0, 1);
        kernel.set(1, 0, 1);
        kernel.set(2, 0, 1);
        let mut root = node_with_kernel(kernel);
        let mut queue = DecompositionQueue::new();
        let mut env = RegularEnv::new(RegularParams::default(), None, 0.0);
        run_sequence_graphicness(&mut env, &mut root, &NodePath::root(), &mut queue).unwrap();
        assert_eq!(root.kind, DecompositionKind::Unknown);
        assert_eq!(queue.len(), 1);
        assert!(!is_sequence_fully_graphic(root.nested_minors.as_ref().unwrap()));
    }
}
