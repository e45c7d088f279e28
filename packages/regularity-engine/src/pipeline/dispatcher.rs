//! The stage dispatcher (§4.C): picks exactly one stage to run on a
//! popped task, by the first matching rule of the ordered decision
//! table in the module docs below. Re-derived fresh from the node's
//! flags on every call rather than stored, per the "stage cursor"
//! design in DESIGN.md — this keeps the underlying monotone booleans
//! (kept for parity with the source's data model) from ever drifting
//! out of sync with what the dispatcher actually decides.

use crate::domain::node::DecompositionNode;
use crate::domain::queue::DecompositionQueue;
use crate::domain::task::NodePath;
use crate::errors::RegularityResult;
use crate::pipeline::env::RegularEnv;
use crate::pipeline::node_at;
use crate::pipeline::stages;

/// Derived progress marker, matched by [`select_rule`] together with
/// the small/direct-graphicness predicate. Exists for introspection
/// (naming, tracing) — it is never stored on the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCursor {
    Fresh,
    Connected,
    R10Tested,
    /// `tested_series_parallel` is true and no nested-minor sequence has
    /// been built yet. Maps to rule 6 when a kernel (`dense_matrix`) is
    /// present, or falls through to rule 9 when it isn't — e.g. when
    /// `params.series_parallel == false` left S5 a no-op.
    SpTested,
    HasSequence,
    SequenceGraphicKnown,
    SequenceCographicKnown,
}

/// One of the nine fixed stages, chosen by [`select_rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    OneSum,
    DirectGraphicness,
    DirectCographicness,
    R10,
    SeriesParallel,
    WheelMinor,
    SequenceGraphicness,
    SequenceCographicness,
    ThreeSeparation,
}

/// Whether S2/S3 should be attempted directly on this node: either the
/// caller forced it, or the node is small enough that an exhaustive
/// search is cheap regardless.
fn wants_direct_graphicness(node: &DecompositionNode, direct_graphicness: bool) -> bool {
    direct_graphicness || node.matrix.num_rows <= 3 || node.matrix.num_cols <= 3
}

pub fn cursor(node: &DecompositionNode) -> StageCursor {
    if !node.tested_two_connected {
        return StageCursor::Fresh;
    }
    if !node.tested_r10 {
        return StageCursor::Connected;
    }
    if !node.tested_series_parallel {
        return StageCursor::R10Tested;
    }
    if let Some(sequence) = node.nested_minors.as_ref() {
        return if sequence.last_graphic.is_none() {
            StageCursor::HasSequence
        } else if sequence.last_cographic.is_none() {
            StageCursor::SequenceGraphicKnown
        } else {
            StageCursor::SequenceCographicKnown
        };
    }
    StageCursor::SpTested
}

fn select_rule(node: &DecompositionNode, direct_graphicness: bool) -> Rule {
    match cursor(node) {
        StageCursor::Fresh => Rule::OneSum,
        StageCursor::Connected => {
            let small = wants_direct_graphicness(node, direct_graphicness);
            if node.graphicness.is_unset() && small {
                Rule::DirectGraphicness
            } else if node.cographicness.is_unset() && small {
                Rule::DirectCographicness
            } else {
                Rule::R10
            }
        }
        StageCursor::R10Tested => Rule::SeriesParallel,
        StageCursor::SpTested => {
            if node.dense_matrix.is_some() {
                Rule::WheelMinor
            } else {
                Rule::ThreeSeparation
            }
        }
        StageCursor::HasSequence => Rule::SequenceGraphicness,
        StageCursor::SequenceGraphicKnown => Rule::SequenceCographicness,
        StageCursor::SequenceCographicKnown => Rule::ThreeSeparation,
    }
}

/// Run exactly one stage on the task at `path`, chosen by the decision
/// table. The guard is evaluated against the node's state *before* any
/// stage mutates it, so a stage can never observe a guard it didn't
/// actually satisfy.
pub fn dispatch(
    env: &mut RegularEnv,
    root: &mut DecompositionNode,
    path: &NodePath,
    queue: &mut DecompositionQueue,
) -> RegularityResult<()> {
    let rule = select_rule(node_at(root, path), env.params.direct_graphicness);
    tracing::debug!(?rule, ?path, "dispatching stage");
    match rule {
        Rule::OneSum => stages::one_sum::run(env, root, path, queue),
        Rule::DirectGraphicness => {
            stages::graphicness::run_direct_graphicness(env, root, path, queue)
        }
        Rule::DirectCographicness => {
            stages::graphicness::run_direct_cographicness(env, root, path, queue)
        }
        Rule::R10 => stages::r10::run(env, root, path, queue),
        Rule::SeriesParallel => stages::series_parallel::run(env, root, path, queue),
        Rule::WheelMinor => stages::wheel_minor::run(env, root, path, queue),
        Rule::SequenceGraphicness => {
            stages::sequence::run_sequence_graphicness(env, root, path, queue)
        }
        Rule::SequenceCographicness => {
            stages::sequence::run_sequence_cographicness(env, root, path, queue)
        }
        Rule::ThreeSeparation => stages::three_separation::run(env, root, path, queue),
    }
}
