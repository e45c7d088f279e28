//! Attribute finaliser (§4.E): a single post-order walk over the tree
//! that folds child verdicts into each parent's `regularity` tag once
//! the queue has drained.

use crate::domain::node::{DecompositionKind, DecompositionNode, RegularityTag};

/// Post-order walk from `root`, setting `regularity` on every node that
/// doesn't already have it set. Idempotent: a node whose `regularity`
/// is already `Regular`/`Irregular` (e.g. a terminal leaf a stage
/// finalised directly) is left untouched, and composition nodes whose
/// children are all already folded simply recompute the same fold.
pub fn finalize(root: &mut DecompositionNode) {
    for child in &mut root.children {
        finalize(child);
    }
    root.regularity = fold(root);
}

fn fold(node: &DecompositionNode) -> RegularityTag {
    match node.kind {
        DecompositionKind::OneSum | DecompositionKind::TwoSum | DecompositionKind::ThreeSum => {
            fold_composition(&node.children)
        }
        DecompositionKind::Graphic
        | DecompositionKind::Cographic
        | DecompositionKind::R10
        | DecompositionKind::SeriesParallel => RegularityTag::Regular,
        DecompositionKind::Irregular => RegularityTag::Irregular,
        DecompositionKind::Unknown => {
            // The driver aborted before this node reached a terminal
            // stage (time limit, or early-exit above an irregular
            // descendant never reached this node at all). Leave unset;
            // callers that asked for `complete_tree` never see this.
            RegularityTag::Unset
        }
    }
}

/// Regular iff every child is regular; irregular if any child is
/// irregular (irregularity always wins, even with other children
/// still unset — an early-abort partial tree can have this shape);
/// otherwise unset.
fn fold_composition(children: &[DecompositionNode]) -> RegularityTag {
    let mut saw_unset = false;
    for child in children {
        match child.regularity {
            RegularityTag::Irregular => return RegularityTag::Irregular,
            RegularityTag::Unset => saw_unset = true,
            RegularityTag::Regular => {}
        }
    }
    if saw_unset {
        RegularityTag::Unset
    } else {
        RegularityTag::Regular
    }
}
