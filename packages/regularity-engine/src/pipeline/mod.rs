//! Stage contracts, the dispatcher that picks between them, and the
//! driver entry points that pump the work queue to completion.

pub mod dispatcher;
pub mod driver;
pub mod env;
pub mod finalizer;
pub mod stages;

use crate::domain::node::DecompositionNode;
use crate::domain::task::NodePath;

/// Navigate from the tree root to the node at `path`, mutably.
pub fn node_at_mut<'a>(
    root: &'a mut DecompositionNode,
    path: &NodePath,
) -> &'a mut DecompositionNode {
    let mut node = root;
    for &index in &path.0 {
        node = &mut node.children[index];
    }
    node
}

/// Navigate from the tree root to the node at `path`, immutably.
pub fn node_at<'a>(root: &'a DecompositionNode, path: &NodePath) -> &'a DecompositionNode {
    let mut node = root;
    for &index in &path.0 {
        node = &node.children[index];
    }
    node
}
