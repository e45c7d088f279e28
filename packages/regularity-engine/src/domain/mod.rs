//! The decomposition driver's data model: matrices, tree nodes, tasks,
//! and the queue that schedules them.

pub mod matrix;
pub mod node;
pub mod queue;
pub mod task;
pub mod union_find;

pub use matrix::{DenseMatrix, SparseMatrix};
pub use node::{DecompositionKind, DecompositionNode, NestedMinorSequence, RegularityTag};
pub use queue::DecompositionQueue;
pub use task::{NodePath, Task};
