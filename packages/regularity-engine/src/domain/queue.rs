//! LIFO queue of pending tasks, plus the shared "irregularity found"
//! signal every stage can raise.

use crate::domain::task::Task;

/// A LIFO queue of tasks. `push`/`pop` are `Vec::push`/`Vec::pop`, giving
/// depth-first traversal: a stage that splits a node pushes its
/// children's tasks immediately, and the most recently pushed child is
/// processed next, bounding peak queue size by tree depth.
#[derive(Debug, Default)]
pub struct DecompositionQueue {
    tasks: Vec<Task>,
    pub found_irregularity: bool,
}

impl DecompositionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn pop(&mut self) -> Option<Task> {
        self.tasks.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}
