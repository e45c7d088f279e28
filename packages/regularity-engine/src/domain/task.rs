//! A unit of work bound to one node of the decomposition tree.
//!
//! Rather than a raw pointer into the tree (the source's model), a task
//! carries the *path* from the tree's root down to its node: a sequence
//! of child indices. The driver loop holds the root by value and
//! navigates to `path` fresh on every pop, which sidesteps aliasing a
//! mutable node reference across pushes of sibling tasks entirely.

/// Path from the decomposition root to the node a task is about to
/// process. An empty path means "the root itself".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }
}

/// One pending unit of work: "process the node at this path".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub path: NodePath,
}

impl Task {
    pub fn new(path: NodePath) -> Self {
        Self { path }
    }

    pub fn for_root() -> Self {
        Self::new(NodePath::root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        assert_eq!(NodePath::root().0, Vec::<usize>::new());
    }

    #[test]
    fn test_child_path_appends_index() {
        let root = NodePath::root();
        let first_child = root.child(2);
        let grandchild = first_child.child(0);
        assert_eq!(grandchild.0, vec![2, 0]);
        // The parent path is untouched (no shared mutable state).
        assert_eq!(first_child.0, vec![2]);
    }
}
