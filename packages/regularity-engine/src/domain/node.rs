//! The decomposition tree node: one submatroid under investigation,
//! plus the pipeline flags and scratch state the stages attach to it.

use crate::domain::matrix::{DenseMatrix, SparseMatrix};

/// Composition / recognizer tag attached to a node once a stage
/// classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionKind {
    Unknown,
    OneSum,
    TwoSum,
    ThreeSum,
    SeriesParallel,
    Graphic,
    Cographic,
    R10,
    Irregular,
}

/// A three-valued verdict: not yet decided, or decided one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegularityTag {
    Unset,
    Regular,
    Irregular,
}

impl RegularityTag {
    pub fn is_unset(self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_regular(self) -> bool {
        matches!(self, Self::Regular)
    }

    pub fn is_irregular(self) -> bool {
        matches!(self, Self::Irregular)
    }
}

/// A chosen maximal sequence of nested 3-connected minors, built by S6
/// and consumed by S7/S8/S9. `minors[i]` has exactly `i` more elements
/// than `minors[0]`, which is the seed W3 wheel.
#[derive(Debug, Clone)]
pub struct NestedMinorSequence {
    pub minors: Vec<DenseMatrix>,
    pub last_graphic: Option<usize>,
    pub last_cographic: Option<usize>,
}

impl NestedMinorSequence {
    pub fn seeded_with(w3: DenseMatrix) -> Self {
        Self {
            minors: vec![w3],
            last_graphic: None,
            last_cographic: None,
        }
    }
}

/// One node of the decomposition tree.
#[derive(Debug, Clone)]
pub struct DecompositionNode {
    pub matrix: SparseMatrix,
    pub is_ternary: bool,
    pub row_names: Vec<String>,
    pub column_names: Vec<String>,
    pub children: Vec<DecompositionNode>,

    pub kind: DecompositionKind,
    pub regularity: RegularityTag,
    pub graphicness: RegularityTag,
    pub cographicness: RegularityTag,

    pub tested_two_connected: bool,
    pub tested_r10: bool,
    pub tested_series_parallel: bool,

    pub dense_matrix: Option<DenseMatrix>,
    /// Element names of `dense_matrix`'s rows/columns, in order. Kept
    /// alongside the scratch matrix so S6/S9 can translate a kernel
    /// row/column index back to a name when building child nodes —
    /// not part of the source's field set, but required to uphold the
    /// name-stability invariant once series-parallel reduction starts
    /// deleting rows/columns from the scratch copy.
    pub dense_row_names: Option<Vec<String>>,
    pub dense_col_names: Option<Vec<String>>,
    pub nested_minors: Option<NestedMinorSequence>,
}

impl DecompositionNode {
    /// Allocate a root node: no parent, all flags false, all tags unset.
    pub fn create_root(matrix: SparseMatrix, is_ternary: bool) -> Self {
        let row_names = (0..matrix.num_rows).map(|i| format!("r{i}")).collect();
        let column_names = (0..matrix.num_cols).map(|i| format!("c{i}")).collect();
        Self::with_names(matrix, is_ternary, row_names, column_names)
    }

    pub fn with_names(
        matrix: SparseMatrix,
        is_ternary: bool,
        row_names: Vec<String>,
        column_names: Vec<String>,
    ) -> Self {
        debug_assert_eq!(row_names.len(), matrix.num_rows);
        debug_assert_eq!(column_names.len(), matrix.num_cols);
        Self {
            matrix,
            is_ternary,
            row_names,
            column_names,
            children: Vec::new(),
            kind: DecompositionKind::Unknown,
            regularity: RegularityTag::Unset,
            graphicness: RegularityTag::Unset,
            cographicness: RegularityTag::Unset,
            tested_two_connected: false,
            tested_r10: false,
            tested_series_parallel: false,
            dense_matrix: None,
            dense_row_names: None,
            dense_col_names: None,
            nested_minors: None,
        }
    }

    /// Append a child, checking that its elements are names drawn from
    /// this node's own row/column names (the partition/refinement
    /// invariant in §3).
    pub fn attach_child(&mut self, child: DecompositionNode) {
        debug_assert!(child
            .row_names
            .iter()
            .all(|n| self.row_names.contains(n)));
        debug_assert!(child
            .column_names
            .iter()
            .all(|n| self.column_names.contains(n)));
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Mark this node as finished with a terminal recognizer, setting
    /// `graphicness`/`cographicness` alongside it where the recognizer
    /// implies them.
    pub fn finalize_as(&mut self, kind: DecompositionKind) {
        self.kind = kind;
        match kind {
            DecompositionKind::Graphic => self.graphicness = RegularityTag::Regular,
            DecompositionKind::Cographic => self.cographicness = RegularityTag::Regular,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity3() -> SparseMatrix {
        SparseMatrix::new(3, 3, vec![(0, 0, 1), (1, 1, 1), (2, 2, 1)], false).unwrap()
    }

    #[test]
    fn test_create_root_has_default_state() {
        let node = DecompositionNode::create_root(identity3(), false);
        assert_eq!(node.kind, DecompositionKind::Unknown);
        assert_eq!(node.regularity, RegularityTag::Unset);
        assert!(!node.tested_two_connected);
        assert!(node.is_leaf());
        assert_eq!(node.row_names, vec!["r0", "r1", "r2"]);
    }

    #[test]
    fn test_attach_child_appends() {
        let mut parent = DecompositionNode::create_root(identity3(), false);
        let child = DecompositionNode::with_names(
            SparseMatrix::new(1, 1, vec![(0, 0, 1)], false).unwrap(),
            false,
            vec!["r0".to_string()],
            vec!["c0".to_string()],
        );
        parent.attach_child(child);
        assert_eq!(parent.children.len(), 1);
        assert!(!parent.is_leaf());
    }

    #[test]
    fn test_finalize_as_graphic_sets_graphicness() {
        let mut node = DecompositionNode::create_root(identity3(), false);
        node.finalize_as(DecompositionKind::Graphic);
        assert_eq!(node.kind, DecompositionKind::Graphic);
        assert!(node.graphicness.is_regular());
    }
}
