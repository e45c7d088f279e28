//! Matrix model: the sparse characteristic matrix the caller supplies,
//! and the small dense scratch matrix the stages pivot and permute.

use crate::errors::{RegularityError, RegularityResult};

/// A sparse row-major characteristic matrix with entries in {-1,0,1}.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix {
    pub num_rows: usize,
    pub num_cols: usize,
    entries: Vec<(usize, usize, i8)>,
}

impl SparseMatrix {
    /// Build a matrix from its triplets, validating shape and, when
    /// `is_ternary` is false, that no entry is -1.
    pub fn new(
        num_rows: usize,
        num_cols: usize,
        entries: Vec<(usize, usize, i8)>,
        is_ternary: bool,
    ) -> RegularityResult<Self> {
        for &(r, c, v) in &entries {
            if r >= num_rows || c >= num_cols {
                return Err(RegularityError::invalid_input(format!(
                    "entry ({r}, {c}) out of bounds for a {num_rows}x{num_cols} matrix"
                )));
            }
            if !(-1..=1).contains(&v) || v == 0 {
                return Err(RegularityError::invalid_input(format!(
                    "entry ({r}, {c}) has non-unit value {v}"
                )));
            }
            if !is_ternary && v == -1 {
                return Err(RegularityError::invalid_input(format!(
                    "entry ({r}, {c}) is -1 in a binary matrix"
                )));
            }
        }
        Ok(Self {
            num_rows,
            num_cols,
            entries,
        })
    }

    pub fn entries(&self) -> &[(usize, usize, i8)] {
        &self.entries
    }

    pub fn to_dense(&self) -> DenseMatrix {
        let mut dense = DenseMatrix::zeros(self.num_rows, self.num_cols);
        for &(r, c, v) in &self.entries {
            dense.set(r, c, v);
        }
        dense
    }

    /// Restrict to the given rows and columns, in the given order. Used
    /// by S1 to carve out a connected component as a child node.
    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Self {
        let row_pos: rustc_hash::FxHashMap<usize, usize> =
            rows.iter().enumerate().map(|(i, &r)| (r, i)).collect();
        let col_pos: rustc_hash::FxHashMap<usize, usize> =
            cols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let entries = self
            .entries
            .iter()
            .filter_map(|&(r, c, v)| match (row_pos.get(&r), col_pos.get(&c)) {
                (Some(&nr), Some(&nc)) => Some((nr, nc, v)),
                _ => None,
            })
            .collect();
        Self {
            num_rows: rows.len(),
            num_cols: cols.len(),
            entries,
        }
    }
}

/// Row-major dense scratch matrix used internally by the stages for
/// pivoting, permutation, and reduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseMatrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<i8>,
}

impl DenseMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> i8 {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: i8) {
        self.data[r * self.cols + c] = v;
    }

    pub fn row(&self, r: usize) -> &[i8] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn is_zero_row(&self, r: usize) -> bool {
        self.row(r).iter().all(|&v| v == 0)
    }

    pub fn is_zero_col(&self, c: usize) -> bool {
        (0..self.rows).all(|r| self.get(r, c) == 0)
    }

    pub fn row_nonzero_count(&self, r: usize) -> usize {
        self.row(r).iter().filter(|&&v| v != 0).count()
    }

    pub fn col_nonzero_count(&self, c: usize) -> usize {
        (0..self.rows).filter(|&r| self.get(r, c) != 0).count()
    }

    /// The unique column with a nonzero entry in row `r`, when that row
    /// has exactly one nonzero entry (a series element).
    pub fn sole_nonzero_col(&self, r: usize) -> Option<usize> {
        let mut found = None;
        for c in 0..self.cols {
            if self.get(r, c) != 0 {
                if found.is_some() {
                    return None;
                }
                found = Some(c);
            }
        }
        found
    }

    /// The unique row with a nonzero entry in column `c`, when that
    /// column has exactly one nonzero entry (a parallel element).
    pub fn sole_nonzero_row(&self, c: usize) -> Option<usize> {
        let mut found = None;
        for r in 0..self.rows {
            if self.get(r, c) != 0 {
                if found.is_some() {
                    return None;
                }
                found = Some(r);
            }
        }
        found
    }

    pub fn delete_row(&mut self, r: usize) {
        let mut data = Vec::with_capacity((self.rows - 1) * self.cols);
        for i in 0..self.rows {
            if i != r {
                data.extend_from_slice(self.row(i));
            }
        }
        self.rows -= 1;
        self.data = data;
    }

    pub fn delete_col(&mut self, c: usize) {
        let mut data = Vec::with_capacity(self.rows * (self.cols - 1));
        for r in 0..self.rows {
            for j in 0..self.cols {
                if j != c {
                    data.push(self.get(r, j));
                }
            }
        }
        self.cols -= 1;
        self.data = data;
    }

    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for c in 0..self.cols {
            let (va, vb) = (self.get(a, c), self.get(b, c));
            self.set(a, c, vb);
            self.set(b, c, va);
        }
    }

    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for r in 0..self.rows {
            let (va, vb) = (self.get(r, a), self.get(r, b));
            self.set(r, a, vb);
            self.set(r, b, va);
        }
    }

    /// Pivot on entry (r, c), which must be nonzero. Binary pivots ignore
    /// sign (GF(2)); ternary pivots follow the mod-3 tableau rule, which
    /// is guaranteed to keep every entry in {-1,0,1} for a totally
    /// unimodular starting matrix.
    pub fn pivot(&mut self, r: usize, c: usize, is_ternary: bool) {
        if is_ternary {
            gf3_pivot(self, r, c);
        } else {
            gf2_pivot(self, r, c);
        }
    }

    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Self {
        let mut out = DenseMatrix::zeros(rows.len(), cols.len());
        for (nr, &r) in rows.iter().enumerate() {
            for (nc, &c) in cols.iter().enumerate() {
                out.set(nr, nc, self.get(r, c));
            }
        }
        out
    }

    pub fn transpose(&self) -> Self {
        let mut out = DenseMatrix::zeros(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.set(c, r, self.get(r, c));
            }
        }
        out
    }
}

/// Binary (GF(2)) pivot: for every other row `i` with a nonzero entry in
/// column `c`, XOR row `r` into row `i` (mod 2). The pivot entry itself
/// must be 1.
fn gf2_pivot(m: &mut DenseMatrix, r: usize, c: usize) {
    debug_assert_eq!(m.get(r, c), 1);
    for i in 0..m.rows {
        if i == r {
            continue;
        }
        if m.get(i, c) != 0 {
            for j in 0..m.cols {
                let updated = m.get(i, j) ^ m.get(r, j);
                m.set(i, j, updated & 1);
            }
        }
    }
}

/// Ternary (GF(3)) pivot: the classic tableau pivot, reduced back into
/// {-1,0,1} after every update since 1 and -1 are each self-inverse
/// modulo 3.
fn gf3_pivot(m: &mut DenseMatrix, r: usize, c: usize) {
    let pivot_val = m.get(r, c);
    debug_assert!(pivot_val == 1 || pivot_val == -1);

    if pivot_val == -1 {
        for j in 0..m.cols {
            let v = m.get(r, j);
            m.set(r, j, reduce_mod3(-(v as i32)));
        }
    }

    for i in 0..m.rows {
        if i == r {
            continue;
        }
        let factor = m.get(i, c);
        if factor != 0 {
            for j in 0..m.cols {
                let updated = m.get(i, j) as i32 - factor as i32 * m.get(r, j) as i32;
                m.set(i, j, reduce_mod3(updated));
            }
        }
    }
}

fn reduce_mod3(v: i32) -> i8 {
    match v.rem_euclid(3) {
        2 => -1,
        m => m as i8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_matrix_rejects_out_of_range_value() {
        let err = SparseMatrix::new(2, 2, vec![(0, 0, 2)], true).unwrap_err();
        assert!(matches!(err, RegularityError::InvalidInput { .. }));
    }

    #[test]
    fn test_sparse_matrix_rejects_negative_one_when_binary() {
        let err = SparseMatrix::new(1, 1, vec![(0, 0, -1)], false).unwrap_err();
        assert!(matches!(err, RegularityError::InvalidInput { .. }));
    }

    #[test]
    fn test_to_dense_roundtrip() {
        let sparse = SparseMatrix::new(2, 2, vec![(0, 0, 1), (1, 1, 1)], false).unwrap();
        let dense = sparse.to_dense();
        assert_eq!(dense.get(0, 0), 1);
        assert_eq!(dense.get(0, 1), 0);
        assert_eq!(dense.get(1, 1), 1);
    }

    #[test]
    fn test_submatrix_restricts_and_reindexes() {
        let sparse =
            SparseMatrix::new(3, 3, vec![(0, 0, 1), (1, 1, 1), (2, 2, 1)], false).unwrap();
        let sub = sparse.submatrix(&[1, 2], &[1, 2]);
        assert_eq!(sub.num_rows, 2);
        assert_eq!(sub.entries().len(), 2);
    }

    #[test]
    fn test_gf2_pivot_clears_column() {
        // [[1, 1], [1, 0]] pivot on (0,0)
        let mut m = DenseMatrix::zeros(2, 2);
        m.set(0, 0, 1);
        m.set(0, 1, 1);
        m.set(1, 0, 1);
        m.set(1, 1, 0);
        m.pivot(0, 0, false);
        assert_eq!(m.get(1, 0), 0);
        assert_eq!(m.get(1, 1), 1);
    }

    #[test]
    fn test_gf3_pivot_keeps_values_ternary() {
        let mut m = DenseMatrix::zeros(2, 2);
        m.set(0, 0, 1);
        m.set(0, 1, -1);
        m.set(1, 0, 1);
        m.set(1, 1, 1);
        m.pivot(0, 0, true);
        assert_eq!(m.get(1, 0), 0);
        for r in 0..2 {
            for c in 0..2 {
                assert!((-1..=1).contains(&m.get(r, c)));
            }
        }
    }

    #[test]
    fn test_delete_row_and_col() {
        let mut m = DenseMatrix::zeros(3, 3);
        for i in 0..3 {
            m.set(i, i, 1);
        }
        m.delete_row(1);
        assert_eq!(m.rows, 2);
        m.delete_col(1);
        assert_eq!(m.cols, 2);
    }

    #[test]
    fn test_sole_nonzero_col_detects_series_element() {
        let mut m = DenseMatrix::zeros(2, 2);
        m.set(0, 1, 1);
        assert_eq!(m.sole_nonzero_col(0), Some(1));
        m.set(0, 0, 1);
        assert_eq!(m.sole_nonzero_col(0), None);
    }
}
