//! Minimal sparse-triplet reader (§4.K), used by tests and doc examples
//! to build literal matrices from readable text. This is explicitly
//! not the production matrix-format reader named in Non-goals — that
//! lives in the command-line front-end this crate does not own.
//!
//! Format: a header line `rows cols`, then one `row col value` triple
//! per line. Blank lines and lines starting with `#` are ignored.
//!
//! ```text
//! 3 3
//! 0 0 1
//! 1 1 1
//! 2 2 1
//! ```

use crate::domain::matrix::SparseMatrix;
use crate::errors::{RegularityError, RegularityResult};

/// Parse a matrix from the triplet format described in the module docs.
pub fn parse_triplets(spec: &str, is_ternary: bool) -> RegularityResult<SparseMatrix> {
    let mut lines = spec
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines
        .next()
        .ok_or_else(|| RegularityError::invalid_input("empty matrix spec: missing header line"))?;
    let mut header_fields = header.split_whitespace();
    let num_rows = parse_dimension(header_fields.next(), "rows")?;
    let num_cols = parse_dimension(header_fields.next(), "cols")?;

    let mut entries = Vec::new();
    for line in lines {
        let mut fields = line.split_whitespace();
        let row = parse_field(fields.next(), "row", line)?;
        let col = parse_field(fields.next(), "col", line)?;
        let value: i8 = fields
            .next()
            .ok_or_else(|| RegularityError::invalid_input(format!("missing value in line {line:?}")))?
            .parse()
            .map_err(|_| RegularityError::invalid_input(format!("non-numeric value in line {line:?}")))?;
        if fields.next().is_some() {
            return Err(RegularityError::invalid_input(format!(
                "too many fields in line {line:?}"
            )));
        }
        entries.push((row, col, value));
    }

    SparseMatrix::new(num_rows, num_cols, entries, is_ternary)
}

fn parse_dimension(field: Option<&str>, name: &str) -> RegularityResult<usize> {
    field
        .ok_or_else(|| RegularityError::invalid_input(format!("missing {name} in header line")))?
        .parse()
        .map_err(|_| RegularityError::invalid_input(format!("non-numeric {name} in header line")))
}

fn parse_field(field: Option<&str>, name: &str, line: &str) -> RegularityResult<usize> {
    field
        .ok_or_else(|| RegularityError::invalid_input(format!("missing {name} in line {line:?}")))?
        .parse()
        .map_err(|_| RegularityError::invalid_input(format!("non-numeric {name} in line {line:?}")))
}
