//! Cell addressing.
//!
//! Maps zero-based (row, col) coordinates to and from A1-style reference
//! strings, and expands range strings ("A1:B2") into the references they
//! cover. All parsing here fails soft: malformed input yields `None` or a
//! single-element fallback, never a panic.

use serde::{Deserialize, Serialize};

/// Zero-based grid coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Convert a 0-based column index to its letter label.
///
/// Bijective base-26: 0=A, 25=Z, 26=AA, 51=AZ, 52=BA. There is no "zero"
/// digit, which is what distinguishes this from naive base-26.
pub fn column_label(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Inverse of [`column_label`]: "A" -> 0, "Z" -> 25, "AA" -> 26.
///
/// Returns `None` on empty input or anything outside `A..=Z`.
pub fn column_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    let mut acc: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        acc = acc * 26 + (ch as usize - 'A' as usize + 1);
    }
    Some(acc - 1)
}

/// Render a coordinate as an A1-style reference ("AB1" for row 0, col 27).
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_label(col), row + 1)
}

/// Parse an A1-style reference back to a coordinate.
///
/// Accepts exactly the shape `<uppercase letters><digits>` with a 1-based
/// row number; anything else (including lower-case letters; formula text
/// is upper-cased before reaching this point) is `None`. Callers treat
/// `None` as "not a cell reference", e.g. a literal.
pub fn parse_cell_ref(reference: &str) -> Option<CellPos> {
    let split = reference.find(|c: char| !c.is_ascii_uppercase())?;
    let (letters, digits) = reference.split_at(split);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let col = column_index(letters)?;
    let row_1based: usize = digits.parse().ok()?;
    if row_1based == 0 {
        return None;
    }
    Some(CellPos::new(row_1based - 1, col))
}

/// Expand a range string into the references it covers, row-major.
///
/// A string without `:` is a single reference. Malformed input (more than
/// two endpoints, or an endpoint that does not parse) degrades to the
/// original string as a single-element list.
pub fn expand_range(range: &str) -> Vec<String> {
    if !range.contains(':') {
        return vec![range.to_string()];
    }
    let parts: Vec<&str> = range.split(':').collect();
    if parts.len() != 2 {
        return vec![range.to_string()];
    }
    let (Some(a), Some(b)) = (parse_cell_ref(parts[0]), parse_cell_ref(parts[1])) else {
        return vec![range.to_string()];
    };
    let mut refs = Vec::new();
    for row in a.row.min(b.row)..=a.row.max(b.row) {
        for col in a.col.min(b.col)..=a.col.max(b.col) {
            refs.push(cell_ref(row, col));
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(0), "A");
        assert_eq!(column_label(1), "B");
        assert_eq!(column_label(25), "Z");
        assert_eq!(column_label(26), "AA");
        assert_eq!(column_label(51), "AZ");
        assert_eq!(column_label(52), "BA");
        assert_eq!(column_label(701), "ZZ");
        assert_eq!(column_label(702), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("Z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("a"), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_column_round_trip() {
        for n in 0..2000 {
            assert_eq!(column_index(&column_label(n)), Some(n), "column {}", n);
        }
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(9, 26), "AA10");
        assert_eq!(cell_ref(0, 27), "AB1");
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1"), Some(CellPos::new(0, 0)));
        assert_eq!(parse_cell_ref("AB12"), Some(CellPos::new(11, 27)));
        assert_eq!(parse_cell_ref("a1"), None);
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("A"), None);
        assert_eq!(parse_cell_ref("1A"), None);
        assert_eq!(parse_cell_ref("A1B"), None);
        assert_eq!(parse_cell_ref(""), None);
        assert_eq!(parse_cell_ref("A1:B2"), None);
    }

    #[test]
    fn test_reference_round_trip() {
        for row in [0usize, 1, 9, 99, 1023] {
            for col in [0usize, 1, 25, 26, 51, 700] {
                assert_eq!(parse_cell_ref(&cell_ref(row, col)), Some(CellPos::new(row, col)));
            }
        }
    }

    #[test]
    fn test_expand_range_single() {
        assert_eq!(expand_range("C3"), vec!["C3"]);
    }

    #[test]
    fn test_expand_range_rect() {
        assert_eq!(expand_range("A1:B2"), vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_expand_range_inverted_corners() {
        // Order of the endpoints does not matter.
        assert_eq!(expand_range("B2:A1"), vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_expand_range_column() {
        assert_eq!(expand_range("A1:A3"), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_expand_range_malformed() {
        assert_eq!(expand_range("A1:FOO"), vec!["A1:FOO"]);
        assert_eq!(expand_range("A1:B2:C3"), vec!["A1:B2:C3"]);
        assert_eq!(expand_range(":"), vec![":"]);
    }
}
