//! Rectangular selections.
//!
//! A selection is an anchor/cursor pair of coordinates; the covered
//! rectangle is always the min/max normalization of the two corners, no
//! matter which corner the drag started from.

use serde::{Deserialize, Serialize};

use crate::cell_ref::{cell_ref, CellPos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: CellPos,
    pub end: CellPos,
}

impl Selection {
    pub fn new(start: CellPos, end: CellPos) -> Self {
        Self { start, end }
    }

    /// Selection covering a single cell.
    pub fn single(pos: CellPos) -> Self {
        Self { start: pos, end: pos }
    }

    /// The covered rectangle as (top-left, bottom-right) corners.
    pub fn normalized(&self) -> (CellPos, CellPos) {
        (
            CellPos::new(self.start.row.min(self.end.row), self.start.col.min(self.end.col)),
            CellPos::new(self.start.row.max(self.end.row), self.start.col.max(self.end.col)),
        )
    }

    pub fn width(&self) -> usize {
        let (min, max) = self.normalized();
        max.col - min.col + 1
    }

    pub fn height(&self) -> usize {
        let (min, max) = self.normalized();
        max.row - min.row + 1
    }

    /// All references in the covered rectangle, row-major.
    pub fn refs(&self) -> Vec<String> {
        let (min, max) = self.normalized();
        let mut refs = Vec::with_capacity(self.width() * self.height());
        for row in min.row..=max.row {
            for col in min.col..=max.col {
                refs.push(cell_ref(row, col));
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_inverted() {
        let sel = Selection::new(CellPos::new(3, 2), CellPos::new(1, 0));
        let (min, max) = sel.normalized();
        assert_eq!(min, CellPos::new(1, 0));
        assert_eq!(max, CellPos::new(3, 2));
    }

    #[test]
    fn test_dimensions() {
        let sel = Selection::new(CellPos::new(0, 0), CellPos::new(2, 1));
        assert_eq!(sel.width(), 2);
        assert_eq!(sel.height(), 3);
    }

    #[test]
    fn test_refs_row_major() {
        let sel = Selection::new(CellPos::new(1, 1), CellPos::new(0, 0));
        assert_eq!(sel.refs(), vec!["A1", "B1", "A2", "B2"]);
    }

    #[test]
    fn test_single() {
        let sel = Selection::single(CellPos::new(4, 3));
        assert_eq!(sel.refs(), vec!["D5"]);
    }
}
