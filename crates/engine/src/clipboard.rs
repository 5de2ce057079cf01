//! Clipboard capture and paste.
//!
//! A snapshot is a sparse copy of the records inside a selection rectangle
//! plus the operation tag. The slot is single: callers keep at most one
//! snapshot and replace it on the next copy/cut. Paste tiles the snapshot
//! across a larger target, clipping partial tiles at the far edge; a cut
//! evacuates the captured source cells exactly once after all tiles are
//! written.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::cell_ref::{parse_cell_ref, CellPos};
use crate::selection::Selection;
use crate::sheet::Sheet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardOp {
    Copy,
    Cut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardSnapshot {
    /// Captured records, keyed by their original reference. Sparse: cells
    /// with no record in the source rectangle are simply absent.
    cells: FxHashMap<String, Cell>,
    /// Top-left corner of the captured rectangle.
    start: CellPos,
    /// Bottom-right corner of the captured rectangle.
    end: CellPos,
    op: ClipboardOp,
}

impl ClipboardSnapshot {
    pub fn op(&self) -> ClipboardOp {
        self.op
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    /// Number of captured records (not rectangle area).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Snapshot the records inside a selection.
pub fn capture(sheet: &Sheet, selection: &Selection, op: ClipboardOp) -> ClipboardSnapshot {
    let (start, end) = selection.normalized();
    let mut cells = FxHashMap::default();
    for reference in selection.refs() {
        if let Some(cell) = sheet.get(&reference) {
            cells.insert(reference, cell.clone());
        }
    }
    ClipboardSnapshot {
        cells,
        start,
        end,
        op,
    }
}

/// Paste a snapshot over a target selection, tiling as needed.
///
/// The snapshot repeats `ceil(target/source)` times along each axis (at
/// least once), anchored at the target's top-left corner. Destinations
/// past the target's bottom-right corner are clipped, not wrapped. When
/// the snapshot came from a cut, every originally captured reference is
/// removed after all tiles are written; source cells vacate once, not
/// once per tile, and a pasted record landing on a source reference is
/// removed with it.
pub fn apply(sheet: &mut Sheet, snapshot: &ClipboardSnapshot, target: &Selection) {
    let source_w = snapshot.width();
    let source_h = snapshot.height();
    let (target_start, target_end) = target.normalized();
    let target_w = target_end.col - target_start.col + 1;
    let target_h = target_end.row - target_start.row + 1;

    let repeat_x = target_w.div_ceil(source_w).max(1);
    let repeat_y = target_h.div_ceil(source_h).max(1);

    for repeat_row in 0..repeat_y {
        for repeat_col in 0..repeat_x {
            for (source_ref, cell) in &snapshot.cells {
                let Some(pos) = parse_cell_ref(source_ref) else {
                    continue;
                };
                let rel_row = pos.row - snapshot.start.row;
                let rel_col = pos.col - snapshot.start.col;
                let row = target_start.row + repeat_row * source_h + rel_row;
                let col = target_start.col + repeat_col * source_w + rel_col;
                if row > target_end.row || col > target_end.col {
                    continue;
                }
                sheet.insert(crate::cell_ref::cell_ref(row, col), cell.clone());
            }
        }
    }

    if snapshot.op == ClipboardOp::Cut {
        for reference in snapshot.cells.keys() {
            sheet.remove(reference);
        }
    }
}
