//! The cell store.
//!
//! A [`Sheet`] maps reference strings to cell records and is the state all
//! engine operations act on. The caller (a document/session object) owns
//! it; the engine keeps no globals. The sheet implements [`CellResolver`],
//! so formulas committed to it resolve against its current contents;
//! evaluation is pull-based, triggered only when a cell's own formula is
//! committed, never by precedent changes.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellFormat, NumberFormat, NumberFormatKind};
use crate::format::{self, apply_format};
use crate::formula::eval::{evaluate_formula, CellResolver};
use crate::selection::Selection;

/// Default font size in points, matching the grid's base style.
const DEFAULT_FONT_SIZE: u8 = 11;
/// Smallest font size the ribbon's shrink action will reach.
const MIN_FONT_SIZE: u8 = 8;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    cells: FxHashMap<String, Cell>,
}

impl CellResolver for Sheet {
    fn get_cell_value(&self, reference: &str) -> String {
        self.cells
            .get(reference)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    fn set_cell_value(&mut self, reference: &str, value: String) {
        let cell = self.cells.entry(reference.to_string()).or_default();
        cell.value = value;
    }
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit raw input to a cell. This is the edit-commit boundary.
    ///
    /// Input starting with `=` is evaluated against this sheet and stored
    /// as `{value: result, formula: raw}`; the raw text is kept even when
    /// the result is an error sentinel, so the user can re-edit. Anything
    /// else is stored literally. An existing format survives the commit.
    pub fn commit_input(&mut self, reference: &str, input: &str) {
        let (value, formula) = if input.starts_with('=') {
            (evaluate_formula(input, self), Some(input.to_string()))
        } else {
            (input.to_string(), None)
        };
        let format = self.cells.get(reference).and_then(|cell| cell.format.clone());
        self.cells.insert(
            reference.to_string(),
            Cell {
                value,
                formula,
                format,
            },
        );
    }

    pub fn get(&self, reference: &str) -> Option<&Cell> {
        self.cells.get(reference)
    }

    /// Replace the full record at a reference.
    pub fn insert(&mut self, reference: impl Into<String>, cell: Cell) {
        self.cells.insert(reference.into(), cell);
    }

    pub fn remove(&mut self, reference: &str) -> Option<Cell> {
        self.cells.remove(reference)
    }

    /// The stored value, empty string for absent cells.
    pub fn cell_value(&self, reference: &str) -> String {
        self.get_cell_value(reference)
    }

    /// The format-aware display string for a cell.
    pub fn display_value(&self, reference: &str) -> String {
        self.cells
            .get(reference)
            .map(format::display_value)
            .unwrap_or_default()
    }

    /// What the formula bar shows for a cell: the formula when there is
    /// one, otherwise the stored value.
    pub fn editor_text(&self, reference: &str) -> String {
        match self.cells.get(reference) {
            Some(cell) => cell.formula.clone().unwrap_or_else(|| cell.value.clone()),
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Cell)> {
        self.cells.iter()
    }

    // Format operations (the ribbon boundary). Each resolves the selection
    // to references and shallow-merges a partial format per cell.

    pub fn apply_format_to(&mut self, reference: &str, patch: &CellFormat) {
        let cell = apply_format(self.cells.get(reference), patch);
        self.cells.insert(reference.to_string(), cell);
    }

    pub fn apply_format_to_selection(&mut self, selection: &Selection, patch: &CellFormat) {
        for reference in selection.refs() {
            self.apply_format_to(&reference, patch);
        }
    }

    pub fn toggle_bold(&mut self, selection: &Selection) {
        self.toggle_flag(selection, |f| f.bold, |on| CellFormat {
            bold: Some(on),
            ..CellFormat::default()
        });
    }

    pub fn toggle_italic(&mut self, selection: &Selection) {
        self.toggle_flag(selection, |f| f.italic, |on| CellFormat {
            italic: Some(on),
            ..CellFormat::default()
        });
    }

    pub fn toggle_underline(&mut self, selection: &Selection) {
        self.toggle_flag(selection, |f| f.underline, |on| CellFormat {
            underline: Some(on),
            ..CellFormat::default()
        });
    }

    /// Per-cell flag toggle: each cell flips its own current state.
    fn toggle_flag(
        &mut self,
        selection: &Selection,
        read: impl Fn(&CellFormat) -> Option<bool>,
        patch: impl Fn(bool) -> CellFormat,
    ) {
        for reference in selection.refs() {
            let on = self
                .cells
                .get(&reference)
                .and_then(|cell| cell.format.as_ref())
                .and_then(|format| read(format))
                .unwrap_or(false);
            self.apply_format_to(&reference, &patch(!on));
        }
    }

    pub fn set_font_size(&mut self, selection: &Selection, size: u8) {
        self.apply_format_to_selection(
            selection,
            &CellFormat {
                font_size: Some(size),
                ..CellFormat::default()
            },
        );
    }

    /// Grow or shrink each cell's font size relative to its current size
    /// (11pt when unset), with an 8pt floor.
    pub fn adjust_font_size(&mut self, selection: &Selection, delta: i16) {
        for reference in selection.refs() {
            let current = self
                .cells
                .get(&reference)
                .and_then(|cell| cell.format.as_ref())
                .and_then(|format| format.font_size)
                .unwrap_or(DEFAULT_FONT_SIZE);
            let next = (current as i16 + delta).clamp(MIN_FONT_SIZE as i16, u8::MAX as i16) as u8;
            self.apply_format_to(
                &reference,
                &CellFormat {
                    font_size: Some(next),
                    ..CellFormat::default()
                },
            );
        }
    }

    /// Grow or shrink each cell's decimal count relative to its current
    /// number format. Cells without a number format start from the plain
    /// number kind at its default decimal count; the count floors at 0 and
    /// the thousands-separator flag is preserved.
    pub fn adjust_decimals(&mut self, selection: &Selection, delta: i8) {
        for reference in selection.refs() {
            let current = self
                .cells
                .get(&reference)
                .and_then(|cell| cell.format.as_ref())
                .and_then(|format| format.number_format.clone())
                .unwrap_or(NumberFormat {
                    kind: NumberFormatKind::Number,
                    decimals: None,
                    use_thousands_separator: false,
                });
            let decimals = current
                .decimals
                .unwrap_or_else(|| format::default_decimals(current.kind));
            let next = (decimals as i16 + delta as i16).clamp(0, u8::MAX as i16) as u8;
            self.apply_format_to(
                &reference,
                &CellFormat {
                    number_format: Some(NumberFormat {
                        kind: current.kind,
                        decimals: Some(next),
                        use_thousands_separator: current.use_thousands_separator,
                    }),
                    ..CellFormat::default()
                },
            );
        }
    }

    /// Remove every record in the selection (the delete-key path).
    pub fn clear_selection(&mut self, selection: &Selection) {
        for reference in selection.refs() {
            self.cells.remove(&reference);
        }
    }
}
