//! Cell records and formatting descriptors.
//!
//! A [`Cell`] is what the store keeps per reference: the display-backing
//! value, the raw formula text when the input began with `=`, and an
//! optional format. Every field of [`CellFormat`] is optional so a partial
//! patch and a stored format are the same type; merging overlays only the
//! fields the patch names.

use serde::{Deserialize, Serialize};

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Border line style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BorderLine {
    Solid,
    Dashed,
    Dotted,
}

/// Per-edge border flags plus shared color/style.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Borders {
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
    pub color: Option<String>,
    pub style: Option<BorderLine>,
}

/// Number format category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NumberFormatKind {
    #[default]
    General,
    Number,
    Currency,
    Percentage,
    Accounting,
}

/// Number format descriptor.
///
/// `decimals` left unset falls back to the kind's default (0 for number,
/// 2 for currency/percentage/accounting).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub kind: NumberFormatKind,
    pub decimals: Option<u8>,
    #[serde(default)]
    pub use_thousands_separator: bool,
}

/// Cell formatting options. All fields optional; a value of `None` means
/// "not set here", so the same type serves as both a stored format and a
/// partial patch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellFormat {
    pub font_family: Option<String>,
    pub font_size: Option<u8>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub text_color: Option<String>,
    pub background_color: Option<String>,
    pub horizontal_align: Option<HorizontalAlign>,
    pub vertical_align: Option<VerticalAlign>,
    pub borders: Option<Borders>,
    pub number_format: Option<NumberFormat>,
}

impl CellFormat {
    /// Shallow field-by-field merge: the patch's set fields win, everything
    /// else keeps the current value.
    pub fn merged(&self, patch: &CellFormat) -> CellFormat {
        CellFormat {
            font_family: patch.font_family.clone().or_else(|| self.font_family.clone()),
            font_size: patch.font_size.or(self.font_size),
            bold: patch.bold.or(self.bold),
            italic: patch.italic.or(self.italic),
            underline: patch.underline.or(self.underline),
            strikethrough: patch.strikethrough.or(self.strikethrough),
            text_color: patch.text_color.clone().or_else(|| self.text_color.clone()),
            background_color: patch
                .background_color
                .clone()
                .or_else(|| self.background_color.clone()),
            horizontal_align: patch.horizontal_align.or(self.horizontal_align),
            vertical_align: patch.vertical_align.or(self.vertical_align),
            borders: patch.borders.clone().or_else(|| self.borders.clone()),
            number_format: patch.number_format.clone().or_else(|| self.number_format.clone()),
        }
    }
}

/// One stored cell.
///
/// Invariant: when `formula` is `None`, `value` is exactly the user's
/// literal input; when `Some`, `value` is the most recent evaluation result
/// (or an error sentinel) and `formula` keeps the raw text for re-editing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub value: String,
    pub formula: Option<String>,
    pub format: Option<CellFormat>,
}

impl Cell {
    /// A cell holding a literal value with no formula or format.
    pub fn literal(value: impl Into<String>) -> Self {
        Cell {
            value: value.into(),
            formula: None,
            format: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlays_only_named_fields() {
        let base = CellFormat {
            bold: Some(true),
            font_size: Some(14),
            ..CellFormat::default()
        };
        let patch = CellFormat {
            italic: Some(true),
            ..CellFormat::default()
        };
        let merged = base.merged(&patch);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.italic, Some(true));
        assert_eq!(merged.font_size, Some(14));
        assert_eq!(merged.underline, None);
    }

    #[test]
    fn test_merge_patch_wins() {
        let base = CellFormat {
            font_size: Some(11),
            ..CellFormat::default()
        };
        let patch = CellFormat {
            font_size: Some(16),
            ..CellFormat::default()
        };
        assert_eq!(base.merged(&patch).font_size, Some(16));
    }

    #[test]
    fn test_merge_replaces_number_format_whole() {
        // Nested descriptors merge as units, not field-by-field inside.
        let base = CellFormat {
            number_format: Some(NumberFormat {
                kind: NumberFormatKind::Currency,
                decimals: Some(3),
                use_thousands_separator: true,
            }),
            ..CellFormat::default()
        };
        let patch = CellFormat {
            number_format: Some(NumberFormat {
                kind: NumberFormatKind::Number,
                decimals: None,
                use_thousands_separator: false,
            }),
            ..CellFormat::default()
        };
        let merged = base.merged(&patch);
        assert_eq!(merged.number_format.unwrap().kind, NumberFormatKind::Number);
    }

    #[test]
    fn test_literal() {
        let cell = Cell::literal("42");
        assert_eq!(cell.value, "42");
        assert!(cell.formula.is_none());
        assert!(cell.format.is_none());
    }
}
