//! Format merging, number-format rendering, and style projection.
//!
//! Everything here is a pure function over cell records: no store access,
//! no mutation of inputs. The renderer consumes [`CellStyle`]; everything
//! else in this module backs the grid's display strings.

use serde::{Deserialize, Serialize};

use crate::cell::{BorderLine, Cell, CellFormat, HorizontalAlign, NumberFormatKind, VerticalAlign};

/// Overlay a partial format onto a cell, returning the new record.
///
/// The value is preserved (empty when there was no cell); the format is
/// shallow-merged field by field. Inputs are never mutated.
pub fn apply_format(existing: Option<&Cell>, patch: &CellFormat) -> Cell {
    let mut cell = existing.cloned().unwrap_or_default();
    let base = cell.format.take().unwrap_or_default();
    cell.format = Some(base.merged(patch));
    cell
}

/// Default decimal count for a number-format kind when the descriptor
/// leaves it unset.
pub(crate) fn default_decimals(kind: NumberFormatKind) -> u8 {
    match kind {
        NumberFormatKind::Number => 0,
        NumberFormatKind::General => 0,
        NumberFormatKind::Currency
        | NumberFormatKind::Percentage
        | NumberFormatKind::Accounting => 2,
    }
}

/// Render a cell's display string.
///
/// The raw stored value comes back unchanged unless a number format is set
/// and the value parses as a number. General acts as the fallback kind and
/// also renders raw.
pub fn display_value(cell: &Cell) -> String {
    let Some(number_format) = cell.format.as_ref().and_then(|f| f.number_format.as_ref()) else {
        return cell.value.clone();
    };
    let Ok(n) = cell.value.trim().parse::<f64>() else {
        return cell.value.clone();
    };
    let decimals = number_format
        .decimals
        .unwrap_or_else(|| default_decimals(number_format.kind)) as usize;

    match number_format.kind {
        NumberFormatKind::General => cell.value.clone(),
        NumberFormatKind::Number => {
            let fixed = format!("{:.*}", decimals, n);
            if number_format.use_thousands_separator {
                group_thousands(&fixed)
            } else {
                fixed
            }
        }
        NumberFormatKind::Currency => {
            let fixed = group_thousands(&format!("{:.*}", decimals, n.abs()));
            if n < 0.0 {
                format!("-${}", fixed)
            } else {
                format!("${}", fixed)
            }
        }
        NumberFormatKind::Percentage => format!("{:.*}%", decimals, n * 100.0),
        NumberFormatKind::Accounting => {
            if n < 0.0 {
                format!("({:.*})", decimals, n.abs())
            } else {
                format!("{:.*}", decimals, n)
            }
        }
    }
}

/// Insert grouping separators into the integer part of an already-fixed
/// decimal string.
fn group_thousands(fixed: &str) -> String {
    let (number, fraction) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (fixed, None),
    };
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Presentational attributes projected from a cell format.
///
/// Pure data for the out-of-scope renderer: CSS-shaped values keyed the way
/// the front end expects them. Unset fields are omitted from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    /// Flex-like vertical alignment key: flex-start, center, flex-end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<String>,
}

/// Project a format to its presentational attributes. No side effects.
pub fn cell_style(format: &CellFormat) -> CellStyle {
    let mut style = CellStyle::default();

    style.font_family = format.font_family.clone();
    style.font_size = format.font_size.map(|size| format!("{}px", size));
    if format.bold == Some(true) {
        style.font_weight = Some("bold".to_string());
    }
    if format.italic == Some(true) {
        style.font_style = Some("italic".to_string());
    }

    let mut decorations = Vec::new();
    if format.underline == Some(true) {
        decorations.push("underline");
    }
    if format.strikethrough == Some(true) {
        decorations.push("line-through");
    }
    if !decorations.is_empty() {
        style.text_decoration = Some(decorations.join(" "));
    }

    style.color = format.text_color.clone();
    style.background_color = format.background_color.clone();

    style.text_align = format.horizontal_align.map(|align| {
        match align {
            HorizontalAlign::Left => "left",
            HorizontalAlign::Center => "center",
            HorizontalAlign::Right => "right",
        }
        .to_string()
    });
    style.align_items = format.vertical_align.map(|align| {
        match align {
            VerticalAlign::Top => "flex-start",
            VerticalAlign::Middle => "center",
            VerticalAlign::Bottom => "flex-end",
        }
        .to_string()
    });

    if let Some(borders) = &format.borders {
        let color = borders.color.as_deref().unwrap_or("#000000");
        let line = match borders.style {
            Some(BorderLine::Dashed) => "dashed",
            Some(BorderLine::Dotted) => "dotted",
            _ => "solid",
        };
        let edge = format!("1px {} {}", line, color);
        if borders.top {
            style.border_top = Some(edge.clone());
        }
        if borders.right {
            style.border_right = Some(edge.clone());
        }
        if borders.bottom {
            style.border_bottom = Some(edge.clone());
        }
        if borders.left {
            style.border_left = Some(edge);
        }
    }

    style
}
