//! Built-in spreadsheet functions.
//!
//! The supported set is a closed enum: adding a function means adding a
//! variant, a name mapping, and a match arm. There is no open-ended
//! dispatch table. Reference and range arguments arrive as strings and the
//! function resolves them itself through the [`CellResolver`].

use super::eval::{format_number, parse_number, CellResolver, Value};
use crate::cell_ref::expand_range;

/// One classified argument. Classification happens exactly once, when the
/// call's raw arguments are prepared; built-ins never re-test shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Literal number (result of the expression evaluator).
    Number(f64),
    /// Literal text (result of the expression evaluator).
    Text(String),
    /// A single cell reference, e.g. `A1`, unresolved.
    Reference(String),
    /// A range string, e.g. `A1:B2`, unresolved.
    Range(String),
}

impl Arg {
    /// The argument's string form: numbers render like formula results,
    /// references and ranges keep their reference text.
    fn to_text(&self) -> String {
        match self {
            Arg::Number(n) => format_number(*n),
            Arg::Text(s) | Arg::Reference(s) | Arg::Range(s) => s.clone(),
        }
    }
}

/// The built-in function set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sum,
    Average,
    Count,
    Max,
    Min,
    Concatenate,
    If,
}

impl Function {
    /// Look up a (normalized, upper-case) name.
    pub fn from_name(name: &str) -> Option<Function> {
        match name {
            "SUM" => Some(Function::Sum),
            "AVERAGE" => Some(Function::Average),
            "COUNT" => Some(Function::Count),
            "MAX" => Some(Function::Max),
            "MIN" => Some(Function::Min),
            "CONCATENATE" => Some(Function::Concatenate),
            "IF" => Some(Function::If),
            _ => None,
        }
    }

    /// Apply the function to classified arguments. Built-ins are total:
    /// unresolvable inputs degrade per function (skip, zero, empty) rather
    /// than erroring.
    pub fn call<R: CellResolver>(&self, args: &[Arg], resolver: &R) -> Value {
        match self {
            Function::Sum => Value::Number(collect_numbers(args, resolver).iter().sum()),
            Function::Average => {
                let values = collect_numbers(args, resolver);
                if values.is_empty() {
                    // Empty input averages to 0, not #DIV/0!; the `/`
                    // operator sentinel does not apply here.
                    Value::Number(0.0)
                } else {
                    Value::Number(values.iter().sum::<f64>() / values.len() as f64)
                }
            }
            Function::Count => Value::Number(collect_numbers(args, resolver).len() as f64),
            Function::Max => {
                let values = collect_numbers(args, resolver);
                if values.is_empty() {
                    Value::Number(0.0)
                } else {
                    Value::Number(values.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
                }
            }
            Function::Min => {
                let values = collect_numbers(args, resolver);
                if values.is_empty() {
                    Value::Number(0.0)
                } else {
                    Value::Number(values.iter().cloned().fold(f64::INFINITY, f64::min))
                }
            }
            Function::Concatenate => {
                let mut result = String::new();
                for arg in args {
                    match arg {
                        Arg::Reference(reference) => {
                            result.push_str(&resolver.get_cell_value(reference))
                        }
                        other => result.push_str(&other.to_text()),
                    }
                }
                Value::Text(result)
            }
            Function::If => {
                if args.len() < 2 {
                    return Value::Text(String::new());
                }
                let truthy = match &args[0] {
                    Arg::Reference(reference) => {
                        let value = resolver.get_cell_value(reference);
                        !value.is_empty() && value != "0"
                    }
                    Arg::Number(n) => *n != 0.0,
                    Arg::Text(s) => !s.is_empty(),
                    // A range string always contains `:`, hence truthy.
                    Arg::Range(_) => true,
                };
                let chosen = if truthy {
                    &args[1]
                } else {
                    match args.get(2) {
                        Some(arg) => arg,
                        // Omitted else-branch defaults to empty string.
                        None => return Value::Text(String::new()),
                    }
                };
                match chosen {
                    Arg::Number(n) => Value::Number(*n),
                    other => Value::Text(other.to_text()),
                }
            }
        }
    }
}

/// Flatten arguments to the numeric values they resolve to, expanding
/// ranges cell by cell. Values that do not parse as numbers are skipped.
fn collect_numbers<R: CellResolver>(args: &[Arg], resolver: &R) -> Vec<f64> {
    let mut values = Vec::new();
    for arg in args {
        match arg {
            Arg::Range(range) => {
                for reference in expand_range(range) {
                    if let Some(n) = parse_number(&resolver.get_cell_value(&reference)) {
                        values.push(n);
                    }
                }
            }
            Arg::Reference(reference) => {
                if let Some(n) = parse_number(&resolver.get_cell_value(reference)) {
                    values.push(n);
                }
            }
            Arg::Number(n) => values.push(*n),
            Arg::Text(s) => {
                if let Some(n) = parse_number(s) {
                    values.push(n);
                }
            }
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::eval::evaluate_formula;
    use std::collections::HashMap;

    #[derive(Default)]
    struct TestSheet {
        cells: HashMap<String, String>,
    }

    impl TestSheet {
        fn with(pairs: &[(&str, &str)]) -> Self {
            let mut sheet = TestSheet::default();
            for (reference, value) in pairs {
                sheet.cells.insert(reference.to_string(), value.to_string());
            }
            sheet
        }
    }

    impl CellResolver for TestSheet {
        fn get_cell_value(&self, reference: &str) -> String {
            self.cells.get(reference).cloned().unwrap_or_default()
        }

        fn set_cell_value(&mut self, reference: &str, value: String) {
            self.cells.insert(reference.to_string(), value);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Function::from_name("SUM"), Some(Function::Sum));
        assert_eq!(Function::from_name("IF"), Some(Function::If));
        assert_eq!(Function::from_name("SUMX"), None);
        // Lookup happens after normalization; raw lower case is unknown.
        assert_eq!(Function::from_name("sum"), None);
    }

    #[test]
    fn test_sum_over_range() {
        let sheet = TestSheet::with(&[("A1", "1"), ("A2", "2"), ("A3", "3")]);
        assert_eq!(evaluate_formula("=SUM(A1:A3)", &sheet), "6");
    }

    #[test]
    fn test_sum_mixed_arguments() {
        let sheet = TestSheet::with(&[("A1", "1"), ("B2", "10")]);
        assert_eq!(evaluate_formula("=SUM(A1, B2, 5)", &sheet), "16");
        // Non-numeric cells contribute nothing.
        let sheet = TestSheet::with(&[("A1", "1"), ("A2", "note")]);
        assert_eq!(evaluate_formula("=SUM(A1:A2)", &sheet), "1");
    }

    #[test]
    fn test_average() {
        let sheet = TestSheet::with(&[("A1", "2"), ("A2", "4"), ("A3", "text")]);
        // Only the values that parse count toward the mean.
        assert_eq!(evaluate_formula("=AVERAGE(A1:A3)", &sheet), "3");
    }

    #[test]
    fn test_average_empty_is_zero() {
        // Asymmetric with the `/` operator, which does yield #DIV/0!.
        let sheet = TestSheet::default();
        assert_eq!(evaluate_formula("=AVERAGE(A1:A3)", &sheet), "0");
    }

    #[test]
    fn test_count() {
        let sheet = TestSheet::with(&[("A1", "1"), ("A2", "two"), ("A3", "3")]);
        assert_eq!(evaluate_formula("=COUNT(A1:A3)", &sheet), "2");
        assert_eq!(evaluate_formula("=COUNT(A1:A3, 7, oops)", &sheet), "3");
    }

    #[test]
    fn test_max_min() {
        let sheet = TestSheet::with(&[("A1", "5"), ("A2", "-3"), ("A3", "9")]);
        assert_eq!(evaluate_formula("=MAX(A1:A3)", &sheet), "9");
        assert_eq!(evaluate_formula("=MIN(A1:A3)", &sheet), "-3");
    }

    #[test]
    fn test_max_min_empty_is_zero() {
        let sheet = TestSheet::default();
        assert_eq!(evaluate_formula("=MAX(B1:B4)", &sheet), "0");
        assert_eq!(evaluate_formula("=MIN(B1:B4)", &sheet), "0");
    }

    #[test]
    fn test_concatenate() {
        let sheet = TestSheet::with(&[("A1", "world")]);
        assert_eq!(
            evaluate_formula("=CONCATENATE(\"Hello \", A1)", &sheet),
            "Hello world"
        );
    }

    #[test]
    fn test_concatenate_preserves_quoted_case() {
        // The function name is case-insensitive; the quoted "a1" is a
        // literal, not a reference, and keeps its case.
        let sheet = TestSheet::with(&[("A1", "CELL")]);
        assert_eq!(
            evaluate_formula("=concatenate(\"Hello\", \"a1\")", &sheet),
            "Helloa1"
        );
    }

    #[test]
    fn test_concatenate_range_is_literal() {
        // Ranges are not expanded by CONCATENATE; the range text itself
        // concatenates.
        let sheet = TestSheet::with(&[("A1", "x"), ("A2", "y")]);
        assert_eq!(evaluate_formula("=CONCATENATE(A1:A2)", &sheet), "A1:A2");
    }

    #[test]
    fn test_if_reference_condition() {
        let sheet = TestSheet::with(&[("A1", "5"), ("B1", "0"), ("C1", "")]);
        assert_eq!(evaluate_formula("=IF(A1, yes, no)", &sheet), "YES");
        // "0" and empty are falsy for reference conditions.
        assert_eq!(evaluate_formula("=IF(B1, yes, no)", &sheet), "NO");
        assert_eq!(evaluate_formula("=IF(D4, yes, no)", &sheet), "NO");
    }

    #[test]
    fn test_if_literal_condition() {
        let sheet = TestSheet::default();
        assert_eq!(evaluate_formula("=IF(1, a, b)", &sheet), "A");
        assert_eq!(evaluate_formula("=IF(0, a, b)", &sheet), "B");
    }

    #[test]
    fn test_if_defaults_and_arity() {
        let sheet = TestSheet::default();
        // Missing else-branch defaults to empty string.
        assert_eq!(evaluate_formula("=IF(0, a)", &sheet), "");
        // Fewer than two arguments yields empty, not an error.
        assert_eq!(evaluate_formula("=IF(1)", &sheet), "");
    }

    #[test]
    fn test_if_branch_not_reevaluated() {
        // Branches come back as classified arguments; a reference branch
        // returns its reference text, it is not resolved again.
        let sheet = TestSheet::with(&[("A1", "1"), ("B1", "99")]);
        assert_eq!(evaluate_formula("=IF(A1, B1, C1)", &sheet), "B1");
    }

    #[test]
    fn test_empty_argument_list() {
        let sheet = TestSheet::default();
        assert_eq!(evaluate_formula("=SUM()", &sheet), "0");
        assert_eq!(evaluate_formula("=COUNT()", &sheet), "0");
    }
}
