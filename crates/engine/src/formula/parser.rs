//! Formula text recognition: case normalization, function-call shape,
//! quoted literals.
//!
//! This is not a grammar. Function calls are recognized by shape
//! (`NAME(ARGS)`) and arguments are a flat comma split, so nested calls
//! inside arguments split incorrectly. Callers rely on that limitation
//! staying observable.

/// Upper-case everything outside quoted spans, leaving quoted content
/// untouched. Spans are delimited by a matching `"` or `'`. This is what
/// makes function names and cell references case-insensitive while user
/// string literals keep their case.
pub fn normalize_case(formula: &str) -> String {
    let mut result = String::with_capacity(formula.len());
    let mut quote: Option<char> = None;
    for ch in formula.chars() {
        match quote {
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                result.push(ch);
            }
            None => result.extend(ch.to_uppercase()),
            Some(q) if ch == q => {
                quote = None;
                result.push(ch);
            }
            Some(_) => result.push(ch),
        }
    }
    result
}

/// A recognized `NAME(ARGS)` shape. `args` are the raw comma-split,
/// trimmed argument texts, not yet classified or evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<String>,
}

/// Recognize a function-call shape on already-normalized text.
///
/// `NAME` is one or more ASCII uppercase letters, immediately followed by
/// `(`, and the text must end with `)`. Anything else (leading whitespace
/// included) is not a call and falls through to the expression evaluator.
pub fn parse_function_call(text: &str) -> Option<FunctionCall> {
    let name_end = text.find(|c: char| !c.is_ascii_uppercase())?;
    if name_end == 0 || text.as_bytes()[name_end] != b'(' || !text.ends_with(')') {
        return None;
    }
    let inner = &text[name_end + 1..text.len() - 1];
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        inner.split(',').map(|arg| arg.trim().to_string()).collect()
    };
    Some(FunctionCall {
        name: text[..name_end].to_string(),
        args,
    })
}

/// Strip one layer of matching quotes (`"…"` or `'…'`), if present.
pub fn unquote(text: &str) -> Option<&str> {
    for q in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(q) && text.ends_with(q) {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}
