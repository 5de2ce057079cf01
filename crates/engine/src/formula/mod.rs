//! Formula parsing and evaluation.
//!
//! The entry point is [`eval::evaluate_formula`], which takes raw formula
//! text and a [`eval::CellResolver`] and always comes back with a result
//! string; evaluation failures surface as the `#ERROR!` sentinel, never as
//! a panic or an error type crossing this boundary.

pub mod eval;
pub mod functions;
pub mod parser;

pub use eval::{evaluate_formula, CellResolver, Value, DIV_ZERO, ERROR};
pub use functions::{Arg, Function};
