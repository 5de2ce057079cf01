pub mod cell;
pub mod cell_ref;
pub mod clipboard;
pub mod format;
pub mod formula;
pub mod selection;
pub mod sheet;
