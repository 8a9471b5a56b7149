//! Editor node extensions.

pub mod table;

pub use table::{editable_table, Extension, NodeView};
