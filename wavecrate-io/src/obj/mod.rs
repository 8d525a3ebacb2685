//! Wavefront OBJ geometry files
//!
//! Reading is a single pass over the statements of a file. Each statement
//! either appends geometry to the [`ObjDocument`](wavecrate_core::ObjDocument)
//! or changes the [`ObjParseContext`] that the following elements are created with.

pub mod context;
pub mod reader;
pub mod writer;

pub use context::{CurrentFreeForm, ObjParseContext};
pub use reader::{ObjReader, ObjStatementParser};
pub use writer::ObjWriter;
