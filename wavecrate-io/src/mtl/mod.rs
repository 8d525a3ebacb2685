//! Wavefront MTL material libraries

pub mod map;
pub mod reader;
pub mod writer;

pub use map::{format_map, parse_map, ParsedMap};
pub use reader::{MapSlot, MtlReader, MtlStatementParser};
pub use writer::MtlWriter;
