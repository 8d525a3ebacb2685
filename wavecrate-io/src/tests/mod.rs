//! Test modules for wavecrate-io
//!
//! Statement-level behavior is tested next to each parser. These modules cover
//! whole documents: reference scenarios, error reporting, and write/read round
//! trips through files.

pub mod obj_document_tests;
pub mod round_trip_tests;
