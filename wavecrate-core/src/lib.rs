//! Core data structures for wavecrate
//!
//! This crate provides the in-memory model of Wavefront OBJ geometry files and
//! MTL material libraries, the shared error type, and index resolution for
//! OBJ's 1-based and relative references.

pub mod error;
pub mod index;
pub mod vertex;
pub mod element;
pub mod group;
pub mod document;
pub mod material;

pub use error::*;
pub use index::*;
pub use vertex::*;
pub use element::*;
pub use group::*;
pub use document::*;
pub use material::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Vector3, Vector4};
