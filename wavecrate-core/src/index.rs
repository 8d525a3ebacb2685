//! Resolution of OBJ index references
//!
//! OBJ statements refer to previously declared geometry with 1-based indices.
//! A negative index counts backwards from the most recent declaration, so `-1`
//! is the last vertex read so far. Zero never names an entity.

use thiserror::Error;

/// An index that does not land inside its target collection
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} is out of range for a collection of {count} entries")]
pub struct IndexOutOfRange {
    pub index: i64,
    pub count: usize,
}

/// Resolve a raw 1-based or negative relative index against a collection of `count` entries.
///
/// Returns the absolute 1-based index. Fails unless `1 <= result <= count`.
pub fn resolve_index(index: i64, count: usize) -> Result<usize, IndexOutOfRange> {
    let resolved = if index < 0 {
        count as i64 + index + 1
    } else {
        index
    };

    if resolved < 1 || resolved > count as i64 {
        return Err(IndexOutOfRange { index, count });
    }

    Ok(resolved as usize)
}

/// Resolve an optional index where zero means "not specified".
pub fn resolve_optional_index(index: i64, count: usize) -> Result<usize, IndexOutOfRange> {
    if index == 0 {
        Ok(0)
    } else {
        resolve_index(index, count)
    }
}
