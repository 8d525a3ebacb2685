//! Vertex types and index references

use nalgebra::{Vector3, Vector4};
use serde::{Deserialize, Serialize};

/// A 3 component vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 4 component vector with floating point components
pub type Vector4f = Vector4<f32>;

/// A geometric vertex with optional per-vertex color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Position as (x, y, z, w), w defaults to 1
    pub position: Vector4f,
    /// Color as (r, g, b, a), a defaults to 1
    pub color: Option<Vector4f>,
}

impl Vertex {
    /// Create a vertex at (x, y, z) with w = 1 and no color
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vector4f::new(x, y, z, 1.0),
            color: None,
        }
    }

    /// Create a vertex with an explicit weight
    pub fn with_weight(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            position: Vector4f::new(x, y, z, w),
            color: None,
        }
    }

    /// Attach a vertex color
    pub fn with_color(mut self, color: Vector4f) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// A `vertex/texture/normal` reference used by points, lines, faces and surfaces.
///
/// Indices are absolute and 1-based. A texture or normal index of 0 means the
/// component is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Triplet {
    pub vertex: usize,
    pub texture: usize,
    pub normal: usize,
}

impl Triplet {
    pub fn new(vertex: usize, texture: usize, normal: usize) -> Self {
        Self { vertex, texture, normal }
    }

    /// A triplet referencing only a vertex
    pub fn vertex(vertex: usize) -> Self {
        Self::new(vertex, 0, 0)
    }

    pub fn has_texture(&self) -> bool {
        self.texture != 0
    }

    pub fn has_normal(&self) -> bool {
        self.normal != 0
    }
}

/// A `(start, end, curve2D)` reference used by trimming loops, special curves
/// and surface connections. `curve_2d` is an absolute 1-based index.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CurveIndex {
    pub start: f32,
    pub end: f32,
    pub curve_2d: usize,
}

impl CurveIndex {
    pub fn new(start: f32, end: f32, curve_2d: usize) -> Self {
        Self { start, end, curve_2d }
    }
}
