//! Geometric and free-form elements
//!
//! Every element snapshots the attribute state that was active when its
//! declaring statement was read. Attributes are factored into small structs
//! that the concrete element types embed:
//! - [`ElementAttributes`] for every element (object, level of detail, map, material)
//! - [`PolygonalAttributes`] for points, lines and faces
//! - [`FreeFormAttributes`] for curves, 2D curves and surfaces

use crate::vertex::{CurveIndex, Triplet};
use serde::{Deserialize, Serialize};

/// Attributes shared by every element
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementAttributes {
    pub object_name: Option<String>,
    pub level_of_detail: i32,
    pub map_name: Option<String>,
    pub material_name: Option<String>,
}

/// Rendering attributes of points, lines and faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolygonalAttributes {
    /// Smoothing group number, 0 means smoothing is off
    pub smoothing_group: i32,
    pub bevel_interpolation: bool,
    pub color_interpolation: bool,
    pub dissolve_interpolation: bool,
}

/// Curve or surface basis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FreeFormType {
    #[default]
    BasisMatrix,
    Bezier,
    BSpline,
    Cardinal,
    Taylor,
}

impl FreeFormType {
    /// Parse the `cstype` keyword for this basis (case-insensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "bmatrix" => Some(FreeFormType::BasisMatrix),
            "bezier" => Some(FreeFormType::Bezier),
            "bspline" => Some(FreeFormType::BSpline),
            "cardinal" => Some(FreeFormType::Cardinal),
            "taylor" => Some(FreeFormType::Taylor),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            FreeFormType::BasisMatrix => "bmatrix",
            FreeFormType::Bezier => "bezier",
            FreeFormType::BSpline => "bspline",
            FreeFormType::Cardinal => "cardinal",
            FreeFormType::Taylor => "taylor",
        }
    }
}

/// Curve and surface approximation technique (`ctech` / `stech`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ApproximationTechnique {
    /// Fixed number of subdivisions per parameter direction
    ConstantParametric { resolution_u: f32, resolution_v: f32 },
    /// Subdivide until segments are shorter than the given length
    ConstantSpatial { maximum_length: f32 },
    /// Subdivide on distance and angle tolerances
    CurvatureDependent { maximum_distance: f32, maximum_angle: f32 },
}

/// Attributes and trailing body data of curves, 2D curves and surfaces
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FreeFormAttributes {
    /// Merging group number, 0 means merging is off
    pub merging_group: i32,
    pub free_form_type: FreeFormType,
    pub is_rational: bool,
    pub degree_u: i32,
    pub degree_v: i32,
    pub basis_matrix_u: Option<Vec<f32>>,
    pub basis_matrix_v: Option<Vec<f32>>,
    pub step_u: i32,
    pub step_v: i32,
    pub curve_technique: Option<ApproximationTechnique>,
    pub surface_technique: Option<ApproximationTechnique>,

    pub parameters_u: Vec<f32>,
    pub parameters_v: Vec<f32>,
    pub outer_trimming_curves: Vec<CurveIndex>,
    pub inner_trimming_curves: Vec<CurveIndex>,
    pub sequence_curves: Vec<CurveIndex>,
    /// Absolute 1-based parameter space vertex indices
    pub special_points: Vec<usize>,
}

impl FreeFormAttributes {
    /// Whether any statement between the declaration and `end` carried data
    pub fn has_body(&self) -> bool {
        !self.parameters_u.is_empty()
            || !self.parameters_v.is_empty()
            || !self.outer_trimming_curves.is_empty()
            || !self.inner_trimming_curves.is_empty()
            || !self.sequence_curves.is_empty()
            || !self.special_points.is_empty()
    }
}

/// A point set, polyline or face
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonalElement {
    pub attributes: ElementAttributes,
    pub polygonal: PolygonalAttributes,
    pub vertices: Vec<Triplet>,
}

/// A `p` statement
pub type Point = PolygonalElement;

/// An `l` statement
pub type Line = PolygonalElement;

/// An `f` or `fo` statement
pub type Face = PolygonalElement;

impl PolygonalElement {
    pub fn new(vertices: Vec<Triplet>) -> Self {
        Self {
            vertices,
            ..Default::default()
        }
    }
}

/// A free-form curve in model space (`curv`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve {
    pub attributes: ElementAttributes,
    pub free_form: FreeFormAttributes,
    pub start_parameter: f32,
    pub end_parameter: f32,
    /// Absolute 1-based vertex indices (control points)
    pub vertices: Vec<usize>,
}

/// A free-form curve in parameter space (`curv2`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve2D {
    pub attributes: ElementAttributes,
    pub free_form: FreeFormAttributes,
    /// Absolute 1-based parameter space vertex indices
    pub parameter_space_vertices: Vec<usize>,
}

/// A free-form surface (`surf`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Surface {
    pub attributes: ElementAttributes,
    pub free_form: FreeFormAttributes,
    pub start_parameter_u: f32,
    pub end_parameter_u: f32,
    pub start_parameter_v: f32,
    pub end_parameter_v: f32,
    pub vertices: Vec<Triplet>,
}

/// Connectivity between two surfaces along trimming curves (`con`)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceConnection {
    /// Absolute 1-based surface index
    pub surface_1: usize,
    pub curve_1: CurveIndex,
    /// Absolute 1-based surface index
    pub surface_2: usize,
    pub curve_2: CurveIndex,
}

/// Access to the attributes every element carries
pub trait Element {
    fn attributes(&self) -> &ElementAttributes;
    fn attributes_mut(&mut self) -> &mut ElementAttributes;
}

/// Access to free-form attributes and body data
pub trait FreeFormElement: Element {
    fn free_form(&self) -> &FreeFormAttributes;
    fn free_form_mut(&mut self) -> &mut FreeFormAttributes;
}

impl Element for PolygonalElement {
    fn attributes(&self) -> &ElementAttributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut ElementAttributes {
        &mut self.attributes
    }
}

macro_rules! impl_free_form_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                fn attributes(&self) -> &ElementAttributes {
                    &self.attributes
                }

                fn attributes_mut(&mut self) -> &mut ElementAttributes {
                    &mut self.attributes
                }
            }

            impl FreeFormElement for $ty {
                fn free_form(&self) -> &FreeFormAttributes {
                    &self.free_form
                }

                fn free_form_mut(&mut self) -> &mut FreeFormAttributes {
                    &mut self.free_form
                }
            }
        )*
    };
}

impl_free_form_element!(Curve, Curve2D, Surface);
