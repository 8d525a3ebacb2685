//! MTL material library structures
//!
//! This module provides the in-memory form of an MTL file:
//! - Colors in RGB, CIE XYZ or spectral-curve form
//! - Texture maps with their option flags
//! - Reflection maps (sphere or cube faces)
//! - The physically based rendering extension (roughness, metallic, sheen, ...)

use crate::vertex::Vector3f;
use serde::{Deserialize, Serialize};

/// A material color. Exactly one representation is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaterialColor {
    Rgb(Vector3f),
    Xyz(Vector3f),
    /// Reference to an `.rfl` spectral curve file scaled by `factor`
    Spectral { file_name: String, factor: f32 },
}

impl MaterialColor {
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        MaterialColor::Rgb(Vector3f::new(r, g, b))
    }

    pub fn xyz(x: f32, y: f32, z: f32) -> Self {
        MaterialColor::Xyz(Vector3f::new(x, y, z))
    }

    pub fn spectral<S: Into<String>>(file_name: S, factor: f32) -> Self {
        MaterialColor::Spectral {
            file_name: file_name.into(),
            factor,
        }
    }

    pub fn is_rgb(&self) -> bool {
        matches!(self, MaterialColor::Rgb(_))
    }

    pub fn is_xyz(&self) -> bool {
        matches!(self, MaterialColor::Xyz(_))
    }

    pub fn is_spectral(&self) -> bool {
        matches!(self, MaterialColor::Spectral { .. })
    }

    /// The color components for the RGB and XYZ forms
    pub fn color(&self) -> Option<Vector3f> {
        match self {
            MaterialColor::Rgb(c) | MaterialColor::Xyz(c) => Some(*c),
            MaterialColor::Spectral { .. } => None,
        }
    }
}

/// Channel of a texture used for scalar or bump textures (`-imfchan`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarChannel {
    Red,
    Green,
    Blue,
    Matte,
    Luminance,
    Depth,
}

impl ScalarChannel {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "r" => Some(ScalarChannel::Red),
            "g" => Some(ScalarChannel::Green),
            "b" => Some(ScalarChannel::Blue),
            "m" => Some(ScalarChannel::Matte),
            "l" => Some(ScalarChannel::Luminance),
            "z" => Some(ScalarChannel::Depth),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ScalarChannel::Red => "r",
            ScalarChannel::Green => "g",
            ScalarChannel::Blue => "b",
            ScalarChannel::Matte => "m",
            ScalarChannel::Luminance => "l",
            ScalarChannel::Depth => "z",
        }
    }
}

/// A texture map reference and its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialMap {
    pub file_name: String,
    /// `-blenu`, on by default
    pub horizontal_blending: bool,
    /// `-blenv`, on by default
    pub vertical_blending: bool,
    /// `-cc`
    pub color_correction: bool,
    /// `-clamp`
    pub clamping: bool,
    /// `-bm`
    pub bump_multiplier: f32,
    /// `-boost`
    pub boost: Option<f32>,
    /// `-imfchan`
    pub scalar_channel: Option<ScalarChannel>,
    /// `-mm` base
    pub modifier_base: f32,
    /// `-mm` gain
    pub modifier_gain: f32,
    /// `-o`
    pub offset: Vector3f,
    /// `-s`
    pub scale: Vector3f,
    /// `-t`
    pub turbulence: Vector3f,
    /// `-texres`
    pub texture_resolution: Option<i32>,
}

impl MaterialMap {
    /// Create a map with default options
    pub fn new<S: Into<String>>(file_name: S) -> Self {
        Self {
            file_name: file_name.into(),
            horizontal_blending: true,
            vertical_blending: true,
            color_correction: false,
            clamping: false,
            bump_multiplier: 1.0,
            boost: None,
            scalar_channel: None,
            modifier_base: 0.0,
            modifier_gain: 1.0,
            offset: Vector3f::zeros(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
            turbulence: Vector3f::zeros(),
            texture_resolution: None,
        }
    }
}

impl Default for MaterialMap {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Slot of a reflection map (`refl -type <kind>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReflectionKind {
    Sphere,
    CubeTop,
    CubeBottom,
    CubeFront,
    CubeBack,
    CubeLeft,
    CubeRight,
}

impl ReflectionKind {
    /// All slots in writing order
    pub const ALL: [ReflectionKind; 7] = [
        ReflectionKind::Sphere,
        ReflectionKind::CubeTop,
        ReflectionKind::CubeBottom,
        ReflectionKind::CubeFront,
        ReflectionKind::CubeBack,
        ReflectionKind::CubeLeft,
        ReflectionKind::CubeRight,
    ];

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "sphere" => Some(ReflectionKind::Sphere),
            "cube_top" => Some(ReflectionKind::CubeTop),
            "cube_bottom" => Some(ReflectionKind::CubeBottom),
            "cube_front" => Some(ReflectionKind::CubeFront),
            "cube_back" => Some(ReflectionKind::CubeBack),
            "cube_left" => Some(ReflectionKind::CubeLeft),
            "cube_right" => Some(ReflectionKind::CubeRight),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            ReflectionKind::Sphere => "sphere",
            ReflectionKind::CubeTop => "cube_top",
            ReflectionKind::CubeBottom => "cube_bottom",
            ReflectionKind::CubeFront => "cube_front",
            ReflectionKind::CubeBack => "cube_back",
            ReflectionKind::CubeLeft => "cube_left",
            ReflectionKind::CubeRight => "cube_right",
        }
    }
}

/// Sphere and cube reflection maps of a material
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReflectionMap {
    pub sphere: Option<MaterialMap>,
    pub cube_top: Option<MaterialMap>,
    pub cube_bottom: Option<MaterialMap>,
    pub cube_front: Option<MaterialMap>,
    pub cube_back: Option<MaterialMap>,
    pub cube_left: Option<MaterialMap>,
    pub cube_right: Option<MaterialMap>,
}

impl ReflectionMap {
    pub fn get(&self, kind: ReflectionKind) -> Option<&MaterialMap> {
        match kind {
            ReflectionKind::Sphere => self.sphere.as_ref(),
            ReflectionKind::CubeTop => self.cube_top.as_ref(),
            ReflectionKind::CubeBottom => self.cube_bottom.as_ref(),
            ReflectionKind::CubeFront => self.cube_front.as_ref(),
            ReflectionKind::CubeBack => self.cube_back.as_ref(),
            ReflectionKind::CubeLeft => self.cube_left.as_ref(),
            ReflectionKind::CubeRight => self.cube_right.as_ref(),
        }
    }

    pub fn set(&mut self, kind: ReflectionKind, map: MaterialMap) {
        let slot = match kind {
            ReflectionKind::Sphere => &mut self.sphere,
            ReflectionKind::CubeTop => &mut self.cube_top,
            ReflectionKind::CubeBottom => &mut self.cube_bottom,
            ReflectionKind::CubeFront => &mut self.cube_front,
            ReflectionKind::CubeBack => &mut self.cube_back,
            ReflectionKind::CubeLeft => &mut self.cube_left,
            ReflectionKind::CubeRight => &mut self.cube_right,
        };
        *slot = Some(map);
    }
}

/// A named material (`newmtl`)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Material {
    pub name: String,

    pub ambient_color: Option<MaterialColor>,
    pub diffuse_color: Option<MaterialColor>,
    pub emissive_color: Option<MaterialColor>,
    pub specular_color: Option<MaterialColor>,
    pub transmission_color: Option<MaterialColor>,

    pub illumination_model: Option<i32>,
    pub dissolve: Option<f32>,
    pub is_halo_dissolve: bool,
    pub specular_exponent: Option<f32>,
    pub sharpness: Option<i32>,
    pub optical_density: Option<f32>,
    pub is_anti_aliasing_enabled: bool,

    pub ambient_map: Option<MaterialMap>,
    pub diffuse_map: Option<MaterialMap>,
    pub emissive_map: Option<MaterialMap>,
    pub specular_map: Option<MaterialMap>,
    pub specular_exponent_map: Option<MaterialMap>,
    pub dissolve_map: Option<MaterialMap>,
    pub decal_map: Option<MaterialMap>,
    pub displacement_map: Option<MaterialMap>,
    pub bump_map: Option<MaterialMap>,
    pub normal_map: Option<MaterialMap>,
    pub reflection_map: ReflectionMap,

    // Physically based rendering extension
    pub roughness: Option<f32>,
    pub metallic: Option<f32>,
    pub sheen: Option<f32>,
    pub clear_coat_thickness: Option<f32>,
    pub clear_coat_roughness: Option<f32>,
    pub anisotropy: Option<f32>,
    pub anisotropy_rotation: Option<f32>,
    pub roughness_map: Option<MaterialMap>,
    pub metallic_map: Option<MaterialMap>,
    pub sheen_map: Option<MaterialMap>,
}

impl Material {
    /// Create a material with no properties set
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// An in-memory MTL file
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MtlDocument {
    /// Leading comment block, one entry per line joined with `\n`
    pub header_text: String,
    pub materials: Vec<Material>,
}

impl MtlDocument {
    /// Create a new empty material library
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the first material with the given name
    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Get the number of materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_forms_are_exclusive() {
        let rgb = MaterialColor::rgb(0.5, 0.5, 0.5);
        assert!(rgb.is_rgb());
        assert!(!rgb.is_xyz());
        assert!(!rgb.is_spectral());
        assert_eq!(rgb.color(), Some(Vector3f::new(0.5, 0.5, 0.5)));

        let spectral = MaterialColor::spectral("ident.rfl", 1.0);
        assert!(spectral.is_spectral());
        assert_eq!(spectral.color(), None);
    }

    #[test]
    fn test_map_defaults() {
        let map = MaterialMap::new("wood.png");
        assert!(map.horizontal_blending);
        assert!(map.vertical_blending);
        assert!(!map.clamping);
        assert_eq!(map.bump_multiplier, 1.0);
        assert_eq!(map.scale, Vector3f::new(1.0, 1.0, 1.0));
        assert_eq!(map.modifier_gain, 1.0);
    }

    #[test]
    fn test_reflection_slots() {
        let mut refl = ReflectionMap::default();
        refl.set(ReflectionKind::CubeLeft, MaterialMap::new("left.png"));
        assert_eq!(
            refl.get(ReflectionKind::CubeLeft).map(|m| m.file_name.as_str()),
            Some("left.png")
        );
        assert!(refl.get(ReflectionKind::Sphere).is_none());

        for kind in ReflectionKind::ALL {
            assert_eq!(ReflectionKind::from_keyword(kind.keyword()), Some(kind));
        }
    }

    #[test]
    fn test_material_lookup() {
        let mut doc = MtlDocument::new();
        doc.materials.push(Material::new("red"));
        doc.materials.push(Material::new("blue"));
        assert_eq!(doc.len(), 2);
        assert!(doc.material("blue").is_some());
        assert!(doc.material("green").is_none());
    }
}
