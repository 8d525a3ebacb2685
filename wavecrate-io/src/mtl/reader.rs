//! MTL statement parser

use crate::lines::{LineReader, Statement};
use crate::mtl::map::parse_map;
use crate::options::MtlReadOptions;
use crate::DocumentReader;
use std::io::BufRead;
use wavecrate_core::{Material, MaterialColor, MaterialMap, MtlDocument, Result, Vector3f};

/// MTL document reader
pub struct MtlReader;

impl DocumentReader for MtlReader {
    type Document = MtlDocument;
    type Options = MtlReadOptions;

    fn read_from<R: BufRead>(reader: R, options: &MtlReadOptions) -> Result<MtlDocument> {
        let mut lines = LineReader::new(reader);
        let mut parser = MtlStatementParser::new(options);

        while let Some(statement) = lines.next_statement()? {
            parser.handle(&statement)?;
        }

        let mut document = parser.finish();
        document.header_text = lines.header_text();

        log::debug!("read MTL document: {} materials", document.materials.len());
        Ok(document)
    }
}

/// Applies MTL statements to a document under construction
pub struct MtlStatementParser<'a> {
    options: &'a MtlReadOptions,
    document: MtlDocument,
}

impl<'a> MtlStatementParser<'a> {
    pub fn new(options: &'a MtlReadOptions) -> Self {
        Self {
            options,
            document: MtlDocument::new(),
        }
    }

    pub fn document(&self) -> &MtlDocument {
        &self.document
    }

    pub fn finish(self) -> MtlDocument {
        self.document
    }

    pub fn handle(&mut self, stmt: &Statement) -> Result<()> {
        log::trace!("line {}: {}", stmt.line_number(), stmt.text());

        match stmt.keyword() {
            "newmtl" => {
                stmt.expect_min_len(2)?;
                self.document.materials.push(Material::new(stmt.joined_from(1)));
                Ok(())
            }

            "ka" | "kd" | "ke" | "ks" | "tf" => {
                let color = parse_color(stmt)?;
                let material = self.current(stmt)?;
                let slot = match stmt.keyword() {
                    "ka" => &mut material.ambient_color,
                    "kd" => &mut material.diffuse_color,
                    "ke" => &mut material.emissive_color,
                    "ks" => &mut material.specular_color,
                    _ => &mut material.transmission_color,
                };
                *slot = Some(color);
                Ok(())
            }

            "illum" => {
                stmt.expect_len(2, 2)?;
                let model = stmt.parse_i32(1)?;
                self.current(stmt)?.illumination_model = Some(model);
                Ok(())
            }
            "d" => self.parse_dissolve(stmt),
            "ns" => {
                stmt.expect_len(2, 2)?;
                let exponent = stmt.parse_f32(1)?;
                self.current(stmt)?.specular_exponent = Some(exponent);
                Ok(())
            }
            "sharpness" => {
                stmt.expect_len(2, 2)?;
                let sharpness = stmt.parse_i32(1)?;
                self.current(stmt)?.sharpness = Some(sharpness);
                Ok(())
            }
            "ni" => {
                stmt.expect_len(2, 2)?;
                let density = stmt.parse_f32(1)?;
                self.current(stmt)?.optical_density = Some(density);
                Ok(())
            }
            "map_aat" => {
                stmt.expect_len(2, 2)?;
                let enabled = stmt.parse_switch(1)?;
                self.current(stmt)?.is_anti_aliasing_enabled = enabled;
                Ok(())
            }

            "pr" | "pm" | "ps" | "pc" | "pcr" | "aniso" | "anisor" => {
                stmt.expect_len(2, 2)?;
                let value = stmt.parse_f32(1)?;
                let material = self.current(stmt)?;
                let slot = match stmt.keyword() {
                    "pr" => &mut material.roughness,
                    "pm" => &mut material.metallic,
                    "ps" => &mut material.sheen,
                    "pc" => &mut material.clear_coat_thickness,
                    "pcr" => &mut material.clear_coat_roughness,
                    "aniso" => &mut material.anisotropy,
                    _ => &mut material.anisotropy_rotation,
                };
                *slot = Some(value);
                Ok(())
            }

            "refl" => self.parse_reflection_map(stmt),

            keyword => match map_slot(keyword) {
                Some(slot) => self.parse_map_statement(stmt, slot),
                None => {
                    log::debug!(
                        "line {}: ignoring unknown statement '{}'",
                        stmt.line_number(),
                        stmt.token(0)
                    );
                    Ok(())
                }
            },
        }
    }

    /// The material that the statement applies to
    fn current(&mut self, stmt: &Statement) -> Result<&mut Material> {
        self.document
            .materials
            .last_mut()
            .ok_or_else(|| stmt.malformed("material name is not specified"))
    }

    fn parse_dissolve(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 3)?;

        let is_halo = stmt.len() == 3;
        if is_halo && !stmt.token(1).eq_ignore_ascii_case("-halo") {
            return Err(stmt.malformed(format!("unknown option '{}'", stmt.token(1))));
        }
        let factor = stmt.parse_f32(stmt.len() - 1)?;

        let material = self.current(stmt)?;
        material.dissolve = Some(factor);
        material.is_halo_dissolve = is_halo;
        Ok(())
    }

    fn parse_map_statement(&mut self, stmt: &Statement, slot: MapSlot) -> Result<()> {
        let parsed = parse_map(stmt, 1, self.options.keep_whitespace_in_map_file_names)?;
        if parsed.reflection_kind.is_some() {
            log::debug!("line {}: '-type' only applies to refl, ignoring", stmt.line_number());
        }

        let material = self.current(stmt)?;
        *slot.get_mut(material) = Some(parsed.map);
        Ok(())
    }

    fn parse_reflection_map(&mut self, stmt: &Statement) -> Result<()> {
        let parsed = parse_map(stmt, 1, self.options.keep_whitespace_in_map_file_names)?;
        let kind = parsed
            .reflection_kind
            .ok_or_else(|| stmt.malformed("reflection map type is not specified"))?;

        self.current(stmt)?.reflection_map.set(kind, parsed.map);
        Ok(())
    }
}

/// Parse the `spectral`, `xyz` or RGB form of a color statement
fn parse_color(stmt: &Statement) -> Result<MaterialColor> {
    stmt.expect_min_len(2)?;

    match stmt.token(1).to_ascii_lowercase().as_str() {
        "spectral" => {
            stmt.expect_len(3, 4)?;
            let factor = if stmt.len() == 4 { stmt.parse_f32(3)? } else { 1.0 };
            Ok(MaterialColor::spectral(stmt.token(2), factor))
        }
        "xyz" => {
            if stmt.len() != 3 && stmt.len() != 5 {
                return Err(stmt.malformed("expected 1 or 3 color values"));
            }
            Ok(MaterialColor::Xyz(parse_components(stmt, 2)?))
        }
        _ => {
            if stmt.len() != 2 && stmt.len() != 4 {
                return Err(stmt.malformed("expected 1 or 3 color values"));
            }
            Ok(MaterialColor::Rgb(parse_components(stmt, 1)?))
        }
    }
}

/// Parse one value broadcast to all components, or three components
fn parse_components(stmt: &Statement, start: usize) -> Result<Vector3f> {
    let x = stmt.parse_f32(start)?;
    if stmt.len() == start + 1 {
        Ok(Vector3f::new(x, x, x))
    } else {
        Ok(Vector3f::new(x, stmt.parse_f32(start + 1)?, stmt.parse_f32(start + 2)?))
    }
}

/// Texture map fields addressed by statement keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapSlot {
    Ambient,
    Diffuse,
    Emissive,
    Specular,
    SpecularExponent,
    Dissolve,
    Decal,
    Displacement,
    Bump,
    Normal,
    Roughness,
    Metallic,
    Sheen,
}

impl MapSlot {
    /// Writing order
    pub const ALL: [MapSlot; 13] = [
        MapSlot::Ambient,
        MapSlot::Diffuse,
        MapSlot::Emissive,
        MapSlot::Specular,
        MapSlot::SpecularExponent,
        MapSlot::Dissolve,
        MapSlot::Decal,
        MapSlot::Displacement,
        MapSlot::Bump,
        MapSlot::Normal,
        MapSlot::Roughness,
        MapSlot::Metallic,
        MapSlot::Sheen,
    ];

    /// Keyword used when writing
    pub fn keyword(&self) -> &'static str {
        match self {
            MapSlot::Ambient => "map_Ka",
            MapSlot::Diffuse => "map_Kd",
            MapSlot::Emissive => "map_Ke",
            MapSlot::Specular => "map_Ks",
            MapSlot::SpecularExponent => "map_Ns",
            MapSlot::Dissolve => "map_d",
            MapSlot::Decal => "decal",
            MapSlot::Displacement => "disp",
            MapSlot::Bump => "bump",
            MapSlot::Normal => "norm",
            MapSlot::Roughness => "map_Pr",
            MapSlot::Metallic => "map_Pm",
            MapSlot::Sheen => "map_Ps",
        }
    }

    /// Roughness, metallic and sheen maps from the PBR extension
    pub fn is_physically_based(&self) -> bool {
        matches!(self, MapSlot::Roughness | MapSlot::Metallic | MapSlot::Sheen)
    }

    pub fn get(self, material: &Material) -> Option<&MaterialMap> {
        match self {
            MapSlot::Ambient => material.ambient_map.as_ref(),
            MapSlot::Diffuse => material.diffuse_map.as_ref(),
            MapSlot::Emissive => material.emissive_map.as_ref(),
            MapSlot::Specular => material.specular_map.as_ref(),
            MapSlot::SpecularExponent => material.specular_exponent_map.as_ref(),
            MapSlot::Dissolve => material.dissolve_map.as_ref(),
            MapSlot::Decal => material.decal_map.as_ref(),
            MapSlot::Displacement => material.displacement_map.as_ref(),
            MapSlot::Bump => material.bump_map.as_ref(),
            MapSlot::Normal => material.normal_map.as_ref(),
            MapSlot::Roughness => material.roughness_map.as_ref(),
            MapSlot::Metallic => material.metallic_map.as_ref(),
            MapSlot::Sheen => material.sheen_map.as_ref(),
        }
    }

    fn get_mut(self, material: &mut Material) -> &mut Option<MaterialMap> {
        match self {
            MapSlot::Ambient => &mut material.ambient_map,
            MapSlot::Diffuse => &mut material.diffuse_map,
            MapSlot::Emissive => &mut material.emissive_map,
            MapSlot::Specular => &mut material.specular_map,
            MapSlot::SpecularExponent => &mut material.specular_exponent_map,
            MapSlot::Dissolve => &mut material.dissolve_map,
            MapSlot::Decal => &mut material.decal_map,
            MapSlot::Displacement => &mut material.displacement_map,
            MapSlot::Bump => &mut material.bump_map,
            MapSlot::Normal => &mut material.normal_map,
            MapSlot::Roughness => &mut material.roughness_map,
            MapSlot::Metallic => &mut material.metallic_map,
            MapSlot::Sheen => &mut material.sheen_map,
        }
    }
}

/// Map slot for a lower-cased statement keyword
fn map_slot(keyword: &str) -> Option<MapSlot> {
    match keyword {
        "map_ka" => Some(MapSlot::Ambient),
        "map_kd" => Some(MapSlot::Diffuse),
        "map_ke" => Some(MapSlot::Emissive),
        "map_ks" => Some(MapSlot::Specular),
        "map_ns" => Some(MapSlot::SpecularExponent),
        "map_d" => Some(MapSlot::Dissolve),
        "decal" => Some(MapSlot::Decal),
        "disp" => Some(MapSlot::Displacement),
        "bump" | "map_bump" => Some(MapSlot::Bump),
        "norm" => Some(MapSlot::Normal),
        "map_pr" => Some(MapSlot::Roughness),
        "map_pm" => Some(MapSlot::Metallic),
        "map_ps" => Some(MapSlot::Sheen),
        _ => None,
    }
}
