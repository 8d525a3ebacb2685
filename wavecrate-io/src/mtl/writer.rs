//! MTL document writer

use crate::format::{Components, Float};
use crate::mtl::map::format_map;
use crate::mtl::reader::MapSlot;
use crate::DocumentWriter;
use std::io::Write;
use wavecrate_core::{Material, MaterialColor, MtlDocument, ReflectionKind, Result};

/// MTL document writer
pub struct MtlWriter;

impl DocumentWriter for MtlWriter {
    type Document = MtlDocument;

    fn write_to<W: Write>(document: &MtlDocument, mut writer: W) -> Result<()> {
        if !document.header_text.is_empty() {
            for line in document.header_text.split('\n') {
                writeln!(writer, "#{}", line)?;
            }
        }

        for (i, material) in document.materials.iter().enumerate() {
            if i > 0 {
                writeln!(writer)?;
            }
            write_material(&mut writer, material)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn write_material<W: Write>(writer: &mut W, material: &Material) -> Result<()> {
    writeln!(writer, "newmtl {}", material.name)?;

    for (keyword, color) in [
        ("Ka", &material.ambient_color),
        ("Kd", &material.diffuse_color),
        ("Ke", &material.emissive_color),
        ("Ks", &material.specular_color),
        ("Tf", &material.transmission_color),
    ] {
        if let Some(color) = color {
            writeln!(writer, "{} {}", keyword, format_color(color))?;
        }
    }

    if let Some(model) = material.illumination_model {
        writeln!(writer, "illum {}", model)?;
    }
    if let Some(dissolve) = material.dissolve {
        let halo = if material.is_halo_dissolve { "-halo " } else { "" };
        writeln!(writer, "d {}{}", halo, Float(dissolve))?;
    }
    if let Some(exponent) = material.specular_exponent {
        writeln!(writer, "Ns {}", Float(exponent))?;
    }
    if let Some(sharpness) = material.sharpness {
        writeln!(writer, "sharpness {}", sharpness)?;
    }
    if let Some(density) = material.optical_density {
        writeln!(writer, "Ni {}", Float(density))?;
    }
    if material.is_anti_aliasing_enabled {
        writeln!(writer, "map_aat on")?;
    }

    for slot in MapSlot::ALL.iter().filter(|s| !s.is_physically_based()) {
        if let Some(map) = slot.get(material) {
            writeln!(writer, "{} {}", slot.keyword(), format_map(map, None))?;
        }
    }
    for kind in ReflectionKind::ALL {
        if let Some(map) = material.reflection_map.get(kind) {
            writeln!(writer, "refl {}", format_map(map, Some(kind)))?;
        }
    }

    for (keyword, value) in [
        ("Pr", material.roughness),
        ("Pm", material.metallic),
        ("Ps", material.sheen),
        ("Pc", material.clear_coat_thickness),
        ("Pcr", material.clear_coat_roughness),
        ("aniso", material.anisotropy),
        ("anisor", material.anisotropy_rotation),
    ] {
        if let Some(value) = value {
            writeln!(writer, "{} {}", keyword, Float(value))?;
        }
    }
    for slot in MapSlot::ALL.iter().filter(|s| s.is_physically_based()) {
        if let Some(map) = slot.get(material) {
            writeln!(writer, "{} {}", slot.keyword(), format_map(map, None))?;
        }
    }

    Ok(())
}

fn format_color(color: &MaterialColor) -> String {
    match color {
        MaterialColor::Rgb(rgb) => Components(*rgb).to_string(),
        MaterialColor::Xyz(xyz) => format!("xyz {}", Components(*xyz)),
        MaterialColor::Spectral { file_name, factor } => {
            format!("spectral {} {}", file_name, Float(*factor))
        }
    }
}
