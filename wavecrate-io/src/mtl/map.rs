//! Texture map statements and their option grammar
//!
//! A map statement is a list of `-option values` pairs followed by the file
//! name, e.g. `map_Kd -clamp on -s 2 2 1 textures/wood.png`. The first token
//! that is not a recognized option starts the file name, which runs to the end
//! of the statement.

use crate::format::{Components, Float};
use crate::lines::Statement;
use wavecrate_core::{MaterialMap, ReflectionKind, Result, ScalarChannel, Vector3f};

/// A parsed map statement
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMap {
    pub map: MaterialMap,
    /// Reflection slot selected with `-type`
    pub reflection_kind: Option<ReflectionKind>,
}

/// Parse the options and file name of a map statement starting at token `start`
pub fn parse_map(stmt: &Statement, start: usize, keep_whitespace: bool) -> Result<ParsedMap> {
    let mut map = MaterialMap::default();
    let mut reflection_kind = None;
    let mut i = start;

    while i < stmt.len() {
        let option = stmt.token(i).to_ascii_lowercase();
        let arity = match option.as_str() {
            "-blenu" | "-blenv" | "-cc" | "-clamp" | "-bm" | "-boost" | "-texres" | "-imfchan"
            | "-type" => 1,
            "-mm" => 2,
            "-o" | "-s" | "-t" => 1,
            _ => break,
        };
        if i + arity >= stmt.len() {
            return Err(stmt.malformed(format!("missing value for option '{}'", stmt.token(i))));
        }

        match option.as_str() {
            "-blenu" => map.horizontal_blending = stmt.parse_switch(i + 1)?,
            "-blenv" => map.vertical_blending = stmt.parse_switch(i + 1)?,
            "-cc" => map.color_correction = stmt.parse_switch(i + 1)?,
            "-clamp" => map.clamping = stmt.parse_switch(i + 1)?,
            "-bm" => map.bump_multiplier = stmt.parse_f32(i + 1)?,
            "-boost" => map.boost = Some(stmt.parse_f32(i + 1)?),
            "-texres" => map.texture_resolution = Some(stmt.parse_i32(i + 1)?),
            "-imfchan" => {
                let token = stmt.token(i + 1);
                map.scalar_channel = Some(
                    ScalarChannel::from_keyword(token)
                        .ok_or_else(|| stmt.malformed(format!("unknown channel '{}'", token)))?,
                );
            }
            "-type" => {
                let token = stmt.token(i + 1);
                let kind = ReflectionKind::from_keyword(token)
                    .ok_or_else(|| stmt.malformed(format!("unknown reflection type '{}'", token)))?;
                reflection_kind = Some(kind);
            }
            "-mm" => {
                map.modifier_base = stmt.parse_f32(i + 1)?;
                map.modifier_gain = stmt.parse_f32(i + 2)?;
            }
            _ => {
                let default = if option == "-s" { 1.0 } else { 0.0 };
                let (vector, consumed) = parse_vector(stmt, i + 1, default)?;
                match option.as_str() {
                    "-o" => map.offset = vector,
                    "-s" => map.scale = vector,
                    _ => map.turbulence = vector,
                }
                i += 1 + consumed;
                continue;
            }
        }

        i += 1 + arity;
    }

    if i >= stmt.len() {
        return Err(stmt.malformed("missing file name"));
    }

    map.file_name = if keep_whitespace {
        stmt.remainder(i).to_string()
    } else {
        stmt.joined_from(i)
    };

    Ok(ParsedMap { map, reflection_kind })
}

/// Parse one to three floats. The last token of the statement is never taken
/// since it has to hold the file name.
fn parse_vector(stmt: &Statement, start: usize, default: f32) -> Result<(Vector3f, usize)> {
    let mut values = [stmt.parse_f32(start)?, default, default];
    let mut consumed = 1;

    while consumed < 3 && start + consumed + 1 < stmt.len() {
        match stmt.token(start + consumed).parse::<f32>() {
            Ok(value) => {
                values[consumed] = value;
                consumed += 1;
            }
            Err(_) => break,
        }
    }

    Ok((Vector3f::new(values[0], values[1], values[2]), consumed))
}

/// Format the options that differ from their defaults, followed by the file name
pub fn format_map(map: &MaterialMap, reflection_kind: Option<ReflectionKind>) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(kind) = reflection_kind {
        parts.push(format!("-type {}", kind.keyword()));
    }
    if !map.horizontal_blending {
        parts.push("-blenu off".to_string());
    }
    if !map.vertical_blending {
        parts.push("-blenv off".to_string());
    }
    if map.color_correction {
        parts.push("-cc on".to_string());
    }
    if map.clamping {
        parts.push("-clamp on".to_string());
    }
    if map.bump_multiplier != 1.0 {
        parts.push(format!("-bm {}", Float(map.bump_multiplier)));
    }
    if let Some(boost) = map.boost {
        parts.push(format!("-boost {}", Float(boost)));
    }
    if map.modifier_base != 0.0 || map.modifier_gain != 1.0 {
        parts.push(format!("-mm {} {}", Float(map.modifier_base), Float(map.modifier_gain)));
    }
    if map.offset != Vector3f::zeros() {
        parts.push(format!("-o {}", Components(map.offset)));
    }
    if map.scale != Vector3f::new(1.0, 1.0, 1.0) {
        parts.push(format!("-s {}", Components(map.scale)));
    }
    if map.turbulence != Vector3f::zeros() {
        parts.push(format!("-t {}", Components(map.turbulence)));
    }
    if let Some(resolution) = map.texture_resolution {
        parts.push(format!("-texres {}", resolution));
    }
    if let Some(channel) = map.scalar_channel {
        parts.push(format!("-imfchan {}", channel.keyword()));
    }

    parts.push(map.file_name.clone());
    parts.join(" ")
}
