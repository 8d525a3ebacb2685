//! OBJ statement parser

use crate::lines::{LineReader, Statement};
use crate::obj::context::{CurrentFreeForm, ObjParseContext};
use crate::options::ObjReadOptions;
use crate::technique::{parse_technique, TechniqueTarget};
use crate::DocumentReader;
use std::io::BufRead;
use std::path::Path;
use wavecrate_core::{
    resolve_index, resolve_optional_index, Curve, Curve2D, CurveIndex, ElementKind, FreeFormType,
    ObjDocument, PolygonalElement, Result, Surface, SurfaceConnection, Triplet, Vector3f, Vector4f,
    Vertex,
};

/// OBJ document reader
pub struct ObjReader;

impl DocumentReader for ObjReader {
    type Document = ObjDocument;
    type Options = ObjReadOptions;

    fn read_from<R: BufRead>(reader: R, options: &ObjReadOptions) -> Result<ObjDocument> {
        let mut lines = LineReader::new(reader);
        let mut parser = ObjStatementParser::new(options);

        while let Some(statement) = lines.next_statement()? {
            parser.handle(&statement)?;
        }

        let mut document = parser.finish();
        document.header_text = lines.header_text();

        log::debug!(
            "read OBJ document: {} vertices, {} faces, {} groups",
            document.vertices.len(),
            document.faces.len(),
            document.groups.len()
        );
        Ok(document)
    }
}

/// Applies statements one at a time to a document under construction
pub struct ObjStatementParser<'a> {
    options: &'a ObjReadOptions,
    document: ObjDocument,
    context: ObjParseContext,
}

impl<'a> ObjStatementParser<'a> {
    pub fn new(options: &'a ObjReadOptions) -> Self {
        Self {
            options,
            document: ObjDocument::new(),
            context: ObjParseContext::new(),
        }
    }

    /// The document built so far
    pub fn document(&self) -> &ObjDocument {
        &self.document
    }

    /// The attribute state that the next element would be created with
    pub fn context(&self) -> &ObjParseContext {
        &self.context
    }

    pub fn finish(self) -> ObjDocument {
        self.document
    }

    /// Dispatch one statement
    pub fn handle(&mut self, stmt: &Statement) -> Result<()> {
        log::trace!("line {}: {}", stmt.line_number(), stmt.text());

        match stmt.keyword() {
            "v" => self.parse_vertex(stmt),
            "vp" => self.parse_parameter_space_vertex(stmt),
            "vn" => self.parse_vertex_normal(stmt),
            "vt" => self.parse_texture_vertex(stmt),

            "p" => self.parse_polygonal(stmt, ElementKind::Point, 2),
            "l" => self.parse_polygonal(stmt, ElementKind::Line, 3),
            "f" | "fo" => self.parse_polygonal(stmt, ElementKind::Face, 4),

            "curv" => self.parse_curve(stmt),
            "curv2" => self.parse_curve_2d(stmt),
            "surf" => self.parse_surface(stmt),

            "parm" => self.parse_parameters(stmt),
            "trim" | "hole" | "scrv" => self.parse_curve_indices(stmt),
            "sp" => self.parse_special_points(stmt),
            "end" => {
                self.context.set_current_free_form(None);
                Ok(())
            }

            "con" => self.parse_connection(stmt),

            "g" => self.parse_group(stmt),
            "s" => self.parse_smoothing_group(stmt),
            "mg" => self.parse_merging_group(stmt),
            "o" => self.parse_object_name(stmt),

            "bevel" | "c_interp" | "d_interp" => self.parse_interpolation(stmt),
            "lod" => {
                stmt.expect_len(2, 2)?;
                self.context.attributes.level_of_detail = stmt.parse_i32(1)?;
                Ok(())
            }

            "maplib" | "mtllib" => self.parse_libraries(stmt),
            "usemap" | "usemtl" => self.parse_use_name(stmt),
            "shadow_obj" | "trace_obj" => self.parse_object_file(stmt),

            "cstype" => self.parse_free_form_type(stmt),
            "deg" => self.parse_degree(stmt),
            "bmat" => self.parse_basis_matrix(stmt),
            "step" => self.parse_step(stmt),
            "ctech" => {
                let technique = parse_technique(stmt, TechniqueTarget::Curve)?;
                self.context.free_form.curve_technique = Some(technique);
                Ok(())
            }
            "stech" => {
                let technique = parse_technique(stmt, TechniqueTarget::Surface)?;
                self.context.free_form.surface_technique = Some(technique);
                Ok(())
            }

            "bsp" | "bzp" | "cdc" | "cdp" | "res" => Err(stmt.unsupported()),

            _ => {
                log::debug!(
                    "line {}: ignoring unknown statement '{}'",
                    stmt.line_number(),
                    stmt.token(0)
                );
                Ok(())
            }
        }
    }

    fn parse_vertex(&mut self, stmt: &Statement) -> Result<()> {
        let len = stmt.len();
        if !matches!(len, 4 | 5 | 7 | 8) {
            return Err(stmt.malformed(format!("expected 3, 4, 6 or 7 values, found {}", len - 1)));
        }

        let x = stmt.parse_f32(1)?;
        let y = stmt.parse_f32(2)?;
        let z = stmt.parse_f32(3)?;

        let vertex = match len {
            5 => Vertex::with_weight(x, y, z, stmt.parse_f32(4)?),
            7 | 8 => {
                let alpha = if len == 8 { stmt.parse_f32(7)? } else { 1.0 };
                Vertex::new(x, y, z).with_color(Vector4f::new(
                    stmt.parse_f32(4)?,
                    stmt.parse_f32(5)?,
                    stmt.parse_f32(6)?,
                    alpha,
                ))
            }
            _ => Vertex::new(x, y, z),
        };

        self.document.vertices.push(vertex);
        Ok(())
    }

    fn parse_parameter_space_vertex(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 4)?;

        let x = stmt.parse_f32(1)?;
        let vertex = match stmt.len() {
            2 => Vector3f::new(x, 0.0, 1.0),
            3 => Vector3f::new(x, stmt.parse_f32(2)?, 1.0),
            _ => Vector3f::new(x, stmt.parse_f32(2)?, stmt.parse_f32(3)?),
        };

        self.document.parameter_space_vertices.push(vertex);
        Ok(())
    }

    fn parse_vertex_normal(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(4, 4)?;
        let normal = Vector3f::new(stmt.parse_f32(1)?, stmt.parse_f32(2)?, stmt.parse_f32(3)?);
        self.document.vertex_normals.push(normal);
        Ok(())
    }

    fn parse_texture_vertex(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 4)?;

        let x = stmt.parse_f32(1)?;
        let y = if stmt.len() > 2 { stmt.parse_f32(2)? } else { 0.0 };
        let z = if stmt.len() > 3 { stmt.parse_f32(3)? } else { 0.0 };

        self.document.texture_vertices.push(Vector3f::new(x, y, z));
        Ok(())
    }

    /// Parse a `v[/vt][/vn]` reference
    fn parse_triplet(&self, stmt: &Statement, index: usize) -> Result<Triplet> {
        let token = stmt.token(index);
        let parts: Vec<&str> = token.split('/').collect();
        if parts.len() > 3 {
            return Err(stmt.malformed(format!("invalid vertex reference '{}'", token)));
        }

        let parse_part = |part: &str| -> Result<i64> {
            if part.is_empty() {
                Ok(0)
            } else {
                part.parse::<i64>()
                    .map_err(|_| stmt.malformed(format!("invalid vertex reference '{}'", token)))
            }
        };

        let vertex = parse_part(parts[0])?;
        if vertex == 0 {
            return Err(stmt.malformed(format!("vertex reference '{}' has no vertex index", token)));
        }
        let vertex = resolve_index(vertex, self.document.vertices.len())
            .map_err(|e| stmt.dangling(e, "vertices"))?;

        let texture = match parts.get(1) {
            Some(part) => {
                let count = self.document.texture_vertices.len();
                resolve_optional_index(parse_part(part)?, count)
                    .map_err(|e| stmt.dangling(e, "texture vertices"))?
            }
            None => 0,
        };

        let normal = match parts.get(2) {
            Some(part) => {
                let count = self.document.vertex_normals.len();
                resolve_optional_index(parse_part(part)?, count)
                    .map_err(|e| stmt.dangling(e, "vertex normals"))?
            }
            None => 0,
        };

        Ok(Triplet::new(vertex, texture, normal))
    }

    fn parse_triplets_from(&self, stmt: &Statement, start: usize) -> Result<Vec<Triplet>> {
        (start..stmt.len()).map(|i| self.parse_triplet(stmt, i)).collect()
    }

    /// Resolve a required index token against a collection of `count` entries
    fn resolve(
        &self,
        stmt: &Statement,
        index: usize,
        count: usize,
        target: &'static str,
    ) -> Result<usize> {
        let raw = stmt.parse_index(index)?;
        resolve_index(raw, count).map_err(|e| stmt.dangling(e, target))
    }

    fn parse_polygonal(
        &mut self,
        stmt: &Statement,
        kind: ElementKind,
        min_len: usize,
    ) -> Result<()> {
        stmt.expect_min_len(min_len)?;

        let element = PolygonalElement {
            attributes: self.context.attributes.clone(),
            polygonal: self.context.polygonal,
            vertices: self.parse_triplets_from(stmt, 1)?,
        };

        let list = match kind {
            ElementKind::Point => &mut self.document.points,
            ElementKind::Line => &mut self.document.lines,
            _ => &mut self.document.faces,
        };
        list.push(element);
        let index = list.len() - 1;

        self.context.add_to_groups(&mut self.document, kind, index);
        Ok(())
    }

    fn parse_curve(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(5)?;

        let vertex_count = self.document.vertices.len();
        let vertices = (3..stmt.len())
            .map(|i| self.resolve(stmt, i, vertex_count, "vertices"))
            .collect::<Result<Vec<_>>>()?;

        let curve = Curve {
            attributes: self.context.attributes.clone(),
            free_form: self.context.free_form_snapshot(),
            start_parameter: stmt.parse_f32(1)?,
            end_parameter: stmt.parse_f32(2)?,
            vertices,
        };

        self.document.curves.push(curve);
        let index = self.document.curves.len() - 1;
        self.context.add_to_groups(&mut self.document, ElementKind::Curve, index);
        self.context.set_current_free_form(Some(CurrentFreeForm::Curve(index)));
        Ok(())
    }

    fn parse_curve_2d(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(3)?;

        let count = self.document.parameter_space_vertices.len();
        let parameter_space_vertices = (1..stmt.len())
            .map(|i| self.resolve(stmt, i, count, "parameter space vertices"))
            .collect::<Result<Vec<_>>>()?;

        let curve = Curve2D {
            attributes: self.context.attributes.clone(),
            free_form: self.context.free_form_snapshot(),
            parameter_space_vertices,
        };

        self.document.curves_2d.push(curve);
        let index = self.document.curves_2d.len() - 1;
        self.context.add_to_groups(&mut self.document, ElementKind::Curve2D, index);
        self.context.set_current_free_form(Some(CurrentFreeForm::Curve2D(index)));
        Ok(())
    }

    fn parse_surface(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(6)?;

        let surface = Surface {
            attributes: self.context.attributes.clone(),
            free_form: self.context.free_form_snapshot(),
            start_parameter_u: stmt.parse_f32(1)?,
            end_parameter_u: stmt.parse_f32(2)?,
            start_parameter_v: stmt.parse_f32(3)?,
            end_parameter_v: stmt.parse_f32(4)?,
            vertices: self.parse_triplets_from(stmt, 5)?,
        };

        self.document.surfaces.push(surface);
        let index = self.document.surfaces.len() - 1;
        self.context.add_to_groups(&mut self.document, ElementKind::Surface, index);
        self.context.set_current_free_form(Some(CurrentFreeForm::Surface(index)));
        Ok(())
    }

    fn parse_parameters(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(4)?;
        let is_u = stmt.parse_direction(1)?;
        let values = stmt.parse_floats_from(2)?;

        if let Some(body) = self.context.current_body(&mut self.document) {
            if is_u {
                body.parameters_u.extend(values);
            } else {
                body.parameters_v.extend(values);
            }
        }
        Ok(())
    }

    fn parse_curve_indices(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(4)?;
        if (stmt.len() - 1) % 3 != 0 {
            return Err(stmt.malformed("expected (start, end, curve) triples"));
        }

        let count = self.document.curves_2d.len();
        let mut curves = Vec::with_capacity((stmt.len() - 1) / 3);
        for i in (1..stmt.len()).step_by(3) {
            curves.push(CurveIndex::new(
                stmt.parse_f32(i)?,
                stmt.parse_f32(i + 1)?,
                self.resolve(stmt, i + 2, count, "2D curves")?,
            ));
        }

        let keyword = stmt.keyword();
        if let Some(body) = self.context.current_body(&mut self.document) {
            let target = match keyword {
                "trim" => &mut body.outer_trimming_curves,
                "hole" => &mut body.inner_trimming_curves,
                _ => &mut body.sequence_curves,
            };
            target.extend(curves);
        }
        Ok(())
    }

    fn parse_special_points(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(2)?;

        let count = self.document.parameter_space_vertices.len();
        let points = (1..stmt.len())
            .map(|i| self.resolve(stmt, i, count, "parameter space vertices"))
            .collect::<Result<Vec<_>>>()?;

        if let Some(body) = self.context.current_body(&mut self.document) {
            body.special_points.extend(points);
        }
        Ok(())
    }

    fn parse_connection(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(9, 9)?;

        let surfaces = self.document.surfaces.len();
        let curves = self.document.curves_2d.len();

        let connection = SurfaceConnection {
            surface_1: self.resolve(stmt, 1, surfaces, "surfaces")?,
            curve_1: CurveIndex::new(
                stmt.parse_f32(2)?,
                stmt.parse_f32(3)?,
                self.resolve(stmt, 4, curves, "2D curves")?,
            ),
            surface_2: self.resolve(stmt, 5, surfaces, "surfaces")?,
            curve_2: CurveIndex::new(
                stmt.parse_f32(6)?,
                stmt.parse_f32(7)?,
                self.resolve(stmt, 8, curves, "2D curves")?,
            ),
        };

        self.document.surface_connections.push(connection);
        Ok(())
    }

    fn parse_group(&mut self, stmt: &Statement) -> Result<()> {
        let names: Vec<String> = if self.options.single_group_name_per_line {
            if stmt.len() > 1 {
                vec![stmt.joined_from(1)]
            } else {
                Vec::new()
            }
        } else {
            stmt.tokens_from(1).map(str::to_string).collect()
        };

        self.context
            .set_groups(&mut self.document, &names, self.options.new_group_per_statement);
        Ok(())
    }

    fn parse_smoothing_group(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 2)?;
        self.context.polygonal.smoothing_group = if stmt.token(1).eq_ignore_ascii_case("off") {
            0
        } else {
            stmt.parse_i32(1)?
        };
        Ok(())
    }

    fn parse_merging_group(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 3)?;

        let number = if stmt.token(1).eq_ignore_ascii_case("off") {
            0
        } else {
            stmt.parse_i32(1)?
        };

        if number != 0 {
            if stmt.len() != 3 {
                return Err(stmt.malformed("merging group requires a resolution"));
            }
            let resolution = stmt.parse_f32(2)?;
            self.document.merging_group_resolutions.insert(number, resolution);
        }

        self.context.free_form.merging_group = number;
        Ok(())
    }

    fn parse_object_name(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(1, 2)?;

        if self.options.handle_object_names_as_group {
            let names: Vec<&str> = stmt.tokens_from(1).collect();
            self.context
                .set_groups(&mut self.document, &names, self.options.new_group_per_statement);
        } else {
            self.context.attributes.object_name = stmt.tokens_from(1).next().map(str::to_string);
        }
        Ok(())
    }

    fn parse_interpolation(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 2)?;
        let enabled = stmt.parse_switch(1)?;

        let polygonal = &mut self.context.polygonal;
        match stmt.keyword() {
            "bevel" => polygonal.bevel_interpolation = enabled,
            "c_interp" => polygonal.color_interpolation = enabled,
            _ => polygonal.dissolve_interpolation = enabled,
        }
        Ok(())
    }

    fn parse_libraries(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(2)?;

        let is_material = stmt.keyword() == "mtllib";
        let names = if is_material && self.options.keep_whitespace_in_library_names {
            split_file_names(stmt)?
        } else {
            let names: Vec<String> = stmt.tokens_from(1).map(str::to_string).collect();
            if let Some(name) = names.iter().find(|n| !has_extension(n)) {
                return Err(stmt.malformed(format!("file name '{}' has no extension", name)));
            }
            names
        };

        if is_material {
            self.document.material_libraries.extend(names);
        } else {
            self.document.map_libraries.extend(names);
        }
        Ok(())
    }

    fn parse_use_name(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 2)?;

        let name = stmt.token(1);
        let value = if name.eq_ignore_ascii_case("off") {
            None
        } else {
            Some(name.to_string())
        };

        if stmt.keyword() == "usemap" {
            self.context.attributes.map_name = value;
        } else {
            self.context.attributes.material_name = value;
        }
        Ok(())
    }

    fn parse_object_file(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 2)?;

        let name = stmt.token(1);
        if !has_extension(name) {
            return Err(stmt.malformed(format!("file name '{}' has no extension", name)));
        }

        if stmt.keyword() == "shadow_obj" {
            self.document.shadow_object_file_name = Some(name.to_string());
        } else {
            self.document.trace_object_file_name = Some(name.to_string());
        }
        Ok(())
    }

    fn parse_free_form_type(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 3)?;

        let is_rational = if stmt.len() == 3 {
            if !stmt.token(1).eq_ignore_ascii_case("rat") {
                return Err(stmt.malformed(format!("expected 'rat', found '{}'", stmt.token(1))));
            }
            true
        } else {
            false
        };

        let type_token = stmt.token(stmt.len() - 1);
        let free_form_type = FreeFormType::from_keyword(type_token).ok_or_else(|| {
            stmt.malformed(format!("unknown curve or surface type '{}'", type_token))
        })?;

        self.context.free_form.free_form_type = free_form_type;
        self.context.free_form.is_rational = is_rational;
        Ok(())
    }

    fn parse_degree(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 3)?;
        self.context.free_form.degree_u = stmt.parse_i32(1)?;
        self.context.free_form.degree_v = if stmt.len() == 3 { stmt.parse_i32(2)? } else { 0 };
        Ok(())
    }

    fn parse_basis_matrix(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_min_len(3)?;
        let is_u = stmt.parse_direction(1)?;

        let free_form = &self.context.free_form;
        let (degree_u, degree_v) = (free_form.degree_u, free_form.degree_v);
        if degree_u < 0 || degree_v < 0 {
            return Err(stmt.malformed(format!("invalid degree {} {}", degree_u, degree_v)));
        }
        let expected = (i64::from(degree_u) + 1) * (i64::from(degree_v) + 1);
        if i64::try_from(stmt.len() - 2) != Ok(expected) {
            return Err(stmt.malformed(format!(
                "expected {} matrix values, found {}",
                expected,
                stmt.len() - 2
            )));
        }

        let matrix = stmt.parse_floats_from(2)?;
        if is_u {
            self.context.free_form.basis_matrix_u = Some(matrix);
        } else {
            self.context.free_form.basis_matrix_v = Some(matrix);
        }
        Ok(())
    }

    fn parse_step(&mut self, stmt: &Statement) -> Result<()> {
        stmt.expect_len(2, 3)?;
        self.context.free_form.step_u = stmt.parse_i32(1)?;
        self.context.free_form.step_v = if stmt.len() == 3 { stmt.parse_i32(2)? } else { 1 };
        Ok(())
    }
}

fn has_extension(name: &str) -> bool {
    Path::new(name).extension().is_some()
}

/// Split a library statement into file names, keeping spaces inside names.
///
/// Tokens accumulate, with their original spacing, until the accumulated text
/// ends in a file extension.
fn split_file_names(stmt: &Statement) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut start = None;

    for i in 1..stmt.len() {
        let from = *start.get_or_insert(i);
        if has_extension(stmt.token(i)) {
            let rest = stmt.remainder(from);
            let end = rest.len() - stmt.remainder(i).len() + stmt.token(i).len();
            names.push(rest[..end].to_string());
            start = None;
        }
    }

    if let Some(from) = start {
        return Err(stmt.malformed(format!(
            "file name '{}' has no extension",
            stmt.remainder(from)
        )));
    }
    Ok(names)
}
