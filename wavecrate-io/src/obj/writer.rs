//! OBJ document writer
//!
//! Attribute statements are written only when they differ from the value the
//! previous element was written with, so a document read from a typical
//! exporter comes back out with the same grouping structure.

use crate::format::{Components, Float, Floats, TripletText};
use crate::technique::{format_technique, TechniqueTarget};
use crate::DocumentWriter;
use std::io::Write;
use wavecrate_core::{
    ApproximationTechnique, CurveIndex, Element, ElementAttributes, ElementKind, FreeFormAttributes,
    FreeFormElement, FreeFormType, ObjDocument, PolygonalAttributes, Result, Triplet, Vertex,
};

/// OBJ document writer
pub struct ObjWriter;

impl DocumentWriter for ObjWriter {
    type Document = ObjDocument;

    fn write_to<W: Write>(document: &ObjDocument, writer: W) -> Result<()> {
        let mut state = ObjWriteState::new(document, writer);
        state.write_document()?;
        state.writer.flush()?;
        Ok(())
    }
}

/// Free-form settings as last written, body data excluded
#[derive(Debug, Clone, PartialEq)]
struct FreeFormSettings {
    merging_group: i32,
    free_form_type: FreeFormType,
    is_rational: bool,
    degree: (i32, i32),
    basis_matrix_u: Option<Vec<f32>>,
    basis_matrix_v: Option<Vec<f32>>,
    step: (i32, i32),
    curve_technique: Option<ApproximationTechnique>,
    surface_technique: Option<ApproximationTechnique>,
}

impl From<&FreeFormAttributes> for FreeFormSettings {
    fn from(free_form: &FreeFormAttributes) -> Self {
        Self {
            merging_group: free_form.merging_group,
            free_form_type: free_form.free_form_type,
            is_rational: free_form.is_rational,
            degree: (free_form.degree_u, free_form.degree_v),
            basis_matrix_u: free_form.basis_matrix_u.clone(),
            basis_matrix_v: free_form.basis_matrix_v.clone(),
            step: (free_form.step_u, free_form.step_v),
            curve_technique: free_form.curve_technique,
            surface_technique: free_form.surface_technique,
        }
    }
}

/// Attribute values as last written
#[derive(Debug, Clone)]
struct WriterContext {
    groups: String,
    attributes: ElementAttributes,
    polygonal: PolygonalAttributes,
    free_form: FreeFormSettings,
}

impl WriterContext {
    fn new() -> Self {
        Self {
            groups: "default".to_string(),
            attributes: ElementAttributes::default(),
            polygonal: PolygonalAttributes::default(),
            free_form: FreeFormSettings::from(&FreeFormAttributes::default()),
        }
    }
}

struct ObjWriteState<'a, W: Write> {
    document: &'a ObjDocument,
    writer: W,
    context: WriterContext,
    /// Named groups listing each element, indexed by kind then element
    memberships: Vec<Vec<Vec<&'a str>>>,
}

impl<'a, W: Write> ObjWriteState<'a, W> {
    fn new(document: &'a ObjDocument, writer: W) -> Self {
        let mut memberships: Vec<Vec<Vec<&str>>> = ElementKind::ALL
            .iter()
            .map(|kind| vec![Vec::new(); document.element_count(*kind)])
            .collect();

        for group in &document.groups {
            let Some(name) = group.name.as_deref() else {
                continue;
            };
            for (slot, kind) in ElementKind::ALL.iter().enumerate() {
                for &index in group.members(*kind) {
                    if let Some(names) = memberships[slot].get_mut(index) {
                        if !names.contains(&name) {
                            names.push(name);
                        }
                    }
                }
            }
        }

        Self {
            document,
            writer,
            context: WriterContext::new(),
            memberships,
        }
    }

    fn write_document(&mut self) -> Result<()> {
        let doc = self.document;

        self.write_header()?;
        self.write_file_references()?;

        for vertex in &doc.vertices {
            self.write_vertex(vertex)?;
        }
        for vertex in &doc.parameter_space_vertices {
            let mut line = format!("vp {}", Float(vertex.x));
            if vertex.y != 0.0 || vertex.z != 1.0 {
                line.push_str(&format!(" {}", Float(vertex.y)));
            }
            if vertex.z != 1.0 {
                line.push_str(&format!(" {}", Float(vertex.z)));
            }
            writeln!(self.writer, "{}", line)?;
        }
        for normal in &doc.vertex_normals {
            writeln!(self.writer, "vn {}", Components(*normal))?;
        }
        for texture in &doc.texture_vertices {
            let mut line = format!("vt {}", Float(texture.x));
            if texture.y != 0.0 || texture.z != 0.0 {
                line.push_str(&format!(" {}", Float(texture.y)));
            }
            if texture.z != 0.0 {
                line.push_str(&format!(" {}", Float(texture.z)));
            }
            writeln!(self.writer, "{}", line)?;
        }

        self.write_group_declarations()?;
        self.write_merging_group_declarations()?;

        for (kind, keyword, elements) in [
            (ElementKind::Point, "p", &doc.points),
            (ElementKind::Line, "l", &doc.lines),
            (ElementKind::Face, "f", &doc.faces),
        ] {
            for (index, element) in elements.iter().enumerate() {
                self.write_element_attributes(kind, index, element.attributes())?;
                self.write_polygonal_attributes(&element.polygonal)?;
                writeln!(self.writer, "{} {}", keyword, triplets(&element.vertices))?;
            }
        }

        for (index, curve) in doc.curves.iter().enumerate() {
            let line = format!(
                "curv {} {} {}",
                Float(curve.start_parameter),
                Float(curve.end_parameter),
                indices(&curve.vertices)
            );
            self.write_free_form_element(ElementKind::Curve, index, curve, &line)?;
        }

        for (index, curve) in doc.curves_2d.iter().enumerate() {
            let line = format!("curv2 {}", indices(&curve.parameter_space_vertices));
            self.write_free_form_element(ElementKind::Curve2D, index, curve, &line)?;
        }

        for (index, surface) in doc.surfaces.iter().enumerate() {
            let line = format!(
                "surf {} {} {} {} {}",
                Float(surface.start_parameter_u),
                Float(surface.end_parameter_u),
                Float(surface.start_parameter_v),
                Float(surface.end_parameter_v),
                triplets(&surface.vertices)
            );
            self.write_free_form_element(ElementKind::Surface, index, surface, &line)?;
        }

        for connection in &doc.surface_connections {
            writeln!(
                self.writer,
                "con {} {} {} {}",
                connection.surface_1,
                curve_index(&connection.curve_1),
                connection.surface_2,
                curve_index(&connection.curve_2)
            )?;
        }

        Ok(())
    }

    /// Attribute changes, the declaring line, then the body block
    fn write_free_form_element<E: FreeFormElement>(
        &mut self,
        kind: ElementKind,
        index: usize,
        element: &E,
        line: &str,
    ) -> Result<()> {
        self.write_element_attributes(kind, index, element.attributes())?;
        self.write_free_form_attributes(element.free_form())?;
        writeln!(self.writer, "{}", line)?;
        self.write_free_form_body(element.free_form())
    }

    /// Declare every named group up front when element order alone would not
    /// recreate the group list, either because the first use order differs
    /// or because some groups have no members.
    fn write_group_declarations(&mut self) -> Result<()> {
        let groups = &self.document.groups;
        let mut first_use: Vec<&str> = Vec::new();
        for names in self.memberships.iter().flatten() {
            for &name in names {
                if !first_use.contains(&name) {
                    first_use.push(name);
                }
            }
        }

        let in_order = first_use.len() == groups.len()
            && groups
                .iter()
                .zip(&first_use)
                .all(|(group, name)| group.name.as_deref() == Some(*name));
        if in_order {
            return Ok(());
        }

        for name in groups.iter().filter_map(|g| g.name.as_deref()) {
            writeln!(self.writer, "g {}", name)?;
            self.context.groups = name.to_string();
        }
        Ok(())
    }

    /// Write merging group resolutions that no free-form element refers to
    fn write_merging_group_declarations(&mut self) -> Result<()> {
        let doc = self.document;
        let referenced = |number: i32| {
            doc.curves.iter().any(|c| c.free_form.merging_group == number)
                || doc.curves_2d.iter().any(|c| c.free_form.merging_group == number)
                || doc.surfaces.iter().any(|s| s.free_form.merging_group == number)
        };

        let mut declared = false;
        for (&number, &resolution) in &doc.merging_group_resolutions {
            if number != 0 && !referenced(number) {
                writeln!(self.writer, "mg {} {}", number, Float(resolution))?;
                declared = true;
            }
        }
        if declared {
            writeln!(self.writer, "mg off")?;
        }
        Ok(())
    }

    fn write_header(&mut self) -> Result<()> {
        if self.document.header_text.is_empty() {
            return Ok(());
        }
        for line in self.document.header_text.split('\n') {
            writeln!(self.writer, "#{}", line)?;
        }
        Ok(())
    }

    fn write_file_references(&mut self) -> Result<()> {
        let doc = self.document;

        if let Some(name) = &doc.shadow_object_file_name {
            writeln!(self.writer, "shadow_obj {}", name)?;
        }
        if let Some(name) = &doc.trace_object_file_name {
            writeln!(self.writer, "trace_obj {}", name)?;
        }
        if !doc.material_libraries.is_empty() {
            writeln!(self.writer, "mtllib {}", doc.material_libraries.join(" "))?;
        }
        if !doc.map_libraries.is_empty() {
            writeln!(self.writer, "maplib {}", doc.map_libraries.join(" "))?;
        }
        Ok(())
    }

    fn write_vertex(&mut self, vertex: &Vertex) -> Result<()> {
        let p = vertex.position;
        write!(self.writer, "v {} {} {}", Float(p.x), Float(p.y), Float(p.z))?;

        match vertex.color {
            Some(color) => {
                write!(self.writer, " {} {} {}", Float(color.x), Float(color.y), Float(color.z))?;
                if color.w != 1.0 {
                    write!(self.writer, " {}", Float(color.w))?;
                }
            }
            None => {
                if p.w != 1.0 {
                    write!(self.writer, " {}", Float(p.w))?;
                }
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn write_element_attributes(
        &mut self,
        kind: ElementKind,
        index: usize,
        attributes: &ElementAttributes,
    ) -> Result<()> {
        let slot = ElementKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
        let names = &self.memberships[slot][index];
        let groups = if names.is_empty() {
            "default".to_string()
        } else {
            names.join(" ")
        };

        if groups != self.context.groups {
            writeln!(self.writer, "g {}", groups)?;
            self.context.groups = groups;
        }

        let last = &self.context.attributes;
        if attributes.object_name != last.object_name {
            match &attributes.object_name {
                Some(name) => writeln!(self.writer, "o {}", name)?,
                None => writeln!(self.writer, "o")?,
            }
        }
        if attributes.level_of_detail != last.level_of_detail {
            writeln!(self.writer, "lod {}", attributes.level_of_detail)?;
        }
        if attributes.map_name != last.map_name {
            writeln!(self.writer, "usemap {}", attributes.map_name.as_deref().unwrap_or("off"))?;
        }
        if attributes.material_name != last.material_name {
            let material = attributes.material_name.as_deref().unwrap_or("off");
            writeln!(self.writer, "usemtl {}", material)?;
        }

        self.context.attributes = attributes.clone();
        Ok(())
    }

    fn write_polygonal_attributes(&mut self, polygonal: &PolygonalAttributes) -> Result<()> {
        let last = self.context.polygonal;

        if polygonal.smoothing_group != last.smoothing_group {
            if polygonal.smoothing_group == 0 {
                writeln!(self.writer, "s off")?;
            } else {
                writeln!(self.writer, "s {}", polygonal.smoothing_group)?;
            }
        }
        if polygonal.bevel_interpolation != last.bevel_interpolation {
            writeln!(self.writer, "bevel {}", switch(polygonal.bevel_interpolation))?;
        }
        if polygonal.color_interpolation != last.color_interpolation {
            writeln!(self.writer, "c_interp {}", switch(polygonal.color_interpolation))?;
        }
        if polygonal.dissolve_interpolation != last.dissolve_interpolation {
            writeln!(self.writer, "d_interp {}", switch(polygonal.dissolve_interpolation))?;
        }

        self.context.polygonal = *polygonal;
        Ok(())
    }

    fn write_free_form_attributes(&mut self, free_form: &FreeFormAttributes) -> Result<()> {
        let current = FreeFormSettings::from(free_form);
        let last = &self.context.free_form;

        if current.merging_group != last.merging_group {
            if current.merging_group == 0 {
                writeln!(self.writer, "mg off")?;
            } else {
                let resolution = self
                    .document
                    .merging_group_resolutions
                    .get(&current.merging_group)
                    .copied()
                    .unwrap_or(0.0);
                writeln!(self.writer, "mg {} {}", current.merging_group, Float(resolution))?;
            }
        }

        if current.free_form_type != last.free_form_type
            || current.is_rational != last.is_rational
        {
            let rational = if current.is_rational { "rat " } else { "" };
            writeln!(self.writer, "cstype {}{}", rational, current.free_form_type.keyword())?;
        }

        // A basis matrix keeps the size of the degree it was read under, so
        // the degree is resized around it when the two no longer agree.
        let mut degree = last.degree;
        if current.degree != degree {
            write_degree(&mut self.writer, current.degree)?;
            degree = current.degree;
        }
        for (direction, matrix, previous) in [
            ("u", &current.basis_matrix_u, &last.basis_matrix_u),
            ("v", &current.basis_matrix_v, &last.basis_matrix_v),
        ] {
            if matrix == previous {
                continue;
            }
            let Some(matrix) = matrix else {
                continue;
            };
            if matrix_size(degree) != Some(matrix.len()) {
                degree = (matrix.len() as i32 - 1, 0);
                write_degree(&mut self.writer, degree)?;
            }
            writeln!(self.writer, "bmat {} {}", direction, Floats(matrix))?;
        }
        if degree != current.degree {
            write_degree(&mut self.writer, current.degree)?;
        }

        if current.step != last.step {
            let (u, v) = current.step;
            if v == 1 {
                writeln!(self.writer, "step {}", u)?;
            } else {
                writeln!(self.writer, "step {} {}", u, v)?;
            }
        }

        if current.curve_technique != last.curve_technique {
            if let Some(technique) = &current.curve_technique {
                writeln!(self.writer, "{}", format_technique(technique, TechniqueTarget::Curve))?;
            }
        }
        if current.surface_technique != last.surface_technique {
            if let Some(technique) = &current.surface_technique {
                writeln!(self.writer, "{}", format_technique(technique, TechniqueTarget::Surface))?;
            }
        }

        self.context.free_form = current;
        Ok(())
    }

    fn write_free_form_body(&mut self, free_form: &FreeFormAttributes) -> Result<()> {
        if !free_form.has_body() {
            return Ok(());
        }

        if !free_form.parameters_u.is_empty() {
            writeln!(self.writer, "parm u {}", Floats(&free_form.parameters_u))?;
        }
        if !free_form.parameters_v.is_empty() {
            writeln!(self.writer, "parm v {}", Floats(&free_form.parameters_v))?;
        }
        for (keyword, curves) in [
            ("trim", &free_form.outer_trimming_curves),
            ("hole", &free_form.inner_trimming_curves),
            ("scrv", &free_form.sequence_curves),
        ] {
            if !curves.is_empty() {
                let list: Vec<String> = curves.iter().map(curve_index).collect();
                writeln!(self.writer, "{} {}", keyword, list.join(" "))?;
            }
        }
        if !free_form.special_points.is_empty() {
            writeln!(self.writer, "sp {}", indices(&free_form.special_points))?;
        }

        writeln!(self.writer, "end")?;
        Ok(())
    }
}

fn write_degree<W: Write>(writer: &mut W, (u, v): (i32, i32)) -> Result<()> {
    if v == 0 {
        writeln!(writer, "deg {}", u)?;
    } else {
        writeln!(writer, "deg {} {}", u, v)?;
    }
    Ok(())
}

/// Number of basis matrix values a degree pair calls for
fn matrix_size((u, v): (i32, i32)) -> Option<usize> {
    let size = (i64::from(u) + 1).checked_mul(i64::from(v) + 1)?;
    usize::try_from(size).ok()
}

fn switch(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}

fn triplets(vertices: &[Triplet]) -> String {
    vertices
        .iter()
        .map(|t| TripletText(*t).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn indices(values: &[usize]) -> String {
    values.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(" ")
}

fn curve_index(curve: &CurveIndex) -> String {
    format!("{} {} {}", Float(curve.start), Float(curve.end), curve.curve_2d)
}
