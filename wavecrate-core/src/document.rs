//! OBJ document structure

use crate::element::{Curve, Curve2D, Face, Line, Point, Surface, SurfaceConnection};
use crate::group::{ElementKind, Group};
use crate::vertex::{Vector3f, Vertex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An in-memory OBJ file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjDocument {
    /// Leading comment block, one entry per line joined with `\n`
    pub header_text: String,

    pub vertices: Vec<Vertex>,
    pub parameter_space_vertices: Vec<Vector3f>,
    pub vertex_normals: Vec<Vector3f>,
    pub texture_vertices: Vec<Vector3f>,

    pub points: Vec<Point>,
    pub lines: Vec<Line>,
    pub faces: Vec<Face>,
    pub curves: Vec<Curve>,
    pub curves_2d: Vec<Curve2D>,
    pub surfaces: Vec<Surface>,
    pub surface_connections: Vec<SurfaceConnection>,

    pub default_group: Group,
    pub groups: Vec<Group>,

    /// Merging group number to merge resolution
    pub merging_group_resolutions: BTreeMap<i32, f32>,

    pub map_libraries: Vec<String>,
    pub material_libraries: Vec<String>,
    pub shadow_object_file_name: Option<String>,
    pub trace_object_file_name: Option<String>,
}

impl ObjDocument {
    /// Create a new empty document
    pub fn new() -> Self {
        Self {
            header_text: String::new(),
            vertices: Vec::new(),
            parameter_space_vertices: Vec::new(),
            vertex_normals: Vec::new(),
            texture_vertices: Vec::new(),
            points: Vec::new(),
            lines: Vec::new(),
            faces: Vec::new(),
            curves: Vec::new(),
            curves_2d: Vec::new(),
            surfaces: Vec::new(),
            surface_connections: Vec::new(),
            default_group: Group::default_group(),
            groups: Vec::new(),
            merging_group_resolutions: BTreeMap::new(),
            map_libraries: Vec::new(),
            material_libraries: Vec::new(),
            shadow_object_file_name: None,
            trace_object_file_name: None,
        }
    }

    /// Number of elements of the given kind
    pub fn element_count(&self, kind: ElementKind) -> usize {
        match kind {
            ElementKind::Point => self.points.len(),
            ElementKind::Line => self.lines.len(),
            ElementKind::Face => self.faces.len(),
            ElementKind::Curve => self.curves.len(),
            ElementKind::Curve2D => self.curves_2d.len(),
            ElementKind::Surface => self.surfaces.len(),
        }
    }

    /// Find the first named group with the given name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name.as_deref() == Some(name))
    }

    /// Find the first named group with the given name, mutably
    pub fn group_mut(&mut self, name: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.name.as_deref() == Some(name))
    }

    /// Names of the named groups that list the given element, in group order
    pub fn group_names_of(&self, kind: ElementKind, index: usize) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.contains(kind, index))
            .filter_map(|g| g.name.as_deref())
            .collect()
    }

    /// Append a vertex and return its 1-based index
    pub fn add_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len()
    }

    /// Append a face to the document and the default group, returning its position
    pub fn add_face(&mut self, face: Face) -> usize {
        let index = self.faces.len();
        self.faces.push(face);
        self.default_group.push(ElementKind::Face, index);
        index
    }

    /// Check if the document holds no geometry at all
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
            && self.parameter_space_vertices.is_empty()
            && self.vertex_normals.is_empty()
            && self.texture_vertices.is_empty()
            && ElementKind::ALL.iter().all(|kind| self.element_count(*kind) == 0)
            && self.surface_connections.is_empty()
    }
}

impl Default for ObjDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vertex::Triplet;

    #[test]
    fn test_empty_document() {
        let doc = ObjDocument::new();
        assert!(doc.is_empty());
        assert!(doc.default_group.name.is_none());
        assert_eq!(doc.element_count(ElementKind::Face), 0);
    }

    #[test]
    fn test_programmatic_construction() {
        let mut doc = ObjDocument::new();
        let a = doc.add_vertex(Vertex::new(0.0, 0.0, 0.0));
        let b = doc.add_vertex(Vertex::new(1.0, 0.0, 0.0));
        let c = doc.add_vertex(Vertex::new(0.0, 1.0, 0.0));
        assert_eq!((a, b, c), (1, 2, 3));

        let triangle = vec![Triplet::vertex(a), Triplet::vertex(b), Triplet::vertex(c)];
        let index = doc.add_face(Face::new(triangle));
        assert_eq!(index, 0);
        assert!(doc.default_group.contains(ElementKind::Face, 0));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_group_lookup() {
        let mut doc = ObjDocument::new();
        doc.groups.push(Group::new("body"));
        doc.groups.push(Group::new("glass"));
        doc.group_mut("body").unwrap().push(ElementKind::Face, 0);
        doc.group_mut("glass").unwrap().push(ElementKind::Face, 0);

        assert_eq!(doc.group_names_of(ElementKind::Face, 0), vec!["body", "glass"]);
        assert!(doc.group_names_of(ElementKind::Face, 1).is_empty());
        assert!(doc.group("missing").is_none());
    }
}
