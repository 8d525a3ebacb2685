//! Whole-document OBJ reading tests

use crate::{DocumentReader, DocumentWriter, ObjReadOptions, ObjReader, ObjWriter};
use approx::assert_relative_eq;
use wavecrate_core::{
    ApproximationTechnique, CurveIndex, ElementKind, Error, FreeFormType, ObjDocument, Result,
    Triplet, Vector3f,
};

fn read(text: &str) -> Result<ObjDocument> {
    ObjReader::read_str(text, &ObjReadOptions::default())
}

fn read_with(text: &str, options: ObjReadOptions) -> Result<ObjDocument> {
    ObjReader::read_str(text, &options)
}

const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\n";

#[test]
fn test_face_triplets() {
    let doc = read(&format!("{}f 1 2 3\n", TRIANGLE)).unwrap();

    assert_eq!(doc.faces.len(), 1);
    assert_eq!(
        doc.faces[0].vertices,
        vec![Triplet::new(1, 0, 0), Triplet::new(2, 0, 0), Triplet::new(3, 0, 0)]
    );
    assert!(doc.default_group.contains(ElementKind::Face, 0));
}

#[test]
fn test_face_needs_three_vertices() {
    let err = read(&format!("{}f 1 2\n", TRIANGLE)).unwrap_err();
    assert!(matches!(err, Error::MalformedStatement { line: 4, .. }));
    assert_eq!(err.keyword(), Some("f"));
}

#[test]
fn test_negative_indices_are_relative() {
    let doc = read("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0 0 1\nf -1 -2 -3\n").unwrap();
    let vertices: Vec<usize> = doc.faces[0].vertices.iter().map(|t| t.vertex).collect();
    assert_eq!(vertices, vec![5, 4, 3]);
}

#[test]
fn test_dangling_vertex_index() {
    let err = read(&format!("{}f 99 1 2\n", TRIANGLE)).unwrap_err();
    match err {
        Error::DanglingReference { line, keyword, index, count, .. } => {
            assert_eq!(line, 4);
            assert_eq!(keyword, "f");
            assert_eq!(index, 99);
            assert_eq!(count, 3);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_forward_references_are_rejected() {
    assert!(read("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 1 1 0\n").is_err());
    assert!(read(&format!("{}vt 0 0\nf 1/2 2/1 3/1\n", TRIANGLE)).is_err());
    assert!(read(&format!("{}f 1//1 2//1 3//1\n", TRIANGLE)).is_err());
}

#[test]
fn test_texture_and_normal_references() {
    let text = format!("{}vt 0 0\nvt 1 0\nvn 0 0 1\nf 1/1/1 2/-1/-1 3//1\n", TRIANGLE);
    let doc = read(&text).unwrap();
    assert_eq!(
        doc.faces[0].vertices,
        vec![Triplet::new(1, 1, 1), Triplet::new(2, 2, 1), Triplet::new(3, 0, 1)]
    );
}

#[test]
fn test_malformed_triplets() {
    assert!(read(&format!("{}f 0 1 2\n", TRIANGLE)).is_err());
    assert!(read(&format!("{}f 1/1/1/1 2 3\n", TRIANGLE)).is_err());
    assert!(read(&format!("{}f 1 two 3\n", TRIANGLE)).is_err());
}

#[test]
fn test_points_and_lines() {
    let doc = read(&format!("{}p 1 2 3\nl 1 2\nfo 1 2 3\n", TRIANGLE)).unwrap();
    assert_eq!(doc.points[0].vertices.len(), 3);
    assert_eq!(doc.lines[0].vertices.len(), 2);
    assert_eq!(doc.faces.len(), 1);

    assert!(read(&format!("{}p\n", TRIANGLE)).is_err());
    assert!(read(&format!("{}l 1\n", TRIANGLE)).is_err());
}

#[test]
fn test_group_switching() {
    let doc = read(&format!("{}g alpha\nf 1 2 3\ng default\nf 1 2 3\n", TRIANGLE)).unwrap();

    let alpha = doc.group("alpha").unwrap();
    assert_eq!(alpha.faces, vec![0]);
    assert_eq!(doc.default_group.faces, vec![1]);
    assert_eq!(doc.group_names_of(ElementKind::Face, 0), vec!["alpha"]);
    assert!(doc.group_names_of(ElementKind::Face, 1).is_empty());

    let text = ObjWriter::write_string(&doc).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.starts_with("v ")).collect();
    assert_eq!(lines, vec!["g alpha", "f 1 2 3", "g default", "f 1 2 3"]);
}

#[test]
fn test_multiple_group_names() {
    let doc = read(&format!("{}g a b\nf 1 2 3\ng b\nf 1 2 3\ng\nf 1 2 3\n", TRIANGLE)).unwrap();

    assert_eq!(doc.groups.len(), 2);
    assert_eq!(doc.group("a").unwrap().faces, vec![0]);
    assert_eq!(doc.group("b").unwrap().faces, vec![0, 1]);
    assert_eq!(doc.default_group.faces, vec![2]);
}

#[test]
fn test_single_group_name_per_line() {
    let options = ObjReadOptions::new().with_single_group_name_per_line(true);
    let doc = read_with(&format!("{}g left   wing\nf 1 2 3\n", TRIANGLE), options).unwrap();

    assert_eq!(doc.groups.len(), 1);
    assert_eq!(doc.groups[0].name.as_deref(), Some("left wing"));
}

#[test]
fn test_new_group_per_statement() {
    let options = ObjReadOptions::new().with_new_group_per_statement(true);
    let doc = read_with(&format!("{}g a\nf 1 2 3\ng a\nf 1 2 3\n", TRIANGLE), options).unwrap();

    assert_eq!(doc.groups.len(), 2);
    assert_eq!(doc.groups[0].faces, vec![0]);
    assert_eq!(doc.groups[1].faces, vec![1]);
}

#[test]
fn test_object_names() {
    let doc = read(&format!("{}o body\nf 1 2 3\n", TRIANGLE)).unwrap();
    assert_eq!(doc.faces[0].attributes.object_name.as_deref(), Some("body"));
    assert!(doc.groups.is_empty());

    let options = ObjReadOptions::new().with_object_names_as_group(true);
    let doc = read_with(&format!("{}o body\nf 1 2 3\n", TRIANGLE), options).unwrap();
    assert!(doc.faces[0].attributes.object_name.is_none());
    assert_eq!(doc.group("body").unwrap().faces, vec![0]);
}

#[test]
fn test_attributes_are_snapshots() {
    let doc = read(&format!("{}usemtl red\nf 1 2 3\nusemtl blue\nf 1 2 3\n", TRIANGLE)).unwrap();
    assert_eq!(doc.faces[0].attributes.material_name.as_deref(), Some("red"));
    assert_eq!(doc.faces[1].attributes.material_name.as_deref(), Some("blue"));
}

#[test]
fn test_continuation_lines() {
    let joined = read("v 1 2 \\\n3\n").unwrap();
    let single = read("v 1 2 3\n").unwrap();
    assert_eq!(joined.vertices, single.vertices);
}

#[test]
fn test_header_and_comments() {
    let doc = read("# Exported\n# by hand\n\nv 0 0 0 # origin\n# trailing comment\n").unwrap();
    assert_eq!(doc.header_text, " Exported\n by hand\n");
    assert_eq!(doc.vertices.len(), 1);
}

#[test]
fn test_obsolete_statements() {
    for line in ["bsp 1 2 3", "bzp", "cdc 1 2 3 4", "cdp 1", "res 4 4"] {
        let err = read(line).unwrap_err();
        assert!(matches!(err, Error::UnsupportedStatement { .. }), "line: {}", line);
    }
    assert_eq!(read("bsp 1 2 3").unwrap_err().keyword(), Some("bsp"));
}

#[test]
fn test_libraries_and_object_files() {
    let doc = read(
        "mtllib a.mtl b.mtl\nmaplib grid.map\nshadow_obj shadow.obj\ntrace_obj trace.obj\n",
    )
    .unwrap();
    assert_eq!(doc.material_libraries, vec!["a.mtl", "b.mtl"]);
    assert_eq!(doc.map_libraries, vec!["grid.map"]);
    assert_eq!(doc.shadow_object_file_name.as_deref(), Some("shadow.obj"));
    assert_eq!(doc.trace_object_file_name.as_deref(), Some("trace.obj"));
}

#[test]
fn test_library_names_with_whitespace() {
    let text = "mtllib my materials.mtl other.mtl\n";
    assert!(read(text).is_err());

    let options = ObjReadOptions::new().with_whitespace_in_library_names(true);
    let doc = read_with(text, options).unwrap();
    assert_eq!(doc.material_libraries, vec!["my materials.mtl", "other.mtl"]);
}

#[test]
fn test_free_form_curves() {
    let doc = read(
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
         vp 0 0\nvp 1 0\nvp 1 1\n\
         cstype rat bspline\ndeg 2\nstep 2\nctech cparm 8\n\
         curv 0 1 1 2 3 4\nparm u 0 0 0 0.5 1 1 1\nend\n\
         curv2 1 2 3\nsp 1 -1\nend\n\
         parm u 1 2\n",
    )
    .unwrap();

    let curve = &doc.curves[0];
    assert_eq!(curve.vertices, vec![1, 2, 3, 4]);
    assert_eq!(curve.end_parameter, 1.0);
    assert_eq!(curve.free_form.free_form_type, FreeFormType::BSpline);
    assert!(curve.free_form.is_rational);
    assert_eq!((curve.free_form.degree_u, curve.free_form.degree_v), (2, 0));
    assert_eq!((curve.free_form.step_u, curve.free_form.step_v), (2, 1));
    assert_eq!(
        curve.free_form.curve_technique,
        Some(ApproximationTechnique::ConstantParametric { resolution_u: 8.0, resolution_v: 8.0 })
    );
    assert_eq!(curve.free_form.parameters_u, vec![0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0]);
    assert!(curve.free_form.parameters_v.is_empty());

    let curve_2d = &doc.curves_2d[0];
    assert_eq!(curve_2d.parameter_space_vertices, vec![1, 2, 3]);
    assert_eq!(curve_2d.free_form.special_points, vec![1, 3]);
    assert!(curve_2d.free_form.parameters_u.is_empty());
}

#[test]
fn test_free_form_surface_and_connection() {
    let doc = read(
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvp 0 0\nvp 1 0\nvp 1 1\n\
         curv2 1 2 3\nend\n\
         cstype bmatrix\ndeg 1 1\nbmat u 1 0 0 1\nbmat v 0 1 1 0\nstech cparma 4 5\n\
         surf 0 1 0 1 1 2 3 4\ntrim 0 1 1\nhole 0 0.5 -1\nscrv 0.25 1 1 0 0.25 1\nend\n\
         con 1 0 1 1 1 0 1 1\n",
    )
    .unwrap();

    let surface = &doc.surfaces[0];
    assert_eq!(surface.vertices.len(), 4);
    assert_eq!(surface.free_form.basis_matrix_u, Some(vec![1.0, 0.0, 0.0, 1.0]));
    assert_eq!(surface.free_form.basis_matrix_v, Some(vec![0.0, 1.0, 1.0, 0.0]));
    assert_eq!(surface.free_form.outer_trimming_curves, vec![CurveIndex::new(0.0, 1.0, 1)]);
    assert_eq!(surface.free_form.inner_trimming_curves, vec![CurveIndex::new(0.0, 0.5, 1)]);
    assert_eq!(surface.free_form.sequence_curves.len(), 2);
    assert_eq!(
        surface.free_form.surface_technique,
        Some(ApproximationTechnique::ConstantParametric { resolution_u: 4.0, resolution_v: 5.0 })
    );

    let connection = &doc.surface_connections[0];
    assert_eq!(connection.surface_1, 1);
    assert_eq!(connection.curve_2, CurveIndex::new(0.0, 1.0, 1));
}

#[test]
fn test_free_form_errors() {
    let setup = "v 0 0 0\nv 1 0 0\nvp 0 0\nvp 1 0\n";
    assert!(read(&format!("{}curv 0 1 1\n", setup)).is_err());
    assert!(read(&format!("{}curv 0 1 1 5\n", setup)).is_err());
    assert!(read(&format!("{}curv2 1 2\ntrim 0 1\n", setup)).is_err());
    assert!(read(&format!("{}curv2 1 2\ntrim 0 1 2\n", setup)).is_err());
    assert!(read(&format!("{}curv2 1 2\nparm w 0 1\n", setup)).is_err());
    assert!(read(&format!("{}curv2 1 2\nsp 3\n", setup)).is_err());
    assert!(read("deg 1 1\nbmat u 1 0 0\n").is_err());
    assert!(read("con 1 0 1 1 1 0 1 1\n").is_err());
}

#[test]
fn test_body_statements_without_element_are_ignored() {
    let doc = read("vp 0 0\nvp 1 0\ncurv2 1 2\nend\nparm u 0 1\nsp 1\n").unwrap();
    assert!(doc.curves_2d[0].free_form.parameters_u.is_empty());
    assert!(doc.curves_2d[0].free_form.special_points.is_empty());
}

#[test]
fn test_merging_groups() {
    let doc = read("vp 0 0\nvp 1 0\nmg 1 0.5\ncurv2 1 2\nmg off\ncurv2 1 2\n").unwrap();
    assert_eq!(doc.curves_2d[0].free_form.merging_group, 1);
    assert_eq!(doc.curves_2d[1].free_form.merging_group, 0);
    assert_relative_eq!(doc.merging_group_resolutions[&1], 0.5);

    assert!(read("mg 2\n").is_err());
    assert!(read("mg 0 1\n").is_ok());
}

#[test]
fn test_parameter_space_vertex_defaults() {
    let doc = read("vp 0.5\nvp 0.5 0.25\n").unwrap();
    assert_eq!(doc.parameter_space_vertices[0], Vector3f::new(0.5, 0.0, 1.0));
    assert_eq!(doc.parameter_space_vertices[1], Vector3f::new(0.5, 0.25, 1.0));
}

#[test]
fn test_error_message_names_statement() {
    let err = read("v 0 0 0\nvn 0 zero 1\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("line 2"), "message: {}", message);
    assert!(message.contains("vn"), "message: {}", message);
}
