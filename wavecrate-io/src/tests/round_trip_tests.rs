//! Write/read round trips
//!
//! A document read from valid text, written back out and read again must
//! compare equal to the first read.

use crate::{
    read_document, write_document, Document, DocumentReader, DocumentWriter, MtlReadOptions,
    MtlReader, MtlWriter, ObjReadOptions, ObjReader, ObjWriter, ReadOptions,
};
use std::fs;
use std::path::PathBuf;
use wavecrate_core::{Error, MtlDocument, ObjDocument};

const SCENE_OBJ: &str = "\
# round trip scene
mtllib scene.mtl
maplib scene.map
shadow_obj shadow.obj
trace_obj trace.obj
v 0 0 0
v 1 0 0 0.5
v 1 1 0 0.2 0.4 0.6
v 0 1 0 0.2 0.4 0.6 0.8
vp 0.5
vp 0.5 0.25
vp 0.5 0.25 2
vn 0 0 1
vt 0.5
vt 0.5 0.5
vt 0.5 0.5 0.5
g points
p 1 2
g edges
s 1
l 1/1 2/2
g faces shared
o body
usemtl red
usemap grid
lod 1
bevel on
c_interp on
d_interp on
f 1/1/1 2/2/1 3/3/1
s off
f 1//1 3//1 4//1
g curves
mg 1 0.5
cstype rat bspline
deg 2
step 3
ctech cspace 0.1
curv 0 1 1 2 3
parm u 0 0 0 1 1 1
end
curv2 1 2 3
end
cstype bmatrix
deg 1 1
bmat u 1 0 0 1
bmat v 1 0 0 1
step 1 1
stech cparma 4 5
surf 0 1 0 1 1/1/1 2/2/1 3/3/1 4/1/1
trim 0 1 1
hole 0 1 1
scrv 0 1 1
sp 1 2
end
con 1 0 1 1 1 0 1 1
";

const SCENE_MTL: &str = "\
# scene materials
newmtl red
Ka 0.1
Kd 1 0 0
Ks xyz 0.5 0.5 0.5
Ke spectral glow.rfl 2
Tf 1 1 1
illum 2
d -halo 0.75
Ns 32
sharpness 80
Ni 1.5
map_aat on
map_Kd -clamp on -o 0.1 0.2 -s 2 2 2 red.png
bump -bm 0.5 -imfchan l bump.png
refl -type sphere -blenu off sky.png
refl -type cube_top top.png
Pr 0.5
Pm 0.25
map_Pr rough.png

newmtl blue
Kd 0 0 1
";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wavecrate_{}_{}", std::process::id(), name))
}

fn obj_round_trip(document: &ObjDocument) -> ObjDocument {
    let text = ObjWriter::write_string(document).unwrap();
    ObjReader::read_str(&text, &ObjReadOptions::default())
        .unwrap_or_else(|e| panic!("failed to re-read written document: {}\n{}", e, text))
}

#[test]
fn test_obj_scene_round_trip() {
    let original = ObjReader::read_str(SCENE_OBJ, &ObjReadOptions::default()).unwrap();
    assert_eq!(original.groups.len(), 5);
    assert_eq!(original.surfaces.len(), 1);

    let reread = obj_round_trip(&original);
    assert_eq!(reread, original);
}

#[test]
fn test_obj_written_text_is_stable() {
    let original = ObjReader::read_str(SCENE_OBJ, &ObjReadOptions::default()).unwrap();
    let first = ObjWriter::write_string(&original).unwrap();
    let second = ObjWriter::write_string(&obj_round_trip(&original)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_obj_writer_emits_each_state_change_once() {
    let original = ObjReader::read_str(SCENE_OBJ, &ObjReadOptions::default()).unwrap();
    let text = ObjWriter::write_string(&original).unwrap();

    assert!(text.starts_with("# round trip scene\n"));
    assert_eq!(text.matches("usemtl red").count(), 1);
    assert_eq!(text.matches("g faces shared").count(), 1);
    assert_eq!(text.matches("\nend\n").count(), 2);
    assert!(text.contains("mg 1 0.500000\n"));
    assert!(text.contains("cstype rat bspline\n"));
    assert!(text.contains("deg 2\n"));
    assert!(text.contains("step 3\n"));
    assert!(text.contains("step 1\n"));
    assert!(text.contains("ctech cspace 0.100000\n"));
    assert!(text.contains("stech cparma 4.000000 5.000000\n"));
    assert!(text.contains("con 1 0.000000 1.000000 1 1 0.000000 1.000000 1\n"));
}

#[test]
fn test_mtl_round_trip() {
    let original = MtlReader::read_str(SCENE_MTL, &MtlReadOptions::default()).unwrap();
    assert_eq!(original.len(), 2);

    let text = MtlWriter::write_string(&original).unwrap();
    let reread = MtlReader::read_str(&text, &MtlReadOptions::default()).unwrap();
    assert_eq!(reread, original);
}

#[test]
fn test_documents_through_files() {
    let obj_path = temp_path("scene.obj");
    let mtl_path = temp_path("scene.mtl");

    let obj = ObjReader::read_str(SCENE_OBJ, &ObjReadOptions::default()).unwrap();
    let mtl = MtlReader::read_str(SCENE_MTL, &MtlReadOptions::default()).unwrap();

    write_document(&Document::Obj(obj.clone()), &obj_path).unwrap();
    write_document(&Document::Mtl(mtl.clone()), &mtl_path).unwrap();

    let options = ReadOptions::default();
    assert_eq!(read_document(&obj_path, &options).unwrap(), Document::Obj(obj));
    assert_eq!(read_document(&mtl_path, &options).unwrap(), Document::Mtl(mtl));

    let _ = fs::remove_file(&obj_path);
    let _ = fs::remove_file(&mtl_path);
}

#[test]
fn test_unsupported_extensions() {
    let result = read_document("scene.ply", &ReadOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

    let result = write_document(&Document::Mtl(MtlDocument::new()), temp_path("library.obj"));
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file() {
    let result = ObjReader::read_file(temp_path("missing.obj"), &ObjReadOptions::default());
    assert!(matches!(result, Err(Error::Io(_))));
}

const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n";

#[test]
fn test_group_order_survives_round_trip() {
    let original = ObjReader::read_str(
        &format!("{}g a\nf 1 2 3\ng b\np 1\n", QUAD),
        &ObjReadOptions::default(),
    )
    .unwrap();
    let names: Vec<_> = original.groups.iter().map(|g| g.name.as_deref()).collect();
    assert_eq!(names, vec![Some("a"), Some("b")]);

    assert_eq!(obj_round_trip(&original), original);
}

#[test]
fn test_empty_groups_survive_round_trip() {
    let original = ObjReader::read_str(
        &format!("{}g empty\ng real\nf 1 2 3\n", QUAD),
        &ObjReadOptions::default(),
    )
    .unwrap();
    assert_eq!(original.groups.len(), 2);
    assert!(original.group("empty").unwrap().is_empty());

    let text = ObjWriter::write_string(&original).unwrap();
    assert_eq!(text.matches("g real").count(), 1);
    assert_eq!(obj_round_trip(&original), original);
}

#[test]
fn test_unused_merging_groups_survive_round_trip() {
    let original = ObjReader::read_str(
        "vp 0 0\nvp 1 0\nmg 2 0.5\nmg off\ncurv2 1 2\n",
        &ObjReadOptions::default(),
    )
    .unwrap();
    assert_eq!(original.merging_group_resolutions.get(&2), Some(&0.5));

    let text = ObjWriter::write_string(&original).unwrap();
    assert!(text.contains("mg 2 0.500000\nmg off\n"), "{}", text);
    assert_eq!(obj_round_trip(&original), original);
}

#[test]
fn test_basis_matrix_read_under_older_degree() {
    let original = ObjReader::read_str(
        &format!(
            "{}cstype bmatrix\ndeg 1 1\nbmat u 1 0 0 1\nbmat v 1 0 0 1\n\
             deg 2 2\nsurf 0 1 0 1 1 2 3 4\n",
            QUAD
        ),
        &ObjReadOptions::default(),
    )
    .unwrap();
    let free_form = &original.surfaces[0].free_form;
    assert_eq!((free_form.degree_u, free_form.degree_v), (2, 2));
    assert_eq!(free_form.basis_matrix_u.as_ref().map(Vec::len), Some(4));

    let text = ObjWriter::write_string(&original).unwrap();
    assert!(text.contains("deg 3\nbmat u "), "{}", text);
    let surface = "surf 0.000000 1.000000 0.000000 1.000000 1 2 3 4\n";
    assert!(text.ends_with(&format!("deg 2 2\n{}", surface)), "{}", text);
    assert_eq!(obj_round_trip(&original), original);
}
