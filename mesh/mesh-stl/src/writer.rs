//! ASCII STL export.
//!
//! Export is gated: the face set must use per-face normals, contain only
//! triangles, carry one normal per face, and reference existing vertices.
//! All of this is checked before a single byte is produced, so a declined
//! export leaves nothing behind.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use mesh_types::{Faces, IndexedFaceSet, MeshTopology, SceneGraph, Vector3};
use tracing::debug;

use crate::error::{ExportDeclined, StlError, StlResult};

/// Fractional digits written for every coordinate and normal component.
///
/// Values are written in fixed notation (`%f` style). Re-importing an
/// exported file reproduces values to this many decimal places only.
pub const STL_DECIMAL_PRECISION: usize = 6;

/// Derive a solid name from a file path.
///
/// Strips the directory (`/` or `\` separated) and the last extension.
///
/// # Example
///
/// ```
/// use mesh_stl::display_name_from_path;
///
/// assert_eq!(display_name_from_path("out/parts/bracket.stl"), "bracket");
/// assert_eq!(display_name_from_path(r"C:\cad\gear.v2.stl"), "gear.v2");
/// assert_eq!(display_name_from_path("README"), "README");
/// ```
#[must_use]
pub fn display_name_from_path<P: AsRef<Path>>(path: P) -> String {
    let full = path.as_ref().to_string_lossy();
    let base = full.rsplit(['/', '\\']).next().unwrap_or_default();
    match base.rfind('.') {
        Some(dot) if dot > 0 => base[..dot].to_string(),
        _ => base.to_string(),
    }
}

/// Check that `ifs` can be written as STL.
///
/// # Errors
///
/// Returns the first unmet precondition.
pub fn validate_face_set(ifs: &IndexedFaceSet) -> Result<(), ExportDeclined> {
    if ifs.normal_per_vertex {
        return Err(ExportDeclined::NormalPerVertex);
    }

    let faces = ifs.faces();
    for (face, corners) in faces.iter().enumerate() {
        if corners.len() != 3 {
            return Err(ExportDeclined::NotTriangleMesh {
                face,
                corners: corners.len(),
            });
        }
        for (corner, &index) in corners.iter().enumerate() {
            if faces.face_vertex(face, corner).is_none() {
                return Err(ExportDeclined::IndexOutOfRange {
                    face,
                    index,
                    vertex_count: faces.number_of_vertices(),
                });
            }
        }
    }

    if ifs.normal.len() != faces.number_of_faces() * 3 {
        return Err(ExportDeclined::NormalCountMismatch {
            normals: ifs.normal_count(),
            faces: faces.number_of_faces(),
        });
    }

    Ok(())
}

/// Check that `scene` holds exactly one shape with a writable face set.
///
/// # Errors
///
/// Returns the first unmet precondition.
pub fn validate_scene(scene: &SceneGraph) -> Result<&IndexedFaceSet, ExportDeclined> {
    let [node] = scene.children.as_slice() else {
        return Err(ExportDeclined::NodeCount(scene.number_of_children()));
    };
    let shape = node.as_shape().ok_or(ExportDeclined::NotAShape)?;
    let ifs = shape
        .indexed_face_set()
        .ok_or(ExportDeclined::NotAFaceSet)?;
    validate_face_set(ifs)?;
    Ok(ifs)
}

/// Write `ifs` as ASCII STL.
///
/// The solid is named `ifs.name`, or `name_hint` when that is empty.
///
/// # Errors
///
/// Returns [`StlError::Declined`] if a precondition fails, in which case
/// nothing has been written, or [`StlError::Io`] if writing fails.
pub fn write_stl<W: Write>(ifs: &IndexedFaceSet, name_hint: &str, writer: W) -> StlResult<()> {
    validate_face_set(ifs).inspect_err(log_declined)?;
    write_validated(ifs, resolve_name(ifs, name_hint), writer)
}

/// Render `ifs` as an ASCII STL document.
///
/// # Errors
///
/// See [`write_stl`].
///
/// # Example
///
/// ```
/// use mesh_stl::to_stl_string;
/// use mesh_types::unit_square;
///
/// let text = to_stl_string(&unit_square(), "ignored").unwrap();
/// assert!(text.starts_with("solid square\n facet normal 0.000000 0.000000 1.000000\n"));
/// assert!(text.ends_with("endsolid square\n"));
/// ```
pub fn to_stl_string(ifs: &IndexedFaceSet, name_hint: &str) -> StlResult<String> {
    let mut buf = Vec::new();
    write_stl(ifs, name_hint, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| StlError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Save the single shape of `scene` as an ASCII STL file.
///
/// When the face set is unnamed, the solid is named after the file, with
/// directory and extension stripped.
///
/// # Errors
///
/// Returns [`StlError::Declined`] if the scene is not exactly one shape
/// with a writable face set; no file is created in that case. Returns
/// [`StlError::Io`] if the file cannot be written; a partially written
/// file is removed.
///
/// # Example
///
/// ```no_run
/// use mesh_stl::{load_stl, save_stl};
///
/// let scene = load_stl("input.stl").unwrap();
/// save_stl(&scene, "output.stl").unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(scene: &SceneGraph, path: P) -> StlResult<()> {
    let ifs = validate_scene(scene).inspect_err(log_declined)?;
    save_validated(ifs, path.as_ref())
}

/// Save a face set as an ASCII STL file.
///
/// # Errors
///
/// See [`save_stl`].
pub fn save_stl_mesh<P: AsRef<Path>>(ifs: &IndexedFaceSet, path: P) -> StlResult<()> {
    validate_face_set(ifs).inspect_err(log_declined)?;
    save_validated(ifs, path.as_ref())
}

fn save_validated(ifs: &IndexedFaceSet, path: &Path) -> StlResult<()> {
    let hint = display_name_from_path(path);
    let mut buf = Vec::new();
    write_validated(ifs, resolve_name(ifs, &hint), &mut buf)?;

    let mut file = File::create(path)?;
    if let Err(e) = file.write_all(&buf) {
        drop(file);
        // Best effort; the write error is the one reported.
        let _ = fs::remove_file(path);
        return Err(e.into());
    }

    debug!(
        path = %path.display(),
        faces = ifs.face_count(),
        bytes = buf.len(),
        "Saved ASCII STL"
    );
    Ok(())
}

fn log_declined(reason: &ExportDeclined) {
    debug!(%reason, "STL export declined");
}

fn resolve_name<'a>(ifs: &'a IndexedFaceSet, hint: &'a str) -> &'a str {
    if ifs.name.is_empty() { hint } else { &ifs.name }
}

fn write_validated<W: Write>(ifs: &IndexedFaceSet, name: &str, mut w: W) -> StlResult<()> {
    let faces = ifs.faces();

    writeln!(w, "solid {name}")?;
    for face in 0..faces.number_of_faces() {
        let normal = ifs.face_normal(face).ok_or(ExportDeclined::NormalCountMismatch {
            normals: ifs.normal_count(),
            faces: faces.number_of_faces(),
        })?;
        write_triple(&mut w, " facet normal", &normal)?;
        writeln!(w, "  outer loop")?;
        for corner in 0..3 {
            let position = corner_position(ifs, &faces, face, corner)?;
            write_triple(&mut w, "   vertex", &position)?;
        }
        writeln!(w, "  endloop")?;
        writeln!(w, " endfacet")?;
    }
    writeln!(w, "endsolid {name}")?;
    w.flush()?;

    debug!(name, faces = faces.number_of_faces(), "Wrote ASCII STL");
    Ok(())
}

fn corner_position(
    ifs: &IndexedFaceSet,
    faces: &Faces<'_>,
    face: usize,
    corner: usize,
) -> Result<Vector3<f64>, ExportDeclined> {
    faces
        .face_vertex(face, corner)
        .and_then(|v| ifs.vertex(v))
        .map(|p| p.coords)
        .ok_or_else(|| ExportDeclined::IndexOutOfRange {
            face,
            index: faces
                .face(face)
                .and_then(|f| f.get(corner).copied())
                .unwrap_or(mesh_types::FACE_SENTINEL),
            vertex_count: faces.number_of_vertices(),
        })
}

fn write_triple<W: Write>(w: &mut W, prefix: &str, v: &Vector3<f64>) -> io::Result<()> {
    writeln!(
        w,
        "{prefix} {:.prec$} {:.prec$} {:.prec$}",
        v.x,
        v.y,
        v.z,
        prec = STL_DECIMAL_PRECISION
    )
}
