//! ASCII STL import.
//!
//! The grammar is read token by token:
//!
//! ```text
//! file := "solid" NAME face* "endsolid"
//! face := "facet" "normal" f f f
//!         "outer" "loop"
//!           ("vertex" f f f)+
//!         "endloop"
//!         "endfacet"
//! ```
//!
//! Each facet becomes one face of an [`IndexedFaceSet`]. Vertices are not
//! shared between facets: every `vertex` line appends a new coordinate
//! triple and its index, and `endloop` closes the face with the sentinel.
//! The face set is built locally and only handed back once `endsolid` has
//! been reached, so a failed import never yields a mesh.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use mesh_types::{IndexedFaceSet, MeshTopology, Point3, SceneGraph};
use tracing::debug;

use crate::error::{StlError, StlResult};
use crate::params::StlParams;
use crate::tokenizer::{Tokenizer, quoted};

/// Keywords that end the name on the `solid` line.
const SOLID_NAME_STOPS: &[&str] = &["facet", "endsolid"];

/// Keywords that end the name on the `endsolid` line.
const END_NAME_STOPS: &[&str] = &["solid"];

/// Read an ASCII STL document into a face set.
///
/// The solid name is everything after `solid` on the first line. It may
/// be empty.
///
/// # Errors
///
/// Returns the first grammar violation found: a wrong keyword
/// ([`StlError::UnexpectedToken`]), a malformed number
/// ([`StlError::InvalidNumber`]), or premature end of input
/// ([`StlError::UnexpectedEof`]). Reader failures surface as
/// [`StlError::Io`].
///
/// # Example
///
/// ```
/// use mesh_stl::{read_stl, StlParams};
/// use mesh_types::MeshTopology;
///
/// let text = "solid tri
///   facet normal 0 0 1
///     outer loop
///       vertex 0 0 0
///       vertex 1 0 0
///       vertex 0 1 0
///     endloop
///   endfacet
/// endsolid tri
/// ";
/// let ifs = read_stl(text.as_bytes(), &StlParams::default()).unwrap();
/// assert_eq!(ifs.name, "tri");
/// assert_eq!(ifs.face_count(), 1);
/// assert_eq!(ifs.coord_index, vec![0, 1, 2, -1]);
/// ```
pub fn read_stl<R: BufRead>(reader: R, params: &StlParams) -> StlResult<IndexedFaceSet> {
    let mut tkn = Tokenizer::new(reader);
    parse_solid(&mut tkn, params)
}

/// Read an ASCII STL document held in memory, using default parameters.
///
/// # Errors
///
/// See [`read_stl`].
pub fn read_stl_str(text: &str) -> StlResult<IndexedFaceSet> {
    read_stl(text.as_bytes(), &StlParams::default())
}

/// Load an ASCII STL file into a scene with a single shape.
///
/// The shape is named after the solid, carries a default material, and
/// holds the face set as its geometry.
///
/// # Errors
///
/// Returns [`StlError::FileNotFound`] if the file does not exist, and the
/// errors of [`read_stl`] otherwise.
///
/// # Example
///
/// ```no_run
/// use mesh_stl::load_stl;
///
/// let scene = load_stl("model.stl").unwrap();
/// assert_eq!(scene.number_of_children(), 1);
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> StlResult<SceneGraph> {
    load_stl_with_params(path, &StlParams::default())
}

/// Load an ASCII STL file with explicit parameters.
///
/// # Errors
///
/// See [`load_stl`].
pub fn load_stl_with_params<P: AsRef<Path>>(
    path: P,
    params: &StlParams,
) -> StlResult<SceneGraph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StlError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StlError::Io(e)
        }
    })?;

    debug!(path = %path.display(), "Loading ASCII STL");
    let ifs = read_stl(BufReader::new(file), params)?;

    let mut scene = SceneGraph::from_face_set(ifs);
    scene.url = path.display().to_string();
    Ok(scene)
}

fn parse_solid<R: BufRead>(
    tkn: &mut Tokenizer<R>,
    params: &StlParams,
) -> StlResult<IndexedFaceSet> {
    tkn.expect("solid")?;
    let mut ifs = IndexedFaceSet::with_name(read_name(tkn)?);
    ifs.normal_per_vertex = false;

    let facet_or_end = format!("{} or {}", quoted("facet"), quoted("endsolid"));
    loop {
        let token = tkn.require_token(&facet_or_end)?;
        match token.as_str() {
            "endsolid" => break,
            "facet" => parse_facet(tkn, &mut ifs, params)?,
            _ => return Err(tkn.unexpected(facet_or_end, token)),
        }
    }

    let end_name = tkn.rest_of_line_until(END_NAME_STOPS);
    if !end_name.is_empty() && end_name != ifs.name {
        debug!(
            name = %ifs.name,
            end_name = %end_name,
            "endsolid name differs from solid name"
        );
    }

    if let Some(token) = tkn.next_token()? {
        if !params.ignore_trailing_content {
            return Err(tkn.unexpected("end of file".to_string(), token));
        }
        debug!(line = tkn.line(), "Ignoring content after endsolid");
    }

    debug!(
        name = %ifs.name,
        faces = ifs.face_count(),
        vertices = ifs.vertex_count(),
        "Parsed ASCII STL"
    );
    Ok(ifs)
}

/// Solid name: the words after `solid` up to the first face keyword.
///
/// When the `solid` line holds nothing else, the next token names the solid
/// unless it already opens a face or closes the solid.
fn read_name<R: BufRead>(tkn: &mut Tokenizer<R>) -> StlResult<String> {
    let name = tkn.rest_of_line_until(SOLID_NAME_STOPS);
    if !name.is_empty() {
        return Ok(name);
    }
    let name_follows = matches!(
        tkn.peek_token()?,
        Some(token) if !SOLID_NAME_STOPS.contains(&token)
    );
    if name_follows {
        return Ok(tkn.next_token()?.unwrap_or_default());
    }
    Ok(name)
}

/// Parse one facet, the leading `facet` already consumed.
fn parse_facet<R: BufRead>(
    tkn: &mut Tokenizer<R>,
    ifs: &mut IndexedFaceSet,
    params: &StlParams,
) -> StlResult<()> {
    tkn.expect("normal")?;
    let normal = tkn.read_vec3("normal")?;
    ifs.push_face_normal(normal);

    tkn.expect("outer")?;
    tkn.expect("loop")?;

    let mut corners = 0usize;
    loop {
        let expected = if corners < 3 {
            quoted("vertex")
        } else if params.require_triangles {
            quoted("endloop")
        } else {
            format!("{} or {}", quoted("vertex"), quoted("endloop"))
        };

        let token = tkn.require_token(&expected)?;
        match token.as_str() {
            "vertex" if corners < 3 || !params.require_triangles => {
                let position = tkn.read_vec3("vertex")?;
                let index = ifs.push_vertex(Point3::from(position));
                ifs.push_corner(index).ok_or(StlError::TooManyVertices {
                    count: ifs.vertex_count(),
                    line: tkn.line(),
                })?;
                corners += 1;
            }
            "endloop" if corners >= 3 => break,
            _ => return Err(tkn.unexpected(expected, token)),
        }
    }
    ifs.close_face();

    tkn.expect("endfacet")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{FACE_SENTINEL, Vector3};

    const CUBE_CORNER: &str = "solid cube_corner
 facet normal 0 0 -1
  outer loop
   vertex 0 0 0
   vertex 0 1 0
   vertex 1 0 0
  endloop
 endfacet
endsolid cube_corner
";

    const TWO_FACETS: &str = "solid pair
facet normal 0 0 1
outer loop
vertex 0 0 0
vertex 1 0 0
vertex 0 1 0
endloop
endfacet
facet normal 0 0 1
outer loop
vertex 1 0 0
vertex 1 1 0
vertex 0 1 0
endloop
endfacet
endsolid pair
";

    #[test]
    fn cube_corner_imports() {
        let ifs = read_stl_str(CUBE_CORNER).unwrap();
        assert_eq!(ifs.name, "cube_corner");
        assert_eq!(ifs.vertex_count(), 3);
        assert_eq!(ifs.face_count(), 1);
        assert_eq!(ifs.normal_count(), 1);
        assert_eq!(ifs.face_normal(0), Some(Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(ifs.coord_index, vec![0, 1, 2, FACE_SENTINEL]);
        assert_eq!(ifs.coord, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(!ifs.normal_per_vertex);
    }

    #[test]
    fn vertices_are_not_shared_between_facets() {
        let ifs = read_stl_str(TWO_FACETS).unwrap();
        assert_eq!(ifs.face_count(), 2);
        assert_eq!(ifs.vertex_count(), 6);
        assert_eq!(ifs.coord_index, vec![0, 1, 2, -1, 3, 4, 5, -1]);
        assert!(ifs.is_triangle_mesh());
    }

    #[test]
    fn empty_solid_has_no_faces() {
        let ifs = read_stl_str("solid empty\nendsolid empty\n").unwrap();
        assert_eq!(ifs.name, "empty");
        assert!(ifs.is_empty());
        assert!(ifs.coord_index.is_empty());
    }

    #[test]
    fn missing_name_is_empty() {
        let ifs = read_stl_str("solid\nendsolid\n").unwrap();
        assert!(ifs.name.is_empty());
    }

    #[test]
    fn name_keeps_all_words() {
        let ifs = read_stl_str("solid Bracket  v2 final\nendsolid Bracket v2 final").unwrap();
        assert_eq!(ifs.name, "Bracket v2 final");
    }

    #[test]
    fn layout_does_not_matter() {
        let text = TWO_FACETS.split_whitespace().collect::<Vec<_>>().join(" ");
        let ifs = read_stl_str(&text).unwrap();
        assert_eq!(ifs.name, "pair");
        assert_eq!(ifs.face_count(), 2);
        assert_eq!(ifs.coord_index, vec![0, 1, 2, -1, 3, 4, 5, -1]);
    }

    #[test]
    fn single_line_file_imports() {
        let text = "solid cube_corner facet normal 0 0 -1 outer loop vertex 0 0 0 \
                    vertex 0 1 0 vertex 1 0 0 endloop endfacet endsolid cube_corner\n";
        let ifs = read_stl_str(text).unwrap();
        assert_eq!(ifs.name, "cube_corner");
        assert_eq!(ifs.face_count(), 1);
        assert_eq!(ifs.coord, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(ifs.face_normal(0), Some(Vector3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn unnamed_empty_solid_on_one_line() {
        let ifs = read_stl_str("solid endsolid").unwrap();
        assert!(ifs.name.is_empty());
        assert!(ifs.is_empty());
    }

    #[test]
    fn name_may_sit_on_its_own_line() {
        let text = CUBE_CORNER.replace("solid cube_corner\n", "solid\n  cube_corner\n");
        let ifs = read_stl_str(&text).unwrap();
        assert_eq!(ifs.name, "cube_corner");
        assert_eq!(ifs.face_count(), 1);
    }

    #[test]
    fn multi_word_name_before_facet_on_same_line() {
        let text = CUBE_CORNER.replace("solid cube_corner\n facet", "solid big part facet");
        let ifs = read_stl_str(&text).unwrap();
        assert_eq!(ifs.name, "big part");
        assert_eq!(ifs.face_count(), 1);
    }

    #[test]
    fn trailing_solid_on_endsolid_line_is_trailing_content() {
        let text = CUBE_CORNER.replace("endsolid cube_corner\n", "endsolid cube_corner solid again\n");
        assert!(read_stl_str(&text).is_ok());

        let err = read_stl(text.as_bytes(), &StlParams::strict()).unwrap_err();
        assert!(matches!(
            err,
            StlError::UnexpectedToken { ref found, line: 9, .. } if found == "solid"
        ));
    }

    #[test]
    fn missing_solid_is_rejected() {
        let err = read_stl_str("facet normal 0 0 1").unwrap_err();
        assert!(matches!(
            err,
            StlError::UnexpectedToken { ref expected, ref found, line: 1 }
                if expected == "\"solid\"" && found == "facet"
        ));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        let text = CUBE_CORNER.replace("outer loop", "OUTER LOOP");
        let err = read_stl_str(&text).unwrap_err();
        assert!(matches!(err, StlError::UnexpectedToken { ref found, .. } if found == "OUTER"));
    }

    #[test]
    fn bad_normal_component_is_numeric_error() {
        let text = CUBE_CORNER.replace("normal 0 0 -1", "normal 0 zero -1");
        let err = read_stl_str(&text).unwrap_err();
        assert!(matches!(
            err,
            StlError::InvalidNumber { what: "normal", ref found, line: 2 } if found == "zero"
        ));
    }

    #[test]
    fn bad_vertex_component_is_numeric_error() {
        let text = CUBE_CORNER.replace("vertex 0 1 0", "vertex 0 1 x");
        let err = read_stl_str(&text).unwrap_err();
        assert!(matches!(err, StlError::InvalidNumber { what: "vertex", line: 5, .. }));
    }

    #[test]
    fn truncated_input_is_eof() {
        let cut = &CUBE_CORNER[..CUBE_CORNER.find("endloop").unwrap()];
        let err = read_stl_str(cut).unwrap_err();
        assert!(matches!(err, StlError::UnexpectedEof { .. }));
    }

    #[test]
    fn missing_endsolid_is_eof() {
        let cut = &CUBE_CORNER[..CUBE_CORNER.find("endsolid").unwrap()];
        let err = read_stl_str(cut).unwrap_err();
        assert!(matches!(err, StlError::UnexpectedEof { .. }));
    }

    #[test]
    fn fourth_vertex_rejected_by_default() {
        let text = CUBE_CORNER.replace("   vertex 1 0 0\n", "   vertex 1 0 0\n   vertex 1 1 0\n");
        let err = read_stl_str(&text).unwrap_err();
        assert!(matches!(
            err,
            StlError::UnexpectedToken { ref expected, ref found, line: 7 }
                if expected == "\"endloop\"" && found == "vertex"
        ));
    }

    #[test]
    fn too_few_vertices_rejected() {
        let text = CUBE_CORNER.replace("   vertex 1 0 0\n", "");
        let err = read_stl_str(&text).unwrap_err();
        assert!(matches!(
            err,
            StlError::UnexpectedToken { ref expected, ref found, .. }
                if expected == "\"vertex\"" && found == "endloop"
        ));

        let lenient = read_stl(text.as_bytes(), &StlParams::lenient());
        assert!(lenient.is_err());
    }

    #[test]
    fn lenient_accepts_polygon_loops() {
        let text = CUBE_CORNER.replace("   vertex 1 0 0\n", "   vertex 1 0 0\n   vertex 1 1 0\n");
        let ifs = read_stl(text.as_bytes(), &StlParams::lenient()).unwrap();
        assert_eq!(ifs.face_count(), 1);
        assert_eq!(ifs.vertex_count(), 4);
        assert_eq!(ifs.coord_index, vec![0, 1, 2, 3, FACE_SENTINEL]);
        assert!(!ifs.is_triangle_mesh());
    }

    #[test]
    fn trailing_content_policy() {
        let text = format!("{CUBE_CORNER}solid again\n");
        assert!(read_stl_str(&text).is_ok());

        let err = read_stl(text.as_bytes(), &StlParams::strict()).unwrap_err();
        assert!(matches!(
            err,
            StlError::UnexpectedToken { ref found, line: 10, .. } if found == "solid"
        ));
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        assert!(matches!(
            result,
            Err(StlError::FileNotFound { ref path }) if path.to_string_lossy().contains("nonexistent")
        ));
    }
}
