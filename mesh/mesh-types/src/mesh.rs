//! Indexed face set with per-face normals.

use crate::{Faces, MeshTopology};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index value that terminates a face in [`IndexedFaceSet::coord_index`].
pub const FACE_SENTINEL: i32 = -1;

/// A polygon mesh stored as flat coordinate, normal, and index buffers.
///
/// # Memory Layout
///
/// - `coord`: `[x0, y0, z0, x1, y1, z1, ...]`, one triple per vertex
/// - `normal`: one triple per face while `normal_per_vertex` is `false`
/// - `coord_index`: corner indices of each face, each face closed by
///   [`FACE_SENTINEL`]
///
/// A face `[2, 5, 9]` is stored as `2, 5, 9, -1`.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedFaceSet, MeshTopology, Point3, Vector3};
///
/// let mut ifs = IndexedFaceSet::new();
/// for p in [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]] {
///     let v = ifs.push_vertex(Point3::new(p[0], p[1], p[2]));
///     ifs.push_corner(v).unwrap();
/// }
/// ifs.close_face();
/// ifs.push_face_normal(Vector3::z());
///
/// assert_eq!(ifs.coord_index, vec![0, 1, 2, -1]);
/// assert_eq!(ifs.face_count(), 1);
/// assert!(ifs.is_triangle_mesh());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedFaceSet {
    /// Display name, empty when unnamed.
    pub name: String,

    /// Vertex coordinates, grouped in triples.
    pub coord: Vec<f64>,

    /// Normal components, grouped in triples.
    pub normal: Vec<f64>,

    /// Sentinel-delimited corner indices into `coord`.
    pub coord_index: Vec<i32>,

    /// `true` when `normal` holds one triple per vertex instead of per face.
    pub normal_per_vertex: bool,
}

impl Default for IndexedFaceSet {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexedFaceSet {
    /// Create an empty face set with per-face normals.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: String::new(),
            coord: Vec::new(),
            normal: Vec::new(),
            coord_index: Vec::new(),
            normal_per_vertex: false,
        }
    }

    /// Create an empty, named face set with per-face normals.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Build a triangle mesh from vertex positions and index triples.
    ///
    /// Normals are left empty; call [`compute_face_normals`] to fill them.
    /// Returns `None` if an index does not fit the `i32` index stream.
    ///
    /// [`compute_face_normals`]: Self::compute_face_normals
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedFaceSet, MeshTopology};
    ///
    /// let ifs = IndexedFaceSet::from_triangles(
    ///     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
    ///     &[[0, 1, 2]],
    /// )
    /// .unwrap();
    /// assert_eq!(ifs.vertex_count(), 3);
    /// assert_eq!(ifs.face_count(), 1);
    /// assert_eq!(ifs.normal_count(), 0);
    /// ```
    #[must_use]
    pub fn from_triangles(positions: &[[f64; 3]], triangles: &[[u32; 3]]) -> Option<Self> {
        let mut ifs = Self::new();
        ifs.coord.reserve(positions.len() * 3);
        ifs.coord_index.reserve(triangles.len() * 4);

        for p in positions {
            ifs.coord.extend_from_slice(p);
        }
        for tri in triangles {
            for &corner in tri {
                ifs.coord_index.push(i32::try_from(corner).ok()?);
            }
            ifs.coord_index.push(FACE_SENTINEL);
        }

        Some(ifs)
    }

    /// Number of vertex triples in `coord`.
    #[inline]
    #[must_use]
    pub fn number_of_coord(&self) -> usize {
        self.coord.len() / 3
    }

    /// Number of normal triples in `normal`.
    #[inline]
    #[must_use]
    pub fn number_of_normal(&self) -> usize {
        self.normal.len() / 3
    }

    /// Number of faces in `coord_index`.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.faces().number_of_faces()
    }

    /// Face table over `coord_index`.
    #[must_use]
    pub fn faces(&self) -> Faces<'_> {
        Faces::new(self.number_of_coord(), &self.coord_index)
    }

    /// `true` when every face has exactly three corners.
    ///
    /// Holds trivially for a face set without faces.
    #[must_use]
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces().iter().all(|face| face.len() == 3)
    }

    /// Append a vertex and return its index.
    pub fn push_vertex(&mut self, position: Point3<f64>) -> usize {
        self.coord
            .extend_from_slice(&[position.x, position.y, position.z]);
        self.number_of_coord() - 1
    }

    /// Append one normal triple.
    pub fn push_face_normal(&mut self, normal: Vector3<f64>) {
        self.normal.extend_from_slice(&[normal.x, normal.y, normal.z]);
    }

    /// Append a corner of the face currently being built.
    ///
    /// Returns the stored index, or `None` without appending anything when
    /// `vertex` does not fit the `i32` index stream.
    #[must_use = "a `None` means the corner was not appended"]
    pub fn push_corner(&mut self, vertex: usize) -> Option<i32> {
        let index = i32::try_from(vertex).ok()?;
        self.coord_index.push(index);
        Some(index)
    }

    /// Close the face currently being built.
    pub fn close_face(&mut self) {
        self.coord_index.push(FACE_SENTINEL);
    }

    /// Position of vertex `index`.
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<Point3<f64>> {
        triple(&self.coord, index).map(Point3::from)
    }

    /// Normal of face `face`, when normals are stored per face.
    #[must_use]
    pub fn face_normal(&self, face: usize) -> Option<Vector3<f64>> {
        if self.normal_per_vertex {
            return None;
        }
        triple(&self.normal, face)
    }

    /// Replace `normal` with one unit normal per face.
    ///
    /// Normals follow the right-hand rule over the first three corners.
    /// Degenerate faces, and faces referencing missing vertices, get a
    /// zero normal.
    pub fn compute_face_normals(&mut self) {
        let normals: Vec<Vector3<f64>> = {
            let faces = self.faces();
            (0..faces.number_of_faces())
                .map(|face| {
                    let corner = |c| faces.face_vertex(face, c).and_then(|v| self.vertex(v));
                    let normal = match (corner(0), corner(1), corner(2)) {
                        (Some(v0), Some(v1), Some(v2)) => {
                            (v1 - v0).cross(&(v2 - v0)).try_normalize(f64::EPSILON)
                        }
                        _ => None,
                    };
                    normal.unwrap_or_else(Vector3::zeros)
                })
                .collect()
        };

        self.normal.clear();
        self.normal_per_vertex = false;
        for n in normals {
            self.push_face_normal(n);
        }
    }
}

fn triple(values: &[f64], index: usize) -> Option<Vector3<f64>> {
    let start = index.checked_mul(3)?;
    let t = values.get(start..start + 3)?;
    Some(Vector3::new(t[0], t[1], t[2]))
}

impl MeshTopology for IndexedFaceSet {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.number_of_coord()
    }

    fn face_count(&self) -> usize {
        self.number_of_faces()
    }

    #[inline]
    fn normal_count(&self) -> usize {
        self.number_of_normal()
    }

    fn is_triangle_mesh(&self) -> bool {
        Self::is_triangle_mesh(self)
    }
}

/// Unit square in the XY plane as two triangles with per-face normals.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_square, MeshTopology};
///
/// let square = unit_square();
/// assert_eq!(square.vertex_count(), 4);
/// assert_eq!(square.face_count(), 2);
/// assert_eq!(square.normal_count(), 2);
/// ```
#[must_use]
pub fn unit_square() -> IndexedFaceSet {
    let mut ifs = IndexedFaceSet::with_name("square");
    ifs.coord = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0, 1.0, 0.0, //
        0.0, 1.0, 0.0,
    ];
    ifs.coord_index = vec![0, 1, 2, FACE_SENTINEL, 0, 2, 3, FACE_SENTINEL];
    ifs.compute_face_normals();
    ifs
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn new_face_set_is_empty() {
        let ifs = IndexedFaceSet::new();
        assert!(ifs.is_empty());
        assert!(ifs.name.is_empty());
        assert!(!ifs.normal_per_vertex);
        assert!(ifs.is_triangle_mesh());
    }

    #[test]
    fn push_builds_sentinel_stream() {
        let mut ifs = IndexedFaceSet::with_name("tri");
        for p in [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]] {
            let v = ifs.push_vertex(Point3::from(p));
            ifs.push_corner(v).unwrap();
        }
        ifs.close_face();
        ifs.push_face_normal(Vector3::new(0.0, 0.0, -1.0));

        assert_eq!(ifs.coord_index, vec![0, 1, 2, FACE_SENTINEL]);
        assert_eq!(ifs.number_of_coord(), 3);
        assert_eq!(ifs.number_of_normal(), 1);
        assert_eq!(ifs.face_normal(0), Some(Vector3::new(0.0, 0.0, -1.0)));
        assert_eq!(ifs.vertex(1), Some(Point3::new(0.0, 1.0, 0.0)));
        assert_eq!(ifs.vertex(3), None);
    }

    #[test]
    fn sentinel_count_matches_face_count() {
        let ifs = IndexedFaceSet::from_triangles(
            &[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            &[[0, 1, 2], [1, 3, 2], [0, 3, 1]],
        )
        .unwrap();
        let sentinels = ifs
            .coord_index
            .iter()
            .filter(|&&i| i == FACE_SENTINEL)
            .count();
        assert_eq!(sentinels, 3);
        assert_eq!(ifs.faces().number_of_faces(), 3);
    }

    #[test]
    fn quad_is_not_triangle_mesh() {
        let mut ifs = unit_square();
        assert!(ifs.is_triangle_mesh());
        ifs.coord_index = vec![0, 1, 2, 3, FACE_SENTINEL];
        assert!(!ifs.is_triangle_mesh());
    }

    #[test]
    fn computed_normals_follow_winding() {
        let square = unit_square();
        for face in 0..2 {
            let n = square.face_normal(face).unwrap_or_else(Vector3::zeros);
            assert_relative_eq!(n, Vector3::z(), epsilon = 1e-12);
        }
    }

    #[test]
    fn degenerate_face_gets_zero_normal() {
        let mut ifs = IndexedFaceSet::from_triangles(
            &[[0.0; 3], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]],
            &[[0, 1, 2]],
        )
        .unwrap();
        ifs.compute_face_normals();
        assert_eq!(ifs.face_normal(0), Some(Vector3::zeros()));
    }

    #[test]
    fn oversized_indices_are_refused() {
        let big = u32::try_from(i32::MAX).unwrap() + 1;
        assert!(IndexedFaceSet::from_triangles(&[[0.0; 3]], &[[0, 0, big]]).is_none());
        assert!(IndexedFaceSet::from_triangles(&[[0.0; 3]], &[[0, 0, u32::MAX]]).is_none());

        let mut ifs = IndexedFaceSet::new();
        assert_eq!(ifs.push_corner(7), Some(7));
        assert_eq!(ifs.push_corner(usize::MAX), None);
        assert_eq!(ifs.coord_index, vec![7]);
        assert!(!ifs.coord_index.contains(&FACE_SENTINEL));
    }

    #[test]
    fn per_vertex_normals_are_not_face_normals() {
        let mut ifs = unit_square();
        ifs.normal_per_vertex = true;
        assert_eq!(ifs.face_normal(0), None);
    }
}
