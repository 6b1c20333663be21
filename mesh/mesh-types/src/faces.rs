//! Face view over a sentinel-delimited index stream.

use crate::mesh::FACE_SENTINEL;

/// Read-only face table built from a flat `coord_index` stream.
///
/// The stream stores, per face, the vertex indices of its corners followed
/// by [`FACE_SENTINEL`]. `Faces` records where each face starts so corners
/// can be looked up by `(face, corner)` without rescanning the stream.
///
/// A trailing group without a closing sentinel still counts as a face.
///
/// # Example
///
/// ```
/// use mesh_types::Faces;
///
/// let faces = Faces::new(4, &[0, 1, 2, -1, 2, 1, 3, -1]);
/// assert_eq!(faces.number_of_faces(), 2);
/// assert_eq!(faces.face_vertex(1, 2), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct Faces<'a> {
    vertex_count: usize,
    coord_index: &'a [i32],
    /// `(start, len)` of every face in `coord_index`.
    spans: Vec<(usize, usize)>,
}

impl<'a> Faces<'a> {
    /// Build the face table for `coord_index` over `vertex_count` vertices.
    #[must_use]
    pub fn new(vertex_count: usize, coord_index: &'a [i32]) -> Self {
        let mut spans = Vec::new();
        let mut start = 0;

        for (pos, &index) in coord_index.iter().enumerate() {
            if index == FACE_SENTINEL {
                spans.push((start, pos - start));
                start = pos + 1;
            }
        }
        if start < coord_index.len() {
            spans.push((start, coord_index.len() - start));
        }

        Self {
            vertex_count,
            coord_index,
            spans,
        }
    }

    /// Number of vertices the indices are checked against.
    #[inline]
    #[must_use]
    pub const fn number_of_vertices(&self) -> usize {
        self.vertex_count
    }

    /// Number of faces in the stream.
    #[inline]
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.spans.len()
    }

    /// Number of corners of `face`.
    #[must_use]
    pub fn face_size(&self, face: usize) -> Option<usize> {
        self.spans.get(face).map(|&(_, len)| len)
    }

    /// Position of the first corner of `face` in the flat stream.
    #[must_use]
    pub fn face_first_corner(&self, face: usize) -> Option<usize> {
        self.spans.get(face).map(|&(start, _)| start)
    }

    /// Raw corner indices of `face`, sentinel excluded.
    #[must_use]
    pub fn face(&self, face: usize) -> Option<&'a [i32]> {
        let index = self.coord_index;
        self.spans
            .get(face)
            .map(move |&(start, len)| &index[start..start + len])
    }

    /// Vertex index stored at `corner` of `face`.
    ///
    /// Returns `None` when the face or corner does not exist, or when the
    /// stored index is not a valid vertex of this mesh.
    #[must_use]
    pub fn face_vertex(&self, face: usize, corner: usize) -> Option<usize> {
        let raw = *self.face(face)?.get(corner)?;
        usize::try_from(raw)
            .ok()
            .filter(|&index| index < self.vertex_count)
    }

    /// Iterate over the corner index slices of all faces.
    pub fn iter(&self) -> impl Iterator<Item = &'a [i32]> + '_ {
        let index = self.coord_index;
        self.spans
            .iter()
            .map(move |&(start, len)| &index[start..start + len])
    }
}
