//! Traits for mesh types.

/// Trait for types that provide mesh topology information.
///
/// This is the shape-introspection surface exporters rely on: counts plus
/// the triangle-only predicate.
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces.
    fn face_count(&self) -> usize;

    /// Get the number of stored normals.
    fn normal_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Check if every face is a triangle.
    fn is_triangle_mesh(&self) -> bool;
}
