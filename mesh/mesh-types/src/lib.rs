//! Core mesh types for the STL interchange crates.
//!
//! This crate provides the in-memory side of mesh import and export:
//!
//! - [`IndexedFaceSet`] - Flat coordinate, normal, and sentinel-delimited
//!   index buffers
//! - [`Faces`] - `(face, corner)` lookups over the sentinel-delimited stream
//! - [`SceneGraph`] - Top-level nodes holding [`Shape`]s and their geometry
//! - [`MeshTopology`] - Counts and the triangle-only predicate
//!
//! # Index Encoding
//!
//! Faces are stored as one flat `Vec<i32>`. Each face lists its corner
//! vertex indices and ends with [`FACE_SENTINEL`] (`-1`):
//!
//! ```text
//! coord_index = [0, 1, 2, -1, 2, 1, 3, -1]
//!                \_ face 0 _/ \_ face 1 _/
//! ```
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedFaceSet, MeshTopology};
//!
//! let mut ifs = IndexedFaceSet::from_triangles(
//!     &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     &[[0, 1, 2]],
//! )
//! .unwrap();
//! ifs.compute_face_normals();
//!
//! assert_eq!(ifs.face_count(), 1);
//! assert_eq!(ifs.normal_count(), 1);
//! assert!(ifs.is_triangle_mesh());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod faces;
mod mesh;
mod scene;
mod traits;

pub use faces::Faces;
pub use mesh::{FACE_SENTINEL, IndexedFaceSet, unit_square};
pub use scene::{Appearance, Geometry, Material, Node, SceneGraph, Shape};
pub use traits::MeshTopology;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
