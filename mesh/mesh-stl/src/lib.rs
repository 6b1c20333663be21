//! ASCII STL import and export for indexed face sets.
//!
//! This crate moves triangle meshes between ASCII STL text and the flat
//! buffers of [`mesh_types::IndexedFaceSet`]:
//!
//! - **Import** drives a [`Tokenizer`] through the STL grammar and builds
//!   coordinates, per-face normals, and a sentinel-delimited index stream.
//! - **Export** checks that the face set is a triangle mesh with one
//!   normal per face, then writes every facet through a
//!   [`mesh_types::Faces`] view.
//!
//! Binary STL is not supported.
//!
//! # Example
//!
//! ```no_run
//! use mesh_stl::{load_stl, save_stl};
//!
//! // Load a mesh
//! let scene = load_stl("model.stl").unwrap();
//!
//! // Save it back
//! save_stl(&scene, "output.stl").unwrap();
//! ```
//!
//! # Precision
//!
//! Numbers are written in fixed notation with
//! [`STL_DECIMAL_PRECISION`] fractional digits, so a round trip is exact
//! only to that precision.
//!
//! # Failure
//!
//! Import either returns a complete face set or an [`StlError`] naming the
//! offending token, expectation, and line. Export preconditions are
//! checked before any output; a failed check is reported as
//! [`StlError::Declined`] and no file is created.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod params;
mod reader;
mod tokenizer;
mod writer;

pub use error::{ExportDeclined, StlError, StlResult};
pub use params::StlParams;
pub use reader::{load_stl, load_stl_with_params, read_stl, read_stl_str};
pub use tokenizer::Tokenizer;
pub use writer::{
    STL_DECIMAL_PRECISION, display_name_from_path, save_stl, save_stl_mesh, to_stl_string,
    validate_face_set, validate_scene, write_stl,
};
