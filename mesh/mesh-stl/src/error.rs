//! Error types for STL import and export.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL operations.
pub type StlResult<T> = Result<T, StlError>;

/// Errors that can occur while reading or writing STL.
#[derive(Debug, Error)]
pub enum StlError {
    /// A keyword or other structural token was not the one required.
    #[error("line {line}: expecting {expected}, found \"{found}\"")]
    UnexpectedToken {
        /// What the grammar required at this position.
        expected: String,
        /// The token actually read.
        found: String,
        /// 1-based line of the offending token.
        line: usize,
    },

    /// Input ended before the grammar was complete.
    #[error("line {line}: expecting {expected}, found end of file")]
    UnexpectedEof {
        /// What the grammar required at this position.
        expected: String,
        /// 1-based line where input ended.
        line: usize,
    },

    /// A token could not be parsed as a number.
    #[error("line {line}: expecting number for {what}, found \"{found}\"")]
    InvalidNumber {
        /// Which value was being read, e.g. `"normal"` or `"vertex"`.
        what: &'static str,
        /// The token actually read.
        found: String,
        /// 1-based line of the offending token.
        line: usize,
    },

    /// More vertices than the `i32` index stream can address.
    #[error("line {line}: {count} vertices exceed the index range")]
    TooManyVertices {
        /// Vertex count reached.
        count: usize,
        /// 1-based line of the vertex that overflowed.
        line: usize,
    },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The mesh or scene cannot be written as STL.
    #[error("export declined: {0}")]
    Declined(#[from] ExportDeclined),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StlError {
    /// `true` for grammar and number errors raised while parsing.
    #[must_use]
    pub const fn is_grammar(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedToken { .. } | Self::UnexpectedEof { .. } | Self::InvalidNumber { .. }
        )
    }

    /// `true` when an export precondition was not met.
    #[must_use]
    pub const fn is_declined(&self) -> bool {
        matches!(self, Self::Declined(_))
    }

    /// Line the parse error was raised on.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEof { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::TooManyVertices { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Reasons an export is declined before any output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportDeclined {
    /// The scene does not hold exactly one top-level node.
    #[error("scene must have exactly one top-level node, found {0}")]
    NodeCount(usize),

    /// The top-level node is not a shape.
    #[error("top-level node is not a shape")]
    NotAShape,

    /// The shape's geometry is missing or not an indexed face set.
    #[error("shape geometry is not an indexed face set")]
    NotAFaceSet,

    /// Normals are stored per vertex rather than per face.
    #[error("normals are stored per vertex, STL needs one normal per face")]
    NormalPerVertex,

    /// A face is not a triangle.
    #[error("face {face} has {corners} corners, STL needs triangles")]
    NotTriangleMesh {
        /// Index of the first offending face.
        face: usize,
        /// Its corner count.
        corners: usize,
    },

    /// Normal and face counts differ.
    #[error("mesh has {normals} face normals for {faces} faces")]
    NormalCountMismatch {
        /// Number of normal triples.
        normals: usize,
        /// Number of faces.
        faces: usize,
    },

    /// A corner references a vertex that does not exist.
    #[error("face {face} references vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Index of the offending face.
        face: usize,
        /// The stored index.
        index: i32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}
