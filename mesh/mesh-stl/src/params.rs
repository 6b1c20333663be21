//! Import parameters and presets.

/// Parameters for reading ASCII STL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StlParams {
    /// Reject facets whose loop does not hold exactly three vertices.
    ///
    /// When `false`, any loop with at least three vertices is accepted and
    /// stored as a polygon face.
    pub require_triangles: bool,

    /// Ignore whatever follows the `endsolid` line.
    ///
    /// When `false`, any token after `endsolid <name>` is an error.
    pub ignore_trailing_content: bool,
}

impl Default for StlParams {
    fn default() -> Self {
        Self {
            require_triangles: true,
            ignore_trailing_content: true,
        }
    }
}

impl StlParams {
    /// Accept exactly one solid of triangles and nothing after it.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            require_triangles: true,
            ignore_trailing_content: false,
        }
    }

    /// Accept polygon loops and trailing content.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            require_triangles: false,
            ignore_trailing_content: true,
        }
    }

    /// Set whether loops must be triangles.
    #[must_use]
    pub const fn with_require_triangles(mut self, require: bool) -> Self {
        self.require_triangles = require;
        self
    }

    /// Set whether content after `endsolid` is ignored.
    #[must_use]
    pub const fn with_ignore_trailing_content(mut self, ignore: bool) -> Self {
        self.ignore_trailing_content = ignore;
        self
    }
}
