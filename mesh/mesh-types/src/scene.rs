//! Minimal scene graph holding shapes and their geometry.
//!
//! Only the structure needed to carry a mesh in and out of a file lives
//! here: a list of top-level nodes, shapes with an optional appearance,
//! and the geometry attached to each shape.

use crate::IndexedFaceSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Surface material of a shape.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Material {
    /// Diffuse RGB color in `[0, 1]`.
    pub diffuse_color: [f32; 3],
    /// Ambient intensity in `[0, 1]`.
    pub ambient_intensity: f32,
    /// Transparency in `[0, 1]`, 0 being opaque.
    pub transparency: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: [0.8, 0.8, 0.8],
            ambient_intensity: 0.2,
            transparency: 0.0,
        }
    }
}

/// Appearance of a shape.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Appearance {
    /// Material, if any.
    pub material: Option<Material>,
}

/// Geometry attached to a [`Shape`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Geometry {
    /// Polygon mesh.
    IndexedFaceSet(IndexedFaceSet),
    /// Polyline set: flat coordinates and sentinel-delimited polylines.
    IndexedLineSet {
        /// Vertex coordinates, grouped in triples.
        coord: Vec<f64>,
        /// Sentinel-delimited vertex indices.
        coord_index: Vec<i32>,
    },
}

impl Geometry {
    /// The face set, if this geometry is one.
    #[must_use]
    pub const fn as_indexed_face_set(&self) -> Option<&IndexedFaceSet> {
        match self {
            Self::IndexedFaceSet(ifs) => Some(ifs),
            Self::IndexedLineSet { .. } => None,
        }
    }
}

/// A named shape: geometry plus appearance.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shape {
    /// Display name.
    pub name: String,
    /// Appearance, if any.
    pub appearance: Option<Appearance>,
    /// Geometry, if any.
    pub geometry: Option<Geometry>,
}

impl Shape {
    /// Shape with a default material around `ifs`, named after it.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{IndexedFaceSet, Shape};
    ///
    /// let shape = Shape::from_face_set(IndexedFaceSet::with_name("part"));
    /// assert_eq!(shape.name, "part");
    /// assert!(shape.indexed_face_set().is_some());
    /// ```
    #[must_use]
    pub fn from_face_set(ifs: IndexedFaceSet) -> Self {
        Self {
            name: ifs.name.clone(),
            appearance: Some(Appearance {
                material: Some(Material::default()),
            }),
            geometry: Some(Geometry::IndexedFaceSet(ifs)),
        }
    }

    /// The face set geometry, if the shape has one.
    #[must_use]
    pub fn indexed_face_set(&self) -> Option<&IndexedFaceSet> {
        self.geometry.as_ref()?.as_indexed_face_set()
    }
}

/// Top-level scene node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Node {
    /// A shape.
    Shape(Shape),
    /// A grouping node with children.
    Group(Vec<Node>),
}

impl Node {
    /// The shape, if this node is one.
    #[must_use]
    pub const fn as_shape(&self) -> Option<&Shape> {
        match self {
            Self::Shape(shape) => Some(shape),
            Self::Group(_) => None,
        }
    }
}

/// Root of a scene: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneGraph {
    /// Top-level nodes.
    pub children: Vec<Node>,
    /// Location the scene was loaded from, empty if none.
    pub url: String,
}

impl SceneGraph {
    /// Create an empty scene.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
            url: String::new(),
        }
    }

    /// Scene holding a single shape built from `ifs`.
    #[must_use]
    pub fn from_face_set(ifs: IndexedFaceSet) -> Self {
        Self {
            children: vec![Node::Shape(Shape::from_face_set(ifs))],
            url: String::new(),
        }
    }

    /// Append a top-level node.
    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn number_of_children(&self) -> usize {
        self.children.len()
    }
}
