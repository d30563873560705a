//! Typed scene graph for Weft scene descriptions.
//!
//! A scene file is parsed elsewhere into a generic [`Value`] tree. This crate
//! turns that tree into typed nodes ([`decode_scene`]) and back
//! ([`Node::encode`], [`NodeVariant::encode`]).
//!
//! ```
//! use node::decode_scene;
//! use weft_core::Value;
//!
//! let value: Value = serde_json::from_str(r##"{
//!     "__class__": "Scene",
//!     "canvas": {"extents": [640, 480], "color": "#000"},
//!     "top": {"__class__": "Group", "children": [
//!         {"__class__": "Circle", "center": [320, 240], "radius": 50, "color": "#f00"}
//!     ]}
//! }"##).unwrap();
//!
//! let scene = decode_scene(&value).unwrap();
//! assert_eq!(scene.node_count(), 2);
//! ```

mod circle;
mod decoder;
mod fields;
mod group;
mod mesh;
mod node;
mod path;
pub mod registry;
mod scene;

pub use circle::Circle;
pub use decoder::{Decoded, Decoder};
pub use group::Group;
pub use mesh::MicropolygonMesh;
pub use node::{Node, NodeVariant};
pub use path::{ConvexPolygon, CubicHermitePath, LinePath};
pub use registry::{Constructor, Registry, RegistryError};
pub use scene::{Canvas, Scene};

pub use weft_core::{DecodeError, Value};

/// Decode a scene with the built-in node variants.
pub fn decode_scene(value: &Value) -> Result<Scene, DecodeError> {
    Decoder::new(Registry::global()).decode_scene(value)
}
