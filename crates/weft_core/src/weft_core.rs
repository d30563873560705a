//! # Core data types for Weft scene descriptions
//!
//! This crate holds everything the scene decoder needs that is not a node:
//! the generic tree [`Value`] exchanged with text parsers, the color and
//! vertex normalizers, homogeneous transformations, and the shared
//! [`DecodeError`] taxonomy.

pub mod color;
pub mod error;
pub mod transform;
pub mod value;
pub mod vertex;

pub use color::{normalize_color, Color};
pub use error::DecodeError;
pub use transform::Transformation;
pub use value::{Mapping, Value, DISCRIMINATOR};
pub use vertex::{normalize_vertex_list, normalize_vertices, Vertex, VertexGrid, Vertices};
