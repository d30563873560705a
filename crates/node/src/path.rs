//! Primitives made of a flat vertex list.
//!
//! The three variants share their field layout: `vertices` (required) and
//! `color` (optional fallback for vertices without one). Only the vertices
//! are written back, since every vertex carries its own color once decoded.

use crate::fields::{fallback_color, required, skip_unrecognized};
use crate::{Decoder, NodeVariant};
use weft_core::vertex::encode_vertex_list;
use weft_core::{normalize_vertex_list, DecodeError, Mapping, Vertex};

const FIELDS: &[&str] = &["vertices", "color"];

fn decode_vertex_list(map: &Mapping, variant: &'static str) -> Result<Vec<Vertex>, DecodeError> {
    skip_unrecognized(map, variant, FIELDS);
    let fallback = fallback_color(map, variant)?;
    normalize_vertex_list(required(map, variant, "vertices")?, fallback)
        .map_err(|e| e.in_field(variant, "vertices"))
}

/// A filled convex polygon. Convexity is not checked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexPolygon {
    pub vertices: Vec<Vertex>,
}

impl ConvexPolygon {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }
}

impl NodeVariant for ConvexPolygon {
    const CLASS: &'static str = "ConvexPolygon";

    fn decode(map: &Mapping, _decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decode_vertex_list(map, Self::CLASS).map(Self::new)
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("vertices".into(), encode_vertex_list(&self.vertices));
    }
}

/// An open polyline through its vertices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePath {
    pub vertices: Vec<Vertex>,
}

impl LinePath {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }
}

impl NodeVariant for LinePath {
    const CLASS: &'static str = "LinePath";

    fn decode(map: &Mapping, _decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decode_vertex_list(map, Self::CLASS).map(Self::new)
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("vertices".into(), encode_vertex_list(&self.vertices));
    }
}

/// A cubic Hermite spline. How control points and tangents alternate is up
/// to the consumer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CubicHermitePath {
    pub vertices: Vec<Vertex>,
}

impl CubicHermitePath {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self { vertices }
    }
}

impl NodeVariant for CubicHermitePath {
    const CLASS: &'static str = "CubicHermitePath";

    fn decode(map: &Mapping, _decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        decode_vertex_list(map, Self::CLASS).map(Self::new)
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("vertices".into(), encode_vertex_list(&self.vertices));
    }
}
