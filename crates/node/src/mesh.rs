use crate::fields::{fallback_color, required, skip_unrecognized};
use crate::{Decoder, NodeVariant};
use weft_core::{normalize_vertices, DecodeError, Mapping, Vertices};

/// A mesh of micropolygons, given either as a flat vertex list or as a
/// rows x cols grid. The nesting of the input decides which.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MicropolygonMesh {
    pub vertices: Vertices,
}

impl MicropolygonMesh {
    pub fn new(vertices: Vertices) -> Self {
        Self { vertices }
    }
}

impl NodeVariant for MicropolygonMesh {
    const CLASS: &'static str = "MicropolygonMesh";

    fn decode(map: &Mapping, _decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        skip_unrecognized(map, Self::CLASS, &["vertices", "color"]);
        let fallback = fallback_color(map, Self::CLASS)?;
        let vertices = normalize_vertices(required(map, Self::CLASS, "vertices")?, fallback)
            .map_err(|e| e.in_field(Self::CLASS, "vertices"))?;
        Ok(Self { vertices })
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("vertices".into(), self.vertices.encode());
    }
}
