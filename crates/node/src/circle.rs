use crate::fields::{number_f32, numbers, required, skip_unrecognized};
use crate::{Decoder, NodeVariant};
use glam::Vec4;
use weft_core::{normalize_color, Color, DecodeError, Mapping, Value};

/// Missing center components are taken from here.
const DEFAULT_CENTER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    /// Homogeneous center position.
    pub center: Vec4,
    pub radius: f32,
    /// Fill color. Opaque white when not given.
    pub color: Color,
}

impl Circle {
    pub fn new(center: Vec4, radius: f32) -> Self {
        Self {
            center,
            radius,
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl NodeVariant for Circle {
    const CLASS: &'static str = "Circle";

    fn decode(map: &Mapping, _decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        skip_unrecognized(map, Self::CLASS, &["center", "radius", "color"]);

        let center = numbers(
            required(map, Self::CLASS, "center")?,
            "center",
            2,
            DEFAULT_CENTER,
        )?;
        let radius = number_f32(required(map, Self::CLASS, "radius")?, "radius")?;
        let color = normalize_color(map.get("color"), Color::WHITE)
            .map_err(|e| e.in_field(Self::CLASS, "color"))?;

        Ok(Self {
            center: Vec4::from_array(center),
            radius,
            color,
        })
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("center".into(), Value::floats(&self.center.to_array()));
        map.insert("radius".into(), Value::from(self.radius));
        map.insert("color".into(), self.color.encode());
    }
}
