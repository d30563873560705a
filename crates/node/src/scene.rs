use crate::fields::{number, required, skip_unrecognized};
use crate::{Decoded, Decoder, Group, Node, NodeVariant};
use weft_core::{normalize_color, Color, DecodeError, Mapping, Value};

/// Output surface settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    /// Width and height.
    pub extents: [f64; 2],
    /// Background color. Opaque white when not given.
    pub color: Color,
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            extents: [width, height],
            color: Color::WHITE,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(&self) -> f64 {
        self.extents[0]
    }

    pub fn height(&self) -> f64 {
        self.extents[1]
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let map = value.as_mapping().ok_or_else(|| DecodeError::InvalidField {
            field: "canvas",
            expected: "a mapping",
            found: value.kind().to_string(),
        })?;
        skip_unrecognized(map, "Canvas", &["extents", "color"]);

        let extents = match map.get("extents") {
            None | Some(Value::Null) => {
                return Err(DecodeError::MissingField {
                    variant: Scene::CLASS,
                    field: "canvas.extents",
                })
            }
            Some(Value::Sequence(items)) if items.len() == 2 => [
                number(&items[0], "canvas.extents")?,
                number(&items[1], "canvas.extents")?,
            ],
            Some(other) => {
                return Err(DecodeError::InvalidField {
                    field: "canvas.extents",
                    expected: "2 numbers",
                    found: other.to_string(),
                })
            }
        };

        let color = normalize_color(map.get("color"), Color::WHITE)
            .map_err(|e| e.in_field(Scene::CLASS, "canvas.color"))?;

        Ok(Self { extents, color })
    }

    fn encode(&self) -> Value {
        let mut map = Mapping::new();
        map.insert(
            "extents".into(),
            Value::Sequence(self.extents.iter().map(|v| Value::number(*v)).collect()),
        );
        map.insert("color".into(), self.color.encode());
        Value::Mapping(map)
    }
}

/// Root of a scene description: a canvas and exactly one top-level group.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas: Canvas,
    pub top: Group,
}

impl Scene {
    pub fn new(canvas: Canvas, top: Group) -> Self {
        Self { canvas, top }
    }

    /// Number of nodes below the scene, the top group included.
    pub fn node_count(&self) -> usize {
        1 + self.top.descendant_count()
    }
}

impl NodeVariant for Scene {
    const CLASS: &'static str = "Scene";

    fn decode(map: &Mapping, decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        skip_unrecognized(map, Self::CLASS, &["canvas", "top"]);

        let canvas = Canvas::decode(required(map, Self::CLASS, "canvas")?)?;

        let top = decoder
            .decode(required(map, Self::CLASS, "top")?)
            .map_err(|e| e.in_field(Self::CLASS, "top"))?;
        let top = match top {
            Decoded::Node(Node::Group(group)) => group,
            other => {
                return Err(DecodeError::InvalidField {
                    field: "top",
                    expected: "a Group node",
                    found: other.describe(),
                })
            }
        };

        Ok(Self { canvas, top })
    }

    fn encode_fields(&self, map: &mut Mapping) {
        map.insert("canvas".into(), self.canvas.encode());
        map.insert("top".into(), Value::Mapping(self.top.encode()));
    }
}
