//! Weft Interchange Format
//!
//! Scene files on disk are YAML or JSON documents. The text is parsed into
//! the generic [`Value`] tree, which the node crate then types. Files are
//! told apart by extension: `.yaml` and `.yml` are YAML, anything else is
//! JSON.
//!
//! # Document Format
//!
//! ```yaml
//! __class__: Scene
//! canvas:
//!   extents: [640, 480]
//!   color: "#202020"
//! top:
//!   __class__: Group
//!   children:
//!     - {__class__: Circle, center: [320, 240], radius: 50, color: [255, 0, 0]}
//!     - {__class__: LinePath, vertices: [[0, 0], [640, 480]]}
//! ```
//!
//! Writing a scene always produces the canonical form: colors as four float
//! channels, vertices widened to eight components, unrecognized keys gone.

use node::{decode_scene, NodeVariant, Scene};
use std::fs;
use std::path::Path;
use thiserror::Error;
use weft_core::{DecodeError, Value};

/// Error type for interchange operations.
#[derive(Debug, Error)]
pub enum InterchangeError {
    #[error("failed to access scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON scene: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed YAML scene: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("scene could not be decoded: {0}")]
    Decode(#[from] DecodeError),
}

/// Text encoding of a scene file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }
}

/// Parse scene text into the generic tree, without typing it.
pub fn parse_value(input: &str, format: Format) -> Result<Value, InterchangeError> {
    let value = match format {
        Format::Json => serde_json::from_str(input)?,
        Format::Yaml => serde_yaml::from_str(input)?,
    };
    Ok(value)
}

/// Parse and decode scene text.
pub fn parse_scene(input: &str, format: Format) -> Result<Scene, InterchangeError> {
    let value = parse_value(input, format)?;
    Ok(decode_scene(&value)?)
}

/// Read and decode the scene file at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, InterchangeError> {
    let path = path.as_ref();
    let format = Format::from_path(path);
    log::debug!("loading {format:?} scene from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_scene(&text, format)
}

/// Encode `scene` to its canonical text form. `pretty` only affects JSON;
/// YAML output is always block style.
pub fn scene_to_string(
    scene: &Scene,
    format: Format,
    pretty: bool,
) -> Result<String, InterchangeError> {
    let value = Value::Mapping(scene.encode());
    let text = match format {
        Format::Json if pretty => serde_json::to_string_pretty(&value)?,
        Format::Json => serde_json::to_string(&value)?,
        Format::Yaml => serde_yaml::to_string(&value)?,
    };
    Ok(text)
}

/// Write `scene` to `path` in canonical form, in the format its extension
/// names. JSON is pretty-printed.
pub fn save_scene(path: impl AsRef<Path>, scene: &Scene) -> Result<(), InterchangeError> {
    let path = path.as_ref();
    let mut text = scene_to_string(scene, Format::from_path(path), true)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    fs::write(path, text)?;
    log::debug!("saved scene to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use node::{Canvas, Circle, Group};
    use weft_core::Color;

    const SIMPLE: &str = r##"{
        "__class__": "Scene",
        "canvas": {"extents": [100, 50], "color": "#000"},
        "top": {"__class__": "Group", "children": [
            {"__class__": "Circle", "center": [10, 10], "radius": 5}
        ]}
    }"##;

    const SIMPLE_YAML: &str = r##"
__class__: Scene
canvas:
  extents: [100, 50]
  color: "#000"
top:
  __class__: Group
  children:
    - __class__: Circle
      center: [10, 10]
      radius: 5
"##;

    #[test]
    fn test_parse_scene() {
        let scene = parse_scene(SIMPLE, Format::Json).unwrap();
        assert_eq!(scene.canvas.extents, [100.0, 50.0]);
        assert_eq!(scene.canvas.color, Color::BLACK);
        assert_eq!(scene.top.children.len(), 1);
    }

    #[test]
    fn test_yaml_matches_json() {
        let from_yaml = parse_scene(SIMPLE_YAML, Format::Yaml).unwrap();
        assert_eq!(from_yaml, parse_scene(SIMPLE, Format::Json).unwrap());
    }

    #[test]
    fn test_yaml_keeps_integer_vs_float() {
        let value = parse_value("[1, 1.0, ~, true, x]", Format::Yaml).unwrap();
        assert_eq!(
            value,
            Value::Sequence(vec![
                Value::Integer(1),
                Value::Float(1.0),
                Value::Null,
                Value::Bool(true),
                Value::from("x"),
            ])
        );
    }

    #[test]
    fn test_roundtrip() {
        let scene = parse_scene(SIMPLE, Format::Json).unwrap();
        for (format, pretty) in [
            (Format::Json, true),
            (Format::Json, false),
            (Format::Yaml, true),
        ] {
            let text = scene_to_string(&scene, format, pretty).unwrap();
            assert_eq!(parse_scene(&text, format).unwrap(), scene, "{format:?}");
        }
    }

    #[test]
    fn test_compact_is_single_line() {
        let scene = Scene::new(
            Canvas::new(1.0, 1.0),
            Group::new().with_child(Circle::new(Vec4::W, 1.0)),
        );
        let text = scene_to_string(&scene, Format::Json, false).unwrap();
        assert!(!text.contains('\n'));
        assert!(text.contains("\"__class__\":\"Circle\""));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("scene.yaml"), Format::Yaml);
        assert_eq!(Format::from_path("dir/scene.YML"), Format::Yaml);
        assert_eq!(Format::from_path("scene.json"), Format::Json);
        assert_eq!(Format::from_path("scene"), Format::Json);
    }

    #[test]
    fn test_malformed_text() {
        let err = parse_scene("{\"__class__\": ", Format::Json).unwrap_err();
        assert!(matches!(err, InterchangeError::Json(_)));

        let err = parse_scene("top: [unclosed", Format::Yaml).unwrap_err();
        assert!(matches!(err, InterchangeError::Yaml(_)));
    }

    #[test]
    fn test_decode_error_is_kept() {
        let err = parse_scene("__class__: Blob", Format::Yaml).unwrap_err();
        match err {
            InterchangeError::Decode(inner) => {
                assert_eq!(inner, DecodeError::UnknownVariant("Blob".into()))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_scene("/nonexistent/weft/scene.json").unwrap_err();
        assert!(matches!(err, InterchangeError::Io(_)));
    }
}
