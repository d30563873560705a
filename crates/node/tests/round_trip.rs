use node::{decode_scene, DecodeError, Group, Node, NodeVariant};
use weft_core::{Color, Value, Vertices};

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

/// Three levels of groups, one of them transformed, holding every primitive.
const SCENE: &str = r##"{
    "__class__": "Scene",
    "canvas": {"extents": [800, 600], "color": [32, 32, 32]},
    "comment": "dropped on encode",
    "top": {
        "__class__": "Group",
        "children": [
            {"__class__": "Circle", "center": [400, 300], "radius": 120, "color": "#ffcc00"},
            {
                "__class__": "Group",
                "transformation": [
                    1, 0, 0, 10,
                    0, 1, 0, 20,
                    0, 0, 1, 0,
                    0, 0, 0, 1
                ],
                "children": [
                    {"__class__": "ConvexPolygon", "vertices": [[0, 0], [100, 0], [50, 80]], "color": "#0f0"},
                    {
                        "__class__": "Group",
                        "children": [
                            {"__class__": "LinePath", "vertices": [[0, 0, 0], [10, 10, 0]]},
                            {"__class__": "CubicHermitePath", "vertices": [
                                [0, 0, 0, 1, 1, 0, 0, 1],
                                [5, 5, 0, 1, 0, 1, 0, 1]
                            ]},
                            {"__class__": "MicropolygonMesh", "color": [0.5, 0.5, 1.0], "vertices": [
                                [[0, 0], [1, 0], [2, 0]],
                                [[0, 1], [1, 1], [2, 1]]
                            ]}
                        ]
                    }
                ]
            }
        ]
    }
}"##;

fn find<'a>(group: &'a Group, class: &str) -> Option<&'a Node> {
    group.children.iter().find_map(|child| {
        if child.class_name() == class {
            Some(child)
        } else {
            child.as_group().and_then(|inner| find(inner, class))
        }
    })
}

#[test]
fn decode_encode_decode_is_stable() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    assert_eq!(scene.node_count(), 8);

    let encoded = Value::Mapping(scene.encode());
    let again = decode_scene(&encoded).unwrap();
    assert_eq!(again, scene);

    // and the canonical form is a fixed point
    assert_eq!(Value::Mapping(again.encode()), encoded);
}

#[test]
fn encode_survives_text_serialization() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    let text = serde_json::to_string(&Value::Mapping(scene.encode())).unwrap();
    assert_eq!(decode_scene(&parse(&text)).unwrap(), scene);
}

#[test]
fn unrecognized_fields_are_dropped() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    let encoded = scene.encode();
    assert!(!encoded.contains_key("comment"));
    assert_eq!(encoded["__class__"], Value::from("Scene"));
}

#[test]
fn absent_transformation_round_trips_as_absent() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    assert!(scene.top.transformation.is_none());

    let encoded = scene.top.encode();
    assert!(!encoded.contains_key("transformation"));

    let inner = scene.top.children[1].as_group().unwrap();
    assert!(inner.transformation.is_some());
    assert!(inner.children[1].as_group().unwrap().transformation.is_none());
}

#[test]
fn canvas_defaults_and_encoding() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    assert_eq!(scene.canvas.extents, [800.0, 600.0]);
    assert_eq!(scene.canvas.color, Color::from_rgba8(32, 32, 32, 255));

    let canvas = scene.encode()["canvas"].clone();
    assert_eq!(
        canvas.as_mapping().unwrap()["extents"],
        Value::Sequence(vec![Value::Integer(800), Value::Integer(600)])
    );

    let minimal = decode_scene(&parse(
        r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]}, "top": {"__class__": "Group"}}"#,
    ))
    .unwrap();
    assert_eq!(minimal.canvas.color, Color::WHITE);
    assert!(minimal.top.children.is_empty());
}

#[test]
fn vertex_colors_follow_node_fallback() {
    let scene = decode_scene(&parse(SCENE)).unwrap();

    let Some(Node::ConvexPolygon(polygon)) = find(&scene.top, "ConvexPolygon") else {
        panic!("missing polygon");
    };
    assert!(polygon
        .vertices
        .iter()
        .all(|v| v.color() == Color::rgb(0.0, 1.0, 0.0)));

    let Some(Node::LinePath(path)) = find(&scene.top, "LinePath") else {
        panic!("missing line path");
    };
    assert!(path.vertices.iter().all(|v| v.color() == Color::BLACK));

    let Some(Node::CubicHermitePath(hermite)) = find(&scene.top, "CubicHermitePath") else {
        panic!("missing hermite path");
    };
    assert_eq!(hermite.vertices[1].color(), Color::rgb(0.0, 1.0, 0.0));
}

#[test]
fn mesh_grid_keeps_its_shape() {
    let scene = decode_scene(&parse(SCENE)).unwrap();
    let Some(Node::MicropolygonMesh(mesh)) = find(&scene.top, "MicropolygonMesh") else {
        panic!("missing mesh");
    };
    let Vertices::Grid(grid) = &mesh.vertices else {
        panic!("mesh was flattened");
    };
    assert_eq!((grid.rows(), grid.cols()), (2, 3));
    assert_eq!(grid.len(), 6);
    assert_eq!(grid.get(0, 0).unwrap().color(), Color::rgb(0.5, 0.5, 1.0));
}

#[test]
fn unknown_variant_anywhere_fails_the_whole_decode() {
    let value = parse(
        r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]}, "top": {
            "__class__": "Group", "children": [
                {"__class__": "Circle", "center": [0, 0], "radius": 1},
                {"__class__": "Teapot"}
            ]}}"#,
    );
    let err = decode_scene(&value).unwrap_err();
    assert_eq!(err.root_cause(), &DecodeError::UnknownVariant("Teapot".into()));
}

#[test]
fn inconsistent_vertex_widths_fail() {
    let value = parse(
        r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]}, "top": {
            "__class__": "Group", "children": [
                {"__class__": "ConvexPolygon", "vertices": [[0, 0], [0, 0, 0, 1, 1, 1, 1, 1]]}
            ]}}"#,
    );
    let err = decode_scene(&value).unwrap_err();
    let DecodeError::InvalidVertexShape(message) = err.root_cause() else {
        panic!("expected InvalidVertexShape, got {err}");
    };
    assert!(message.contains("vertex 1"), "{message}");
}

#[test]
fn missing_required_fields() {
    let err = decode_scene(&parse(r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]}}"#))
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingField {
            variant: "Scene",
            field: "top"
        }
    );

    let err = decode_scene(&parse(
        r#"{"__class__": "Scene", "canvas": {}, "top": {"__class__": "Group"}}"#,
    ))
    .unwrap_err();
    assert_eq!(
        err,
        DecodeError::MissingField {
            variant: "Scene",
            field: "canvas.extents"
        }
    );
}

#[test]
fn top_must_be_a_group() {
    let err = decode_scene(&parse(
        r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]},
            "top": {"__class__": "Circle", "center": [0, 0], "radius": 1}}"#,
    ))
    .unwrap_err();
    assert!(matches!(err, DecodeError::InvalidField { field: "top", .. }));
}

#[test]
fn out_of_range_numbers_are_rejected_at_decode() {
    let value = parse(
        r#"{"__class__": "Scene", "canvas": {"extents": [1, 1]}, "top": {
            "__class__": "Group", "children": [
                {"__class__": "LinePath", "vertices": [[1e39, 0], [1, 1]]}
            ]}}"#,
    );
    let err = decode_scene(&value).unwrap_err();
    assert!(
        err.to_string().contains("LinePath.vertices"),
        "error should name the field: {err}"
    );
    let DecodeError::InvalidVertexShape(message) = err.root_cause() else {
        panic!("expected InvalidVertexShape, got {err}");
    };
    assert!(message.contains("outside the f32 range"), "{message}");
}

#[test]
fn every_decoded_scene_encodes_to_finite_numbers() {
    fn all_finite(value: &Value) -> bool {
        match value {
            Value::Float(v) => v.is_finite(),
            Value::Null => false,
            Value::Sequence(items) => items.iter().all(all_finite),
            Value::Mapping(map) => map.values().all(all_finite),
            _ => true,
        }
    }

    let scene = decode_scene(&parse(SCENE)).unwrap();
    assert!(all_finite(&Value::Mapping(scene.encode())));
}
