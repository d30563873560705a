//! Generic tree to typed scene graph.
//!
//! The decoder walks a [`Value`] and promotes every mapping that carries the
//! discriminator to a typed [`Node`] through the [`Registry`]. Mappings and
//! sequences without one are walked structurally, so discriminated nodes are
//! found wherever they are nested. Each variant's constructor calls back into
//! the decoder for the child fields it owns.

use crate::{Node, Registry, Scene};
use std::collections::BTreeMap;
use weft_core::{DecodeError, Mapping, Value, DISCRIMINATOR};

/// Result of decoding an arbitrary value.
#[derive(Clone, Debug, PartialEq)]
pub enum Decoded {
    Node(Node),
    /// Null, bool, number or text, passed through unchanged.
    Scalar(Value),
    Sequence(Vec<Decoded>),
    Mapping(BTreeMap<String, Decoded>),
}

impl Decoded {
    pub fn into_node(self) -> Option<Node> {
        match self {
            Decoded::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Decoded::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Decoded::Node(node) => format!("a {} node", node.class_name()),
            Decoded::Scalar(value) => value.kind().to_string(),
            Decoded::Sequence(_) => "sequence".to_string(),
            Decoded::Mapping(_) => "mapping".to_string(),
        }
    }

    /// Encode back into the generic tree.
    pub fn encode(&self) -> Value {
        match self {
            Decoded::Node(node) => node.encode(),
            Decoded::Scalar(value) => value.clone(),
            Decoded::Sequence(items) => Value::Sequence(items.iter().map(Decoded::encode).collect()),
            Decoded::Mapping(map) => Value::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.encode()))
                    .collect(),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Decoder<'r> {
    registry: &'r Registry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn decode(&self, value: &Value) -> Result<Decoded, DecodeError> {
        match value {
            Value::Mapping(map) => match map.get(DISCRIMINATOR) {
                Some(class) => self.decode_node(class, map).map(Decoded::Node),
                None => map
                    .iter()
                    .map(|(key, value)| Ok::<_, DecodeError>((key.clone(), self.decode(value)?)))
                    .collect::<Result<_, _>>()
                    .map(Decoded::Mapping),
            },
            Value::Sequence(items) => items
                .iter()
                .map(|item| self.decode(item))
                .collect::<Result<_, _>>()
                .map(Decoded::Sequence),
            scalar => Ok(Decoded::Scalar(scalar.clone())),
        }
    }

    /// Decode a value that must be a Scene at the root.
    pub fn decode_scene(&self, value: &Value) -> Result<Scene, DecodeError> {
        match self.decode(value)? {
            Decoded::Node(Node::Scene(scene)) => Ok(scene),
            other => Err(DecodeError::InvalidRoot(other.describe())),
        }
    }

    fn decode_node(&self, class: &Value, map: &Mapping) -> Result<Node, DecodeError> {
        let name = class.as_str().ok_or_else(|| DecodeError::InvalidField {
            field: DISCRIMINATOR,
            expected: "a variant name",
            found: class.kind().to_string(),
        })?;
        let constructor = self
            .registry
            .resolve(name)
            .ok_or_else(|| DecodeError::UnknownVariant(name.to_string()))?;

        log::debug!("decoding {name} node");
        constructor(map, self)
    }
}
