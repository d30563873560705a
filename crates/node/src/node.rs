//! # Node System
//!
//! The typed scene graph. A [`Node`] is one of a closed set of variants; each
//! variant knows how to read itself from a generic [`Mapping`] and how to
//! write itself back out.
//!
//! ## Key Components
//!
//! - **Node**: Enum wrapper over every variant
//! - **NodeVariant**: Trait implemented by every variant, the decode/encode contract
//!
//! Ownership is strictly tree shaped: a [`Scene`] owns its top [`Group`], and
//! a group owns its children. Nothing is shared between parents.

use crate::{
    Circle, ConvexPolygon, CubicHermitePath, Decoder, Group, LinePath, MicropolygonMesh, Scene,
};
use weft_core::{DecodeError, Mapping, Value, DISCRIMINATOR};

/// Shared decode/encode contract of every node variant.
pub trait NodeVariant: Sized + Into<Node> {
    /// Discriminator value naming this variant.
    const CLASS: &'static str;

    /// Build the node from its mapping. Unrecognized keys are ignored.
    fn decode(map: &Mapping, decoder: &Decoder<'_>) -> Result<Self, DecodeError>;

    /// Write every owned field into `map`, in canonical form.
    fn encode_fields(&self, map: &mut Mapping);

    fn encode(&self) -> Mapping {
        let mut map = Mapping::new();
        map.insert(DISCRIMINATOR.to_string(), Value::from(Self::CLASS));
        self.encode_fields(&mut map);
        map
    }
}

/// Enum wrapper for all node types, providing a unified interface
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scene(Scene),
    Group(Group),
    Circle(Circle),
    ConvexPolygon(ConvexPolygon),
    LinePath(LinePath),
    CubicHermitePath(CubicHermitePath),
    MicropolygonMesh(MicropolygonMesh),
}

impl Node {
    pub fn class_name(&self) -> &'static str {
        match self {
            Node::Scene(_) => Scene::CLASS,
            Node::Group(_) => Group::CLASS,
            Node::Circle(_) => Circle::CLASS,
            Node::ConvexPolygon(_) => ConvexPolygon::CLASS,
            Node::LinePath(_) => LinePath::CLASS,
            Node::CubicHermitePath(_) => CubicHermitePath::CLASS,
            Node::MicropolygonMesh(_) => MicropolygonMesh::CLASS,
        }
    }

    /// Encode back into the generic tree, recursing into owned children.
    pub fn encode(&self) -> Value {
        let map = match self {
            Node::Scene(node) => node.encode(),
            Node::Group(node) => node.encode(),
            Node::Circle(node) => node.encode(),
            Node::ConvexPolygon(node) => node.encode(),
            Node::LinePath(node) => node.encode(),
            Node::CubicHermitePath(node) => node.encode(),
            Node::MicropolygonMesh(node) => node.encode(),
        };
        Value::Mapping(map)
    }

    /// Direct children. Only groups have any; a scene's group is `Scene::top`.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group(group) => &group.children,
            _ => &[],
        }
    }

    pub fn as_scene(&self) -> Option<&Scene> {
        match self {
            Node::Scene(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_group_mut(&mut self) -> Option<&mut Group> {
        match self {
            Node::Group(group) => Some(group),
            _ => None,
        }
    }

    /// Whether this node is a drawable primitive rather than a container.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Node::Scene(_) | Node::Group(_))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Node {
                fn from(node: $variant) -> Self {
                    Node::$variant(node)
                }
            }
        )*
    };
}

impl_from_variant!(
    Scene,
    Group,
    Circle,
    ConvexPolygon,
    LinePath,
    CubicHermitePath,
    MicropolygonMesh,
);
