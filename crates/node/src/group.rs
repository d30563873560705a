use crate::fields::skip_unrecognized;
use crate::{Decoded, Decoder, Node, NodeVariant};
use weft_core::{DecodeError, Mapping, Transformation, Value};

/// An ordered container of child nodes with an optional transformation.
///
/// A missing transformation means "inherit from the parent". It is kept
/// distinct from an explicit identity so that it survives a round trip.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    pub transformation: Option<Transformation>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transformation(mut self, transformation: Transformation) -> Self {
        self.transformation = Some(transformation);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Number of nodes below this group, nested groups included.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.as_group().map_or(0, Group::descendant_count))
            .sum()
    }

    /// Visit every descendant depth-first, in order, with its depth below
    /// this group (direct children are at depth 1).
    pub fn walk(&self, visit: &mut impl FnMut(&Node, usize)) {
        self.walk_at(1, visit);
    }

    fn walk_at(&self, depth: usize, visit: &mut impl FnMut(&Node, usize)) {
        for child in &self.children {
            visit(child, depth);
            if let Some(group) = child.as_group() {
                group.walk_at(depth + 1, visit);
            }
        }
    }
}

impl NodeVariant for Group {
    const CLASS: &'static str = "Group";

    fn decode(map: &Mapping, decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        skip_unrecognized(map, Self::CLASS, &["transformation", "children"]);

        let transformation = Transformation::decode(map.get("transformation"))
            .map_err(|e| e.in_field(Self::CLASS, "transformation"))?;

        let items = match map.get("children") {
            None | Some(Value::Null) => &[][..],
            Some(Value::Sequence(items)) => items.as_slice(),
            Some(other) => {
                return Err(DecodeError::InvalidField {
                    field: "children",
                    expected: "a sequence of nodes",
                    found: other.kind().to_string(),
                })
            }
        };

        let mut children = Vec::with_capacity(items.len());
        for item in items {
            let decoded = decoder
                .decode(item)
                .map_err(|e| e.in_field(Self::CLASS, "children"))?;
            match decoded {
                Decoded::Node(node) if !matches!(node, Node::Scene(_)) => children.push(node),
                other => {
                    return Err(DecodeError::InvalidField {
                        field: "children",
                        expected: "group or primitive nodes",
                        found: other.describe(),
                    })
                }
            }
        }

        Ok(Self {
            transformation,
            children,
        })
    }

    fn encode_fields(&self, map: &mut Mapping) {
        if let Some(transformation) = &self.transformation {
            map.insert("transformation".into(), transformation.encode());
        }
        map.insert(
            "children".into(),
            Value::Sequence(self.children.iter().map(Node::encode).collect()),
        );
    }
}
