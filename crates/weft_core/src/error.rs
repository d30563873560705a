use thiserror::Error;

/// Error raised while turning a generic tree into typed nodes.
///
/// Decoding fails fast: the first offending field aborts the whole decode and
/// no partially built node is returned.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("unknown node variant `{0}`")]
    UnknownVariant(String),

    #[error("root value must decode to a Scene, found {0}")]
    InvalidRoot(String),

    #[error("{variant} is missing required field `{field}`")]
    MissingField {
        variant: &'static str,
        field: &'static str,
    },

    #[error("invalid color: {0}")]
    InvalidColorFormat(String),

    #[error("invalid vertex shape: {0}")]
    InvalidVertexShape(String),

    #[error("transformation must have 16 elements, found {0}")]
    InvalidTransformationShape(usize),

    #[error("field `{field}` expected {expected}, found {found}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Attributes a nested error to the variant and field that consumed it.
    #[error("{variant}.{field}: {source}")]
    Field {
        variant: &'static str,
        field: &'static str,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    pub fn in_field(self, variant: &'static str, field: &'static str) -> Self {
        DecodeError::Field {
            variant,
            field,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any field attribution.
    pub fn root_cause(&self) -> &DecodeError {
        match self {
            DecodeError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
