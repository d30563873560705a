//! Homogeneous 4x4 transformations attached to groups.
//!
//! Scene files store the matrix as 16 numbers in row-major order. `glam`
//! stores columns, so reading and writing transpose.

use crate::{DecodeError, Value};
use glam::{Mat4, Vec4};

/// Number of elements in a serialized transformation.
pub const TRANSFORMATION_LEN: usize = 16;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation(Mat4);

impl Transformation {
    pub fn identity() -> Self {
        Self(Mat4::IDENTITY)
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self(matrix)
    }

    pub fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self(Mat4::from_translation(glam::Vec3::new(x, y, z)))
    }

    /// Build from 16 row-major elements.
    pub fn from_rows(rows: [f32; TRANSFORMATION_LEN]) -> Self {
        Self(Mat4::from_cols_array(&rows).transpose())
    }

    /// The 16 row-major elements.
    pub fn to_rows(&self) -> [f32; TRANSFORMATION_LEN] {
        self.0.transpose().to_cols_array()
    }

    pub fn matrix(&self) -> Mat4 {
        self.0
    }

    pub fn transform_point(&self, point: Vec4) -> Vec4 {
        self.0 * point
    }

    /// Read an optional transformation. Absent and null both mean "inherit".
    pub fn decode(input: Option<&Value>) -> Result<Option<Self>, DecodeError> {
        let items = match input {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Sequence(items)) => items,
            Some(other) => {
                return Err(DecodeError::InvalidField {
                    field: "transformation",
                    expected: "a sequence of 16 numbers",
                    found: other.kind().to_string(),
                })
            }
        };

        if items.len() != TRANSFORMATION_LEN {
            return Err(DecodeError::InvalidTransformationShape(items.len()));
        }

        let mut rows = [0.0; TRANSFORMATION_LEN];
        for (slot, item) in rows.iter_mut().zip(items) {
            *slot = item.as_f32().ok_or_else(|| DecodeError::InvalidField {
                field: "transformation",
                expected: "a number within the f32 range",
                found: item.to_string(),
            })?;
        }

        Ok(Some(Self::from_rows(rows)))
    }

    pub fn encode(&self) -> Value {
        Value::floats(&self.to_rows())
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for Transformation {
    fn from(matrix: Mat4) -> Self {
        Self(matrix)
    }
}
