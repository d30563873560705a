//! Vertex normalization.
//!
//! Input vertices come as 2, 3, 4 or 8 numbers each. Every stored vertex is
//! widened to the canonical `[x, y, z, w, r, g, b, a]` layout:
//!
//! | width | meaning            | filled in                     |
//! |-------|--------------------|-------------------------------|
//! | 2     | `x y`              | `z = 0`, `w = 1`, color       |
//! | 3     | `x y z`            | `w = 1`, color                |
//! | 4     | `x y z w`          | color                         |
//! | 8     | `x y z w r g b a`  | nothing, fallback is ignored  |
//!
//! The fill-in color is the node's fallback color when it has one, opaque
//! black otherwise.

use crate::{Color, DecodeError, Value};
use glam::Vec4;

/// Number of components in a canonical vertex.
pub const VERTEX_WIDTH: usize = 8;

/// A homogeneous position followed by an RGBA color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex(pub [f32; VERTEX_WIDTH]);

impl Vertex {
    pub fn new(position: Vec4, color: Color) -> Self {
        let mut data = [0.0; VERTEX_WIDTH];
        data[..4].copy_from_slice(&position.to_array());
        data[4..].copy_from_slice(&color.to_array());
        Self(data)
    }

    pub fn position(&self) -> Vec4 {
        Vec4::new(self.0[0], self.0[1], self.0[2], self.0[3])
    }

    pub fn color(&self) -> Color {
        Color::rgba(self.0[4], self.0[5], self.0[6], self.0[7])
    }

    pub const fn to_array(self) -> [f32; VERTEX_WIDTH] {
        self.0
    }

    pub fn encode(&self) -> Value {
        Value::floats(&self.0)
    }
}

/// A rectangular grid of vertices stored row-major.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VertexGrid {
    rows: usize,
    cols: usize,
    vertices: Vec<Vertex>,
}

impl VertexGrid {
    /// Returns `None` unless `vertices.len() == rows * cols`.
    pub fn new(rows: usize, cols: usize, vertices: Vec<Vertex>) -> Option<Self> {
        (vertices.len() == rows * cols).then_some(Self {
            rows,
            cols,
            vertices,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Vertex> {
        if row < self.rows && col < self.cols {
            self.vertices.get(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[Vertex]> {
        (row < self.rows).then(|| &self.vertices[row * self.cols..(row + 1) * self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Vertex]> + '_ {
        (0..self.rows).filter_map(move |r| self.row(r))
    }

    pub fn as_slice(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn encode(&self) -> Value {
        Value::Sequence(
            self.iter_rows()
                .map(|row| Value::Sequence(row.iter().map(Vertex::encode).collect()))
                .collect(),
        )
    }
}

/// Vertex data in the shape it was given: a flat list or a grid.
#[derive(Clone, Debug, PartialEq)]
pub enum Vertices {
    List(Vec<Vertex>),
    Grid(VertexGrid),
}

impl Default for Vertices {
    fn default() -> Self {
        Vertices::List(Vec::new())
    }
}

impl Vertices {
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn is_grid(&self) -> bool {
        matches!(self, Vertices::Grid(_))
    }

    /// All vertices, row-major for grids.
    pub fn as_slice(&self) -> &[Vertex] {
        match self {
            Vertices::List(list) => list,
            Vertices::Grid(grid) => grid.as_slice(),
        }
    }

    pub fn encode(&self) -> Value {
        match self {
            Vertices::List(list) => encode_vertex_list(list),
            Vertices::Grid(grid) => grid.encode(),
        }
    }
}

pub fn encode_vertex_list(vertices: &[Vertex]) -> Value {
    Value::Sequence(vertices.iter().map(Vertex::encode).collect())
}

/// Normalize a flat or grid vertex sequence.
///
/// A sequence whose first element is itself a sequence of sequences is a
/// grid; anything else is a flat list. All vertices must share one width.
pub fn normalize_vertices(
    input: &Value,
    fallback: Option<Color>,
) -> Result<Vertices, DecodeError> {
    let items = input.as_sequence().ok_or_else(|| {
        DecodeError::InvalidVertexShape(format!(
            "expected a sequence of vertices, found {}",
            input.kind()
        ))
    })?;

    let is_grid = items
        .first()
        .and_then(Value::as_sequence)
        .and_then(|row| row.first())
        .is_some_and(|first| matches!(first, Value::Sequence(_)));

    let mut reader = VertexReader::new(fallback);

    if !is_grid {
        let list = items
            .iter()
            .enumerate()
            .map(|(i, item)| reader.read(item, || format!("vertex {i}")))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Vertices::List(list));
    }

    let cols = items.first().and_then(Value::as_sequence).map_or(0, <[_]>::len);
    let mut vertices = Vec::with_capacity(items.len() * cols);

    for (r, row) in items.iter().enumerate() {
        let row = row.as_sequence().ok_or_else(|| {
            DecodeError::InvalidVertexShape(format!(
                "row {r} is {}, expected a sequence of vertices",
                row.kind()
            ))
        })?;
        if row.len() != cols {
            return Err(DecodeError::InvalidVertexShape(format!(
                "row {r} has {} vertices, but row 0 has {cols}",
                row.len()
            )));
        }
        for (c, item) in row.iter().enumerate() {
            vertices.push(reader.read(item, || format!("vertex ({r}, {c})"))?);
        }
    }

    let grid = VertexGrid {
        rows: items.len(),
        cols,
        vertices,
    };
    Ok(Vertices::Grid(grid))
}

/// Normalize a flat vertex sequence. Grid input is rejected.
pub fn normalize_vertex_list(
    input: &Value,
    fallback: Option<Color>,
) -> Result<Vec<Vertex>, DecodeError> {
    match normalize_vertices(input, fallback)? {
        Vertices::List(list) => Ok(list),
        Vertices::Grid(grid) => Err(DecodeError::InvalidVertexShape(format!(
            "expected a flat sequence of vertices, found a {}x{} grid",
            grid.rows(),
            grid.cols()
        ))),
    }
}

struct VertexReader {
    fallback: Color,
    width: Option<usize>,
}

impl VertexReader {
    fn new(fallback: Option<Color>) -> Self {
        Self {
            fallback: fallback.unwrap_or(Color::BLACK),
            width: None,
        }
    }

    fn read(&mut self, item: &Value, label: impl Fn() -> String) -> Result<Vertex, DecodeError> {
        let components = item.as_sequence().ok_or_else(|| {
            DecodeError::InvalidVertexShape(format!(
                "{} is {}, expected a sequence of numbers",
                label(),
                item.kind()
            ))
        })?;

        let width = components.len();
        if !matches!(width, 2 | 3 | 4 | VERTEX_WIDTH) {
            return Err(DecodeError::InvalidVertexShape(format!(
                "{} has width {width}, expected 2, 3, 4 or 8",
                label()
            )));
        }
        match self.width {
            Some(expected) if expected != width => {
                return Err(DecodeError::InvalidVertexShape(format!(
                    "{} has width {width}, but earlier vertices have width {expected}",
                    label()
                )));
            }
            _ => self.width = Some(width),
        }

        let mut data = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0];
        for (i, component) in components.iter().enumerate() {
            data[i] = component.as_f32().ok_or_else(|| {
                let found = if component.is_number() {
                    format!("{component}, outside the f32 range")
                } else {
                    component.kind().to_string()
                };
                DecodeError::InvalidVertexShape(format!(
                    "{} component {i} is {found}, expected a number",
                    label()
                ))
            })?;
        }
        if width < VERTEX_WIDTH {
            data[4..].copy_from_slice(&self.fallback.to_array());
        }

        Ok(Vertex(data))
    }
}
