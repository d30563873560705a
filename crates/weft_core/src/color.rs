//! Color parsing and normalization.
//!
//! Scene files spell colors in several ways: hex text, integer channel
//! tuples, float channel tuples, or not at all. [`normalize_color`] folds all
//! of them into a single 4-channel float [`Color`].

use crate::{DecodeError, Value};
use glam::Vec4;
use palette::Srgba;

/// An RGBA color with float channels, nominally in `[0.0, 1.0]`.
///
/// Channels are not clamped. Float inputs outside the unit range are kept so
/// that overbright colors reach the renderer unchanged.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    /// Render as `#rrggbbaa`. Channels are clamped for display only.
    pub fn to_hex(self) -> String {
        let rgba = Srgba::<f32>::from(self).into_format::<u8, u8>();
        format!(
            "#{:02x}{:02x}{:02x}{:02x}",
            rgba.red, rgba.green, rgba.blue, rgba.alpha
        )
    }

    /// Canonical encoded form: a sequence of four floats.
    pub fn encode(self) -> Value {
        Value::floats(&self.to_array())
    }
}

impl From<Color> for Vec4 {
    fn from(c: Color) -> Self {
        Vec4::from_array(c.to_array())
    }
}

impl From<Vec4> for Color {
    fn from(v: Vec4) -> Self {
        Color::from_array(v.to_array())
    }
}

impl From<Color> for Srgba<f32> {
    fn from(c: Color) -> Self {
        Srgba::new(c.r, c.g, c.b, c.a)
    }
}

impl From<Srgba<f32>> for Color {
    fn from(c: Srgba<f32>) -> Self {
        let (r, g, b, a) = c.into_components();
        Color::rgba(r, g, b, a)
    }
}

/// Normalize any supported color spelling into a [`Color`].
///
/// - absent or null: `default`
/// - text: hex digits, optionally prefixed with `#`, in 3, 6 or 8 digit form
/// - 3 or 4 numbers: when every element is an integer in `0..=255` the tuple
///   is scaled by 1/255, otherwise it is taken as float channels as-is.
///   `[1, 0, 0]` is therefore a very dark red, not pure red.
///
/// A missing alpha channel is fully opaque.
pub fn normalize_color(input: Option<&Value>, default: Color) -> Result<Color, DecodeError> {
    match input {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Text(text)) => parse_hex_color(text),
        Some(Value::Sequence(items)) => color_from_channels(items),
        Some(other) => Err(DecodeError::InvalidColorFormat(format!(
            "expected hex text or 3-4 channels, found {}",
            other.kind()
        ))),
    }
}

fn parse_hex_color(value: &str) -> Result<Color, DecodeError> {
    let value = value.trim();
    let hex = value.strip_prefix('#').unwrap_or(value);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidColorFormat(format!(
            "`{value}` contains non-hex characters"
        )));
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).unwrap_or_default();

    match hex.len() {
        // #RGB, each digit doubled
        3 => Ok(Color::from_rgba8(
            channel(&hex[0..1].repeat(2)),
            channel(&hex[1..2].repeat(2)),
            channel(&hex[2..3].repeat(2)),
            255,
        )),
        // #RRGGBB
        6 => Ok(Color::from_rgba8(
            channel(&hex[0..2]),
            channel(&hex[2..4]),
            channel(&hex[4..6]),
            255,
        )),
        // #RRGGBBAA
        8 => Ok(Color::from_rgba8(
            channel(&hex[0..2]),
            channel(&hex[2..4]),
            channel(&hex[4..6]),
            channel(&hex[6..8]),
        )),
        n => Err(DecodeError::InvalidColorFormat(format!(
            "`{value}` has {n} hex digits, expected 3, 6 or 8"
        ))),
    }
}

fn color_from_channels(items: &[Value]) -> Result<Color, DecodeError> {
    if !matches!(items.len(), 3 | 4) {
        return Err(DecodeError::InvalidColorFormat(format!(
            "expected 3 or 4 channels, found {}",
            items.len()
        )));
    }

    let mut channels = [0.0f32, 0.0, 0.0, 1.0];
    let byte_range = items
        .iter()
        .all(|v| matches!(v.as_i64(), Some(0..=255)));

    for (i, item) in items.iter().enumerate() {
        let v = item.as_f32().ok_or_else(|| {
            let found = if item.is_number() {
                format!("{item}, outside the f32 range")
            } else {
                item.kind().to_string()
            };
            DecodeError::InvalidColorFormat(format!(
                "channel {i} is {found}, expected a number"
            ))
        })?;
        channels[i] = if byte_range { v / 255.0 } else { v };
    }

    Ok(Color::from_array(channels))
}
