//! Field readers shared by the node variants.

use weft_core::{normalize_color, Color, DecodeError, Mapping, Value, DISCRIMINATOR};

/// A field that must be present and non-null.
pub(crate) fn required<'a>(
    map: &'a Mapping,
    variant: &'static str,
    field: &'static str,
) -> Result<&'a Value, DecodeError> {
    match map.get(field) {
        None | Some(Value::Null) => Err(DecodeError::MissingField { variant, field }),
        Some(value) => Ok(value),
    }
}

/// A finite number.
pub(crate) fn number(value: &Value, field: &'static str) -> Result<f64, DecodeError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DecodeError::InvalidField {
            field,
            expected: "a finite number",
            found: describe_number(value),
        })
}

/// A number stored as `f32`. Values that do not fit are rejected rather than
/// becoming infinite.
pub(crate) fn number_f32(value: &Value, field: &'static str) -> Result<f32, DecodeError> {
    value.as_f32().ok_or_else(|| DecodeError::InvalidField {
        field,
        expected: "a number within the f32 range",
        found: describe_number(value),
    })
}

/// Read up to `N` numbers into `defaults`, which supplies the missing tail.
pub(crate) fn numbers<const N: usize>(
    value: &Value,
    field: &'static str,
    min: usize,
    defaults: [f32; N],
) -> Result<[f32; N], DecodeError> {
    let items = value
        .as_sequence()
        .filter(|items| (min..=N).contains(&items.len()))
        .ok_or_else(|| DecodeError::InvalidField {
            field,
            expected: "a short sequence of numbers",
            found: describe_len(value),
        })?;

    let mut out = defaults;
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = number_f32(item, field)?;
    }
    Ok(out)
}

/// The optional per-node color used to fill in vertices that carry none.
pub(crate) fn fallback_color(
    map: &Mapping,
    variant: &'static str,
) -> Result<Option<Color>, DecodeError> {
    match map.get("color") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => normalize_color(Some(value), Color::BLACK)
            .map(Some)
            .map_err(|e| e.in_field(variant, "color")),
    }
}

/// Log keys the variant does not recognize. They are dropped on encode.
pub(crate) fn skip_unrecognized(map: &Mapping, variant: &'static str, known: &[&str]) {
    for key in map.keys() {
        if key != DISCRIMINATOR && !known.contains(&key.as_str()) {
            log::trace!("{variant}: ignoring unrecognized field `{key}`");
        }
    }
}

fn describe_number(value: &Value) -> String {
    if value.is_number() {
        value.to_string()
    } else {
        value.kind().to_string()
    }
}

fn describe_len(value: &Value) -> String {
    match value.as_sequence() {
        Some(items) => format!("a sequence of {}", items.len()),
        None => value.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_f32_rejects_overflow() {
        assert_eq!(number_f32(&Value::Integer(7), "radius").unwrap(), 7.0);

        let err = number_f32(&Value::Float(1.0e39), "radius").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "radius", .. }));

        let err = number(&Value::Float(f64::INFINITY), "canvas.extents").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidField {
                field: "canvas.extents",
                ..
            }
        ));
    }

    #[test]
    fn test_numbers_pads_and_checks_range() {
        let short = Value::Sequence(vec![1.into(), 2.into()]);
        assert_eq!(
            numbers(&short, "center", 2, [0.0, 0.0, 1.0, 1.0]).unwrap(),
            [1.0, 2.0, 1.0, 1.0]
        );

        let huge = Value::Sequence(vec![1.into(), 1.0e39.into()]);
        let err = numbers(&huge, "center", 2, [0.0; 4]).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidField { field: "center", .. }));
    }
}
