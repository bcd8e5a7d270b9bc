use crate::foundation::core::{Vec2, Vec3, Vec4};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::value::types::{Value, ValueKind, validate};

impl Value {
    /// Build a typed value from per-component text inputs, as read from an edit form.
    ///
    /// Scalars take one input; vectors take one input per component. Node and list kinds have
    /// no textual representation and report [`ProtoError::UnsupportedVariant`].
    pub fn parse_inputs(kind: ValueKind, inputs: &[&str]) -> ProtoResult<Value> {
        let expected = kind.component_count().unwrap_or(1);
        if kind.is_list() || kind == ValueKind::Node {
            return Err(ProtoError::UnsupportedVariant(kind));
        }
        if inputs.len() != expected {
            return Err(ProtoError::validation(format!(
                "{kind} expects {expected} input(s), got {}",
                inputs.len()
            )));
        }

        let value = match kind {
            ValueKind::Bool => Value::Bool(parse_bool(inputs[0])?),
            ValueKind::String => Value::String(inputs[0].to_string()),
            ValueKind::Int32 => Value::Int32(inputs[0].trim().parse::<i32>().map_err(|e| {
                ProtoError::validation(format!("invalid SFInt32 '{}': {e}", inputs[0]))
            })?),
            ValueKind::Float => Value::Float(parse_float(inputs[0])?),
            ValueKind::Vec2 => Value::Vec2(Vec2::new(
                parse_float(inputs[0])?,
                parse_float(inputs[1])?,
            )),
            ValueKind::Vec3 | ValueKind::Color => Value::Vec3(Vec3::new(
                parse_float(inputs[0])?,
                parse_float(inputs[1])?,
                parse_float(inputs[2])?,
            )),
            ValueKind::Rotation => Value::Rotation(Vec4::new(
                parse_float(inputs[0])?,
                parse_float(inputs[1])?,
                parse_float(inputs[2])?,
                parse_float(inputs[3])?,
            )),
            ValueKind::Node | ValueKind::NodeList | ValueKind::StringList => {
                return Err(ProtoError::UnsupportedVariant(kind));
            }
        };

        validate(kind, &value)?;
        Ok(value)
    }

    /// Parse a single-line literal such as `2.5`, `TRUE` or `0 1 0 1.57`.
    ///
    /// Strings are taken verbatim; other kinds are split on whitespace.
    pub fn parse_literal(kind: ValueKind, text: &str) -> ProtoResult<Value> {
        if kind == ValueKind::String {
            return Self::parse_inputs(kind, &[text]);
        }
        let parts: Vec<&str> = text.split_whitespace().collect();
        Self::parse_inputs(kind, &parts)
    }
}

fn parse_bool(s: &str) -> ProtoResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        other => Err(ProtoError::validation(format!("invalid SFBool '{other}'"))),
    }
}

fn parse_float(s: &str) -> ProtoResult<f64> {
    let x = s
        .trim()
        .parse::<f64>()
        .map_err(|e| ProtoError::validation(format!("invalid number '{s}': {e}")))?;
    if !x.is_finite() {
        return Err(ProtoError::validation(format!("number '{s}' is not finite")));
    }
    Ok(x)
}

#[cfg(test)]
#[path = "../../tests/unit/value/parse.rs"]
mod tests;
