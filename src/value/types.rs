use std::fmt;

use crate::foundation::core::{InstanceId, Vec2, Vec3, Vec4};
use crate::foundation::error::{ProtoError, ProtoResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Declared kind of a template parameter.
///
/// The set is closed. `Color` shares the three-component value representation with `Vec3`
/// and adds a `[0, 1]` range constraint per component.
pub enum ValueKind {
    /// `SFBool`.
    #[serde(alias = "SFBool")]
    Bool,
    /// `SFString`.
    #[serde(alias = "SFString")]
    String,
    /// `SFInt32`.
    #[serde(alias = "SFInt32")]
    Int32,
    /// `SFFloat`.
    #[serde(alias = "SFFloat")]
    Float,
    /// `SFVec2f`.
    #[serde(alias = "SFVec2f")]
    Vec2,
    /// `SFVec3f`.
    #[serde(alias = "SFVec3f")]
    Vec3,
    /// `SFColor`, stored as a [`Value::Vec3`].
    #[serde(alias = "SFColor")]
    Color,
    /// `SFRotation`, axis plus angle.
    #[serde(alias = "SFRotation")]
    Rotation,
    /// `SFNode`: absent or a nested template instance.
    #[serde(alias = "SFNode")]
    Node,
    /// `MFNode`. Declarable, not editable.
    #[serde(alias = "MFNode")]
    NodeList,
    /// `MFString`. Declarable, not editable.
    #[serde(alias = "MFString")]
    StringList,
}

impl ValueKind {
    /// All kinds, in declaration order.
    pub const ALL: [ValueKind; 11] = [
        ValueKind::Bool,
        ValueKind::String,
        ValueKind::Int32,
        ValueKind::Float,
        ValueKind::Vec2,
        ValueKind::Vec3,
        ValueKind::Color,
        ValueKind::Rotation,
        ValueKind::Node,
        ValueKind::NodeList,
        ValueKind::StringList,
    ];

    /// VRML field type name.
    pub fn vrml_name(self) -> &'static str {
        match self {
            ValueKind::Bool => "SFBool",
            ValueKind::String => "SFString",
            ValueKind::Int32 => "SFInt32",
            ValueKind::Float => "SFFloat",
            ValueKind::Vec2 => "SFVec2f",
            ValueKind::Vec3 => "SFVec3f",
            ValueKind::Color => "SFColor",
            ValueKind::Rotation => "SFRotation",
            ValueKind::Node => "SFNode",
            ValueKind::NodeList => "MFNode",
            ValueKind::StringList => "MFString",
        }
    }

    /// Inverse of [`ValueKind::vrml_name`].
    pub fn from_vrml_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.vrml_name() == name)
    }

    /// `true` for the list kinds whose edit path is not implemented.
    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::NodeList | ValueKind::StringList)
    }

    /// Number of numeric components for vector kinds.
    pub fn component_count(self) -> Option<usize> {
        match self {
            ValueKind::Vec2 => Some(2),
            ValueKind::Vec3 | ValueKind::Color => Some(3),
            ValueKind::Rotation => Some(4),
            _ => None,
        }
    }

    /// `true` when a value of kind `found` may be stored in a parameter of this kind.
    pub fn accepts(self, found: ValueKind) -> bool {
        match self {
            ValueKind::Color => found == ValueKind::Vec3,
            expected => expected == found,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.vrml_name())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// A parameter or node field value.
pub enum Value {
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    String(String),
    /// 32-bit signed integer.
    Int32(i32),
    /// Floating point scalar.
    Float(f64),
    /// Two-component vector.
    Vec2(Vec2),
    /// Three-component vector (also colours).
    Vec3(Vec3),
    /// Rotation as axis (x, y, z) and angle (w) in radians.
    Rotation(Vec4),
    /// Node reference: absent (`NULL`) or a nested template instance.
    Node(Option<InstanceId>),
    /// List of nested template instances.
    NodeList(Vec<InstanceId>),
    /// List of strings.
    StringList(Vec<String>),
}

impl Value {
    /// Runtime kind of this value. Colours report [`ValueKind::Vec3`].
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Int32(_) => ValueKind::Int32,
            Value::Float(_) => ValueKind::Float,
            Value::Vec2(_) => ValueKind::Vec2,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Rotation(_) => ValueKind::Rotation,
            Value::Node(_) => ValueKind::Node,
            Value::NodeList(_) => ValueKind::NodeList,
            Value::StringList(_) => ValueKind::StringList,
        }
    }

    /// VRML default value for `kind`.
    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Bool => Value::Bool(false),
            ValueKind::String => Value::String(String::new()),
            ValueKind::Int32 => Value::Int32(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Vec2 => Value::Vec2(Vec2::new(0.0, 0.0)),
            ValueKind::Vec3 | ValueKind::Color => Value::Vec3(Vec3::new(0.0, 0.0, 0.0)),
            ValueKind::Rotation => Value::Rotation(Vec4::new(0.0, 0.0, 1.0, 0.0)),
            ValueKind::Node => Value::Node(None),
            ValueKind::NodeList => Value::NodeList(Vec::new()),
            ValueKind::StringList => Value::StringList(Vec::new()),
        }
    }

    /// Node reference held by this value, if any.
    pub fn as_instance(&self) -> Option<InstanceId> {
        match self {
            Value::Node(id) => *id,
            _ => None,
        }
    }

    /// Short human-readable rendering used by parameter listings.
    pub fn label(&self) -> String {
        match self {
            Value::Bool(true) => "TRUE".to_string(),
            Value::Bool(false) => "FALSE".to_string(),
            Value::String(s) => format!("{s:?}"),
            Value::Int32(i) => i.to_string(),
            Value::Float(x) => x.to_string(),
            Value::Vec2(v) => format!("{} {}", v.x, v.y),
            Value::Vec3(v) => format!("{} {} {}", v.x, v.y, v.z),
            Value::Rotation(v) => format!("{} {} {} {}", v.x, v.y, v.z, v.w),
            Value::Node(None) => "NULL".to_string(),
            Value::Node(Some(id)) => id.to_string(),
            Value::NodeList(ids) => format!("[{} nodes]", ids.len()),
            Value::StringList(items) => format!("[{} strings]", items.len()),
        }
    }
}

/// Check that `value` may be stored in a parameter declared as `kind`.
///
/// Must be called before any side effect of an edit.
pub fn validate(kind: ValueKind, value: &Value) -> ProtoResult<()> {
    let found = value.kind();
    if !kind.accepts(found) {
        return Err(ProtoError::TypeMismatch {
            expected: kind,
            found,
        });
    }

    match (kind, value) {
        (ValueKind::Color, Value::Vec3(c)) => {
            for (axis, component) in [("r", c.x), ("g", c.y), ("b", c.z)] {
                if !(0.0..=1.0).contains(&component) {
                    return Err(ProtoError::validation(format!(
                        "color component {axis} = {component} is outside [0, 1]"
                    )));
                }
            }
        }
        (_, Value::Float(x)) if !x.is_finite() => {
            return Err(ProtoError::validation("float value must be finite"));
        }
        (_, Value::Vec2(v)) if !(v.x.is_finite() && v.y.is_finite()) => {
            return Err(ProtoError::validation("vector components must be finite"));
        }
        (_, Value::Vec3(v)) if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) => {
            return Err(ProtoError::validation("vector components must be finite"));
        }
        (_, Value::Rotation(v))
            if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite() && v.w.is_finite()) =>
        {
            return Err(ProtoError::validation("rotation components must be finite"));
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/value/types.rs"]
mod tests;
