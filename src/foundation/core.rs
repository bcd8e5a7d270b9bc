use std::fmt;

pub use cgmath::{Vector2, Vector3, Vector4};

/// Two-component vector value (`SFVec2f`).
pub type Vec2 = Vector2<f64>;
/// Three-component vector value (`SFVec3f`, also `SFColor`).
pub type Vec3 = Vector3<f64>;
/// Four-component vector value (`SFRotation`: axis + angle).
pub type Vec4 = Vector4<f64>;

/// Scene-graph node identifier, allocated by the scene graph.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Template instance identifier. Ids are allocated monotonically, so ordering by id is
/// creation order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proto#{}", self.0)
    }
}

/// A `(node, field)` location mirrored from a parameter (an "IS" connection).
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Binding {
    /// Node carrying the field.
    pub node: NodeId,
    /// Field name on that node.
    pub field: String,
}

impl Binding {
    /// Build a binding.
    pub fn new(node: NodeId, field: impl Into<String>) -> Self {
        Self {
            node,
            field: field.into(),
        }
    }
}

/// Address of a parameter: owning instance plus parameter name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ParamRef {
    /// Owning instance.
    pub instance: InstanceId,
    /// Parameter name within the instance.
    pub parameter: String,
}

impl ParamRef {
    /// Build a parameter reference.
    pub fn new(instance: InstanceId, parameter: impl Into<String>) -> Self {
        Self {
            instance,
            parameter: parameter.into(),
        }
    }
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.instance, self.parameter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
