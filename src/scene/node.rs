use std::collections::BTreeMap;

use crate::foundation::core::{InstanceId, NodeId};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::value::types::Value;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// An "IS" connection recorded by expansion: `field` mirrors the owning instance's `parameter`.
pub struct FieldConnection {
    /// Node field name.
    pub field: String,
    /// Parameter name on the owning template instance.
    pub parameter: String,
}

impl FieldConnection {
    /// Build a connection.
    pub fn new(field: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            parameter: parameter.into(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A live scene-graph node.
pub struct SceneNode {
    /// Node id.
    pub id: NodeId,
    /// Node type name (`Transform`, `Sphere`, ...).
    pub type_name: String,
    /// Declared fields and their current values.
    pub fields: BTreeMap<String, Value>,
    /// Parent node, `None` at root level.
    pub parent: Option<NodeId>,
    /// Children in insertion order.
    pub children: Vec<NodeId>,
    /// Nodes declared with `USE` of this node's `DEF`; they mirror its field writes.
    pub alias_ids: Vec<NodeId>,
    /// For alias nodes, the `DEF` node they mirror.
    pub alias_of: Option<NodeId>,
    /// Template instance whose expansion created this node.
    pub owner: Option<InstanceId>,
    /// "IS" connections recorded when the node was expanded.
    pub connections: Vec<FieldConnection>,
}

impl SceneNode {
    /// Value of a declared field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Overwrite a declared field. Unknown field names are rejected; nodes never grow fields.
    pub fn set_field(&mut self, name: &str, value: Value) -> ProtoResult<()> {
        match self.fields.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(ProtoError::field_not_found(self.id, name)),
        }
    }

    /// Fields of this node driven by `parameter`, in recorded order.
    pub fn fields_driven_by<'a>(&'a self, parameter: &'a str) -> impl Iterator<Item = &'a str> {
        self.connections
            .iter()
            .filter(move |c| c.parameter == parameter)
            .map(|c| c.field.as_str())
    }

    /// `true` if this node is a `USE` alias of another node.
    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scene-node description produced by template expansion and consumed by the scene graph.
pub struct NodeDescriptor {
    /// Node type name. Ignored for `USE` descriptors, which copy their `DEF` node.
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// `DEF` name making this node referable by later `USE` descriptors of the same fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def_name: Option<String>,
    /// `USE` name: this node is an alias of the named `DEF` node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_name: Option<String>,
    /// Field values.
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    /// "IS" connections to the owning instance's parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<FieldConnection>,
    /// Child descriptors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    /// Plain node of `type_name` with no fields.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// Alias of the `DEF` named `def_name`.
    pub fn alias(def_name: impl Into<String>) -> Self {
        Self {
            use_name: Some(def_name.into()),
            ..Self::default()
        }
    }

    /// Set the `DEF` name.
    pub fn def(mut self, name: impl Into<String>) -> Self {
        self.def_name = Some(name.into());
        self
    }

    /// Add a literal field.
    pub fn field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Add a field driven by `parameter`, seeded with its current `value`.
    pub fn connected(
        mut self,
        name: impl Into<String>,
        parameter: impl Into<String>,
        value: Value,
    ) -> Self {
        let name = name.into();
        self.connections
            .push(FieldConnection::new(name.clone(), parameter));
        self.fields.insert(name, value);
        self
    }

    /// Append a child descriptor.
    pub fn child(mut self, child: NodeDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Number of descriptors in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeDescriptor::count).sum::<usize>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/node.rs"]
mod tests;
