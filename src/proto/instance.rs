use indexmap::IndexMap;

use crate::foundation::core::{InstanceId, NodeId, ParamRef};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::proto::parameter::Parameter;
use crate::template::definition::TemplateDef;
use crate::template::expand::ParameterValues;
use crate::template::pipeline::RegenState;

/// A live template instance.
#[derive(Clone, Debug)]
pub struct ProtoInstance {
    pub(crate) id: InstanceId,
    pub(crate) url: Option<String>,
    pub(crate) def: TemplateDef,
    pub(crate) parameters: IndexMap<String, Parameter>,
    pub(crate) expanded_nodes: Vec<NodeId>,
    pub(crate) anchor: Option<NodeId>,
    pub(crate) state: RegenState,
    pub(crate) parent: Option<ParamRef>,
}

impl ProtoInstance {
    pub(crate) fn new(
        id: InstanceId,
        url: Option<String>,
        def: TemplateDef,
        parent: Option<ParamRef>,
    ) -> Self {
        let parameters = def
            .parameters
            .iter()
            .map(|d| (d.name.clone(), Parameter::from_decl(d)))
            .collect();
        Self {
            id,
            url,
            def,
            parameters,
            expanded_nodes: Vec::new(),
            anchor: None,
            state: RegenState::Expanding,
            parent,
        }
    }

    /// Instance id.
    pub fn id(&self) -> InstanceId {
        self.id
    }

    /// Template name.
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Url the definition was fetched from.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Definition this instance was created from.
    pub fn def(&self) -> &TemplateDef {
        &self.def
    }

    /// Roots of the installed fragment, in insertion order.
    pub fn expanded_nodes(&self) -> &[NodeId] {
        &self.expanded_nodes
    }

    /// Parent node the fragment was installed under.
    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// Lifecycle state.
    pub fn state(&self) -> RegenState {
        self.state
    }

    /// Slot holding this instance, for nested instances.
    pub fn parent(&self) -> Option<&ParamRef> {
        self.parent.as_ref()
    }

    /// Parameters in interface order.
    pub fn parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.values()
    }

    /// Parameter `name`.
    pub fn parameter(&self, name: &str) -> ProtoResult<&Parameter> {
        self.parameters
            .get(name)
            .ok_or_else(|| ProtoError::unknown_parameter(self.id, name))
    }

    pub(crate) fn parameter_mut(&mut self, name: &str) -> ProtoResult<&mut Parameter> {
        let id = self.id;
        self.parameters
            .get_mut(name)
            .ok_or_else(|| ProtoError::unknown_parameter(id, name))
    }

    /// Snapshot of the current values, as handed to the expander.
    pub fn values(&self) -> ParameterValues {
        self.parameters
            .iter()
            .map(|(name, p)| (name.clone(), p.value.clone()))
            .collect()
    }

    /// `(parameter, instance)` for every node parameter currently holding a nested instance.
    pub fn nested_instances(&self) -> impl Iterator<Item = (&str, InstanceId)> {
        self.parameters
            .values()
            .filter_map(|p| p.value.as_instance().map(|id| (p.name.as_str(), id)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/proto/instance.rs"]
mod tests;
