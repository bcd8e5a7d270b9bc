use indexmap::IndexMap;

use crate::foundation::error::{ProtoError, ProtoResult};
use crate::scene::node::NodeDescriptor;
use crate::template::definition::{CountSource, FieldSource, NodeTemplate, TemplateDef};
use crate::value::types::Value;

/// Current parameter values of an instance, in interface order.
pub type ParameterValues = IndexMap<String, Value>;

/// Turns a definition plus parameter values into scene-node descriptors.
///
/// Must be pure: the same inputs give the same fragment, and nothing is installed.
pub trait TemplateExpander {
    /// Expand `def` with `values`. Failures are [`ProtoError::Expansion`].
    fn expand(&self, def: &TemplateDef, values: &ParameterValues)
    -> ProtoResult<Vec<NodeDescriptor>>;
}

/// Expander for the declarative body format of [`TemplateDef`].
///
/// `is` fields copy the parameter's current value and record an `IS` connection, `when`
/// guards drop a node while their flag is false, and `repeat` emits a node several times.
/// A fragment larger than [`BodyExpander::MAX_NODES`] is an expansion error.
#[derive(Clone, Copy, Debug, Default)]
pub struct BodyExpander;

impl BodyExpander {
    /// Largest number of descriptors a single expansion may produce.
    pub const MAX_NODES: usize = 100_000;

    fn expand_into(
        &self,
        node: &NodeTemplate,
        values: &ParameterValues,
        out: &mut Vec<NodeDescriptor>,
        produced: &mut usize,
    ) -> ProtoResult<()> {
        if let Some(guard) = &node.when {
            match lookup(values, guard)? {
                Value::Bool(true) => {}
                Value::Bool(false) => return Ok(()),
                other => {
                    return Err(ProtoError::expansion(format!(
                        "when guard '{guard}' holds {}, expected SFBool",
                        other.kind()
                    )));
                }
            }
        }

        let copies = match &node.repeat {
            None => 1,
            Some(CountSource::Fixed(n)) => *n as usize,
            Some(CountSource::Is { is }) => match lookup(values, is)? {
                Value::Int32(n) if *n >= 0 => *n as usize,
                Value::Int32(n) => {
                    return Err(ProtoError::expansion(format!(
                        "repeat count '{is}' is negative ({n})"
                    )));
                }
                other => {
                    return Err(ProtoError::expansion(format!(
                        "repeat count '{is}' holds {}, expected SFInt32",
                        other.kind()
                    )));
                }
            },
        };

        if copies > Self::MAX_NODES - *produced {
            return Err(ProtoError::expansion(format!(
                "{} copies of {} exceed the limit of {} nodes",
                copies,
                node_label(node),
                Self::MAX_NODES
            )));
        }

        for _ in 0..copies {
            *produced += 1;
            if *produced > Self::MAX_NODES {
                return Err(ProtoError::expansion(format!(
                    "expansion exceeds the limit of {} nodes",
                    Self::MAX_NODES
                )));
            }
            let mut desc = match &node.use_name {
                Some(name) => NodeDescriptor::alias(name.clone()),
                None => NodeDescriptor::new(node.type_name.clone()),
            };
            desc.def_name = node.def.clone();
            for (field, source) in &node.fields {
                desc = match source {
                    FieldSource::Literal(v) => desc.field(field.clone(), v.clone()),
                    FieldSource::Is { is } => {
                        desc.connected(field.clone(), is.clone(), lookup(values, is)?.clone())
                    }
                };
            }
            for child in &node.children {
                self.expand_into(child, values, &mut desc.children, produced)?;
            }
            out.push(desc);
        }
        Ok(())
    }
}

impl TemplateExpander for BodyExpander {
    #[tracing::instrument(skip(self, def, values), fields(template = %def.name))]
    fn expand(
        &self,
        def: &TemplateDef,
        values: &ParameterValues,
    ) -> ProtoResult<Vec<NodeDescriptor>> {
        let mut out = Vec::with_capacity(def.body.len());
        let mut produced = 0;
        for node in &def.body {
            self.expand_into(node, values, &mut out, &mut produced)?;
        }
        tracing::debug!(roots = out.len(), "expanded template body");
        Ok(out)
    }
}

fn node_label(node: &NodeTemplate) -> &str {
    match &node.use_name {
        Some(name) => name,
        None => &node.type_name,
    }
}

fn lookup<'a>(values: &'a ParameterValues, name: &str) -> ProtoResult<&'a Value> {
    values
        .get(name)
        .ok_or_else(|| ProtoError::expansion(format!("unknown parameter '{name}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/template/expand.rs"]
mod tests;
