use crate::foundation::core::NodeId;
use crate::foundation::error::ProtoError;
use crate::scene::graph::SceneAccess;
use crate::value::types::Value;

/// A single field write that could not be applied.
#[derive(Debug)]
pub struct FieldWriteFailure {
    /// Target node.
    pub node: NodeId,
    /// Target field.
    pub field: String,
    /// Why the write failed.
    pub error: ProtoError,
}

/// Result of writing one field and its aliases.
#[derive(Debug, Default)]
pub struct Propagation {
    /// Nodes whose field now holds the new value.
    pub written: Vec<NodeId>,
    /// Targets that were skipped.
    pub failures: Vec<FieldWriteFailure>,
}

impl Propagation {
    /// Fold another propagation into this one.
    pub fn merge(&mut self, other: Propagation) {
        self.written.extend(other.written);
        self.failures.extend(other.failures);
    }

    fn record(&mut self, node: NodeId, field: &str, result: Result<(), ProtoError>) {
        match result {
            Ok(()) => self.written.push(node),
            Err(error) => self.failures.push(FieldWriteFailure {
                node,
                field: field.to_string(),
                error,
            }),
        }
    }
}

/// Write `field` on `node`, then on every alias listed by `node`.
///
/// Aliases of aliases are not followed. A failing target is recorded and skipped.
pub fn propagate(
    scene: &mut dyn SceneAccess,
    node: NodeId,
    field: &str,
    value: &Value,
) -> Propagation {
    let mut out = Propagation::default();

    let aliases = match scene.node_mut(node) {
        Some(n) => {
            let result = n.set_field(field, value.clone());
            out.record(node, field, result);
            n.alias_ids.clone()
        }
        None => {
            out.record(node, field, Err(ProtoError::UnknownNode(node)));
            return out;
        }
    };

    for alias in aliases {
        let result = match scene.node_mut(alias) {
            Some(a) => a.set_field(field, value.clone()),
            None => Err(ProtoError::UnknownNode(alias)),
        };
        out.record(alias, field, result);
    }

    tracing::debug!(
        node = %node,
        field,
        written = out.written.len(),
        failed = out.failures.len(),
        "propagated field write"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/unit/proto/alias.rs"]
mod tests;
