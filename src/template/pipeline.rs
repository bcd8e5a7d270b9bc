use crate::foundation::core::NodeId;
use crate::foundation::error::ProtoResult;
use crate::proto::instance::ProtoInstance;
use crate::scene::graph::SceneAccess;
use crate::template::expand::TemplateExpander;

/// Lifecycle state of a template instance's expansion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenState {
    /// Expansion installed and current.
    Expanded,
    /// Old expansion being removed.
    TearingDown,
    /// New expansion being built and installed.
    Expanding,
    /// Last expansion failed; the instance owns no nodes until the next edit succeeds.
    Failed,
}

/// Parent under which the next expansion of `instance` goes.
///
/// The parent of the first still-present expanded node wins, so a host that moved the
/// fragment keeps it where it put it. Otherwise the recorded anchor is reused.
pub fn capture_anchor(instance: &ProtoInstance, scene: &dyn SceneAccess) -> Option<NodeId> {
    instance
        .expanded_nodes
        .iter()
        .find_map(|id| scene.node(*id))
        .map_or(instance.anchor, |node| node.parent)
}

/// Remove every expanded node of `instance` and forget them. Returns how many were present.
///
/// Nodes already gone (removed with an enclosing fragment, or by the host) are skipped.
pub fn teardown(instance: &mut ProtoInstance, scene: &mut dyn SceneAccess) -> usize {
    let mut removed = 0;
    for id in instance.expanded_nodes.drain(..) {
        if scene.remove_node(id) {
            removed += 1;
        } else {
            tracing::debug!(instance = %instance.id, node = %id, "expanded node already gone");
        }
    }
    removed
}

/// Expand `instance` with its current values and install the fragment under `anchor`.
///
/// On failure nothing is installed, `expanded_nodes` is empty and the state is `Failed`.
pub fn expand_at(
    instance: &mut ProtoInstance,
    scene: &mut dyn SceneAccess,
    expander: &dyn TemplateExpander,
    anchor: Option<NodeId>,
) -> ProtoResult<Vec<NodeId>> {
    instance.state = RegenState::Expanding;
    instance.anchor = anchor;

    let values = instance.values();
    let installed = expander
        .expand(&instance.def, &values)
        .and_then(|descriptors| scene.insert_nodes(&descriptors, anchor, instance.id));

    match installed {
        Ok(ids) => {
            instance.expanded_nodes = ids.clone();
            instance.state = RegenState::Expanded;
            Ok(ids)
        }
        Err(e) => {
            instance.expanded_nodes.clear();
            instance.state = RegenState::Failed;
            tracing::warn!(instance = %instance.id, error = %e, "expansion failed");
            Err(e)
        }
    }
}

/// Tear down and re-expand `instance` in place.
///
/// Teardown always happens, so a failed expansion leaves the instance `Failed` with no nodes.
#[tracing::instrument(skip(instance, scene, expander), fields(instance = %instance.id))]
pub fn regenerate(
    instance: &mut ProtoInstance,
    scene: &mut dyn SceneAccess,
    expander: &dyn TemplateExpander,
) -> ProtoResult<Vec<NodeId>> {
    let anchor = capture_anchor(instance, scene);
    instance.state = RegenState::TearingDown;
    let removed = teardown(instance, scene);
    tracing::debug!(removed, anchor = ?anchor, "torn down");
    expand_at(instance, scene, expander, anchor)
}

#[cfg(test)]
#[path = "../../tests/unit/template/pipeline.rs"]
mod tests;
