use std::collections::{BTreeMap, HashSet};

use crate::foundation::core::{Binding, InstanceId};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::proto::instance::ProtoInstance;
use crate::scene::graph::SceneAccess;

/// Every `(node, field)` driven by `instance.parameter`, recomputed from the live scene.
///
/// Order: the instance's own bindings in pre-order over its expanded fragment, then the
/// bindings of nested-instance parameters linked to this parameter, by nested-instance
/// creation order. Nodes of nested instances inside the fragment are not the instance's own
/// and only appear through their links.
pub fn resolve_bindings(
    instances: &BTreeMap<InstanceId, ProtoInstance>,
    scene: &dyn SceneAccess,
    instance: InstanceId,
    parameter: &str,
) -> ProtoResult<Vec<Binding>> {
    let inst = instances
        .get(&instance)
        .ok_or(ProtoError::UnknownInstance(instance))?;
    inst.parameter(parameter)?;

    let mut out = Vec::new();
    let mut visited = HashSet::new();
    collect(instances, scene, inst, parameter, &mut visited, &mut out);
    Ok(out)
}

fn collect(
    instances: &BTreeMap<InstanceId, ProtoInstance>,
    scene: &dyn SceneAccess,
    inst: &ProtoInstance,
    parameter: &str,
    visited: &mut HashSet<(InstanceId, String)>,
    out: &mut Vec<Binding>,
) {
    if !visited.insert((inst.id, parameter.to_string())) {
        return;
    }

    for root in &inst.expanded_nodes {
        for id in scene.subtree(*root) {
            let Some(node) = scene.node(id) else {
                continue;
            };
            if node.owner != Some(inst.id) {
                continue;
            }
            out.extend(
                node.fields_driven_by(parameter)
                    .map(|field| Binding::new(id, field)),
            );
        }
    }

    let children = instances
        .values()
        .filter(|c| c.parent.as_ref().is_some_and(|p| p.instance == inst.id));
    for child in children {
        for p in child.parameters.values() {
            if p.link.as_deref() == Some(parameter) {
                collect(instances, scene, child, &p.name, visited, out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/proto/bindings.rs"]
mod tests;
