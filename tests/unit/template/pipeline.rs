use super::*;

use std::collections::BTreeMap;

use crate::foundation::core::InstanceId;
use crate::foundation::error::ProtoError;
use crate::scene::graph::SceneGraph;
use crate::scene::node::NodeDescriptor;
use crate::template::definition::{CountSource, NodeTemplate, ParameterDecl, TemplateDef};
use crate::template::expand::{BodyExpander, ParameterValues};
use crate::value::types::{Value, ValueKind};

struct FailingExpander;

impl TemplateExpander for FailingExpander {
    fn expand(
        &self,
        _def: &TemplateDef,
        _values: &ParameterValues,
    ) -> ProtoResult<Vec<NodeDescriptor>> {
        Err(ProtoError::expansion("body grammar error"))
    }
}

fn row_instance() -> ProtoInstance {
    let def = TemplateDef::new("Row")
        .param(ParameterDecl::new("n", ValueKind::Int32).with_default(Value::Int32(2)))
        .node(NodeTemplate::new("Box").repeat(CountSource::Is { is: "n".to_string() }));
    ProtoInstance::new(InstanceId(1), None, def, None)
}

#[test]
fn expand_at_installs_fragment_under_anchor() {
    let mut scene = SceneGraph::new();
    let world = scene.add_node("Group", BTreeMap::new(), None).unwrap();
    let mut inst = row_instance();

    let ids = expand_at(&mut inst, &mut scene, &BodyExpander, Some(world)).unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(inst.expanded_nodes, ids);
    assert_eq!(inst.state, RegenState::Expanded);
    assert_eq!(inst.anchor, Some(world));
    assert_eq!(scene.children_of(world), ids.as_slice());
}

#[test]
fn regenerate_replaces_nodes_in_place() {
    let mut scene = SceneGraph::new();
    let world = scene.add_node("Group", BTreeMap::new(), None).unwrap();
    let sibling = scene.add_node("Shape", BTreeMap::new(), Some(world)).unwrap();
    let mut inst = row_instance();
    let old = expand_at(&mut inst, &mut scene, &BodyExpander, Some(world)).unwrap();

    inst.parameter_mut("n").unwrap().value = Value::Int32(3);
    let new = regenerate(&mut inst, &mut scene, &BodyExpander).unwrap();

    assert_eq!(new.len(), 3);
    assert!(old.iter().all(|id| !scene.contains(*id)));
    assert!(new.iter().all(|id| scene.node(*id).unwrap().parent == Some(world)));
    assert_eq!(scene.children_of(world)[0], sibling);
    assert_eq!(inst.state, RegenState::Expanded);
}

#[test]
fn anchor_follows_moved_fragment() {
    let mut scene = SceneGraph::new();
    let world = scene.add_node("Group", BTreeMap::new(), None).unwrap();
    let mut inst = row_instance();
    expand_at(&mut inst, &mut scene, &BodyExpander, Some(world)).unwrap();

    // Host moved the first node elsewhere.
    let other = scene.add_node("Group", BTreeMap::new(), None).unwrap();
    let first = inst.expanded_nodes[0];
    scene.node_mut(first).unwrap().parent = Some(other);
    assert_eq!(capture_anchor(&inst, &scene), Some(other));

    scene.remove_node(first);
    inst.expanded_nodes.remove(0);
    scene.remove_node(inst.expanded_nodes[0]);
    assert_eq!(capture_anchor(&inst, &scene), Some(world));
}

#[test]
fn teardown_skips_nodes_already_gone() {
    let mut scene = SceneGraph::new();
    let mut inst = row_instance();
    let ids = expand_at(&mut inst, &mut scene, &BodyExpander, None).unwrap();
    scene.remove_node(ids[0]);

    assert_eq!(teardown(&mut inst, &mut scene), 1);
    assert!(inst.expanded_nodes.is_empty());
    assert!(scene.is_empty());
    assert_eq!(teardown(&mut inst, &mut scene), 0);
}

#[test]
fn failed_regeneration_leaves_no_nodes() {
    let mut scene = SceneGraph::new();
    let world = scene.add_node("Group", BTreeMap::new(), None).unwrap();
    let mut inst = row_instance();
    expand_at(&mut inst, &mut scene, &BodyExpander, Some(world)).unwrap();

    let err = regenerate(&mut inst, &mut scene, &FailingExpander).unwrap_err();
    assert!(matches!(err, ProtoError::Expansion(_)));
    assert_eq!(inst.state, RegenState::Failed);
    assert!(inst.expanded_nodes.is_empty());
    assert!(scene.children_of(world).is_empty());
    assert_eq!(inst.anchor, Some(world));

    // A later successful run goes back to the same anchor.
    let ids = regenerate(&mut inst, &mut scene, &BodyExpander).unwrap();
    assert_eq!(scene.children_of(world), ids.as_slice());
}
