use super::*;

use std::collections::BTreeMap;

use crate::foundation::core::InstanceId;
use crate::scene::graph::SceneGraph;
use crate::scene::node::NodeDescriptor;

#[test]
fn write_reaches_owner_and_every_alias() {
    let mut scene = SceneGraph::new();
    let frag = vec![
        NodeDescriptor::new("Sphere").def("S").field("radius", Value::Float(1.0)),
        NodeDescriptor::alias("S"),
        NodeDescriptor::alias("S"),
    ];
    let ids = scene.insert_nodes(&frag, None, InstanceId(0)).unwrap();

    let out = propagate(&mut scene, ids[0], "radius", &Value::Float(2.5));
    assert_eq!(out.written, ids);
    assert!(out.failures.is_empty());
    for id in &ids {
        assert_eq!(
            scene.node(*id).unwrap().field("radius"),
            Some(&Value::Float(2.5))
        );
    }
}

#[test]
fn missing_field_on_one_target_does_not_stop_the_others() {
    let mut scene = SceneGraph::new();
    let owner = scene
        .add_node(
            "Material",
            BTreeMap::from([("transparency".to_string(), Value::Float(0.0))]),
            None,
        )
        .unwrap();
    let bare = scene.add_node("Material", BTreeMap::new(), None).unwrap();
    let full = scene
        .add_node(
            "Material",
            BTreeMap::from([("transparency".to_string(), Value::Float(0.0))]),
            None,
        )
        .unwrap();
    scene.add_alias(owner, bare).unwrap();
    scene.add_alias(owner, full).unwrap();

    let out = propagate(&mut scene, owner, "transparency", &Value::Float(0.5));
    assert_eq!(out.written, vec![owner, full]);
    assert_eq!(out.failures.len(), 1);
    assert_eq!(out.failures[0].node, bare);
    assert!(matches!(
        out.failures[0].error,
        ProtoError::FieldNotFound { .. }
    ));
    assert!(scene.node(bare).unwrap().fields.is_empty());
}

#[test]
fn missing_owner_is_reported() {
    let mut scene = SceneGraph::new();
    let out = propagate(&mut scene, NodeId(4), "radius", &Value::Float(1.0));
    assert!(out.written.is_empty());
    assert!(matches!(
        out.failures[0].error,
        ProtoError::UnknownNode(NodeId(4))
    ));
}
