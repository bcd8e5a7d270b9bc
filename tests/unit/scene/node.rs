use super::*;

#[test]
fn set_field_rejects_undeclared_fields() {
    let mut node = SceneNode {
        id: NodeId(3),
        type_name: "Sphere".to_string(),
        fields: BTreeMap::from([("radius".to_string(), Value::Float(1.0))]),
        parent: None,
        children: Vec::new(),
        alias_ids: Vec::new(),
        alias_of: None,
        owner: None,
        connections: vec![FieldConnection::new("radius", "size")],
    };

    node.set_field("radius", Value::Float(2.0)).unwrap();
    assert_eq!(node.field("radius"), Some(&Value::Float(2.0)));

    let err = node.set_field("height", Value::Float(2.0)).unwrap_err();
    assert_eq!(err.to_string(), "field not found: node n3 has no field 'height'");
    assert_eq!(node.fields.len(), 1);

    assert_eq!(node.fields_driven_by("size").collect::<Vec<_>>(), vec!["radius"]);
    assert_eq!(node.fields_driven_by("other").count(), 0);
}

#[test]
fn descriptor_builder_and_json_shape() {
    let d = NodeDescriptor::new("Transform")
        .def("T")
        .child(NodeDescriptor::new("Shape").child(NodeDescriptor::new("Box")));
    assert_eq!(d.count(), 3);

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["type"], "Transform");
    assert_eq!(json["def_name"], "T");
    assert!(json.get("use_name").is_none());

    let back: NodeDescriptor = serde_json::from_value(json).unwrap();
    assert_eq!(back, d);
}
