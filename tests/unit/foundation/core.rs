use super::*;

#[test]
fn ids_display_with_prefixes() {
    assert_eq!(NodeId(12).to_string(), "n12");
    assert_eq!(InstanceId(0).to_string(), "proto#0");
    assert_eq!(ParamRef::new(InstanceId(2), "size").to_string(), "proto#2.size");
}

#[test]
fn instance_ids_order_by_creation() {
    let mut ids = vec![InstanceId(4), InstanceId(1), InstanceId(3)];
    ids.sort();
    assert_eq!(ids, vec![InstanceId(1), InstanceId(3), InstanceId(4)]);
}

#[test]
fn binding_serializes_as_plain_struct() {
    let b = Binding::new(NodeId(5), "radius");
    let json = serde_json::to_value(&b).unwrap();
    assert_eq!(json, serde_json::json!({ "node": 5, "field": "radius" }));
}
