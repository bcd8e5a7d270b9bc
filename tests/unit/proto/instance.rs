use super::*;

use crate::template::definition::ParameterDecl;
use crate::value::types::{Value, ValueKind};

#[test]
fn parameters_start_from_declarations_in_order() {
    let def = TemplateDef::new("Lamp")
        .param(ParameterDecl::new("on", ValueKind::Bool).with_default(Value::Bool(true)))
        .param(ParameterDecl::new("bulb", ValueKind::Node))
        .param(ParameterDecl::new("height", ValueKind::Float).regenerating());
    let mut inst = ProtoInstance::new(InstanceId(3), Some("lamp.json".into()), def, None);

    let names: Vec<&str> = inst.parameters().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["on", "bulb", "height"]);
    assert_eq!(inst.name(), "Lamp");
    assert_eq!(inst.url(), Some("lamp.json"));
    assert_eq!(inst.parameter("on").unwrap().value, Value::Bool(true));
    assert!(inst.parameter("height").unwrap().regenerates);
    assert!(matches!(
        inst.parameter("nope"),
        Err(ProtoError::UnknownParameter { .. })
    ));

    let values = inst.values();
    assert_eq!(values.get_index(1).unwrap().0, "bulb");
    assert_eq!(inst.nested_instances().count(), 0);

    inst.parameter_mut("bulb").unwrap().value = Value::Node(Some(InstanceId(9)));
    assert_eq!(
        inst.nested_instances().collect::<Vec<_>>(),
        vec![("bulb", InstanceId(9))]
    );
}

#[test]
fn parameter_set_checks_kind() {
    let def = TemplateDef::new("T").param(ParameterDecl::new("c", ValueKind::Color));
    let mut inst = ProtoInstance::new(InstanceId(0), None, def, None);
    let p = inst.parameter_mut("c").unwrap();
    assert!(p.set(Value::Float(1.0)).is_err());
    assert!(
        p.set(Value::Vec3(crate::foundation::core::Vec3::new(2.0, 0.0, 0.0)))
            .is_err()
    );
    assert_eq!(
        p.value,
        Value::Vec3(crate::foundation::core::Vec3::new(0.0, 0.0, 0.0))
    );
}
