use super::*;

#[test]
fn scalars_parse_from_single_inputs() {
    assert_eq!(
        Value::parse_inputs(ValueKind::Bool, &["TRUE"]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        Value::parse_inputs(ValueKind::Int32, &[" 42 "]).unwrap(),
        Value::Int32(42)
    );
    assert_eq!(
        Value::parse_inputs(ValueKind::Float, &["0.25"]).unwrap(),
        Value::Float(0.25)
    );
    assert_eq!(
        Value::parse_inputs(ValueKind::String, &["  spaced  "]).unwrap(),
        Value::String("  spaced  ".to_string())
    );
}

#[test]
fn vectors_take_one_input_per_component() {
    assert_eq!(
        Value::parse_inputs(ValueKind::Vec2, &["1", "2"]).unwrap(),
        Value::Vec2(Vec2::new(1.0, 2.0))
    );
    assert_eq!(
        Value::parse_literal(ValueKind::Rotation, "0 1 0 1.5").unwrap(),
        Value::Rotation(Vec4::new(0.0, 1.0, 0.0, 1.5))
    );
    let err = Value::parse_inputs(ValueKind::Vec3, &["1", "2"]).unwrap_err();
    assert!(err.to_string().contains("expects 3 input(s)"));
}

#[test]
fn colors_are_range_checked() {
    assert_eq!(
        Value::parse_literal(ValueKind::Color, "1 0.5 0").unwrap(),
        Value::Vec3(Vec3::new(1.0, 0.5, 0.0))
    );
    assert!(Value::parse_literal(ValueKind::Color, "2 0 0").is_err());
}

#[test]
fn garbage_is_a_validation_error() {
    assert!(matches!(
        Value::parse_literal(ValueKind::Int32, "1.5"),
        Err(ProtoError::Validation(_))
    ));
    assert!(matches!(
        Value::parse_literal(ValueKind::Float, "inf"),
        Err(ProtoError::Validation(_))
    ));
    assert!(matches!(
        Value::parse_literal(ValueKind::Bool, "maybe"),
        Err(ProtoError::Validation(_))
    ));
}

#[test]
fn node_and_list_kinds_have_no_text_form() {
    for kind in [ValueKind::Node, ValueKind::NodeList, ValueKind::StringList] {
        assert!(matches!(
            Value::parse_literal(kind, "x"),
            Err(ProtoError::UnsupportedVariant(k)) if k == kind
        ));
    }
}
