use super::*;

#[test]
fn validate_rejects_other_variants() {
    let err = validate(ValueKind::Float, &Value::String("2.5".to_string())).unwrap_err();
    match err {
        ProtoError::TypeMismatch { expected, found } => {
            assert_eq!(expected, ValueKind::Float);
            assert_eq!(found, ValueKind::String);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(validate(ValueKind::Int32, &Value::Float(1.0)).is_err());
    assert!(validate(ValueKind::Vec2, &Value::Vec3(Vec3::new(0.0, 0.0, 0.0))).is_err());
}

#[test]
fn color_reuses_vec3_with_range_check() {
    assert!(validate(ValueKind::Color, &Value::Vec3(Vec3::new(0.0, 0.5, 1.0))).is_ok());

    let err = validate(ValueKind::Color, &Value::Vec3(Vec3::new(0.0, 1.5, 1.0))).unwrap_err();
    assert!(matches!(err, ProtoError::Validation(_)));
    assert!(err.to_string().contains("g = 1.5"));

    // Out-of-range components are fine for plain vectors.
    assert!(validate(ValueKind::Vec3, &Value::Vec3(Vec3::new(0.0, 1.5, -3.0))).is_ok());
}

#[test]
fn non_finite_numbers_are_rejected() {
    assert!(validate(ValueKind::Float, &Value::Float(f64::NAN)).is_err());
    assert!(validate(ValueKind::Color, &Value::Vec3(Vec3::new(f64::NAN, 0.0, 0.0))).is_err());
    assert!(
        validate(
            ValueKind::Rotation,
            &Value::Rotation(Vec4::new(0.0, 1.0, 0.0, f64::INFINITY))
        )
        .is_err()
    );
}

#[test]
fn defaults_match_their_kind() {
    for kind in ValueKind::ALL {
        let value = Value::default_for(kind);
        assert!(
            validate(kind, &value).is_ok(),
            "default for {kind} must validate"
        );
    }
}

#[test]
fn vrml_names_round_trip() {
    for kind in ValueKind::ALL {
        assert_eq!(ValueKind::from_vrml_name(kind.vrml_name()), Some(kind));
    }
    assert_eq!(ValueKind::from_vrml_name("SFImage"), None);
}

#[test]
fn kind_accepts_vrml_alias_in_json() {
    let k: ValueKind = serde_json::from_str("\"SFColor\"").unwrap();
    assert_eq!(k, ValueKind::Color);
    let k: ValueKind = serde_json::from_str("\"int32\"").unwrap();
    assert_eq!(k, ValueKind::Int32);
}

#[test]
fn value_json_shape_is_externally_tagged() {
    let v = Value::Vec3(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(
        serde_json::to_value(&v).unwrap(),
        serde_json::json!({ "vec3": { "x": 1.0, "y": 2.0, "z": 3.0 } })
    );
    let n: Value = serde_json::from_str(r#"{ "node": null }"#).unwrap();
    assert_eq!(n, Value::Node(None));
}

#[test]
fn labels_are_human_readable() {
    assert_eq!(Value::Bool(true).label(), "TRUE");
    assert_eq!(Value::Float(2.5).label(), "2.5");
    assert_eq!(Value::Vec2(Vec2::new(1.0, 0.5)).label(), "1 0.5");
    assert_eq!(Value::Node(None).label(), "NULL");
    assert_eq!(Value::Node(Some(InstanceId(4))).label(), "proto#4");
    assert_eq!(Value::StringList(vec!["a".into(), "b".into()]).label(), "[2 strings]");
}

#[test]
fn list_kinds_are_flagged() {
    assert!(ValueKind::NodeList.is_list());
    assert!(ValueKind::StringList.is_list());
    assert!(!ValueKind::Node.is_list());
}
