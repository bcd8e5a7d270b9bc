use super::*;

fn ball() -> TemplateDef {
    TemplateDef::new("Ball")
        .param(ParameterDecl::new("size", ValueKind::Float).with_default(Value::Float(1.0)))
        .param(ParameterDecl::new("visible", ValueKind::Bool).with_default(Value::Bool(true)))
        .param(ParameterDecl::new("count", ValueKind::Int32).regenerating())
        .node(
            NodeTemplate::new("Transform").when("visible").child(
                NodeTemplate::new("Sphere")
                    .is("radius", "size")
                    .repeat(CountSource::Is {
                        is: "count".to_string(),
                    }),
            ),
        )
}

#[test]
fn builder_definition_validates() {
    let def = ball();
    def.validate().unwrap();
    assert_eq!(def.decl("size").unwrap().initial_value(), Value::Float(1.0));
    assert_eq!(def.decl("count").unwrap().initial_value(), Value::Int32(0));
    assert!(def.decl("count").unwrap().regenerates);
    assert!(def.decl("missing").is_none());
}

#[test]
fn json_format_parses_is_and_literal_sources() {
    let s = r#"{
        "name": "Lamp",
        "parameters": [
            { "name": "on", "kind": "SFBool", "default": { "bool": true } },
            { "name": "color", "kind": "color", "regenerates": false }
        ],
        "body": [
            {
                "type": "PointLight",
                "def": "L",
                "when": "on",
                "fields": {
                    "color": { "is": "color" },
                    "intensity": { "float": 0.8 }
                }
            },
            { "use": "L", "repeat": 2 }
        ]
    }"#;
    let def = TemplateDef::from_json_str(s).unwrap();
    assert_eq!(def.name, "Lamp");
    assert_eq!(def.parameters[1].kind, ValueKind::Color);

    let light = &def.body[0];
    assert_eq!(
        light.fields["color"],
        FieldSource::Is {
            is: "color".to_string()
        }
    );
    assert_eq!(
        light.fields["intensity"],
        FieldSource::Literal(Value::Float(0.8))
    );
    assert_eq!(def.body[1].use_name.as_deref(), Some("L"));
    assert_eq!(def.body[1].repeat, Some(CountSource::Fixed(2)));
}

#[test]
fn duplicate_parameters_are_rejected() {
    let def = TemplateDef::new("Dup")
        .param(ParameterDecl::new("a", ValueKind::Float))
        .param(ParameterDecl::new("a", ValueKind::Int32));
    let err = def.validate().unwrap_err();
    assert!(err.to_string().contains("declares parameter 'a' twice"));
}

#[test]
fn defaults_must_match_declared_kind() {
    let def = TemplateDef::new("Bad")
        .param(ParameterDecl::new("c", ValueKind::Color).with_default(Value::Float(1.0)));
    assert!(matches!(def.validate(), Err(ProtoError::Validation(_))));

    let def = TemplateDef::new("Slot").param(
        ParameterDecl::new("child", ValueKind::Node)
            .with_default(Value::Node(Some(crate::foundation::core::InstanceId(1)))),
    );
    assert!(def.validate().unwrap_err().to_string().contains("must be NULL"));
}

#[test]
fn body_references_are_checked() {
    let def = TemplateDef::new("T").node(NodeTemplate::new("Sphere").is("radius", "size"));
    assert!(def
        .validate()
        .unwrap_err()
        .to_string()
        .contains("undeclared parameter 'size'"));

    let def = TemplateDef::new("T")
        .param(ParameterDecl::new("flag", ValueKind::Int32))
        .node(NodeTemplate::new("Shape").when("flag"));
    assert!(def
        .validate()
        .unwrap_err()
        .to_string()
        .contains("must be SFBool"));

    let def = TemplateDef::new("T").node(NodeTemplate::default());
    assert!(def.validate().is_err());
}

#[test]
fn parse_errors_are_serde_errors() {
    let err = TemplateDef::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ProtoError::Serde(_)));

    let err = TemplateDef::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, ProtoError::Load(_)));
}
