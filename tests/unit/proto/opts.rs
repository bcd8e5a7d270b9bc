use super::*;

#[test]
fn defaults() {
    let opts = EngineOpts::default();
    assert_eq!(opts.slot_policy, SlotFilterPolicy::Union);
    assert!(opts.render_after_failed_regeneration);
    assert_eq!(opts.max_nesting_depth, 16);
}

#[test]
fn partial_json_keeps_defaults() {
    let opts: EngineOpts = serde_json::from_str(r#"{ "slot_policy": "first_wins" }"#).unwrap();
    assert_eq!(opts.slot_policy, SlotFilterPolicy::FirstWins);
    assert_eq!(opts.max_nesting_depth, 16);

    assert!(matches!(
        EngineOpts::from_path("no/such/opts.json"),
        Err(ProtoError::Load(_))
    ));
}
