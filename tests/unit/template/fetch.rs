use super::*;

#[test]
fn memory_store_serves_registered_definitions() {
    let mut store = MemoryTemplateStore::new();
    store.insert("ball.json", TemplateDef::new("Ball"));

    assert_eq!(store.fetch("ball.json").unwrap().name, "Ball");
    assert_eq!(store.fetches(), 1);

    let err = store.fetch("cube.json").unwrap_err();
    assert!(matches!(err, ProtoError::Load(_)));
    assert_eq!(store.fetches(), 1);
}

#[test]
fn fs_store_reads_json_under_root() {
    let dir = PathBuf::from("target").join("unit_fs_template_store");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("box.json"),
        r#"{ "name": "Box", "body": [ { "type": "Box" } ] }"#,
    )
    .unwrap();
    std::fs::write(dir.join("broken.json"), "{").unwrap();

    let mut store = FsTemplateStore::new(&dir);
    assert_eq!(store.root(), dir.as_path());
    let def = store.fetch("box.json").unwrap();
    assert_eq!(def.body.len(), 1);

    assert!(matches!(store.fetch("missing.json"), Err(ProtoError::Load(_))));
    let err = store.fetch("broken.json").unwrap_err();
    assert!(matches!(err, ProtoError::Load(_)));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn fs_store_rejects_urls_escaping_root() {
    let mut store = FsTemplateStore::new("target");
    for url in ["../secret.json", "/etc/passwd", ""] {
        let err = store.fetch(url).unwrap_err();
        assert!(
            err.to_string().contains("inside the template root"),
            "{url}: {err}"
        );
    }
}
