#[test]
fn serialize_deserialize_default_config() {
    let config = egui_scratch::Config::default();
    let serialized = serde_json::to_string(&config).unwrap();
    let deserialized: egui_scratch::Config = serde_json::from_str(&serialized).unwrap();
    assert_eq!(config, deserialized);
}
