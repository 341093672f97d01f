use jscloak::config::{load_config, ConfigError, SinkMode};

#[test]
fn cli_values_land_in_the_config() {
    let cfg = load_config(
        "http://localhost/engine",
        &Some("key".into()),
        "out/downloads",
        "http://bucket.local",
        "artifacts",
    )
    .unwrap();
    assert_eq!(cfg.engine_endpoint, "http://localhost/engine");
    assert_eq!(cfg.engine_api_key, "key");
    assert_eq!(cfg.output_dir, "out/downloads");
    assert_eq!(cfg.bucket_endpoint, "http://bucket.local");
    assert_eq!(cfg.bucket_name, "artifacts");
}

#[test]
fn missing_api_key_defaults_to_empty() {
    let cfg = load_config(
        "http://localhost/engine",
        &None,
        "out",
        "http://bucket.local",
        "artifacts",
    )
    .unwrap();
    assert_eq!(cfg.engine_api_key, "");
}

#[test]
fn sink_mode_parses_the_two_delivery_modes() {
    assert_eq!("local".parse::<SinkMode>().unwrap(), SinkMode::Local);
    assert_eq!("remote".parse::<SinkMode>().unwrap(), SinkMode::Remote);
    let err = "ftp".parse::<SinkMode>().unwrap_err();
    assert!(matches!(err, ConfigError::UnknownSinkMode(mode) if mode == "ftp"));
}
