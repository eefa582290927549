use prism_kernel::config::load_config;
use prism_kernel::domain::config::{EngineConfig, EngineConfigInner};
use serial_test::serial;
use std::io::Write;

fn write_config(ext: &str, body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(ext).tempfile().expect("temp file");
    file.write_all(body.as_bytes()).expect("write config");
    file
}

#[test]
#[serial]
fn loads_toml_file_over_defaults() {
    let file = write_config(
        ".toml",
        r#"
[generator]
cache_size = 8
max_depth = 4

[flatten]
joiner = "__"
"#,
    );

    let cfg: EngineConfig = load_config::<EngineConfigInner>(Some(file.path())).unwrap().into();
    assert_eq!(cfg.generator.cache_size, 8);
    assert_eq!(cfg.generator.max_depth, 4);
    assert!(cfg.generator.cache_enabled);
    assert_eq!(cfg.flatten.joiner, "__");
    assert!(cfg.parser.cache_enabled);
}

#[test]
#[serial]
fn missing_path_uses_defaults() {
    let cfg: EngineConfig = load_config::<EngineConfig>(None::<&str>).unwrap();
    assert_eq!(cfg.generator.cache_size, 128);
    assert_eq!(cfg.flatten.joiner, ".");
}

#[test]
#[serial]
fn missing_file_is_an_error() {
    let err = load_config::<EngineConfig>(Some("does/not/exist.toml")).unwrap_err();
    assert_eq!(err.kind(), "Config");
    assert!(err.to_string().contains("Failed to build config"));
}

#[test]
#[serial]
fn loads_json_file_into_arc_config() {
    let file = write_config(".json", r#"{ "parser": { "cache_enabled": false }, "logging": { "json": true } }"#);

    let cfg: EngineConfig = load_config(Some(file.path())).unwrap();
    assert!(!cfg.parser.cache_enabled);
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.level, "info");
}
