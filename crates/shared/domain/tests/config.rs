use prism_domain::config::{
    DEFAULT_CACHE_SIZE, EngineConfig, FlattenConfig, GeneratorConfig, ParserConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    assert!(ParserConfig::default().cache_enabled);

    let generator = GeneratorConfig::default();
    assert!(generator.cache_enabled);
    assert_eq!(generator.cache_size, DEFAULT_CACHE_SIZE);
    assert_eq!(generator.cache_size, 128);
    assert!(generator.max_depth > 0);

    assert_eq!(FlattenConfig::default().joiner, ".");
}

#[test]
fn engine_config_deserializes_partial_sections() {
    let raw = json!({
        "generator": { "cache_size": 16 },
        "flatten": { "joiner": "__" },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: EngineConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.generator.cache_size, 16);
    assert!(cfg.generator.cache_enabled, "unspecified keys keep defaults");
    assert!(cfg.parser.cache_enabled);
    assert_eq!(cfg.flatten.joiner, "__");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert!(cfg.logging.path.is_none());
}

#[test]
fn engine_config_clone_on_write() {
    let base = EngineConfig::default();
    let mut tuned = base.clone();
    tuned.generator.cache_enabled = false;

    assert!(base.generator.cache_enabled);
    assert!(!tuned.generator.cache_enabled);
}
