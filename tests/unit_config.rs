// tests/unit_config.rs
use codescope_core::config::EngineConfig;
use codescope_core::types::SourceFile;
use codescope_core::Engine;

#[test]
fn test_defaults_are_sane() {
    let config = EngineConfig::default();
    assert_eq!(config.complexity.low, 5);
    assert_eq!(config.complexity.medium, 10);
    assert_eq!(config.complexity.high, 20);
    assert_eq!(config.smells.max_function_lines, 50);
    assert_eq!(config.smells.max_params, 5);
    assert_eq!(config.limits.max_file_bytes, 512 * 1024);
    assert!(config.graph.enabled);
    assert!(config.limits.deadline().is_none());
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let config = EngineConfig::from_toml_str(
        "[complexity]\nlow = 2\n\n[smells]\nmax_params = 3\n",
    )
    .unwrap();
    assert_eq!(config.complexity.low, 2);
    assert_eq!(config.complexity.medium, 10, "untouched sections keep defaults");
    assert_eq!(config.smells.max_params, 3);
    assert_eq!(config.smells.max_function_lines, 50);
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(EngineConfig::from_toml_str("[complexity\nlow = ").is_err());
}

#[test]
fn test_toml_thresholds_move_bucket_boundaries() {
    let branchy = SourceFile {
        path: "src/f.ts".to_string(),
        language: None,
        content: "function f(x) {\n  if (x) {\n    return 1;\n  }\n  return 0;\n}\n"
            .to_string(),
    };

    let default_run = Engine::with_defaults().analyze(&[branchy.clone()]).unwrap();
    assert_eq!(default_run.quality.complexity.distribution.low, 1);

    let strict = EngineConfig::from_toml_str("[complexity]\nlow = 1\nmedium = 1\nhigh = 1\n")
        .unwrap();
    let strict_run = Engine::new(strict).analyze(&[branchy]).unwrap();
    assert_eq!(strict_run.quality.complexity.distribution.very_high, 1);
    assert_eq!(strict_run.quality.complexity.distribution.low, 0);
}

#[test]
fn test_graph_can_be_disabled_from_toml() {
    let config = EngineConfig::from_toml_str("[graph]\nenabled = false\n").unwrap();
    assert!(!config.graph.enabled);
}
