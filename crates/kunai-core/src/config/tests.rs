//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_default_settings() {
    tracing::debug!("Testing default settings");

    let settings = Settings::default();
    assert_eq!(settings.render.fold_indent, " ");
    assert!(settings.parse.recover_bad_wrapping);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_empty_toml_uses_defaults() {
    let settings = Settings::from_toml_str("").unwrap();
    assert_eq!(settings.render.fold_indent, " ");
    assert!(settings.parse.recover_bad_wrapping);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_toml_overrides() {
    let settings = Settings::from_toml_str(
        r#"
[render]
fold_indent = "\t"

[parse]
recover_bad_wrapping = false

[logging]
level = "kunai_rfc=trace"
"#,
    )
    .unwrap();

    assert_eq!(settings.render.fold_indent, "\t");
    assert!(!settings.parse.recover_bad_wrapping);
    assert_eq!(settings.logging.level, "kunai_rfc=trace");
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let settings = Settings::from_toml_str("[logging]\nlevel = \"warn\"\n").unwrap();
    assert_eq!(settings.logging.level, "warn");
    assert_eq!(settings.render.fold_indent, " ");
}

#[test]
fn test_malformed_toml_is_an_error() {
    assert!(Settings::from_toml_str("[render\nfold_indent = ").is_err());
}

#[test]
fn test_settings_debug() {
    let debug_str = format!("{:?}", Settings::default());
    assert!(debug_str.contains("Settings"));
    assert!(debug_str.contains("render"));
    assert!(debug_str.contains("logging"));
}
