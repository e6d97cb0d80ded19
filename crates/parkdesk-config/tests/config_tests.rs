// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Parkdesk configuration system.

use figment::Jail;
use parkdesk_config::diagnostic::ConfigError;
use parkdesk_config::model::{LookupFailurePolicy, ParkdeskConfig};
use parkdesk_config::{
    load_and_validate, load_and_validate_path, load_and_validate_str, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_parkdesk_config() {
    let toml = r#"
[api]
base_url = "https://parking.example.com"
request_timeout_secs = 20

[desk]
log_level = "debug"
lookup_failure = "treat-as-not-found"
time_format = "%d/%m %H:%M"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://parking.example.com");
    assert_eq!(config.api.request_timeout_secs, Some(20));
    assert_eq!(config.desk.log_level, "debug");
    assert_eq!(config.desk.lookup_failure, LookupFailurePolicy::TreatAsNotFound);
    assert_eq!(config.desk.time_format, "%d/%m %H:%M");
}

/// Missing sections fall back to defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.api.base_url, "http://localhost:3000");
    assert!(config.api.request_timeout_secs.is_none());
    assert_eq!(config.desk.log_level, "info");
    assert_eq!(config.desk.lookup_failure, LookupFailurePolicy::Abort);
    assert_eq!(config.desk.time_format, "%Y-%m-%d %H:%M:%S");
}

/// Unknown key produces a diagnostic with a suggestion.
#[test]
fn unknown_key_suggests_correction() {
    let toml = r#"
[api]
base_ulr = "http://x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    match &errors[0] {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => {
            assert_eq!(key, "base_ulr");
            assert_eq!(suggestion.as_deref(), Some("base_url"));
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown top-level section is rejected.
#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[telegram]\nbot_token = \"x\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "telegram"))
    );
}

/// A misspelled lookup policy is reported as an invalid value.
#[test]
fn unknown_lookup_policy_is_invalid_value() {
    let errors = load_and_validate_str("[desk]\nlookup_failure = \"ignore\"\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidValue { detail, .. } if detail.contains("ignore"))),
        "got: {errors:?}"
    );
}

/// Wrong value type maps to InvalidType.
#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[desk]\nlog_level = [\"info\"]\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::InvalidType { .. }), "got: {errors:?}");
}

/// Time-out confirmation cannot be switched off from the config file.
#[test]
fn confirmation_switch_is_not_a_config_key() {
    let errors = load_and_validate_str("[desk]\nconfirm_time_out = false\n").unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "confirm_time_out")),
        "got: {errors:?}"
    );
}

/// A time format chrono cannot render is rejected at load time.
#[test]
fn unrenderable_time_format_is_rejected() {
    let errors = load_and_validate_str("[desk]\ntime_format = \"%Q\"\n").unwrap_err();
    assert_eq!(errors.len(), 1, "got: {errors:?}");
    assert!(
        matches!(&errors[0], ConfigError::Validation { message } if message.contains("%Q")),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_from_str_loader() {
    let errors = load_and_validate_str("[api]\nbase_url = \"ftp://x\"\n").unwrap_err();
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Local parkdesk.toml is picked up and env vars override it.
#[test]
fn local_file_then_env_overrides() {
    Jail::expect_with(|jail| {
        let dir = jail.directory().display().to_string();
        jail.set_env("XDG_CONFIG_HOME", dir);
        jail.create_file(
            "parkdesk.toml",
            r#"
[api]
base_url = "http://from-file:3000"

[desk]
log_level = "warn"
"#,
        )?;
        jail.set_env("PARKDESK_DESK_LOG_LEVEL", "debug");

        let config = load_and_validate().expect("should load");
        assert_eq!(config.api.base_url, "http://from-file:3000");
        assert_eq!(config.desk.log_level, "debug");
        Ok(())
    });
}

/// PARKDESK_API_URL wins over both the file and PARKDESK_API_BASE_URL.
#[test]
fn api_url_variable_has_final_say() {
    Jail::expect_with(|jail| {
        let dir = jail.directory().display().to_string();
        jail.set_env("XDG_CONFIG_HOME", dir);
        jail.create_file("parkdesk.toml", "[api]\nbase_url = \"http://from-file\"\n")?;
        jail.set_env("PARKDESK_API_BASE_URL", "http://from-section-var");
        jail.set_env("PARKDESK_API_URL", "http://from-api-url");

        let config = load_and_validate().expect("should load");
        assert_eq!(config.api.base_url, "http://from-api-url");
        Ok(())
    });
}

/// Underscored keys map to the right field, not a nested table.
#[test]
fn env_var_maps_underscored_key() {
    Jail::expect_with(|jail| {
        let dir = jail.directory().display().to_string();
        jail.set_env("XDG_CONFIG_HOME", dir);
        jail.set_env("PARKDESK_API_REQUEST_TIMEOUT_SECS", "7");
        jail.set_env("PARKDESK_DESK_LOOKUP_FAILURE", "treat-as-not-found");

        let config = load_and_validate().expect("should load");
        assert_eq!(config.api.request_timeout_secs, Some(7));
        assert_eq!(config.desk.lookup_failure, LookupFailurePolicy::TreatAsNotFound);
        Ok(())
    });
}

/// An explicit config path replaces the hierarchy.
#[test]
fn explicit_path_is_loaded() {
    Jail::expect_with(|jail| {
        let dir = jail.directory().display().to_string();
        jail.set_env("XDG_CONFIG_HOME", dir);
        jail.create_file("parkdesk.toml", "[api]\nbase_url = \"http://ignored\"\n")?;
        jail.create_file("custom.toml", "[api]\nbase_url = \"http://custom:8080\"\n")?;

        let config = load_and_validate_path(&jail.directory().join("custom.toml"))
            .expect("should load explicit file");
        assert_eq!(config.api.base_url, "http://custom:8080");
        Ok(())
    });
}

/// A missing explicit path is an error, not silently skipped.
#[test]
fn missing_explicit_path_fails() {
    let errors =
        load_and_validate_path(std::path::Path::new("/nonexistent/parkdesk.toml")).unwrap_err();
    assert!(matches!(errors[0], ConfigError::Other(_)));
}

/// Defaults serialize back to TOML-compatible values.
#[test]
fn defaults_round_trip_through_json() {
    let json = serde_json::to_value(ParkdeskConfig::default()).unwrap();
    assert_eq!(json["api"]["base_url"], "http://localhost:3000");
    assert_eq!(json["desk"]["lookup_failure"], "abort");
}
