use std::path::PathBuf;

use kitchencalc_core::config::{EngineConfig, RuleOverride};
use kitchencalc_core::ratio::ConversionRule;
use kitchencalc_core::CalcError;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("kitchencalc-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn empty_file_means_defaults() {
    let config = EngineConfig::from_toml_str("").unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.rules.air_fryer(), ConversionRule::AIR_FRYER);
    assert_eq!(config.rounding.practical_temperature_step, 5.0);
    assert_eq!(config.slices.party_sq_in, 4.0);
}

#[test]
fn rule_overrides_keep_unset_fields() {
    let config = EngineConfig::from_toml_str(
        r#"
        [rules.air_fryer]
        time_ratio = 0.75

        [rules.microwave]
        time_ratio = 0.3
        "#,
    )
    .unwrap();

    let air_fryer = config.rules.air_fryer();
    assert_eq!(air_fryer.time_ratio, 0.75);
    assert_eq!(air_fryer.offset, ConversionRule::AIR_FRYER.offset);
    assert_eq!(config.rules.microwave().time_ratio, 0.3);
    assert!(config.rules.microwave().offset.is_none());
    assert_eq!(config.rules.convection(), ConversionRule::CONVECTION);
}

#[test]
fn offset_override_is_in_fahrenheit() {
    let rule = RuleOverride {
        offset_f: Some(20.0),
        time_ratio: None,
    }
    .apply(ConversionRule::CONVECTION);
    assert_eq!(rule.offset.unwrap().amount, 20.0);
    assert_eq!(rule.time_ratio, 0.85);
}

#[test]
fn invalid_values_are_rejected_on_load() {
    let err = EngineConfig::from_toml_str("[rules.convection]\ntime_ratio = 0\n").unwrap_err();
    assert!(matches!(err, CalcError::Config(message) if message.contains("rules.convection")));

    let err = EngineConfig::from_toml_str("[rounding]\ntime_step_minutes = -1\n").unwrap_err();
    assert!(matches!(err, CalcError::Config(_)));

    let err = EngineConfig::from_toml_str("[slices]\nparty_sq_in = 0\n").unwrap_err();
    assert!(matches!(err, CalcError::Config(_)));
}

#[test]
fn unknown_keys_are_parse_errors() {
    let err = EngineConfig::from_toml_str("[rules.air_fry]\ntime_ratio = 0.8\n").unwrap_err();
    assert!(matches!(err, CalcError::Toml(_)));
    assert_eq!(err.kind(), "config");

    for text in [
        "[rounding]\npractical_temprature_step = 10\n",
        "[slices]\nparty_sq_inch = 8\n",
    ] {
        let err = EngineConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, CalcError::Toml(_)), "accepted {text:?}");
    }
}

#[test]
fn load_reads_a_file_from_disk() {
    let path = scratch_file("load.toml", "[rounding]\npractical_temperature_step = 10\n");
    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.rounding.practical_temperature_step, 10.0);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn missing_file_is_an_error_for_load_but_not_for_resolve() {
    let path = std::env::temp_dir().join("kitchencalc-does-not-exist.toml");
    assert!(matches!(EngineConfig::load(&path), Err(CalcError::Io(_))));
    assert_eq!(EngineConfig::resolve(Some(&path)).unwrap(), EngineConfig::default());
}

#[test]
fn resolve_propagates_broken_files() {
    let path = scratch_file("broken.toml", "[rules.air_fryer]\ntime_ratio = \"fast\"\n");
    let err = EngineConfig::resolve(Some(&path)).unwrap_err();
    assert!(matches!(err, CalcError::Config(_)));
    std::fs::remove_file(&path).unwrap();
}
