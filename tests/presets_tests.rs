use jscloak::presets::{compose, compose_named, PresetError, ProtectionLevel};
use serde_json::json;

#[test]
fn low_overrides_intensities_only() {
    let cfg = compose(ProtectionLevel::Low);
    assert_eq!(cfg.get("controlFlowFlattening"), Some(&json!(0.3)));
    assert_eq!(cfg.get("opaquePredicates"), Some(&json!(0.2)));
    assert_eq!(cfg.get("flatten"), None);
}

#[test]
fn medium_enables_flatten() {
    let cfg = compose(ProtectionLevel::Medium);
    assert_eq!(cfg.get("controlFlowFlattening"), Some(&json!(0.7)));
    assert_eq!(cfg.get("opaquePredicates"), Some(&json!(0.5)));
    assert_eq!(cfg.get("flatten"), Some(&json!(true)));
}

#[test]
fn high_enables_every_extra_flag() {
    let cfg = compose(ProtectionLevel::High);
    assert_eq!(cfg.get("controlFlowFlattening"), Some(&json!(1.0)));
    assert_eq!(cfg.get("opaquePredicates"), Some(&json!(0.9)));
    for flag in [
        "flatten",
        "stack",
        "dispatcher",
        "calculator",
        "movedDeclarations",
        "objectExtraction",
        "globalConcealing",
    ] {
        assert_eq!(cfg.get(flag), Some(&json!(true)), "missing flag {flag}");
    }
}

#[test]
fn base_values_survive_the_overlay() {
    for level in ProtectionLevel::ALL {
        let cfg = compose(level);
        assert_eq!(cfg.get("target"), Some(&json!("node")));
        assert_eq!(cfg.get("compact"), Some(&json!(true)));
        assert_eq!(cfg.get("minify"), Some(&json!(true)));
        assert_eq!(cfg.get("renameVariables"), Some(&json!(true)));
        assert_eq!(cfg.get("duplicateLiteralsRemoval"), Some(&json!(1.0)));
        assert_eq!(cfg.get("hexadecimalNumbers"), Some(&json!(true)));
    }
}

#[test]
fn naming_strategy_is_present_at_every_level() {
    for level in ProtectionLevel::ALL {
        let cfg = compose(level);
        assert_eq!(cfg.get("identifierGenerator"), Some(&json!("branded")));
    }
}

#[test]
fn unknown_level_is_an_error_not_a_default() {
    let err = compose_named("extreme").unwrap_err();
    assert!(matches!(err, PresetError::UnknownLevel(level) if level == "extreme"));
    assert!("".parse::<ProtectionLevel>().is_err());
    assert!("LOW".parse::<ProtectionLevel>().is_err());
}

#[test]
fn levels_are_ordered_by_aggressiveness() {
    assert!(ProtectionLevel::Low < ProtectionLevel::Medium);
    assert!(ProtectionLevel::Medium < ProtectionLevel::High);
}
