// SPDX-License-Identifier: MIT

use super::*;
use serde_json::json;

#[test]
fn defaults_validate() {
    assert!(ServerConfig::default().validate().is_ok());
}

#[test]
fn validate_rejects_empty_host() {
    let mut cfg = ServerConfig::default();
    cfg.ollama.host = "".into();
    assert!(cfg.validate().is_err());
}

#[test]
fn validate_rejects_zero_concurrent_jobs() {
    let mut cfg = ServerConfig::default();
    cfg.concurrent_jobs = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn device_round_trips_through_json() {
    for (s, d) in [
        ("", Device::Unset),
        ("gpu", Device::Gpu),
        ("cpu", Device::Cpu),
        ("auto", Device::Auto),
    ] {
        assert_eq!(Device::parse(s).unwrap(), d);
        assert_eq!(d.as_str(), s);
    }
    assert!(Device::parse("tpu").is_err());
}

fn scenario_defaults() -> ServerConfig {
    let mut cfg = ServerConfig::default();
    cfg.large_model = ModelPlacement::new("big:70b", Device::Cpu, 42.0);
    cfg.small_model = ModelPlacement::new("tiny:7b", Device::Gpu, 5.0);
    cfg
}

#[test]
fn patch_preserves_untouched_nested_fields() {
    let cfg = scenario_defaults();
    let merged = cfg
        .apply_patch(&json!({"large_model": {"name": "only:14b"}}))
        .unwrap();
    assert_eq!(merged.large_model.name, "only:14b");
    assert_eq!(merged.large_model.device, Device::Cpu);
    assert_eq!(merged.large_model.memory_gb, 42.0);
    // small_model untouched entirely
    assert_eq!(merged.small_model, cfg.small_model);
}

#[test]
fn patch_applies_falsy_but_present_fields() {
    let cfg = scenario_defaults();
    let merged = cfg
        .apply_patch(&json!({"ollama": {"is_remote": false}, "job_retention_days": 0}))
        .unwrap();
    assert_eq!(merged.job_retention_days, 0);
    assert!(!merged.ollama.is_remote);
}

#[test]
fn patch_revalidates_merged_result() {
    let cfg = scenario_defaults();
    let err = cfg.apply_patch(&json!({"concurrent_jobs": 0})).unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn patch_with_empty_object_is_a_no_op() {
    let cfg = scenario_defaults();
    let merged = cfg.apply_patch(&json!({})).unwrap();
    assert_eq!(merged, cfg);
}
