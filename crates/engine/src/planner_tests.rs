// SPDX-License-Identifier: MIT

use super::*;
use ralph_core::{Gpu, GpuType};

const SAMPLE_CATALOG: &str = r#"
[[model]]
name = "big:70b"
memory_gb = 42.0
role = "large"
quality = 10

[[model]]
name = "tiny:7b"
memory_gb = 5.0
role = "both"
quality = 4

[[model]]
name = "micro:1.5b"
memory_gb = 1.5
role = "small"
quality = 2
"#;

fn hardware(ram: f64, gpus: Vec<Gpu>) -> HardwareInfo {
    HardwareInfo {
        os: "linux".into(),
        arch: "x86_64".into(),
        system_ram_gb: ram,
        gpus,
    }
}

#[test]
fn top_result_splits_large_on_cpu_small_on_gpu() {
    let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
    let hw = hardware(
        48.0,
        vec![Gpu {
            gpu_type: GpuType::Nvidia,
            name: "rtx".into(),
            vram_gb: 8.0,
        }],
    );

    let results = plan(&catalog, &hw).unwrap();
    let top = &results[0];
    assert_eq!(top.large.name, "big:70b");
    assert_eq!(top.large.device, Device::Cpu);
    assert_eq!(top.small.name, "tiny:7b");
    assert_eq!(top.small.device, Device::Gpu);
    assert_eq!(top.score, 14);
}

#[test]
fn results_are_sorted_by_score_descending() {
    let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
    let hw = hardware(
        48.0,
        vec![Gpu {
            gpu_type: GpuType::Nvidia,
            name: "rtx".into(),
            vram_gb: 8.0,
        }],
    );

    let results = plan(&catalog, &hw).unwrap();
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn unified_memory_places_both_on_gpu_when_it_fits_in_system_ram() {
    let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
    let hw = hardware(
        64.0,
        vec![Gpu {
            gpu_type: GpuType::Apple,
            name: "Apple GPU".into(),
            vram_gb: 64.0,
        }],
    );

    let results = plan(&catalog, &hw).unwrap();
    let top = &results[0];
    assert_eq!(top.large.device, Device::Gpu);
    assert_eq!(top.small.device, Device::Gpu);
}

#[test]
fn no_feasible_pair_returns_a_planning_error() {
    let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
    let hw = hardware(2.0, vec![]);

    let err = plan(&catalog, &hw).unwrap_err();
    assert!(matches!(err, CoreError::Planning(_)));
}

#[test]
fn tight_fit_is_flagged_when_usage_exceeds_ninety_percent() {
    let catalog = Catalog::parse(SAMPLE_CATALOG).unwrap();
    // 42 + 5 = 47 against a 48 GB CPU-only budget: no GPU at all.
    let hw = hardware(48.0, vec![]);

    let results = plan(&catalog, &hw).unwrap();
    let both_cpu = results
        .iter()
        .find(|c| c.large.name == "big:70b" && c.small.name == "tiny:7b")
        .unwrap();
    assert!(both_cpu.tight_fit);
}