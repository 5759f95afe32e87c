// SPDX-License-Identifier: MIT

//! Hardware detection behind a trait so the planner can be tested without
//! touching the real machine.

use ralph_core::{Gpu, GpuType, HardwareInfo};
use std::process::Command;

pub trait HardwareProbe: Send + Sync {
    fn detect(&self) -> HardwareInfo;
}

/// Probes the real machine: `sysctl hw.memsize` on darwin, `/proc/meminfo`
/// on linux, `nvidia-smi`/`rocm-smi` for discrete GPUs if present, and a
/// synthetic Apple GPU (unified memory) on darwin/arm64.
pub struct SystemHardwareProbe;

impl HardwareProbe for SystemHardwareProbe {
    fn detect(&self) -> HardwareInfo {
        let os = std::env::consts::OS.to_string();
        let arch = std::env::consts::ARCH.to_string();
        let system_ram_gb = detect_system_ram_gb(&os);
        let mut gpus = detect_discrete_gpus();

        if os == "macos" && arch == "aarch64" && gpus.is_empty() {
            gpus.push(Gpu {
                gpu_type: GpuType::Apple,
                name: "Apple GPU".into(),
                vram_gb: system_ram_gb,
            });
        }

        HardwareInfo {
            os,
            arch,
            system_ram_gb,
            gpus,
        }
    }
}

fn detect_system_ram_gb(os: &str) -> f64 {
    if os == "macos" {
        return Command::new("sysctl")
            .args(["-n", "hw.memsize"])
            .output()
            .ok()
            .filter(|o| o.status.success())
            .and_then(|o| String::from_utf8_lossy(&o.stdout).trim().parse::<f64>().ok())
            .map(|bytes| bytes / (1024.0 * 1024.0 * 1024.0))
            .unwrap_or(0.0);
    }

    std::fs::read_to_string("/proc/meminfo")
        .ok()
        .and_then(|contents| {
            contents.lines().find_map(|line| {
                let rest = line.strip_prefix("MemTotal:")?;
                let kb: f64 = rest.trim().trim_end_matches(" kB").trim().parse().ok()?;
                Some(kb / (1024.0 * 1024.0))
            })
        })
        .unwrap_or(0.0)
}

fn detect_discrete_gpus() -> Vec<Gpu> {
    let mut gpus = Vec::new();

    if let Some(out) = run_and_capture("nvidia-smi", &["--query-gpu=name,memory.total", "--format=csv,noheader,nounits"]) {
        for line in out.lines() {
            if let Some((name, mem_mib)) = line.rsplit_once(',') {
                if let Ok(mib) = mem_mib.trim().parse::<f64>() {
                    gpus.push(Gpu {
                        gpu_type: GpuType::Nvidia,
                        name: name.trim().to_string(),
                        vram_gb: mib / 1024.0,
                    });
                }
            }
        }
    }

    if let Some(out) = run_and_capture("rocm-smi", &["--showproductname", "--showmeminfo", "vram"]) {
        // rocm-smi's output format is not a stable CSV; a single combined
        // GPU entry is recorded when any output is produced at all.
        if !out.trim().is_empty() {
            gpus.push(Gpu {
                gpu_type: GpuType::Amd,
                name: "AMD GPU".into(),
                vram_gb: 0.0,
            });
        }
    }

    gpus
}

fn run_and_capture(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
}

#[cfg(test)]
#[path = "hardware_tests.rs"]
mod tests;
