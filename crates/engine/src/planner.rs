// SPDX-License-Identifier: MIT

//! Model placement planner: given a catalog and a hardware description,
//! enumerate feasible (large, small) placements and rank them.

use ralph_core::{Catalog, CoreError, Device, HardwareInfo, ModelPlacement};

/// A scored candidate placement of the large and small model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub large: ModelPlacement,
    pub small: ModelPlacement,
    pub score: i32,
    pub tight_fit: bool,
}

const TIGHT_FIT_THRESHOLD: f64 = 0.9;
const MAX_RESULTS: usize = 5;

/// Enumerate every feasible (large, small) pair from the catalog, score and
/// sort them, and return the top `MAX_RESULTS`. Errors with `Planning` if no
/// pair fits.
pub fn plan(catalog: &Catalog, hardware: &HardwareInfo) -> Result<Vec<ModelConfig>, CoreError> {
    let mut candidates = Vec::new();

    for large in catalog.large_models() {
        for small in catalog.small_models() {
            if large.name == small.name {
                continue;
            }
            if let Some((large_device, small_device, tight_fit)) = feasible_devices(hardware, large.memory_gb, small.memory_gb) {
                candidates.push(ModelConfig {
                    large: ModelPlacement::new(large.name.clone(), large_device, large.memory_gb),
                    small: ModelPlacement::new(small.name.clone(), small_device, small.memory_gb),
                    score: large.quality + small.quality,
                    tight_fit,
                });
            }
        }
    }

    if candidates.is_empty() {
        return Err(CoreError::Planning(format!(
            "no feasible model placement fits {:.1} GB of available RAM",
            hardware.system_ram_gb
        )));
    }

    candidates.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.large.memory_gb.partial_cmp(&a.large.memory_gb).unwrap_or(std::cmp::Ordering::Equal))
    });
    candidates.truncate(MAX_RESULTS);
    Ok(candidates)
}

/// Returns `(large_device, small_device, tight_fit)` for the first feasible
/// strategy, or `None` if no strategy fits.
fn feasible_devices(hardware: &HardwareInfo, large_mem: f64, small_mem: f64) -> Option<(Device, Device, bool)> {
    let ram = hardware.system_ram_gb;

    if hardware.is_unified_memory() {
        return (large_mem + small_mem <= ram).then(|| {
            let tight_fit = (large_mem + small_mem) > ram * TIGHT_FIT_THRESHOLD;
            (Device::Gpu, Device::Gpu, tight_fit)
        });
    }

    let gpu_mem = hardware.best_gpu().map(|g| g.vram_gb).unwrap_or(0.0);
    let effective = ram + gpu_mem;

    if large_mem + small_mem <= gpu_mem {
        let tight_fit = (large_mem + small_mem) > effective * TIGHT_FIT_THRESHOLD;
        return Some((Device::Gpu, Device::Gpu, tight_fit));
    }
    if small_mem <= gpu_mem && large_mem <= ram {
        let tight_fit = (large_mem + small_mem) > effective * TIGHT_FIT_THRESHOLD;
        return Some((Device::Cpu, Device::Gpu, tight_fit));
    }
    if large_mem <= gpu_mem && small_mem <= ram {
        let tight_fit = (large_mem + small_mem) > effective * TIGHT_FIT_THRESHOLD;
        return Some((Device::Gpu, Device::Cpu, tight_fit));
    }
    if large_mem + small_mem <= ram {
        let tight_fit = (large_mem + small_mem) > effective * TIGHT_FIT_THRESHOLD;
        return Some((Device::Cpu, Device::Cpu, tight_fit));
    }
    None
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
