// SPDX-License-Identifier: MIT

//! Hardware description consumed by the planner.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpuType {
    Nvidia,
    Amd,
    Apple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    #[serde(rename = "type")]
    pub gpu_type: GpuType,
    pub name: String,
    pub vram_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareInfo {
    pub os: String,
    pub arch: String,
    pub system_ram_gb: f64,
    pub gpus: Vec<Gpu>,
}

impl HardwareInfo {
    /// The GPU with the largest `vram_gb`; first one wins ties.
    pub fn best_gpu(&self) -> Option<&Gpu> {
        self.gpus.iter().fold(None, |best, gpu| match best {
            None => Some(gpu),
            Some(current) if gpu.vram_gb > current.vram_gb => Some(gpu),
            Some(current) => Some(current),
        })
    }

    /// True when hardware has exactly one GPU and it is Apple-class
    /// (unified memory, shared with system RAM).
    pub fn is_unified_memory(&self) -> bool {
        matches!(self.gpus.as_slice(), [gpu] if gpu.gpu_type == GpuType::Apple)
    }
}
