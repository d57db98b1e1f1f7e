//! Render engine descriptors behind `{renderengine}`, `{device}`, `{samples}`
//! and `{features}`.
//!
//! The host reports the engine-specific settings it cares about; this module
//! turns them into the short `+`-joined strings used in file names, e.g. a
//! Cycles render becomes `Cycles`, `GPU`, `0.01+4096+0`, `12+4+4+12+0+8`.

use serde::{Deserialize, Serialize};

use crate::constants::{NONE_VALUE, UNKNOWN_VALUE};
use crate::utils::format_decimal;

/// Compute device reported by engines that let the user choose one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComputeDevice {
    #[default]
    Cpu,
    Gpu,
}

impl std::fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeDevice::Cpu => write!(f, "CPU"),
            ComputeDevice::Gpu => write!(f, "GPU"),
        }
    }
}

/// Engine-specific settings captured from the host at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum EngineSettings {
    Workbench {
        /// Anti-aliasing sample setting, e.g. `8` or `OFF`
        #[serde(default = "default_render_aa")]
        render_aa: String,
        /// Lighting mode, e.g. `STUDIO`, `MATCAP`, `FLAT`
        #[serde(default = "default_light")]
        light: String,
        /// Color type, e.g. `MATERIAL`, `OBJECT`, `TEXTURE`
        #[serde(default = "default_color_type")]
        color_type: String,
    },
    Eevee {
        #[serde(default = "default_taa_samples")]
        taa_render_samples: u32,
        #[serde(default)]
        sss_samples: u32,
        #[serde(default)]
        volumetric_samples: u32,
        #[serde(default)]
        use_gtao: bool,
        #[serde(default)]
        use_bloom: bool,
        #[serde(default)]
        use_ssr: bool,
        #[serde(default)]
        use_motion_blur: bool,
    },
    Cycles {
        #[serde(default)]
        device: ComputeDevice,
        #[serde(default = "default_adaptive_threshold")]
        adaptive_threshold: f64,
        #[serde(default = "default_cycles_samples")]
        samples: u32,
        #[serde(default)]
        adaptive_min_samples: u32,
        #[serde(default = "default_max_bounces")]
        max_bounces: u32,
        #[serde(default = "default_diffuse_bounces")]
        diffuse_bounces: u32,
        #[serde(default = "default_glossy_bounces")]
        glossy_bounces: u32,
        #[serde(default = "default_max_bounces")]
        transmission_bounces: u32,
        #[serde(default)]
        volume_bounces: u32,
        #[serde(default = "default_transparent_bounces")]
        transparent_max_bounces: u32,
    },
    /// Any engine we have no descriptor for; only its name is known.
    Other {
        name: String,
    },
}

fn default_render_aa() -> String {
    "8".to_string()
}

fn default_light() -> String {
    "STUDIO".to_string()
}

fn default_color_type() -> String {
    "MATERIAL".to_string()
}

const fn default_taa_samples() -> u32 {
    64
}

const fn default_adaptive_threshold() -> f64 {
    0.01
}

const fn default_cycles_samples() -> u32 {
    4096
}

const fn default_max_bounces() -> u32 {
    12
}

const fn default_diffuse_bounces() -> u32 {
    4
}

const fn default_glossy_bounces() -> u32 {
    4
}

const fn default_transparent_bounces() -> u32 {
    8
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings::Cycles {
            device: ComputeDevice::Cpu,
            adaptive_threshold: default_adaptive_threshold(),
            samples: default_cycles_samples(),
            adaptive_min_samples: 0,
            max_bounces: default_max_bounces(),
            diffuse_bounces: default_diffuse_bounces(),
            glossy_bounces: default_glossy_bounces(),
            transmission_bounces: default_max_bounces(),
            volume_bounces: 0,
            transparent_max_bounces: default_transparent_bounces(),
        }
    }
}

impl EngineSettings {
    /// Display name used by `{renderengine}`.
    #[must_use]
    pub fn engine_name(&self) -> String {
        match self {
            EngineSettings::Workbench {
                ..
            } => "Workbench".to_string(),
            EngineSettings::Eevee {
                ..
            } => "Eevee".to_string(),
            EngineSettings::Cycles {
                ..
            } => "Cycles".to_string(),
            EngineSettings::Other {
                name,
            } => name.clone(),
        }
    }

    /// Value of `{device}`. Rasterizing engines always report `GPU`.
    #[must_use]
    pub fn device(&self) -> String {
        match self {
            EngineSettings::Workbench {
                ..
            }
            | EngineSettings::Eevee {
                ..
            } => ComputeDevice::Gpu.to_string(),
            EngineSettings::Cycles {
                device,
                ..
            } => device.to_string(),
            EngineSettings::Other {
                ..
            } => UNKNOWN_VALUE.to_string(),
        }
    }

    /// Value of `{samples}`.
    #[must_use]
    pub fn samples(&self) -> String {
        match self {
            EngineSettings::Workbench {
                render_aa,
                ..
            } => render_aa.clone(),
            EngineSettings::Eevee {
                taa_render_samples,
                sss_samples,
                volumetric_samples,
                ..
            } => format!("{taa_render_samples}+{sss_samples}+{volumetric_samples}"),
            EngineSettings::Cycles {
                adaptive_threshold,
                samples,
                adaptive_min_samples,
                ..
            } => {
                let threshold = (adaptive_threshold * 10_000.0).round() / 10_000.0;
                format!("{}+{samples}+{adaptive_min_samples}", format_decimal(threshold))
            }
            EngineSettings::Other {
                ..
            } => UNKNOWN_VALUE.to_string(),
        }
    }

    /// Value of `{features}`.
    #[must_use]
    pub fn features(&self) -> String {
        match self {
            EngineSettings::Workbench {
                light,
                color_type,
                ..
            } => {
                format!("{}+{}", title_case(light).replace("Matcap", "MatCap"), title_case(color_type))
            }
            EngineSettings::Eevee {
                use_gtao,
                use_bloom,
                use_ssr,
                use_motion_blur,
                ..
            } => {
                let enabled: Vec<&str> = [
                    (*use_gtao, "AO"),
                    (*use_bloom, "Bloom"),
                    (*use_ssr, "SSR"),
                    (*use_motion_blur, "MB"),
                ]
                .into_iter()
                .filter_map(|(on, label)| on.then_some(label))
                .collect();

                if enabled.is_empty() {
                    NONE_VALUE.to_string()
                } else {
                    enabled.join("+")
                }
            }
            EngineSettings::Cycles {
                max_bounces,
                diffuse_bounces,
                glossy_bounces,
                transmission_bounces,
                volume_bounces,
                transparent_max_bounces,
                ..
            } => format!(
                "{max_bounces}+{diffuse_bounces}+{glossy_bounces}+{transmission_bounces}+{volume_bounces}+{transparent_max_bounces}"
            ),
            EngineSettings::Other {
                ..
            } => UNKNOWN_VALUE.to_string(),
        }
    }
}

/// Capitalise the first letter of every alphabetic run, lowercase the rest.
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
