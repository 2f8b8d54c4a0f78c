//! TOML-based network configuration and preset load sets.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::loads::{LoadCandidate, PfType, TopologyPolicy};

/// Top-level scenario configuration parsed from TOML.
///
/// Every section has a default. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or pick a built-in preset with
/// [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Network-wide settings.
    #[serde(default)]
    pub network: NetworkConfig,
    /// Loads in list order.
    #[serde(default)]
    pub loads: Vec<LoadConfig>,
}

/// Network-wide settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Line-to-line voltage (V, must be > 0).
    pub line_voltage: f64,
    /// Accept a single phase without neutral as phase-to-neutral.
    pub allow_single_phase_without_neutral: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            line_voltage: 220.0,
            allow_single_phase_without_neutral: false,
        }
    }
}

impl NetworkConfig {
    /// Topology policy selected by `allow_single_phase_without_neutral`.
    pub fn topology_policy(&self) -> TopologyPolicy {
        if self.allow_single_phase_without_neutral {
            TopologyPolicy::LenientSinglePhase
        } else {
            TopologyPolicy::Strict
        }
    }
}

/// One load entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    pub name: String,
    /// Real power (W); negative for generators.
    pub power: f64,
    /// Power factor in [0, 1].
    #[serde(default = "unity_pf")]
    pub power_factor: f64,
    #[serde(default)]
    pub pf_type: PfType,
    /// Conductor tokens, e.g. `["A", "N"]`.
    pub phases: Vec<String>,
}

fn unity_pf() -> f64 {
    1.0
}

impl LoadConfig {
    fn new(name: &str, power: f64, power_factor: f64, pf_type: PfType, phases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            power,
            power_factor,
            pf_type,
            phases: phases.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Converts the entry into a registry candidate at the network voltage.
    pub fn to_candidate(&self, network: &NetworkConfig) -> LoadCandidate {
        LoadCandidate::new(self.name.clone(), self.power.to_string())
            .power_factor(self.power_factor.to_string())
            .pf_type(self.pf_type.to_string())
            .phases(self.phases.iter().cloned())
            .line_voltage(network.line_voltage.to_string())
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"network.line_voltage"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Network at 220 V with no loads.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Residential preset: single-phase appliances on a 220 V network and a
    /// rooftop inverter feeding back on phase A.
    pub fn residential() -> Self {
        Self {
            network: NetworkConfig::default(),
            loads: vec![
                LoadConfig::new("Kitchen", 2200.0, 1.0, PfType::Inductive, &["A", "N"]),
                LoadConfig::new("Air conditioner", 1500.0, 0.85, PfType::Inductive, &["B", "N"]),
                LoadConfig::new("Lighting", 400.0, 0.95, PfType::Capacitive, &["C", "N"]),
                LoadConfig::new("Shower", 5500.0, 1.0, PfType::Inductive, &["A", "B"]),
                LoadConfig::new("PV inverter", -3000.0, 1.0, PfType::Inductive, &["A", "N"]),
            ],
        }
    }

    /// Industrial preset: three-phase motors and two phase-to-phase loads on
    /// a 380 V network.
    pub fn industrial() -> Self {
        Self {
            network: NetworkConfig {
                line_voltage: 380.0,
                ..NetworkConfig::default()
            },
            loads: vec![
                LoadConfig::new("Compressor", 15000.0, 0.82, PfType::Inductive, &["A", "B", "C"]),
                LoadConfig::new("Conveyor", 7500.0, 0.78, PfType::Inductive, &["A", "B", "C"]),
                LoadConfig::new("Welder", 9000.0, 0.7, PfType::Inductive, &["B", "C"]),
                LoadConfig::new("Office", 3000.0, 0.95, PfType::Inductive, &["A", "N"]),
                LoadConfig::new("Induction furnace", 4000.0, 0.9, PfType::Capacitive, &["C", "A"]),
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["empty", "residential", "industrial"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "empty" => Ok(Self::empty()),
            "residential" => Ok(Self::residential()),
            "industrial" => Ok(Self::industrial()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Checks network-level fields and returns a list of errors.
    ///
    /// The line voltage is network-wide; per-load fields are left to the
    /// registry, which rejects bad entries individually. Returns an empty
    /// vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let v = self.network.line_voltage;
        if !(v.is_finite() && v > 0.0) {
            errors.push(ConfigError {
                field: "network.line_voltage".into(),
                message: format!("must be > 0, got {v}"),
            });
        }

        errors
    }

    /// Candidates for every configured load, in order.
    pub fn candidates(&self) -> Vec<LoadCandidate> {
        self.loads
            .iter()
            .map(|l| l.to_candidate(&self.network))
            .collect()
    }
}
