//! String-typed load candidate and the validation boundary that turns it
//! into a typed [`Load`].

use crate::error::{RegistryResult, ValidationError};

use super::types::{Conductor, ConductorSet, Load, PfType, TopologyPolicy};

/// Raw field values for a load, as collected from a form or a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadCandidate {
    pub name: String,
    /// Real power in watts.
    pub power: String,
    pub power_factor: String,
    /// `inductive` or `capacitive`; blank means inductive.
    pub pf_type: String,
    /// Conductor tokens such as `A`, `B`, `C`, `N`.
    pub phases: Vec<String>,
    /// Line-to-line voltage in volts.
    pub line_voltage: String,
}

impl LoadCandidate {
    /// Creates a candidate with power factor `1.0` and inductive type, the
    /// form's defaults.
    pub fn new(name: impl Into<String>, power: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power: power.into(),
            power_factor: "1.0".to_string(),
            pf_type: "inductive".to_string(),
            phases: Vec::new(),
            line_voltage: String::new(),
        }
    }

    pub fn power_factor(mut self, pf: impl Into<String>) -> Self {
        self.power_factor = pf.into();
        self
    }

    pub fn pf_type(mut self, pf_type: impl Into<String>) -> Self {
        self.pf_type = pf_type.into();
        self
    }

    pub fn phases<I, S>(mut self, phases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phases = phases.into_iter().map(Into::into).collect();
        self
    }

    pub fn line_voltage(mut self, v: impl Into<String>) -> Self {
        self.line_voltage = v.into();
        self
    }

    /// Parses and checks every field, returning a typed load with zero current.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for missing, malformed or out-of-range
    /// fields, or a [`TopologyError`](crate::error::TopologyError) if the
    /// conductor set is not a supported connection.
    pub fn validate(&self, policy: TopologyPolicy) -> RegistryResult<Load> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.phases.iter().all(|p| p.trim().is_empty()) {
            return Err(ValidationError::NoPhaseSelected.into());
        }

        let power = parse_number("power", &self.power)?;
        let power_factor = parse_number("power_factor", &self.power_factor)?;
        if !(0.0..=1.0).contains(&power_factor) {
            return Err(ValidationError::PowerFactorOutOfRange(power_factor).into());
        }
        let line_voltage = parse_number("line_voltage", &self.line_voltage)?;
        if line_voltage <= 0.0 {
            return Err(ValidationError::NonPositiveVoltage(line_voltage).into());
        }
        if power_factor == 0.0 && power != 0.0 {
            return Err(ValidationError::ZeroPowerFactorWithPower { power }.into());
        }

        let pf_type = if self.pf_type.trim().is_empty() {
            PfType::default()
        } else {
            self.pf_type.parse::<PfType>()?
        };

        let phases = self
            .phases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| p.parse::<Conductor>())
            .collect::<Result<ConductorSet, _>>()?;
        let topology = phases.topology(policy)?;

        Ok(Load::new(
            name.to_string(),
            power,
            power_factor,
            pf_type,
            phases,
            topology,
            line_voltage,
        ))
    }
}

/// Puts a stored load back into editable form.
impl From<&Load> for LoadCandidate {
    fn from(load: &Load) -> Self {
        Self {
            name: load.name().to_string(),
            power: load.power().to_string(),
            power_factor: load.power_factor().to_string(),
            pf_type: load.pf_type().to_string().to_ascii_lowercase(),
            phases: load
                .phases()
                .tokens()
                .into_iter()
                .map(str::to_string)
                .collect(),
            line_voltage: load.line_voltage().to_string(),
        }
    }
}

/// Parses a numeric field. Blank, unparsable and non-finite values are rejected.
pub(crate) fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        }),
    }
}
