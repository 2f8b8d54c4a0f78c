//! Network session: the load registry, the line-voltage setting and the
//! engine, recomputed after every change.

use crate::calc::{Engine, ResultSnapshot, parse_line_voltage};
use crate::error::RegistryResult;
use crate::loads::{Load, LoadCandidate, LoadRegistry, TopologyPolicy};

/// Owns the full calculator state.
///
/// Every registry mutation and every voltage edit triggers a synchronous
/// recompute of the whole snapshot. Rejected mutations leave both the list
/// and the snapshot untouched.
#[derive(Debug, Clone)]
pub struct Session {
    registry: LoadRegistry,
    engine: Engine,
    voltage_input: String,
}

impl Session {
    /// Creates an empty session with the given line voltage entry.
    pub fn new(line_voltage: impl Into<String>, policy: TopologyPolicy) -> Self {
        let mut session = Self {
            registry: LoadRegistry::with_policy(policy),
            engine: Engine::new(),
            voltage_input: line_voltage.into(),
        };
        session.recompute();
        session
    }

    /// Validates and appends a load, then recomputes.
    ///
    /// A candidate with a blank line voltage takes the session's voltage.
    /// The stored load is the last entry of [`Session::loads`].
    ///
    /// # Errors
    ///
    /// Returns the registry's validation or topology error unchanged.
    pub fn add(&mut self, candidate: &LoadCandidate) -> RegistryResult<()> {
        let candidate = self.with_session_voltage(candidate);
        self.registry.add(&candidate)?;
        self.recompute();
        Ok(())
    }

    /// Removes the load at `index`, then recomputes.
    ///
    /// # Errors
    ///
    /// Returns an index error if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> RegistryResult<Load> {
        let removed = self.registry.remove_at(index)?;
        self.recompute();
        Ok(removed)
    }

    /// Replaces the load at `index` (delete-then-add), then recomputes.
    ///
    /// The edited load moves to the end of [`Session::loads`].
    ///
    /// # Errors
    ///
    /// Returns an index, validation or topology error; the original entry
    /// stays in place.
    pub fn replace_at(&mut self, index: usize, candidate: &LoadCandidate) -> RegistryResult<()> {
        let candidate = self.with_session_voltage(candidate);
        self.registry.replace_at(index, &candidate)?;
        self.recompute();
        Ok(())
    }

    /// Candidate pre-filled from the load at `index`, for editing.
    pub fn edit_candidate(&self, index: usize) -> Option<LoadCandidate> {
        self.registry.get(index).map(LoadCandidate::from)
    }

    /// Updates the line-voltage entry and recomputes.
    ///
    /// Returns `false` when the entry is not yet a positive number; the
    /// previous snapshot and load currents are kept.
    pub fn set_line_voltage(&mut self, raw: impl Into<String>) -> bool {
        self.voltage_input = raw.into();
        self.recompute()
    }

    /// The raw line-voltage entry as last set.
    pub fn line_voltage_input(&self) -> &str {
        &self.voltage_input
    }

    /// The line voltage if the current entry is usable.
    pub fn line_voltage(&self) -> Option<f64> {
        parse_line_voltage(&self.voltage_input)
    }

    pub fn loads(&self) -> &[Load] {
        self.registry.all()
    }

    pub fn registry(&self) -> &LoadRegistry {
        &self.registry
    }

    pub fn snapshot(&self) -> &ResultSnapshot {
        self.engine.snapshot()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn recompute(&mut self) -> bool {
        self.engine
            .recompute_from_input(self.registry.loads_mut(), &self.voltage_input)
    }

    fn with_session_voltage(&self, candidate: &LoadCandidate) -> LoadCandidate {
        let mut candidate = candidate.clone();
        if candidate.line_voltage.trim().is_empty() {
            candidate.line_voltage = self.voltage_input.clone();
        }
        candidate
    }
}

impl Default for Session {
    /// Empty session at 220 V with the strict topology policy.
    fn default() -> Self {
        Self::new("220", TopologyPolicy::Strict)
    }
}
