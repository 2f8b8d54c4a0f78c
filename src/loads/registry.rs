//! Ordered, validated collection of loads.

use crate::error::{IndexError, RegistryResult};

use super::candidate::LoadCandidate;
use super::types::{Load, TopologyPolicy};

/// Owns the load list in insertion order.
///
/// List positions are the addressing scheme used by callers; the order has
/// no electrical meaning. Every mutating call validates first, so a
/// rejected call never changes the list.
#[derive(Debug, Clone, Default)]
pub struct LoadRegistry {
    loads: Vec<Load>,
    policy: TopologyPolicy,
}

impl LoadRegistry {
    /// Creates an empty registry with the strict topology policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with the given topology policy.
    pub fn with_policy(policy: TopologyPolicy) -> Self {
        Self {
            loads: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> TopologyPolicy {
        self.policy
    }

    /// Validates `candidate` and appends it.
    ///
    /// # Errors
    ///
    /// Returns the validation or topology error; the list is left untouched.
    pub fn add(&mut self, candidate: &LoadCandidate) -> RegistryResult<&Load> {
        let load = candidate.validate(self.policy)?;
        log::info!("added load \"{}\" on {}", load.name(), load.phases());
        Ok(self.push(load))
    }

    /// Removes and returns the load at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> RegistryResult<Load> {
        self.check_index(index)?;
        let load = self.loads.remove(index);
        log::info!("removed load \"{}\" at position {index}", load.name());
        Ok(load)
    }

    /// Replaces the load at `index` with a validated `candidate`.
    ///
    /// Behaves as delete-then-add: the edited load moves to the end of the
    /// list. The candidate is validated before anything is removed, so a
    /// rejected edit keeps the original entry in place.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] for a bad index, or the candidate's validation
    /// or topology error.
    pub fn replace_at(&mut self, index: usize, candidate: &LoadCandidate) -> RegistryResult<&Load> {
        self.check_index(index)?;
        let load = candidate.validate(self.policy)?;
        let old = self.loads.remove(index);
        log::info!(
            "replaced load \"{}\" at position {index} with \"{}\"",
            old.name(),
            load.name()
        );
        Ok(self.push(load))
    }

    /// All loads in insertion order.
    pub fn all(&self) -> &[Load] {
        &self.loads
    }

    pub fn get(&self, index: usize) -> Option<&Load> {
        self.loads.get(index)
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Mutable view for the engine, which rewrites each load's current.
    pub(crate) fn loads_mut(&mut self) -> &mut [Load] {
        &mut self.loads
    }

    fn push(&mut self, load: Load) -> &Load {
        let index = self.loads.len();
        self.loads.push(load);
        &self.loads[index]
    }

    fn check_index(&self, index: usize) -> Result<(), IndexError> {
        if index < self.loads.len() {
            Ok(())
        } else {
            Err(IndexError {
                index,
                len: self.loads.len(),
            })
        }
    }
}
