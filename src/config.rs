//! Equilibrium solver configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ParleyError;

/// Tunables for the best-response dynamics.
///
/// Missing fields fall back to the defaults when deserializing, so
/// `{"max_iterations": 500}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquilibriumConfig {
    /// Step size for each best-response update
    pub learning_rate: f64,
    /// Hard cap on solver iterations
    pub max_iterations: usize,
    /// Largest per-agent change still considered stable
    pub convergence_threshold: f64,
    /// Levels below this snap to exactly zero
    pub min_participation: f64,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            max_iterations: 100,
            convergence_threshold: 1e-3,
            min_participation: 0.01,
        }
    }
}

impl EquilibriumConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    pub fn with_min_participation(mut self, min_participation: f64) -> Self {
        self.min_participation = min_participation;
        self
    }

    /// Check that every field is usable by the solver
    pub fn validate(&self) -> Result<(), ParleyError> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ParleyError::InvalidConfig(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }

        if self.max_iterations == 0 {
            return Err(ParleyError::InvalidConfig(
                "max_iterations must be at least 1".into(),
            ));
        }

        if !self.convergence_threshold.is_finite() || self.convergence_threshold <= 0.0 {
            return Err(ParleyError::InvalidConfig(format!(
                "convergence_threshold must be a positive number, got {}",
                self.convergence_threshold
            )));
        }

        if !(0.0..1.0).contains(&self.min_participation) {
            return Err(ParleyError::InvalidConfig(format!(
                "min_participation must be in [0, 1), got {}",
                self.min_participation
            )));
        }

        Ok(())
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ParleyError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ParleyError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }
}
