//! Particle simulation configuration types.

use serde::{Deserialize, Serialize};

/// Physics parameters fed to the feedback kernel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Half-extent of the bounding cube; particles wrap at `±limit`.
    pub limit: f32,
    /// Attractor mass applied by the primary pointer button.
    pub attractor_mass: f32,
    /// Fraction of `attractor_mass` applied, negated, by the secondary button.
    pub repel_factor: f32,
    /// Divisor turning the previous frame timestamp (ms) into the time step.
    pub time_scale: f32,
    /// Fixed RNG seed for the initial particle cloud. Random when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            limit: 15.0,
            attractor_mass: 100_000.0,
            repel_factor: 0.25,
            time_scale: 100_000.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Signed mass applied by the secondary button.
    pub fn repel_mass(&self) -> f32 {
        -self.repel_factor * self.attractor_mass
    }
}
