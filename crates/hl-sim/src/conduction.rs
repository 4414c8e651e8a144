//! Vertical heat conduction inside the tank.
//!
//! Explicit (forward Euler) finite-difference step of Fourier conduction
//! between vertically adjacent layers. The top of the first layer and the
//! bottom of the last are adiabatic.
//!
//! # Stability
//!
//! The explicit step is only stable while
//!
//! ```text
//! r = conductance * dt / (node mass * cp) <= 0.5
//! ```
//!
//! where `conductance = A / dz` is the contact area over the layer height.
//! `dt` is the pump's one-node transit time, so changing tank height, node
//! volume or pump flow rate moves `r`.
//! [`crate::LoopConstants::derive`] refuses configurations above the limit;
//! the step itself does not guard against it.

/// Coefficients for one conduction step.
#[derive(Clone, Copy, Debug)]
pub struct ConductionStep {
    /// `A / dz` between adjacent layers.
    pub conductance: f64,
    pub dt_s: f64,
    /// Heat capacity of one layer (J/K).
    pub node_heat_capacity_j_per_k: f64,
}

impl ConductionStep {
    /// Dimensionless ratio that governs stability of the explicit step.
    pub fn ratio(&self) -> f64 {
        self.conductance * self.dt_s / self.node_heat_capacity_j_per_k
    }

    /// Advance `tank` (top first) by one step.
    ///
    /// All layers are updated from the same snapshot of the previous
    /// temperatures, so the result does not depend on iteration order.
    pub fn apply(&self, tank: &mut [f64]) {
        if tank.len() < 2 {
            return;
        }

        let previous = tank.to_vec();
        for (i, pair) in previous.windows(2).enumerate() {
            // Heat (J) crossing the boundary from layer i down into layer i + 1.
            let q = (pair[0] - pair[1]) * self.conductance * self.dt_s;
            let dt_k = q / self.node_heat_capacity_j_per_k;
            tank[i] -= dt_k;
            tank[i + 1] += dt_k;
        }
    }
}
