//! Fixed properties of liquid water.
//!
//! Material properties are held constant over the operating range; there is
//! no temperature dependence.

use crate::units::{Density, SpecificHeat};

pub const DENSITY_KG_PER_M3: f64 = 1000.0;
pub const SPECIFIC_HEAT_J_PER_KG_K: f64 = 4186.0;

#[inline]
pub fn density() -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(DENSITY_KG_PER_M3)
}

#[inline]
pub fn specific_heat() -> SpecificHeat {
    use uom::si::specific_heat_capacity::joule_per_kilogram_kelvin;
    SpecificHeat::new::<joule_per_kilogram_kelvin>(SPECIFIC_HEAT_J_PER_KG_K)
}
