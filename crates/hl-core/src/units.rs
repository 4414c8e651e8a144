// hl-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, HeatFluxDensity as UomHeatFluxDensity, Length as UomLength,
    MassDensity as UomMassDensity, SpecificHeatCapacity as UomSpecificHeatCapacity,
    ThermodynamicTemperature as UomThermodynamicTemperature, Volume as UomVolume,
    VolumeRate as UomVolumeRate,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Irradiance = UomHeatFluxDensity;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type SpecificHeat = UomSpecificHeatCapacity;
pub type Temperature = UomThermodynamicTemperature;
pub type Volume = UomVolume;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn m3(v: f64) -> Volume {
    use uom::si::volume::cubic_meter;
    Volume::new::<cubic_meter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn w_per_m2(v: f64) -> Irradiance {
    use uom::si::heat_flux_density::watt_per_square_meter;
    Irradiance::new::<watt_per_square_meter>(v)
}

/// Temperature on the Celsius scale, as stored in node chains.
#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}
