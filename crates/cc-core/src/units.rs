// cc-core/src/units.rs

use uom::si::f64::{
    Length as UomLength, Ratio as UomRatio, TemperatureInterval as UomTemperatureInterval,
};

// Public canonical unit types (SI, f64)
pub type Length = UomLength;
pub type Ratio = UomRatio;
pub type TempAnomaly = UomTemperatureInterval;

/// Atmospheric mole fraction given in parts per million.
#[inline]
pub fn ppm(v: f64) -> Ratio {
    use uom::si::ratio::part_per_million;
    Ratio::new::<part_per_million>(v)
}

/// Temperature anomaly in degrees Celsius.
#[inline]
pub fn delta_c(v: f64) -> TempAnomaly {
    use uom::si::temperature_interval::degree_celsius;
    TempAnomaly::new::<degree_celsius>(v)
}

#[inline]
pub fn cm(v: f64) -> Length {
    use uom::si::length::centimeter;
    Length::new::<centimeter>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn as_ppm(v: Ratio) -> f64 {
    use uom::si::ratio::part_per_million;
    v.get::<part_per_million>()
}

#[inline]
pub fn as_delta_c(v: TempAnomaly) -> f64 {
    use uom::si::temperature_interval::degree_celsius;
    v.get::<degree_celsius>()
}

#[inline]
pub fn as_cm(v: Length) -> f64 {
    use uom::si::length::centimeter;
    v.get::<centimeter>()
}

pub mod constants {
    /// Centimetres per metre, used to express thermal expansion in cm.
    pub const CM_PER_M: f64 = 100.0;

    /// Pre-industrial atmospheric CO2 concentration, ppm.
    pub const PREINDUSTRIAL_CO2_PPM: f64 = 280.0;

    /// Simplified CO2 forcing coefficient, W/m^2.
    pub const CO2_FORCING_COEFF_W_M2: f64 = 5.35;

    /// Forcing for a doubling of CO2, W/m^2.
    pub const FORCING_2XCO2_W_M2: f64 = 3.7;

    /// Length of the seasonal cycle in steps.
    pub const SEASONAL_CYCLE_STEPS: usize = 12;
}
