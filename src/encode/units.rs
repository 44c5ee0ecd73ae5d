//! UCUM unit-of-measure strings and the conversion constants §4.4 pins to
//! specific factors. The decoder never converts (§3); every factor here is
//! applied exactly once, at encode time.

/// `[kn_i]` → `km/h`.
pub const KNOTS_TO_KMH: f64 = 1.85184;
/// `[mi_i]` → `m`.
pub const STATUTE_MILES_TO_METRES: f64 = 1609.34;
/// `[ft_i]` → `m`.
pub const FEET_TO_METRES: f64 = 0.3048;
/// inches → `m`.
pub const INCHES_TO_METRES: f64 = 0.0254;
/// `in/h` → `kg/(s·m²)`.
pub const INCHES_PER_HOUR_TO_KG_PER_SM2: f64 = 7.06e-3;

/// UCUM unit strings used verbatim throughout the result body.
pub mod uom {
    pub const CELSIUS: &str = "Cel";
    pub const HECTOPASCAL: &str = "hPa";
    pub const INCHES_OF_MERCURY: &str = "[in_i'Hg]";
    pub const METRE: &str = "m";
    pub const KM_PER_HOUR: &str = "km/h";
    pub const DEGREE: &str = "deg";
    pub const KG_PER_SM2: &str = "kg/m2/s";
}

/// Inches-of-mercury to hectopascals, matching the original encoder's
/// `factor = 33.86` (`METARXMLEncoder.py`'s `alt` handler) rather than the
/// more precise standard-atmosphere constant, so that altimeter-derived
/// `qnh` values agree with the system this crate was distilled from.
#[must_use]
pub fn inches_hg_to_hpa(value: f64) -> f64 {
    value * 33.86
}
