//! Handlers for the remark groups that carry no embedded grammar of their
//! own: station automation flags, sensor outages, pressure/mslp, and the
//! miscellaneous single-word markers (§4.2).

use crate::model::elements::{
    AutomationType, FirstOrLast, PressureChangeRapid, SeaLevelPressure, SensorStatus,
};

/// `AO1`/`AO2`.
pub fn parse_station_type(lexeme: &str) -> Option<AutomationType> {
    match lexeme {
        "AO1" => Some(AutomationType::Ao1),
        "AO2" => Some(AutomationType::Ao2),
        _ => None,
    }
}

/// Accumulates one `ssindc` mnemonic (`RVRNO`, `PWINO`, `PNO`, ...) into the
/// report's sensor-status list.
pub fn push_sensor_status(status: &mut SensorStatus, lexeme: &str) {
    status.codes.push(lexeme.to_string());
}

/// `PRESRR`/`PRESFR`.
pub fn parse_pressure_change_rapid(lexeme: &str) -> Option<PressureChangeRapid> {
    match lexeme {
        "PRESRR" => Some(PressureChangeRapid::Rising),
        "PRESFR" => Some(PressureChangeRapid::Falling),
        _ => None,
    }
}

/// `SLPppp`: the trailing 3 digits are tenths of a hectopascal; `pp.p >=
/// 60.0` adds to 900, otherwise to 1000 (§4.2 "mslp").
pub fn parse_sea_level_pressure(lexeme: &str) -> Option<SeaLevelPressure> {
    let digits = lexeme.strip_prefix("SLP")?;
    let raw: f64 = digits.parse().ok()?;
    let tenths = raw / 10.0;
    let hectopascals = if tenths >= 60.0 { 900.0 + tenths } else { 1000.0 + tenths };
    Some(SeaLevelPressure { hectopascals })
}

/// `FIRST`/`LAST`.
pub fn parse_first_or_last(lexeme: &str) -> Option<FirstOrLast> {
    match lexeme {
        "FIRST" => Some(FirstOrLast::First),
        "LAST" => Some(FirstOrLast::Last),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slp_uses_fixed_60_threshold() {
        let p = parse_sea_level_pressure("SLP134").unwrap();
        assert!((p.hectopascals - 1013.4).abs() < 1e-9);

        let p = parse_sea_level_pressure("SLP995").unwrap();
        assert!((p.hectopascals - 999.5).abs() < 1e-9);
    }

    #[test]
    fn slp_deep_low_above_threshold_resolves_to_900_band() {
        let p = parse_sea_level_pressure("SLP620").unwrap();
        assert!((p.hectopascals - 962.0).abs() < 1e-9);
    }

    #[test]
    fn station_type_rejects_unknown() {
        assert_eq!(parse_station_type("AO3"), None);
    }
}
