//! Handlers for the visibility- and ceiling-variation remarks (§4.2):
//! surface/tower visibility, variable and sector visibility, second-location
//! readings, variable ceiling, and obscuration.

use crate::model::elements::{CloudCover, CloudLayer, CloudType, DirectionalReading, Variable, Visibility};

fn parse_miles(text: &str) -> Option<(f64, Option<char>)> {
    let (operator, text) = match text.strip_prefix('M') {
        Some(rest) => (Some('M'), rest),
        None => (None, text),
    };
    let mut total = 0f64;
    for part in text.split_whitespace() {
        if let Some((n, d)) = part.split_once('/') {
            total += n.parse::<f64>().ok()? / d.parse::<f64>().ok()?;
        } else {
            total += part.parse::<f64>().ok()?;
        }
    }
    Some((total, operator))
}

/// `SFC VIS M?d( d/d)?` or `TWR VIS M?d( d/d)?`, joined by the grammar
/// driver.
pub fn parse_located_visibility(joined: &str, prefix: &str) -> Option<Visibility> {
    let rest = joined.strip_prefix(prefix)?.trim();
    let (value, operator) = parse_miles(rest)?;
    Some(Visibility::Distance { value, unit: "[mi_i]", operator })
}

/// `VIS d( d/d)?Vd( d/d)?`: a variable visibility envelope, in statute
/// miles (§4.4 converts at encode time).
pub fn parse_variable_visibility(joined: &str) -> Option<Variable<f64>> {
    let rest = joined.strip_prefix("VIS")?.trim();
    let (lo, hi) = rest.split_once('V')?;
    let (lo, _) = parse_miles(lo.trim())?;
    let (hi, _) = parse_miles(hi.trim())?;
    Some(Variable { lo, hi })
}

/// `VIS [NSEW]{1,2} d( d/d)?`: sector visibility.
pub fn parse_sector_visibility(joined: &str) -> Option<DirectionalReading> {
    let rest = joined.strip_prefix("VIS")?.trim();
    let (direction, value_part) = rest.split_once(' ')?;
    if !direction.chars().all(|c| matches!(c, 'N' | 'S' | 'E' | 'W')) {
        return None;
    }
    let (value, _) = parse_miles(value_part)?;
    Some(DirectionalReading { direction: Some(direction.to_string()), value })
}

/// `VIS d( d/d)? <location>`: visibility at a second location on the field.
pub fn parse_visibility_second_location(joined: &str) -> Option<DirectionalReading> {
    let rest = joined.strip_prefix("VIS")?.trim();
    let last_space = rest.rfind(' ')?;
    let (value_part, location) = rest.split_at(last_space);
    let (value, _) = parse_miles(value_part)?;
    Some(DirectionalReading { direction: Some(location.trim().to_string()), value })
}

/// `CIG ddd <location>`: ceiling at a second location, in hundreds of feet.
pub fn parse_ceiling_second_location(joined: &str) -> Option<DirectionalReading> {
    let rest = joined.strip_prefix("CIG")?.trim();
    let (value_part, location) = rest.split_once(' ')?;
    Some(DirectionalReading {
        direction: Some(location.to_string()),
        value: value_part.parse().ok()?,
    })
}

/// `dddVddd`-shaped variable ceiling, in hundreds of feet.
pub fn parse_variable_ceiling(lexeme: &str) -> Option<Variable<f64>> {
    let (lo, hi) = lexeme.split_once('V')?;
    Some(Variable { lo: lo.parse().ok()?, hi: hi.parse().ok()? })
}

/// `[A-Z]{2}\d (FEW|SCT|BKN|OVC)ddd`: an obscuring phenomenon reported with
/// its own cover/height. The 2-letter+oktas prefix (e.g. `FU8`) identifies
/// the obscuring phenomenon; only the cover/height suffix is carried into
/// the layer itself, same shape as a mandatory `sky` group.
pub fn parse_obscuration(joined: &str) -> Option<CloudLayer> {
    let suffix = joined.rsplit(' ').next()?;
    let (cover_str, height_str) = suffix.split_at(3);
    let cover = match cover_str {
        "FEW" => CloudCover::Few,
        "SCT" => CloudCover::Scattered,
        "BKN" => CloudCover::Broken,
        "OVC" => CloudCover::Overcast,
        _ => return None,
    };
    Some(CloudLayer {
        cover,
        cloud_type: CloudType::Normal,
        height_hundreds_ft: height_str.parse().ok(),
    })
}

/// `(FEW|SCT|BKN|OVC)ddd V (FEW|SCT|BKN|OVC)`: a variable sky condition,
/// cover varying at an otherwise unchanged height.
pub fn parse_variable_sky(joined: &str) -> Option<(CloudLayer, CloudLayer)> {
    let (first, second) = joined.split_once(" V ")?;
    let (cover1, height) = first.split_at(3);
    let height_hundreds_ft = height.parse().ok();
    let cover_of = |s: &str| match s {
        "FEW" => Some(CloudCover::Few),
        "SCT" => Some(CloudCover::Scattered),
        "BKN" => Some(CloudCover::Broken),
        "OVC" => Some(CloudCover::Overcast),
        _ => None,
    };
    Some((
        CloudLayer { cover: cover_of(cover1)?, cloud_type: CloudType::Normal, height_hundreds_ft },
        CloudLayer { cover: cover_of(second)?, cloud_type: CloudType::Normal, height_hundreds_ft },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_visibility_reads_mixed_fraction() {
        let v = parse_located_visibility("SFC VIS 1 1/2", "SFC VIS").unwrap();
        assert_eq!(v, Visibility::Distance { value: 1.5, unit: "[mi_i]", operator: None });
    }

    #[test]
    fn variable_visibility_splits_on_v() {
        let v = parse_variable_visibility("VIS 1/2V2").unwrap();
        assert!((v.lo - 0.5).abs() < 1e-9);
        assert!((v.hi - 2.0).abs() < 1e-9);
    }

    #[test]
    fn sector_visibility_reads_direction_and_value() {
        let v = parse_sector_visibility("VIS NE 2").unwrap();
        assert_eq!(v.direction.as_deref(), Some("NE"));
        assert!((v.value - 2.0).abs() < 1e-9);
    }

    #[test]
    fn variable_sky_keeps_height_constant() {
        let (a, b) = parse_variable_sky("BKN008 V OVC").unwrap();
        assert_eq!(a.cover, CloudCover::Broken);
        assert_eq!(b.cover, CloudCover::Overcast);
        assert_eq!(a.height_hundreds_ft, b.height_hundreds_ft);
    }
}
