//! Semantic handlers for the mandatory body's token kinds (§4.2).

use crate::model::elements::{
    Altimeter, CloudCover, CloudLayer, CloudType, RvrAccumulator, Temperature, VariableRvr,
    VerticalVisibility, Visibility, WeatherGroup, WeatherIntensity, Wind, WindDirection,
};
use crate::model::ElementValue;

/// `dddff(Gggg)?KT` or `VRB...`.
pub fn parse_wind(lexeme: &str) -> Option<Wind> {
    let body = lexeme.strip_suffix("KT")?;
    let (dir_part, rest) = if let Some(r) = body.strip_prefix("VRB") {
        (WindDirection::Variable, r)
    } else if body.len() >= 3 {
        let (d, r) = body.split_at(3);
        (WindDirection::Heading(d.parse().ok()?), r)
    } else {
        return None;
    };

    let (speed_part, gust) = match rest.split_once('G') {
        Some((s, g)) => (s, Some(g.parse().ok()?)),
        None => (rest, None),
    };
    let speed_str = speed_part.strip_prefix('P').unwrap_or(speed_part);
    let speed = speed_str.parse().ok()?;

    Some(Wind {
        direction: dir_part,
        speed,
        gust,
        unit: "[kn_i]",
        varying: None,
    })
}

/// `dddVddd`, merged into an already-parsed [`Wind`] in place (§4.2).
pub fn parse_wind_varying(lexeme: &str) -> Option<(u32, u32)> {
    let (from, to) = lexeme.split_once('V')?;
    Some((from.parse().ok()?, to.parse().ok()?))
}

/// `1 1/2SM`, `M1/4SM`, `9999`, `CAVOK`.
pub fn parse_visibility(lexeme: &str) -> Option<Visibility> {
    if lexeme == "CAVOK" {
        return Some(Visibility::Cavok);
    }

    if let Some(miles) = lexeme.strip_suffix("SM") {
        let (operator, miles) = match miles.strip_prefix('M') {
            Some(rest) => (Some('M'), rest),
            None => (None, miles),
        };
        let mut total = 0f64;
        for part in miles.split(' ') {
            if part.is_empty() {
                continue;
            }
            if let Some((n, d)) = part.split_once('/') {
                total += n.parse::<f64>().ok()? / d.parse::<f64>().ok()?;
            } else {
                total += part.parse::<f64>().ok()?;
            }
        }
        return Some(Visibility::Distance {
            value: total,
            unit: "[mi_i]",
            operator,
        });
    }

    lexeme.parse::<f64>().ok().map(|metres| Visibility::Distance {
        value: metres,
        unit: "m",
        operator: None,
    })
}

/// `Rrwy/[MP]?dddd[UDN]?(FT)?` or the variable form `Rrwy/ddddVddddFT?`.
/// Returns `Either::Fixed` fields to append to the accumulator, or a
/// [`VariableRvr`] when the lexeme carries a `V` range.
pub enum RvrParse {
    /// A single fixed (possibly greater/less-than) reading.
    Fixed {
        rwy: String,
        mean: String,
        operator: Option<char>,
        tendency: Option<char>,
    },
    /// A variable range reading, stored separately per §4.2.
    Variable(VariableRvr),
}

pub fn parse_rvr(lexeme: &str) -> Option<RvrParse> {
    let rest = lexeme.strip_prefix('R')?;
    let (rwy, rest) = rest.split_once('/')?;

    let (tendency, rest) = match rest.chars().last() {
        Some(c @ ('U' | 'D' | 'N')) => (Some(c), &rest[..rest.len() - 1]),
        _ => (None, rest),
    };
    let rest = rest.strip_suffix("FT").unwrap_or(rest);

    if let Some((min, max)) = rest.split_once('V') {
        return Some(RvrParse::Variable(VariableRvr {
            rwy: rwy.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }));
    }

    let operator = match rest.chars().next() {
        Some(c @ ('M' | 'P')) => Some(c),
        _ => None,
    };

    Some(RvrParse::Fixed {
        rwy: rwy.to_string(),
        mean: rest.to_string(),
        operator,
        tendency,
    })
}

/// Appends one `rvr` lexeme's fixed reading into the accumulator, creating
/// it if this is the first RVR group in the report.
pub fn accumulate_rvr(acc: &mut Option<ElementValue<RvrAccumulator>>, lexeme: &str, span: std::ops::Range<usize>, rwy: &str, mean: &str, operator: Option<char>, tendency: Option<char>) {
    match acc {
        Some(existing) => {
            existing.value.push(rwy, mean, operator, tendency);
            existing.lexeme = format!("{} {}", existing.lexeme, lexeme);
            existing.span = existing.span.start..span.end;
        }
        None => {
            let mut fresh = RvrAccumulator::default();
            fresh.push(rwy, mean, operator, tendency);
            *acc = Some(ElementValue::new(lexeme, span, fresh));
        }
    }
}

/// A weather group lexeme, e.g. `-TSRA`, `+FC`, `VCSH`, `BR`.
pub fn parse_weather_group(lexeme: &str) -> WeatherGroup {
    let (intensity, rest) = if let Some(r) = lexeme.strip_prefix('+') {
        (Some(WeatherIntensity::Heavy), r)
    } else if let Some(r) = lexeme.strip_prefix('-') {
        (Some(WeatherIntensity::Light), r)
    } else if let Some(r) = lexeme.strip_prefix("VC") {
        (Some(WeatherIntensity::InVicinity), r)
    } else {
        (Some(WeatherIntensity::Moderate), lexeme)
    };

    WeatherGroup {
        intensity,
        phenomenon: rest.to_string(),
    }
}

/// `(FEW|SCT|BKN|OVC|0VC)hhh(CB|TCU)?`, `VVhhh`, `CLR`, `SKC`, `NSC`, `NCD`.
pub enum SkyParse {
    /// A cloud layer with cover/height/type.
    Layer(CloudLayer),
    /// Vertical visibility in place of a layer.
    VerticalVisibility(VerticalVisibility),
    /// `CLR`/`SKC`: clear, explicitly reported.
    Clear,
    /// `NSC`/`NCD`: no significant cloud / no cloud detected, nothing to encode.
    NoSignificantCloud,
}

pub fn parse_sky(lexeme: &str) -> Option<SkyParse> {
    match lexeme {
        "CLR" | "SKC" => return Some(SkyParse::Clear),
        "NSC" | "NCD" => return Some(SkyParse::NoSignificantCloud),
        _ => {}
    }

    if let Some(height) = lexeme.strip_prefix("VV") {
        let height_hundreds_ft = if height == "///" { None } else { height.parse().ok() };
        return Some(SkyParse::VerticalVisibility(VerticalVisibility { height_hundreds_ft }));
    }

    let (cover_str, rest) = lexeme.split_at(3);
    let cover = match cover_str {
        "FEW" => CloudCover::Few,
        "SCT" => CloudCover::Scattered,
        "BKN" => CloudCover::Broken,
        "OVC" | "0VC" => CloudCover::Overcast,
        _ => return None,
    };

    let (height_str, type_str) = if rest.len() > 3 { rest.split_at(3) } else { (rest, "") };
    let height_hundreds_ft = if height_str == "///" { None } else { height_str.parse().ok() };
    let cloud_type = match type_str {
        "CB" => CloudType::Cumulonimbus,
        "TCU" => CloudType::ToweringCumulus,
        "///" => CloudType::Unknown,
        _ => CloudType::Normal,
    };

    Some(SkyParse::Layer(CloudLayer {
        cover,
        cloud_type,
        height_hundreds_ft,
    }))
}

/// `ddMddTdd` two-digit temperature/dewpoint, `M` prefix for negative.
pub fn parse_temperature(lexeme: &str) -> Option<Temperature> {
    let (temp_str, dew_str) = lexeme.trim_end_matches('/').split_once('/')?;
    let parse_half = |s: &str| -> Option<i32> {
        if s.is_empty() || s == "//" {
            return None;
        }
        if let Some(rest) = s.strip_prefix('M') {
            Some(-rest.parse::<i32>().ok()?)
        } else {
            s.parse().ok()
        }
    };
    Some(Temperature {
        air_temp_c: parse_half(temp_str)?,
        dewpoint_c: parse_half(dew_str)?,
    })
}

/// `Annnn` (inHg) or `Qnnnn` (hPa).
pub fn parse_altimeter(lexeme: &str) -> Option<Altimeter> {
    let data = &lexeme[1..];
    match lexeme.chars().next()? {
        'A' => Some(Altimeter::InchesOfMercury(data.parse::<f64>().ok()? / 100.0)),
        'Q' => Some(Altimeter::Hectopascals(data.parse().ok()?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wind_with_gust() {
        let w = parse_wind("27015G25KT").unwrap();
        assert_eq!(w.direction, WindDirection::Heading(270));
        assert_eq!(w.speed, 15);
        assert_eq!(w.gust, Some(25));
    }

    #[test]
    fn visibility_fraction_with_below_operator() {
        let v = parse_visibility("M1/4SM").unwrap();
        assert_eq!(
            v,
            Visibility::Distance {
                value: 0.25,
                unit: "[mi_i]",
                operator: Some('M'),
            }
        );
    }

    #[test]
    fn rvr_fixed_reading() {
        match parse_rvr("R27/1600D").unwrap() {
            RvrParse::Fixed { rwy, mean, tendency, .. } => {
                assert_eq!(rwy, "27");
                assert_eq!(mean, "1600");
                assert_eq!(tendency, Some('D'));
            }
            RvrParse::Variable(_) => panic!("expected fixed"),
        }
    }

    #[test]
    fn temperature_parses_negative_dewpoint() {
        let t = parse_temperature("22/M01").unwrap();
        assert_eq!(t.air_temp_c, 22);
        assert_eq!(t.dewpoint_c, -1);
    }

    #[test]
    fn altimeter_inhg_divides_by_100() {
        match parse_altimeter("A3012").unwrap() {
            Altimeter::InchesOfMercury(v) => assert!((v - 30.12).abs() < 1e-9),
            Altimeter::Hectopascals(_) => panic!("expected inHg"),
        }
    }
}
