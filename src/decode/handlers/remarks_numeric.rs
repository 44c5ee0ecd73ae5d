//! Handlers for the fixed-width numeric remark groups (§4.2): precipitation
//! and ice-accretion amounts, snow depth, liquid-water-equivalent, sunshine,
//! tenths-precision temperatures, and the 3-hour pressure tendency.

use crate::model::elements::{
    Extreme24h, Extreme6h, PeriodAmount, PressureTendency3h, SnowDepth, Sunshine, TempDec,
};

/// `Pnnnn`: hourly precipitation, hundredths of an inch.
pub fn parse_precip_1h(lexeme: &str) -> Option<PeriodAmount> {
    let n: f64 = lexeme.strip_prefix('P')?.parse().ok()?;
    Some(PeriodAmount { period_hours: 1, amount_in: n / 100.0 })
}

/// `6nnnn`: 3- or 6-hour precipitation depending on the report's minute
/// field (`025/085/145/205` => 3h, `055/115/175/235` => 6h).
pub fn parse_precip_6h(lexeme: &str, report_minute: u32) -> Option<PeriodAmount> {
    let n: f64 = lexeme.strip_prefix('6')?.parse().ok()?;
    let period_hours = if [25, 85, 145, 205].contains(&report_minute) {
        3
    } else {
        6
    };
    Some(PeriodAmount { period_hours, amount_in: n / 100.0 })
}

/// `7nnnn`: 24-hour precipitation, hundredths of an inch.
pub fn parse_precip_24h(lexeme: &str) -> Option<PeriodAmount> {
    let n: f64 = lexeme.strip_prefix('7')?.parse().ok()?;
    Some(PeriodAmount { period_hours: 24, amount_in: n / 100.0 })
}

/// `I[136]nnn`: ice accretion over the period named by the leading digit.
pub fn parse_ice_accretion(lexeme: &str) -> Option<PeriodAmount> {
    let rest = lexeme.strip_prefix('I')?;
    let mut chars = rest.chars();
    let period_hours = match chars.next()? {
        '1' => 1,
        '3' => 3,
        '6' => 6,
        _ => return None,
    };
    let n: f64 = chars.as_str().parse().ok()?;
    Some(PeriodAmount { period_hours, amount_in: n / 100.0 })
}

/// `4/nnn`: snow depth in whole inches.
pub fn parse_snow_depth(lexeme: &str) -> Option<SnowDepth> {
    let n: f64 = lexeme.strip_prefix("4/")?.parse().ok()?;
    Some(SnowDepth { depth_in: n })
}

/// `933nnn`: water equivalent of snow on the ground, hundredths of an inch.
pub fn parse_liquid_water_equivalent(lexeme: &str) -> Option<PeriodAmount> {
    let n: f64 = lexeme.strip_prefix("933")?.parse().ok()?;
    Some(PeriodAmount { period_hours: 24, amount_in: n / 100.0 })
}

/// `98nnn`: sunshine duration in whole minutes.
pub fn parse_sunshine(lexeme: &str) -> Option<Sunshine> {
    let minutes = lexeme.strip_prefix("98")?.parse().ok()?;
    Some(Sunshine { minutes })
}

/// `Tsnnnsnnn`: tenths-precision temperature/dewpoint, `s` sign digits.
pub fn parse_temp_dec(lexeme: &str) -> Option<TempDec> {
    let rest = lexeme.strip_prefix('T')?;
    if rest.len() != 8 {
        return None;
    }
    let (t_sign, t_rest) = rest.split_at(1);
    let (t_val, rest2) = t_rest.split_at(3);
    let (d_sign, d_val) = rest2.split_at(1);

    let sign_mult = |s: &str| -> Option<i32> {
        match s {
            "0" => Some(1),
            "1" => Some(-1),
            _ => None,
        }
    };

    Some(TempDec {
        air_temp_tenths: sign_mult(t_sign)? * t_val.parse::<i32>().ok()?,
        dewpoint_tenths: sign_mult(d_sign)? * d_val.parse::<i32>().ok()?,
    })
}

/// `1snnn` 6-hour maximum temperature.
pub fn parse_max_temp_6h(lexeme: &str) -> Option<Extreme6h> {
    parse_signed_6h(lexeme.strip_prefix('1')?)
}

/// `2snnn` 6-hour minimum temperature.
pub fn parse_min_temp_6h(lexeme: &str) -> Option<Extreme6h> {
    parse_signed_6h(lexeme.strip_prefix('2')?)
}

fn parse_signed_6h(rest: &str) -> Option<Extreme6h> {
    if rest.len() != 4 {
        return None;
    }
    let (sign, val) = rest.split_at(1);
    let mult = match sign {
        "0" => 1,
        "1" => -1,
        _ => return None,
    };
    Some(Extreme6h { tenths: mult * val.parse::<i32>().ok()? })
}

/// `4snnnsnnn` 24-hour max/min temperatures.
pub fn parse_extreme_temp_24h(lexeme: &str) -> Option<Extreme24h> {
    let rest = lexeme.strip_prefix('4')?;
    if rest.len() != 8 {
        return None;
    }
    let (max_sign, rest2) = rest.split_at(1);
    let (max_val, rest3) = rest2.split_at(3);
    let (min_sign, min_val) = rest3.split_at(1);

    let sign_mult = |s: &str| -> Option<i32> {
        match s {
            "0" => Some(1),
            "1" => Some(-1),
            _ => None,
        }
    };

    Some(Extreme24h {
        max_tenths: sign_mult(max_sign)? * max_val.parse::<i32>().ok()?,
        min_tenths: sign_mult(min_sign)? * min_val.parse::<i32>().ok()?,
    })
}

/// `5cnnn` 3-hour pressure tendency.
pub fn parse_pressure_tendency_3h(lexeme: &str) -> Option<PressureTendency3h> {
    let rest = lexeme.strip_prefix('5')?;
    if rest.len() != 4 {
        return None;
    }
    let (code, val) = rest.split_at(1);
    Some(PressureTendency3h {
        code: code.parse().ok()?,
        tenths_hpa: val.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dec_matches_scenario_1() {
        let td = parse_temp_dec("T02221006").unwrap();
        assert_eq!(td.air_temp_tenths, 222);
        assert_eq!(td.dewpoint_tenths, -6);
    }

    #[test]
    fn precip_6h_period_from_minute() {
        assert_eq!(parse_precip_6h("60125", 25).unwrap().period_hours, 3);
        assert_eq!(parse_precip_6h("60125", 55).unwrap().period_hours, 6);
    }

    #[test]
    fn ice_accretion_periods() {
        assert_eq!(parse_ice_accretion("I1010").unwrap().period_hours, 1);
        assert_eq!(parse_ice_accretion("I3010").unwrap().period_hours, 3);
        assert_eq!(parse_ice_accretion("I6010").unwrap().period_hours, 6);
    }
}
