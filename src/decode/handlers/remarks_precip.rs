//! Handlers for precipitation-history, hail, and snow-increasing-rapidly
//! remarks (§4.2).

use crate::model::elements::{Hail, PrecipitationEvent, PrecipitationHistory, SnowIncrease};
use crate::model::time::{recover_embedded_time, IssueTime};

/// `(SH|FZ)?(TS|RA|SN|DZ|PL|GR|GS|IC|UP)((B|E)HHMM)+`: a phenomenon token
/// followed by one or more begin/end events.
pub fn parse_precipitation_history(lexeme: &str, issue: IssueTime) -> Option<PrecipitationHistory> {
    let split = lexeme.find(['B', 'E'])?;
    let (phenomenon, mut rest) = lexeme.split_at(split);
    if phenomenon.is_empty() {
        return None;
    }

    let mut events = Vec::new();
    while !rest.is_empty() {
        let begin = match rest.chars().next()? {
            'B' => true,
            'E' => false,
            _ => return None,
        };
        rest = &rest[1..];
        let digits_len = rest.chars().take_while(char::is_ascii_digit).count();
        if digits_len != 2 && digits_len != 4 {
            return None;
        }
        let (digits, tail) = rest.split_at(digits_len);
        let (hour, minute) = if digits_len == 4 {
            (digits[..2].parse().ok()?, digits[2..].parse().ok()?)
        } else {
            (issue.hour, digits.parse().ok()?)
        };
        events.push(PrecipitationEvent {
            begin,
            time: recover_embedded_time(issue, hour, minute),
        });
        rest = tail;
    }

    Some(PrecipitationHistory {
        phenomenon: phenomenon.to_string(),
        events,
    })
}

/// `GR` hail diameter, joined from a leading `GR` token and a trailing
/// whole-or-fractional-inch value (e.g. `GR 1 1/2`, `GR 3/4`).
pub fn parse_hail(joined: &str) -> Option<Hail> {
    let rest = joined.strip_prefix("GR")?.trim();
    let mut total = 0f64;
    let mut any = false;
    for part in rest.split_whitespace() {
        any = true;
        if let Some((n, d)) = part.split_once('/') {
            total += n.parse::<f64>().ok()? / d.parse::<f64>().ok()?;
        } else {
            total += part.parse::<f64>().ok()?;
        }
    }
    any.then_some(Hail { diameter_in: total })
}

/// `SNINCR n/nn`: increase over the past hour and new total depth, both in
/// inches.
pub fn parse_snow_increase(lexeme: &str) -> Option<SnowIncrease> {
    let rest = lexeme.strip_prefix("SNINCR")?.trim_start();
    let (increase, total) = rest.split_once('/')?;
    Some(SnowIncrease {
        increase_in: increase.parse().ok()?,
        total_depth_in: total.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> IssueTime {
        IssueTime::from_ymdhm(2024, 5, 12, 17, 53).unwrap()
    }

    #[test]
    fn precipitation_history_matches_scenario_5() {
        let ph = parse_precipitation_history("TSB15E47", issue()).unwrap();
        assert_eq!(ph.phenomenon, "TS");
        assert_eq!(ph.events.len(), 2);
        assert!(ph.events[0].begin);
        assert_eq!(ph.events[0].time.minute, 15);
        assert!(!ph.events[1].begin);
        assert_eq!(ph.events[1].time.minute, 47);

        let ph = parse_precipitation_history("RAB10E45", issue()).unwrap();
        assert_eq!(ph.phenomenon, "RA");
        assert_eq!(ph.events.len(), 2);
    }

    #[test]
    fn hail_parses_mixed_fraction() {
        let h = parse_hail("GR 1 1/2").unwrap();
        assert!((h.diameter_in - 1.5).abs() < 1e-9);
    }

    #[test]
    fn snow_increase_splits_on_slash() {
        let si = parse_snow_increase("SNINCR2/15").unwrap();
        assert!((si.increase_in - 2.0).abs() < 1e-9);
        assert!((si.total_depth_in - 15.0).abs() < 1e-9);
    }
}
