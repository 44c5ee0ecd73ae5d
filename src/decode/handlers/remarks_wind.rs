//! Handlers for the wind-event remarks: peak wind and wind shift (§4.2).
//! Both carry an embedded `HHMM` (or bare `MM`, implying the report's own
//! hour) that [`recover_embedded_time`] anchors against the report's issue
//! time.

use crate::model::elements::{PeakWind, WindShift};
use crate::model::time::{recover_embedded_time, IssueTime};

/// `PK WND dddff(f)?/(HH)?MM`, already joined into one string by the grammar
/// driver's windowed-join matching.
pub fn parse_peak_wind(joined: &str, issue: IssueTime) -> Option<PeakWind> {
    let digits: String = joined.chars().filter(|c| c.is_ascii_digit() || *c == '/').collect();
    let (dir_speed, time_part) = digits.split_once('/')?;
    if dir_speed.len() < 5 {
        return None;
    }
    let (dir, speed) = dir_speed.split_at(3);

    let (hour, minute) = match time_part.len() {
        4 => (time_part[..2].parse().ok()?, time_part[2..].parse().ok()?),
        2 => (issue.hour, time_part.parse().ok()?),
        _ => return None,
    };

    Some(PeakWind {
        direction: dir.parse().ok()?,
        speed: speed.parse().ok()?,
        time: recover_embedded_time(issue, hour, minute),
    })
}

/// `WSHFT (HH)?MM (FROPA)?`, already joined by the grammar driver.
pub fn parse_wind_shift(joined: &str, issue: IssueTime) -> Option<WindShift> {
    let rest = joined.strip_prefix("WSHFT")?.trim_start();
    let frontal_passage = rest.ends_with("FROPA");
    let time_part: String = rest
        .trim_end_matches("FROPA")
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let (hour, minute) = match time_part.len() {
        4 => (time_part[..2].parse().ok()?, time_part[2..].parse().ok()?),
        2 => (issue.hour, time_part.parse().ok()?),
        _ => return None,
    };

    Some(WindShift {
        time: recover_embedded_time(issue, hour, minute),
        frontal_passage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn issue() -> IssueTime {
        IssueTime::from_ymdhm(2024, 5, 12, 17, 53).unwrap()
    }

    #[test]
    fn peak_wind_parses_direction_speed_time() {
        let _ = Utc.with_ymd_and_hms(2024, 5, 12, 17, 53, 0);
        let pw = parse_peak_wind("PK WND 28045/1732", issue()).unwrap();
        assert_eq!(pw.direction, 280);
        assert_eq!(pw.speed, 45);
        assert_eq!(pw.time.hour, 17);
        assert_eq!(pw.time.minute, 32);
    }

    #[test]
    fn wind_shift_detects_frontal_passage() {
        let ws = parse_wind_shift("WSHFT 1725 FROPA", issue()).unwrap();
        assert!(ws.frontal_passage);
        assert_eq!(ws.time.minute, 25);
    }

    #[test]
    fn wind_shift_without_fropa() {
        let ws = parse_wind_shift("WSHFT 1725", issue()).unwrap();
        assert!(!ws.frontal_passage);
    }
}
