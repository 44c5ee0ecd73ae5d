//! Timestamp recovery: the report only carries day-of-month + hour + minute
//! UTC, so the year and month have to be inferred from wall-clock time, then
//! sanity-checked against the month length (§4.2 "itime").

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

/// The issue time of a report: seconds since epoch plus the recovered
/// `(year, month, day, hour, minute)` tuple, kept alongside each other so
/// callers never have to re-derive one from the other.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IssueTime {
    /// Seconds since the Unix epoch.
    pub epoch_seconds: i64,
    /// Four-digit year.
    pub year: i32,
    /// 1-12.
    pub month: u32,
    /// 1-31.
    pub day: u32,
    /// 0-23 UTC.
    pub hour: u32,
    /// 0-59 UTC.
    pub minute: u32,
}

impl IssueTime {
    /// Build directly from a recovered calendar tuple.
    #[must_use]
    pub fn from_ymdhm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        let dt = Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single()?;
        Some(Self {
            epoch_seconds: dt.timestamp(),
            year,
            month,
            day,
            hour,
            minute,
        })
    }

    /// The value used when decoding fails entirely: "now", as an
    /// [`DecodeErrorKind::InvalidTime`](crate::error::DecodeErrorKind::InvalidTime)
    /// is recorded alongside it.
    #[must_use]
    pub fn now(now: DateTime<Utc>) -> Self {
        Self {
            epoch_seconds: now.timestamp(),
            year: now.year(),
            month: now.month(),
            day: now.day(),
            hour: now.hour(),
            minute: now.minute(),
        }
    }

    /// An ISO-8601 Zulu timestamp, as used throughout the IWXXM encoder for
    /// `gml:timePosition` and friends.
    #[must_use]
    pub fn to_iso8601(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:00Z",
            self.year, self.month, self.day, self.hour, self.minute
        )
    }
}

/// Rolls the report's day/hour/minute into a full timestamp using `now` as
/// the month/year anchor, per §4.2's "itime" rule: if the naive composition
/// lands more than a day in the future, the month is rolled back one; if it
/// lands more than 25 days in the past, the month is rolled forward one.
/// Returns `None` if the day-of-month is invalid for the resolved month
/// (the Feb leap-year rule accepts `day <= 29` whenever `year % 4 == 0`).
#[must_use]
pub fn fix_date(day: u32, hour: u32, minute: u32, now: DateTime<Utc>) -> Option<IssueTime> {
    let mut year = now.year();
    let mut month = now.month();

    let naive = Utc
        .with_ymd_and_hms(year, month, day.max(1).min(28), hour, minute, 0)
        .single()?;

    if naive > now + Duration::days(1) {
        if month == 1 {
            month = 12;
            year -= 1;
        } else {
            month -= 1;
        }
    } else if naive < now - Duration::days(25) {
        if month == 12 {
            month = 1;
            year += 1;
        } else {
            month += 1;
        }
    }

    if !day_is_valid_for_month(year, month, day) {
        return None;
    }

    IssueTime::from_ymdhm(year, month, day, hour, minute)
}

fn day_is_valid_for_month(year: i32, month: u32, day: u32) -> bool {
    if day == 0 {
        return false;
    }
    let max_day = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if year % 4 == 0 => 29,
        2 => 28,
        _ => return false,
    };
    day <= max_day
}

/// A time recovered from an `HHMM`-only (or `MM`-only) lexeme embedded in a
/// remark (`pkwnd`, `wshft`, `pcpnhist` events): the report's own
/// day/hour/minute anchor the reconstruction, then [`fix_date`]'s rollback
/// rule applies when the embedded hour precedes the issue hour (e.g. an
/// observation at `0003Z` referencing an event at `2358` on the previous
/// day).
#[must_use]
pub fn recover_embedded_time(issue: IssueTime, hour: u32, minute: u32) -> IssueTime {
    let issue_dt = Utc
        .with_ymd_and_hms(issue.year, issue.month, issue.day, issue.hour, issue.minute, 0)
        .single()
        .unwrap_or_else(|| Utc::now());

    let mut candidate = Utc
        .with_ymd_and_hms(issue.year, issue.month, issue.day, hour, minute, 0)
        .single();

    if candidate.is_none_or(|c| c > issue_dt + Duration::hours(1)) {
        let prev_day = issue_dt.date_naive().pred_opt().unwrap_or(issue_dt.date_naive());
        candidate = Utc
            .with_ymd_and_hms(
                prev_day.year(),
                prev_day.month(),
                prev_day.day(),
                hour,
                minute,
                0,
            )
            .single();
    }

    let dt = candidate.unwrap_or(issue_dt);
    IssueTime {
        epoch_seconds: dt.timestamp(),
        year: dt.year(),
        month: dt.month(),
        day: dt.day(),
        hour: dt.hour(),
        minute: dt.minute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_date_rolls_back_when_future() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 0, 10, 0).unwrap();
        let t = fix_date(28, 23, 0, now).unwrap();
        assert_eq!(t.month, 2);
        assert_eq!(t.day, 28);
    }

    #[test]
    fn fix_date_rolls_forward_when_far_past() {
        let now = Utc.with_ymd_and_hms(2024, 3, 28, 0, 0, 0).unwrap();
        let t = fix_date(1, 0, 0, now).unwrap();
        assert_eq!(t.month, 4);
    }

    #[test]
    fn fix_date_accepts_leap_day() {
        let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
        let t = fix_date(29, 12, 0, now).unwrap();
        assert_eq!(t.day, 29);
    }

    #[test]
    fn fix_date_rejects_invalid_day() {
        let now = Utc.with_ymd_and_hms(2023, 2, 28, 12, 0, 0).unwrap();
        assert!(fix_date(30, 12, 0, now).is_none());
    }

    #[test]
    fn recover_embedded_time_crosses_midnight_backwards() {
        let issue = IssueTime::from_ymdhm(2024, 5, 12, 0, 3, 0).unwrap();
        let t = recover_embedded_time(issue, 23, 58);
        assert_eq!(t.day, 11);
        assert_eq!(t.hour, 23);
        assert_eq!(t.minute, 58);
    }
}
