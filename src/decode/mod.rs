//! The decode pipeline: tokenize, run the grammar driver, and hand back an
//! [`ObservationRecord`] (§4).

mod grammar;
mod handlers;
mod token;
mod tokenizer;
mod unparsed;

use chrono::{DateTime, Utc};

use crate::model::ObservationRecord;

/// Decodes METAR/SPECI reports. Stateless beyond the process-wide token
/// table in [`token::patterns`]; construct one per report or reuse freely.
#[derive(Default, Debug, Clone, Copy)]
pub struct Decoder;

impl Decoder {
    /// A fresh decoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decodes `report` as of the current wall-clock time, used to recover
    /// the year/month the TAC body omits.
    #[must_use]
    pub fn decode(&self, report: &str) -> ObservationRecord {
        self.decode_as_of(report, Utc::now())
    }

    /// Decodes `report`, anchoring date recovery to `now` instead of the
    /// current wall-clock time. Exposed for deterministic testing.
    #[must_use]
    pub fn decode_as_of(&self, report: &str, now: DateTime<Utc>) -> ObservationRecord {
        grammar::parse(report.trim(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decoder_trims_surrounding_whitespace() {
        let now = Utc.with_ymd_and_hms(2024, 5, 12, 18, 0, 0).unwrap();
        let rec = Decoder::new().decode_as_of("  METAR KDEN 121753Z 10SM CLR 20/10 A3000  ", now);
        assert_eq!(rec.station.as_deref(), Some("KDEN"));
    }
}
