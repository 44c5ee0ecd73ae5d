#![deny(missing_docs)]

//! Translates aviation surface weather observations written in the
//! Traditional Alphanumeric Code (TAC) form of METAR and SPECI reports into
//! structured XML conforming to the ICAO IWXXM 1.1 schema, with an optional
//! U.S. extension (IWXXM-US 1.0) that encodes the free-text `RMK` remarks
//! described in FMH-1.
//!
//! The crate is a two-stage pipeline. [`decode::Decoder`] tokenizes and
//! parses a single report into a typed [`model::ObservationRecord`];
//! [`encode::Encoder`] walks that record and emits the XML document.
//! Station metadata and controlled-vocabulary lookups are narrow traits
//! ([`station::StationResolver`], [`vocab::VocabularyResolver`]) with a
//! reference file-backed implementation each -- the full loaders are
//! out-of-scope collaborators.
//!
//! ## Quick usage
//!
//! ```rust
//! use metar_iwxxm::decode::Decoder;
//! use metar_iwxxm::encode::{Encoder, EncoderOptions};
//! use metar_iwxxm::station::{Station, StationResolver};
//! use metar_iwxxm::vocab::{VocabularyResolver, VocabularyTerm};
//!
//! struct OneStation(Station);
//! impl StationResolver for OneStation {
//!     fn resolve(&self, icao: &str) -> Option<&Station> {
//!         (icao == self.0.icao).then_some(&self.0)
//!     }
//! }
//! struct NoVocabulary;
//! impl VocabularyResolver for NoVocabulary {
//!     fn resolve(&self, _code: &str) -> Option<&VocabularyTerm> {
//!         None
//!     }
//! }
//!
//! let report = "METAR KDEN 121753Z 27015G25KT 10SM FEW050 22/M01 A3012=";
//! let record = Decoder::new().decode(report.trim_end_matches('='));
//!
//! let station = OneStation(Station {
//!     uuid: "11111111-1111-1111-1111-111111111111".into(),
//!     icao: "KDEN".into(),
//!     lat: 39.8617,
//!     lon: -104.6731,
//!     elev: 1655.0,
//!     name: "Denver Intl".into(),
//! });
//! let vocab = NoVocabulary;
//! let encoder = Encoder::new(EncoderOptions::default(), &station, &vocab);
//! let xml = encoder.encode(&record, report).unwrap().unwrap();
//! assert!(xml.contains("MeteorologicalAerodromeObservationRecord"));
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod model;
pub mod station;
pub mod vocab;
