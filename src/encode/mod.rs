//! The IWXXM / IWXXM-US XML encoder (§4.4): walks an [`ObservationRecord`]
//! and emits a namespaced document, long-lived per §5 ("constructed once
//! per process... `encode()` takes `&self`").

pub mod bundles;
pub mod envelope;
pub mod namespace;
pub mod result;
pub mod units;
pub mod writer;

use crate::error::EncodeError;
use crate::model::elements::{AutomationType, ReportKind};
use crate::model::ObservationRecord;
use crate::station::StationResolver;
use crate::vocab::VocabularyResolver;
use namespace::Namespace;
use writer::XmlWriter;

/// The three CLI flags named in §6, bound to a typed construction surface
/// for the out-of-scope CLI collaborator.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct EncoderOptions {
    /// Whether U.S. stations may encode into the `iwxxm-us` namespace at all.
    pub allow_us_extensions: bool,
    /// Whether to declare `xmlns:*`/`xsi:schemaLocation` on the root element.
    pub namespace_declarations: bool,
    /// Whether to emit the `ORIG_TAC='...' UNPARSED_TAC='...'` debug comment.
    pub debug: bool,
}

/// Encodes observation records as IWXXM/IWXXM-US XML. Holds the two
/// read-only resolver trait objects and the options for the lifetime of
/// the process (§5); `encode` takes `&self` and is safe to call from
/// multiple threads sharing one instance behind a coarse lock.
pub struct Encoder<'a> {
    options: EncoderOptions,
    stations: &'a dyn StationResolver,
    vocab: &'a dyn VocabularyResolver,
}

impl<'a> Encoder<'a> {
    /// Builds an encoder bound to the given options and resolver tables.
    #[must_use]
    pub fn new(options: EncoderOptions, stations: &'a dyn StationResolver, vocab: &'a dyn VocabularyResolver) -> Self {
        Self { options, stations, vocab }
    }

    /// Encodes `record` (decoded from `original_tac`) as an XML document.
    ///
    /// Returns `Ok(None)` for a `NIL` report (§6: "`NIL` reports are
    /// recognized but not encoded"). Returns `Err(EncodeError::UnknownStation)`
    /// when the record's ICAO identifier has no entry in the station table
    /// (§7: the only encode-time failure that aborts emission entirely).
    pub fn encode(&self, record: &ObservationRecord, original_tac: &str) -> Result<Option<String>, EncodeError> {
        if record.nil {
            return Ok(None);
        }

        let icao = record
            .station
            .as_deref()
            .ok_or_else(|| EncodeError::UnknownStation(String::new()))?;
        let station = self
            .stations
            .resolve(icao)
            .ok_or_else(|| EncodeError::UnknownStation(icao.to_string()))?;
        let ns = namespace::select(icao, self.options.allow_us_extensions);

        let mut w = XmlWriter::new();
        w.declaration()?;
        if self.options.debug {
            w.debug_comment(original_tac, record.unparsed.as_deref().unwrap_or(""))?;
        }

        let kind = record.kind.unwrap_or(ReportKind::Metar);
        let p = ns.prefix();
        let root_tag = format!("{p}:{kind}");
        let root_id = envelope::root_gml_id(kind);

        let mut attrs = self.root_namespace_attrs(ns);
        let status = if record.auto_cor.cor { "CORRECTED" } else { "NORMAL" };
        let automated = if record.auto_cor.auto { "true" } else { "false" };
        attrs.push(("gml:id", root_id.as_str()));
        attrs.push(("status", status));
        attrs.push(("automatedStation", automated));

        w.start(&root_tag, &attrs)?;
        envelope::write_observation(&mut w, record, station, ns, self.vocab)?;
        write_ostype(&mut w, record, p)?;
        w.end(&root_tag)?;

        Ok(Some(w.finish()))
    }

    fn root_namespace_attrs(&self, ns: Namespace) -> Vec<(&'static str, &'static str)> {
        if !self.options.namespace_declarations {
            return Vec::new();
        }
        let mut attrs = vec![
            ("xmlns:gml", "http://www.opengis.net/gml/3.2"),
            ("xmlns:om", "http://www.opengis.net/om/2.0"),
            ("xmlns:sam", "http://www.opengis.net/sampling/2.0"),
            ("xmlns:sams", "http://www.opengis.net/samplingSpatial/2.0"),
            ("xmlns:aixm", "http://www.aixm.aero/schema/5.1.1"),
            ("xmlns:xlink", "http://www.w3.org/1999/xlink"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xmlns:gco", "http://www.isotc211.org/2005/gco"),
            ("xmlns:dqm", "http://def.wmo.int/metce/2013/dqm"),
        ];
        match ns {
            Namespace::Iwxxm => attrs.push(("xmlns:iwxxm", ns.uri())),
            Namespace::IwxxmUs => attrs.push(("xmlns:iwxxm-us", ns.uri())),
        }
        attrs.push(("xsi:schemaLocation", ns.schema_location()));
        attrs
    }
}

/// `ostype` (`AO1`/`AO2`) is emitted outside the result, as a sibling
/// attached to the root document (§4.4).
fn write_ostype(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    let Some(st) = &record.station_type else { return Ok(()) };
    let code = match st.value {
        AutomationType::Ao1 => "AO1",
        AutomationType::Ao2 => "AO2",
    };
    writer.leaf(&format!("{p}:automatedStationType"), &[], code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Decoder;
    use crate::station::Station;
    use crate::vocab::VocabularyTerm;
    use std::collections::HashMap;

    struct FixedStations(Station);
    impl StationResolver for FixedStations {
        fn resolve(&self, icao: &str) -> Option<&Station> {
            (icao == self.0.icao).then_some(&self.0)
        }
    }

    struct EmptyVocab;
    impl VocabularyResolver for EmptyVocab {
        fn resolve(&self, _code: &str) -> Option<&VocabularyTerm> {
            None
        }
    }

    struct MapVocab(HashMap<&'static str, VocabularyTerm>);
    impl VocabularyResolver for MapVocab {
        fn resolve(&self, code: &str) -> Option<&VocabularyTerm> {
            self.0.get(code)
        }
    }

    fn denver() -> Station {
        Station {
            uuid: "11111111-1111-1111-1111-111111111111".into(),
            icao: "KDEN".into(),
            lat: 39.8617,
            lon: -104.6731,
            elev: 1655.0,
            name: "Denver Intl".into(),
        }
    }

    #[test]
    fn scenario_1_us_extension_selected_and_populated() {
        let report = "METAR KDEN 121753Z 27015G25KT 10SM FEW050 SCT120 BKN250 22/M01 A3012 RMK AO2 SLP178 T02221006=";
        let record = Decoder::new().decode(report.trim_end_matches('='));
        let stations = FixedStations(denver());
        let vocab = EmptyVocab;
        let encoder = Encoder::new(
            EncoderOptions { allow_us_extensions: true, namespace_declarations: false, debug: false },
            &stations,
            &vocab,
        );
        let xml = encoder.encode(&record, report).unwrap().unwrap();

        assert!(xml.contains("iwxxm-us:METAR"));
        assert!(xml.contains("status=\"NORMAL\""));
        assert!(xml.contains("automatedStation=\"false\""));
        assert!(xml.contains("meanWindSpeed uom=\"km/h\">27.778<"));
        assert!(xml.contains("windGust uom=\"km/h\">46.296<"));
        assert!(xml.contains("prevailingVisibility uom=\"m\">16093.4<"));
        assert!(xml.contains("airTemperature uom=\"Cel\">22.2<"));
        assert!(xml.contains("dewpointTemperature uom=\"Cel\">-0.6<"));
        assert!(xml.contains("qnh uom=\"hPa\">1019.9<"));
        assert!(xml.contains("seaLevelPressure uom=\"hPa\">1017.8<"));
    }

    #[test]
    fn scenario_2_auto_and_cor_set_both_root_attributes() {
        let report = "METAR KDEN 121753Z AUTO COR 10SM CLR 20/10 A3000=";
        let record = Decoder::new().decode(report.trim_end_matches('='));
        let stations = FixedStations(denver());
        let vocab = EmptyVocab;
        let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
        let xml = encoder.encode(&record, report).unwrap().unwrap();
        assert!(xml.contains("status=\"CORRECTED\""));
        assert!(xml.contains("automatedStation=\"true\""));
    }

    #[test]
    fn scenario_3_nil_report_encodes_to_nothing() {
        let record = Decoder::new().decode("METAR KDEN 121753Z NIL=".trim_end_matches('='));
        let stations = FixedStations(denver());
        let vocab = EmptyVocab;
        let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
        assert!(encoder.encode(&record, "METAR KDEN 121753Z NIL=").unwrap().is_none());
    }

    #[test]
    fn unknown_station_is_rejected() {
        let record = Decoder::new().decode("METAR ZZZZ 121753Z 10SM CLR 20/10 A3000=".trim_end_matches('='));
        let stations = FixedStations(denver());
        let vocab = EmptyVocab;
        let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
        assert!(matches!(
            encoder.encode(&record, "").unwrap_err(),
            EncodeError::UnknownStation(icao) if icao == "ZZZZ"
        ));
    }

    #[test]
    fn non_us_station_never_uses_us_namespace_even_with_flag() {
        let mut station = denver();
        station.icao = "EGLL".into();
        let report = "METAR EGLL 121753Z 10SM CLR 20/10 Q1013=";
        let record = Decoder::new().decode(report.trim_end_matches('='));
        let stations = FixedStations(station);
        let vocab = EmptyVocab;
        let encoder = Encoder::new(
            EncoderOptions { allow_us_extensions: true, namespace_declarations: false, debug: false },
            &stations,
            &vocab,
        );
        let xml = encoder.encode(&record, report).unwrap().unwrap();
        assert!(!xml.contains("iwxxm-us"));
    }

    #[test]
    fn present_weather_split_search_resolves_two_terms() {
        let mut terms = HashMap::new();
        terms.insert("TS", VocabularyTerm { uri: "http://codes.wmo.int/306/WxCode/TS".into(), title: "Thunderstorm".into() });
        terms.insert("RA", VocabularyTerm { uri: "http://codes.wmo.int/306/WxCode/RA".into(), title: "Rain".into() });
        let vocab = MapVocab(terms);

        let report = "METAR KDEN 121753Z 10SM TSRA CLR 20/10 A3000=";
        let record = Decoder::new().decode(report.trim_end_matches('='));
        let stations = FixedStations(denver());
        let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
        let xml = encoder.encode(&record, report).unwrap().unwrap();
        assert!(xml.contains("Thunderstorm"));
        assert!(xml.contains("Rain"));
    }
}
