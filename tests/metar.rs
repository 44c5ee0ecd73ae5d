use chrono::{TimeZone, Utc};
use metar_iwxxm::decode::Decoder;
use metar_iwxxm::encode::{Encoder, EncoderOptions};
use metar_iwxxm::model::sector::LocationBucket;
use metar_iwxxm::station::{Station, StationResolver};
use metar_iwxxm::vocab::{VocabularyResolver, VocabularyTerm};

struct FixedStation(Station);

impl StationResolver for FixedStation {
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

fn boston() -> Station {
    Station {
        uuid: "22222222-2222-2222-2222-222222222222".into(),
        icao: "KBOS".into(),
        lat: 42.3656,
        lon: -71.0096,
        elev: 6.0,
        name: "Logan Intl".into(),
    }
}

#[test]
fn scenario_1_full_metar_populates_us_extension() {
    let now = Utc.with_ymd_and_hms(2024, 5, 12, 18, 0, 0).unwrap();
    let report = "METAR KDEN 121753Z 27015G25KT 10SM FEW050 SCT120 BKN250 22/M01 A3012 RMK AO2 SLP178 T02221006=";
    let record = Decoder::new().decode_as_of(report.trim_end_matches('='), now);

    assert_eq!(record.station.as_deref(), Some("KDEN"));
    assert_eq!(record.clouds.len(), 3);
    assert_eq!(record.effective_temperature_c(), Some(22.2));
    assert_eq!(record.effective_dewpoint_c(), Some(-0.6));

    let stations = FixedStation(denver());
    let vocab = EmptyVocab;
    let encoder = Encoder::new(
        EncoderOptions { allow_us_extensions: true, namespace_declarations: false, debug: false },
        &stations,
        &vocab,
    );
    let xml = encoder.encode(&record, report).unwrap().unwrap();

    assert!(xml.starts_with("<?xml"));
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
    assert!(record.auto_cor.auto);
    assert!(record.auto_cor.cor);

    let stations = FixedStation(denver());
    let vocab = EmptyVocab;
    let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
    let xml = encoder.encode(&record, report).unwrap().unwrap();
    assert!(xml.contains("status=\"CORRECTED\""));
    assert!(xml.contains("automatedStation=\"true\""));
}

#[test]
fn scenario_3_nil_report_produces_no_emission() {
    let report = "METAR KDEN 121753Z NIL=";
    let record = Decoder::new().decode(report.trim_end_matches('='));
    assert!(record.nil);

    let stations = FixedStation(denver());
    let vocab = EmptyVocab;
    let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
    assert!(encoder.encode(&record, report).unwrap().is_none());
}

#[test]
fn scenario_4_malformed_segment_recovers_into_unparsed() {
    let report = "METAR KBOS 121753Z X$X 10SM CLR 20/10 A3000=";
    let record = Decoder::new().decode(report.trim_end_matches('='));

    assert!(record.visibility.is_some());
    assert!(record.clouds.is_empty());
    assert!(record.temperature.is_some());
    assert!(record.altimeter.is_some());

    let unparsed = record.unparsed.as_deref().unwrap_or("");
    assert!(unparsed.contains("X$X"));

    let stations = FixedStation(boston());
    let vocab = EmptyVocab;
    let encoder = Encoder::new(EncoderOptions { debug: true, ..EncoderOptions::default() }, &stations, &vocab);
    let xml = encoder.encode(&record, report).unwrap().unwrap();
    assert!(xml.contains("X$X"));
}

#[test]
fn scenario_5_precipitation_history_dual_events() {
    let now = Utc.with_ymd_and_hms(2024, 5, 12, 18, 0, 0).unwrap();
    let report = "METAR KDEN 121753Z 10SM CLR 20/10 A3000 RMK TSB15E47 RAB10E45=";
    let record = Decoder::new().decode_as_of(report.trim_end_matches('='), now);

    assert_eq!(record.precipitation_history.len(), 2);
    for history in &record.precipitation_history {
        assert_eq!(history.value.events.len(), 2);
        for event in &history.value.events {
            assert_eq!(event.time.day, 12);
        }
    }
    let ts = record
        .precipitation_history
        .iter()
        .find(|h| h.value.phenomenon == "TS")
        .expect("TS history present");
    assert!(ts.value.events[0].begin);
    assert!(!ts.value.events[1].begin);
}

#[test]
fn scenario_6_lightning_sectors_merge_and_expand() {
    let report = "METAR KDEN 121753Z 10SM CLR 20/10 A3000 RMK LTG DSNT N AND E-SE OHD=";
    let record = Decoder::new().decode(report.trim_end_matches('='));

    let lightning = record.lightning.expect("lightning record present");
    let locations = &lightning.value.locations;

    assert_eq!(locations.in_bucket(LocationBucket::Overhead).count(), 1);
    let overhead = locations.in_bucket(LocationBucket::Overhead).next().unwrap();
    assert!((overhead.ccw - 0.0).abs() < f64::EPSILON);
    assert!((overhead.cw - 360.0).abs() < f64::EPSILON);

    let distant: Vec<_> = locations.in_bucket(LocationBucket::Distant).collect();
    assert_eq!(distant.len(), 2);
}

#[test]
fn variable_visibility_discards_when_hi_less_than_lo() {
    let report = "METAR KDEN 121753Z 10SM CLR 20/10 A3000 RMK VIS 3V1=";
    let record = Decoder::new().decode(report.trim_end_matches('='));
    assert!(record.variable_visibility.is_none());
}

#[test]
fn rvr_tendency_stays_positionally_aligned_across_runways() {
    let report = "METAR KDEN 121753Z 10SM R27/1600 R09/0800D CLR 20/10 A3000=";
    let record = Decoder::new().decode(report.trim_end_matches('='));

    let rvr = record.rvr.expect("rvr present");
    assert_eq!(rvr.value.rwy.split(' ').collect::<Vec<_>>(), vec!["27", "09"]);
    assert_eq!(rvr.value.mean.split(' ').collect::<Vec<_>>(), vec!["1600", "0800"]);
    // one char per entry, no separator: runway 27 has no tendency, runway 09 is "D".
    assert_eq!(rvr.value.tend.chars().collect::<Vec<_>>(), vec![' ', 'D']);

    let stations = FixedStation(denver());
    let vocab = EmptyVocab;
    let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
    let xml = encoder.encode(&record, report).unwrap().unwrap();
    assert!(xml.contains(">D<"));
}

#[test]
fn present_weather_split_search_resolves_against_vocabulary() {
    use std::collections::HashMap;

    struct MapVocab(HashMap<&'static str, VocabularyTerm>);
    impl VocabularyResolver for MapVocab {
        fn resolve(&self, code: &str) -> Option<&VocabularyTerm> {
            self.0.get(code)
        }
    }

    let mut terms = HashMap::new();
    terms.insert("TS", VocabularyTerm { uri: "http://codes.wmo.int/306/WxCode/TS".into(), title: "Thunderstorm".into() });
    terms.insert("RA", VocabularyTerm { uri: "http://codes.wmo.int/306/WxCode/RA".into(), title: "Rain".into() });
    let vocab = MapVocab(terms);

    let report = "METAR KDEN 121753Z 10SM TSRA CLR 20/10 A3000=";
    let record = Decoder::new().decode(report.trim_end_matches('='));
    let stations = FixedStation(denver());
    let encoder = Encoder::new(EncoderOptions::default(), &stations, &vocab);
    let xml = encoder.encode(&record, report).unwrap().unwrap();
    assert!(xml.contains("Thunderstorm"));
    assert!(xml.contains("Rain"));
}
