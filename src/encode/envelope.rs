//! `om:OM_Observation` envelope (§4.4 "Observation envelope"): the fixed
//! child ordering around the per-report `om:result`.

use uuid::Uuid;

use crate::encode::namespace::Namespace;
use crate::encode::result::write_result_body;
use crate::encode::writer::XmlWriter;
use crate::error::EncodeError;
use crate::model::elements::ReportKind;
use crate::model::ObservationRecord;
use crate::station::Station;
use crate::vocab::VocabularyResolver;

/// Writes the `om:OM_Observation` element: type, phenomenon/result time,
/// procedure, observed property, feature of interest, result-quality
/// nodes for each failed sensor, then the result body.
pub fn write_observation(
    writer: &mut XmlWriter,
    record: &ObservationRecord,
    station: &Station,
    ns: Namespace,
    vocab: &dyn VocabularyResolver,
) -> Result<(), EncodeError> {
    let p = ns.prefix();
    let kind = record.kind.unwrap_or(ReportKind::Metar);
    let issue = record.issue_time.as_ref().map(|t| t.value).unwrap_or_else(|| {
        crate::model::time::IssueTime::now(chrono::Utc::now())
    });
    let time_str = issue.to_iso8601();
    let obs_id = format!("{kind}-obs-{}", station.uuid);

    writer.start(&format!("{p}:observation"), &[])?;
    writer.start(&format!("om:OM_Observation"), &[("gml:id", &obs_id)])?;

    writer.leaf(
        "om:type",
        &[("xlink:href", &format!("http://codes.wmo.int/49-2/observation-type/iwxxm/1.1/{kind}"))],
        "",
    )?;

    writer.start("om:phenomenonTime", &[])?;
    writer.start("gml:TimeInstant", &[("gml:id", &format!("{obs_id}-phenomenonTime"))])?;
    writer.leaf("gml:timePosition", &[], &time_str)?;
    writer.end("gml:TimeInstant")?;
    writer.end("om:phenomenonTime")?;

    writer.empty("om:resultTime", &[("xlink:href", &format!("#{obs_id}-phenomenonTime"))])?;

    writer.leaf(
        "om:procedure",
        &[("xlink:href", "http://codes.wmo.int/49-2/observation-type/iwxxm/1.1/generic-observation-procedure")],
        "",
    )?;
    writer.leaf(
        "om:observedProperty",
        &[("xlink:href", "http://codes.wmo.int/49-2/observable-property/surfaceWeatherObservation")],
        "",
    )?;

    write_feature_of_interest(writer, station, &obs_id)?;
    write_result_quality(writer, record, &obs_id, p)?;

    writer.start("om:result", &[])?;
    write_result_body(writer, record, ns, vocab)?;
    writer.end("om:result")?;

    writer.end("om:OM_Observation")?;
    writer.end(&format!("{p}:observation"))
}

fn write_feature_of_interest(writer: &mut XmlWriter, station: &Station, obs_id: &str) -> Result<(), EncodeError> {
    writer.start("om:featureOfInterest", &[])?;
    writer.start("sams:SF_SpatialSamplingFeature", &[("gml:id", &format!("{obs_id}-sf"))])?;
    writer.leaf("sf:type", &[("xlink:href", "http://www.opengis.net/def/samplingFeatureType/OGC-OM/2.0/SF_SamplingPoint")], "")?;
    writer.start("sam:sampledFeature", &[])?;
    writer.start("aixm:AirportHeliport", &[("gml:id", &format!("{obs_id}-aerodrome"))])?;
    writer.leaf("aixm:identifier", &[("codeSpace", "urn:uuid:")], &station.uuid)?;
    writer.leaf("aixm:designator", &[], &station.icao)?;
    writer.leaf("aixm:name", &[], &station.name)?;
    writer.leaf("aixm:locationIndicatorICAO", &[], &station.icao)?;
    writer.start("aixm:ARP", &[])?;
    writer.start(
        "aixm:ElevatedPoint",
        &[
            ("gml:id", &format!("{obs_id}-arp")),
            ("srsName", "urn:ogc:def:crs:EPSG::4979"),
            ("axisLabels", "Latitude Longitude Altitude"),
            ("uomLabels", "degree degree m"),
        ],
    )?;
    writer.leaf("gml:pos", &[], &format!("{} {} {}", station.lat, station.lon, station.elev))?;
    writer.end("aixm:ElevatedPoint")?;
    writer.end("aixm:ARP")?;
    writer.end("aixm:AirportHeliport")?;
    writer.end("sam:sampledFeature")?;
    writer.start("sams:shape", &[])?;
    writer.start("gml:Point", &[("gml:id", &format!("{obs_id}-point")), ("srsName", "urn:ogc:def:crs:EPSG::4979")])?;
    writer.leaf("gml:pos", &[], &format!("{} {} {}", station.lat, station.lon, station.elev))?;
    writer.end("gml:Point")?;
    writer.end("sams:shape")?;
    writer.end("sams:SF_SpatialSamplingFeature")?;
    writer.end("om:featureOfInterest")
}

fn write_result_quality(writer: &mut XmlWriter, record: &ObservationRecord, obs_id: &str, p: &str) -> Result<(), EncodeError> {
    let Some(status) = &record.sensor_status else { return Ok(()) };
    for (i, code) in status.value.codes.iter().enumerate() {
        writer.start("om:resultQuality", &[])?;
        writer.start(
            "dqm:DQ_CompletenessOmission",
            &[("gml:id", &format!("{obs_id}-quality-{i}"))],
        )?;
        writer.leaf(
            "dqm:nameOfMeasure",
            &[("xlink:href", &format!("http://nws.weather.gov/codes/{p}/sensorStatus/{code}"))],
            "",
        )?;
        writer.start("dqm:result", &[])?;
        writer.leaf("gco:Boolean", &[], "false")?;
        writer.end("dqm:result")?;
        writer.end("dqm:DQ_CompletenessOmission")?;
        writer.end("om:resultQuality")?;
    }
    Ok(())
}

/// Builds a deterministic-looking `gml:id` for the root element:
/// `{type}-{uuidv4}` (§4.4 "Root attributes"). A real `uuid::Uuid::new_v4`
/// is random by design; callers that need reproducible ids for tests
/// should compare structurally rather than on the id string.
#[must_use]
pub fn root_gml_id(kind: ReportKind) -> String {
    format!("{kind}-{}", Uuid::new_v4())
}
