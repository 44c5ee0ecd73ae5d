//! The `MeteorologicalAerodromeObservationRecord` result body (§4.4 "Result
//! body", §4.4 "Per-element emission rules", §4.5 "Emission ordering").

use crate::encode::namespace::Namespace;
use crate::encode::units::{self, uom};
use crate::encode::writer::XmlWriter;
use crate::error::EncodeError;
use crate::model::elements::*;
use crate::model::ObservationRecord;
use crate::vocab::VocabularyResolver;

/// Writes the full result body, in the order §4.5 prescribes: base
/// elements, then (when the namespace is `iwxxm-us`) the U.S. remark
/// extension list, then the three bundles.
pub fn write_result_body(
    writer: &mut XmlWriter,
    record: &ObservationRecord,
    ns: Namespace,
    vocab: &dyn VocabularyResolver,
) -> Result<(), EncodeError> {
    let p = ns.prefix();
    let cavok = matches!(record.visibility.as_ref().map(|v| &v.value), Some(Visibility::Cavok));

    writer.start(
        &format!("{p}:MeteorologicalAerodromeObservationRecord"),
        &[("cloudAndVisibilityOK", if cavok { "true" } else { "false" })],
    )?;

    write_temperature(writer, record, p)?;
    write_altimeter(writer, record, p)?;
    write_wind(writer, record, p)?;

    if !cavok {
        write_visibility(writer, record, p)?;
        write_rvr(writer, record, p)?;
        write_weather(writer, record, p, vocab)?;
        write_sky(writer, record, p)?;
    }

    if ns.allows_international_only_elements() {
        write_international_only(writer, record, p)?;
    }

    if ns == Namespace::IwxxmUs {
        write_us_extension(writer, record, p)?;
    }

    writer.end(&format!("{p}:MeteorologicalAerodromeObservationRecord"))?;
    Ok(())
}

fn write_temperature(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    if let Some(air) = record.effective_temperature_c() {
        writer.leaf(&format!("{p}:airTemperature"), &[("uom", uom::CELSIUS)], &format!("{air}"))?;
    }
    if let Some(dew) = record.effective_dewpoint_c() {
        writer.leaf(&format!("{p}:dewpointTemperature"), &[("uom", uom::CELSIUS)], &format!("{dew}"))?;
    }
    Ok(())
}

fn write_altimeter(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    let Some(alt) = &record.altimeter else { return Ok(()) };
    match alt.value {
        Altimeter::InchesOfMercury(v) => {
            writer.leaf(&format!("{p}:qnh"), &[("uom", uom::HECTOPASCAL)], &format!("{:.1}", units::inches_hg_to_hpa(v)))?;
        }
        Altimeter::Hectopascals(v) => {
            writer.leaf(&format!("{p}:qnh"), &[("uom", uom::HECTOPASCAL)], &format!("{v:.1}"))?;
        }
    }
    Ok(())
}

fn write_wind(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    let Some(wind) = &record.wind else { return Ok(()) };
    let variable = matches!(wind.value.direction, WindDirection::Variable) || wind.value.varying.is_some();
    let tag = format!("{p}:surfaceWind");
    writer.start(&tag, &[("variableDirection", if variable { "true" } else { "false" })])?;

    if let WindDirection::Heading(deg) = wind.value.direction {
        writer.leaf(&format!("{p}:meanWindDirection"), &[("uom", uom::DEGREE)], &format!("{deg}"))?;
    }
    writer.leaf(
        &format!("{p}:meanWindSpeed"),
        &[("uom", uom::KM_PER_HOUR)],
        &format!("{:.3}", f64::from(wind.value.speed) * units::KNOTS_TO_KMH),
    )?;
    if let Some(gust) = wind.value.gust {
        writer.leaf(
            &format!("{p}:windGust"),
            &[("uom", uom::KM_PER_HOUR)],
            &format!("{:.3}", f64::from(gust) * units::KNOTS_TO_KMH),
        )?;
    }
    if let Some((lo, hi)) = wind.value.varying {
        writer.leaf(&format!("{p}:extremeClockwiseWindDirection"), &[("uom", uom::DEGREE)], &format!("{hi}"))?;
        writer.leaf(&format!("{p}:extremeCounterClockwiseWindDirection"), &[("uom", uom::DEGREE)], &format!("{lo}"))?;
    }
    writer.end(&tag)
}

/// Maps the visibility operator per §4.4: `M` → `BELOW`, `P` → `ABOVE`.
fn operator_uri(operator: Option<char>) -> Option<&'static str> {
    match operator {
        Some('M') => Some("BELOW"),
        Some('P') => Some("ABOVE"),
        _ => None,
    }
}

fn write_visibility(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    let Some(vis) = &record.visibility else { return Ok(()) };
    let Visibility::Distance { value, unit, operator } = vis.value else { return Ok(()) };
    let metres = if unit == "[mi_i]" { value * units::STATUTE_MILES_TO_METRES } else { value };
    let mut attrs = vec![("uom", uom::METRE)];
    if let Some(rel) = operator_uri(operator) {
        attrs.push(("relativeTo", rel));
    }
    writer.leaf(&format!("{p}:prevailingVisibility"), &attrs, &format!("{metres:.1}"))
}

fn write_rvr(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    if let Some(rvr) = &record.rvr {
        let rwys: Vec<&str> = rvr.value.rwy.split(' ').collect();
        let means: Vec<&str> = rvr.value.mean.split(' ').collect();
        // `oper`/`tend` are one character per entry with no separator, so the
        // Nth char (not the Nth whitespace-split token) lines up with the
        // Nth `rwy`/`mean` entry -- see `RvrAccumulator::push`.
        let opers: Vec<char> = rvr.value.oper.chars().collect();
        let tends: Vec<char> = rvr.value.tend.chars().collect();
        for i in 0..rwys.len() {
            let tag = format!("{p}:rvr");
            writer.start(&tag, &[])?;
            writer.leaf(&format!("{p}:runway"), &[], rwys[i])?;
            if let Some(metres) = means.get(i).and_then(|m| m.trim_start_matches(['M', 'P']).parse::<f64>().ok()) {
                let mut attrs = vec![("uom", uom::METRE)];
                let rel = match means[i].chars().next() {
                    Some('M') => Some("BELOW"),
                    Some('P') => Some("ABOVE"),
                    _ => None,
                };
                if let Some(rel) = rel {
                    attrs.push(("relativeTo", rel));
                }
                writer.leaf(&format!("{p}:meanRvr"), &attrs, &format!("{:.1}", metres * units::FEET_TO_METRES))?;
            }
            if let Some(oper) = opers.get(i).filter(|o| !o.is_whitespace()) {
                writer.leaf(&format!("{p}:pastTendency"), &[], &oper.to_string())?;
            }
            if let Some(tend) = tends.get(i).filter(|t| !t.is_whitespace()) {
                writer.leaf(&format!("{p}:trend"), &[], &tend.to_string())?;
            }
            writer.end(&tag)?;
        }
    }
    for vrvr in &record.variable_rvr {
        let tag = format!("{p}:variableRvr");
        writer.start(&tag, &[])?;
        writer.leaf(&format!("{p}:runway"), &[], &vrvr.value.rwy)?;
        if let Ok(min) = vrvr.value.min.parse::<f64>() {
            writer.leaf(&format!("{p}:minRvr"), &[("uom", uom::METRE)], &format!("{:.1}", min * units::FEET_TO_METRES))?;
        }
        if let Ok(max) = vrvr.value.max.parse::<f64>() {
            writer.leaf(&format!("{p}:maxRvr"), &[("uom", uom::METRE)], &format!("{:.1}", max * units::FEET_TO_METRES))?;
        }
        writer.end(&tag)?;
    }
    Ok(())
}

/// Resolves a present-weather phenomenon token, applying the split-search
/// fallback at boundaries `-2, -4, ...` from both ends when the whole
/// token misses (§4.4).
fn resolve_weather_terms<'v>(vocab: &'v dyn VocabularyResolver, token: &str) -> Vec<&'v str> {
    if let Some(term) = vocab.resolve(token) {
        return vec![&term.title];
    }
    let chars: Vec<char> = token.chars().collect();
    let mut cut = chars.len().saturating_sub(2);
    while cut >= 2 {
        let (left, right): (String, String) = (chars[..cut].iter().collect(), chars[cut..].iter().collect());
        if let (Some(l), Some(r)) = (vocab.resolve(&left), vocab.resolve(&right)) {
            return vec![&l.title, &r.title];
        }
        cut = cut.saturating_sub(2);
    }
    Vec::new()
}

fn write_weather(
    writer: &mut XmlWriter,
    record: &ObservationRecord,
    p: &str,
    vocab: &dyn VocabularyResolver,
) -> Result<(), EncodeError> {
    for w in &record.weather {
        if w.value.phenomenon == "//" {
            writer.nil(&format!("{p}:presentWeather"), Some("missing"))?;
            continue;
        }
        for title in resolve_weather_terms(vocab, &w.value.phenomenon) {
            writer.leaf(&format!("{p}:presentWeather"), &[], title)?;
        }
    }
    Ok(())
}

fn cloud_type_uri(t: CloudType) -> Option<&'static str> {
    match t {
        CloudType::Normal | CloudType::Unknown => None,
        CloudType::Cumulonimbus => Some("http://codes.wmo.int/bufr4/codeflag/0-20-012/9"),
        CloudType::ToweringCumulus => Some("http://codes.wmo.int/bufr4/codeflag/0-20-012/10"),
    }
}

fn write_cloud_layer(writer: &mut XmlWriter, tag: &str, layer: &CloudLayer, p: &str) -> Result<(), EncodeError> {
    writer.start(tag, &[])?;
    writer.leaf(
        &format!("{p}:amount"),
        &[("href", &format!("http://codes.wmo.int/bufr4/codeflag/0-20-008/{}", layer.cover.bufr_code()))],
        "",
    )?;
    match (layer.cloud_type, layer.height_hundreds_ft) {
        (CloudType::Unknown, _) => {
            writer.nil(&format!("{p}:base"), Some("not observable"))?;
        }
        (_, None) if layer.cover.bufr_code() == 0 => {
            writer.nil(&format!("{p}:base"), Some("inapplicable"))?;
        }
        (_, None) => {
            writer.nil(&format!("{p}:base"), Some("missing"))?;
        }
        (_, Some(hundreds_ft)) => {
            writer.leaf(&format!("{p}:base"), &[("uom", "[ft_i]")], &format!("{}", hundreds_ft * 100))?;
        }
    }
    if let Some(uri) = cloud_type_uri(layer.cloud_type) {
        writer.leaf(&format!("{p}:cloudType"), &[("href", uri)], "")?;
    }
    writer.end(tag)
}

fn write_sky(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    if let Some(vv) = &record.vertical_visibility {
        match vv.value.height_hundreds_ft {
            Some(hundreds_ft) => writer.leaf(&format!("{p}:verticalVisibility"), &[("uom", "[ft_i]")], &format!("{}", hundreds_ft * 100))?,
            None => writer.nil(&format!("{p}:verticalVisibility"), Some("missing"))?,
        }
        return Ok(());
    }
    for cloud in &record.clouds {
        write_cloud_layer(writer, &format!("{p}:layer"), &cloud.value, p)?;
    }
    Ok(())
}

fn write_international_only(writer: &mut XmlWriter, _record: &ObservationRecord, _p: &str) -> Result<(), EncodeError> {
    // `rewx`/`ws`/`sea`/`rwystate`: the observation record carries no
    // distinct recent-weather, wind-shear, sea-state, or runway-state
    // elements (§4.2's token catalogue has no handlers for them), so
    // there is nothing to emit here. See DESIGN.md.
    let _ = writer;
    Ok(())
}

fn statistically_processed(
    writer: &mut XmlWriter,
    tag: &str,
    p: &str,
    period_hours: u32,
    statistic: &str,
    uom: &str,
    value: String,
) -> Result<(), EncodeError> {
    writer.start(tag, &[])?;
    writer.leaf(&format!("{p}:extremeValuePeriod"), &[("uom", "h")], &format!("{period_hours}"))?;
    writer.leaf(&format!("{p}:statisticalFunction"), &[], statistic)?;
    writer.leaf(&format!("{p}:value"), &[("uom", uom)], &value)?;
    writer.end(tag)
}

fn write_us_extension(writer: &mut XmlWriter, record: &ObservationRecord, p: &str) -> Result<(), EncodeError> {
    if let Some(additive) = &record.additive {
        writer.leaf(&format!("{p}:humanReadableText"), &[], additive)?;
    }
    if let Some(mslp) = &record.sea_level_pressure {
        writer.leaf(&format!("{p}:seaLevelPressure"), &[("uom", uom::HECTOPASCAL)], &format!("{:.1}", mslp.value.hectopascals))?;
    }
    if let Some(pchgr) = &record.pressure_change_rapid {
        let code = match pchgr.value {
            PressureChangeRapid::Rising => "PRESRR",
            PressureChangeRapid::Falling => "PRESFR",
        };
        writer.leaf(&format!("{p}:pressureChangeCharacteristic"), &[], code)?;
    }
    if let Some(pt) = &record.pressure_tendency_3h {
        writer.start(&format!("{p}:pressureTendency"), &[])?;
        writer.leaf(&format!("{p}:changeMagnitude"), &[("uom", uom::HECTOPASCAL)], &format!("{:.1}", f64::from(pt.value.tenths_hpa) / 10.0))?;
        writer.leaf(
            &format!("{p}:tendencyCharacteristic"),
            &[("href", &format!("http://codes.wmo.int/bufr4/codeflag/0-10-063/{}", pt.value.code))],
            "",
        )?;
        writer.end(&format!("{p}:pressureTendency"))?;
    }
    if let Some(sd) = &record.snow_depth {
        writer.leaf(&format!("{p}:snowDepth"), &[("uom", uom::METRE)], &format!("{:.2e}", sd.value.depth_in * units::INCHES_TO_METRES))?;
    }
    if let Some(hail) = &record.hail {
        writer.leaf(&format!("{p}:hailstoneSize"), &[("uom", uom::METRE)], &format!("{:.4}", hail.value.diameter_in * units::INCHES_TO_METRES))?;
    }
    if let Some(status) = &record.sensor_status {
        for code in &status.value.codes {
            writer.leaf(&format!("{p}:sensorStatus"), &[], code)?;
        }
    }
    if record.aurora_borealis {
        writer.empty(&format!("{p}:aurora"), &[])?;
    }
    if record.contrails {
        // See DESIGN.md for the `auro`/`contrail` open question (§9): no
        // evidence the two should share an element, so `contrail` gets its
        // own tag rather than reusing `aurora`.
        writer.empty(&format!("{p}:contrail"), &[])?;
    }
    if record.no_speci {
        writer.empty(&format!("{p}:noSpeciReports"), &[])?;
    }
    if let Some(fol) = &record.first_or_last {
        let text = match fol.value {
            FirstOrLast::First => "FIRST",
            FirstOrLast::Last => "LAST",
        };
        writer.leaf(&format!("{p}:event"), &[], text)?;
    }
    if record.maintenance_check {
        writer.empty(&format!("{p}:maintenanceIndicator"), &[])?;
    }
    if let Some(incr) = &record.snow_increasing_rapidly {
        writer.start(&format!("{p}:snowIncreasingRapidly"), &[])?;
        writer.leaf(&format!("{p}:increase"), &[("uom", uom::METRE)], &format!("{:.3}", incr.value.increase_in * units::INCHES_TO_METRES))?;
        writer.leaf(&format!("{p}:totalDepth"), &[("uom", uom::METRE)], &format!("{:.3}", incr.value.total_depth_in * units::INCHES_TO_METRES))?;
        writer.end(&format!("{p}:snowIncreasingRapidly"))?;
    }

    if let Some(amt) = &record.precip_1h {
        write_precip_rate(writer, p, "precipitationAmount1h", amt.value, "PrecipitationRate")?;
    }
    if let Some(amt) = &record.precip_6h {
        write_precip_rate(writer, p, "precipitationAmount", amt.value, "PrecipitationRate")?;
    }
    if let Some(amt) = &record.precip_24h {
        write_precip_rate(writer, p, "precipitationAmount24h", amt.value, "PrecipitationRate")?;
    }
    for ice in &record.ice_accretion {
        let tag = match ice.value.period_hours {
            1 => "iceAccretion1h",
            3 => "iceAccretion3h",
            _ => "iceAccretion6h",
        };
        write_precip_rate(writer, p, tag, ice.value, "IceAccretionRate")?;
    }
    if let Some(lwe) = &record.liquid_water_equivalent {
        write_precip_rate(writer, p, "waterEquivalentOfSnow", lwe.value, "PrecipitationRate")?;
    }
    if let Some(max6) = &record.max_temp_6h {
        statistically_processed(writer, &format!("{p}:maxTemperature6h"), p, 6, "Maximum", uom::CELSIUS, format!("{:.1}", f64::from(max6.value.tenths) / 10.0))?;
    }
    if let Some(min6) = &record.min_temp_6h {
        statistically_processed(writer, &format!("{p}:minTemperature6h"), p, 6, "Minimum", uom::CELSIUS, format!("{:.1}", f64::from(min6.value.tenths) / 10.0))?;
    }
    if let Some(x24) = &record.extreme_temp_24h {
        statistically_processed(writer, &format!("{p}:maxTemperature24h"), p, 24, "Maximum", uom::CELSIUS, format!("{:.1}", f64::from(x24.value.max_tenths) / 10.0))?;
        statistically_processed(writer, &format!("{p}:minTemperature24h"), p, 24, "Minimum", uom::CELSIUS, format!("{:.1}", f64::from(x24.value.min_tenths) / 10.0))?;
    }
    if let Some(sun) = &record.sunshine {
        writer.leaf(&format!("{p}:sunshineDuration"), &[], &format!("PT{}H{}M0S", sun.value.minutes / 60, sun.value.minutes % 60))?;
    }

    crate::encode::bundles::bundle(
        writer,
        &format!("{p}:visuallyObservablePhenomena"),
        record.thunderstorm_movement.is_some() || record.obscuration.is_some() || record.lightning.is_some(),
        |w| {
            if let Some(tm) = &record.thunderstorm_movement {
                write_location_record(w, p, "thunderstormMovement", &tm.value.locations)?;
            }
            if let Some(obsc) = &record.obscuration {
                write_cloud_layer(w, &format!("{p}:obscuration"), &obsc.value, p)?;
            }
            if let Some(lx) = &record.lightning {
                write_location_record(w, p, "lightning", &lx.value.locations)?;
            }
            Ok(())
        },
    )?;

    crate::encode::bundles::bundle(
        writer,
        &format!("{p}:observedPropertyAtSecondLocation"),
        record.visibility_second_location.is_some() || record.ceiling_second_location.is_some(),
        |w| {
            if let Some(v) = &record.visibility_second_location {
                write_directional_reading(w, &format!("{p}:vis2ndLocation"), p, &v.value, units::STATUTE_MILES_TO_METRES, uom::METRE)?;
            }
            if let Some(c) = &record.ceiling_second_location {
                write_directional_reading(w, &format!("{p}:cig2ndLocation"), p, &c.value, units::FEET_TO_METRES * 100.0, uom::METRE)?;
            }
            Ok(())
        },
    )?;

    crate::encode::bundles::bundle(
        writer,
        &format!("{p}:variationsInObservedProperties"),
        record.tower_visibility.is_some()
            || record.variable_ceiling.is_some()
            || record.vertical_visibility.is_some()
            || !record.sector_visibility.is_empty()
            || !record.variable_sky.is_empty()
            || !record.precipitation_history.is_empty()
            || record.wind_shift.is_some()
            || record.peak_wind.is_some()
            || record.variable_visibility.is_some(),
        |w| {
            if let Some(tv) = &record.tower_visibility {
                if let Visibility::Distance { value, unit, .. } = tv.value {
                    let metres = if unit == "[mi_i]" { value * units::STATUTE_MILES_TO_METRES } else { value };
                    w.leaf(&format!("{p}:towerVisibility"), &[("uom", uom::METRE)], &format!("{metres:.1}"))?;
                }
            }
            if let Some(vc) = &record.variable_ceiling {
                w.start(&format!("{p}:variableCeiling"), &[])?;
                w.leaf(&format!("{p}:lowest"), &[("uom", "[ft_i]")], &format!("{}", (vc.value.lo as i64) * 100))?;
                w.leaf(&format!("{p}:highest"), &[("uom", "[ft_i]")], &format!("{}", (vc.value.hi as i64) * 100))?;
                w.end(&format!("{p}:variableCeiling"))?;
            }
            if let Some(vv) = &record.variable_visibility {
                w.start(&format!("{p}:variableVisibility"), &[])?;
                w.leaf(&format!("{p}:lowest"), &[("uom", uom::METRE)], &format!("{:.1}", vv.value.lo * units::STATUTE_MILES_TO_METRES))?;
                w.leaf(&format!("{p}:highest"), &[("uom", uom::METRE)], &format!("{:.1}", vv.value.hi * units::STATUTE_MILES_TO_METRES))?;
                w.end(&format!("{p}:variableVisibility"))?;
            }
            for sv in &record.sector_visibility {
                write_directional_reading(w, &format!("{p}:sectorVisibility"), p, &sv.value, units::STATUTE_MILES_TO_METRES, uom::METRE)?;
            }
            for sky in &record.variable_sky {
                write_cloud_layer(w, &format!("{p}:variableSkyCondition"), &sky.value, p)?;
            }
            for hist in &record.precipitation_history {
                write_precipitation_history(w, p, &hist.value)?;
            }
            if let Some(ws) = &record.wind_shift {
                w.start(&format!("{p}:windShift"), &[("frontalPassage", if ws.value.frontal_passage { "true" } else { "false" })])?;
                w.leaf(&format!("{p}:time"), &[], &ws.value.time.to_iso8601())?;
                w.end(&format!("{p}:windShift"))?;
            }
            if let Some(pk) = &record.peak_wind {
                w.start(&format!("{p}:peakWind"), &[])?;
                w.leaf(&format!("{p}:direction"), &[("uom", uom::DEGREE)], &format!("{}", pk.value.direction))?;
                w.leaf(&format!("{p}:speed"), &[("uom", uom::KM_PER_HOUR)], &format!("{:.3}", f64::from(pk.value.speed) * units::KNOTS_TO_KMH))?;
                w.leaf(&format!("{p}:time"), &[], &pk.value.time.to_iso8601())?;
                w.end(&format!("{p}:peakWind"))?;
            }
            Ok(())
        },
    )?;

    Ok(())
}

fn write_precip_rate(writer: &mut XmlWriter, p: &str, tag: &str, amt: PeriodAmount, element_code: &str) -> Result<(), EncodeError> {
    writer.start(&format!("{p}:{tag}"), &[("elementCode", element_code)])?;
    writer.leaf(&format!("{p}:extremeValuePeriod"), &[("uom", "h")], &format!("{}", amt.period_hours))?;
    writer.leaf(&format!("{p}:statisticalFunction"), &[], "Accumulation")?;
    writer.leaf(
        &format!("{p}:value"),
        &[("uom", uom::KG_PER_SM2)],
        &format!("{:.3e}", amt.amount_in * units::INCHES_PER_HOUR_TO_KG_PER_SM2),
    )?;
    writer.end(&format!("{p}:{tag}"))
}

fn write_location_record(
    writer: &mut XmlWriter,
    p: &str,
    tag: &str,
    locations: &crate::model::LocationRecord,
) -> Result<(), EncodeError> {
    writer.start(&format!("{p}:{tag}"), &[])?;
    for (bucket, sector) in &locations.sectors {
        writer.start(&format!("{p}:sector"), &[("bucket", &bucket.to_string())])?;
        writer.leaf(&format!("{p}:ccw"), &[("uom", uom::DEGREE)], &format!("{:.1}", sector.ccw))?;
        writer.leaf(&format!("{p}:cw"), &[("uom", uom::DEGREE)], &format!("{:.1}", sector.cw))?;
        writer.end(&format!("{p}:sector"))?;
    }
    writer.end(&format!("{p}:{tag}"))
}

fn write_directional_reading(
    writer: &mut XmlWriter,
    tag: &str,
    p: &str,
    reading: &DirectionalReading,
    scale: f64,
    uom: &str,
) -> Result<(), EncodeError> {
    let attrs: Vec<(&str, &str)> = Vec::new();
    writer.start(tag, &attrs)?;
    if let Some(dir) = &reading.direction {
        writer.leaf(&format!("{p}:direction"), &[], dir)?;
    }
    writer.leaf(&format!("{p}:value"), &[("uom", uom)], &format!("{:.1}", reading.value * scale))?;
    writer.end(tag)
}

fn write_precipitation_history(writer: &mut XmlWriter, p: &str, hist: &PrecipitationHistory) -> Result<(), EncodeError> {
    writer.start(&format!("{p}:precipitationHistory"), &[("phenomenon", &hist.phenomenon)])?;
    for event in &hist.events {
        writer.leaf(
            &format!("{p}:event"),
            &[("kind", if event.begin { "begin" } else { "end" })],
            &event.time.to_iso8601(),
        )?;
    }
    writer.end(&format!("{p}:precipitationHistory"))
}
