//! The grammar driver (§4.1's `REPORT`/`BODY`/`REMARKS` productions): a
//! single forward scan over the whitespace groups that dispatches each
//! matching token kind to its handler and leaves everything else for
//! [`ConsumedMask`] to recover as unparsed/additive text.
//!
//! Several remark tokens (`pkwnd`, `sfcvis`, `vis2loc`, ...) are written in
//! the token catalogue against a space-joined window of several groups
//! rather than a single one, so the scan tries progressively shorter
//! joins at each position before giving up on a kind. `ltg`/`tstmvmt` carry
//! a variable-length location-expression tail, so they are special-cased:
//! the keyword is matched first, then subsequent groups are greedily
//! consumed while [`location::is_location_token`] accepts them.

use std::ops::Range;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::handlers::{location, mandatory, remarks_basic, remarks_numeric, remarks_precip, remarks_visibility, remarks_wind};
use super::token::{self, TokenPatterns};
use super::tokenizer::{self, Group};
use super::unparsed::ConsumedMask;
use crate::error::DecodeErrorKind;
use crate::model::elements::ReportKind;
use crate::model::time::{fix_date, IssueTime};
use crate::model::{ElementValue, LightningRecord, LocationRecord, ObservationRecord, ThunderstormMovement};

/// Decode a single METAR/SPECI report into an [`ObservationRecord`].
/// Never fails outright (§7): unrecognized or malformed text becomes
/// `unparsed`/`additive`, and time recovery failures are recorded as a
/// non-fatal [`crate::error::DecodeError`].
#[must_use]
pub fn parse(input: &str, now: DateTime<Utc>) -> ObservationRecord {
    let groups = tokenizer::groups(input);
    let mut mask = ConsumedMask::new(input);
    let mut record = ObservationRecord::new();
    let pat = token::patterns();

    let mut i = 0;
    i = parse_type_ident(&groups, i, pat, &mut record, &mut mask);

    if groups.get(i).map(|g| g.text) == Some("NIL") {
        record.nil = true;
        mask.mark(groups[i].span.clone());
        let (unparsed, additive) = mask.partition(input, None);
        record.unparsed = unparsed;
        record.additive = additive;
        return record;
    }

    let issue = parse_itime(&groups, &mut i, pat, now, &mut record, &mut mask);
    i = parse_autocor(&groups, i, pat, &mut record, &mut mask);

    let rmk_idx = groups[i..].iter().position(|g| g.text == "RMK").map(|p| p + i);
    let body_end = rmk_idx.unwrap_or(groups.len());

    scan_body(&groups, i, body_end, pat, &mut record, &mut mask);

    let rmk_span = if let Some(idx) = rmk_idx {
        let span = groups[idx].span.clone();
        mask.mark(span.clone());
        scan_remarks(&groups, idx + 1, groups.len(), pat, issue, &mut record, &mut mask);
        Some(span)
    } else {
        None
    };

    let (unparsed, additive) = mask.partition(input, rmk_span);
    record.unparsed = unparsed;
    record.additive = additive;
    record
}

fn parse_type_ident(
    groups: &[Group<'_>],
    mut i: usize,
    pat: &'static TokenPatterns,
    record: &mut ObservationRecord,
    mask: &mut ConsumedMask,
) -> usize {
    if let Some(g) = groups.get(i) {
        if pat.ty.is_match(g.text) {
            record.kind = Some(if g.text == "METAR" { ReportKind::Metar } else { ReportKind::Speci });
            mask.mark(g.span.clone());
            i += 1;
        }
    }
    if let Some(g) = groups.get(i) {
        if pat.ident.is_match(g.text) {
            record.station = Some(g.text.to_string());
            mask.mark(g.span.clone());
            i += 1;
        }
    }
    i
}

fn parse_itime(
    groups: &[Group<'_>],
    i: &mut usize,
    pat: &'static TokenPatterns,
    now: DateTime<Utc>,
    record: &mut ObservationRecord,
    mask: &mut ConsumedMask,
) -> IssueTime {
    let mut issue = IssueTime::now(now);
    if let Some(g) = groups.get(*i) {
        if pat.itime.is_match(g.text) {
            let day: u32 = g.text[0..2].parse().unwrap_or(1);
            let hour: u32 = g.text[2..4].parse().unwrap_or(0);
            let minute: u32 = g.text[4..6].parse().unwrap_or(0);
            match fix_date(day, hour, minute, now) {
                Some(t) => issue = t,
                None => {
                    record.push_error(
                        DecodeErrorKind::InvalidTime,
                        g.span.clone(),
                        format!("day {day} does not exist in the resolved month"),
                    );
                    record.time_error = Some(g.text.to_string());
                }
            }
            record.issue_time = Some(ElementValue::new(g.text, g.span.clone(), issue));
            mask.mark(g.span.clone());
            *i += 1;
        }
    }
    issue
}

fn parse_autocor(
    groups: &[Group<'_>],
    mut i: usize,
    pat: &'static TokenPatterns,
    record: &mut ObservationRecord,
    mask: &mut ConsumedMask,
) -> usize {
    for _ in 0..2 {
        let Some(g) = groups.get(i) else { break };
        if !pat.autocor.is_match(g.text) {
            break;
        }
        match g.text {
            "AUTO" => record.auto_cor.auto = true,
            "COR" => record.auto_cor.cor = true,
            _ => {}
        }
        mask.mark(g.span.clone());
        i += 1;
    }
    i
}

/// Joins up to `max_words` consecutive groups starting at `pos` with a
/// single space, trying the longest window first, and returns the first
/// one that satisfies `re`, along with its combined span and word count.
fn try_join(groups: &[Group<'_>], pos: usize, max_words: usize, re: &Regex) -> Option<(String, Range<usize>, usize)> {
    for n in (1..=max_words).rev() {
        if pos + n > groups.len() {
            continue;
        }
        let text = groups[pos..pos + n].iter().map(|g| g.text).collect::<Vec<_>>().join(" ");
        if re.is_match(&text) {
            let span = groups[pos].span.start..groups[pos + n - 1].span.end;
            return Some((text, span, n));
        }
    }
    None
}

fn scan_body(
    groups: &[Group<'_>],
    start: usize,
    end: usize,
    pat: &'static TokenPatterns,
    record: &mut ObservationRecord,
    mask: &mut ConsumedMask,
) {
    let mut j = start;
    while j < end {
        let g = &groups[j];
        let text = g.text;

        if pat.wind.is_match(text) {
            if let Some(w) = mandatory::parse_wind(text) {
                record.wind = Some(ElementValue::new(text, g.span.clone(), w));
                mask.mark(g.span.clone());
            }
        } else if pat.wind_vrb.is_match(text) {
            if let (Some(wind), Some((from, to))) = (&mut record.wind, mandatory::parse_wind_varying(text)) {
                wind.value.varying = Some((from, to));
                mask.mark(g.span.clone());
            }
        } else if let Some((joined, span, n)) = try_join(groups, j, 2, &pat.vsby) {
            if let Some(v) = mandatory::parse_visibility(&joined) {
                record.visibility = Some(ElementValue::new(joined, span, v));
                mask.mark(groups[j].span.start..groups[j + n - 1].span.end);
            }
            j += n;
            continue;
        } else if pat.rvr.is_match(text) {
            if let Some(parsed) = mandatory::parse_rvr(text) {
                match parsed {
                    mandatory::RvrParse::Fixed { rwy, mean, operator, tendency } => {
                        mandatory::accumulate_rvr(&mut record.rvr, text, g.span.clone(), &rwy, &mean, operator, tendency);
                    }
                    mandatory::RvrParse::Variable(v) => {
                        record.variable_rvr.push(ElementValue::new(text, g.span.clone(), v));
                    }
                }
                mask.mark(g.span.clone());
            }
        } else if pat.funnel.is_match(text) || pat.vcnty.is_match(text) || pat.pcp.is_match(text) || pat.obv.is_match(text) {
            record.weather.push(ElementValue::new(text, g.span.clone(), mandatory::parse_weather_group(text)));
            mask.mark(g.span.clone());
        } else if pat.sky.is_match(text) {
            if let Some(parsed) = mandatory::parse_sky(text) {
                match parsed {
                    mandatory::SkyParse::Layer(layer) => {
                        record.clouds.push(ElementValue::new(text, g.span.clone(), layer));
                    }
                    mandatory::SkyParse::VerticalVisibility(vv) => {
                        record.vertical_visibility = Some(ElementValue::new(text, g.span.clone(), vv));
                    }
                    mandatory::SkyParse::Clear | mandatory::SkyParse::NoSignificantCloud => {}
                }
                mask.mark(g.span.clone());
            }
        } else if pat.temp.is_match(text) {
            if let Some(t) = mandatory::parse_temperature(text) {
                record.temperature = Some(ElementValue::new(text, g.span.clone(), t));
                mask.mark(g.span.clone());
            }
        } else if pat.alt.is_match(text) {
            if let Some(a) = mandatory::parse_altimeter(text) {
                record.altimeter = Some(ElementValue::new(text, g.span.clone(), a));
                mask.mark(g.span.clone());
            }
        }

        j += 1;
    }
}

/// Splits an `ltg` keyword lexeme (e.g. `OCNL LTGCGIC`, `LTG`) into its
/// optional leading frequency word and trailing 2-letter type codes.
fn parse_ltg_keyword(text: &str) -> (Option<String>, Vec<String>) {
    let idx = text.find("LTG").unwrap_or(text.len());
    let prefix = text[..idx].trim();
    let tail_start = (idx + 3).min(text.len());
    let suffix: String = text[tail_start..].chars().filter(|c| !c.is_whitespace()).collect();

    let mut types = Vec::new();
    let mut chars = suffix.chars();
    while let (Some(a), Some(b)) = (chars.next(), chars.next()) {
        types.push(format!("{a}{b}"));
    }

    (
        (!prefix.is_empty()).then(|| prefix.to_string()),
        types,
    )
}

fn scan_remarks(
    groups: &[Group<'_>],
    start: usize,
    end: usize,
    pat: &'static TokenPatterns,
    issue: IssueTime,
    record: &mut ObservationRecord,
    mask: &mut ConsumedMask,
) {
    let mut j = start;
    while j < end {
        let g = &groups[j];
        let text = g.text;

        if let Some((keyword, kspan, kn)) = try_join(groups, j, 2, &pat.ltg) {
            let loc_start = j + kn;
            let mut loc_end = loc_start;
            while loc_end < end && location::is_location_token(groups[loc_end].text) {
                loc_end += 1;
            }
            let location_text = groups[loc_start..loc_end].iter().map(|x| x.text).collect::<Vec<_>>().join(" ");
            let locations = if location_text.is_empty() {
                LocationRecord::default()
            } else {
                location::parse_location_list(&location_text)
            };
            let (frequency, types) = parse_ltg_keyword(&keyword);

            for k in j..loc_end {
                mask.mark(groups[k].span.clone());
            }
            let full_span = kspan.start..groups[loc_end - 1].span.end;
            let lexeme = format!("{keyword} {location_text}").trim().to_string();
            record.lightning = Some(ElementValue::new(lexeme, full_span, LightningRecord { frequency, types, locations }));
            j = loc_end;
            continue;
        }

        let ts_mov_candidate = text == "TS"
            && groups
                .get(j + 1)
                .is_some_and(|n| n.text == "MOV" || location::is_location_token(n.text));
        if ts_mov_candidate {
            let ts_span = g.span.clone();
            let loc_start = j + 1;
            let mut loc_end = loc_start;
            while loc_end < end && groups[loc_end].text != "MOV" && location::is_location_token(groups[loc_end].text) {
                loc_end += 1;
            }
            if groups.get(loc_end).map(|x| x.text) == Some("MOV") {
                let location_text = groups[loc_start..loc_end].iter().map(|x| x.text).collect::<Vec<_>>().join(" ");
                let locations = if location_text.is_empty() {
                    LocationRecord::default()
                } else {
                    location::parse_location_list(&location_text)
                };

                mask.mark(ts_span.clone());
                for k in loc_start..loc_end {
                    mask.mark(groups[k].span.clone());
                }
                let mov_span = groups[loc_end].span.clone();
                mask.mark(mov_span.clone());

                let mut movement = None;
                let mut after_mov = loc_end + 1;
                if let Some(mg) = groups.get(after_mov) {
                    if let Some(sector) = location::parse_movement(mg.text) {
                        movement = Some(sector);
                        mask.mark(mg.span.clone());
                        after_mov += 1;
                    }
                }

                let full_span = ts_span.start..groups[after_mov - 1].span.end;
                record.thunderstorm_movement =
                    Some(ElementValue::new("TS MOV", full_span, ThunderstormMovement { locations, movement }));
                j = after_mov;
                continue;
            }
        }

        if pat.ostype.is_match(text) {
            if let Some(t) = remarks_basic::parse_station_type(text) {
                record.station_type = Some(ElementValue::new(text, g.span.clone(), t));
                mask.mark(g.span.clone());
            }
        } else if text == "$" {
            record.maintenance_check = true;
            mask.mark(g.span.clone());
        } else if pat.ssindc.is_match(text) {
            if record.sensor_status.is_none() {
                record.sensor_status = Some(ElementValue::new(text, g.span.clone(), Default::default()));
            }
            let status = record.sensor_status.as_mut().expect("just inserted");
            remarks_basic::push_sensor_status(&mut status.value, text);
            if status.span != g.span {
                status.lexeme = format!("{} {}", status.lexeme, text);
                status.span = status.span.start.min(g.span.start)..status.span.end.max(g.span.end);
            }
            mask.mark(g.span.clone());
        } else if let Some((_, span, n)) = try_join(groups, j, 2, &pat.estwind) {
            record.estimated_wind = true;
            mask.mark(span);
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 3, &pat.pkwnd) {
            if let Some(pw) = remarks_wind::parse_peak_wind(&joined, issue) {
                record.peak_wind = Some(ElementValue::new(joined, span.clone(), pw));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 3, &pat.wshft) {
            if let Some(ws) = remarks_wind::parse_wind_shift(&joined, issue) {
                record.wind_shift = Some(ElementValue::new(joined, span.clone(), ws));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.sfcvis) {
            if let Some(v) = remarks_visibility::parse_located_visibility(&joined, "SFC VIS") {
                record.tower_visibility = record.visibility.take();
                record.visibility = Some(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.twrvis) {
            if let Some(v) = remarks_visibility::parse_located_visibility(&joined, "TWR VIS") {
                record.tower_visibility = Some(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.vvis) {
            if let Some(v) = remarks_visibility::parse_variable_visibility(&joined).filter(|v| v.hi >= v.lo) {
                record.variable_visibility = Some(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.sctrvis) {
            if let Some(v) = remarks_visibility::parse_sector_visibility(&joined) {
                record.sector_visibility.push(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 5, &pat.vis2loc) {
            if let Some(v) = remarks_visibility::parse_visibility_second_location(&joined) {
                record.visibility_second_location = Some(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.cig2loc) {
            if let Some(v) = remarks_visibility::parse_ceiling_second_location(&joined) {
                record.ceiling_second_location = Some(ElementValue::new(joined, span.clone(), v));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if pat.vcig.is_match(text) {
            if let Some(v) = remarks_visibility::parse_variable_ceiling(text).filter(|v| v.hi >= v.lo) {
                record.variable_ceiling = Some(ElementValue::new(text, g.span.clone(), v));
                mask.mark(g.span.clone());
            }
        } else if let Some((joined, span, n)) = try_join(groups, j, 2, &pat.obsc) {
            if let Some(layer) = remarks_visibility::parse_obscuration(&joined) {
                record.obscuration = Some(ElementValue::new(joined, span.clone(), layer));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if let Some((joined, span, n)) = try_join(groups, j, 4, &pat.vsky) {
            if let Some((a, b)) = remarks_visibility::parse_variable_sky(&joined) {
                record.variable_sky.push(ElementValue::new(joined.clone(), span.clone(), a));
                record.variable_sky.push(ElementValue::new(joined, span.clone(), b));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if pat.pcpnhist.is_match(text) {
            if let Some(ph) = remarks_precip::parse_precipitation_history(text, issue) {
                record.precipitation_history.push(ElementValue::new(text, g.span.clone(), ph));
                mask.mark(g.span.clone());
            }
        } else if let Some((joined, span, n)) = try_join(groups, j, 3, &pat.hail) {
            if let Some(h) = remarks_precip::parse_hail(&joined) {
                record.hail = Some(ElementValue::new(joined, span.clone(), h));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if pat.pchgr.is_match(text) {
            if let Some(pcr) = remarks_basic::parse_pressure_change_rapid(text) {
                record.pressure_change_rapid = Some(ElementValue::new(text, g.span.clone(), pcr));
                mask.mark(g.span.clone());
            }
        } else if pat.mslp.is_match(text) {
            if let Some(slp) = remarks_basic::parse_sea_level_pressure(text) {
                record.sea_level_pressure = Some(ElementValue::new(text, g.span.clone(), slp));
                mask.mark(g.span.clone());
            }
        } else if pat.nospeci.is_match(text) {
            record.no_speci = true;
            mask.mark(g.span.clone());
        } else if pat.aurbo.is_match(text) {
            record.aurora_borealis = true;
            mask.mark(g.span.clone());
        } else if pat.contrails.is_match(text) {
            record.contrails = true;
            mask.mark(g.span.clone());
        } else if let Some((joined, span, n)) = try_join(groups, j, 2, &pat.snoincr) {
            if let Some(si) = remarks_precip::parse_snow_increase(&joined) {
                record.snow_increasing_rapidly = Some(ElementValue::new(joined, span.clone(), si));
                mask.mark(span);
            }
            j += n;
            continue;
        } else if pat.runway.is_match(text) {
            record.runway_remark_raw = Some(text.to_string());
        } else if pat.other.is_match(text) {
            if let Some(fl) = remarks_basic::parse_first_or_last(text) {
                record.first_or_last = Some(ElementValue::new(text, g.span.clone(), fl));
                mask.mark(g.span.clone());
            }
        } else if pat.pcp1h.is_match(text) {
            if let Some(p) = remarks_numeric::parse_precip_1h(text) {
                record.precip_1h = Some(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        } else if pat.pcp6h.is_match(text) {
            let minute = record.issue_time.as_ref().map_or(0, |t| t.value.minute);
            if let Some(p) = remarks_numeric::parse_precip_6h(text, minute) {
                record.precip_6h = Some(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        } else if pat.pcp24h.is_match(text) {
            if let Some(p) = remarks_numeric::parse_precip_24h(text) {
                record.precip_24h = Some(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        } else if pat.iceacc.is_match(text) {
            if let Some(p) = remarks_numeric::parse_ice_accretion(text) {
                record.ice_accretion.push(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        } else if pat.snodpth.is_match(text) {
            if let Some(sd) = remarks_numeric::parse_snow_depth(text) {
                record.snow_depth = Some(ElementValue::new(text, g.span.clone(), sd));
                mask.mark(g.span.clone());
            }
        } else if pat.lwe.is_match(text) {
            if let Some(p) = remarks_numeric::parse_liquid_water_equivalent(text) {
                record.liquid_water_equivalent = Some(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        } else if pat.sunshine.is_match(text) {
            if let Some(s) = remarks_numeric::parse_sunshine(text) {
                record.sunshine = Some(ElementValue::new(text, g.span.clone(), s));
                mask.mark(g.span.clone());
            }
        } else if pat.tempdec.is_match(text) {
            if let Some(td) = remarks_numeric::parse_temp_dec(text) {
                record.temp_dec = Some(ElementValue::new(text, g.span.clone(), td));
                mask.mark(g.span.clone());
            }
        } else if pat.maxt6h.is_match(text) {
            if let Some(t) = remarks_numeric::parse_max_temp_6h(text) {
                record.max_temp_6h = Some(ElementValue::new(text, g.span.clone(), t));
                mask.mark(g.span.clone());
            }
        } else if pat.mint6h.is_match(text) {
            if let Some(t) = remarks_numeric::parse_min_temp_6h(text) {
                record.min_temp_6h = Some(ElementValue::new(text, g.span.clone(), t));
                mask.mark(g.span.clone());
            }
        } else if pat.xtrmet.is_match(text) {
            if let Some(e) = remarks_numeric::parse_extreme_temp_24h(text) {
                record.extreme_temp_24h = Some(ElementValue::new(text, g.span.clone(), e));
                mask.mark(g.span.clone());
            }
        } else if pat.ptndcy3h.is_match(text) {
            if let Some(p) = remarks_numeric::parse_pressure_tendency_3h(text) {
                record.pressure_tendency_3h = Some(ElementValue::new(text, g.span.clone(), p));
                mask.mark(g.span.clone());
            }
        }

        j += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 12, 18, 0, 0).unwrap()
    }

    #[test]
    fn decodes_mandatory_body() {
        let rec = parse("METAR KDEN 121753Z 27015G25KT 10SM FEW250 22/M01 A3012", now());
        assert_eq!(rec.station.as_deref(), Some("KDEN"));
        assert_eq!(rec.wind.as_ref().unwrap().value.speed, 15);
        assert_eq!(rec.temperature.as_ref().unwrap().value.air_temp_c, 22);
        assert_eq!(rec.altimeter.is_some(), true);
        assert!(rec.unparsed.is_none());
    }

    #[test]
    fn nil_report_sets_flag_and_skips_body() {
        let rec = parse("METAR KXXX 121753Z NIL", now());
        assert!(rec.nil);
    }

    #[test]
    fn malformed_token_recovers_into_unparsed() {
        let rec = parse("METAR KBOS 121753Z X$X 10SM CLR 20/10 A3000 RMK AO2", now());
        assert_eq!(rec.unparsed.as_deref(), Some("X$X"));
        assert!(rec.station_type.is_some());
    }

    #[test]
    fn lightning_remark_expands_sectors() {
        let rec = parse("METAR KDEN 121753Z 10SM CLR 20/10 A3000 RMK AO2 LTG DSNT N AND E-SE OHD", now());
        let lr = rec.lightning.unwrap();
        assert_eq!(lr.value.locations.sectors.len(), 3);
    }

    #[test]
    fn precipitation_history_dual_event() {
        let rec = parse("METAR KDEN 121753Z 10SM CLR 20/10 A3000 RMK AO2 TSB15E47", now());
        assert_eq!(rec.precipitation_history.len(), 1);
        assert_eq!(rec.precipitation_history[0].value.events.len(), 2);
    }
}
