//! The location parser (§4.2 "Location parsing"): expands `DSNT`/`VC`/
//! `ATSTN`/`OHD` compass-bearing spans into sector arcs, shared by `ltg` and
//! `tstmvmt`.

use crate::model::sector::{LocationBucket, LocationRecord, Sector};

/// Returns the centre bearing of a compass point, or `None` if `s` isn't one.
fn compass_bearing(s: &str) -> Option<f64> {
    Some(match s {
        "N" => 0.0,
        "NE" => 45.0,
        "E" => 90.0,
        "SE" => 135.0,
        "S" => 180.0,
        "SW" => 225.0,
        "W" => 270.0,
        "NW" => 315.0,
        _ => return None,
    })
}

/// True if `s` is a token the location grammar understands: a keyword
/// (`OHD`/`VC`/`DSNT`/`AND`), a bare compass point, or a dash-joined range
/// (`E-SE`).
pub fn is_location_token(s: &str) -> bool {
    matches!(s, "OHD" | "VC" | "DSNT" | "AND") || parse_compass_group(s).is_some()
}

/// Parses a single location-grammar word into a sector: either a bare
/// compass point (a 45-degree arc centred on it) or a dash-joined pair
/// (`E-SE`, an arc spanning the intermediate points).
fn parse_compass_group(s: &str) -> Option<Sector> {
    if let Some((from, to)) = s.split_once('-') {
        let from = compass_bearing(from)?;
        let to = compass_bearing(to)?;
        Some(Sector {
            ccw: normalize(from - 22.5),
            cw: normalize(to + 22.5),
        })
    } else {
        compass_bearing(s).map(Sector::centred_on)
    }
}

fn normalize(d: f64) -> f64 {
    let mut d = d % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

/// Scans a whitespace-joined location expression (e.g. `DSNT N AND E-SE
/// OHD`) for the `OHD`/`VC`/`DSNT` prefixes described in §4.2: text not
/// claimed by any of those buckets falls into `ATSTN`. `AND` forces a
/// discontinuity so adjacent sectors aren't merged across it. A final pass
/// merges sectors that end up touching (one's `cw` equals the next's `ccw`)
/// within the same bucket.
#[must_use]
pub fn parse_location_list(text: &str) -> LocationRecord {
    let mut record = LocationRecord::default();
    let mut bucket = LocationBucket::AtStation;
    let mut pending_merge_barrier = false;

    for token in text.split_whitespace() {
        match token {
            "OHD" => {
                record.sectors.push((LocationBucket::Overhead, Sector::full_circle()));
                pending_merge_barrier = true;
            }
            "VC" => {
                bucket = LocationBucket::Vicinity;
                pending_merge_barrier = true;
            }
            "DSNT" => {
                bucket = LocationBucket::Distant;
                pending_merge_barrier = true;
            }
            "AND" => {
                pending_merge_barrier = true;
            }
            other => {
                if let Some(sector) = parse_compass_group(other) {
                    if pending_merge_barrier {
                        record.sectors.push((bucket, sector));
                    } else if let Some((last_bucket, last_sector)) = record.sectors.last_mut() {
                        if *last_bucket == bucket {
                            if let Some(merged) = last_sector.merge_adjacent(sector) {
                                *last_sector = merged;
                            } else {
                                record.sectors.push((bucket, sector));
                            }
                        } else {
                            record.sectors.push((bucket, sector));
                        }
                    } else {
                        record.sectors.push((bucket, sector));
                    }
                    pending_merge_barrier = false;
                }
            }
        }
    }

    record
}

/// Parses a single `MOV <compass>` movement heading, normalizing wraparound
/// per §3 (the `ccw > cw` case).
#[must_use]
pub fn parse_movement(compass: &str) -> Option<Sector> {
    parse_compass_group(compass).map(Sector::normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ltg_scenario_from_spec() {
        let rec = parse_location_list("DSNT N AND E-SE OHD");
        assert_eq!(rec.sectors.len(), 3);
        assert_eq!(rec.sectors[0].0, LocationBucket::Distant);
        assert_eq!(rec.sectors[2].0, LocationBucket::Overhead);
        assert!((rec.sectors[2].1.cw - 360.0).abs() < 1e-9);
    }

    #[test]
    fn dash_range_spans_intermediate_points() {
        let rec = parse_location_list("E-SE");
        let (_, s) = rec.sectors[0];
        assert!((s.ccw - 67.5).abs() < 1e-9);
        assert!((s.cw - 157.5).abs() < 1e-9);
    }
}
