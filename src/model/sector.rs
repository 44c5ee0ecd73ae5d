//! Compass-bearing spans and the location buckets built from them (§3, §4.2
//! "Location parsing").

use std::fmt;

/// An arc expressed as a counter-clockwise start bearing and a clockwise end
/// bearing, both in degrees.
///
/// Per §3's invariant, arcs are oriented ccw→cw; `Overhead` expands to the
/// full-circle form `{0.0, 360.0}`, which is the one case where `ccw == cw`
/// is *not* a wraparound bug (`0.0 != 360.0`, so the invariant in §8 ---
/// "no arc has `ccw == cw` unless it is the OHD full-circle form" --- holds
/// trivially for it).
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    /// Counter-clockwise bound, in degrees.
    pub ccw: f64,
    /// Clockwise bound, in degrees.
    pub cw: f64,
}

impl Sector {
    /// The full-circle sector used for `OHD` (overhead).
    #[must_use]
    pub fn full_circle() -> Self {
        Self { ccw: 0.0, cw: 360.0 }
    }

    /// A 45-degree arc centred on a named compass point.
    #[must_use]
    pub fn centred_on(bearing: f64) -> Self {
        Self {
            ccw: normalize_degrees(bearing - 22.5),
            cw: normalize_degrees(bearing + 22.5),
        }
    }

    /// Merge this sector with the next, when they are adjacent
    /// (`self.cw == other.ccw`), per §4.2's final merge pass.
    #[must_use]
    pub fn merge_adjacent(self, other: Self) -> Option<Self> {
        if (self.cw - other.ccw).abs() < f64::EPSILON {
            Some(Self {
                ccw: self.ccw,
                cw: other.cw,
            })
        } else {
            None
        }
    }

    /// Normalizes a wraparound arc (`ccw > cw`, as happens when expanding
    /// thunderstorm-motion headings through 0°/360°) by subtracting 360 from
    /// `ccw`, per §3's invariant.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.ccw > self.cw {
            Self {
                ccw: self.ccw - 360.0,
                cw: self.cw,
            }
        } else {
            self
        }
    }
}

fn normalize_degrees(d: f64) -> f64 {
    let mut d = d % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    d
}

/// The bucket a location-bearing remark element's sectors are filed under.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocationBucket {
    /// Distant (`DSNT`).
    Distant,
    /// In the vicinity (`VC`).
    Vicinity,
    /// At the station, the default when no `DSNT`/`VC`/`OHD` prefix applies.
    AtStation,
    /// Overhead (`OHD`); always a [`Sector::full_circle`].
    Overhead,
}

impl fmt::Display for LocationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocationBucket::Distant => "DSNT",
            LocationBucket::Vicinity => "VC",
            LocationBucket::AtStation => "ATSTN",
            LocationBucket::Overhead => "OHD",
        })
    }
}

/// A collection of sectors keyed by their bucket, as produced by the
/// location parser for `ltg`/`tstmvmt`/vicinity phenomena.
#[derive(PartialEq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationRecord {
    /// `(bucket, sector)` pairs in the order they were parsed.
    pub sectors: Vec<(LocationBucket, Sector)>,
}

impl LocationRecord {
    /// All sectors filed under a given bucket.
    pub fn in_bucket(&self, bucket: LocationBucket) -> impl Iterator<Item = &Sector> {
        self.sectors
            .iter()
            .filter(move |(b, _)| *b == bucket)
            .map(|(_, s)| s)
    }

    /// True if no sectors were recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centred_on_north_wraps_through_zero() {
        let s = Sector::centred_on(0.0);
        assert!((s.ccw - 337.5).abs() < 1e-9);
        assert!((s.cw - 22.5).abs() < 1e-9);
    }

    #[test]
    fn merge_adjacent_joins_touching_arcs() {
        let a = Sector { ccw: 0.0, cw: 45.0 };
        let b = Sector { ccw: 45.0, cw: 90.0 };
        let merged = a.merge_adjacent(b).unwrap();
        assert_eq!(merged.ccw, 0.0);
        assert_eq!(merged.cw, 90.0);
    }

    #[test]
    fn full_circle_not_flagged_as_degenerate() {
        let s = Sector::full_circle();
        assert!((s.ccw - s.cw).abs() > f64::EPSILON);
    }
}
