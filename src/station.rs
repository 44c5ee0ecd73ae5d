//! Station metadata lookup (§6): ICAO identifier → geographic fix. The full
//! station-table collaborator is out of scope (§1); this crate carries only
//! the narrow trait the encoder needs and one reference file-backed
//! implementation to test against.

use std::collections::HashMap;
use std::io::BufRead;

/// A station's geographic fix, as resolved from its ICAO identifier.
#[derive(PartialEq, Clone, Debug)]
pub struct Station {
    /// The station's UUID, used as the `gml:id` suffix for its sampling feature.
    pub uuid: String,
    /// 4-character ICAO identifier.
    pub icao: String,
    /// Latitude, decimal degrees.
    pub lat: f64,
    /// Longitude, decimal degrees.
    pub lon: f64,
    /// Elevation, metres.
    pub elev: f64,
    /// Station name.
    pub name: String,
}

/// Resolves ICAO identifiers to station fixes. Implementations are
/// read-only after construction (§5).
pub trait StationResolver {
    /// Looks up a station by its 4-character ICAO identifier.
    fn resolve(&self, icao: &str) -> Option<&Station>;
}

/// A reference [`StationResolver`] backed by the pipe-delimited station
/// file format from §6: `uuid|icao|lat|lon|elev|name|country|MTR`, `#`
/// comments, keyed by `icao`. Fields after `name` are ignored (confirmed
/// against `createStns.py`'s column order).
#[derive(Default, Debug, Clone)]
pub struct FileStationResolver {
    stations: HashMap<String, Station>,
}

impl FileStationResolver {
    /// Loads stations from a reader over the pipe-delimited file format.
    /// Malformed lines are skipped with a `tracing::warn!`, matching the
    /// loader's read-only, best-effort posture (§5/§9).
    pub fn load(reader: impl BufRead) -> std::io::Result<Self> {
        let mut stations = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Some(station) => {
                    tracing::debug!(icao = %station.icao, "loaded station");
                    stations.insert(station.icao.clone(), station);
                }
                None => tracing::warn!(line, "skipping malformed station line"),
            }
        }
        Ok(Self { stations })
    }
}

fn parse_line(line: &str) -> Option<Station> {
    let mut fields = line.split('|');
    let uuid = fields.next()?.to_string();
    let icao = fields.next()?.to_string();
    let lat = fields.next()?.parse().ok()?;
    let lon = fields.next()?.parse().ok()?;
    let elev = fields.next()?.parse().ok()?;
    let name = fields.next()?.to_string();
    Some(Station { uuid, icao, lat, lon, elev, name })
}

impl StationResolver for FileStationResolver {
    fn resolve(&self, icao: &str) -> Option<&Station> {
        self.stations.get(icao)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn loads_pipe_delimited_stations_and_skips_comments() {
        let data = "# comment\nabc-123|KDEN|39.8617|-104.6731|1655|Denver Intl|US|0\n";
        let resolver = FileStationResolver::load(Cursor::new(data)).unwrap();
        let station = resolver.resolve("KDEN").unwrap();
        assert_eq!(station.uuid, "abc-123");
        assert!((station.lat - 39.8617).abs() < 1e-9);
    }

    #[test]
    fn unknown_station_resolves_to_none() {
        let resolver = FileStationResolver::default();
        assert!(resolver.resolve("ZZZZ").is_none());
    }
}
