//! Namespace selection (§4.4 "Namespace selection"): international IWXXM
//! versus the IWXXM-US remark extension.

/// Which schema family a report encodes into.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Namespace {
    /// `iwxxm` 1.1, international.
    Iwxxm,
    /// `iwxxm-us` 1.0, U.S. FMH-1 remark extension.
    IwxxmUs,
}

impl Namespace {
    /// The XML namespace prefix used throughout the document.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Iwxxm => "iwxxm",
            Namespace::IwxxmUs => "iwxxm-us",
        }
    }

    /// The namespace URI declared on the root element.
    #[must_use]
    pub fn uri(self) -> &'static str {
        match self {
            Namespace::Iwxxm => "http://icao.int/iwxxm/1.1",
            Namespace::IwxxmUs => "http://nws.weather.gov/schemas/iwxxm-us/1.0/release",
        }
    }

    /// The `xsi:schemaLocation` pair declared on the root when
    /// `EncoderOptions::namespace_declarations` is set.
    #[must_use]
    pub fn schema_location(self) -> &'static str {
        match self {
            Namespace::Iwxxm => "http://icao.int/iwxxm/1.1 http://schemas.wmo.int/iwxxm/1.1/iwxxm.xsd",
            Namespace::IwxxmUs => {
                "http://nws.weather.gov/schemas/iwxxm-us/1.0/release http://nws.weather.gov/schemas/iwxxm-us/1.0/release/iwxxm-us.xsd"
            }
        }
    }

    /// `true` when a cloud/visibility-elision `CAVOK` code is permitted in
    /// this namespace. The U.S. extension never emits it (§4.4).
    #[must_use]
    pub fn allows_cavok(self) -> bool {
        matches!(self, Namespace::Iwxxm)
    }

    /// `true` when the international-only sub-elements (`rewx`, `ws`,
    /// `sea`, `rwystate`) may be emitted.
    #[must_use]
    pub fn allows_international_only_elements(self) -> bool {
        matches!(self, Namespace::Iwxxm)
    }
}

/// Selects the namespace for `icao`, honoring the caller's
/// `allow_us_extensions` flag. U.S. stations are those whose identifier
/// starts with `K`, `P`, or `TJ` (§4.4); absent the flag, U.S. stations
/// still encode, just into plain `iwxxm`.
#[must_use]
pub fn select(icao: &str, allow_us_extensions: bool) -> Namespace {
    let is_us = icao.starts_with('K') || icao.starts_with('P') || icao.starts_with("TJ");
    if is_us && allow_us_extensions {
        Namespace::IwxxmUs
    } else {
        Namespace::Iwxxm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_station_with_flag_selects_iwxxm_us() {
        assert_eq!(select("KDEN", true), Namespace::IwxxmUs);
    }

    #[test]
    fn us_station_without_flag_stays_international() {
        assert_eq!(select("KDEN", false), Namespace::Iwxxm);
    }

    #[test]
    fn non_us_station_never_selects_iwxxm_us() {
        assert_eq!(select("EGLL", true), Namespace::Iwxxm);
    }

    #[test]
    fn palau_and_guam_prefixes_count_as_us() {
        assert_eq!(select("PGUM", true), Namespace::IwxxmUs);
        assert_eq!(select("TJSJ", true), Namespace::IwxxmUs);
    }
}
