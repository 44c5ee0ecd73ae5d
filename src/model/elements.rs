//! Per-element decoded field shapes. One type per token kind in §4.1/§4.2,
//! in the same spirit as the upstream `metar` crate's `types/` submodules
//! (`Wind`, `RunwayVisualRange`, ...), generalized to the full remarks set.

use crate::model::time::IssueTime;

/// `METAR` or `SPECI`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportKind {
    /// Routine report.
    Metar,
    /// Special (unscheduled) report.
    Speci,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ReportKind::Metar => "METAR",
            ReportKind::Speci => "SPECI",
        })
    }
}

/// `AUTO`/`COR` flags from the body, mapped onto the IWXXM root attributes.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoCor {
    /// `AUTO` was present: `automatedStation=true`.
    pub auto: bool,
    /// `COR` was present: `status=CORRECTED`.
    pub cor: bool,
}

/// Wind direction, possibly unknown or variable.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindDirection {
    /// A heading in whole degrees.
    Heading(u32),
    /// `VRB`.
    Variable,
}

/// `dddff(Gggg)?KT` plus an optionally-merged `dddVddd` extension (§4.2
/// "wind").
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wind {
    /// The wind direction.
    pub direction: WindDirection,
    /// Sustained speed.
    pub speed: u32,
    /// Gust speed, if reported.
    pub gust: Option<u32>,
    /// UCUM unit of `speed`/`gust` (always `"[kn_i]"` for METAR/SPECI body text).
    pub unit: &'static str,
    /// The variable-direction envelope, written in place by a following
    /// `wind_vrb` token.
    pub varying: Option<(u32, u32)>,
}

/// `1 1/2SM`, `M1/4SM`, `9999`, or `CAVOK`.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Visibility {
    /// Ceiling and visibility OK; clouds/weather elided upstream.
    Cavok,
    /// A distance with an operator (`<`/`>`/exact) and a UCUM unit.
    Distance {
        /// The numeric value, in `unit`.
        value: f64,
        /// `"[mi_i]"` for `SM`-suffixed lexemes, `"m"` otherwise.
        unit: &'static str,
        /// `Some('M')` for "less than", `Some('P')` for "more than".
        operator: Option<char>,
    },
}

/// A single runway's accumulated RVR fields. Per §4.2 "rvr", repeated
/// occurrences across the report are accumulated per field so that
/// `rwy`/`mean`/`oper`/`tend` stay positionally aligned (§8's
/// whitespace-token-count invariant). `rwy`/`mean` are whitespace-joined
/// (each entry is a multi-character lexeme); `oper`/`tend` are
/// concatenated with no separator, one character per entry (a missing
/// operator/tendency contributes a literal space), matching the original
/// (`usMetarDecoder.py:714-721`: `d['oper'] += r.group('oper')` else
/// `+= ' '`) so the Nth character of `oper`/`tend` always lines up with
/// the Nth whitespace-delimited token of `rwy`/`mean`.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RvrAccumulator {
    /// Space-joined runway designators.
    pub rwy: String,
    /// Space-joined mean visual range lexemes (e.g. `1600`, `P1500`, `M0600`).
    pub mean: String,
    /// One character per entry, no separator; a missing operator is a literal space.
    pub oper: String,
    /// One character per entry, no separator; a missing tendency is a literal space.
    pub tend: String,
}

impl RvrAccumulator {
    /// Append one runway's fields, joining `rwy`/`mean` with a space when
    /// not the first, and appending exactly one character to `oper`/`tend`.
    pub fn push(&mut self, rwy: &str, mean: &str, oper: Option<char>, tend: Option<char>) {
        push_joined(&mut self.rwy, rwy);
        push_joined(&mut self.mean, mean);
        self.oper.push(oper.unwrap_or(' '));
        self.tend.push(tend.unwrap_or(' '));
    }
}

fn push_joined(field: &mut String, value: &str) {
    if !field.is_empty() {
        field.push(' ');
    }
    field.push_str(if value.is_empty() { " " } else { value });
}

/// Variable RVR (`Rrwy/dddVdddFT?`), stored separately from the main
/// accumulator per §4.2.
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableRvr {
    /// Runway designator.
    pub rwy: String,
    /// Lower bound lexeme.
    pub min: String,
    /// Upper bound lexeme.
    pub max: String,
}

/// Weather intensity/proximity qualifier, shared by present-weather and
/// recent-weather groups.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherIntensity {
    /// `-`
    Light,
    /// no prefix
    Moderate,
    /// `+`
    Heavy,
    /// `VC`
    InVicinity,
}

/// One present-weather / obscuration / vicinity / funnel-cloud group
/// (§2's WWGROUP production: `PCP | OBV | VCNTY | FUNNEL`).
#[derive(PartialEq, Eq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherGroup {
    /// Intensity/proximity qualifier, when present.
    pub intensity: Option<WeatherIntensity>,
    /// The raw phenomenon token looked up in the controlled vocabulary by
    /// the encoder (e.g. `"TSRA"`, `"+SHRA"`, `"FC"`). Kept un-split; the
    /// encoder's split-search fallback (§4.4) operates on this string.
    pub phenomenon: String,
}

/// Cloud cover amount.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloudCover {
    /// `CLR`/`SKC`.
    Clear,
    /// `FEW`.
    Few,
    /// `SCT`.
    Scattered,
    /// `BKN`.
    Broken,
    /// `OVC`/`0VC`.
    Overcast,
}

impl CloudCover {
    /// BUFR code-flag value `0-20-008/{n}` used by the encoder.
    #[must_use]
    pub fn bufr_code(self) -> u8 {
        match self {
            CloudCover::Clear => 0,
            CloudCover::Few => 1,
            CloudCover::Scattered => 2,
            CloudCover::Broken => 3,
            CloudCover::Overcast => 4,
        }
    }
}

/// A cloud layer's type qualifier.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloudType {
    /// No further qualifier.
    Normal,
    /// `CB`.
    Cumulonimbus,
    /// `TCU`.
    ToweringCumulus,
    /// `///`, not observable.
    Unknown,
}

/// A single `sky` cloud layer.
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CloudLayer {
    /// Amount of cover.
    pub cover: CloudCover,
    /// Cloud type qualifier.
    pub cloud_type: CloudType,
    /// Height in hundreds of feet (i.e. the raw 3-digit group), `None` when
    /// `///`.
    pub height_hundreds_ft: Option<u32>,
}

/// `VV///` or `VVnnn`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerticalVisibility {
    /// Height in hundreds of feet, `None` when reduced by an unmeasured amount.
    pub height_hundreds_ft: Option<u32>,
}

/// The mandatory body's combined temperature/dewpoint group.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Temperature {
    /// Whole-degree air temperature.
    pub air_temp_c: i32,
    /// Whole-degree dewpoint.
    pub dewpoint_c: i32,
}

/// `AnnnnZ` (inHg) or `Qnnnn` (hPa).
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Altimeter {
    /// Inches of mercury.
    InchesOfMercury(f64),
    /// Hectopascals.
    Hectopascals(f64),
}

/// `AO1`/`AO2`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomationType {
    /// No precipitation discriminator.
    Ao1,
    /// With precipitation discriminator.
    Ao2,
}

/// `PK WND dddff/HHMM` (or `/MM`).
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeakWind {
    /// Direction in whole degrees.
    pub direction: u32,
    /// Speed in knots.
    pub speed: u32,
    /// Recovered timestamp of the peak.
    pub time: IssueTime,
}

/// `WSHFT HHMM (FROPA)?`.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindShift {
    /// Recovered timestamp of the shift.
    pub time: IssueTime,
    /// Whether the shift was due to a frontal passage.
    pub frontal_passage: bool,
}

/// `hi/lo` variable ceiling or variable visibility envelope.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable<T> {
    /// Lower bound.
    pub lo: T,
    /// Upper bound; §3's invariant requires `hi >= lo` or the element is discarded.
    pub hi: T,
}

/// A sector-qualified visibility or ceiling reading (`sctrvis`, `vis2loc`,
/// `cig2loc`).
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionalReading {
    /// The qualifier the reading applies to: a compass direction for
    /// `sctrvis`, or a runway/location token for `vis2loc`/`cig2loc`.
    pub direction: Option<String>,
    /// The reading, in statute miles (visibility) or hundreds of feet
    /// (ceiling), exactly as written in the TAC; unit conversion is an
    /// encode-time concern (§4.4).
    pub value: f64,
}

/// One `(B|E)HHMM` precipitation-history event.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecipitationEvent {
    /// `true` for begin, `false` for end.
    pub begin: bool,
    /// Recovered timestamp.
    pub time: IssueTime,
}

/// `(SH|FZ)?(TS|pcp)((B|E)HHMM)+`.
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecipitationHistory {
    /// The weather-type token the history applies to (e.g. `"TS"`, `"SHRA"`).
    pub phenomenon: String,
    /// The begin/end events, in lexeme order.
    pub events: Vec<PrecipitationEvent>,
}

/// `GR n.n` hail diameter, in inches.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hail {
    /// Diameter in inches.
    pub diameter_in: f64,
}

/// `PRESRR`/`PRESFR`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureChangeRapid {
    /// `PRESRR`.
    Rising,
    /// `PRESFR`.
    Falling,
}

/// `SLPppp`, in hectopascals after the `900`/`1000` rule (§4.2 "mslp").
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeaLevelPressure {
    /// Resolved pressure in hPa.
    pub hectopascals: f64,
}

/// `FIRST`/`LAST`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FirstOrLast {
    /// `FIRST`.
    First,
    /// `LAST`.
    Last,
}

/// A period-tagged precipitation/ice-accretion/water-equivalent amount,
/// shared shape for `pcp1h`/`pcp6h`/`pcp24h`/`iceacc`/`lwe` (§4.2).
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodAmount {
    /// Period in hours (1, 3, 6, or 24).
    pub period_hours: u32,
    /// Amount in inches.
    pub amount_in: f64,
}

/// `4/nnn` snow depth, in inches.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnowDepth {
    /// Depth in inches.
    pub depth_in: f64,
}

/// `98nnn` sunshine duration, in minutes.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sunshine {
    /// Minutes of sunshine.
    pub minutes: u32,
}

/// `Tsnnnsnnn` tenths-of-degree temperature/dewpoint, signed by the `s`
/// character (`1` = negative).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TempDec {
    /// Air temperature, in tenths of a degree Celsius.
    pub air_temp_tenths: i32,
    /// Dewpoint, in tenths of a degree Celsius.
    pub dewpoint_tenths: i32,
}

/// `1snnn`/`2snnn` 6-hour max/min extremes, in tenths of a degree.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extreme6h {
    /// Tenths of a degree Celsius.
    pub tenths: i32,
}

/// `4snnnsnnn` 24-hour max/min extremes, in tenths of a degree.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extreme24h {
    /// 24-hour maximum, in tenths of a degree Celsius.
    pub max_tenths: i32,
    /// 24-hour minimum, in tenths of a degree Celsius.
    pub min_tenths: i32,
}

/// `5cnnn` 3-hour pressure tendency.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureTendency3h {
    /// WMO tendency shape code, 0-8.
    pub code: u8,
    /// Magnitude in tenths of a hectopascal.
    pub tenths_hpa: i32,
}

/// Space-joined sensor-status mnemonics (`RVRNO`, `PWINO`, ...).
#[derive(PartialEq, Eq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorStatus {
    /// Accumulated mnemonics, in report order.
    pub codes: Vec<String>,
}

/// `SNINCR n/nn` snow increasing rapidly: hourly increase and new total
/// depth, both in inches.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnowIncrease {
    /// Amount added in the past hour, in inches.
    pub increase_in: f64,
    /// New total depth, in inches.
    pub total_depth_in: f64,
}
