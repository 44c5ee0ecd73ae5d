//! The observation record: the typed intermediate representation the
//! decoder produces and the encoder consumes (§3).

pub mod elements;
pub mod lightning;
pub mod sector;
pub mod time;

pub use lightning::{LightningRecord, ThunderstormMovement};
pub use sector::{LocationBucket, LocationRecord, Sector};
pub use time::IssueTime;

use std::ops::Range;

use crate::error::{DecodeError, DecodeErrorKind};
use elements::*;

/// An element's decoded value, paired with its original lexeme and the
/// byte-range it occupied in the source report (§3: "the original lexeme
/// (for diagnostics and unparsed accounting), a character-range index...").
#[derive(PartialEq, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementValue<T> {
    /// The exact substring of the report this element was matched from.
    pub lexeme: String,
    /// Byte offsets into the report, `start..end`, covering `lexeme` exactly.
    pub span: Range<usize>,
    /// The decoded fields.
    pub value: T,
}

impl<T> ElementValue<T> {
    /// Wrap a decoded value with its provenance.
    pub fn new(lexeme: impl Into<String>, span: Range<usize>, value: T) -> Self {
        Self {
            lexeme: lexeme.into(),
            span,
            value,
        }
    }
}

/// The full set of elements a single METAR/SPECI report may populate.
///
/// Elements are independent (§3: "absence of one never invalidates
/// another"); repeatable elements accumulate, singleton elements overwrite
/// on a second match except `wind`, which a following `wind_vrb` token
/// extends in place (§4.2 "wind").
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObservationRecord {
    // -- identity / envelope -------------------------------------------------
    /// `METAR` or `SPECI`.
    pub kind: Option<ReportKind>,
    /// 4-character ICAO identifier.
    pub station: Option<String>,
    /// Recovered issue time.
    pub issue_time: Option<ElementValue<IssueTime>>,
    /// `AUTO`/`COR` flags.
    pub auto_cor: AutoCor,
    /// Set when `itime`'s day/hour/minute combination did not exist; the
    /// record still carries `issue_time = now()` per §4.2.
    pub time_error: Option<String>,
    /// `true` when the body was just `NIL` -- callers should not encode.
    pub nil: bool,

    // -- mandatory body -------------------------------------------------------
    /// Wind group, extended in place by a following `wind_vrb` token.
    pub wind: Option<ElementValue<Wind>>,
    /// Prevailing visibility.
    pub visibility: Option<ElementValue<Visibility>>,
    /// Runway visual range, accumulated across all `Rrwy/...` tokens.
    pub rvr: Option<ElementValue<RvrAccumulator>>,
    /// Variable RVR groups, one per runway that reported a `dddVddd` range.
    pub variable_rvr: Vec<ElementValue<VariableRvr>>,
    /// Present/recent weather groups (`PCP | OBV | VCNTY | FUNNEL`).
    pub weather: Vec<ElementValue<WeatherGroup>>,
    /// Cloud layers, absent when `CAVOK`/`SKC`/`NSC` elided them.
    pub clouds: Vec<ElementValue<CloudLayer>>,
    /// Vertical visibility, when an obscured sky reports `VV` instead of layers.
    pub vertical_visibility: Option<ElementValue<VerticalVisibility>>,
    /// Temperature/dewpoint whole-degree group.
    pub temperature: Option<ElementValue<Temperature>>,
    /// Altimeter setting.
    pub altimeter: Option<ElementValue<Altimeter>>,

    // -- remarks: station/automation -----------------------------------------
    /// `AO1`/`AO2`.
    pub station_type: Option<ElementValue<AutomationType>>,
    /// `$`, automated station requires maintenance.
    pub maintenance_check: bool,
    /// Sensor outages (`RVRNO`, `PWINO`, ...).
    pub sensor_status: Option<ElementValue<SensorStatus>>,
    /// `WIND ESTMD` or similar estimated-wind marker.
    pub estimated_wind: bool,

    // -- remarks: visibility/ceiling variations -------------------------------
    /// True prevailing (tower) visibility, reassigned from `vsby` by `sfcvis`.
    pub tower_visibility: Option<ElementValue<Visibility>>,
    /// Variable visibility envelope.
    pub variable_visibility: Option<ElementValue<Variable<f64>>>,
    /// Sector (directional) visibility readings.
    pub sector_visibility: Vec<ElementValue<DirectionalReading>>,
    /// A second visibility reading at another location on the field.
    pub visibility_second_location: Option<ElementValue<DirectionalReading>>,
    /// A second ceiling reading at another location on the field.
    pub ceiling_second_location: Option<ElementValue<DirectionalReading>>,
    /// Variable ceiling envelope.
    pub variable_ceiling: Option<ElementValue<Variable<f64>>>,
    /// Obscuration phenomenon with its own cover/height.
    pub obscuration: Option<ElementValue<CloudLayer>>,
    /// Variable sky condition layers.
    pub variable_sky: Vec<ElementValue<CloudLayer>>,

    // -- remarks: wind events --------------------------------------------------
    /// Peak wind since the last report.
    pub peak_wind: Option<ElementValue<PeakWind>>,
    /// Wind shift, optionally tagged as a frontal passage.
    pub wind_shift: Option<ElementValue<WindShift>>,

    // -- remarks: precipitation history / hazards ------------------------------
    /// Begin/end history for thunderstorm and precipitation phenomena.
    pub precipitation_history: Vec<ElementValue<PrecipitationHistory>>,
    /// Hail diameter.
    pub hail: Option<ElementValue<Hail>>,
    /// Lightning activity.
    pub lightning: Option<ElementValue<LightningRecord>>,
    /// Thunderstorm movement.
    pub thunderstorm_movement: Option<ElementValue<ThunderstormMovement>>,

    // -- remarks: pressure -----------------------------------------------------
    /// `PRESRR`/`PRESFR`.
    pub pressure_change_rapid: Option<ElementValue<PressureChangeRapid>>,
    /// 3-hour pressure tendency.
    pub pressure_tendency_3h: Option<ElementValue<PressureTendency3h>>,
    /// Sea-level pressure (`SLPppp`).
    pub sea_level_pressure: Option<ElementValue<SeaLevelPressure>>,

    // -- remarks: period amounts -------------------------------------------------
    /// Hourly precipitation (`Pnnnn`).
    pub precip_1h: Option<ElementValue<PeriodAmount>>,
    /// 3-/6-hour precipitation (`6nnnn`).
    pub precip_6h: Option<ElementValue<PeriodAmount>>,
    /// 24-hour precipitation (`7nnnn`).
    pub precip_24h: Option<ElementValue<PeriodAmount>>,
    /// Ice accretion amounts, one per reported period (1h/3h/6h).
    pub ice_accretion: Vec<ElementValue<PeriodAmount>>,
    /// Snow depth (`4/nnn`).
    pub snow_depth: Option<ElementValue<SnowDepth>>,
    /// Water equivalent of snow on the ground (`933nnn`).
    pub liquid_water_equivalent: Option<ElementValue<PeriodAmount>>,
    /// Sunshine duration (`98nnn`).
    pub sunshine: Option<ElementValue<Sunshine>>,
    /// Snow increasing rapidly.
    pub snow_increasing_rapidly: Option<ElementValue<SnowIncrease>>,

    // -- remarks: temperature extremes -----------------------------------------
    /// Tenths-precision temperature/dewpoint; takes encoder precedence over `temperature`.
    pub temp_dec: Option<ElementValue<TempDec>>,
    /// 6-hour maximum temperature.
    pub max_temp_6h: Option<ElementValue<Extreme6h>>,
    /// 6-hour minimum temperature.
    pub min_temp_6h: Option<ElementValue<Extreme6h>>,
    /// 24-hour max/min temperature.
    pub extreme_temp_24h: Option<ElementValue<Extreme24h>>,

    // -- remarks: miscellaneous -------------------------------------------------
    /// `FIRST`/`LAST` report of the day/shift.
    pub first_or_last: Option<ElementValue<FirstOrLast>>,
    /// `NOSPECI` marker.
    pub no_speci: bool,
    /// Aurora borealis observed (see DESIGN.md for the `auro`/`contrail`
    /// open question carried from §9).
    pub aurora_borealis: bool,
    /// Condensation trails observed.
    pub contrails: bool,
    /// Declared but unhandled per §9's open question: the raw lexeme is kept
    /// for unparsed accounting but no semantic field is populated.
    pub runway_remark_raw: Option<String>,

    // -- residue ------------------------------------------------------------------
    /// Free-form observer prose in `RMK` that matched no known token.
    pub additive: Option<String>,
    /// Grammar-fault residue from before `RMK` (or before the body ended, if
    /// there was no `RMK` at all).
    pub unparsed: Option<String>,
    /// Non-fatal decode errors recorded along the way (§7).
    pub errors: Vec<DecodeError>,
}

impl ObservationRecord {
    /// A fresh, empty record for a single report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal error without aborting decode.
    pub fn push_error(&mut self, kind: DecodeErrorKind, span: Range<usize>, message: impl Into<String>) {
        self.errors.push(DecodeError::new(kind, span, message));
    }

    /// The effective air temperature in whole-or-tenths precision: `temp_dec`
    /// takes precedence over `temperature` per §4.2/§8's precedence rule.
    #[must_use]
    pub fn effective_temperature_c(&self) -> Option<f64> {
        if let Some(td) = &self.temp_dec {
            Some(f64::from(td.value.air_temp_tenths) / 10.0)
        } else {
            self.temperature.as_ref().map(|t| f64::from(t.value.air_temp_c))
        }
    }

    /// The effective dewpoint in whole-or-tenths precision, same precedence
    /// rule as [`Self::effective_temperature_c`].
    #[must_use]
    pub fn effective_dewpoint_c(&self) -> Option<f64> {
        if let Some(td) = &self.temp_dec {
            Some(f64::from(td.value.dewpoint_tenths) / 10.0)
        } else {
            self.temperature.as_ref().map(|t| f64::from(t.value.dewpoint_c))
        }
    }
}
