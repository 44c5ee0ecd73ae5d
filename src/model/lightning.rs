//! The lightning / thunderstorm-movement record shape from §3.

use super::sector::Sector;
use crate::model::LocationRecord;

/// `{frequency?, types?, locations: {DSNT|VC|ATSTN|OHD -> sectors}, movement?: sectors}`
#[derive(PartialEq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightningRecord {
    /// `OCNL`/`FRQ`/`CONS` style frequency descriptor, if present.
    pub frequency: Option<String>,
    /// Lightning types observed (`CG`, `IC`, `CC`, `CA`), if qualified.
    pub types: Vec<String>,
    /// Sectors the lightning was observed in.
    pub locations: LocationRecord,
}

/// Thunderstorm movement: shares the same location-sector shape as
/// [`LightningRecord`], plus an optional movement heading expressed as a
/// single sector (normalized per §3 when the expansion wraps through 0°).
#[derive(PartialEq, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThunderstormMovement {
    /// Sectors the thunderstorm activity was observed in.
    pub locations: LocationRecord,
    /// The direction the storm is moving toward, if reported (`MOV NE`).
    pub movement: Option<Sector>,
}
