//! Per-token-kind semantic handlers, grouped the way §4.2 groups the token
//! catalogue: mandatory body, location/lightning, station/pressure basics,
//! wind events, visibility variations, precipitation history, and the
//! tenths-precision numeric remarks.

pub mod location;
pub mod mandatory;
pub mod remarks_basic;
pub mod remarks_numeric;
pub mod remarks_precip;
pub mod remarks_visibility;
pub mod remarks_wind;
