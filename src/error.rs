//! Error types shared by the decoder and the encoder.
//!
//! Follows the shape of the original `metar` crate's [`MetarError`]: a span
//! into the original TAC string plus a variant, rendered with
//! `annotate-snippets` rather than a generic `thiserror` message, since every
//! decode failure is a precise location inside the report text.

use std::fmt;
use std::ops::Range;

use annotate_snippets::{Level, Renderer, Snippet};

/// A single-character position in the original TAC string.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset from the start of the report.
    pub offset: usize,
}

impl Position {
    /// Construct a position at the given byte offset.
    #[must_use]
    pub fn new(offset: usize) -> Self {
        Self { offset }
    }
}

/// The kind of error encountered while decoding a report.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum DecodeErrorKind {
    /// The grammar failed before `REPORT` could be completed.
    Syntactic,
    /// `itime`'s day/hour/minute combination does not exist.
    InvalidTime,
    /// A numeric sub-field inside an otherwise-matched lexeme failed to parse.
    ValueParse,
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeErrorKind::Syntactic => "syntactic error",
            DecodeErrorKind::InvalidTime => "invalid time",
            DecodeErrorKind::ValueParse => "value parse error",
        })
    }
}

/// An error raised while decoding a single TAC report.
///
/// Per the decoder's failure policy, this never aborts the whole decode: it
/// is recorded on the partially populated [`crate::model::ObservationRecord`]
/// rather than returned from [`crate::decode::Decoder::decode`].
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DecodeError {
    /// What went wrong.
    pub kind: DecodeErrorKind,
    /// The span of the original report the error applies to.
    pub span: Range<usize>,
    /// A short human-readable explanation.
    pub message: String,
}

impl DecodeError {
    /// Build a new decode error over the given byte span.
    #[must_use]
    pub fn new(kind: DecodeErrorKind, span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
        }
    }

    /// Render the error as a source-annotated diagnostic, in the same style
    /// as the upstream `metar` crate's `Display` impl for `MetarError`, but
    /// using `annotate-snippets` for the caret underline.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(source)
                .line_start(1)
                .annotation(Level::Error.span(self.span.clone())),
        );
        Renderer::plain().render(message).to_string()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for DecodeError {}

/// An error raised while encoding an [`crate::model::ObservationRecord`] as
/// IWXXM/IWXXM-US XML.
///
/// Per §7's error taxonomy, `UnknownStation` is the only encode-time failure
/// that aborts emission entirely; everything else (missing vocabulary,
/// unparseable numeric sub-fields) is absorbed silently at the element level
/// during decode, never surfacing here.
#[derive(Debug)]
pub enum EncodeError {
    /// The ICAO identifier was not present in the station table.
    UnknownStation(String),
    /// The underlying XML writer failed.
    Xml(quick_xml::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnknownStation(icao) => write!(f, "unknown station: {icao}"),
            EncodeError::Xml(e) => write!(f, "xml error: {e}"),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodeError::UnknownStation(_) => None,
            EncodeError::Xml(e) => Some(e),
        }
    }
}

impl From<quick_xml::Error> for EncodeError {
    fn from(e: quick_xml::Error) -> Self {
        EncodeError::Xml(e)
    }
}
