//! The three concurrent bundles from §4.4's "Concurrent structures": each
//! wraps a fixed set of child elements and is emitted only when at least
//! one child is actually present (the empty-bundle invariant, §8).

use crate::encode::writer::XmlWriter;
use crate::error::EncodeError;

/// Writes `name` wrapping the output of `write_children` only if
/// `any_present` is true; otherwise emits nothing at all.
pub fn bundle(
    writer: &mut XmlWriter,
    name: &str,
    any_present: bool,
    write_children: impl FnOnce(&mut XmlWriter) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    if !any_present {
        return Ok(());
    }
    writer.start(name, &[])?;
    write_children(writer)?;
    writer.end(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bundle_emits_nothing() {
        let mut w = XmlWriter::new();
        bundle(&mut w, "iwxxm-us:variationsInObservedProperties", false, |_| Ok(())).unwrap();
        assert!(!w.finish().contains("variationsInObservedProperties"));
    }

    #[test]
    fn non_empty_bundle_wraps_children() {
        let mut w = XmlWriter::new();
        bundle(&mut w, "iwxxm-us:variationsInObservedProperties", true, |w| {
            w.leaf("iwxxm-us:towerVisibility", &[], "1000")
        })
        .unwrap();
        let xml = w.finish();
        assert!(xml.contains("variationsInObservedProperties"));
        assert!(xml.contains("towerVisibility"));
    }
}
