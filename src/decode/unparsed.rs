//! Unparsed-text accounting (§4.3): a bitset of consumed byte positions,
//! gap-scanned at the end of decoding to recover the text every handler
//! left untouched, then split at the first literal `RMK` into grammar-fault
//! residue (`unparsed`) and free-form observer prose (`additive`).

use std::ops::Range;

/// Tracks which byte positions of the original report have been consumed by
/// some matched element.
pub struct ConsumedMask {
    consumed: Vec<bool>,
}

impl ConsumedMask {
    /// A fresh mask the size of `input`, with nothing consumed yet.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            consumed: vec![false; input.len()],
        }
    }

    /// Mark a span as consumed by a matched element.
    pub fn mark(&mut self, span: Range<usize>) {
        for b in &mut self.consumed[span] {
            *b = true;
        }
    }

    /// Gap-scan the mask against `input`, returning every maximal run of
    /// unconsumed, non-whitespace-only text, in order.
    fn gaps<'a>(&self, input: &'a str) -> Vec<(Range<usize>, &'a str)> {
        let mut out = Vec::new();
        let mut start = None;
        for (i, _) in input.char_indices().chain(std::iter::once((input.len(), ' '))) {
            let is_consumed = i >= input.len() || self.consumed[i];
            if is_consumed {
                if let Some(s) = start.take() {
                    let text = input[s..i].trim();
                    if !text.is_empty() {
                        out.push((s..i, text));
                    }
                }
            } else if start.is_none() {
                start = Some(i);
            }
        }
        out
    }

    /// Split the unconsumed text at the first literal `RMK` token: anything
    /// before it is grammar-fault residue, anything after is observer prose
    /// (§4.3, confirmed against `usMetarDecoder.py`'s `rmk_pos` tracking).
    #[must_use]
    pub fn partition(&self, input: &str, rmk_span: Option<Range<usize>>) -> (Option<String>, Option<String>) {
        let split_at = rmk_span.map(|s| s.start).unwrap_or(usize::MAX);

        let mut unparsed = Vec::new();
        let mut additive = Vec::new();
        for (span, text) in self.gaps(input) {
            if span.start < split_at {
                unparsed.push(text);
            } else {
                additive.push(text);
            }
        }

        let unparsed = (!unparsed.is_empty()).then(|| unparsed.join(" "));
        let additive = (!additive.is_empty()).then(|| additive.join(" "));
        (unparsed, additive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_and_unparsed_partition_the_input() {
        let input = "METAR KBOS 121753Z X$X 10SM CLR 20/10 A3000=";
        let mut mask = ConsumedMask::new(input);
        for token in ["METAR", "KBOS", "121753Z", "10SM", "CLR", "20/10", "A3000"] {
            let start = input.find(token).unwrap();
            mask.mark(start..start + token.len());
        }
        let (unparsed, additive) = mask.partition(input, None);
        assert_eq!(unparsed.as_deref(), Some("X$X ="));
        assert_eq!(additive, None);
    }

    #[test]
    fn additive_text_follows_rmk() {
        let input = "KDEN 121753Z RMK AO2 HELLO";
        let mut mask = ConsumedMask::new(input);
        for token in ["KDEN", "121753Z", "RMK", "AO2"] {
            let start = input.find(token).unwrap();
            mask.mark(start..start + token.len());
        }
        let rmk_start = input.find("RMK").unwrap();
        let (unparsed, additive) = mask.partition(input, Some(rmk_start..rmk_start + 3));
        assert_eq!(unparsed, None);
        assert_eq!(additive.as_deref(), Some("HELLO"));
    }
}
