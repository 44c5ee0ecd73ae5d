//! Splits a report into whitespace-delimited groups, each carrying its byte
//! span in the original string, so every downstream handler can report an
//! exact lexeme + span (§3).

use std::ops::Range;

/// One whitespace-delimited group of the input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Group<'a> {
    /// The group's text, with no leading/trailing whitespace.
    pub text: &'a str,
    /// Its byte span in the original report.
    pub span: Range<usize>,
}

/// Splits `input` on ASCII whitespace, keeping byte spans.
#[must_use]
pub fn groups(input: &str) -> Vec<Group<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in input.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push(Group {
                    text: &input[s..i],
                    span: s..i,
                });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push(Group {
            text: &input[s..],
            span: s..input.len(),
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_tracks_spans() {
        let g = groups("METAR KDEN 121753Z");
        assert_eq!(g.len(), 3);
        assert_eq!(g[1].text, "KDEN");
        assert_eq!(&"METAR KDEN 121753Z"[g[1].span.clone()], "KDEN");
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let g = groups("A   B\tC");
        assert_eq!(g.iter().map(|x| x.text).collect::<Vec<_>>(), vec!["A", "B", "C"]);
    }
}
