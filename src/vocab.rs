//! Controlled-vocabulary lookup (§6): present-weather/sensor-status/cloud
//! codes → canonical URI and title. The loader itself is out of scope
//! (§1); this crate carries only the narrow trait the encoder needs and a
//! reference SKOS-XML-backed implementation.

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// A resolved controlled-vocabulary term.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct VocabularyTerm {
    /// The concept's canonical URI (the SKOS `rdf:about` value).
    pub uri: String,
    /// The concept's display title.
    pub title: String,
}

/// Resolves vocabulary codes (e.g. `+TSRA`) to their canonical term.
/// Implementations are read-only after construction (§5).
pub trait VocabularyResolver {
    /// Looks up a code exactly as it appears in the TAC lexeme.
    fn resolve(&self, code: &str) -> Option<&VocabularyTerm>;
}

/// A reference [`VocabularyResolver`] backed by the SKOS XML format from
/// §6: each `Concept` element carries an `rdf:about` URI whose last path
/// segment is the lookup key, and whose title is the first child
/// element's text content.
#[derive(Default, Debug, Clone)]
pub struct SkosVocabulary {
    terms: HashMap<String, VocabularyTerm>,
}

impl SkosVocabulary {
    /// Loads vocabulary terms from a reader over the SKOS XML document.
    /// Malformed or keyless concepts are skipped with a `tracing::warn!`.
    pub fn load(reader: impl BufRead) -> Result<Self, quick_xml::Error> {
        let mut xml = Reader::from_reader(reader);
        xml.trim_text(true);

        let mut terms = HashMap::new();
        let mut current_uri: Option<String> = None;
        let mut awaiting_title = false;
        let mut buf = Vec::new();

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Start(e) if local_name(&e.name().into_inner()) == "Concept" => {
                    current_uri = e
                        .attributes()
                        .flatten()
                        .find(|a| local_name(a.key.into_inner()) == "about")
                        .and_then(|a| String::from_utf8(a.value.into_owned()).ok());
                    awaiting_title = false;
                }
                Event::Start(e) if current_uri.is_some() && !awaiting_title => {
                    awaiting_title = true;
                    let _ = e;
                }
                Event::Text(t) if awaiting_title => {
                    if let Some(uri) = current_uri.take() {
                        let title = t.unescape().unwrap_or_default().trim().to_string();
                        if let Some(key) = uri.rsplit('/').next() {
                            terms.insert(key.to_string(), VocabularyTerm { uri, title });
                        } else {
                            tracing::warn!(%uri, "skipping vocabulary concept with no path segment");
                        }
                    }
                    awaiting_title = false;
                }
                Event::End(e) if local_name(&e.name().into_inner()) == "Concept" => {
                    current_uri = None;
                    awaiting_title = false;
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        tracing::debug!(count = terms.len(), "loaded vocabulary terms");
        Ok(Self { terms })
    }
}

fn local_name(qname: &[u8]) -> &str {
    let s = std::str::from_utf8(qname).unwrap_or("");
    s.rsplit(':').next().unwrap_or(s)
}

impl VocabularyResolver for SkosVocabulary {
    fn resolve(&self, code: &str) -> Option<&VocabularyTerm> {
        self.terms.get(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn resolves_term_by_uri_last_segment() {
        let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:skos="http://www.w3.org/2004/02/skos/core#">
            <skos:Concept rdf:about="http://codes.wmo.int/306/WxCode/+TSRA">
                <skos:prefLabel>Thunderstorm with heavy rain</skos:prefLabel>
            </skos:Concept>
        </rdf:RDF>"#;
        let vocab = SkosVocabulary::load(Cursor::new(xml)).unwrap();
        let term = vocab.resolve("+TSRA").unwrap();
        assert_eq!(term.title, "Thunderstorm with heavy rain");
    }
}
