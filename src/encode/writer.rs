//! The indented XML writer (§6 "Output XML document", §9's re-architecture
//! note: "pretty-printing via temp files and shell-like piping" → a
//! streaming indented writer). Wraps `quick_xml::Writer` directly rather
//! than building a DOM, matching the encoder's single-pass walk of the
//! observation record.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::EncodeError;

/// One XML attribute, written in the order given.
pub type Attr<'a> = (&'a str, &'a str);

/// A streaming, indented XML document writer.
pub struct XmlWriter {
    inner: Writer<Cursor<Vec<u8>>>,
}

impl XmlWriter {
    /// A writer with a 2-space indent, matching the pack's formatting
    /// conventions for generated XML.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
        }
    }

    /// Writes the `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn declaration(&mut self) -> Result<(), EncodeError> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// An optional debug comment embedding the original and unparsed TAC
    /// text (§6: "Optional debug comment may embed `ORIG_TAC='...'` and
    /// `UNPARSED_TAC='...'` markers").
    pub fn debug_comment(&mut self, orig_tac: &str, unparsed_tac: &str) -> Result<(), EncodeError> {
        let comment = format!(" ORIG_TAC='{orig_tac}' UNPARSED_TAC='{unparsed_tac}' ");
        self.inner.write_event(Event::Comment(BytesText::new(&comment)))?;
        Ok(())
    }

    /// Opens an element with the given attributes.
    pub fn start(&mut self, name: &str, attrs: &[Attr<'_>]) -> Result<(), EncodeError> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(elem))?;
        Ok(())
    }

    /// Closes an element opened with [`Self::start`].
    pub fn end(&mut self, name: &str) -> Result<(), EncodeError> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// A self-closing element with no content.
    pub fn empty(&mut self, name: &str, attrs: &[Attr<'_>]) -> Result<(), EncodeError> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Empty(elem))?;
        Ok(())
    }

    /// A `xsi:nil="true"` empty element, with an optional `nilReason`.
    pub fn nil(&mut self, name: &str, nil_reason: Option<&str>) -> Result<(), EncodeError> {
        let mut attrs = vec![("xsi:nil", "true")];
        if let Some(reason) = nil_reason {
            attrs.push(("nilReason", reason));
        }
        self.empty(name, &attrs)
    }

    /// Text content, escaped automatically.
    pub fn text(&mut self, content: &str) -> Result<(), EncodeError> {
        self.inner.write_event(Event::Text(BytesText::new(content)))?;
        Ok(())
    }

    /// Convenience: a leaf element consisting of a single text node.
    pub fn leaf(&mut self, name: &str, attrs: &[Attr<'_>], content: &str) -> Result<(), EncodeError> {
        self.start(name, attrs)?;
        self.text(content)?;
        self.end(name)
    }

    /// Finishes writing and returns the serialized UTF-8 document.
    #[must_use]
    pub fn finish(self) -> String {
        let bytes = self.inner.into_inner().into_inner();
        String::from_utf8(bytes).unwrap_or_default()
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}
