//! Document encoder implementation.
//!
//! Transforms a fetched Record into a Solr XML add document.

use std::borrow::Cow;

use quick_xml::escape::escape;
use tracing::{debug, instrument};

use record_indexer_shared::{IndexDocument, Record};

/// Encoder that turns records into Solr `<add>` documents.
///
/// The output has the shape
/// `<add><doc><field name="column">value</field>...</doc></add>`, one field
/// per column. Column names and values are XML-escaped, NULL becomes empty
/// text, and characters XML 1.0 cannot represent at all (most C0 control
/// characters, U+FFFE, U+FFFF) are stripped. Encoding never fails.
pub struct DocumentEncoder {}

impl DocumentEncoder {
    /// Create a new document encoder.
    pub fn new() -> Self {
        Self {}
    }

    /// Encode a record.
    ///
    /// # Arguments
    ///
    /// * `record` - The fetched row
    ///
    /// # Returns
    ///
    /// The UTF-8 XML document ready for submission.
    #[instrument(skip(self, record), fields(field_count = record.len()))]
    pub fn encode(&self, record: &Record) -> IndexDocument {
        let mut xml = String::from("<add><doc>");

        for (name, value) in record.iter() {
            xml.push_str("<field name=\"");
            push_escaped(&mut xml, name, true);
            xml.push_str("\">");
            push_escaped(&mut xml, value.unwrap_or_default(), false);
            xml.push_str("</field>");
        }

        xml.push_str("</doc></add>");

        debug!(bytes = xml.len(), "Encoded document");
        IndexDocument::from_xml(xml)
    }
}

impl Default for DocumentEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape `text` so that a conforming parser reads back exactly the legal
/// characters of the input.
///
/// Parsers fold a raw CR into LF everywhere, and attribute normalization
/// turns raw tab, LF and CR into spaces, so those are written as character
/// references.
fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    let cleaned: Cow<'_, str> = if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
    };

    for c in escape(cleaned.as_ref()).chars() {
        match c {
            '\r' => out.push_str("&#13;"),
            '\n' if attribute => out.push_str("&#10;"),
            '\t' if attribute => out.push_str("&#9;"),
            c => out.push(c),
        }
    }
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}
