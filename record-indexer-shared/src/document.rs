//! The encoded payload sent to the index server.

/// A Solr XML `<add>` document, UTF-8 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDocument {
    body: String,
}

impl IndexDocument {
    /// Wrap already-encoded XML text.
    pub fn from_xml(body: String) -> Self {
        Self { body }
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.body.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
