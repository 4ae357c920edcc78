//! Job arguments supplied by the host for a single invocation.

use std::collections::HashMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::ParamsError;

/// Name of the argument carrying the record's primary-key value.
pub const ID_ARG: &str = "id";

/// Arguments of one job invocation.
///
/// The host hands these over as an XML fragment such as
/// `<params><id>42</id></params>`. Every child element of `<params>` becomes
/// an argument; only [`ID_ARG`] is consumed by the indexer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobArgs {
    args: HashMap<String, String>,
}

impl JobArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create arguments carrying only the record id.
    pub fn with_id(id: impl Into<String>) -> Self {
        let mut args = Self::new();
        args.insert(ID_ARG, id);
        args
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.args.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.args.get(name).map(String::as_str)
    }

    /// The record id, if present and not blank.
    pub fn id(&self) -> Option<&str> {
        self.get(ID_ARG).map(str::trim).filter(|id| !id.is_empty())
    }

    /// Parse the host's `<params>` fragment.
    ///
    /// Text content is unescaped and trimmed. Nested elements below the
    /// second level are ignored; an empty element yields an empty value.
    pub fn from_xml(xml: &str) -> Result<Self, ParamsError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut args = Self::new();
        let mut depth = 0usize;
        let mut current: Option<String> = None;
        let mut text = String::new();
        let mut saw_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    depth += 1;
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match depth {
                        1 => {
                            if name != "params" {
                                return Err(ParamsError::UnexpectedRoot(name));
                            }
                            saw_root = true;
                        }
                        2 => {
                            current = Some(name);
                            text.clear();
                        }
                        _ => {}
                    }
                }
                Ok(Event::Empty(e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    match depth {
                        0 if name == "params" => saw_root = true,
                        0 => return Err(ParamsError::UnexpectedRoot(name)),
                        1 => args.insert(name, String::new()),
                        _ => {}
                    }
                }
                Ok(Event::Text(t)) if depth == 2 => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| ParamsError::malformed(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Ok(Event::CData(c)) if depth == 2 => {
                    text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                }
                Ok(Event::End(_)) => {
                    if depth == 2 {
                        if let Some(name) = current.take() {
                            args.insert(name, std::mem::take(&mut text));
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ParamsError::malformed(format!(
                        "at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
            }
        }

        if !saw_root {
            return Err(ParamsError::malformed("no <params> element"));
        }
        if depth != 0 {
            return Err(ParamsError::malformed("unclosed element"));
        }

        Ok(args)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for JobArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut args = JobArgs::new();
        for (name, value) in iter {
            args.insert(name, value);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let args = JobArgs::from_xml("<params><id>42</id></params>").unwrap();
        assert_eq!(args.id(), Some("42"));
    }

    #[test]
    fn test_parse_keeps_other_arguments() {
        let args =
            JobArgs::from_xml("<params>\n  <id> 7 </id>\n  <source>cron</source>\n</params>")
                .unwrap();

        assert_eq!(args.id(), Some("7"));
        assert_eq!(args.get("source"), Some("cron"));
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let args = JobArgs::from_xml("<params><id>a&amp;b</id></params>").unwrap();
        assert_eq!(args.id(), Some("a&b"));
    }

    #[test]
    fn test_parse_cdata() {
        let args = JobArgs::from_xml("<params><id><![CDATA[x<y]]></id></params>").unwrap();
        assert_eq!(args.id(), Some("x<y"));
    }

    #[test]
    fn test_missing_id() {
        let args = JobArgs::from_xml("<params><other>1</other></params>").unwrap();
        assert_eq!(args.id(), None);

        let args = JobArgs::from_xml("<params/>").unwrap();
        assert_eq!(args.id(), None);
    }

    #[test]
    fn test_blank_id_is_missing() {
        let args = JobArgs::from_xml("<params><id></id></params>").unwrap();
        assert_eq!(args.id(), None);

        let args = JobArgs::with_id("   ");
        assert_eq!(args.id(), None);
    }

    #[test]
    fn test_wrong_root() {
        let err = JobArgs::from_xml("<job><id>1</id></job>").unwrap_err();
        assert_eq!(err, ParamsError::UnexpectedRoot("job".to_string()));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            JobArgs::from_xml("<params><id>1</name></params>"),
            Err(ParamsError::Malformed(_))
        ));
        assert!(matches!(
            JobArgs::from_xml(""),
            Err(ParamsError::Malformed(_))
        ));
    }
}
