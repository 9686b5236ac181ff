//! Metadata inference from an existing `.aupreset`
//!
//! Reads the direct children of the first `<dict>` as key/value pairs. The
//! component codes are taken from the `type`, `subtype` and `manufacturer`
//! integers. The state key is a guess: the key in front of the *second*
//! `<data>` value, since hosts usually write a preset-number blob first.
//! With fewer than two data values no guess is made.

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::{info, warn};

use crate::convert::Metadata;
use crate::{Error, Result};

/// One `<key>` and the value element that follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: Option<String>,
    /// Value element name (`data`, `integer`, `string`, `dict`, ...)
    pub element: String,
    /// Text content; empty for container values
    pub text: String,
}

/// Values recovered from an example document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleMetadata {
    pub au_type: u32,
    pub subtype: u32,
    pub manufacturer: u32,
    pub state_key: Option<String>,
}

impl ExampleMetadata {
    /// Infer metadata from property list XML
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let entries = read_dict_entries(xml)?;

        let au_type = integer_value(&entries, "type")?;
        let subtype = integer_value(&entries, "subtype")?;
        let manufacturer = integer_value(&entries, "manufacturer")?;

        let state_key = entries
            .iter()
            .filter(|entry| entry.element == "data")
            .nth(1)
            .and_then(|entry| entry.key.clone());

        Ok(Self {
            au_type,
            subtype,
            manufacturer,
            state_key,
        })
    }

    /// Complete metadata with the state key chosen by the caller
    pub fn with_state_key(self, state_key: String) -> Metadata {
        Metadata {
            au_type: self.au_type,
            subtype: self.subtype,
            manufacturer: self.manufacturer,
            state_key,
        }
    }
}

/// Infer metadata from an example `.aupreset` file
pub fn infer_from_example(path: &Path) -> Result<ExampleMetadata> {
    let xml = fs::read(path)?;
    let metadata = ExampleMetadata::from_xml(&xml)?;

    match &metadata.state_key {
        Some(key) => info!("Guessing '{}' for state key, use --state-key to override", key),
        None => warn!("Couldn't infer state key from {}", path.display()),
    }

    Ok(metadata)
}

fn xml_error(err: impl std::fmt::Display) -> Error {
    Error::Xml(err.to_string())
}

/// Key/value pairs directly inside the first `<dict>`
pub fn read_dict_entries(xml: &[u8]) -> Result<Vec<Entry>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut entries = Vec::new();
    let mut pending_key: Option<String> = None;
    let mut current: Option<(String, String)> = None;
    // Depth below the first dict; 0 until it is found
    let mut depth = 0usize;

    let mut finish = |element: String, text: String| {
        if element == "key" {
            pending_key = Some(text);
        } else {
            entries.push(Entry {
                key: pending_key.take(),
                element,
                text,
            });
        }
    };

    loop {
        match reader.read_event_into(&mut buf).map_err(xml_error)? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if depth == 0 {
                    if name == "dict" {
                        depth = 1;
                    }
                } else {
                    depth += 1;
                    if depth == 2 {
                        current = Some((name, String::new()));
                    }
                }
            }
            Event::Empty(e) => {
                if depth == 1 {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    finish(name, String::new());
                }
            }
            Event::Text(e) => {
                if depth == 2 {
                    if let Some((_, text)) = current.as_mut() {
                        text.push_str(&e.unescape().map_err(xml_error)?);
                    }
                }
            }
            Event::End(_) => {
                if depth == 2 {
                    if let Some((name, text)) = current.take() {
                        finish(name, text);
                    }
                }
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

fn integer_value(entries: &[Entry], key: &'static str) -> Result<u32> {
    let entry = entries
        .iter()
        .find(|entry| entry.key.as_deref() == Some(key))
        .ok_or(Error::MissingMetadata(key))?;

    let invalid = || Error::InvalidInteger {
        key,
        value: entry.text.clone(),
    };

    if entry.element != "integer" {
        return Err(invalid());
    }

    // Codes with the top bit set may have been written as signed 32-bit
    let value: i64 = entry.text.trim().parse().map_err(|_| invalid())?;
    if let Ok(unsigned) = u32::try_from(value) {
        Ok(unsigned)
    } else if let Ok(signed) = i32::try_from(value) {
        Ok(signed as u32)
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const EXAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>AU version</key>
	<real>1</real>
	<key>data</key>
	<data>
	AAAAAA==
	</data>
	<key>element-name</key>
	<dict>
		<key>nested</key>
		<data>AQ==</data>
	</dict>
	<key>manufacturer</key>
	<integer>1282371437</integer>
	<key>name</key>
	<string>Factory &amp; Default</string>
	<key>pluginState</key>
	<data>
	AQIDBA==
	</data>
	<key>subtype</key>
	<integer>1282371442</integer>
	<key>type</key>
	<integer>1635085685</integer>
	<key>version</key>
	<integer>0</integer>
	<key>enabled</key>
	<true/>
</dict>
</plist>
"#;

    #[test]
    fn test_infers_codes_and_state_key() {
        let metadata = ExampleMetadata::from_xml(EXAMPLE.as_bytes()).unwrap();
        assert_eq!(metadata.au_type, fxp::encode_tag("aumu").unwrap());
        assert_eq!(metadata.manufacturer, 1282371437);
        assert_eq!(metadata.subtype, 1282371442);
        assert_eq!(metadata.state_key.as_deref(), Some("pluginState"));
    }

    #[test]
    fn test_reads_only_top_level_entries() {
        let entries = read_dict_entries(EXAMPLE.as_bytes()).unwrap();
        let keys: Vec<_> = entries.iter().filter_map(|e| e.key.as_deref()).collect();
        assert_eq!(
            keys,
            [
                "AU version",
                "data",
                "element-name",
                "manufacturer",
                "name",
                "pluginState",
                "subtype",
                "type",
                "version",
                "enabled"
            ]
        );

        let name = entries.iter().find(|e| e.key.as_deref() == Some("name")).unwrap();
        assert_eq!(name.text, "Factory & Default");

        let enabled = entries.last().unwrap();
        assert_eq!(enabled.element, "true");
    }

    #[test]
    fn test_single_data_entry_gives_no_state_key() {
        let xml = r#"<plist version="1.0"><dict>
            <key>jucePluginState</key><data>AQIDBA==</data>
            <key>manufacturer</key><integer>1</integer>
            <key>subtype</key><integer>2</integer>
            <key>type</key><integer>3</integer>
        </dict></plist>"#;

        let metadata = ExampleMetadata::from_xml(xml.as_bytes()).unwrap();
        assert_eq!(metadata.state_key, None);

        let resolved = metadata.with_state_key("jucePluginState".into());
        assert_eq!(resolved.state_key, "jucePluginState");
        assert_eq!((resolved.au_type, resolved.subtype, resolved.manufacturer), (3, 2, 1));
    }

    #[test]
    fn test_missing_type() {
        let xml = r#"<plist><dict><key>subtype</key><integer>2</integer></dict></plist>"#;
        assert!(matches!(
            ExampleMetadata::from_xml(xml.as_bytes()),
            Err(Error::MissingMetadata("type"))
        ));
    }

    #[test]
    fn test_negative_codes_wrap() {
        let xml = r#"<plist><dict>
            <key>type</key><integer>-1</integer>
            <key>subtype</key><integer>4294967295</integer>
            <key>manufacturer</key><integer>7</integer>
        </dict></plist>"#;

        let metadata = ExampleMetadata::from_xml(xml.as_bytes()).unwrap();
        assert_eq!(metadata.au_type, u32::MAX);
        assert_eq!(metadata.subtype, u32::MAX);
    }

    #[test]
    fn test_non_integer_code() {
        let xml = r#"<plist><dict>
            <key>type</key><string>aufx</string>
            <key>subtype</key><integer>2</integer>
            <key>manufacturer</key><integer>7</integer>
        </dict></plist>"#;

        assert!(matches!(
            ExampleMetadata::from_xml(xml.as_bytes()),
            Err(Error::InvalidInteger { key: "type", .. })
        ));
    }

    #[test]
    fn test_infer_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(EXAMPLE.as_bytes()).unwrap();

        let metadata = infer_from_example(file.path()).unwrap();
        assert_eq!(metadata.state_key.as_deref(), Some("pluginState"));
    }

    #[test]
    fn test_infer_missing_file() {
        assert!(matches!(
            infer_from_example(Path::new("/nonexistent/example.aupreset")),
            Err(Error::Io(_))
        ));
    }
}
