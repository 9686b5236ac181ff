//! Property list XML output

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{Document, Value};
use crate::{Error, Result};

const PLIST_DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

struct PlistWriter {
    inner: Writer<Vec<u8>>,
}

impl PlistWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b'\t', 1),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Xml(e.to_string()))
    }

    fn start(&mut self, start: BytesStart<'_>) -> Result<()> {
        self.event(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>`, escaping the text
    fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(BytesStart::new(name))?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        let mut out = self.inner.into_inner();
        out.push(b'\n');
        out
    }
}

/// Serialize a document as UTF-8 property list XML
///
/// Entries are written in [`Document::entries`] order. No validation happens
/// here.
pub fn to_xml(document: &Document) -> Result<Vec<u8>> {
    let mut writer = PlistWriter::new();

    writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))?;
    writer.start(BytesStart::new("plist").with_attributes([("version", "1.0")]))?;
    writer.start(BytesStart::new("dict"))?;

    for (key, value) in document.entries() {
        writer.text_element("key", key)?;
        match value {
            Value::Data(text) | Value::String(text) => {
                writer.text_element(value.element(), text)?
            }
            Value::Integer(number) => {
                writer.text_element(value.element(), &number.to_string())?
            }
        }
    }

    writer.end("dict")?;
    writer.end("plist")?;

    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert, Metadata};
    use fxp::{Data, Preset, ProgramName};

    fn document(name: &str) -> Document {
        let preset = Preset {
            byte_size: 0,
            version: 1,
            fx_id: 0,
            fx_version: 1,
            count: 0,
            data: Data::Chunk {
                name: ProgramName::new(name),
                chunk: vec![0x01, 0x02, 0x03, 0x04],
            },
        };
        let metadata = Metadata::from_codes("aufx", "WXYZ", "ABCD", "jucePluginState").unwrap();
        convert(&preset, name, &metadata).unwrap()
    }

    fn xml(document: &Document) -> String {
        String::from_utf8(to_xml(document).unwrap()).unwrap()
    }

    #[test]
    fn test_header() {
        let text = xml(&document("MyPreset"));
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains(
            r#"<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">"#
        ));
        assert!(text.contains(r#"<plist version="1.0">"#));
        assert!(text.trim_end().ends_with("</plist>"));
    }

    #[test]
    fn test_entries_in_order() {
        let text = xml(&document("MyPreset"));
        let manufacturer = fxp::encode_tag("ABCD").unwrap();

        let expected = [
            "<key>jucePluginState</key>".to_string(),
            "<data>AQIDBA==</data>".to_string(),
            "<key>manufacturer</key>".to_string(),
            format!("<integer>{}</integer>", manufacturer),
            "<key>name</key>".to_string(),
            "<string>MyPreset</string>".to_string(),
            "<key>subtype</key>".to_string(),
            format!("<integer>{}</integer>", fxp::encode_tag("WXYZ").unwrap()),
            "<key>type</key>".to_string(),
            format!("<integer>{}</integer>", fxp::encode_tag("aufx").unwrap()),
            "<key>version</key>".to_string(),
            "<integer>0</integer>".to_string(),
        ];

        let mut cursor = 0;
        for fragment in &expected {
            let found = text[cursor..]
                .find(fragment.as_str())
                .unwrap_or_else(|| panic!("{} missing or out of order in\n{}", fragment, text));
            cursor += found + fragment.len();
        }
    }

    #[test]
    fn test_name_is_escaped() {
        let text = xml(&document("Bass & <Drums>"));
        assert!(text.contains("<string>Bass &amp; &lt;Drums&gt;</string>"));
    }

    #[test]
    fn test_output_reads_back_as_example() {
        let bytes = to_xml(&document("MyPreset")).unwrap();
        let example = crate::example::ExampleMetadata::from_xml(&bytes).unwrap();
        assert_eq!(example.au_type, fxp::encode_tag("aufx").unwrap());
        assert_eq!(example.manufacturer, fxp::encode_tag("ABCD").unwrap());
        // Only one data entry, so no state key can be guessed
        assert_eq!(example.state_key, None);
    }
}
