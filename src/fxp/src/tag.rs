//! Four-character tags and their big-endian integer form

use crate::{Error, Result};

/// Convert a 4-character code to its big-endian integer
///
/// `"aufx"` becomes `0x61756678`. The same mapping is used for the
/// container's variant tags and for Audio Unit type codes.
pub fn encode_tag(text: &str) -> Result<u32> {
    if text.chars().count() != 4 {
        return Err(Error::InvalidTagLength(text.to_string()));
    }
    if !text.is_ascii() {
        return Err(Error::NonAsciiTag(text.to_string()));
    }

    let bytes = text.as_bytes();
    Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Convert a tag back to text if all four bytes are printable ASCII
pub fn decode_tag(tag: u32) -> Option<String> {
    let bytes = tag.to_be_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
        Some(bytes.iter().map(|&b| b as char).collect())
    } else {
        None
    }
}

/// Render a tag for humans: the 4-char text when printable, hex otherwise
pub fn tag_display(tag: u32) -> String {
    decode_tag(tag)
        .map(|text| format!("'{}'", text))
        .unwrap_or_else(|| format!("0x{:08x}", tag))
}
