//! Opaque chunk preset to `.aupreset` conversion

use base64::prelude::*;
use fxp::{Data, Preset};

use crate::document::Document;
use crate::{Error, Result};

/// Audio Unit component codes plus the key that holds the plugin state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub au_type: u32,
    pub subtype: u32,
    pub manufacturer: u32,
    pub state_key: String,
}

impl Metadata {
    /// Build from 4-character codes such as `"aufx"`
    pub fn from_codes(
        au_type: &str,
        subtype: &str,
        manufacturer: &str,
        state_key: &str,
    ) -> Result<Self> {
        Ok(Self {
            au_type: fxp::encode_tag(au_type)?,
            subtype: fxp::encode_tag(subtype)?,
            manufacturer: fxp::encode_tag(manufacturer)?,
            state_key: state_key.to_string(),
        })
    }
}

/// Build the document for an opaque chunk preset
///
/// Every other variant is refused with [`Error::UnsupportedVariant`]; callers
/// treat that as a skip rather than a failure.
pub fn convert(preset: &Preset, name: &str, metadata: &Metadata) -> Result<Document> {
    let chunk = match &preset.data {
        Data::Chunk { chunk, .. } => chunk,
        Data::Params { .. } | Data::Bank { .. } | Data::BankChunk { .. } => {
            return Err(Error::UnsupportedVariant(preset.kind()));
        }
    };

    Ok(Document {
        state_key: metadata.state_key.clone(),
        state: BASE64_STANDARD.encode(chunk),
        manufacturer: metadata.manufacturer,
        name: name.to_string(),
        subtype: metadata.subtype,
        au_type: metadata.au_type,
    })
}
