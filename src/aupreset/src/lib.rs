//! Audio Unit `.aupreset` documents built from VST 2 opaque chunks
//!
//! An `.aupreset` is an XML property list. The documents produced here carry
//! the plugin's chunk as base64 `<data>` under a plugin-specific state key,
//! plus the Audio Unit component codes:
//!
//! ```text
//! <stateKey>      data     base64 of the .fxp chunk
//! manufacturer    integer  4-char code as big-endian u32
//! name            string   preset name
//! subtype         integer
//! type            integer
//! version         integer  always 0
//! ```
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("Lead.fxp")?;
//! let preset = fxp::parse(&bytes)?;
//!
//! let metadata = aupreset::Metadata::from_codes("aumu", "Lead", "Acme", "jucePluginState")?;
//! let document = aupreset::convert(&preset, "Lead", &metadata)?;
//! std::fs::write("Lead.aupreset", aupreset::to_xml(&document)?)?;
//! # Ok(())
//! # }
//! ```

mod convert;
mod document;
pub mod example;
mod plist;

pub use convert::{convert, Metadata};
pub use document::{Document, Value};
pub use example::{infer_from_example, ExampleMetadata};
pub use plist::to_xml;

/// File extension of the produced documents
pub const AUPRESET_EXTENSION: &str = "aupreset";

/// Errors from conversion, serialization and example inference
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] fxp::Error),

    #[error("{0} preset can not be converted; only opaque chunk presets (FPCh) are supported")]
    UnsupportedVariant(fxp::Kind),

    #[error("Missing {0}")]
    MissingMetadata(&'static str),

    #[error("Invalid integer for '{key}': {value:?}")]
    InvalidInteger { key: &'static str, value: String },

    #[error("XML error: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
