//! Reader and writer for VST 2 preset containers (`.fxp` / `.fxb`)
//!
//! Both file types share one recursive record layout. Every integer is
//! big-endian.
//!
//! # Format Overview
//!
//! - Bytes 0-3: "CcnK" magic
//! - Bytes 4-7: Byte size of the rest of the record (advisory)
//! - Bytes 8-11: Variant tag ("FxCk", "FPCh", "FxBk" or "FBCh")
//! - Bytes 12-15: Format version
//! - Bytes 16-19: Effect ID (usually a 4-char tag)
//! - Bytes 20-23: Effect version
//! - Bytes 24-27: Element count (parameters or nested presets)
//! - Bytes 28+: Variant payload
//!
//! Payloads:
//! - `FxCk`: 28-byte program name, then `count` f32 parameters
//! - `FPCh`: 28-byte program name, u32 chunk size, chunk bytes
//! - `FxBk`: 128 reserved bytes, then `count` nested records
//! - `FBCh`: 128 reserved bytes, u32 chunk size, chunk bytes

mod encode;
mod parse;
mod preset;
mod reader;
mod tag;

pub use encode::encode;
pub use parse::{parse, parse_prefix};
pub use preset::{Data, Kind, Preset, ProgramName};
pub use tag::{decode_tag, encode_tag, tag_display};

/// Magic bytes opening every record: "CcnK"
pub const CHUNK_MAGIC: [u8; 4] = *b"CcnK";

/// Fixed header size shared by all variants
pub const HEADER_SIZE: usize = 28;

/// Width of the NUL-padded program name field
pub const PROGRAM_NAME_LEN: usize = 28;

/// Width of the reserved region opening bank payloads
pub const BANK_RESERVED_LEN: usize = 128;

/// Deepest bank nesting accepted by the parser, counted in enclosing banks
pub const MAX_NESTING_DEPTH: usize = 32;

/// Errors from container parsing and tag conversion
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid tag {0:?}: must be exactly 4 characters")]
    InvalidTagLength(String),

    #[error("Invalid tag {0:?}: must be ASCII")]
    NonAsciiTag(String),

    #[error("Invalid magic: expected 'CcnK', got {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("Buffer too short at offset {offset}: need {needed} bytes, {available} available")]
    BufferTooShort {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("Banks nested deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    #[error("Unknown variant tag {}", tag_display(*.0))]
    UnknownVariantTag(u32),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Check if data starts with the container magic
pub fn is_fxp(data: &[u8]) -> bool {
    data.len() >= 4 && data[0..4] == CHUNK_MAGIC
}
