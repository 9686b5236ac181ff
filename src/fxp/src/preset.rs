//! Parsed container records

use std::borrow::Cow;
use std::fmt;

use crate::tag::tag_display;
use crate::PROGRAM_NAME_LEN;

/// Record variant, selected by the 4-byte tag at offset 8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `FxCk`: one program stored as a list of float parameters
    SinglePresetParams,
    /// `FPCh`: one program stored as an opaque plugin chunk
    SinglePresetOpaqueChunk,
    /// `FxBk`: a bank of nested program records
    BankRegular,
    /// `FBCh`: a whole bank stored as an opaque plugin chunk
    BankOpaqueChunk,
}

impl Kind {
    pub const ALL: [Kind; 4] = [
        Kind::SinglePresetParams,
        Kind::SinglePresetOpaqueChunk,
        Kind::BankRegular,
        Kind::BankOpaqueChunk,
    ];

    /// The 4-byte tag as stored in the file
    pub fn magic(&self) -> [u8; 4] {
        match self {
            Kind::SinglePresetParams => *b"FxCk",
            Kind::SinglePresetOpaqueChunk => *b"FPCh",
            Kind::BankRegular => *b"FxBk",
            Kind::BankOpaqueChunk => *b"FBCh",
        }
    }

    /// The tag as a big-endian integer
    pub fn tag(&self) -> u32 {
        u32::from_be_bytes(self.magic())
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// Name used in the VST SDK headers
    pub fn name(&self) -> &'static str {
        match self {
            Kind::SinglePresetParams => "FXP_PARAMS",
            Kind::SinglePresetOpaqueChunk => "FXP_OPAQUE_CHUNK",
            Kind::BankRegular => "FXB_REGULAR",
            Kind::BankOpaqueChunk => "FXB_OPAQUE_CHUNK",
        }
    }

    pub fn is_bank(&self) -> bool {
        matches!(self, Kind::BankRegular | Kind::BankOpaqueChunk)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed-width, NUL-padded program name
///
/// The raw 28 bytes are kept so that encoding reproduces the field exactly.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ProgramName([u8; PROGRAM_NAME_LEN]);

impl ProgramName {
    pub fn from_bytes(raw: [u8; PROGRAM_NAME_LEN]) -> Self {
        Self(raw)
    }

    /// Build a name from text, truncating to 28 bytes
    pub fn new(text: &str) -> Self {
        let mut raw = [0u8; PROGRAM_NAME_LEN];
        let len = text.len().min(PROGRAM_NAME_LEN);
        raw[..len].copy_from_slice(&text.as_bytes()[..len]);
        Self(raw)
    }

    pub fn as_bytes(&self) -> &[u8; PROGRAM_NAME_LEN] {
        &self.0
    }

    /// Name text with trailing NUL padding removed
    pub fn as_str(&self) -> Cow<'_, str> {
        let end = self
            .0
            .iter()
            .rposition(|&b| b != 0)
            .map(|p| p + 1)
            .unwrap_or(0);
        String::from_utf8_lossy(&self.0[..end])
    }
}

impl Default for ProgramName {
    fn default() -> Self {
        Self([0u8; PROGRAM_NAME_LEN])
    }
}

impl fmt::Debug for ProgramName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramName({:?})", self.as_str())
    }
}

/// Variant payload
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Params {
        name: ProgramName,
        params: Vec<f32>,
    },
    Chunk {
        name: ProgramName,
        chunk: Vec<u8>,
    },
    Bank {
        reserved: Vec<u8>,
        presets: Vec<Preset>,
    },
    BankChunk {
        reserved: Vec<u8>,
        chunk: Vec<u8>,
    },
}

/// One container record; banks own their nested records
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Declared size of everything after the size field (not validated)
    pub byte_size: u32,
    /// Format version
    pub version: u32,
    /// Effect unique ID
    pub fx_id: u32,
    /// Effect version
    pub fx_version: u32,
    /// Element count as stored: parameter count, preset count, or
    /// whatever the plugin wrote for chunk variants
    pub count: u32,
    pub data: Data,
}

impl Preset {
    pub fn kind(&self) -> Kind {
        match self.data {
            Data::Params { .. } => Kind::SinglePresetParams,
            Data::Chunk { .. } => Kind::SinglePresetOpaqueChunk,
            Data::Bank { .. } => Kind::BankRegular,
            Data::BankChunk { .. } => Kind::BankOpaqueChunk,
        }
    }

    /// Program name for single-preset variants
    pub fn program_name(&self) -> Option<&ProgramName> {
        match &self.data {
            Data::Params { name, .. } | Data::Chunk { name, .. } => Some(name),
            Data::Bank { .. } | Data::BankChunk { .. } => None,
        }
    }

    /// Opaque chunk bytes, for either chunk variant
    pub fn chunk(&self) -> Option<&[u8]> {
        match &self.data {
            Data::Chunk { chunk, .. } | Data::BankChunk { chunk, .. } => Some(chunk),
            Data::Params { .. } | Data::Bank { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&[f32]> {
        match &self.data {
            Data::Params { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Nested records of a regular bank
    pub fn presets(&self) -> Option<&[Preset]> {
        match &self.data {
            Data::Bank { presets, .. } => Some(presets),
            _ => None,
        }
    }

    /// Effect ID rendered as a 4-char tag where possible
    pub fn fx_id_display(&self) -> String {
        tag_display(self.fx_id)
    }

    /// Count written by the encoder: the real length for list variants
    pub fn element_count(&self) -> u32 {
        match &self.data {
            Data::Params { params, .. } => params.len() as u32,
            Data::Bank { presets, .. } => presets.len() as u32,
            Data::Chunk { .. } | Data::BankChunk { .. } => self.count,
        }
    }
}
