//! Container encoding

use crate::preset::{Data, Preset};
use crate::{BANK_RESERVED_LEN, CHUNK_MAGIC};

/// Offset of the byte size field within a record
const BYTE_SIZE_OFFSET: usize = 4;

/// Serialize a record, recomputing every `byte_size` field
///
/// The size covers everything after the size field itself. List variants
/// write their real element count; chunk variants write the stored `count`.
pub fn encode(preset: &Preset) -> Vec<u8> {
    let mut out = Vec::new();
    write_preset(&mut out, preset);
    out
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Reserved region, zero-filled or cut to its fixed width
fn put_reserved(out: &mut Vec<u8>, reserved: &[u8]) {
    let len = reserved.len().min(BANK_RESERVED_LEN);
    out.extend_from_slice(&reserved[..len]);
    out.resize(out.len() + BANK_RESERVED_LEN - len, 0);
}

fn write_preset(out: &mut Vec<u8>, preset: &Preset) {
    let start = out.len();

    out.extend_from_slice(&CHUNK_MAGIC);
    put_u32(out, 0);
    put_u32(out, preset.kind().tag());
    put_u32(out, preset.version);
    put_u32(out, preset.fx_id);
    put_u32(out, preset.fx_version);
    put_u32(out, preset.element_count());

    match &preset.data {
        Data::Params { name, params } => {
            out.extend_from_slice(name.as_bytes());
            for value in params {
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
        Data::Chunk { name, chunk } => {
            out.extend_from_slice(name.as_bytes());
            put_u32(out, chunk.len() as u32);
            out.extend_from_slice(chunk);
        }
        Data::Bank { reserved, presets } => {
            put_reserved(out, reserved);
            for child in presets {
                write_preset(out, child);
            }
        }
        Data::BankChunk { reserved, chunk } => {
            put_reserved(out, reserved);
            put_u32(out, chunk.len() as u32);
            out.extend_from_slice(chunk);
        }
    }

    let byte_size = (out.len() - start - BYTE_SIZE_OFFSET - 4) as u32;
    out[start + BYTE_SIZE_OFFSET..start + BYTE_SIZE_OFFSET + 4]
        .copy_from_slice(&byte_size.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::{Kind, ProgramName};
    use crate::{parse, parse_prefix, HEADER_SIZE, PROGRAM_NAME_LEN};

    fn chunk_preset(name: &str, chunk: &[u8]) -> Preset {
        Preset {
            byte_size: 0,
            version: 1,
            fx_id: u32::from_be_bytes(*b"Loom"),
            fx_version: 3,
            count: 0,
            data: Data::Chunk {
                name: ProgramName::new(name),
                chunk: chunk.to_vec(),
            },
        }
    }

    #[test]
    fn test_encode_chunk_layout() {
        let bytes = encode(&chunk_preset("Init", &[1, 2, 3, 4]));

        assert_eq!(&bytes[0..4], b"CcnK");
        assert_eq!(&bytes[8..12], b"FPCh");
        assert_eq!(&bytes[16..20], b"Loom");
        assert_eq!(bytes.len(), HEADER_SIZE + PROGRAM_NAME_LEN + 4 + 4);
        // Declared size excludes magic and the size field
        assert_eq!(
            u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize,
            bytes.len() - 8
        );
        assert_eq!(&bytes[bytes.len() - 4..], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_encode_then_parse_bank() {
        let bank = Preset {
            byte_size: 0,
            version: 2,
            fx_id: u32::from_be_bytes(*b"Loom"),
            fx_version: 3,
            count: 0,
            data: Data::Bank {
                reserved: Vec::new(),
                presets: vec![chunk_preset("A", &[0xaa]), chunk_preset("B", &[0xbb; 7])],
            },
        };

        let bytes = encode(&bank);
        let (parsed, used) = parse_prefix(&bytes).unwrap();
        assert_eq!(used, bytes.len());
        assert_eq!(parsed.kind(), Kind::BankRegular);
        assert_eq!(parsed.count, 2);

        let presets = parsed.presets().unwrap();
        assert_eq!(presets[1].chunk(), Some(&[0xbb; 7][..]));
        assert_eq!(presets[1].byte_size as usize, encode(&presets[1]).len() - 8);
    }

    #[test]
    fn test_encode_params_uses_real_count() {
        let preset = Preset {
            byte_size: 0,
            version: 1,
            fx_id: 0,
            fx_version: 1,
            count: 99,
            data: Data::Params {
                name: ProgramName::new("Params"),
                params: vec![0.25, 0.75],
            },
        };

        let parsed = parse(&encode(&preset)).unwrap();
        assert_eq!(parsed.count, 2);
        assert_eq!(parsed.params(), Some(&[0.25, 0.75][..]));
    }

    #[test]
    fn test_reserved_is_fixed_width() {
        let preset = Preset {
            byte_size: 0,
            version: 1,
            fx_id: 0,
            fx_version: 1,
            count: 0,
            data: Data::BankChunk {
                reserved: vec![7; 200],
                chunk: vec![1],
            },
        };

        let bytes = encode(&preset);
        assert_eq!(bytes.len(), HEADER_SIZE + BANK_RESERVED_LEN + 4 + 1);
        match parse(&bytes).unwrap().data {
            Data::BankChunk { reserved, .. } => assert_eq!(reserved, vec![7; BANK_RESERVED_LEN]),
            other => panic!("unexpected payload {:?}", other),
        }
    }
}
