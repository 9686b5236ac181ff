//! Container decoding
//!
//! Each payload variant has its own decode function; every read goes through
//! [`Reader`], which checks bounds before consuming anything. Regular banks
//! recurse through the same reader, at most [`MAX_NESTING_DEPTH`] levels deep.

use crate::preset::{Data, Kind, Preset, ProgramName};
use crate::reader::Reader;
use crate::{
    Error, Result, BANK_RESERVED_LEN, CHUNK_MAGIC, HEADER_SIZE, MAX_NESTING_DEPTH, PROGRAM_NAME_LEN,
};

/// Parse a record starting at offset 0
///
/// Bytes after the record are ignored; use [`parse_prefix`] to learn how
/// many were consumed.
pub fn parse(data: &[u8]) -> Result<Preset> {
    parse_prefix(data).map(|(preset, _)| preset)
}

/// Parse a record and return it with the number of bytes it occupied
pub fn parse_prefix(data: &[u8]) -> Result<(Preset, usize)> {
    let mut reader = Reader::new(data);
    let preset = read_preset(&mut reader, 0)?;
    Ok((preset, reader.position()))
}

/// `depth` counts the banks enclosing this record
fn read_preset(reader: &mut Reader<'_>, depth: usize) -> Result<Preset> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::NestingTooDeep {
            offset: reader.position(),
            limit: MAX_NESTING_DEPTH,
        });
    }

    let magic: [u8; 4] = reader.read_array()?;
    if magic != CHUNK_MAGIC {
        return Err(Error::BadMagic(magic));
    }

    let byte_size = reader.read_u32()?;
    let tag = reader.read_u32()?;
    let kind = Kind::from_tag(tag).ok_or(Error::UnknownVariantTag(tag))?;
    let version = reader.read_u32()?;
    let fx_id = reader.read_u32()?;
    let fx_version = reader.read_u32()?;
    let count = reader.read_u32()?;

    let data = match kind {
        Kind::SinglePresetParams => read_params(reader, count)?,
        Kind::SinglePresetOpaqueChunk => read_chunk(reader)?,
        Kind::BankRegular => read_bank(reader, count, depth)?,
        Kind::BankOpaqueChunk => read_bank_chunk(reader)?,
    };

    Ok(Preset {
        byte_size,
        version,
        fx_id,
        fx_version,
        count,
        data,
    })
}

fn read_program_name(reader: &mut Reader<'_>) -> Result<ProgramName> {
    Ok(ProgramName::from_bytes(reader.read_array::<PROGRAM_NAME_LEN>()?))
}

/// u32 length prefix followed by that many raw bytes
fn read_sized_chunk(reader: &mut Reader<'_>) -> Result<Vec<u8>> {
    let size = reader.read_u32()? as usize;
    Ok(reader.take(size)?.to_vec())
}

fn read_params(reader: &mut Reader<'_>, count: u32) -> Result<Data> {
    let name = read_program_name(reader)?;
    reader.ensure_elements(count, 4)?;

    let params = (0..count)
        .map(|_| reader.read_f32())
        .collect::<Result<Vec<_>>>()?;

    Ok(Data::Params { name, params })
}

fn read_chunk(reader: &mut Reader<'_>) -> Result<Data> {
    let name = read_program_name(reader)?;
    let chunk = read_sized_chunk(reader)?;
    Ok(Data::Chunk { name, chunk })
}

fn read_bank(reader: &mut Reader<'_>, count: u32, depth: usize) -> Result<Data> {
    let reserved = reader.take(BANK_RESERVED_LEN)?.to_vec();

    // Every nested record needs at least a header; reject impossible counts
    // before allocating for them.
    reader.ensure_elements(count, HEADER_SIZE)?;

    let mut presets = Vec::with_capacity(count as usize);
    for _ in 0..count {
        presets.push(read_preset(reader, depth + 1)?);
    }

    Ok(Data::Bank { reserved, presets })
}

fn read_bank_chunk(reader: &mut Reader<'_>) -> Result<Data> {
    let reserved = reader.take(BANK_RESERVED_LEN)?.to_vec();
    let chunk = read_sized_chunk(reader)?;
    Ok(Data::BankChunk { reserved, chunk })
}
