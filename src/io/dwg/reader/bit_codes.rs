//! Prefix-coded scalars (BS, BL, BD, DD) and variable text (TV).
//!
//! Each value starts with a 2-bit code selecting one of four encodings, so
//! the common values 0, 1 and small integers cost only a few bits. Reads are
//! transactional: on failure the cursor is left where it was.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{bit_double, bit_double_with_default, bit_long, bit_short};

use super::bit_ops::{
    read_2bits, read_bytes, read_raw_char, read_raw_double, read_raw_long, read_raw_short,
    read_shifted_into,
};

use encoding_rs::Encoding;
use tracing::debug;

/// **BS** - Read a BitShort.
///
/// | code | data                | value                |
/// |------|---------------------|----------------------|
/// | 00   | raw short (16 bits) | the short            |
/// | 01   | raw char (8 bits)   | the char, unsigned   |
/// | 10   | none                | 0                    |
/// | 11   | none                | 256                  |
pub fn read_bit_short(data: &[u8], cursor: &mut usize) -> Result<i16> {
    let mut pos = *cursor;
    let value = match read_2bits(data, &mut pos)? {
        bit_short::NORMAL => read_raw_short(data, &mut pos)?,
        bit_short::UNSIGNED_CHAR => read_raw_char(data, &mut pos)? as i16,
        bit_short::ZERO_VALUE => 0,
        _ => 256,
    };
    *cursor = pos;
    Ok(value)
}

/// **BL** - Read a BitLong.
///
/// Code 11 is not used by the format; it is reported as
/// [`DwgError::InvalidPrefixCode`] rather than decoded as a placeholder.
pub fn read_bit_long(data: &[u8], cursor: &mut usize) -> Result<i32> {
    let mut pos = *cursor;
    let value = match read_2bits(data, &mut pos)? {
        bit_long::NORMAL => read_raw_long(data, &mut pos)?,
        bit_long::UNSIGNED_CHAR => read_raw_char(data, &mut pos)? as i32,
        bit_long::ZERO_VALUE => 0,
        code => {
            debug!(bit_offset = *cursor, code, "unused BitLong prefix code");
            return Err(DwgError::InvalidPrefixCode {
                value_type: "BitLong",
                code,
            });
        }
    };
    *cursor = pos;
    Ok(value)
}

/// **BD** - Read a BitDouble.
///
/// Code 01 is 1.0, code 10 is 0.0; the unused code 11 also decodes as 0.0
/// and consumes no data.
pub fn read_bit_double(data: &[u8], cursor: &mut usize) -> Result<f64> {
    let mut pos = *cursor;
    let value = match read_2bits(data, &mut pos)? {
        bit_double::NORMAL => read_raw_double(data, &mut pos)?,
        bit_double::ONE_VALUE => 1.0,
        bit_double::ZERO_VALUE => 0.0,
        code => {
            debug!(bit_offset = *cursor, code, "unused BitDouble prefix code, reading 0.0");
            0.0
        }
    };
    *cursor = pos;
    Ok(value)
}

/// **DD** - Read a BitDouble patched over a default value.
///
/// The default's little-endian bytes are kept and partly overwritten:
///
/// - 00: the default unchanged
/// - 01: 4 bytes replace bytes 0–3
/// - 10: 6 bytes replace bytes 4–5 first, then bytes 0–3
/// - 11: 8 bytes replace the whole value
pub fn read_bit_double_with_default(data: &[u8], cursor: &mut usize, default: f64) -> Result<f64> {
    let mut pos = *cursor;
    let mut arr = default.to_le_bytes();

    match read_2bits(data, &mut pos)? {
        bit_double_with_default::DEFAULT_VALUE => {}
        bit_double_with_default::PATCH_4_BYTES => {
            read_shifted_into(data, &mut pos, &mut arr[0..4])?;
        }
        bit_double_with_default::PATCH_6_BYTES => {
            read_shifted_into(data, &mut pos, &mut arr[4..6])?;
            read_shifted_into(data, &mut pos, &mut arr[0..4])?;
        }
        _ => {
            read_shifted_into(data, &mut pos, &mut arr)?;
        }
    }

    *cursor = pos;
    Ok(f64::from_le_bytes(arr))
}

/// Read the raw bytes of a variable text: a BitShort count, then that many
/// chars. There is no terminator.
pub fn read_text_bytes(data: &[u8], cursor: &mut usize) -> Result<Vec<u8>> {
    let mut pos = *cursor;
    let length = read_bit_short(data, &mut pos)?;
    if length < 0 {
        debug!(bit_offset = *cursor, length, "negative text length");
        return Err(DwgError::InvalidTextLength(length));
    }
    let bytes = read_bytes(data, &mut pos, length as usize)?;
    *cursor = pos;
    Ok(bytes)
}

/// **TV** - Read a variable text decoded with the Windows-1252 code page.
pub fn read_variable_text(data: &[u8], cursor: &mut usize) -> Result<String> {
    read_variable_text_with_encoding(data, cursor, encoding_rs::WINDOWS_1252)
}

/// **TV** - Read a variable text decoded with `encoding`.
pub fn read_variable_text_with_encoding(
    data: &[u8],
    cursor: &mut usize,
    encoding: &'static Encoding,
) -> Result<String> {
    let bytes = read_text_bytes(data, cursor)?;
    if bytes.is_empty() {
        return Ok(String::new());
    }
    let (decoded, _) = encoding.decode_without_bom_handling(&bytes);
    Ok(decoded.into_owned())
}
