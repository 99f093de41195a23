//! Continuation-encoded integers: modular char (MC) and modular short (MS).
//!
//! A modular char is a run of bytes, least significant group first, where
//! bit 7 of each byte flags that another byte follows and the remaining
//! 7 bits carry the value. The signed form gives up bit 6 of the most
//! significant (last) byte as a sign flag.
//!
//! A modular short works the same way on 16-bit words: 15 value bits per
//! word, with the flag in the top bit of the word's second byte.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{
    CONTINUATION_FLAG, MAX_MODULAR_CHAR_BYTES, MAX_MODULAR_SHORT_BYTES, MODULAR_CHAR_SIGN_FLAG,
};

use super::bit_ops::{read_raw_char, read_shifted};

use tracing::debug;

/// Read bytes until one has its continuation flag clear.
///
/// Returns the bytes in stream order and how many were used.
fn read_continuation_bytes(
    data: &[u8],
    pos: &mut usize,
    value_type: &'static str,
) -> Result<([u8; MAX_MODULAR_CHAR_BYTES], usize)> {
    let start = *pos;
    let mut bytes = [0u8; MAX_MODULAR_CHAR_BYTES];
    for (count, slot) in bytes.iter_mut().enumerate() {
        *slot = read_raw_char(data, pos)?;
        if *slot & CONTINUATION_FLAG == 0 {
            return Ok((bytes, count + 1));
        }
    }

    debug!(
        bit_offset = start,
        value_type, "continuation flag set on the last permitted byte"
    );
    Err(DwgError::ContinuationOverflow {
        value_type,
        max_bytes: MAX_MODULAR_CHAR_BYTES,
    })
}

/// Pack the 7-bit groups of `bytes` (least significant first) into one value.
fn pack_groups(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .enumerate()
        .fold(0u64, |value, (i, &b)| {
            value | ((b & !CONTINUATION_FLAG) as u64) << (7 * i)
        })
}

/// **MC** - Read an unsigned modular char (up to 8 bytes, 56 value bits).
pub fn read_modular_char(data: &[u8], cursor: &mut usize) -> Result<u64> {
    let mut pos = *cursor;
    let (bytes, count) = read_continuation_bytes(data, &mut pos, "ModularChar")?;
    *cursor = pos;
    Ok(pack_groups(&bytes[..count]))
}

/// **MC** - Read a signed modular char.
///
/// The sign lives in bit 6 of the most significant byte; the magnitude is
/// packed from what remains and negated when the sign is set.
pub fn read_signed_modular_char(data: &[u8], cursor: &mut usize) -> Result<i64> {
    let mut pos = *cursor;
    let (mut bytes, count) = read_continuation_bytes(data, &mut pos, "SignedModularChar")?;

    let last = count - 1;
    let negative = bytes[last] & MODULAR_CHAR_SIGN_FLAG != 0;
    bytes[last] &= !MODULAR_CHAR_SIGN_FLAG;

    // At most 7 × 7 + 6 = 55 bits, so the magnitude always fits an i64.
    let magnitude = pack_groups(&bytes[..count]) as i64;

    *cursor = pos;
    Ok(if negative { -magnitude } else { magnitude })
}

/// **MS** - Read a modular short.
///
/// Two bytes carry 15 bits; if the flag in the second byte is set, two more
/// bytes carry the next 15 bits.
///
/// A continuation flag on the fourth byte is rejected with
/// [`DwgError::ContinuationOverflow`]. Decoders that simply mask that bit
/// return a 30-bit value for the same bytes; this one never does, so a
/// stream relying on the masked reading fails here instead of decoding.
pub fn read_modular_short(data: &[u8], cursor: &mut usize) -> Result<u32> {
    let mut pos = *cursor;

    let low = read_shifted::<2>(data, &mut pos)?;
    let mut value = low[0] as u32 | ((low[1] & !CONTINUATION_FLAG) as u32) << 8;

    if low[1] & CONTINUATION_FLAG != 0 {
        let high = read_shifted::<2>(data, &mut pos)?;
        if high[1] & CONTINUATION_FLAG != 0 {
            debug!(bit_offset = *cursor, "modular short longer than 4 bytes");
            return Err(DwgError::ContinuationOverflow {
                value_type: "ModularShort",
                max_bytes: MAX_MODULAR_SHORT_BYTES,
            });
        }
        value |= (high[0] as u32) << 15 | ((high[1] & !CONTINUATION_FLAG) as u32) << 23;
    }

    *cursor = pos;
    Ok(value)
}
