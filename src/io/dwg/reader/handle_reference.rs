//! Handle (object reference) readers.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::MAX_HANDLE_BYTES;
use crate::io::dwg::reference_type::HandleReference;

use super::bit_ops::{read_4bits, read_raw_char, read_shifted_into};

use tracing::{debug, trace};

/// Read `counter` payload bytes, refusing anything over `max`.
fn read_payload(
    data: &[u8],
    pos: &mut usize,
    code: u8,
    counter: usize,
    max: usize,
) -> Result<HandleReference> {
    if counter > max {
        debug!(bit_offset = *pos, counter, max, "handle payload too long");
        return Err(DwgError::HandleTooLong { counter, max });
    }

    let mut payload = [0u8; MAX_HANDLE_BYTES];
    read_shifted_into(data, pos, &mut payload[..counter])?;
    trace!(code, counter, "handle reference");
    Ok(HandleReference::from_inline(code, counter as u8, payload))
}

/// **H** - Read a handle: `|CODE (4 bits)|COUNTER (4 bits)|payload|`.
pub fn read_handle(data: &[u8], cursor: &mut usize) -> Result<HandleReference> {
    read_handle_with_limit(data, cursor, MAX_HANDLE_BYTES)
}

/// **H** - Read a handle whose payload may be at most `max_bytes` long.
///
/// `max_bytes` is clamped to [`MAX_HANDLE_BYTES`].
pub fn read_handle_with_limit(
    data: &[u8],
    cursor: &mut usize,
    max_bytes: usize,
) -> Result<HandleReference> {
    let mut pos = *cursor;
    let code = read_4bits(data, &mut pos)?;
    let counter = read_4bits(data, &mut pos)? as usize;
    let handle = read_payload(data, &mut pos, code, counter, max_bytes.min(MAX_HANDLE_BYTES))?;
    *cursor = pos;
    Ok(handle)
}

/// Read a handle with an implied code of 0 and an 8-bit byte count.
pub fn read_handle_8bit_length(data: &[u8], cursor: &mut usize) -> Result<HandleReference> {
    read_handle_8bit_length_with_limit(data, cursor, MAX_HANDLE_BYTES)
}

/// Read an 8-bit-length handle whose payload may be at most `max_bytes` long.
pub fn read_handle_8bit_length_with_limit(
    data: &[u8],
    cursor: &mut usize,
    max_bytes: usize,
) -> Result<HandleReference> {
    let mut pos = *cursor;
    let counter = read_raw_char(data, &mut pos)? as usize;
    let handle = read_payload(data, &mut pos, 0, counter, max_bytes.min(MAX_HANDLE_BYTES))?;
    *cursor = pos;
    Ok(handle)
}
