//! Fixed-width bit readers.
//!
//! Every function takes the caller's byte buffer and bit cursor. Bit 7 of a
//! byte is read first. A value that does not start on a byte boundary is
//! assembled from the low bits of one byte and the high bits of the next.
//!
//! Multi-byte values (RS, RL, RD) are first re-aligned into a small byte
//! window and then converted from little-endian with `byteorder`; nothing is
//! ever reinterpreted in place.
//!
//! A read that would run past the end of the buffer fails with
//! [`DwgError::OutOfBounds`] and leaves the cursor untouched.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::SENTINEL_SIZE;

use byteorder::{ByteOrder, LittleEndian};

/// Check that `bits` bits starting at `bit_offset` lie inside `data`.
pub(crate) fn ensure_bits(data: &[u8], bit_offset: usize, bits: usize) -> Result<()> {
    let out_of_bounds = || DwgError::OutOfBounds {
        bit_offset,
        bits,
        buffer_len: data.len(),
    };
    let end = bit_offset.checked_add(bits).ok_or_else(out_of_bounds)?;
    if end.div_ceil(8) > data.len() {
        return Err(out_of_bounds());
    }
    Ok(())
}

/// Read `width` (1..=8) bits as the low bits of a byte.
fn read_narrow(data: &[u8], cursor: &mut usize, width: usize) -> Result<u8> {
    debug_assert!((1..=8).contains(&width));
    ensure_bits(data, *cursor, width)?;

    let index = *cursor / 8;
    let shift = *cursor % 8;

    // Two-byte window; the second byte is only touched when the value
    // straddles the boundary.
    let mut window = (data[index] as u16) << 8;
    if shift + width > 8 {
        window |= data[index + 1] as u16;
    }

    let mask = (1u16 << width) - 1;
    let value = (window >> (16 - shift - width)) & mask;

    *cursor += width;
    Ok(value as u8)
}

/// Fill `out` with consecutive bytes starting at the cursor.
///
/// Each output byte is `(b[i] << shift) | (b[i + 1] >> (8 - shift))` where
/// `shift` is the intra-byte offset; when the cursor is byte aligned the
/// bytes are copied unchanged.
pub(crate) fn read_shifted_into(data: &[u8], cursor: &mut usize, out: &mut [u8]) -> Result<()> {
    let bits = out.len().checked_mul(8).ok_or(DwgError::OutOfBounds {
        bit_offset: *cursor,
        bits: usize::MAX,
        buffer_len: data.len(),
    })?;
    ensure_bits(data, *cursor, bits)?;

    let start = *cursor / 8;
    let shift = (*cursor % 8) as u32;

    if shift == 0 {
        out.copy_from_slice(&data[start..start + out.len()]);
    } else {
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (data[start + i] << shift) | (data[start + i + 1] >> (8 - shift));
        }
    }

    *cursor += bits;
    Ok(())
}

/// Read `N` consecutive bytes into a fixed window.
pub(crate) fn read_shifted<const N: usize>(data: &[u8], cursor: &mut usize) -> Result<[u8; N]> {
    let mut window = [0u8; N];
    read_shifted_into(data, cursor, &mut window)?;
    Ok(window)
}

/// **B** - Read a single bit.
pub fn read_bit(data: &[u8], cursor: &mut usize) -> Result<bool> {
    Ok(read_narrow(data, cursor, 1)? == 1)
}

/// **BB** - Read a 2-bit code (0–3).
pub fn read_2bits(data: &[u8], cursor: &mut usize) -> Result<u8> {
    read_narrow(data, cursor, 2)
}

/// **3B** - Read a 3-bit value (0–7).
pub fn read_3bits(data: &[u8], cursor: &mut usize) -> Result<u8> {
    read_narrow(data, cursor, 3)
}

/// **4B** - Read a 4-bit value (0–15).
pub fn read_4bits(data: &[u8], cursor: &mut usize) -> Result<u8> {
    read_narrow(data, cursor, 4)
}

/// **RC** - Read a raw char (8 bits, may span a byte boundary).
pub fn read_raw_char(data: &[u8], cursor: &mut usize) -> Result<u8> {
    read_narrow(data, cursor, 8)
}

/// **RS** - Read a raw short (16 bits, LSB first).
pub fn read_raw_short(data: &[u8], cursor: &mut usize) -> Result<i16> {
    let bytes = read_shifted::<2>(data, cursor)?;
    Ok(LittleEndian::read_i16(&bytes))
}

/// **RS** - Read a raw unsigned short (16 bits, LSB first).
pub fn read_raw_ushort(data: &[u8], cursor: &mut usize) -> Result<u16> {
    let bytes = read_shifted::<2>(data, cursor)?;
    Ok(LittleEndian::read_u16(&bytes))
}

/// **RL** - Read a raw long (32 bits, LSB first).
pub fn read_raw_long(data: &[u8], cursor: &mut usize) -> Result<i32> {
    let bytes = read_shifted::<4>(data, cursor)?;
    Ok(LittleEndian::read_i32(&bytes))
}

/// **RD** - Read a raw IEEE double (64 bits, LSB first).
pub fn read_raw_double(data: &[u8], cursor: &mut usize) -> Result<f64> {
    let bytes = read_shifted::<8>(data, cursor)?;
    Ok(LittleEndian::read_f64(&bytes))
}

/// Read `length` raw chars.
pub fn read_bytes(data: &[u8], cursor: &mut usize, length: usize) -> Result<Vec<u8>> {
    // Bounds first, so a corrupt length never drives the allocation.
    ensure_bits(data, *cursor, length.saturating_mul(8))?;
    let mut bytes = vec![0u8; length];
    read_shifted_into(data, cursor, &mut bytes)?;
    Ok(bytes)
}

/// **SN** - Read a 16-byte section sentinel.
pub fn read_sentinel(data: &[u8], cursor: &mut usize) -> Result<[u8; SENTINEL_SIZE]> {
    read_shifted::<SENTINEL_SIZE>(data, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bit() {
        // 0b10110000 = 0xB0
        let data = [0xB0];
        let mut pos = 0;
        let bits: Vec<bool> = (0..8).map(|_| read_bit(&data, &mut pos).unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, false, false, false]);
        assert_eq!(pos, 8);
    }

    #[test]
    fn test_read_2bits() {
        // 0b11010000 = 0xD0 → 11, 01
        let data = [0xD0];
        let mut pos = 0;
        assert_eq!(read_2bits(&data, &mut pos).unwrap(), 3);
        assert_eq!(read_2bits(&data, &mut pos).unwrap(), 1);
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_read_2bits_straddle() {
        // bit 7 of byte 0 is 1, bit 0 of byte 1 (MSB) is 0 → 0b10
        let data = [0x01, 0x7F];
        let mut pos = 7;
        assert_eq!(read_2bits(&data, &mut pos).unwrap(), 2);
        assert_eq!(pos, 9);
    }

    #[test]
    fn test_read_3bits_straddle() {
        // offset 6: last two bits of 0x03 (11), first bit of 0x80 (1) → 7
        let data = [0x03, 0x80];
        let mut pos = 6;
        assert_eq!(read_3bits(&data, &mut pos).unwrap(), 7);
        // offset 7: 1 | 10 → 0b110
        let data = [0x01, 0x80];
        let mut pos = 7;
        assert_eq!(read_3bits(&data, &mut pos).unwrap(), 6);
    }

    #[test]
    fn test_read_4bits() {
        let data = [0xA5, 0x3C];
        let mut pos = 0;
        assert_eq!(read_4bits(&data, &mut pos).unwrap(), 0xA);
        assert_eq!(read_4bits(&data, &mut pos).unwrap(), 0x5);
        // offset 10: bits 0b1111 from 0x3C (0011_1100)
        let mut pos = 10;
        assert_eq!(read_4bits(&data, &mut pos).unwrap(), 0xF);
        // offset 6 straddles: 01 | 00 → 0b0100
        let mut pos = 6;
        assert_eq!(read_4bits(&data, &mut pos).unwrap(), 0b0100);
    }

    #[test]
    fn test_read_raw_char_aligned_and_shifted() {
        let data = [0xAB, 0xCD];
        let mut pos = 0;
        assert_eq!(read_raw_char(&data, &mut pos).unwrap(), 0xAB);

        // shift 4: low nibble of 0xAB, high nibble of 0xCD
        let mut pos = 4;
        assert_eq!(read_raw_char(&data, &mut pos).unwrap(), 0xBC);
        assert_eq!(pos, 12);
    }

    #[test]
    fn test_read_raw_short() {
        let data = [0x34, 0x12];
        let mut pos = 0;
        assert_eq!(read_raw_short(&data, &mut pos).unwrap(), 0x1234);
        assert_eq!(pos, 16);
    }

    #[test]
    fn test_read_raw_short_negative_shifted() {
        // -2 = [0xFE, 0xFF] shifted right by one bit behind a 0 bit
        let data = [0x7F, 0x7F, 0x80];
        let mut pos = 1;
        assert_eq!(read_raw_short(&data, &mut pos).unwrap(), -2);
        assert_eq!(pos, 17);
    }

    #[test]
    fn test_read_raw_long() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let mut pos = 0;
        assert_eq!(read_raw_long(&data, &mut pos).unwrap(), 0x12345678);
    }

    #[test]
    fn test_read_raw_double() {
        let data = 2.5f64.to_le_bytes();
        let mut pos = 0;
        assert_eq!(read_raw_double(&data, &mut pos).unwrap(), 2.5);
        assert_eq!(pos, 64);
    }

    #[test]
    fn test_aligned_read_does_not_need_extra_byte() {
        // A byte-aligned short needs exactly two bytes.
        let data = [0x01, 0x00];
        let mut pos = 0;
        assert_eq!(read_raw_short(&data, &mut pos).unwrap(), 1);
    }

    #[test]
    fn test_out_of_bounds_leaves_cursor() {
        let data = [0xFF, 0xFF];
        let mut pos = 1;
        let err = read_raw_short(&data, &mut pos).unwrap_err();
        assert_eq!(
            err,
            DwgError::OutOfBounds {
                bit_offset: 1,
                bits: 16,
                buffer_len: 2
            }
        );
        assert_eq!(pos, 1);

        let mut pos = 16;
        assert!(read_bit(&data, &mut pos).is_err());
        assert_eq!(pos, 16);
    }

    #[test]
    fn test_empty_buffer() {
        let mut pos = 0;
        assert!(read_bit(&[], &mut pos).is_err());
        assert!(read_raw_double(&[], &mut pos).is_err());
        assert_eq!(read_bytes(&[], &mut pos, 0).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_read_bytes_huge_length() {
        let mut pos = 0;
        assert!(read_bytes(&[0u8; 4], &mut pos, usize::MAX).is_err());
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_read_sentinel() {
        let sentinel_data: [u8; 16] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16];
        let mut pos = 0;
        assert_eq!(read_sentinel(&sentinel_data, &mut pos).unwrap(), sentinel_data);
        assert_eq!(pos, 128);
    }
}
