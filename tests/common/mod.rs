//! Shared test utilities for dwg-bitstream integration tests.
//!
//! Every test crate imports these via `mod common;`.

#![allow(dead_code)]

use dwg_bitstream::{DwgStreamWriterBase, IDwgStreamWriter};

// ===========================================================================
// Buffer construction
// ===========================================================================

/// Build a buffer with `offset` zero bits in front of whatever `write` emits.
///
/// Returns the finished (zero-padded) buffer.
pub fn encode_at<F>(offset: usize, write: F) -> Vec<u8>
where
    F: FnOnce(&mut DwgStreamWriterBase),
{
    let mut w = DwgStreamWriterBase::new();
    for _ in 0..offset {
        w.write_bit(false).unwrap();
    }
    write(&mut w);
    w.into_data()
}

/// Same as [`encode_at`], also returning how many bits `write` produced.
pub fn encode_at_counted<F>(offset: usize, write: F) -> (Vec<u8>, usize)
where
    F: FnOnce(&mut DwgStreamWriterBase),
{
    let mut w = DwgStreamWriterBase::new();
    for _ in 0..offset {
        w.write_bit(false).unwrap();
    }
    write(&mut w);
    let bits = w.position_in_bits() - offset;
    (w.into_data(), bits)
}

/// Pack a string of `0`/`1` characters (spaces ignored) MSB-first.
///
/// ```ignore
/// assert_eq!(bits("01 00101010"), vec![0x4A, 0x80]);
/// ```
pub fn bits(pattern: &str) -> Vec<u8> {
    let mut w = DwgStreamWriterBase::new();
    for c in pattern.chars().filter(|c| !c.is_whitespace()) {
        w.write_bit(c == '1').unwrap();
    }
    w.into_data()
}

// ===========================================================================
// Truncation checks
// ===========================================================================

/// Run `read` against every strict prefix of `data` that cannot hold
/// `needed_bits` past `offset`, asserting it fails without moving the cursor.
pub fn assert_truncations_fail<T, F>(data: &[u8], offset: usize, needed_bits: usize, read: F)
where
    T: std::fmt::Debug,
    F: Fn(&[u8], &mut usize) -> dwg_bitstream::Result<T>,
{
    let needed_bytes = (offset + needed_bits).div_ceil(8);
    for len in 0..needed_bytes.min(data.len()) {
        let mut cursor = offset;
        let result = read(&data[..len], &mut cursor);
        assert!(
            result.is_err(),
            "read over {len} of {needed_bytes} bytes should fail, got {result:?}"
        );
        assert_eq!(cursor, offset, "cursor moved on failed read over {len} bytes");
    }
}
