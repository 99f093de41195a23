//! DWG bit-level stream reader trait.
//!
//! DWG data is **bit-aligned** (not byte-aligned). Every read operation
//! must track the current bit position within the byte buffer.

use crate::error::Result;
use crate::io::dwg::constants::SENTINEL_SIZE;
use crate::io::dwg::reference_type::HandleReference;

/// Trait for bit-level DWG stream reading.
///
/// Each data type of the format has a reading method:
///
/// - **B** - bit (1 bit)
/// - **BB** - 2-bit code
/// - **3B** / **4B** - 3- and 4-bit values
/// - **BS** - BitShort (2+0/8/16 bits)
/// - **BL** - BitLong (2+0/8/32 bits)
/// - **BD** - BitDouble (2+0/64 bits)
/// - **DD** - BitDouble with default (2+0/32/48/64 bits)
/// - **MC** - Modular Char (7-bit chunks)
/// - **MS** - Modular Short (15-bit chunks)
/// - **H** - Handle reference
/// - **TV** - Variable text
/// - **RC** - Raw Char, **RS** - Raw Short, **RL** - Raw Long, **RD** - Raw Double
/// - **SN** - Sentinel (16 bytes)
///
/// A failed read leaves the position unchanged.
pub trait IDwgStreamReader {
    /// Current position in bits from the start of the buffer.
    fn position_in_bits(&self) -> usize;

    /// Move to an absolute bit position.
    fn set_position_in_bits(&mut self, position: usize);

    /// Bits left between the position and the end of the buffer.
    fn remaining_bits(&self) -> usize;

    // ---------------------------------------------------------------
    // BIT CODES AND DATA DEFINITIONS
    // ---------------------------------------------------------------

    /// **B** - Read a single bit.
    fn read_bit(&mut self) -> Result<bool>;

    /// **BB** - Read a 2-bit code.
    fn read_2bits(&mut self) -> Result<u8>;

    /// **3B** - Read a 3-bit value.
    fn read_3bits(&mut self) -> Result<u8>;

    /// **4B** - Read a 4-bit value.
    fn read_4bits(&mut self) -> Result<u8>;

    /// **BS** - Read a BitShort.
    fn read_bit_short(&mut self) -> Result<i16>;

    /// **BS** - Read a BitShort and return it as bool (nonzero = true).
    fn read_bit_short_as_bool(&mut self) -> Result<bool> {
        Ok(self.read_bit_short()? != 0)
    }

    /// **BL** - Read a BitLong.
    fn read_bit_long(&mut self) -> Result<i32>;

    /// **BD** - Read a BitDouble.
    fn read_bit_double(&mut self) -> Result<f64>;

    /// **DD** - Read a BitDouble with a default value.
    fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64>;

    /// **RC** - Read a raw char (8 bits, may span a byte boundary).
    fn read_raw_char(&mut self) -> Result<u8>;

    /// **RS** - Read a raw short (16 bits LE).
    fn read_raw_short(&mut self) -> Result<i16>;

    /// **RS** - Read a raw unsigned short (16 bits LE).
    fn read_raw_ushort(&mut self) -> Result<u16>;

    /// **RL** - Read a raw long (32 bits LE).
    fn read_raw_long(&mut self) -> Result<i32>;

    /// **RD** - Read a raw double (64 bits LE).
    fn read_raw_double(&mut self) -> Result<f64>;

    /// Read multiple raw chars.
    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>>;

    /// **MC** - Read a Modular Char (unsigned).
    fn read_modular_char(&mut self) -> Result<u64>;

    /// **MC** - Read a Signed Modular Char.
    fn read_signed_modular_char(&mut self) -> Result<i64>;

    /// **MS** - Read a Modular Short.
    fn read_modular_short(&mut self) -> Result<u32>;

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// **H** - Read a handle with a 4-bit code and 4-bit counter.
    fn handle_reference(&mut self) -> Result<HandleReference>;

    /// Read a handle with an implied code 0 and an 8-bit counter.
    fn handle_reference_8bit_length(&mut self) -> Result<HandleReference>;

    /// **H** - Read a handle and resolve it against `reference_handle`.
    fn handle_reference_resolved(&mut self, reference_handle: u64) -> Result<u64> {
        Ok(self.handle_reference()?.resolve(reference_handle))
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// **TV** - Read variable text.
    fn read_variable_text(&mut self) -> Result<String>;

    // ---------------------------------------------------------------
    // Sentinel
    // ---------------------------------------------------------------

    /// **SN** - Read a 16-byte sentinel.
    fn read_sentinel(&mut self) -> Result<[u8; SENTINEL_SIZE]>;
}
