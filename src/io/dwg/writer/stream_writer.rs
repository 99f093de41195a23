//! DWG bit-level stream writer trait.
//!
//! The write counterpart to `IDwgStreamReader`: every value type the
//! readers decode has an encoder here that produces the same bits.

use crate::error::Result;
use crate::io::dwg::reference_type::HandleReference;

/// Trait for bit-level DWG stream writing.
///
/// Encoders always pick the most compact prefix code for a value, so the
/// output of a writer is canonical.
pub trait IDwgStreamWriter {
    /// Current position in bits.
    fn position_in_bits(&self) -> usize;

    // ---------------------------------------------------------------
    // Raw writes
    // ---------------------------------------------------------------

    /// Write raw bytes with bit-shift handling.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    /// **RC** - Write a raw byte (8 bits).
    fn write_byte(&mut self, value: u8) -> Result<()>;

    /// **RS** - Write a raw i16 (2 bytes LE).
    fn write_raw_short(&mut self, value: i16) -> Result<()>;

    /// **RS** - Write a raw u16 (2 bytes LE).
    fn write_raw_ushort(&mut self, value: u16) -> Result<()>;

    /// **RL** - Write a raw i32 (4 bytes LE).
    fn write_raw_long(&mut self, value: i32) -> Result<()>;

    /// **RD** - Write a raw f64 (8 bytes LE).
    fn write_raw_double(&mut self, value: f64) -> Result<()>;

    // ---------------------------------------------------------------
    // Bit-coded writes
    // ---------------------------------------------------------------

    /// **B** - Write a single bit.
    fn write_bit(&mut self, value: bool) -> Result<()>;

    /// **BB** - Write a 2-bit code (low 2 bits of `value`).
    fn write_2bits(&mut self, value: u8) -> Result<()>;

    /// **3B** - Write a 3-bit value (low 3 bits of `value`).
    fn write_3bits(&mut self, value: u8) -> Result<()>;

    /// **4B** - Write a 4-bit value (low 4 bits of `value`).
    fn write_4bits(&mut self, value: u8) -> Result<()>;

    /// **BS** - Write a BitShort.
    fn write_bit_short(&mut self, value: i16) -> Result<()>;

    /// **BL** - Write a BitLong.
    fn write_bit_long(&mut self, value: i32) -> Result<()>;

    /// **BD** - Write a BitDouble.
    fn write_bit_double(&mut self, value: f64) -> Result<()>;

    /// **DD** - Write a BitDouble with default.
    fn write_bit_double_with_default(&mut self, def: f64, value: f64) -> Result<()>;

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    /// **MC** - Write an unsigned modular char (value < 2^56).
    fn write_modular_char(&mut self, value: u64) -> Result<()>;

    /// **MC** - Write a signed modular char (|value| < 2^55).
    fn write_signed_modular_char(&mut self, value: i64) -> Result<()>;

    /// **MS** - Write a modular short (value < 2^30).
    fn write_modular_short(&mut self, value: u32) -> Result<()>;

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    /// **TV** - Write variable text in the writer's encoding.
    fn write_variable_text(&mut self, value: &str) -> Result<()>;

    /// **TV** - Write a BitShort length followed by the bytes verbatim.
    fn write_text_bytes(&mut self, bytes: &[u8]) -> Result<()>;

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    /// **H** - Write `|CODE|COUNTER|payload|`.
    fn handle_reference(&mut self, handle: &HandleReference) -> Result<()>;

    /// Write a handle as an 8-bit byte count followed by the payload.
    fn handle_reference_8bit_length(&mut self, handle: &HandleReference) -> Result<()>;

    /// **H** - Write `value` under `code` in the fewest payload bytes.
    fn handle_reference_value(&mut self, code: u8, value: u64) -> Result<()> {
        self.handle_reference(&HandleReference::from_value(code, value))
    }

    // ---------------------------------------------------------------
    // Stream control
    // ---------------------------------------------------------------

    /// Pad with zero bits up to the next byte boundary.
    fn write_spear_shift(&mut self) -> Result<()>;
}
