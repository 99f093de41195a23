//! Base implementation of `IDwgStreamWriter` with bit-level output.
//!
//! Bits are accumulated MSB-first in `last_byte`; once a byte is complete it
//! is pushed to the output vector. `bit_shift` is the number of bits already
//! placed in `last_byte`.

use crate::error::{DwgError, Result};
use crate::io::dwg::constants::{
    bit_double, bit_double_with_default, bit_long, bit_short, CONTINUATION_FLAG,
    MODULAR_CHAR_SIGN_FLAG,
};
use crate::io::dwg::reference_type::HandleReference;

use super::stream_writer::IDwgStreamWriter;

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::Encoding;

/// Largest value an unsigned modular char can carry (8 × 7 bits).
const MODULAR_CHAR_LIMIT: u64 = 1 << 56;

/// Largest magnitude a signed modular char can carry (7 × 7 + 6 bits).
const SIGNED_MODULAR_CHAR_LIMIT: u64 = 1 << 55;

/// Largest value a modular short can carry (2 × 15 bits).
const MODULAR_SHORT_LIMIT: u32 = 1 << 30;

/// Base implementation of the bit-level DWG stream writer.
#[derive(Debug, Clone)]
pub struct DwgStreamWriterBase {
    data: Vec<u8>,
    bit_shift: u8,
    last_byte: u8,
    encoding: &'static Encoding,
}

impl Default for DwgStreamWriterBase {
    fn default() -> Self {
        Self::new()
    }
}

impl DwgStreamWriterBase {
    /// Create a new, empty writer.
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            bit_shift: 0,
            last_byte: 0,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }

    /// Set the text encoding.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Completed bytes written so far (excludes a partial trailing byte).
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the writer and return the data, zero-padding the last byte.
    pub fn into_data(mut self) -> Vec<u8> {
        if self.bit_shift > 0 {
            self.data.push(self.last_byte);
        }
        self.data
    }

    fn reset_shift(&mut self) {
        self.bit_shift = 0;
        self.last_byte = 0;
    }

    /// Write the low `width` bits of `value`, most significant first.
    fn write_bits(&mut self, value: u8, width: u8) -> Result<()> {
        for i in (0..width).rev() {
            self.write_bit((value >> i) & 1 != 0)?;
        }
        Ok(())
    }

    fn out_of_range(value_type: &'static str, value: i64) -> DwgError {
        DwgError::ValueOutOfRange { value_type, value }
    }
}

impl IDwgStreamWriter for DwgStreamWriterBase {
    fn position_in_bits(&self) -> usize {
        self.data.len() * 8 + self.bit_shift as usize
    }

    // ---------------------------------------------------------------
    // Raw writes
    // ---------------------------------------------------------------

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.bit_shift == 0 {
            self.data.extend_from_slice(bytes);
            return Ok(());
        }

        let num = 8 - self.bit_shift;
        for &b in bytes {
            self.data.push(self.last_byte | (b >> self.bit_shift));
            self.last_byte = b << num;
        }
        Ok(())
    }

    fn write_byte(&mut self, value: u8) -> Result<()> {
        self.write_bytes(&[value])
    }

    fn write_raw_short(&mut self, value: i16) -> Result<()> {
        let mut buf = [0u8; 2];
        LittleEndian::write_i16(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn write_raw_ushort(&mut self, value: u16) -> Result<()> {
        let mut buf = [0u8; 2];
        LittleEndian::write_u16(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn write_raw_long(&mut self, value: i32) -> Result<()> {
        let mut buf = [0u8; 4];
        LittleEndian::write_i32(&mut buf, value);
        self.write_bytes(&buf)
    }

    fn write_raw_double(&mut self, value: f64) -> Result<()> {
        let mut buf = [0u8; 8];
        LittleEndian::write_f64(&mut buf, value);
        self.write_bytes(&buf)
    }

    // ---------------------------------------------------------------
    // Bit-coded writes
    // ---------------------------------------------------------------

    fn write_bit(&mut self, value: bool) -> Result<()> {
        if value {
            self.last_byte |= 1 << (7 - self.bit_shift);
        }

        if self.bit_shift < 7 {
            self.bit_shift += 1;
            return Ok(());
        }

        // bit_shift == 7: this is the last bit in the byte
        self.data.push(self.last_byte);
        self.reset_shift();
        Ok(())
    }

    fn write_2bits(&mut self, value: u8) -> Result<()> {
        let value = value & 0b11;
        if self.bit_shift < 6 {
            self.last_byte |= value << (6 - self.bit_shift);
            self.bit_shift += 2;
        } else if self.bit_shift == 6 {
            self.last_byte |= value;
            self.data.push(self.last_byte);
            self.reset_shift();
        } else {
            // bit_shift == 7: spans byte boundary
            self.last_byte |= value >> 1;
            self.data.push(self.last_byte);
            self.last_byte = value << 7;
            self.bit_shift = 1;
        }
        Ok(())
    }

    fn write_3bits(&mut self, value: u8) -> Result<()> {
        self.write_bits(value, 3)
    }

    fn write_4bits(&mut self, value: u8) -> Result<()> {
        self.write_bits(value, 4)
    }

    fn write_bit_short(&mut self, value: i16) -> Result<()> {
        match value {
            0 => self.write_2bits(bit_short::ZERO_VALUE),
            256 => self.write_2bits(bit_short::VALUE_256),
            1..=255 => {
                self.write_2bits(bit_short::UNSIGNED_CHAR)?;
                self.write_byte(value as u8)
            }
            _ => {
                self.write_2bits(bit_short::NORMAL)?;
                self.write_raw_short(value)
            }
        }
    }

    fn write_bit_long(&mut self, value: i32) -> Result<()> {
        match value {
            0 => self.write_2bits(bit_long::ZERO_VALUE),
            1..=255 => {
                self.write_2bits(bit_long::UNSIGNED_CHAR)?;
                self.write_byte(value as u8)
            }
            _ => {
                self.write_2bits(bit_long::NORMAL)?;
                self.write_raw_long(value)
            }
        }
    }

    fn write_bit_double(&mut self, value: f64) -> Result<()> {
        // Compared bitwise so -0.0 keeps its sign through a full raw double
        if value.to_bits() == 0 {
            return self.write_2bits(bit_double::ZERO_VALUE);
        }
        if value.to_bits() == 1.0f64.to_bits() {
            return self.write_2bits(bit_double::ONE_VALUE);
        }

        self.write_2bits(bit_double::NORMAL)?;
        self.write_raw_double(value)
    }

    fn write_bit_double_with_default(&mut self, def: f64, value: f64) -> Result<()> {
        if def.to_bits() == value.to_bits() {
            return self.write_2bits(bit_double_with_default::DEFAULT_VALUE);
        }

        let mut def_bytes = [0u8; 8];
        let mut value_bytes = [0u8; 8];
        LittleEndian::write_f64(&mut def_bytes, def);
        LittleEndian::write_f64(&mut value_bytes, value);

        // Count matching bytes from the most significant end
        let shared = def_bytes
            .iter()
            .rev()
            .zip(value_bytes.iter().rev())
            .take_while(|(d, v)| d == v)
            .count();

        if shared >= 4 {
            self.write_2bits(bit_double_with_default::PATCH_4_BYTES)?;
            self.write_bytes(&value_bytes[0..4])
        } else if shared >= 2 {
            self.write_2bits(bit_double_with_default::PATCH_6_BYTES)?;
            self.write_bytes(&value_bytes[4..6])?;
            self.write_bytes(&value_bytes[0..4])
        } else {
            self.write_2bits(bit_double_with_default::FULL_RAW_DOUBLE)?;
            self.write_bytes(&value_bytes)
        }
    }

    // ---------------------------------------------------------------
    // Modular values
    // ---------------------------------------------------------------

    fn write_modular_char(&mut self, value: u64) -> Result<()> {
        if value >= MODULAR_CHAR_LIMIT {
            return Err(Self::out_of_range(
                "ModularChar",
                i64::try_from(value).unwrap_or(i64::MAX),
            ));
        }

        let mut rest = value;
        while rest >= CONTINUATION_FLAG as u64 {
            self.write_byte((rest & 0x7F) as u8 | CONTINUATION_FLAG)?;
            rest >>= 7;
        }
        self.write_byte(rest as u8)
    }

    fn write_signed_modular_char(&mut self, value: i64) -> Result<()> {
        let magnitude = value.unsigned_abs();
        if magnitude >= SIGNED_MODULAR_CHAR_LIMIT {
            return Err(Self::out_of_range("SignedModularChar", value));
        }

        // The last byte has only 6 value bits next to the sign flag
        let mut rest = magnitude;
        while rest >= MODULAR_CHAR_SIGN_FLAG as u64 {
            self.write_byte((rest & 0x7F) as u8 | CONTINUATION_FLAG)?;
            rest >>= 7;
        }

        let sign = if value < 0 { MODULAR_CHAR_SIGN_FLAG } else { 0 };
        self.write_byte(rest as u8 | sign)
    }

    fn write_modular_short(&mut self, value: u32) -> Result<()> {
        if value >= MODULAR_SHORT_LIMIT {
            return Err(Self::out_of_range("ModularShort", value as i64));
        }

        if value < 0x8000 {
            return self.write_raw_ushort(value as u16);
        }

        self.write_raw_ushort((value & 0x7FFF) as u16 | 0x8000)?;
        self.write_raw_ushort((value >> 15) as u16)
    }

    // ---------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------

    fn write_variable_text(&mut self, value: &str) -> Result<()> {
        let (encoded, _, _) = self.encoding.encode(value);
        self.write_text_bytes(&encoded)
    }

    fn write_text_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let length = i16::try_from(bytes.len())
            .map_err(|_| Self::out_of_range("VariableText", bytes.len() as i64))?;
        self.write_bit_short(length)?;
        self.write_bytes(bytes)
    }

    // ---------------------------------------------------------------
    // Handle references
    // ---------------------------------------------------------------

    fn handle_reference(&mut self, handle: &HandleReference) -> Result<()> {
        if handle.code() > 0x0F {
            return Err(Self::out_of_range("HandleCode", handle.code() as i64));
        }
        self.write_byte((handle.code() << 4) | handle.counter())?;
        self.write_bytes(handle.payload())
    }

    fn handle_reference_8bit_length(&mut self, handle: &HandleReference) -> Result<()> {
        self.write_byte(handle.counter())?;
        self.write_bytes(handle.payload())
    }

    // ---------------------------------------------------------------
    // Stream control
    // ---------------------------------------------------------------

    fn write_spear_shift(&mut self) -> Result<()> {
        if self.bit_shift > 0 {
            self.data.push(self.last_byte);
            self.reset_shift();
        }
        Ok(())
    }
}
