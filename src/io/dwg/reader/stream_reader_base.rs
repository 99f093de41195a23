//! Buffer-backed implementation of [`IDwgStreamReader`].
//!
//! The reader borrows a byte buffer and owns a bit cursor; every method
//! forwards to the free functions of the sibling modules, so decoding
//! through the reader or through the functions is bit-for-bit identical.

use crate::error::Result;
use crate::io::dwg::constants::{MAX_HANDLE_BYTES, SENTINEL_SIZE};
use crate::io::dwg::reference_type::HandleReference;

use super::stream_reader::IDwgStreamReader;
use super::{bit_codes, bit_ops, handle_reference, modular};

use encoding_rs::Encoding;

/// Configuration options for the stream reader.
#[derive(Debug, Clone)]
pub struct DwgStreamReaderConfiguration {
    /// Largest handle payload accepted, in bytes.
    ///
    /// Default: 8. Larger values are clamped to 8.
    pub max_handle_bytes: usize,

    /// Code page used to decode variable text.
    ///
    /// Default: Windows-1252.
    pub encoding: &'static Encoding,
}

impl Default for DwgStreamReaderConfiguration {
    fn default() -> Self {
        Self {
            max_handle_bytes: MAX_HANDLE_BYTES,
            encoding: encoding_rs::WINDOWS_1252,
        }
    }
}

/// Bit-level reader over a borrowed DWG record buffer.
#[derive(Debug, Clone)]
pub struct DwgStreamReaderBase<'a> {
    data: &'a [u8],
    position: usize,
    config: DwgStreamReaderConfiguration,
}

impl<'a> DwgStreamReaderBase<'a> {
    /// Create a reader at bit 0 with the default configuration.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, DwgStreamReaderConfiguration::default())
    }

    /// Create a reader at bit 0 with a custom configuration.
    pub fn with_config(data: &'a [u8], config: DwgStreamReaderConfiguration) -> Self {
        Self {
            data,
            position: 0,
            config,
        }
    }

    /// Create a reader starting at the given bit position.
    pub fn new_at(data: &'a [u8], position: usize) -> Self {
        let mut reader = Self::new(data);
        reader.set_position_in_bits(position);
        reader
    }

    /// The configuration in use.
    pub fn config(&self) -> &DwgStreamReaderConfiguration {
        &self.config
    }

    /// Set the text encoding.
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.config.encoding = encoding;
    }

    /// The underlying buffer.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Byte length of the underlying buffer.
    pub fn stream_length(&self) -> usize {
        self.data.len()
    }
}

impl IDwgStreamReader for DwgStreamReaderBase<'_> {
    fn position_in_bits(&self) -> usize {
        self.position
    }

    fn set_position_in_bits(&mut self, position: usize) {
        self.position = position;
    }

    fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.position)
    }

    fn read_bit(&mut self) -> Result<bool> {
        bit_ops::read_bit(self.data, &mut self.position)
    }

    fn read_2bits(&mut self) -> Result<u8> {
        bit_ops::read_2bits(self.data, &mut self.position)
    }

    fn read_3bits(&mut self) -> Result<u8> {
        bit_ops::read_3bits(self.data, &mut self.position)
    }

    fn read_4bits(&mut self) -> Result<u8> {
        bit_ops::read_4bits(self.data, &mut self.position)
    }

    fn read_bit_short(&mut self) -> Result<i16> {
        bit_codes::read_bit_short(self.data, &mut self.position)
    }

    fn read_bit_long(&mut self) -> Result<i32> {
        bit_codes::read_bit_long(self.data, &mut self.position)
    }

    fn read_bit_double(&mut self) -> Result<f64> {
        bit_codes::read_bit_double(self.data, &mut self.position)
    }

    fn read_bit_double_with_default(&mut self, def: f64) -> Result<f64> {
        bit_codes::read_bit_double_with_default(self.data, &mut self.position, def)
    }

    fn read_raw_char(&mut self) -> Result<u8> {
        bit_ops::read_raw_char(self.data, &mut self.position)
    }

    fn read_raw_short(&mut self) -> Result<i16> {
        bit_ops::read_raw_short(self.data, &mut self.position)
    }

    fn read_raw_ushort(&mut self) -> Result<u16> {
        bit_ops::read_raw_ushort(self.data, &mut self.position)
    }

    fn read_raw_long(&mut self) -> Result<i32> {
        bit_ops::read_raw_long(self.data, &mut self.position)
    }

    fn read_raw_double(&mut self) -> Result<f64> {
        bit_ops::read_raw_double(self.data, &mut self.position)
    }

    fn read_bytes(&mut self, length: usize) -> Result<Vec<u8>> {
        bit_ops::read_bytes(self.data, &mut self.position, length)
    }

    fn read_modular_char(&mut self) -> Result<u64> {
        modular::read_modular_char(self.data, &mut self.position)
    }

    fn read_signed_modular_char(&mut self) -> Result<i64> {
        modular::read_signed_modular_char(self.data, &mut self.position)
    }

    fn read_modular_short(&mut self) -> Result<u32> {
        modular::read_modular_short(self.data, &mut self.position)
    }

    fn handle_reference(&mut self) -> Result<HandleReference> {
        handle_reference::read_handle_with_limit(
            self.data,
            &mut self.position,
            self.config.max_handle_bytes,
        )
    }

    fn handle_reference_8bit_length(&mut self) -> Result<HandleReference> {
        handle_reference::read_handle_8bit_length_with_limit(
            self.data,
            &mut self.position,
            self.config.max_handle_bytes,
        )
    }

    fn read_variable_text(&mut self) -> Result<String> {
        bit_codes::read_variable_text_with_encoding(
            self.data,
            &mut self.position,
            self.config.encoding,
        )
    }

    fn read_sentinel(&mut self) -> Result<[u8; SENTINEL_SIZE]> {
        bit_ops::read_sentinel(self.data, &mut self.position)
    }
}
