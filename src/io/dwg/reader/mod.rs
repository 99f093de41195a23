//! DWG bit-level stream readers.
//!
//! Every primitive is available two ways:
//!
//! - as a free function over `(data: &[u8], cursor: &mut usize)`, for
//!   callers that manage their own bit cursor
//! - through [`DwgStreamReaderBase`], which owns the cursor and implements
//!   the [`IDwgStreamReader`] trait
//!
//! ## Modules
//! - [`bit_ops`] - single bits, small bit groups, raw fixed-width values
//! - [`bit_codes`] - prefix-coded values (BS, BL, BD, DD) and variable text
//! - [`modular`] - continuation-encoded integers (MC, MS)
//! - [`handle_reference`] - handle references
//! - [`stream_reader`] - the `IDwgStreamReader` trait
//! - [`stream_reader_base`] - the buffer-backed implementation

pub mod bit_codes;
pub mod bit_ops;
pub mod handle_reference;
pub mod modular;
pub mod stream_reader;
pub mod stream_reader_base;

pub use bit_codes::{
    read_bit_double, read_bit_double_with_default, read_bit_long, read_bit_short,
    read_text_bytes, read_variable_text, read_variable_text_with_encoding,
};
pub use bit_ops::{
    read_2bits, read_3bits, read_4bits, read_bit, read_bytes, read_raw_char, read_raw_double,
    read_raw_long, read_raw_short, read_raw_ushort, read_sentinel,
};
pub use handle_reference::{
    read_handle, read_handle_8bit_length, read_handle_8bit_length_with_limit,
    read_handle_with_limit,
};
pub use modular::{read_modular_char, read_modular_short, read_signed_modular_char};
pub use stream_reader::IDwgStreamReader;
pub use stream_reader_base::{DwgStreamReaderBase, DwgStreamReaderConfiguration};
