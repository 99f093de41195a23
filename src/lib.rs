//! # dwg-bitstream
//!
//! Primitive bitstream decoding for the DWG CAD format.
//!
//! DWG object records are bit-packed: values start at arbitrary bit
//! offsets and most of them carry a short prefix code that selects a
//! compact encoding. This crate decodes those primitives from an in-memory
//! buffer and a bit cursor, and provides the matching encoders.
//!
//! ## Features
//!
//! - Single bits, 2/3/4-bit codes, raw chars/shorts/longs/doubles at any bit offset
//! - Prefix-coded BitShort, BitLong, BitDouble and BitDouble-with-default
//! - Modular chars (signed and unsigned) and modular shorts
//! - Handle references and their resolution against an owner handle
//! - Length-prefixed text decoded through a configurable code page
//! - CRC-8 (16-bit) checksums
//!
//! ## Quick Start
//!
//! ```rust
//! use dwg_bitstream::{read_bit_short, read_handle};
//!
//! // BS code 01 followed by 0x2A, then a soft pointer handle to 0x1A
//! let data = [0x4A, 0x90, 0x46, 0x80];
//! let mut cursor = 0;
//! assert_eq!(read_bit_short(&data, &mut cursor)?, 42);
//! assert_eq!(cursor, 10);
//!
//! let handle = read_handle(&data, &mut cursor)?;
//! assert_eq!(handle.code(), 4);
//! assert_eq!(handle.value(), 0x1A);
//! # Ok::<(), dwg_bitstream::DwgError>(())
//! ```
//!
//! ## Architecture
//!
//! - free functions over `(&[u8], &mut usize)` in [`io::dwg::reader`]
//! - `IDwgStreamReader` - trait for readers that own their cursor
//! - `DwgStreamReaderBase` - buffer-backed reader
//! - `DwgStreamWriterBase` - the inverse encoder
//!
//! Every read either succeeds and advances the cursor by exactly the bits
//! it consumed, or fails and leaves the cursor untouched.

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod io;

// Re-export commonly used types
pub use error::{DwgError, Result};

pub use io::dwg::crc::{crc8, crc8_range, Crc8};
pub use io::dwg::reader::{
    read_2bits, read_3bits, read_4bits, read_bit, read_bit_double,
    read_bit_double_with_default, read_bit_long, read_bit_short, read_bytes, read_handle,
    read_handle_8bit_length, read_modular_char, read_modular_short, read_raw_char,
    read_raw_double, read_raw_long, read_raw_short, read_raw_ushort, read_sentinel,
    read_signed_modular_char, read_text_bytes, read_variable_text,
    read_variable_text_with_encoding,
};
pub use io::dwg::reference_type::{DwgReferenceType, HandleReference};
pub use io::dwg::{
    DwgStreamReaderBase, DwgStreamReaderConfiguration, DwgStreamWriterBase, IDwgStreamReader,
    IDwgStreamWriter,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
