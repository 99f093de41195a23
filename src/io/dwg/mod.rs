//! DWG bitstream primitives.
//!
//! DWG object records are packed bit by bit rather than byte by byte. This
//! module decodes (and encodes) the primitive value types those records are
//! built from.
//!
//! # Module Structure
//!
//! - [`constants`] - Prefix codes and size limits of the encodings
//! - [`crc`] - CRC-8 (16-bit) checksum over byte ranges
//! - [`reference_type`] - Handle reference codes and resolution
//! - [`reader`] - Bit-level decoders and the stream reader
//! - [`writer`] - Bit-level encoders and the stream writer

pub mod constants;
pub mod crc;
pub mod reader;
pub mod reference_type;
pub mod writer;

// Re-export commonly used types
pub use crc::{crc8, crc8_range, Crc8};
pub use reader::{DwgStreamReaderBase, DwgStreamReaderConfiguration, IDwgStreamReader};
pub use reference_type::{DwgReferenceType, HandleReference};
pub use writer::{DwgStreamWriterBase, IDwgStreamWriter};
