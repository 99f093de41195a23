//! I/O module for the DWG binary format

pub mod dwg;

pub use dwg::{DwgStreamReaderBase, DwgStreamWriterBase, IDwgStreamReader, IDwgStreamWriter};
