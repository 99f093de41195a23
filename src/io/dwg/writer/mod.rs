//! DWG bit-level stream writers.
//!
//! - [`stream_writer`] - the `IDwgStreamWriter` trait
//! - [`stream_writer_base`] - the in-memory implementation

pub mod stream_writer;
pub mod stream_writer_base;

pub use stream_writer::IDwgStreamWriter;
pub use stream_writer_base::DwgStreamWriterBase;
