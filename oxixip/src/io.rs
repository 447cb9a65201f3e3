//! Reader/writer wrappers for XIP artifacts.
//!
//! XIP has no streaming form: the code table is only known once the whole
//! input has been seen, so both wrappers work on complete buffers.
//!
//! # Example
//!
//! ```rust
//! use oxixip::{XipReader, XipWriter};
//! use std::io::Cursor;
//!
//! let mut writer = XipWriter::new(Vec::new());
//! writer.write_compressed(b"banana bandana").unwrap();
//! let artifact = writer.into_inner();
//!
//! let mut reader = XipReader::new(Cursor::new(artifact));
//! assert_eq!(reader.decompress().unwrap(), b"banana bandana");
//! ```

use crate::config::XipConfig;
use crate::decoder::XipDecoder;
use crate::encoder::XipEncoder;
use crate::error::Result;
use std::io::{Read, Write};

/// XIP artifact reader.
pub struct XipReader<R: Read> {
    reader: R,
    decoder: XipDecoder,
}

impl<R: Read> XipReader<R> {
    /// Create a new reader without an output size limit.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: XipDecoder::new(),
        }
    }

    /// Create a new reader that refuses to decode more than `max_output` bytes.
    pub fn with_limit(reader: R, max_output: usize) -> Self {
        Self {
            reader,
            decoder: XipDecoder::with_limit(max_output),
        }
    }

    /// Read the remaining artifact and decompress it.
    pub fn decompress(&mut self) -> Result<Vec<u8>> {
        let mut artifact = Vec::new();
        self.reader.read_to_end(&mut artifact)?;
        self.decoder.decode(&artifact)
    }

    /// Get the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// XIP artifact writer.
pub struct XipWriter<W: Write> {
    writer: W,
    encoder: XipEncoder,
}

impl<W: Write> XipWriter<W> {
    /// Create a new writer with the compatible configuration.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, XipConfig::default())
    }

    /// Create a new writer with the given configuration.
    pub fn with_config(writer: W, config: XipConfig) -> Self {
        Self {
            writer,
            encoder: XipEncoder::new(config),
        }
    }

    /// Compress `data` and write the complete artifact.
    pub fn write_compressed(&mut self, data: &[u8]) -> Result<()> {
        let artifact = self.encoder.encode(data);
        self.writer.write_all(&artifact)?;
        Ok(())
    }

    /// Get the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
