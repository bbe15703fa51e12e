//! Binary stream [Encoder]
use std::io::Write;

use crate::{frame::Frame, Error};

/// [Encoder] streams [Frame]s on any writable interface,
/// in the receiver's binary format.
pub struct Encoder<W: Write> {
    /// [W]
    writer: W,
    /// Encoding buffer, reused between frames
    buffer: Vec<u8>,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::new(),
        }
    }

    /// Encodes and writes one [Frame], returns the number of bytes written.
    pub fn encode(&mut self, frame: &Frame) -> Result<usize, Error> {
        let size = frame.encoding_size();
        self.buffer.resize(size, 0);
        frame.encode(&mut self.buffer)?;
        self.writer.write_all(&self.buffer)?;
        Ok(size)
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.writer.flush()?;
        Ok(())
    }

    /// Releases the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}
