//! Byte transports the [crate::prelude::Decoder] pulls from
use std::{
    io::{Error as IoError, ErrorKind, Read},
    time::Duration,
};

use thiserror::Error;

#[cfg(feature = "serial")]
use serialport::SerialPort;

#[cfg(feature = "serial")]
use std::io::Write;

#[derive(Error, Debug)]
pub enum TransportError {
    /// No byte arrived within the timeout. Recoverable.
    #[error("timeout")]
    Timeout,
    /// End of stream
    #[error("transport closed")]
    Closed,
    #[error("i/o error: {0}")]
    Io(#[from] IoError),
    #[error("operation not supported by this transport")]
    Unsupported,
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

/// [Transport] is a bidirectional byte link to the receiver.
pub trait Transport {
    /// Reads a single byte, waiting at most `timeout`.
    fn read_byte(&mut self, timeout: Duration) -> Result<u8, TransportError>;

    /// Writes all bytes to the receiver.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    /// Modifies the local baud rate, when this [Transport] has one.
    fn set_baud_rate(&mut self, _baud_rate: u32) -> Result<(), TransportError> {
        Err(TransportError::Unsupported)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn read_byte(&mut self, timeout: Duration) -> Result<u8, TransportError> {
        (**self).read_byte(timeout)
    }
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        (**self).write_bytes(bytes)
    }
    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        (**self).set_baud_rate(baud_rate)
    }
}

/// [ReaderTransport] replays any [Read]able interface, typically
/// a recorded binary log. It is read only: the timeout is ignored
/// and end of file is reported as [TransportError::Closed].
pub struct ReaderTransport<R: Read> {
    reader: R,
}

impl<R: Read> ReaderTransport<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Releases the inner reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Transport for ReaderTransport<R> {
    fn read_byte(&mut self, _timeout: Duration) -> Result<u8, TransportError> {
        let mut byte = [0_u8];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Err(TransportError::Closed),
                Ok(_) => return Ok(byte[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Err(TransportError::Unsupported)
    }
}

/// [SerialTransport] drives a physical serial port
#[cfg(feature = "serial")]
#[cfg_attr(docsrs, doc(cfg(feature = "serial")))]
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    timeout: Option<Duration>,
}

#[cfg(feature = "serial")]
impl SerialTransport {
    /// Opens the serial port at given baud rate, 8N1 without flow control
    pub fn open(path: &str, baud_rate: u32) -> Result<Self, TransportError> {
        let port = serialport::new(path, baud_rate).open()?;
        Ok(Self::new(port))
    }

    /// Wraps an already opened [SerialPort]
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self {
            port,
            timeout: None,
        }
    }

    /// Current local baud rate
    pub fn baud_rate(&self) -> Result<u32, TransportError> {
        Ok(self.port.baud_rate()?)
    }
}

#[cfg(feature = "serial")]
impl Transport for SerialTransport {
    fn read_byte(&mut self, timeout: Duration) -> Result<u8, TransportError> {
        if self.timeout != Some(timeout) {
            self.port.set_timeout(timeout)?;
            self.timeout = Some(timeout);
        }
        let mut byte = [0_u8];
        match self.port.read(&mut byte) {
            Ok(0) => Err(TransportError::Closed),
            Ok(_) => Ok(byte[0]),
            Err(e) => match e.kind() {
                ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted => {
                    Err(TransportError::Timeout)
                },
                _ => Err(e.into()),
            },
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.port.write_all(bytes)?;
        self.port.flush()?;
        Ok(())
    }

    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        self.port.set_baud_rate(baud_rate)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{ReaderTransport, Transport, TransportError};
    use std::io::Cursor;
    use std::time::Duration;

    #[test]
    fn replay() {
        let mut transport = ReaderTransport::new(Cursor::new(vec![0xAA, 0x44]));
        let timeout = Duration::from_millis(1);
        assert_eq!(transport.read_byte(timeout).unwrap(), 0xAA);
        assert_eq!(transport.read_byte(timeout).unwrap(), 0x44);
        assert!(matches!(
            transport.read_byte(timeout),
            Err(TransportError::Closed)
        ));
        assert!(matches!(
            transport.write_bytes(b"UNLOGALL\r\n"),
            Err(TransportError::Unsupported)
        ));
        assert!(matches!(
            transport.set_baud_rate(115_200),
            Err(TransportError::Unsupported)
        ));
    }
}
