//! Complete binary frame
use crate::{
    constants::Constants,
    crc::{byte_swap, crc32},
    header::Header,
    message::Record,
    utils::Utils,
    DecodeError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Frame] is one validated [Header] and its decoded [Record]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// [Header]
    pub header: Header,
    /// Decoded [Record]
    pub record: Record,
    /// False when the trailing CRC did not match and the frame
    /// was forwarded anyway.
    pub crc_valid: bool,
}

impl Frame {
    /// Builds a new [Frame] from a [Header] template and a [Record].
    /// Message ID and message length are deduced from the [Record].
    /// The message length saturates for records larger than the length
    /// field allows: [Frame::encode] refuses those.
    pub fn new(header: Header, record: Record) -> Self {
        let header = Header {
            message_id: record.message_id().into(),
            message_length: u16::try_from(record.encoding_size()).unwrap_or(u16::MAX),
            ..header
        };
        Self {
            header,
            record,
            crc_valid: true,
        }
    }

    /// Total number of bytes this [Frame] requires once encoded
    pub fn encoding_size(&self) -> usize {
        Header::SIZE + self.record.encoding_size() + Constants::CRC_SIZE
    }

    /// Encodes this [Frame] into the buffer: header, payload and trailing CRC.
    /// The CRC is streamed byte reversed, as the receiver does.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = self.encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        let payload_len = self.record.encoding_size();
        let message_length = u16::try_from(payload_len)
            .map_err(|_| DecodeError::RecordTooLarge(payload_len))?;

        let header = Header {
            message_length,
            ..self.header
        };

        header.encode(buf)?;
        self.record.encode(&mut buf[Header::SIZE..])?;

        let crc_offset = Header::SIZE + payload_len;
        let crc = byte_swap(crc32(&buf[..crc_offset]));
        Utils::encode(&crc.to_le_bytes(), buf, crc_offset);

        Ok(size)
    }

    /// Encodes this [Frame] into a new buffer
    pub fn to_bytes(&self) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0; self.encoding_size()];
        self.encode(&mut buf)?;
        Ok(buf)
    }
}
