//! Frame header
use crate::{
    constants::Constants,
    message::{MessageID, ReceiverStatus, TimeStatus},
    utils::Utils,
    DecodeError,
};

use hifitime::{Epoch, TimeScale};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Header] of each binary frame, following the sync bytes
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Message identifier, see [MessageID]
    pub message_id: u16,
    /// Message type: format, measurement source and response bit
    pub message_type: u8,
    /// Port the log was emitted on
    pub port_address: u8,
    /// Payload length, in bytes
    pub message_length: u16,
    /// Remaining number of logs in a group of related logs
    pub sequence: u16,
    /// Processor idle time, in half percents
    pub idle_time: u8,
    /// Raw time status, see [Self::time_status]
    pub time_status: u8,
    /// GPS week number
    pub gps_week: u16,
    /// Milliseconds into the GPS week
    pub gps_milliseconds: u32,
    /// [ReceiverStatus] flags
    pub receiver_status: ReceiverStatus,
    /// Reserved
    pub reserved: u16,
    /// Receiver software build number
    pub receiver_sw_version: u16,
}

impl Header {
    /// Header size in bytes, sync bytes included
    pub const SIZE: usize = Constants::HEADER_LENGTH as usize;

    /// Decodes a [Header] from the first 28 bytes of a frame.
    /// Sync bytes are assumed to have been verified already.
    pub fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < Self::SIZE {
            return Err(DecodeError::NotEnoughBytes);
        }

        let header_length = buf[Constants::HEADER_LENGTH_OFFSET];
        if header_length != Constants::HEADER_LENGTH {
            return Err(DecodeError::InvalidHeaderLength(header_length));
        }

        let message_length = Utils::decode_u16(&buf[8..10])?;
        if message_length == 0 {
            return Err(DecodeError::ZeroLengthMessage);
        }

        Ok(Self {
            message_id: Utils::decode_u16(&buf[4..6])?,
            message_type: Utils::decode_u8(&buf[6..])?,
            port_address: Utils::decode_u8(&buf[7..])?,
            message_length,
            sequence: Utils::decode_u16(&buf[10..12])?,
            idle_time: Utils::decode_u8(&buf[12..])?,
            time_status: Utils::decode_u8(&buf[13..])?,
            gps_week: Utils::decode_u16(&buf[14..16])?,
            gps_milliseconds: Utils::decode_u32(&buf[16..20])?,
            receiver_status: ReceiverStatus::from_word(Utils::decode_u32(&buf[20..24])?),
            reserved: Utils::decode_u16(&buf[24..26])?,
            receiver_sw_version: Utils::decode_u16(&buf[26..28])?,
        })
    }

    /// Encodes this [Header], sync bytes included.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        if buf.len() < Self::SIZE {
            return Err(DecodeError::NotEnoughBytes);
        }

        Utils::encode(&Constants::SYNC, buf, 0);
        buf[Constants::HEADER_LENGTH_OFFSET] = Constants::HEADER_LENGTH;
        Utils::encode(&self.message_id.to_le_bytes(), buf, 4);
        buf[6] = self.message_type;
        buf[7] = self.port_address;
        Utils::encode(&self.message_length.to_le_bytes(), buf, 8);
        Utils::encode(&self.sequence.to_le_bytes(), buf, 10);
        buf[12] = self.idle_time;
        buf[13] = self.time_status;
        Utils::encode(&self.gps_week.to_le_bytes(), buf, 14);
        Utils::encode(&self.gps_milliseconds.to_le_bytes(), buf, 16);
        Utils::encode(&self.receiver_status.bits().to_le_bytes(), buf, 20);
        Utils::encode(&self.reserved.to_le_bytes(), buf, 24);
        Utils::encode(&self.receiver_sw_version.to_le_bytes(), buf, 26);

        Ok(Self::SIZE)
    }

    /// [MessageID] carried by this [Header]
    pub fn mid(&self) -> MessageID {
        MessageID::from(self.message_id)
    }

    /// [TimeStatus] of the receiver clock
    pub fn time_status(&self) -> TimeStatus {
        TimeStatus::from(self.time_status)
    }

    /// True when this frame is a response to a command
    pub fn is_response(&self) -> bool {
        self.message_type & 0x80 != 0
    }

    /// Measurement source: 0 for the primary antenna,
    /// 1 for the secondary antenna.
    pub fn measurement_source(&self) -> u8 {
        (self.message_type >> 5) & 0x03
    }

    /// Processor idle time, in percent
    pub fn idle_percent(&self) -> f32 {
        self.idle_time as f32 / 2.0
    }

    /// Time of applicability, expressed in [TimeScale::GPST].
    /// None until the receiver time is at least coarsely known.
    pub fn epoch(&self) -> Option<Epoch> {
        if !self.time_status().is_valid() {
            return None;
        }
        let nanos = self.gps_milliseconds as u64 * 1_000_000;
        Some(Epoch::from_time_of_week(
            self.gps_week as u32,
            nanos,
            TimeScale::GPST,
        ))
    }
}
