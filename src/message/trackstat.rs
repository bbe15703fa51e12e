//! Channel tracking status
use crate::{
    message::{bounded_count, PositionType, SolutionStatus, TrackingStatus},
    utils::Utils,
    DecodeError,
};

use gnss::prelude::SV;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [TrackChannel] state of one hardware tracking channel
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackChannel {
    /// Satellite PRN (or GLONASS slot)
    pub prn: i16,
    /// GLONASS frequency channel + 7
    pub glonass_frequency: i16,
    /// [TrackingStatus]
    pub tracking_status: TrackingStatus,
    /// Pseudorange, in meters
    pub pseudorange: f64,
    /// Doppler frequency, in Hz
    pub doppler: f32,
    /// Carrier to noise density ratio, in dB-Hz
    pub cn0: f32,
    /// Continuous tracking duration, in seconds
    pub locktime: f32,
    /// Pseudorange residual from the solution, in meters
    pub pseudorange_residual: f32,
    /// Range reject code
    pub reject_code: u32,
    /// Pseudorange weight in the solution
    pub pseudorange_weight: f32,
}

impl TrackChannel {
    pub(crate) const fn encoding_size() -> usize {
        40
    }

    /// Returns the [SV] tracked on this channel, if any
    pub fn sv(&self) -> Option<SV> {
        let prn = u16::try_from(self.prn).ok()?;
        self.tracking_status.sv(prn)
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            prn: Utils::decode_i16(&buf[0..])?,
            glonass_frequency: Utils::decode_i16(&buf[2..])?,
            tracking_status: TrackingStatus::from_word(Utils::decode_u32(&buf[4..])?),
            pseudorange: Utils::decode_f64(&buf[8..])?,
            doppler: Utils::decode_f32(&buf[16..])?,
            cn0: Utils::decode_f32(&buf[20..])?,
            locktime: Utils::decode_f32(&buf[24..])?,
            pseudorange_residual: Utils::decode_f32(&buf[28..])?,
            reject_code: Utils::decode_u32(&buf[32..])?,
            pseudorange_weight: Utils::decode_f32(&buf[36..])?,
        })
    }

    fn encode(&self, buf: &mut [u8]) {
        Utils::encode(&self.prn.to_le_bytes(), buf, 0);
        Utils::encode(&self.glonass_frequency.to_le_bytes(), buf, 2);
        Utils::encode(&self.tracking_status.to_word().to_le_bytes(), buf, 4);
        Utils::encode(&self.pseudorange.to_le_bytes(), buf, 8);
        Utils::encode(&self.doppler.to_le_bytes(), buf, 16);
        Utils::encode(&self.cn0.to_le_bytes(), buf, 20);
        Utils::encode(&self.locktime.to_le_bytes(), buf, 24);
        Utils::encode(&self.pseudorange_residual.to_le_bytes(), buf, 28);
        Utils::encode(&self.reject_code.to_le_bytes(), buf, 32);
        Utils::encode(&self.pseudorange_weight.to_le_bytes(), buf, 36);
    }
}

/// [TrackStat] reports the state of every tracking channel
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackStat {
    /// [SolutionStatus]
    pub solution_status: SolutionStatus,
    /// [PositionType]
    pub position_type: PositionType,
    /// Tracking elevation cutoff angle, in degrees
    pub elevation_cutoff: f32,
    /// Channels, in hardware order
    pub channels: Vec<TrackChannel>,
}

impl TrackStat {
    const HEADER_SIZE: usize = 16;

    pub(crate) fn encoding_size(&self) -> usize {
        Self::HEADER_SIZE + self.channels.len() * TrackChannel::encoding_size()
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < Self::HEADER_SIZE {
            return Err(DecodeError::NotEnoughBytes);
        }

        let count = Utils::decode_i32(&buf[12..16])?;
        let count = bounded_count(
            count as i64,
            Self::HEADER_SIZE,
            TrackChannel::encoding_size(),
            buf.len(),
        )?;

        let mut channels = Vec::with_capacity(count);
        for i in 0..count {
            let offset = Self::HEADER_SIZE + i * TrackChannel::encoding_size();
            channels.push(TrackChannel::decode(&buf[offset..])?);
        }

        Ok(Self {
            solution_status: Utils::decode_u32(&buf[0..4])?.into(),
            position_type: Utils::decode_u32(&buf[4..8])?.into(),
            elevation_cutoff: Utils::decode_f32(&buf[8..12])?,
            channels,
        })
    }

    pub(crate) fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = self.encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        Utils::encode(&u32::from(self.solution_status).to_le_bytes(), buf, 0);
        Utils::encode(&u32::from(self.position_type).to_le_bytes(), buf, 4);
        Utils::encode(&self.elevation_cutoff.to_le_bytes(), buf, 8);
        Utils::encode(&(self.channels.len() as i32).to_le_bytes(), buf, 12);

        for (i, channel) in self.channels.iter().enumerate() {
            let offset = Self::HEADER_SIZE + i * TrackChannel::encoding_size();
            channel.encode(&mut buf[offset..]);
        }
        Ok(size)
    }
}
