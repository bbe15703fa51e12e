//! Satellite range observations
use crate::{
    message::{bounded_count, TrackingStatus},
    utils::Utils,
    DecodeError,
};

use gnss::prelude::SV;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [RangeObservation] one code and carrier observation
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangeObservation {
    /// Satellite PRN (or GLONASS slot)
    pub prn: u16,
    /// GLONASS frequency channel + 7
    pub glonass_frequency: u16,
    /// Pseudorange, in meters
    pub pseudorange: f64,
    /// Pseudorange standard deviation, in meters
    pub pseudorange_sigma: f32,
    /// Accumulated Doppler range (carrier phase), in cycles.
    /// Negative by convention.
    pub carrier_phase: f64,
    /// Carrier phase standard deviation, in cycles
    pub carrier_phase_sigma: f32,
    /// Instantaneous Doppler, in Hz
    pub doppler: f32,
    /// Carrier to noise density ratio, in dB-Hz
    pub cn0: f32,
    /// Continuous tracking duration, in seconds
    pub locktime: f32,
    /// [TrackingStatus]
    pub tracking_status: TrackingStatus,
}

impl RangeObservation {
    pub(crate) const fn encoding_size() -> usize {
        44
    }

    /// Returns the observed [SV]
    pub fn sv(&self) -> Option<SV> {
        self.tracking_status.sv(self.prn)
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            prn: Utils::decode_u16(&buf[0..])?,
            glonass_frequency: Utils::decode_u16(&buf[2..])?,
            pseudorange: Utils::decode_f64(&buf[4..])?,
            pseudorange_sigma: Utils::decode_f32(&buf[12..])?,
            carrier_phase: Utils::decode_f64(&buf[16..])?,
            carrier_phase_sigma: Utils::decode_f32(&buf[24..])?,
            doppler: Utils::decode_f32(&buf[28..])?,
            cn0: Utils::decode_f32(&buf[32..])?,
            locktime: Utils::decode_f32(&buf[36..])?,
            tracking_status: TrackingStatus::from_word(Utils::decode_u32(&buf[40..])?),
        })
    }

    fn encode(&self, buf: &mut [u8]) {
        Utils::encode(&self.prn.to_le_bytes(), buf, 0);
        Utils::encode(&self.glonass_frequency.to_le_bytes(), buf, 2);
        Utils::encode(&self.pseudorange.to_le_bytes(), buf, 4);
        Utils::encode(&self.pseudorange_sigma.to_le_bytes(), buf, 12);
        Utils::encode(&self.carrier_phase.to_le_bytes(), buf, 16);
        Utils::encode(&self.carrier_phase_sigma.to_le_bytes(), buf, 24);
        Utils::encode(&self.doppler.to_le_bytes(), buf, 28);
        Utils::encode(&self.cn0.to_le_bytes(), buf, 32);
        Utils::encode(&self.locktime.to_le_bytes(), buf, 36);
        Utils::encode(&self.tracking_status.to_word().to_le_bytes(), buf, 40);
    }
}

/// [Range] observations, one per tracked signal
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Range {
    /// Observations, in streaming order
    pub observations: Vec<RangeObservation>,
}

impl Range {
    const HEADER_SIZE: usize = 4;

    pub(crate) fn encoding_size(&self) -> usize {
        Self::HEADER_SIZE + self.observations.len() * RangeObservation::encoding_size()
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        // observation count is a 4-byte field: first observation sits at offset 4
        let count = Utils::decode_u32(buf)?;
        let count = bounded_count(
            count as i64,
            Self::HEADER_SIZE,
            RangeObservation::encoding_size(),
            buf.len(),
        )?;

        let mut observations = Vec::with_capacity(count);
        for i in 0..count {
            let offset = Self::HEADER_SIZE + i * RangeObservation::encoding_size();
            observations.push(RangeObservation::decode(&buf[offset..])?);
        }
        Ok(Self { observations })
    }

    pub(crate) fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = self.encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        Utils::encode(&(self.observations.len() as u32).to_le_bytes(), buf, 0);
        for (i, obs) in self.observations.iter().enumerate() {
            let offset = Self::HEADER_SIZE + i * RangeObservation::encoding_size();
            obs.encode(&mut buf[offset..]);
        }
        Ok(size)
    }
}
