//! Satellite positions and corrections
use crate::{message::bounded_count, utils::Utils, DecodeError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Satellite] position and corrections, as used in the solution
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Satellite {
    /// Satellite PRN (or GLONASS slot)
    pub prn: u32,
    /// ECEF X coordinate, in meters
    pub x: f64,
    /// ECEF Y coordinate, in meters
    pub y: f64,
    /// ECEF Z coordinate, in meters
    pub z: f64,
    /// Satellite clock correction, in meters
    pub clock_correction: f64,
    /// Ionospheric correction, in meters
    pub ionospheric_delay: f64,
    /// Tropospheric correction, in meters
    pub tropospheric_delay: f64,
}

impl Satellite {
    pub(crate) const fn encoding_size() -> usize {
        68
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        Ok(Self {
            prn: Utils::decode_u32(&buf[0..])?,
            x: Utils::decode_f64(&buf[4..])?,
            y: Utils::decode_f64(&buf[12..])?,
            z: Utils::decode_f64(&buf[20..])?,
            clock_correction: Utils::decode_f64(&buf[28..])?,
            ionospheric_delay: Utils::decode_f64(&buf[36..])?,
            tropospheric_delay: Utils::decode_f64(&buf[44..])?,
        })
    }

    fn encode(&self, buf: &mut [u8]) {
        Utils::encode(&self.prn.to_le_bytes(), buf, 0);
        Utils::encode(&self.x.to_le_bytes(), buf, 4);
        Utils::encode(&self.y.to_le_bytes(), buf, 12);
        Utils::encode(&self.z.to_le_bytes(), buf, 20);
        Utils::encode(&self.clock_correction.to_le_bytes(), buf, 28);
        Utils::encode(&self.ionospheric_delay.to_le_bytes(), buf, 36);
        Utils::encode(&self.tropospheric_delay.to_le_bytes(), buf, 44);
        buf[52..68].fill(0);
    }
}

/// [SatXyz] lists the satellites used in the current solution
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatXyz {
    /// Satellites, in streaming order
    pub satellites: Vec<Satellite>,
}

impl SatXyz {
    const HEADER_SIZE: usize = 12;

    pub(crate) fn encoding_size(&self) -> usize {
        Self::HEADER_SIZE + self.satellites.len() * Satellite::encoding_size()
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        let count = Utils::decode_u32(buf.get(8..).ok_or(DecodeError::NotEnoughBytes)?)?;
        let count = bounded_count(
            count as i64,
            Self::HEADER_SIZE,
            Satellite::encoding_size(),
            buf.len(),
        )?;

        let mut satellites = Vec::with_capacity(count);
        for i in 0..count {
            let offset = Self::HEADER_SIZE + i * Satellite::encoding_size();
            satellites.push(Satellite::decode(&buf[offset..])?);
        }
        Ok(Self { satellites })
    }

    pub(crate) fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = self.encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        buf[0..8].fill(0);
        Utils::encode(&(self.satellites.len() as u32).to_le_bytes(), buf, 8);

        for (i, sat) in self.satellites.iter().enumerate() {
            let offset = Self::HEADER_SIZE + i * Satellite::encoding_size();
            sat.encode(&mut buf[offset..]);
        }
        Ok(size)
    }
}
