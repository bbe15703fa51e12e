//! Best position and velocity, ECEF coordinates
use crate::{
    message::{PositionType, SolutionStatus},
    utils::Utils,
    DecodeError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [BestXyz] best available position and velocity solution,
/// expressed in ECEF coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestXyz {
    /// Position [SolutionStatus]
    pub position_status: SolutionStatus,
    /// Position [PositionType]
    pub position_type: PositionType,
    /// Position (x, y, z) in meters
    pub position_ecef_m: [f64; 3],
    /// Position standard deviation (x, y, z) in meters
    pub position_sigma_m: [f32; 3],
    /// Velocity [SolutionStatus]
    pub velocity_status: SolutionStatus,
    /// Velocity [PositionType]
    pub velocity_type: PositionType,
    /// Velocity (x, y, z) in m/s
    pub velocity_ecef_m_s: [f64; 3],
    /// Velocity standard deviation (x, y, z) in m/s
    pub velocity_sigma_m_s: [f32; 3],
    /// Base station identifier
    pub station_id: [u8; 4],
    /// Velocity time tag latency, in seconds
    pub velocity_latency_s: f32,
    /// Differential age, in seconds
    pub differential_age_s: f32,
    /// Solution age, in seconds
    pub solution_age_s: f32,
    /// Number of satellites tracked
    pub satellites_tracked: u8,
    /// Number of satellites used in solution
    pub satellites_used: u8,
    /// Number of satellites with L1/E1/B1 signals used in solution
    pub satellites_l1_used: u8,
    /// Number of satellites with multi-frequency signals used in solution
    pub satellites_multi_used: u8,
    /// Extended solution status
    pub extended_status: u8,
    /// Galileo and BeiDou signals used mask
    pub galileo_beidou_mask: u8,
    /// GPS and GLONASS signals used mask
    pub gps_glonass_mask: u8,
}

impl BestXyz {
    pub(crate) const fn encoding_size() -> usize {
        112
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < Self::encoding_size() {
            return Err(DecodeError::NotEnoughBytes);
        }

        let position_status = Utils::decode_u32(&buf[0..4])?.into();
        let position_type = Utils::decode_u32(&buf[4..8])?.into();

        let position_ecef_m = [
            Utils::decode_f64(&buf[8..16])?,
            Utils::decode_f64(&buf[16..24])?,
            Utils::decode_f64(&buf[24..32])?,
        ];
        let position_sigma_m = [
            Utils::decode_f32(&buf[32..36])?,
            Utils::decode_f32(&buf[36..40])?,
            Utils::decode_f32(&buf[40..44])?,
        ];

        let velocity_status = Utils::decode_u32(&buf[44..48])?.into();
        let velocity_type = Utils::decode_u32(&buf[48..52])?.into();

        let velocity_ecef_m_s = [
            Utils::decode_f64(&buf[52..60])?,
            Utils::decode_f64(&buf[60..68])?,
            Utils::decode_f64(&buf[68..76])?,
        ];
        let velocity_sigma_m_s = [
            Utils::decode_f32(&buf[76..80])?,
            Utils::decode_f32(&buf[80..84])?,
            Utils::decode_f32(&buf[84..88])?,
        ];

        let mut station_id = [0; 4];
        station_id.copy_from_slice(&buf[88..92]);

        Ok(Self {
            position_status,
            position_type,
            position_ecef_m,
            position_sigma_m,
            velocity_status,
            velocity_type,
            velocity_ecef_m_s,
            velocity_sigma_m_s,
            station_id,
            velocity_latency_s: Utils::decode_f32(&buf[92..96])?,
            differential_age_s: Utils::decode_f32(&buf[96..100])?,
            solution_age_s: Utils::decode_f32(&buf[100..104])?,
            satellites_tracked: buf[104],
            satellites_used: buf[105],
            satellites_l1_used: buf[106],
            satellites_multi_used: buf[107],
            extended_status: buf[109],
            galileo_beidou_mask: buf[110],
            gps_glonass_mask: buf[111],
        })
    }

    pub(crate) fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = Self::encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        Utils::encode(&u32::from(self.position_status).to_le_bytes(), buf, 0);
        Utils::encode(&u32::from(self.position_type).to_le_bytes(), buf, 4);

        for (i, x) in self.position_ecef_m.iter().enumerate() {
            Utils::encode(&x.to_le_bytes(), buf, 8 + i * 8);
        }
        for (i, sigma) in self.position_sigma_m.iter().enumerate() {
            Utils::encode(&sigma.to_le_bytes(), buf, 32 + i * 4);
        }

        Utils::encode(&u32::from(self.velocity_status).to_le_bytes(), buf, 44);
        Utils::encode(&u32::from(self.velocity_type).to_le_bytes(), buf, 48);

        for (i, v) in self.velocity_ecef_m_s.iter().enumerate() {
            Utils::encode(&v.to_le_bytes(), buf, 52 + i * 8);
        }
        for (i, sigma) in self.velocity_sigma_m_s.iter().enumerate() {
            Utils::encode(&sigma.to_le_bytes(), buf, 76 + i * 4);
        }

        Utils::encode(&self.station_id, buf, 88);
        Utils::encode(&self.velocity_latency_s.to_le_bytes(), buf, 92);
        Utils::encode(&self.differential_age_s.to_le_bytes(), buf, 96);
        Utils::encode(&self.solution_age_s.to_le_bytes(), buf, 100);

        buf[104] = self.satellites_tracked;
        buf[105] = self.satellites_used;
        buf[106] = self.satellites_l1_used;
        buf[107] = self.satellites_multi_used;
        buf[108] = 0;
        buf[109] = self.extended_status;
        buf[110] = self.galileo_beidou_mask;
        buf[111] = self.gps_glonass_mask;

        Ok(size)
    }
}
