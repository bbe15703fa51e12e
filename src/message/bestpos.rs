//! Best position, geodetic coordinates
use crate::{
    message::{PositionType, SolutionStatus},
    utils::Utils,
    DecodeError,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [BestPos] best available position solution, in geodetic coordinates.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestPos {
    /// [SolutionStatus]
    pub solution_status: SolutionStatus,
    /// [PositionType]
    pub position_type: PositionType,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Height above mean sea level, in meters
    pub altitude: f64,
    /// Geoid undulation, in meters
    pub undulation: f32,
    /// Datum identifier
    pub datum_id: u32,
    /// Latitude standard deviation, in meters
    pub stdev_latitude: f32,
    /// Longitude standard deviation, in meters
    pub stdev_longitude: f32,
    /// Height standard deviation, in meters
    pub stdev_altitude: f32,
    /// Latitude variance (m²)
    pub covar_latitude: f64,
    /// Longitude variance (m²)
    pub covar_longitude: f64,
    /// Height variance (m²)
    pub covar_altitude: f64,
    /// Base station identifier
    pub station_id: [u8; 4],
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

impl BestPos {
    pub(crate) const fn encoding_size() -> usize {
        72
    }

    /// Builds a new [BestPos] from a position and its standard deviations.
    /// Variances are derived from the standard deviations.
    pub fn new(
        latitude: f64,
        longitude: f64,
        altitude: f64,
        stdev_latitude: f32,
        stdev_longitude: f32,
        stdev_altitude: f32,
    ) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            stdev_latitude,
            stdev_longitude,
            stdev_altitude,
            covar_latitude: Self::variance(stdev_latitude),
            covar_longitude: Self::variance(stdev_longitude),
            covar_altitude: Self::variance(stdev_altitude),
            ..Default::default()
        }
    }

    fn variance(stdev: f32) -> f64 {
        let stdev = stdev as f64;
        stdev * stdev
    }

    pub(crate) fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        if buf.len() < Self::encoding_size() {
            return Err(DecodeError::NotEnoughBytes);
        }

        let stdev_latitude = Utils::decode_f32(&buf[40..44])?;
        let stdev_longitude = Utils::decode_f32(&buf[44..48])?;
        let stdev_altitude = Utils::decode_f32(&buf[48..52])?;

        let mut station_id = [0; 4];
        station_id.copy_from_slice(&buf[52..56]);

        Ok(Self {
            solution_status: Utils::decode_u32(&buf[0..4])?.into(),
            position_type: Utils::decode_u32(&buf[4..8])?.into(),
            latitude: Utils::decode_f64(&buf[8..16])?,
            longitude: Utils::decode_f64(&buf[16..24])?,
            altitude: Utils::decode_f64(&buf[24..32])?,
            undulation: Utils::decode_f32(&buf[32..36])?,
            datum_id: Utils::decode_u32(&buf[36..40])?,
            stdev_latitude,
            stdev_longitude,
            stdev_altitude,
            covar_latitude: Self::variance(stdev_latitude),
            covar_longitude: Self::variance(stdev_longitude),
            covar_altitude: Self::variance(stdev_altitude),
            station_id,
            differential_age_s: Utils::decode_f32(&buf[56..60])?,
            solution_age_s: Utils::decode_f32(&buf[60..64])?,
            satellites_tracked: buf[64],
            satellites_used: buf[65],
            satellites_l1_used: buf[66],
            satellites_multi_used: buf[67],
            extended_status: buf[69],
            galileo_beidou_mask: buf[70],
            gps_glonass_mask: buf[71],
        })
    }

    pub(crate) fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let size = Self::encoding_size();
        if buf.len() < size {
            return Err(DecodeError::NotEnoughBytes);
        }

        Utils::encode(&u32::from(self.solution_status).to_le_bytes(), buf, 0);
        Utils::encode(&u32::from(self.position_type).to_le_bytes(), buf, 4);
        Utils::encode(&self.latitude.to_le_bytes(), buf, 8);
        Utils::encode(&self.longitude.to_le_bytes(), buf, 16);
        Utils::encode(&self.altitude.to_le_bytes(), buf, 24);
        Utils::encode(&self.undulation.to_le_bytes(), buf, 32);
        Utils::encode(&self.datum_id.to_le_bytes(), buf, 36);
        Utils::encode(&self.stdev_latitude.to_le_bytes(), buf, 40);
        Utils::encode(&self.stdev_longitude.to_le_bytes(), buf, 44);
        Utils::encode(&self.stdev_altitude.to_le_bytes(), buf, 48);
        Utils::encode(&self.station_id, buf, 52);
        Utils::encode(&self.differential_age_s.to_le_bytes(), buf, 56);
        Utils::encode(&self.solution_age_s.to_le_bytes(), buf, 60);

        buf[64] = self.satellites_tracked;
        buf[65] = self.satellites_used;
        buf[66] = self.satellites_l1_used;
        buf[67] = self.satellites_multi_used;
        buf[68] = 0;
        buf[69] = self.extended_status;
        buf[70] = self.galileo_beidou_mask;
        buf[71] = self.gps_glonass_mask;

        Ok(size)
    }
}

#[cfg(test)]
mod test {
    use super::BestPos;
    use crate::message::{PositionType, SolutionStatus};

    #[test]
    fn brasilia() {
        let mut buf = [0; 72];
        buf[4..8].copy_from_slice(&50_u32.to_le_bytes());
        buf[8..16].copy_from_slice(&(-15.765824_f64).to_le_bytes());
        buf[16..24].copy_from_slice(&(-47.872109_f64).to_le_bytes());
        buf[24..32].copy_from_slice(&1024.0_f64.to_le_bytes());
        buf[32..36].copy_from_slice(&(-11.5_f32).to_le_bytes());
        buf[36..40].copy_from_slice(&61_u32.to_le_bytes());
        buf[40..44].copy_from_slice(&1.5_f32.to_le_bytes());
        buf[44..48].copy_from_slice(&0.75_f32.to_le_bytes());
        buf[48..52].copy_from_slice(&3.0_f32.to_le_bytes());
        buf[64] = 14;
        buf[65] = 12;

        let pos = BestPos::decode(&buf).unwrap();
        assert_eq!(pos.solution_status, SolutionStatus::Computed);
        assert_eq!(pos.position_type, PositionType::NarrowInteger);
        assert_eq!(pos.latitude, -15.765824);
        assert_eq!(pos.longitude, -47.872109);
        assert_eq!(pos.altitude, 1024.0);
        assert_eq!(pos.undulation, -11.5);
        assert_eq!(pos.datum_id, 61);
        assert_eq!(pos.stdev_latitude, 1.5);
        assert_eq!(pos.covar_latitude, 2.25);
        assert_eq!(pos.covar_longitude, 0.5625);
        assert_eq!(pos.covar_altitude, 9.0);
        assert_eq!(pos.satellites_tracked, 14);
        assert_eq!(pos.satellites_used, 12);

        let mut encoded = [0; 72];
        pos.encode(&mut encoded).unwrap();
        assert_eq!(encoded, buf);
    }

    #[test]
    fn derived_variances() {
        let pos = BestPos::new(1.0, 2.0, 3.0, 0.5, 0.25, 4.0);
        assert_eq!(pos.covar_latitude, 0.25);
        assert_eq!(pos.covar_longitude, 0.0625);
        assert_eq!(pos.covar_altitude, 16.0);

        let pos = BestPos::new(1.0, 2.0, 3.0, 0.1, 0.1, 0.1);
        let stdev = 0.1_f32 as f64;
        assert_eq!(pos.covar_latitude, stdev * stdev);
    }
}
