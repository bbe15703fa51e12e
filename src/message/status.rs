//! Receiver, solution and time status
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// [ReceiverStatus] word, streamed in every header.
    #[derive(Debug, Copy, Clone)]
    #[derive(PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct ReceiverStatus: u32 {
        /// At least one bit of the receiver error word is set
        const ERROR = 1 << 0;
        /// Temperature is out of range
        const TEMPERATURE = 1 << 1;
        /// Voltage supply is out of range
        const VOLTAGE = 1 << 2;
        /// Antenna is not powered
        const ANTENNA_POWER = 1 << 3;
        /// Low noise amplifier failure
        const LNA_FAILURE = 1 << 4;
        /// Antenna open circuit
        const ANTENNA_OPEN = 1 << 5;
        /// Antenna short circuit
        const ANTENNA_SHORTED = 1 << 6;
        /// CPU is overloaded
        const CPU_OVERLOAD = 1 << 7;
        /// COM1 buffer overrun
        const COM1_OVERRUN = 1 << 8;
        /// COM2 buffer overrun
        const COM2_OVERRUN = 1 << 9;
        /// COM3 buffer overrun
        const COM3_OVERRUN = 1 << 10;
        /// USB buffer overrun
        const USB_OVERRUN = 1 << 11;
        /// RF1 automatic gain control is out of range
        const RF1_AGC = 1 << 15;
        /// RF2 automatic gain control is out of range
        const RF2_AGC = 1 << 17;
        /// Almanac received, UTC known
        const ALMANAC_UTC = 1 << 18;
        /// Position solution is invalid
        const POSITION_SOLUTION = 1 << 19;
        /// Position is fixed
        const POSITION_FIXED = 1 << 20;
        /// Clock steering is disabled
        const CLOCK_STEERING = 1 << 21;
        /// Clock model is invalid
        const CLOCK_MODEL = 1 << 22;
        /// External oscillator is locked
        const EXTERNAL_OSCILLATOR = 1 << 23;
        /// Software resource warning
        const SOFTWARE_RESOURCE = 1 << 24;
        /// Auxiliary 3 status event
        const AUX3_EVENT = 1 << 29;
        /// Auxiliary 2 status event
        const AUX2_EVENT = 1 << 30;
        /// Auxiliary 1 status event
        const AUX1_EVENT = 1 << 31;
    }
}

impl Default for ReceiverStatus {
    fn default() -> Self {
        Self::empty()
    }
}

impl ReceiverStatus {
    /// Flags that indicate a hardware or resource fault
    const FAULTS: Self = Self::ERROR
        .union(Self::TEMPERATURE)
        .union(Self::VOLTAGE)
        .union(Self::ANTENNA_POWER)
        .union(Self::LNA_FAILURE)
        .union(Self::ANTENNA_OPEN)
        .union(Self::ANTENNA_SHORTED)
        .union(Self::CPU_OVERLOAD)
        .union(Self::COM1_OVERRUN)
        .union(Self::COM2_OVERRUN)
        .union(Self::COM3_OVERRUN)
        .union(Self::USB_OVERRUN)
        .union(Self::RF1_AGC)
        .union(Self::RF2_AGC)
        .union(Self::SOFTWARE_RESOURCE);

    /// Decodes the status word. Undocumented bits are retained.
    pub const fn from_word(word: u32) -> Self {
        Self::from_bits_retain(word)
    }

    /// Returns true if any fault flag is raised
    pub fn has_fault(&self) -> bool {
        self.intersects(Self::FAULTS)
    }

    /// Returns true if the receiver reports a valid position solution
    pub fn position_valid(&self) -> bool {
        !self.contains(Self::POSITION_SOLUTION)
    }
}

/// Position or velocity [SolutionStatus]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionStatus {
    /// Solution computed
    #[default]
    Computed,
    /// Insufficient observations
    InsufficientObservations,
    /// No convergence
    NoConvergence,
    /// Singularity at parameters matrix
    Singularity,
    /// Covariance trace exceeds maximum
    CovarianceTrace,
    /// Test distance exceeded
    TestDistance,
    /// Not yet converged from cold start
    ColdStart,
    /// Height or velocity limits exceeded
    HeightVelocityLimits,
    /// Variance exceeds limits
    Variance,
    /// Residuals are too large
    Residuals,
    /// Large residuals make position unreliable
    IntegrityWarning,
    /// Fixed position computation pending
    Pending,
    /// Fixed position is not valid
    InvalidFix,
    /// Position type is unauthorized
    Unauthorized,
    /// Any other value
    Other(u32),
}

impl From<u32> for SolutionStatus {
    fn from(val: u32) -> Self {
        match val {
            0 => Self::Computed,
            1 => Self::InsufficientObservations,
            2 => Self::NoConvergence,
            3 => Self::Singularity,
            4 => Self::CovarianceTrace,
            5 => Self::TestDistance,
            6 => Self::ColdStart,
            7 => Self::HeightVelocityLimits,
            8 => Self::Variance,
            9 => Self::Residuals,
            13 => Self::IntegrityWarning,
            18 => Self::Pending,
            19 => Self::InvalidFix,
            20 => Self::Unauthorized,
            val => Self::Other(val),
        }
    }
}

impl From<SolutionStatus> for u32 {
    fn from(val: SolutionStatus) -> u32 {
        match val {
            SolutionStatus::Computed => 0,
            SolutionStatus::InsufficientObservations => 1,
            SolutionStatus::NoConvergence => 2,
            SolutionStatus::Singularity => 3,
            SolutionStatus::CovarianceTrace => 4,
            SolutionStatus::TestDistance => 5,
            SolutionStatus::ColdStart => 6,
            SolutionStatus::HeightVelocityLimits => 7,
            SolutionStatus::Variance => 8,
            SolutionStatus::Residuals => 9,
            SolutionStatus::IntegrityWarning => 13,
            SolutionStatus::Pending => 18,
            SolutionStatus::InvalidFix => 19,
            SolutionStatus::Unauthorized => 20,
            SolutionStatus::Other(val) => val,
        }
    }
}

impl SolutionStatus {
    /// Returns true if a solution was computed
    pub fn is_computed(&self) -> bool {
        *self == Self::Computed
    }
}

/// Position or velocity [PositionType]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PositionType {
    /// No solution
    #[default]
    None,
    /// Position fixed by command
    FixedPosition,
    /// Height fixed by command
    FixedHeight,
    /// Velocity computed from instantaneous Doppler
    DopplerVelocity,
    /// Single point position
    Single,
    /// Pseudorange differential solution
    PseudorangeDifferential,
    /// SBAS corrected solution
    Sbas,
    /// Propagated by a Kalman filter without new observations
    Propagated,
    /// Floating L1 ambiguity solution
    L1Float,
    /// Floating ionosphere free ambiguity solution
    IonoFreeFloat,
    /// Floating narrow lane ambiguity solution
    NarrowFloat,
    /// Integer L1 ambiguity solution
    L1Integer,
    /// Integer wide lane ambiguity solution
    WideInteger,
    /// Integer narrow lane ambiguity solution
    NarrowInteger,
    /// Converging precise point positioning
    PppConverging,
    /// Converged precise point positioning
    Ppp,
    /// Any other value
    Other(u32),
}

impl From<u32> for PositionType {
    fn from(val: u32) -> Self {
        match val {
            0 => Self::None,
            1 => Self::FixedPosition,
            2 => Self::FixedHeight,
            8 => Self::DopplerVelocity,
            16 => Self::Single,
            17 => Self::PseudorangeDifferential,
            18 => Self::Sbas,
            19 => Self::Propagated,
            32 => Self::L1Float,
            33 => Self::IonoFreeFloat,
            34 => Self::NarrowFloat,
            48 => Self::L1Integer,
            49 => Self::WideInteger,
            50 => Self::NarrowInteger,
            68 => Self::PppConverging,
            69 => Self::Ppp,
            val => Self::Other(val),
        }
    }
}

impl From<PositionType> for u32 {
    fn from(val: PositionType) -> u32 {
        match val {
            PositionType::None => 0,
            PositionType::FixedPosition => 1,
            PositionType::FixedHeight => 2,
            PositionType::DopplerVelocity => 8,
            PositionType::Single => 16,
            PositionType::PseudorangeDifferential => 17,
            PositionType::Sbas => 18,
            PositionType::Propagated => 19,
            PositionType::L1Float => 32,
            PositionType::IonoFreeFloat => 33,
            PositionType::NarrowFloat => 34,
            PositionType::L1Integer => 48,
            PositionType::WideInteger => 49,
            PositionType::NarrowInteger => 50,
            PositionType::PppConverging => 68,
            PositionType::Ppp => 69,
            PositionType::Other(val) => val,
        }
    }
}

/// GPS reference [TimeStatus], streamed in every header.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeStatus {
    /// Time validity is unknown
    #[default]
    Unknown,
    /// Time is set approximately
    Approximate,
    /// Time is approaching coarse precision
    CoarseAdjusting,
    /// Time is valid to coarse precision
    Coarse,
    /// Time is coarse set and being steered
    CoarseSteering,
    /// Position is lost, range bias cannot be computed
    FreeWheeling,
    /// Time is adjusting to fine precision
    FineAdjusting,
    /// Time has fine precision
    Fine,
    /// Time is fine set and steered by the backup system
    FineBackupSteering,
    /// Time is fine set and being steered
    FineSteering,
    /// Time from satellite, only in logs that do not depend on the clock
    SatTime,
    /// Any other value
    Other(u8),
}

impl From<u8> for TimeStatus {
    fn from(val: u8) -> Self {
        match val {
            20 => Self::Unknown,
            60 => Self::Approximate,
            80 => Self::CoarseAdjusting,
            100 => Self::Coarse,
            120 => Self::CoarseSteering,
            130 => Self::FreeWheeling,
            140 => Self::FineAdjusting,
            160 => Self::Fine,
            170 => Self::FineBackupSteering,
            180 => Self::FineSteering,
            200 => Self::SatTime,
            val => Self::Other(val),
        }
    }
}

impl From<TimeStatus> for u8 {
    fn from(val: TimeStatus) -> u8 {
        match val {
            TimeStatus::Unknown => 20,
            TimeStatus::Approximate => 60,
            TimeStatus::CoarseAdjusting => 80,
            TimeStatus::Coarse => 100,
            TimeStatus::CoarseSteering => 120,
            TimeStatus::FreeWheeling => 130,
            TimeStatus::FineAdjusting => 140,
            TimeStatus::Fine => 160,
            TimeStatus::FineBackupSteering => 170,
            TimeStatus::FineSteering => 180,
            TimeStatus::SatTime => 200,
            TimeStatus::Other(val) => val,
        }
    }
}

impl TimeStatus {
    /// Returns true if GPS week and time of week can be trusted,
    /// at least to coarse precision.
    pub fn is_valid(&self) -> bool {
        let raw: u8 = (*self).into();
        raw >= 100
    }
}

#[cfg(test)]
mod test {
    use super::{PositionType, ReceiverStatus, SolutionStatus, TimeStatus};

    #[test]
    fn receiver_status_flags() {
        let status = ReceiverStatus::from_word(0x0008_0020);
        assert!(status.contains(ReceiverStatus::ANTENNA_OPEN));
        assert!(status.contains(ReceiverStatus::POSITION_SOLUTION));
        assert!(status.has_fault());
        assert!(!status.position_valid());

        let status = ReceiverStatus::from_word(0x0004_0000);
        assert!(!status.has_fault());
        assert!(status.position_valid());
        assert!(status.contains(ReceiverStatus::ALMANAC_UTC));
    }

    #[test]
    fn receiver_status_retains_undocumented_bits() {
        let status = ReceiverStatus::from_word(0x0200_1000);
        assert_eq!(status.bits(), 0x0200_1000);
    }

    #[test]
    fn solution_status() {
        for val in 0..32 {
            let status = SolutionStatus::from(val);
            assert_eq!(u32::from(status), val);
        }
        assert!(SolutionStatus::from(0).is_computed());
        assert_eq!(SolutionStatus::from(1), SolutionStatus::InsufficientObservations);
        assert_eq!(SolutionStatus::from(11), SolutionStatus::Other(11));
    }

    #[test]
    fn position_type() {
        for val in 0..80 {
            let pos_type = PositionType::from(val);
            assert_eq!(u32::from(pos_type), val);
        }
        assert_eq!(PositionType::from(16), PositionType::Single);
        assert_eq!(PositionType::from(50), PositionType::NarrowInteger);
    }

    #[test]
    fn time_status() {
        for val in 0..=255_u8 {
            let status = TimeStatus::from(val);
            assert_eq!(u8::from(status), val);
        }
        assert!(TimeStatus::FineSteering.is_valid());
        assert!(TimeStatus::Coarse.is_valid());
        assert!(!TimeStatus::Approximate.is_valid());
        assert!(!TimeStatus::Unknown.is_valid());
    }
}
