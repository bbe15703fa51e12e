//! Message ID from and to binary

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [MessageID] is streamed in the header and selects
/// the payload layout.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MessageID {
    /// Best available position, geodetic coordinates
    BestPos,
    /// Best available position and velocity, ECEF coordinates
    BestXyz,
    /// Satellite positions and corrections, ECEF coordinates
    SatXyz,
    /// Channel tracking status
    TrackStat,
    /// Satellite range observations
    Range,
    /// Unknown / unsupported message
    #[default]
    Unknown,
}

impl MessageID {
    pub const BESTPOS: u16 = 42;
    pub const RANGE: u16 = 43;
    pub const TRACKSTAT: u16 = 83;
    pub const BESTXYZ: u16 = 241;
    pub const SATXYZ: u16 = 270;

    /// Log name, as used in the command language
    pub fn name(&self) -> &'static str {
        match self {
            Self::BestPos => "BESTPOS",
            Self::BestXyz => "BESTXYZ",
            Self::SatXyz => "SATXYZ",
            Self::TrackStat => "TRACKSTAT",
            Self::Range => "RANGE",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Identifies a log by name, case insensitive.
    /// The trailing binary format marker is tolerated.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_uppercase();
        let name = name.strip_suffix('B').unwrap_or(&name);
        [
            Self::BestPos,
            Self::BestXyz,
            Self::SatXyz,
            Self::TrackStat,
            Self::Range,
        ]
        .into_iter()
        .find(|mid| mid.name() == name)
    }
}

impl From<u16> for MessageID {
    fn from(val: u16) -> Self {
        match val {
            Self::BESTPOS => Self::BestPos,
            Self::BESTXYZ => Self::BestXyz,
            Self::SATXYZ => Self::SatXyz,
            Self::TRACKSTAT => Self::TrackStat,
            Self::RANGE => Self::Range,
            _ => Self::Unknown,
        }
    }
}

impl From<MessageID> for u16 {
    fn from(val: MessageID) -> u16 {
        match val {
            MessageID::BestPos => MessageID::BESTPOS,
            MessageID::BestXyz => MessageID::BESTXYZ,
            MessageID::SatXyz => MessageID::SATXYZ,
            MessageID::TrackStat => MessageID::TRACKSTAT,
            MessageID::Range => MessageID::RANGE,
            MessageID::Unknown => 0xffff,
        }
    }
}

impl std::fmt::Display for MessageID {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
