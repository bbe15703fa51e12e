mod bestpos;
mod bestxyz;
mod mid;
mod range;
mod satxyz;
mod status;
mod trackstat;
mod tracking;

pub use bestpos::BestPos;
pub use bestxyz::BestXyz;
pub use mid::MessageID;
pub use range::{Range, RangeObservation};
pub use satxyz::{SatXyz, Satellite};
pub use status::{PositionType, ReceiverStatus, SolutionStatus, TimeStatus};
pub use trackstat::{TrackChannel, TrackStat};
pub use tracking::TrackingStatus;

use crate::DecodeError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Verifies that `count` entries of `stride` bytes, following
/// a fixed part of `base` bytes, fit in `capacity` payload bytes.
pub(crate) fn bounded_count(
    count: i64,
    base: usize,
    stride: usize,
    capacity: usize,
) -> Result<usize, DecodeError> {
    let fits = usize::try_from(count)
        .ok()
        .and_then(|n| n.checked_mul(stride))
        .and_then(|n| n.checked_add(base))
        .map(|size| size <= capacity)
        .unwrap_or(false);
    if fits {
        Ok(count as usize)
    } else {
        Err(DecodeError::CountFieldOutOfBounds { count, capacity })
    }
}

/// [Record] is the decoded payload of a frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Record {
    BestPos(BestPos),
    BestXyz(BestXyz),
    SatXyz(SatXyz),
    TrackStat(TrackStat),
    Range(Range),
}

impl Record {
    /// Decodes a payload, interpreted according to the message ID
    /// found in the header.
    pub fn decode(mid: u16, payload: &[u8]) -> Result<Self, DecodeError> {
        match MessageID::from(mid) {
            MessageID::BestPos => Ok(Self::BestPos(BestPos::decode(payload)?)),
            MessageID::BestXyz => Ok(Self::BestXyz(BestXyz::decode(payload)?)),
            MessageID::SatXyz => Ok(Self::SatXyz(SatXyz::decode(payload)?)),
            MessageID::TrackStat => Ok(Self::TrackStat(TrackStat::decode(payload)?)),
            MessageID::Range => Ok(Self::Range(Range::decode(payload)?)),
            MessageID::Unknown => Err(DecodeError::UnknownMessageId(mid)),
        }
    }

    /// Encodes this [Record] into the payload buffer,
    /// returns the total number of bytes produced.
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        match self {
            Self::BestPos(r) => r.encode(buf),
            Self::BestXyz(r) => r.encode(buf),
            Self::SatXyz(r) => r.encode(buf),
            Self::TrackStat(r) => r.encode(buf),
            Self::Range(r) => r.encode(buf),
        }
    }

    /// Returns the payload size, in bytes
    pub fn encoding_size(&self) -> usize {
        match self {
            Self::BestPos(_) => BestPos::encoding_size(),
            Self::BestXyz(_) => BestXyz::encoding_size(),
            Self::SatXyz(r) => r.encoding_size(),
            Self::TrackStat(r) => r.encoding_size(),
            Self::Range(r) => r.encoding_size(),
        }
    }

    /// Returns the [MessageID] of this [Record]
    pub fn message_id(&self) -> MessageID {
        match self {
            Self::BestPos(_) => MessageID::BestPos,
            Self::BestXyz(_) => MessageID::BestXyz,
            Self::SatXyz(_) => MessageID::SatXyz,
            Self::TrackStat(_) => MessageID::TrackStat,
            Self::Range(_) => MessageID::Range,
        }
    }

    pub fn as_bestpos(&self) -> Option<&BestPos> {
        match self {
            Self::BestPos(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_bestxyz(&self) -> Option<&BestXyz> {
        match self {
            Self::BestXyz(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_satxyz(&self) -> Option<&SatXyz> {
        match self {
            Self::SatXyz(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_trackstat(&self) -> Option<&TrackStat> {
        match self {
            Self::TrackStat(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&Range> {
        match self {
            Self::Range(r) => Some(r),
            _ => None,
        }
    }
}

impl From<BestPos> for Record {
    fn from(r: BestPos) -> Self {
        Self::BestPos(r)
    }
}

impl From<BestXyz> for Record {
    fn from(r: BestXyz) -> Self {
        Self::BestXyz(r)
    }
}

impl From<SatXyz> for Record {
    fn from(r: SatXyz) -> Self {
        Self::SatXyz(r)
    }
}

impl From<TrackStat> for Record {
    fn from(r: TrackStat) -> Self {
        Self::TrackStat(r)
    }
}

impl From<Range> for Record {
    fn from(r: Range) -> Self {
        Self::Range(r)
    }
}

#[cfg(test)]
mod test {
    use super::{bounded_count, MessageID, Record};
    use crate::DecodeError;

    #[test]
    fn count_bounds() {
        assert_eq!(bounded_count(0, 12, 68, 12), Ok(0));
        assert_eq!(bounded_count(2, 12, 68, 148), Ok(2));
        assert_eq!(bounded_count(2, 12, 68, 200), Ok(2));
        assert_eq!(
            bounded_count(3, 12, 68, 148),
            Err(DecodeError::CountFieldOutOfBounds {
                count: 3,
                capacity: 148
            })
        );
        assert!(bounded_count(-5, 16, 40, 1000).is_err());
        assert!(bounded_count(i64::MAX, 4, 44, 1000).is_err());
    }

    #[test]
    fn dispatch() {
        assert_eq!(
            Record::decode(999, &[0; 128]),
            Err(DecodeError::UnknownMessageId(999))
        );
        assert_eq!(
            Record::decode(MessageID::BESTPOS, &[0; 10]),
            Err(DecodeError::NotEnoughBytes)
        );

        let record = Record::decode(MessageID::BESTPOS, &[0; 72]).unwrap();
        assert_eq!(record.message_id(), MessageID::BestPos);
        assert!(record.as_bestpos().is_some());
        assert!(record.as_range().is_none());
        assert_eq!(record.encoding_size(), 72);

        let record = Record::decode(MessageID::SATXYZ, &[0; 12]).unwrap();
        assert_eq!(record.as_satxyz().map(|s| s.satellites.len()), Some(0));
        assert_eq!(record.encoding_size(), 12);
    }
}
