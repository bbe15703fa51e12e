//! Channel [TrackingStatus] word
use crate::bitfield::{pack, unpack, BitField};
use gnss::prelude::{Constellation, SV};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tracking status word layout, least significant bits first.
/// Reserved bits are described too, so that unpacking then packing
/// any word is lossless.
pub(crate) const TRACKING_STATUS_FIELDS: [BitField; 16] = [
    BitField::new("tracking_state", 0, 5),
    BitField::new("channel_number", 5, 5),
    BitField::new("phase_lock", 10, 1),
    BitField::new("parity_known", 11, 1),
    BitField::new("code_lock", 12, 1),
    BitField::new("correlator_type", 13, 3),
    BitField::new("satellite_system", 16, 3),
    BitField::new("reserved_19", 19, 1),
    BitField::new("grouping", 20, 1),
    BitField::new("signal_type", 21, 5),
    BitField::new("forward_error_correction", 26, 1),
    BitField::new("primary_l1", 27, 1),
    BitField::new("half_cycle_added", 28, 1),
    BitField::new("reserved_29", 29, 1),
    BitField::new("prn_lock", 30, 1),
    BitField::new("channel_assignment", 31, 1),
];

/// [TrackingStatus] describes the state of one tracking channel
/// or one range observation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackingStatus {
    /// Tracking loop state
    pub tracking_state: u8,
    /// Hardware channel number
    pub channel_number: u8,
    /// Phase locked
    pub phase_lock: bool,
    /// Parity known
    pub parity_known: bool,
    /// Code locked
    pub code_lock: bool,
    /// Correlator type
    pub correlator_type: u8,
    /// Satellite system, see [Self::constellation]
    pub satellite_system: u8,
    /// Channel is grouped with other channels
    pub grouping: bool,
    /// Signal type, meaning depends on the satellite system
    pub signal_type: u8,
    /// Forward error correction is enabled
    pub forward_error_correction: bool,
    /// Primary L1 channel
    pub primary_l1: bool,
    /// Half cycle added to the carrier phase measurement
    pub half_cycle_added: bool,
    /// PRN lock flag
    pub prn_lock: bool,
    /// Channel assignment: true when forced, false when automatic
    pub channel_assignment: bool,
    /// Reserved bits 19 and 29, kept untouched
    pub reserved: [bool; 2],
}

impl TrackingStatus {
    /// Unpacks the 32 bit status word
    pub fn from_word(word: u32) -> Self {
        let [
            tracking_state,
            channel_number,
            phase_lock,
            parity_known,
            code_lock,
            correlator_type,
            satellite_system,
            reserved_19,
            grouping,
            signal_type,
            forward_error_correction,
            primary_l1,
            half_cycle_added,
            reserved_29,
            prn_lock,
            channel_assignment,
        ] = unpack(word, &TRACKING_STATUS_FIELDS);
        Self {
            tracking_state: tracking_state as u8,
            channel_number: channel_number as u8,
            phase_lock: phase_lock == 1,
            parity_known: parity_known == 1,
            code_lock: code_lock == 1,
            correlator_type: correlator_type as u8,
            satellite_system: satellite_system as u8,
            grouping: grouping == 1,
            signal_type: signal_type as u8,
            forward_error_correction: forward_error_correction == 1,
            primary_l1: primary_l1 == 1,
            half_cycle_added: half_cycle_added == 1,
            prn_lock: prn_lock == 1,
            channel_assignment: channel_assignment == 1,
            reserved: [reserved_19 == 1, reserved_29 == 1],
        }
    }

    /// Packs this [TrackingStatus] back into its 32 bit word
    pub fn to_word(&self) -> u32 {
        let values = [
            self.tracking_state as u32,
            self.channel_number as u32,
            self.phase_lock as u32,
            self.parity_known as u32,
            self.code_lock as u32,
            self.correlator_type as u32,
            self.satellite_system as u32,
            self.reserved[0] as u32,
            self.grouping as u32,
            self.signal_type as u32,
            self.forward_error_correction as u32,
            self.primary_l1 as u32,
            self.half_cycle_added as u32,
            self.reserved[1] as u32,
            self.prn_lock as u32,
            self.channel_assignment as u32,
        ];
        pack(&values, &TRACKING_STATUS_FIELDS)
    }

    /// Returns the [Constellation] this channel is tracking
    pub fn constellation(&self) -> Option<Constellation> {
        match self.satellite_system {
            0 => Some(Constellation::GPS),
            1 => Some(Constellation::Glonass),
            2 => Some(Constellation::SBAS),
            3 => Some(Constellation::Galileo),
            4 => Some(Constellation::BeiDou),
            5 => Some(Constellation::QZSS),
            6 => Some(Constellation::IRNSS),
            _ => None,
        }
    }

    /// Identifies the [SV] from the PRN/slot streamed alongside this status.
    /// GLONASS slots are offset by 37, SBAS PRNs by 100, QZSS PRNs by 192.
    pub fn sv(&self, prn: u16) -> Option<SV> {
        let constellation = self.constellation()?;
        let prn = match constellation {
            Constellation::Glonass => prn.checked_sub(37)?,
            Constellation::SBAS => prn.checked_sub(100)?,
            Constellation::QZSS => prn.checked_sub(192)?,
            _ => prn,
        };
        let prn = u8::try_from(prn).ok()?;
        Some(SV::new(constellation, prn))
    }
}
