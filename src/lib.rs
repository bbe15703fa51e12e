#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! NovAtel OEM binary log decoding
use thiserror::Error;

extern crate gnss_rs as gnss;

mod bitfield;
mod command;
mod crc;
mod decoder;
mod encoder;
mod frame;
mod header;
mod message;
mod transport;

pub(crate) mod constants;
pub(crate) mod utils;

pub mod prelude {
    pub use crate::bitfield::BitField;
    pub use crate::command::{Command, Commander, CommanderConfig, LogPeriod};
    pub use crate::crc::{byte_swap, crc32};
    pub use crate::decoder::{CrcPolicy, Decoder, DecoderConfig, FrameResult};
    pub use crate::encoder::Encoder;
    pub use crate::frame::Frame;
    pub use crate::header::Header;
    pub use crate::message::{
        BestPos, BestXyz, MessageID, PositionType, Range, RangeObservation, ReceiverStatus,
        Record, SatXyz, Satellite, SolutionStatus, TimeStatus, TrackChannel, TrackStat,
        TrackingStatus,
    };
    pub use crate::transport::{ReaderTransport, Transport, TransportError};
    #[cfg(feature = "serial")]
    pub use crate::transport::SerialTransport;
    pub use crate::{DecodeError, Error};
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::Epoch;
}

use transport::TransportError;

/// Frame level errors. Sync and header errors are recovered internally,
/// by resynchronizing on the next frame. Errors affecting a complete frame
/// are reported with [prelude::FrameResult::Error].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("sync lost")]
    SyncLost,
    #[error("invalid header length: {0}")]
    InvalidHeaderLength(u8),
    #[error("zero length message")]
    ZeroLengthMessage,
    #[error("message length {0} exceeds maximal payload size")]
    PayloadTooLarge(u16),
    #[error("record of {0} bytes does not fit the message length field")]
    RecordTooLarge(usize),
    #[error("bad crc: wire={wire:08x} expected={expected:08x}")]
    CrcMismatch { wire: u32, expected: u32 },
    #[error("unknown message id #{0}")]
    UnknownMessageId(u16),
    #[error("count field {count} does not fit in {capacity} payload bytes")]
    CountFieldOutOfBounds { count: i64, capacity: usize },
    #[error("not enough bytes available")]
    NotEnoughBytes,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("decoding error: {0}")]
    Decode(#[from] DecodeError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
