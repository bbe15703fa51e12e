//! Byte stream [Decoder]
use log::{debug, trace, warn};
use std::time::Duration;

use crate::{
    constants::Constants,
    crc::{byte_swap, crc32},
    frame::Frame,
    header::Header,
    message::Record,
    transport::{Transport, TransportError},
    utils::Utils,
    DecodeError, Error,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [CrcPolicy] applies to frames whose trailing CRC does not match
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrcPolicy {
    /// Frame is dropped and [DecodeError::CrcMismatch] is reported
    #[default]
    Strict,
    /// Frame is decoded anyway and flagged as such
    Lenient,
}

/// [DecoderConfig] tunes the [Decoder]
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecoderConfig {
    /// Maximal number of byte reads per [Decoder::decode_next] call,
    /// timeouts included.
    pub max_bytes: usize,
    /// Timeout applied to each byte read
    pub byte_timeout: Duration,
    /// [CrcPolicy]
    pub crc_policy: CrcPolicy,
    /// Frames announcing a larger payload are rejected.
    /// Capped to what the message length field can describe.
    pub max_payload: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_bytes: Constants::DEFAULT_MAX_BYTES,
            byte_timeout: Duration::from_millis(Constants::DEFAULT_BYTE_TIMEOUT_MS),
            crc_policy: CrcPolicy::default(),
            max_payload: Constants::DEFAULT_MAX_PAYLOAD,
        }
    }
}

impl DecoderConfig {
    /// Copies and returns [DecoderConfig] with given byte ceiling
    pub fn with_max_bytes(&self, max_bytes: usize) -> Self {
        let mut s = *self;
        s.max_bytes = max_bytes;
        s
    }
    /// Copies and returns [DecoderConfig] with given per byte timeout
    pub fn with_byte_timeout(&self, timeout: Duration) -> Self {
        let mut s = *self;
        s.byte_timeout = timeout;
        s
    }
    /// Copies and returns [DecoderConfig] with given [CrcPolicy]
    pub fn with_crc_policy(&self, policy: CrcPolicy) -> Self {
        let mut s = *self;
        s.crc_policy = policy;
        s
    }
    /// Copies and returns [DecoderConfig] with given maximal payload size
    pub fn with_max_payload(&self, max_payload: usize) -> Self {
        let mut s = *self;
        s.max_payload = max_payload.min(Constants::MAX_PAYLOAD);
        s
    }
}

/// Outcome of one [Decoder::decode_next] call
#[derive(Debug, Clone, PartialEq)]
pub enum FrameResult {
    /// A complete [Frame] was decoded
    Decoded(Frame),
    /// Byte ceiling reached before a frame could complete.
    /// Partial progress is kept for the next call.
    NoFrameYet,
    /// A frame was received but produced no record
    Error(DecodeError),
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum State {
    /// Waiting for the sync byte at `pos`
    Sync { pos: usize },
    /// Receiving header byte at `pos`
    Header { pos: usize },
    /// Receiving payload
    Payload { header: Header, remaining: usize },
    /// Receiving CRC byte at `pos`
    Crc { header: Header, pos: usize },
}

impl Default for State {
    fn default() -> Self {
        Self::Sync { pos: 0 }
    }
}

enum Step {
    /// Byte consumed, frame still in progress
    Pending,
    /// Frame abandoned, back to sync
    Resync(DecodeError),
    /// Frame complete, ready for validation
    Complete(Header),
}

/// [Decoder] synchronizes on the binary stream coming from a [Transport]
/// and returns validated [Frame]s.
/// ```
/// use std::io::Cursor;
/// use novatel_oem::prelude::{
///     BestPos, Decoder, Frame, FrameResult, Header, ReaderTransport, Record,
/// };
///
/// let frame = Frame::new(
///     Header::default(),
///     Record::BestPos(BestPos::new(-15.765824, -47.872109, 1024.0, 1.0, 1.0, 2.0)),
/// );
///
/// let mut bytes = vec![0x00, 0xAA, 0x12];
/// bytes.extend(frame.to_bytes().unwrap());
///
/// let mut decoder = Decoder::new(ReaderTransport::new(Cursor::new(bytes)));
///
/// match decoder.decode_next().unwrap() {
///     FrameResult::Decoded(decoded) => {
///         let bestpos = decoded.record.as_bestpos().unwrap();
///         assert_eq!(bestpos.latitude, -15.765824);
///     },
///     _ => panic!("frame should have been decoded"),
/// }
/// ```
pub struct Decoder<T: Transport> {
    transport: T,
    config: DecoderConfig,
    state: State,
    /// Scratch buffer: header, payload and CRC of the frame in progress
    buffer: Vec<u8>,
    /// True when the last [Decoder::decode_next] call received no byte
    silent: bool,
    frames_decoded: usize,
    crc_failures: usize,
}

impl<T: Transport> Decoder<T> {
    /// Creates a new [Decoder] with default [DecoderConfig]
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DecoderConfig::default())
    }

    /// Creates a new [Decoder] with given [DecoderConfig]
    pub fn with_config(transport: T, config: DecoderConfig) -> Self {
        let config = config.with_max_payload(config.max_payload);
        Self {
            transport,
            config,
            state: State::default(),
            buffer: Vec::with_capacity(
                Header::SIZE + config.max_payload + Constants::CRC_SIZE,
            ),
            silent: false,
            frames_decoded: 0,
            crc_failures: 0,
        }
    }

    /// Current [DecoderConfig]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Borrows the [Transport], for example to send commands
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Releases the [Transport]
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Number of frames decoded so far
    pub fn frames_decoded(&self) -> usize {
        self.frames_decoded
    }

    /// Number of CRC mismatches so far, whatever the [CrcPolicy]
    pub fn crc_failures(&self) -> usize {
        self.crc_failures
    }

    /// Pulls bytes from the [Transport] until a frame completes
    /// or the byte ceiling is reached. Only [Transport] failures
    /// (other than timeouts) are returned as errors.
    pub fn decode_next(&mut self) -> Result<FrameResult, Error> {
        self.silent = true;
        for _ in 0..self.config.max_bytes {
            let byte = match self.transport.read_byte(self.config.byte_timeout) {
                Ok(byte) => byte,
                Err(TransportError::Timeout) => continue,
                Err(e) => return Err(e.into()),
            };
            self.silent = false;

            match self.step(byte) {
                Step::Pending => {},
                Step::Resync(DecodeError::SyncLost) => {
                    trace!("sync lost");
                },
                Step::Resync(e) => {
                    debug!("frame dropped: {}", e);
                },
                Step::Complete(header) => {
                    return Ok(self.finish_frame(header));
                },
            }
        }
        Ok(FrameResult::NoFrameYet)
    }

    fn reset(&mut self) {
        self.state = State::default();
        self.buffer.clear();
    }

    fn resync(&mut self, e: DecodeError) -> Step {
        self.reset();
        Step::Resync(e)
    }

    fn step(&mut self, byte: u8) -> Step {
        match self.state {
            State::Sync { pos } => {
                if byte == Constants::SYNC[pos] {
                    self.buffer.push(byte);
                    self.state = if pos + 1 == Constants::SYNC.len() {
                        State::Header { pos: pos + 1 }
                    } else {
                        State::Sync { pos: pos + 1 }
                    };
                    Step::Pending
                } else if pos > 0 {
                    self.resync(DecodeError::SyncLost)
                } else {
                    Step::Pending
                }
            },
            State::Header { pos } => {
                self.buffer.push(byte);

                if pos == Constants::HEADER_LENGTH_OFFSET && byte != Constants::HEADER_LENGTH {
                    return self.resync(DecodeError::InvalidHeaderLength(byte));
                }

                if pos == Constants::MESSAGE_LENGTH_OFFSET + 1 {
                    let offset = Constants::MESSAGE_LENGTH_OFFSET;
                    let length = match Utils::decode_u16(&self.buffer[offset..]) {
                        Ok(length) => length,
                        Err(e) => return self.resync(e),
                    };
                    if length == 0 {
                        return self.resync(DecodeError::ZeroLengthMessage);
                    }
                    if length as usize > self.config.max_payload {
                        return self.resync(DecodeError::PayloadTooLarge(length));
                    }
                }

                if pos + 1 < Header::SIZE {
                    self.state = State::Header { pos: pos + 1 };
                    return Step::Pending;
                }

                match Header::decode(&self.buffer) {
                    Ok(header) => {
                        trace!(
                            "header: {} ({} bytes)",
                            header.mid(),
                            header.message_length
                        );
                        self.state = State::Payload {
                            header,
                            remaining: header.message_length as usize,
                        };
                        Step::Pending
                    },
                    Err(e) => self.resync(e),
                }
            },
            State::Payload { header, remaining } => {
                self.buffer.push(byte);
                self.state = if remaining > 1 {
                    State::Payload {
                        header,
                        remaining: remaining - 1,
                    }
                } else {
                    State::Crc { header, pos: 0 }
                };
                Step::Pending
            },
            State::Crc { header, pos } => {
                self.buffer.push(byte);
                if pos + 1 < Constants::CRC_SIZE {
                    self.state = State::Crc {
                        header,
                        pos: pos + 1,
                    };
                    Step::Pending
                } else {
                    Step::Complete(header)
                }
            },
        }
    }

    /// Validates and decodes the frame sitting in the scratch buffer,
    /// then returns to sync.
    fn finish_frame(&mut self, header: Header) -> FrameResult {
        let result = self.validate(header);
        self.reset();
        result
    }

    fn validate(&mut self, header: Header) -> FrameResult {
        let payload_end = Header::SIZE + header.message_length as usize;

        let wire = match Utils::decode_u32(&self.buffer[payload_end..]) {
            Ok(wire) => wire,
            Err(e) => return FrameResult::Error(e),
        };
        let expected = byte_swap(crc32(&self.buffer[..payload_end]));

        let crc_valid = wire == expected;
        if !crc_valid {
            self.crc_failures += 1;
            let e = DecodeError::CrcMismatch { wire, expected };
            match self.config.crc_policy {
                CrcPolicy::Strict => {
                    debug!("{}: {}", header.mid(), e);
                    return FrameResult::Error(e);
                },
                CrcPolicy::Lenient => {
                    warn!("{}: {} (forwarded)", header.mid(), e);
                },
            }
        }

        match Record::decode(header.message_id, &self.buffer[Header::SIZE..payload_end]) {
            Ok(record) => {
                self.frames_decoded += 1;
                FrameResult::Decoded(Frame {
                    header,
                    record,
                    crc_valid,
                })
            },
            Err(e) => {
                debug!("{}: {}", header.mid(), e);
                FrameResult::Error(e)
            },
        }
    }
}

impl<T: Transport> Iterator for Decoder<T> {
    type Item = Result<Frame, Error>;
    /// Returns the next [Frame], until the [Transport] closes or
    /// remains silent for a complete [Decoder::decode_next] call.
    /// Frames that produced no record are returned as errors.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.decode_next() {
                Ok(FrameResult::Decoded(frame)) => return Some(Ok(frame)),
                Ok(FrameResult::NoFrameYet) => {
                    if self.silent {
                        debug!("no byte received within {} reads", self.config.max_bytes);
                        return None;
                    }
                },
                Ok(FrameResult::Error(e)) => return Some(Err(e.into())),
                Err(Error::Transport(TransportError::Closed)) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
