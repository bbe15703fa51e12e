use novatel_oem::prelude::{
    byte_swap, crc32, BestXyz, CrcPolicy, DecodeError, Decoder, DecoderConfig, Error, Frame,
    FrameResult, Header, MessageID, PositionType, Range, RangeObservation, ReaderTransport,
    Record, SatXyz, Satellite, SolutionStatus, TrackChannel, TrackStat, TrackingStatus,
    Transport, TransportError,
};
use std::io::Cursor;
use std::time::Duration;

/// Builds a frame by hand, the way the receiver streams it
fn raw_frame(message_id: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xAA, 0x44, 0x12, 0x1C];
    frame.extend_from_slice(&message_id.to_le_bytes());
    frame.push(0x00); // binary, original message
    frame.push(0x20); // COM1
    frame.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    frame.extend_from_slice(&0_u16.to_le_bytes());
    frame.push(0x50); // idle
    frame.push(180); // fine steering
    frame.extend_from_slice(&2341_u16.to_le_bytes());
    frame.extend_from_slice(&123_456_000_u32.to_le_bytes());
    frame.extend_from_slice(&0x0004_0000_u32.to_le_bytes());
    frame.extend_from_slice(&0_u16.to_le_bytes());
    frame.extend_from_slice(&0x3e7c_u16.to_le_bytes());
    frame.extend_from_slice(payload);
    let crc = byte_swap(crc32(&frame));
    frame.extend_from_slice(&crc.to_le_bytes());
    frame
}

fn bestpos_payload() -> Vec<u8> {
    let mut payload = vec![0; 72];
    payload[4..8].copy_from_slice(&16_u32.to_le_bytes());
    payload[8..16].copy_from_slice(&(-15.765824_f64).to_le_bytes());
    payload[16..24].copy_from_slice(&(-47.872109_f64).to_le_bytes());
    payload[24..32].copy_from_slice(&1024.0_f64.to_le_bytes());
    payload[40..44].copy_from_slice(&1.25_f32.to_le_bytes());
    payload[44..48].copy_from_slice(&0.5_f32.to_le_bytes());
    payload[48..52].copy_from_slice(&2.0_f32.to_le_bytes());
    payload[52..56].copy_from_slice(b"0   ");
    payload[64] = 18;
    payload[65] = 16;
    payload
}

fn replay(bytes: Vec<u8>) -> Decoder<ReaderTransport<Cursor<Vec<u8>>>> {
    Decoder::new(ReaderTransport::new(Cursor::new(bytes)))
}

fn expect_frame<T: Transport>(decoder: &mut Decoder<T>) -> Frame {
    match decoder.decode_next() {
        Ok(FrameResult::Decoded(frame)) => frame,
        other => panic!("expecting a frame, got {:?}", other),
    }
}

#[test]
fn bestpos_scenario() {
    let mut decoder = replay(raw_frame(42, &bestpos_payload()));
    let frame = expect_frame(&mut decoder);

    assert!(frame.crc_valid);
    assert_eq!(frame.header.mid(), MessageID::BestPos);
    assert_eq!(frame.header.message_length, 72);
    assert_eq!(frame.header.gps_week, 2341);
    assert_eq!(frame.header.gps_milliseconds, 123_456_000);
    assert_eq!(frame.header.port_address, 0x20);
    assert_eq!(frame.header.idle_percent(), 40.0);
    assert_eq!(frame.header.receiver_sw_version, 0x3e7c);
    assert!(frame.header.epoch().is_some());
    assert!(!frame.header.receiver_status.has_fault());

    let bestpos = frame.record.as_bestpos().unwrap();
    assert_eq!(bestpos.solution_status, SolutionStatus::Computed);
    assert_eq!(bestpos.position_type, PositionType::Single);
    assert_eq!(bestpos.latitude, -15.765824);
    assert_eq!(bestpos.longitude, -47.872109);
    assert_eq!(bestpos.altitude, 1024.0);
    assert_eq!(bestpos.covar_latitude, 1.5625);
    assert_eq!(bestpos.covar_longitude, 0.25);
    assert_eq!(bestpos.covar_altitude, 4.0);
    assert_eq!(
        bestpos.covar_latitude,
        bestpos.stdev_latitude as f64 * bestpos.stdev_latitude as f64
    );
    assert_eq!(&bestpos.station_id, b"0   ");
    assert_eq!(bestpos.satellites_tracked, 18);
    assert_eq!(bestpos.satellites_used, 16);

    // reference encoder reproduces the wire bytes
    assert_eq!(frame.to_bytes().unwrap(), raw_frame(42, &bestpos_payload()));
}

#[test]
fn wire_crc_is_byte_reversed() {
    let frame = raw_frame(42, &bestpos_payload());
    let len = frame.len();
    let computed = crc32(&frame[..len - 4]);
    assert_eq!(&frame[len - 4..], &computed.to_be_bytes());
}

#[test]
fn garbage_before_frame() {
    let mut bytes = vec![0x12, 0x44, 0xAA, 0x00, 0xAA, 0x44, 0x00, 0xFF, 0xAA, 0xAA];
    bytes.extend(raw_frame(42, &bestpos_payload()));
    let mut decoder = replay(bytes);
    let frame = expect_frame(&mut decoder);
    assert_eq!(frame.record.message_id(), MessageID::BestPos);
}

/// Endless stream of zeros
struct Zeros {
    reads: usize,
}

impl Transport for Zeros {
    fn read_byte(&mut self, _timeout: Duration) -> Result<u8, TransportError> {
        self.reads += 1;
        Ok(0)
    }
    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}

#[test]
fn zero_stream_is_bounded() {
    let mut decoder = Decoder::new(Zeros { reads: 0 });
    for _ in 0..3 {
        assert!(matches!(decoder.decode_next(), Ok(FrameResult::NoFrameYet)));
    }
    assert_eq!(decoder.transport_mut().reads, 1500);
    assert_eq!(decoder.frames_decoded(), 0);
}

#[test]
fn satxyz_entries_are_independent() {
    let record = Record::SatXyz(SatXyz {
        satellites: vec![
            Satellite {
                prn: 7,
                x: -14_111_234.5,
                y: 21_234_567.25,
                z: 8_765_432.125,
                clock_correction: 1234.5,
                ionospheric_delay: 3.25,
                tropospheric_delay: 2.5,
            },
            Satellite {
                prn: 30,
                x: 15_000_000.0,
                y: -2_000_000.0,
                z: 21_000_000.0,
                clock_correction: -42.0,
                ionospheric_delay: 6.5,
                tropospheric_delay: 9.75,
            },
        ],
    });
    let mut payload = vec![0; record.encoding_size()];
    record.encode(&mut payload).unwrap();
    assert_eq!(payload.len(), 12 + 2 * 68);

    let mut decoder = replay(raw_frame(270, &payload));
    let frame = expect_frame(&mut decoder);
    let satxyz = frame.record.as_satxyz().unwrap();
    assert_eq!(satxyz.satellites.len(), 2);
    assert_eq!(satxyz.satellites[0].prn, 7);
    assert_eq!(satxyz.satellites[0].x, -14_111_234.5);
    assert_eq!(satxyz.satellites[0].tropospheric_delay, 2.5);
    assert_eq!(satxyz.satellites[1].prn, 30);
    assert_eq!(satxyz.satellites[1].x, 15_000_000.0);
    assert_eq!(satxyz.satellites[1].clock_correction, -42.0);
    assert_eq!(frame.record, record);
}

#[test]
fn every_message_type() {
    let records = vec![
        Record::BestXyz(BestXyz {
            position_ecef_m: [4_000_000.0, -4_500_000.0, -1_700_000.0],
            satellites_used: 8,
            ..Default::default()
        }),
        Record::TrackStat(TrackStat {
            solution_status: SolutionStatus::Computed,
            position_type: PositionType::Single,
            elevation_cutoff: 5.0,
            channels: vec![TrackChannel {
                prn: 12,
                tracking_status: TrackingStatus::from_word(0x0810_9c24),
                cn0: 44.0,
                ..Default::default()
            }],
        }),
        Record::Range(Range {
            observations: vec![RangeObservation {
                prn: 12,
                pseudorange: 21_000_000.5,
                tracking_status: TrackingStatus::from_word(0x0810_9c24),
                ..Default::default()
            }],
        }),
    ];

    let mut bytes = Vec::new();
    for record in &records {
        let mut payload = vec![0; record.encoding_size()];
        record.encode(&mut payload).unwrap();
        bytes.extend(raw_frame(record.message_id().into(), &payload));
    }

    let decoder = replay(bytes);
    let frames = decoder.collect::<Result<Vec<_>, Error>>().unwrap();
    assert_eq!(frames.len(), 3);
    for (frame, record) in frames.iter().zip(records.iter()) {
        assert_eq!(&frame.record, record);
        assert!(frame.crc_valid);
    }
}

#[test]
fn crc_policy() {
    let mut corrupted = raw_frame(42, &bestpos_payload());
    corrupted[30] ^= 0x80;

    let mut decoder = replay(corrupted.clone());
    assert!(matches!(
        decoder.decode_next(),
        Ok(FrameResult::Error(DecodeError::CrcMismatch { .. }))
    ));
    assert_eq!(decoder.crc_failures(), 1);

    let config = DecoderConfig::default().with_crc_policy(CrcPolicy::Lenient);
    let mut decoder = Decoder::with_config(ReaderTransport::new(Cursor::new(corrupted)), config);
    let frame = expect_frame(&mut decoder);
    assert!(!frame.crc_valid);
    assert_eq!(decoder.crc_failures(), 1);
}

#[test]
fn forged_count() {
    let mut payload = vec![0; 12 + 68];
    payload[8..12].copy_from_slice(&0x4000_0000_u32.to_le_bytes());

    let mut bytes = raw_frame(270, &payload);
    bytes.extend(raw_frame(42, &bestpos_payload()));

    let mut decoder = replay(bytes);
    assert_eq!(
        decoder.decode_next().unwrap(),
        FrameResult::Error(DecodeError::CountFieldOutOfBounds {
            count: 0x4000_0000,
            capacity: 80,
        })
    );
    let frame = expect_frame(&mut decoder);
    assert_eq!(frame.record.message_id(), MessageID::BestPos);
}

#[test]
fn unknown_message_then_valid_frame() {
    let mut bytes = raw_frame(101, &[0x01, 0x02, 0x03, 0x04]);
    bytes.extend(raw_frame(42, &bestpos_payload()));

    let mut decoder = replay(bytes);
    assert_eq!(
        decoder.decode_next().unwrap(),
        FrameResult::Error(DecodeError::UnknownMessageId(101))
    );
    let frame = expect_frame(&mut decoder);
    assert_eq!(frame.record.as_bestpos().map(|p| p.altitude), Some(1024.0));
    assert_eq!(decoder.frames_decoded(), 1);
}

#[test]
fn short_fixed_payload() {
    let mut decoder = replay(raw_frame(42, &[0; 40]));
    assert_eq!(
        decoder.decode_next().unwrap(),
        FrameResult::Error(DecodeError::NotEnoughBytes)
    );
}

#[test]
fn frame_split_across_calls() {
    let bytes = raw_frame(42, &bestpos_payload());
    let config = DecoderConfig::default().with_max_bytes(50);
    let mut decoder = Decoder::with_config(ReaderTransport::new(Cursor::new(bytes)), config);

    assert_eq!(decoder.decode_next().unwrap(), FrameResult::NoFrameYet);
    assert_eq!(decoder.decode_next().unwrap(), FrameResult::NoFrameYet);
    let frame = expect_frame(&mut decoder);
    assert_eq!(frame.header.mid(), MessageID::BestPos);

    assert!(matches!(
        decoder.decode_next(),
        Err(Error::Transport(TransportError::Closed))
    ));
}

/// Delivers a few bytes, then fails
struct Unplugged {
    bytes: Vec<u8>,
    reads: usize,
}

impl Transport for Unplugged {
    fn read_byte(&mut self, _timeout: Duration) -> Result<u8, TransportError> {
        self.reads += 1;
        match self.bytes.get(self.reads - 1) {
            Some(byte) => Ok(*byte),
            None => Err(TransportError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "device unplugged",
            ))),
        }
    }
    fn write_bytes(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
        Ok(())
    }
}

#[test]
fn transport_failure_within_header() {
    let frame = raw_frame(42, &bestpos_payload());
    let transport = Unplugged {
        bytes: frame[..12].to_vec(),
        reads: 0,
    };
    let mut decoder = Decoder::new(transport);
    assert!(matches!(
        decoder.decode_next(),
        Err(Error::Transport(TransportError::Io(_)))
    ));
    assert_eq!(decoder.transport_mut().reads, 13);
    assert_eq!(decoder.frames_decoded(), 0);

    let mut decoder = Decoder::new(Unplugged {
        bytes: frame[..12].to_vec(),
        reads: 0,
    });
    assert!(matches!(
        decoder.next(),
        Some(Err(Error::Transport(TransportError::Io(_))))
    ));
}

#[test]
fn end_of_stream_ends_iteration() {
    let decoder = replay(vec![0xAA, 0x44, 0x12, 0x1C, 0x2A]);
    assert_eq!(decoder.count(), 0);
}

#[test]
fn reencoding() {
    let header = Header {
        gps_week: 2000,
        ..Default::default()
    };
    let frame = Frame::new(header, Record::Range(Range::default()));
    let bytes = frame.to_bytes().unwrap();
    let mut decoder = replay(bytes);
    assert_eq!(expect_frame(&mut decoder), frame);
}
