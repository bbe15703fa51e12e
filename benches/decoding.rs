use criterion::{black_box, criterion_group, criterion_main, Criterion};
use novatel_oem::prelude::{
    crc32, BestPos, Decoder, Frame, Header, MessageID, ReaderTransport, Record, SatXyz,
    Satellite, TrackingStatus,
};
use std::io::Cursor;

#[allow(unused_must_use)]
pub fn criterion_benchmark(c: &mut Criterion) {
    let bestpos = Frame::new(
        Header::default(),
        Record::BestPos(BestPos::new(-15.765824, -47.872109, 1024.0, 1.0, 1.0, 2.0)),
    );
    let bestpos = bestpos.to_bytes().unwrap();

    c.bench_function("crc32-bestpos", |b| {
        b.iter(|| {
            black_box(crc32(&bestpos[..100]));
        })
    });

    c.bench_function("record-bestpos", |b| {
        b.iter(|| {
            black_box(Record::decode(MessageID::BESTPOS, &bestpos[28..100]).unwrap());
        })
    });

    let satxyz = Frame::new(
        Header::default(),
        Record::SatXyz(SatXyz {
            satellites: (1..=12)
                .map(|prn| Satellite {
                    prn,
                    x: 20_000_000.0,
                    ..Default::default()
                })
                .collect(),
        }),
    );
    let satxyz = satxyz.to_bytes().unwrap();

    c.bench_function("record-satxyz-12", |b| {
        b.iter(|| {
            black_box(Record::decode(MessageID::SATXYZ, &satxyz[28..satxyz.len() - 4]).unwrap());
        })
    });

    c.bench_function("tracking-status", |b| {
        b.iter(|| {
            black_box(TrackingStatus::from_word(black_box(0x0810_9c24)).to_word());
        })
    });

    let mut stream = Vec::new();
    for _ in 0..100 {
        stream.extend_from_slice(&[0x00, 0xAA, 0x44]);
        stream.extend_from_slice(&bestpos);
        stream.extend_from_slice(&satxyz);
    }

    c.bench_function("decoder-stream", |b| {
        b.iter(|| {
            let decoder = Decoder::new(ReaderTransport::new(Cursor::new(&stream)));
            black_box(decoder.count());
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
