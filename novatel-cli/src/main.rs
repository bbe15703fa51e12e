//! Decode NovAtel OEM binary logs, from a receiver or from a recorded file.
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use env_logger::{Builder, Target};
use log::{debug, error, info, trace, warn};
use thiserror::Error;

use novatel_oem::prelude::{
    Commander, Decoder, Encoder, Epoch, Frame, FrameResult, ReaderTransport, Record,
    SerialTransport, Transport, TransportError,
};

mod cli;

use cli::{Cli, Config};

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unknown log \"{0}\"")]
    UnknownLog(String),
    #[error("invalid log period \"{0}\"")]
    InvalidPeriod(String),
    #[error("failed to read host time: {0}")]
    HostTime(String),
    #[error("{0}")]
    Receiver(#[from] novatel_oem::prelude::Error),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// One line summary of a [Frame]
fn summary(frame: &Frame) -> String {
    let t = match frame.header.epoch() {
        Some(t) => t.to_string(),
        None => format!("{:?}", frame.header.time_status()),
    };
    let crc = if frame.crc_valid { "" } else { " (bad crc)" };
    let content = match &frame.record {
        Record::BestPos(pos) => format!(
            "{:?} {:?} lat={:.8} lon={:.8} alt={:.3} σ=({:.3}, {:.3}, {:.3}) sv={}/{}",
            pos.solution_status,
            pos.position_type,
            pos.latitude,
            pos.longitude,
            pos.altitude,
            pos.stdev_latitude,
            pos.stdev_longitude,
            pos.stdev_altitude,
            pos.satellites_used,
            pos.satellites_tracked,
        ),
        Record::BestXyz(xyz) => format!(
            "{:?} {:?} ecef={:?} vel={:?} sv={}/{}",
            xyz.position_status,
            xyz.position_type,
            xyz.position_ecef_m,
            xyz.velocity_ecef_m_s,
            xyz.satellites_used,
            xyz.satellites_tracked,
        ),
        Record::SatXyz(satxyz) => format!(
            "prn={:?}",
            satxyz.satellites.iter().map(|s| s.prn).collect::<Vec<_>>()
        ),
        Record::TrackStat(trackstat) => format!(
            "{:?} {} channels, svs={:?}",
            trackstat.solution_status,
            trackstat.channels.len(),
            trackstat
                .channels
                .iter()
                .filter_map(|ch| ch.sv())
                .map(|sv| sv.to_string())
                .collect::<Vec<_>>()
        ),
        Record::Range(range) => format!(
            "{} observations, svs={:?}",
            range.observations.len(),
            range
                .observations
                .iter()
                .filter_map(|obs| obs.sv())
                .map(|sv| sv.to_string())
                .collect::<Vec<_>>()
        ),
    };
    format!("{} {}{}: {}", t, frame.record.message_id(), crc, content)
}

fn run<T: Transport>(
    mut decoder: Decoder<T>,
    mut encoder: Option<Encoder<BufWriter<File>>>,
    json: bool,
) -> Result<(), Error> {
    loop {
        match decoder.decode_next() {
            Ok(FrameResult::Decoded(frame)) => {
                if frame.header.receiver_status.has_fault() {
                    warn!("receiver status: {:?}", frame.header.receiver_status);
                }
                if json {
                    println!("{}", serde_json::to_string(&frame)?);
                } else {
                    info!("{}", summary(&frame));
                }
                if let Some(encoder) = &mut encoder {
                    if frame.crc_valid {
                        encoder.encode(&frame)?;
                    }
                }
            },
            Ok(FrameResult::NoFrameYet) => {
                trace!("no frame yet");
            },
            Ok(FrameResult::Error(e)) => {
                warn!("frame dropped: {}", e);
            },
            Err(novatel_oem::prelude::Error::Transport(TransportError::Closed)) => {
                info!("end of stream");
                break;
            },
            Err(e) => {
                error!("{}", e);
                return Err(e.into());
            },
        }
    }

    if let Some(encoder) = &mut encoder {
        encoder.flush()?;
    }

    info!(
        "{} frames decoded, {} crc failures",
        decoder.frames_decoded(),
        decoder.crc_failures()
    );
    Ok(())
}

fn output_encoder(path: Option<&Path>) -> Result<Option<Encoder<BufWriter<File>>>, Error> {
    match path {
        Some(path) => {
            let fd = File::create(path)?;
            info!("recording to \"{}\"", path.display());
            Ok(Some(Encoder::new(BufWriter::new(fd))))
        },
        None => Ok(None),
    }
}

pub fn main() -> Result<(), Error> {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::new();
    let cfg: Config = cli.config()?;
    debug!("{:#?}", cfg);

    let encoder = output_encoder(cli.output().map(|p| p.as_path()))?;

    if let Some(fp) = cli.replay_file() {
        info!("replaying \"{}\"", fp.display());
        let fd = File::open(fp)?;
        let transport = ReaderTransport::new(BufReader::new(fd));
        let decoder = Decoder::with_config(transport, cfg.decoder);
        return run(decoder, encoder, cli.json());
    }

    let port = cli.port();
    let baud_rate = cli.baudrate();
    info!("connecting to {}, baud: {}", port, baud_rate);

    let transport = SerialTransport::open(&port, baud_rate)?;
    let mut decoder = Decoder::with_config(transport, cfg.decoder);

    if cli.configure() {
        let now = Epoch::now().map_err(|e| Error::HostTime(e.to_string()))?;
        let mut commander = Commander::new(decoder.transport_mut(), cfg.commander);
        commander.bring_up(now)?;
        commander.request_logs()?;
        info!("receiver configured");
    }

    run(decoder, encoder, cli.json())
}
