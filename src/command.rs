//! Receiver commands
use log::{debug, info, warn};
use std::{fmt, thread, time::Duration};

use hifitime::{Epoch, TimeScale};

use crate::{
    constants::Constants,
    message::MessageID,
    transport::{Transport, TransportError},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [LogPeriod] of a log request
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LogPeriod {
    /// Periodic log, period in seconds
    OnTime(f64),
    /// Single log
    Once,
}

impl fmt::Display for LogPeriod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OnTime(period) => write!(f, "ONTIME {}", period),
            Self::Once => write!(f, "ONCE"),
        }
    }
}

/// Supported subset of the receiver command language
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Requests a binary log
    Log {
        message: MessageID,
        period: LogPeriod,
    },
    /// Cancels all log requests
    Unlogall,
    /// Configures a receiver serial port: 8N1, no handshake, echo off,
    /// break detection on.
    Com { port: String, baud: u32 },
    /// Provides the approximate GPS time
    SetApproxTime { week: u32, seconds: u64 },
    /// Provides the approximate position, in decimal degrees and meters
    SetApproxPos { latitude: f64, longitude: f64, height: f64 },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Log { message, period } => write!(f, "LOG {}B {}", message.name(), period),
            Self::Unlogall => write!(f, "UNLOGALL"),
            Self::Com { port, baud } => write!(f, "COM {},{},N,8,1,N,OFF,ON", port, baud),
            Self::SetApproxTime { week, seconds } => {
                write!(f, "SETAPPROXTIME {} {}", week, seconds)
            },
            Self::SetApproxPos {
                latitude,
                longitude,
                height,
            } => write!(f, "SETAPPROXPOS {} {} {}", latitude, longitude, height),
        }
    }
}

impl Command {
    /// Approximate time [Command] for given [Epoch].
    /// None when the GPS week or the time of week is null,
    /// which happens with an unset host clock.
    pub fn approx_time(epoch: Epoch) -> Option<Self> {
        let (week, nanos) = epoch.to_time_scale(TimeScale::GPST).to_time_of_week();
        let seconds = nanos / 1_000_000_000;
        if week == 0 || seconds == 0 {
            None
        } else {
            Some(Self::SetApproxTime { week, seconds })
        }
    }
}

/// [CommanderConfig] describes the receiver bring up
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CommanderConfig {
    /// Delay after each command byte
    pub pacing: Duration,
    /// Receiver port we are connected to
    pub port: String,
    /// Baud rate to switch to
    pub baud_rate: u32,
    /// Approximate (latitude, longitude, height)
    pub approx_position: Option<(f64, f64, f64)>,
    /// Logs to request
    pub logs: Vec<(MessageID, LogPeriod)>,
}

impl Default for CommanderConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(Constants::DEFAULT_COMMAND_PACING_MS),
            port: "COM1".to_string(),
            baud_rate: 115_200,
            approx_position: None,
            logs: vec![
                (MessageID::BestPos, LogPeriod::OnTime(0.05)),
                (MessageID::BestXyz, LogPeriod::OnTime(0.05)),
                (MessageID::TrackStat, LogPeriod::OnTime(1.0)),
            ],
        }
    }
}

impl CommanderConfig {
    /// Copies and returns [CommanderConfig] with given pacing
    pub fn with_pacing(&self, pacing: Duration) -> Self {
        let mut s = self.clone();
        s.pacing = pacing;
        s
    }
    /// Copies and returns [CommanderConfig] with given target baud rate
    pub fn with_baud_rate(&self, baud_rate: u32) -> Self {
        let mut s = self.clone();
        s.baud_rate = baud_rate;
        s
    }
    /// Copies and returns [CommanderConfig] with given approximate position
    pub fn with_approx_position(&self, latitude: f64, longitude: f64, height: f64) -> Self {
        let mut s = self.clone();
        s.approx_position = Some((latitude, longitude, height));
        s
    }
    /// Copies and returns [CommanderConfig] with given log requests
    pub fn with_logs(&self, logs: Vec<(MessageID, LogPeriod)>) -> Self {
        let mut s = self.clone();
        s.logs = logs;
        s
    }
}

/// [Commander] writes [Command]s on a [Transport] it borrows.
pub struct Commander<'a, T: Transport> {
    transport: &'a mut T,
    config: CommanderConfig,
}

impl<'a, T: Transport> Commander<'a, T> {
    pub fn new(transport: &'a mut T, config: CommanderConfig) -> Self {
        Self { transport, config }
    }

    /// Sends one [Command], byte per byte, terminated by CR LF.
    pub fn send(&mut self, command: &Command) -> Result<(), TransportError> {
        debug!("command: {}", command);
        let line = format!("{}\r\n", command);
        for byte in line.as_bytes() {
            self.transport.write_bytes(&[*byte])?;
            if !self.config.pacing.is_zero() {
                thread::sleep(self.config.pacing);
            }
        }
        Ok(())
    }

    /// Switches the receiver port then the local port to the target baud rate,
    /// then provides approximate time and position.
    /// `now` is the current host time.
    pub fn bring_up(&mut self, now: Epoch) -> Result<(), TransportError> {
        let baud = self.config.baud_rate;
        self.send(&Command::Com {
            port: self.config.port.clone(),
            baud,
        })?;

        match self.transport.set_baud_rate(baud) {
            Ok(_) => info!("switched to {} bauds", baud),
            Err(TransportError::Unsupported) => {
                warn!("transport baud rate is fixed");
            },
            Err(e) => return Err(e),
        }

        match Command::approx_time(now) {
            Some(command) => self.send(&command)?,
            None => warn!("host time unknown: approximate time not set"),
        }

        if let Some((latitude, longitude, height)) = self.config.approx_position {
            self.send(&Command::SetApproxPos {
                latitude,
                longitude,
                height,
            })?;
        }
        Ok(())
    }

    /// Requests every configured log
    pub fn request_logs(&mut self) -> Result<(), TransportError> {
        let logs = self.config.logs.clone();
        for (message, period) in logs {
            self.send(&Command::Log { message, period })?;
        }
        Ok(())
    }
}
