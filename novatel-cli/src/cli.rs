use clap::{value_parser, Arg, ArgAction, ArgMatches, ColorChoice, Command};
use std::{fs::read_to_string, path::PathBuf};

use novatel_oem::prelude::{CommanderConfig, CrcPolicy, DecoderConfig, LogPeriod, MessageID};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Configuration file content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub decoder: DecoderConfig,
    pub commander: CommanderConfig,
}

pub struct Cli {
    /// Arguments passed by user
    matches: ArgMatches,
}

impl Cli {
    /// Build new command line interface
    pub fn new() -> Self {
        Self {
            matches: {
                Command::new("novatel-cli")
                    .version(env!("CARGO_PKG_VERSION"))
                    .about("NovAtel OEM binary logs decoder")
                    .color(ColorChoice::Always)
                    .arg(Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .conflicts_with("file")
                        .help("Set device port, default: \"/dev/ttyUSB0\""))
                    .arg(Arg::new("baud")
                        .short('b')
                        .long("baud")
                        .value_name("BAUDRATE")
                        .value_parser(value_parser!(u32))
                        .help("Set initial port baudrate, default: \"9600\""))
                    .arg(Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Replay a recorded binary log instead of opening a device"))
                    .arg(Arg::new("configure")
                        .short('c')
                        .long("configure")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("file")
                        .help("Switch baud rate, set approximate time and position, request logs"))
                    .arg(Arg::new("log")
                        .short('l')
                        .long("log")
                        .value_name("NAME[:PERIOD]")
                        .action(ArgAction::Append)
                        .help("Log to request when configuring, for example \"bestpos:0.05\". \"once\" is a valid period."))
                    .arg(Arg::new("cfg")
                        .long("cfg")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Load decoder and receiver configuration from a JSON file"))
                    .arg(Arg::new("lenient")
                        .long("lenient")
                        .action(ArgAction::SetTrue)
                        .help("Forward frames with a bad CRC instead of dropping them"))
                    .arg(Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("Record valid frames to this binary file"))
                    .arg(Arg::new("json")
                        .short('j')
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print decoded frames as JSON"))
                    .get_matches()
            },
        }
    }
    /* returns device port to use */
    pub fn port(&self) -> String {
        if let Some(p) = self.matches.get_one::<String>("port") {
            p.clone()
        } else {
            String::from("/dev/ttyUSB0")
        }
    }
    /* returns initial baudrate */
    pub fn baudrate(&self) -> u32 {
        self.matches.get_one::<u32>("baud").copied().unwrap_or(9600)
    }
    /* returns recorded file to replay */
    pub fn replay_file(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("file")
    }
    /* returns output file */
    pub fn output(&self) -> Option<&PathBuf> {
        self.matches.get_one::<PathBuf>("output")
    }
    pub fn configure(&self) -> bool {
        self.matches.get_flag("configure")
    }
    pub fn json(&self) -> bool {
        self.matches.get_flag("json")
    }
    /// Builds the [Config], from the configuration file if any,
    /// then command line overrides.
    pub fn config(&self) -> Result<Config, Error> {
        let mut cfg = match self.matches.get_one::<PathBuf>("cfg") {
            Some(fp) => {
                let content = read_to_string(fp)?;
                serde_json::from_str::<Config>(&content)?
            },
            None => Config::default(),
        };
        if self.matches.get_flag("lenient") {
            cfg.decoder = cfg.decoder.with_crc_policy(CrcPolicy::Lenient);
        }
        let logs = self.logs()?;
        if !logs.is_empty() {
            cfg.commander = cfg.commander.with_logs(logs);
        }
        Ok(cfg)
    }
    /* returns log requests */
    fn logs(&self) -> Result<Vec<(MessageID, LogPeriod)>, Error> {
        let mut logs = Vec::new();
        if let Some(values) = self.matches.get_many::<String>("log") {
            for value in values {
                logs.push(parse_log_request(value)?);
            }
        }
        Ok(logs)
    }
}

/// Parses "NAME[:PERIOD]", period defaults to one second
fn parse_log_request(value: &str) -> Result<(MessageID, LogPeriod), Error> {
    let (name, period) = match value.split_once(':') {
        Some((name, period)) => (name, Some(period.trim())),
        None => (value, None),
    };
    let mid =
        MessageID::from_name(name).ok_or_else(|| Error::UnknownLog(name.to_string()))?;
    let period = match period {
        None => LogPeriod::OnTime(1.0),
        Some(p) if p.eq_ignore_ascii_case("once") => LogPeriod::Once,
        Some(p) => {
            let period = p
                .parse::<f64>()
                .map_err(|_| Error::InvalidPeriod(p.to_string()))?;
            if period <= 0.0 {
                return Err(Error::InvalidPeriod(p.to_string()));
            }
            LogPeriod::OnTime(period)
        },
    };
    Ok((mid, period))
}
