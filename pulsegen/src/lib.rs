pub mod generator;
pub mod server;
pub mod subscriber;
pub mod template;
pub mod timer;

use argh::FromArgs;
use std::time::Duration;

#[derive(Debug, FromArgs, Clone)]
/// Publish synthetic detector pulses over a ZeroMQ PUB socket
pub struct CliArgs {
    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// seed for channel selection (default: from entropy)
    #[argh(option)]
    pub seed: Option<u64>,
    /// port to publish on
    #[argh(positional, default = "5502")]
    pub port: u16,
}

#[derive(Debug, FromArgs, Clone)]
/// Subscribe to a pulse publisher and print each pulse record
pub struct WatchArgs {
    /// print version information
    #[argh(switch, short = 'v')]
    pub version: bool,
    /// publisher address
    #[argh(option, default = "String::from(\"127.0.0.1:5502\")")]
    pub addr: String,
    /// channel to subscribe to; repeat for more (default: all)
    #[argh(option, short = 'c')]
    pub channel: Vec<u16>,
}

/// Fixed generator parameters
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub samples: usize,
    pub presamples: u32,
    /// Channels with pulse records, half-open
    pub chan_min: u16,
    pub chan_max: u16,
    /// Channels that are drawn from, inclusive
    pub select_min: u16,
    pub select_max: u16,
    /// Seconds per sample
    pub timebase: f64,
    pub volts_per_arb: f64,
    /// Pause after each message
    pub period: Duration,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: String::from("0.0.0.0"),
            port: 5502,
            samples: 1000,
            presamples: 200,
            chan_min: 1,
            chan_max: 25,
            select_min: 1,
            select_max: 20,
            timebase: 2.5e-6,
            volts_per_arb: 1. / 65535.,
            period: Duration::from_millis(100),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_args(args: &CliArgs) -> Self {
        Config {
            port: args.port,
            seed: args.seed,
            ..Config::default()
        }
    }

    pub fn endpoint(&self) -> String {
        format!("tcp://{}:{}", self.host, self.port)
    }
}

pub enum Event {
    Tick,
}
