pub mod catalog;
pub mod colour;
pub mod control;
pub mod device;
pub mod output;
pub mod prompt;

use clap::{Args, Parser, Subcommand};

use crate::api::request::{self, GatewayRequest};
use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::error::AppError;
use crate::models::destination::{self, Destination, DestinationKind, CHANNEL_INDEX};

#[derive(Parser)]
#[command(
    name = "dalion",
    version,
    about = "DALION gateway CLI - read and control DALI-2 lamps, groups, channels and control devices",
    long_about = "DALION gateway CLI - read and control DALI-2 lamps, groups, channels and control devices.\n\n\
                  Every positional argument may be omitted; missing values are prompted for."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Gateway IP address (host or host:port)
    #[arg(long, env = "DALION_IP", global = true)]
    pub ip: Option<String>,

    /// Output as human-readable table instead of JSON
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose output (log HTTP requests/responses)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the request URL instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read a variable of a lamp, group or channel
    GetDevice {
        #[command(flatten)]
        target: DestinationArgs,
        /// Variable id (see `dalion variables`)
        id: Option<String>,
    },

    /// Write a variable of a lamp, group or channel
    SetDevice {
        #[command(flatten)]
        target: DestinationArgs,
        /// Variable id (see `dalion variables`)
        id: Option<String>,
        /// New value; levels in percent with one decimal
        #[arg(allow_negative_numbers = true)]
        value: Option<String>,
    },

    /// Set the light level in percent (shorthand for `set-device ... dval`)
    SetLevel {
        #[command(flatten)]
        target: DestinationArgs,
        /// Light level in percent (0-100, one decimal)
        #[arg(allow_negative_numbers = true)]
        percent: Option<String>,
    },

    /// Set a colour of a lamp, group or channel
    SetColour {
        #[command(flatten)]
        target: DestinationArgs,
        /// Colour target id (d8ac, d8tp, d8tf, d8s0-d8s15, d8tw, d8tc)
        cid: Option<String>,
        /// Colour type: 16 = xy, 32 = Tc, 64 = primary N, 128 = RGBWAF
        #[arg(allow_negative_numbers = true)]
        ctype: Option<i64>,
        /// Components: x y | kelvin | p0..p5 | r g b w a f
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
    },

    /// Read the occupancy or light level of a DALI-2 control device
    GetControl {
        /// Channel number (1-4)
        #[arg(allow_negative_numbers = true)]
        channel: Option<i64>,
        /// Control device index (0-63)
        #[arg(allow_negative_numbers = true)]
        index: Option<i64>,
        /// Field: os = occupancy state, ls = light level
        field: Option<String>,
    },

    /// List the device variables
    Variables,

    /// List colour target ids and colour types
    Colours,
}

#[derive(Args)]
pub struct DestinationArgs {
    /// Channel number (1-4)
    #[arg(allow_negative_numbers = true)]
    pub channel: Option<i64>,

    /// Destination: 1/lamp, 2/group or 3/channel
    pub destination: Option<String>,

    /// Lamp index (0-63), group index (0-15), or -1 for a channel
    #[arg(allow_negative_numbers = true)]
    pub index: Option<i64>,
}

impl DestinationArgs {
    /// Fill in missing parts interactively, then validate.
    pub fn resolve(&self) -> Result<Destination, AppError> {
        let channel = match self.channel {
            Some(channel) => channel,
            None => prompt::number("Enter channel number (1-4)")?,
        };
        let kind = match &self.destination {
            Some(raw) => raw.parse::<DestinationKind>()?,
            None => prompt::destination_kind()?,
        };
        let index = match (self.index, kind) {
            (Some(index), _) => index,
            (None, DestinationKind::Lamp) => prompt::number("Enter lamp index (0-63)")?,
            (None, DestinationKind::Group) => prompt::number("Enter group index (0-15)")?,
            (None, DestinationKind::Channel) => CHANNEL_INDEX,
        };
        destination::resolve(channel, kind, index)
    }
}

/// Full URL of `request` against the gateway at `address`.
pub(crate) fn request_url(request: &GatewayRequest, address: &str) -> Result<reqwest::Url, AppError> {
    request.url(&request::base_url(address)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_get_device() {
        let cli = Cli::try_parse_from(["dalion", "--ip", "10.0.0.2", "get-device", "1", "3", "-1", "dval"])
            .unwrap();
        assert_eq!(cli.ip.as_deref(), Some("10.0.0.2"));
        match cli.command {
            Commands::GetDevice { target, id } => {
                assert_eq!(target.channel, Some(1));
                assert_eq!(target.destination.as_deref(), Some("3"));
                assert_eq!(target.index, Some(-1));
                assert_eq!(id.as_deref(), Some("dval"));
                let destination = target.resolve().unwrap();
                assert_eq!(destination.kind(), DestinationKind::Channel);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_parse_set_colour_values() {
        let cli = Cli::try_parse_from([
            "dalion", "set-colour", "1", "lamp", "4", "d8ac", "128", "255", "0", "0", "0", "0", "0",
        ])
        .unwrap();
        match cli.command {
            Commands::SetColour {
                cid, ctype, values, ..
            } => {
                assert_eq!(cid.as_deref(), Some("d8ac"));
                assert_eq!(ctype, Some(128));
                assert_eq!(values, vec![255, 0, 0, 0, 0, 0]);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["dalion", "variables", "-t", "--dry-run"]).unwrap();
        assert!(cli.table);
        assert!(cli.dry_run);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
    }
}
