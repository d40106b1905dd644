//! Command line interface definitions

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "golfcast",
    about = "Golf weather scoring with best tee-time windows",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the API server
    Serve {
        /// Override the listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the golf outlook for a location
    Forecast {
        /// Location as "lat,lon" or a place name
        #[arg(long)]
        location: String,

        /// Emit the full outlook as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_with_overrides() {
        let cli = Cli::parse_from(["golfcast", "serve", "--host", "0.0.0.0", "--port", "9000"]);

        match cli.command {
            Command::Serve { host, port } => {
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
                assert_eq!(port, Some(9000));
            }
            Command::Forecast { .. } => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_forecast_with_location() {
        let cli = Cli::parse_from(["golfcast", "forecast", "--location", "Munich", "--json"]);

        match cli.command {
            Command::Forecast { location, json } => {
                assert_eq!(location, "Munich");
                assert!(json);
            }
            Command::Serve { .. } => panic!("expected forecast command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["golfcast", "forecast", "--location", "48.1,11.5", "-vv"]);

        assert_eq!(cli.verbose, 2);
        assert!(cli.config.is_none());
    }
}
