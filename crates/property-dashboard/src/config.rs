//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use propjson::Options;

use crate::gateway::DEFAULT_UPSTREAM_URL;

#[derive(Parser, Debug)]
#[command(
    name = "property-dashboard",
    about = "Property search relay that always answers with well-formed JSON",
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

impl Cli {
    /// The subcommand to run; bare invocation means `serve`.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Serve(self.serve))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP relay (default)
    Serve(ServeArgs),
    /// Parse and sanitize a captured upstream payload, printing the JSON the relay would send
    Clean(CleanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "PROPERTY_DASHBOARD_BIND", default_value = "0.0.0.0:5001")]
    pub bind: SocketAddr,

    /// Upstream property search endpoint
    #[arg(long, env = "MICROBURBS_API_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Bearer token sent upstream
    #[arg(long, env = "MICROBURBS_API_TOKEN", default_value = "test", hide_env_values = true)]
    pub api_token: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Directory holding the dashboard page and its assets
    #[arg(long, env = "STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Characters of raw upstream text echoed in invalid-JSON reports (200..=1000)
    #[arg(long, env = "PROPERTY_DASHBOARD_PREVIEW_LEN", default_value_t = 500)]
    pub preview_len: usize,

    /// Skip the literal UTF-8 tier and always escape non-ASCII
    #[arg(long, env = "PROPERTY_DASHBOARD_ASCII_ONLY")]
    pub ascii_only: bool,
}

impl ServeArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn options(&self) -> Options {
        Options {
            ascii_only: self.ascii_only,
            ..Options::default()
        }
        .with_preview_len(self.preview_len)
    }
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    /// Input file (defaults to stdin)
    pub input: Option<PathBuf>,

    /// Escape every non-ASCII character in the output
    #[arg(long)]
    pub ascii: bool,

    /// Reject NaN, Infinity, raw control characters and lone surrogates
    #[arg(long)]
    pub strict: bool,
}

impl CleanArgs {
    pub fn options(&self) -> Options {
        Options {
            strict: self.strict,
            ascii_only: self.ascii,
            ..Options::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves_with_defaults() {
        let cli = Cli::try_parse_from(["property-dashboard"]).unwrap();
        let Command::Serve(args) = cli.into_command() else {
            panic!("serve expected");
        };
        assert_eq!(args.timeout(), Duration::from_secs(30));
        assert_eq!(args.options().preview_len, 500);
        assert!(!args.options().ascii_only);
    }

    #[test]
    fn preview_len_is_clamped() {
        let cli = Cli::try_parse_from(["property-dashboard", "serve", "--preview-len", "50"]).unwrap();
        let Command::Serve(args) = cli.into_command() else {
            panic!("serve expected");
        };
        assert_eq!(args.options().preview_len, 200);
    }

    #[test]
    fn clean_flags_map_to_options() {
        let cli = Cli::try_parse_from(["property-dashboard", "clean", "--ascii", "--strict", "in.json"])
            .unwrap();
        let Command::Clean(args) = cli.into_command() else {
            panic!("clean expected");
        };
        let opts = args.options();
        assert!(opts.strict && opts.ascii_only);
        assert_eq!(args.input, Some(PathBuf::from("in.json")));
    }
}
