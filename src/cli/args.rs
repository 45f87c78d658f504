use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

/// Serve the game store API
#[derive(Parser, Debug)]
#[command(name = "gamestore-engine")]
#[command(about = "Digital game store: catalogue, accounts, and purchase/lease transactions", long_about = None)]
pub struct CliArgs {
    /// Address to bind the HTTP listener to
    #[arg(
        long = "host",
        value_name = "ADDR",
        default_value = "127.0.0.1",
        help = "Address to bind to"
    )]
    pub host: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(
        long = "port",
        value_name = "PORT",
        default_value_t = 8080,
        help = "Port to bind to"
    )]
    pub port: u16,

    /// Log filter directive
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Log filter: error, warn, info, debug, or trace"
    )]
    pub log_level: String,

    /// Optional JSON seed file with initial accounts and catalogue items
    #[arg(
        long = "seed",
        value_name = "FILE",
        help = "Path to a JSON seed file loaded at startup"
    )]
    pub seed: Option<PathBuf>,
}

impl CliArgs {
    /// The socket address to bind
    pub fn bind_addr(&self) -> (IpAddr, u16) {
        (self.host, self.port)
    }
}
