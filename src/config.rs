use clap::Parser;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "duo-relay", version, about = "Relays moves between the two players of a room")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "RELAY_HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short, env = "RELAY_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Emit logs as JSON lines
    #[arg(long, env = "RELAY_LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            log_json: false,
        }
    }

    /// Reads command line flags, falling back to `RELAY_*` environment
    /// variables and then to the defaults.
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
