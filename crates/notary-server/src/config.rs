//! Command-line configuration.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;

use clap::Parser;

/// Address used when `--addr` is empty.
const ALL_INTERFACES: &str = "0.0.0.0";

#[derive(Debug, Clone, Parser)]
#[command(name = "notary-server")]
#[command(about = "Notarize payloads over HTTPS")]
pub struct Cli {
    /// Listen address; empty listens on every interface
    #[arg(long, env = "NOTARY_ADDR", default_value = "")]
    pub addr: String,

    /// Listen port
    #[arg(long, env = "NOTARY_PORT", default_value_t = 443)]
    pub port: u16,

    /// TLS certificate chain (PEM)
    #[arg(long, env = "NOTARY_TLS_CERT")]
    pub crt: PathBuf,

    /// TLS private key (PEM)
    #[arg(long, env = "NOTARY_TLS_KEY")]
    pub key: PathBuf,

    /// RSA key receipts are signed with (PEM, PKCS#1 or PKCS#8).
    /// Without it receipts carry a SHA-512 integrity stamp only.
    #[arg(long, env = "NOTARY_SIGNING_KEY")]
    pub signing_key: Option<PathBuf>,

    /// Directory receipts are stored in
    #[arg(long, env = "NOTARY_DATA_DIR", default_value = "./receipts")]
    pub data_dir: PathBuf,
}

impl Cli {
    /// Resolve `--addr` and `--port` to the socket to bind.
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        let host = if self.addr.is_empty() {
            ALL_INTERFACES
        } else {
            self.addr.as_str()
        };
        (host, self.port).to_socket_addrs()?.next().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{host} resolved to no addresses"),
            )
        })
    }
}
