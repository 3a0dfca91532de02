use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "print-intake")]
#[command(author, version, about = "Print shop order intake server", long_about = None)]
pub struct Config {
    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind to
    #[arg(short, long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Database connection string (postgres://, mysql:// or sqlite://)
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://print_shop.db?mode=rwc")]
    pub database_url: String,

    /// Directory uploaded PDFs are stored in
    #[arg(long, env = "UPLOAD_FOLDER", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Maximum request body size for uploads, in megabytes
    #[arg(long, env = "MAX_UPLOAD_MB", default_value = "50")]
    pub max_upload_mb: usize,

    /// Recompute every submitted file cost from the price table and reject mismatches
    #[arg(long, env = "VERIFY_COSTS")]
    pub verify_costs: bool,

    /// Run pending migrations before serving
    #[arg(long, env = "AUTO_MIGRATE")]
    pub auto_migrate: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
