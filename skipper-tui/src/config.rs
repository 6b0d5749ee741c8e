use std::env;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use skipper_core::model::{DEFAULT_AREA, DEFAULT_POSTCODE, Location};
use skipper_provider_wewantwaste::BASE_URL;

/// Pick a skip size for a location and confirm it for checkout.
#[derive(Debug, Parser)]
#[command(name = "skipper", version, about)]
pub(crate) struct Config {
    /// Base URL of the skip hire API.
    #[arg(long, env = "SKIPPER_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Postcode to list skips for.
    #[arg(long, env = "SKIPPER_POSTCODE", default_value = DEFAULT_POSTCODE)]
    pub postcode: String,

    /// Area to list skips for.
    #[arg(long, env = "SKIPPER_AREA", default_value = DEFAULT_AREA)]
    pub area: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SKIPPER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// File that receives the application log (filter with `RUST_LOG`).
    #[arg(long, env = "SKIPPER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub(crate) fn location(&self) -> Location {
        Location::new(self.postcode.as_str(), self.area.as_str())
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| env::temp_dir().join("skipper.log"))
    }
}
