pub mod toml_config;

use crate::core::{ConfigProvider, LogFormat};
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_positive_number, validate_range, Validate};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_REQUEST_TIMEOUT_SECONDS: u64 = 300;

/// Checks shared by every configuration source.
pub(crate) fn validate_server_settings<P: ConfigProvider + ?Sized>(prefix: &str, config: &P) -> Result<()> {
    validate_non_empty_string(&format!("{}host", prefix), config.host())?;
    validate_positive_number(&format!("{}port", prefix), usize::from(config.port()), 1)?;
    validate_range(
        &format!("{}request_timeout_seconds", prefix),
        config.request_timeout().as_secs(),
        1,
        MAX_REQUEST_TIMEOUT_SECONDS,
    )?;
    Ok(())
}

#[cfg(feature = "cli")]
pub use cli::CliConfig;

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "card-validator")]
    #[command(about = "HTTP service validating card number length, expiry and Luhn checksum")]
    pub struct CliConfig {
        #[arg(long, env = "CARD_VALIDATOR_HOST", default_value = DEFAULT_HOST)]
        pub host: String,

        #[arg(long, env = "CARD_VALIDATOR_PORT", default_value_t = DEFAULT_PORT)]
        pub port: u16,

        /// TOML configuration file; its values replace the flags above
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECONDS)]
        pub request_timeout_seconds: u64,

        /// Pin the current date (YYYY-MM-DD) used for expiry checks
        #[arg(long)]
        pub today: Option<NaiveDate>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn host(&self) -> &str {
            &self.host
        }

        fn port(&self) -> u16 {
            self.port
        }

        fn request_timeout(&self) -> Duration {
            Duration::from_secs(self.request_timeout_seconds)
        }

        fn log_format(&self) -> LogFormat {
            if self.json_logs {
                LogFormat::Json
            } else {
                LogFormat::Compact
            }
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_server_settings("--", self)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_cli_defaults() {
            let config = CliConfig::parse_from(["card-validator"]);
            assert_eq!(config.host(), DEFAULT_HOST);
            assert_eq!(config.port(), DEFAULT_PORT);
            assert_eq!(config.request_timeout(), Duration::from_secs(10));
            assert_eq!(config.log_format(), LogFormat::Compact);
            assert!(config.today.is_none());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_cli_flags() {
            let config = CliConfig::parse_from([
                "card-validator",
                "--port",
                "9000",
                "--today",
                "2026-10-18",
                "--json-logs",
                "--request-timeout-seconds",
                "0",
            ]);
            assert_eq!(config.port(), 9000);
            assert_eq!(config.today, NaiveDate::from_ymd_opt(2026, 10, 18));
            assert_eq!(config.log_format(), LogFormat::Json);
            assert!(config.validate().is_err());
        }
    }
}
