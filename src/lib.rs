pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{build_router, with_service_layers, ValidationResponse};
pub use adapters::query::{pre_validate, RawCardQuery};
pub use config::toml_config::TomlConfig;
pub use crate::core::validator::CardValidator;
pub use crate::core::{
    CardNumber, CardValidationRequest, Clock, FixedClock, InvalidReason, SystemClock,
    ValidationOutcome,
};
pub use utils::error::{CardError, ErrorKind, Result, Violation};
