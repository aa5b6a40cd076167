use thiserror::Error;

/// Kind tag of an expected business validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    WrongLength,
    Expired,
    LuhnFailed,
    MalformedInput,
}

/// A single constraint violated by raw request input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub kind: ErrorKind,
    pub message: String,
}

impl Violation {
    pub fn malformed(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            kind: ErrorKind::MalformedInput,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Wrong card number length")]
    WrongLength,

    #[error("Card has expired")]
    Expired,

    #[error("Invalid card number (failed Luhn algorithm check)")]
    LuhnFailed,

    #[error("{}", .0.message)]
    InvalidInput(Violation),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value `{value}` for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CardError {
    /// Returns the validation kind, or `None` for faults that are not
    /// business validation failures.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            CardError::WrongLength => Some(ErrorKind::WrongLength),
            CardError::Expired => Some(ErrorKind::Expired),
            CardError::LuhnFailed => Some(ErrorKind::LuhnFailed),
            CardError::InvalidInput(violation) => Some(violation.kind),
            _ => None,
        }
    }

    pub fn is_validation_failure(&self) -> bool {
        self.kind().is_some()
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CardError::IoError(e) => format!("File system error: {}", e),
            CardError::ConfigError { message } => format!("Invalid configuration: {}", message),
            CardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
            CardError::Internal { .. } => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CardError::IoError(_) => "Check that the file exists and is readable",
            CardError::ConfigError { .. } | CardError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and restart"
            }
            CardError::Internal { .. } => "Retry later or inspect the server logs",
            _ => "Correct the card details and try again",
        }
    }
}

impl From<Violation> for CardError {
    fn from(violation: Violation) -> Self {
        CardError::InvalidInput(violation)
    }
}

pub type Result<T> = std::result::Result<T, CardError>;
