pub mod validator;

pub use crate::domain::clock::{FixedClock, SystemClock};
pub use crate::domain::model::{CardNumber, CardValidationRequest, InvalidReason, ValidationOutcome};
pub use crate::domain::ports::{Clock, ConfigProvider, LogFormat};
pub use crate::utils::error::Result;
