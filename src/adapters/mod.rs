// Adapters layer: the HTTP boundary around the card validator.

pub mod http;
pub mod query;
