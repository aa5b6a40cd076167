// Domain layer: card models and ports. No HTTP or runtime dependencies.

pub mod clock;
pub mod model;
pub mod ports;
