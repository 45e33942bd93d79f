//! Handler modules

pub mod analyze;
pub mod health;

pub use analyze::{handle_analyze, InboundRequest};
pub use health::health_check;
