pub mod analysis;
pub mod api;

pub use analysis::*;
pub use api::*;
