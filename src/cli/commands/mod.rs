//! CLI command implementations

pub mod clean;
pub mod launch;
pub mod status;

pub use clean::execute as clean;
pub use launch::execute as launch;
pub use status::execute as status;
