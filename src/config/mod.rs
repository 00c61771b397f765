//! Configuration and path management for biller-cli

pub mod paths;
pub mod settings;

pub use paths::BillerPaths;
pub use settings::Settings;
