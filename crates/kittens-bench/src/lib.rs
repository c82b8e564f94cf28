pub mod config;
pub mod logging;
pub mod profile;
pub mod scenario;
