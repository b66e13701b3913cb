pub mod config;
pub mod errors;
pub mod kernel;
pub mod params;
pub mod unwrap;
pub mod validation;
