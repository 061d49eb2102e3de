pub mod client;
pub mod config;
pub mod console;
pub mod driver;
pub mod error;

pub use client::{EngineClient, Offline};
pub use config::{ContinuationDelays, GameMode, HostConfig};
pub use driver::Driver;
pub use error::HostError;
