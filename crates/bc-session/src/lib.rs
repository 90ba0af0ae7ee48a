//! Session layer: owns the Cloudflare credentials and the process-wide
//! API client handle that higher-level utilities borrow per call.

mod config;
mod resolver;

pub use config::{ConfigError, SessionConfig};
pub use resolver::{ClientResolver, SharedClientResolver};
