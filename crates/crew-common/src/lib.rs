//! # crew-common
//!
//! Shared utilities: configuration, the persisted session store, and telemetry.

pub mod config;
pub mod session;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use config::{ClientConfig, ConfigError, Environment};
pub use session::{FileStorage, MemoryStorage, Session, SessionStorage, SessionStore, StorageError};
pub use telemetry::{
    init_telemetry, init_telemetry_with_config, try_init_telemetry, TelemetryConfig,
    TelemetryError,
};
