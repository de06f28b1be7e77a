// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod measurement;
pub mod timing;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{frame_raw, Command, CommandBuffer, CommandFormatError, Environment, InfoKind};

// From config.rs
pub use config::BalanceConfig;

// From error.rs
pub use error::BalanceError;

// From hal_traits.rs
pub use hal_traits::{BalanceInstant, BalanceSerial, BalanceTimer};

// From measurement/mod.rs (and its sub-modules via its own `pub use`)
pub use measurement::{
    parse_measurement, // From measurement/parse.rs
    Measurement,
    ReplyFormat,
    CONNECTION_TIMEOUT_MESSAGE,
};
