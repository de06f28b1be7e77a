// src/balance/mod.rs

pub mod sync_balance;

#[cfg(feature = "std")]
pub mod std_interface;

// Re-export the public client struct
pub use sync_balance::SyncBalance;

#[cfg(feature = "std")]
pub use std_interface::{StdInterface, StdInstant};
