// src/lib.rs

#![cfg_attr(not(any(feature = "std", test)), no_std)]

// Measurements carry owned strings, so alloc is always required.
extern crate alloc;

pub mod balance;
pub mod common;

// Re-export key types for convenience
pub use balance::SyncBalance;
pub use common::{parse_measurement, BalanceConfig, BalanceError, Command, Measurement};
