//! Servo panel firmware library.
//!
//! Exposes the task, channel and driver modules for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; host builds get in-memory simulations instead.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod bootstrap;
pub mod channels;
pub mod config;
pub mod drivers;
pub mod error;
mod esp_link_shims;
pub mod pins;
