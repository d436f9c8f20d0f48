//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter        | Implements         | Connects to              |
//! |----------------|--------------------|--------------------------|
//! | `log_widgets`  | WidgetPort         | Serial log output        |
//! | `time`         | DelayNs            | FreeRTOS task delay      |
//!
//! The LEDC backend lives in [`crate::drivers::ledc`] next to the servo
//! driver that uses it.

pub mod log_widgets;
pub mod time;
