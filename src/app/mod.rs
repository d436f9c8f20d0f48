//! Application core — the two cooperating tasks and their message types.
//!
//! This module contains the task-coordination logic: the logic task that
//! owns the servo and the GUI task that mirrors its state on screen.
//! All interaction with hardware and widgets happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod logic;
pub mod ports;
pub mod ui;
