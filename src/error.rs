//! Unified error types for the servo panel firmware.
//!
//! Subsystem errors are small `Copy` enums; every one of them converts
//! into the top-level [`Error`] so call sites that cross subsystems can
//! use `?` uniformly.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A servo command or LEDC operation failed.
    Servo(ServoError),
    /// An inter-task channel could not deliver a message.
    Channel(ChannelError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Servo(e) => write!(f, "servo: {e}"),
            Self::Channel(e) => write!(f, "channel: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// PWM peripheral errors
// ---------------------------------------------------------------------------

/// Raw `esp_err_t` returned by an LEDC call that did not report `ESP_OK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmError(pub i32);

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "esp_err {}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Servo errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoError {
    /// Requested angle is outside `0..=180`.
    InvalidAngle(i32),
    /// Sweep bounds, step or delay rejected before any movement.
    InvalidSweep,
    /// `ledc_timer_config` rejected the timer setup.
    TimerConfig(PwmError),
    /// `ledc_channel_config` rejected the channel setup.
    ChannelConfig(PwmError),
    /// `ledc_set_duty` failed.
    DutyWrite(PwmError),
    /// `ledc_update_duty` failed.
    DutyCommit(PwmError),
    /// `ledc_stop` failed.
    Stop(PwmError),
}

impl fmt::Display for ServoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAngle(a) => write!(f, "invalid angle {a}"),
            Self::InvalidSweep => write!(f, "invalid sweep parameters"),
            Self::TimerConfig(e) => write!(f, "LEDC timer config failed ({e})"),
            Self::ChannelConfig(e) => write!(f, "LEDC channel config failed ({e})"),
            Self::DutyWrite(e) => write!(f, "duty write failed ({e})"),
            Self::DutyCommit(e) => write!(f, "duty update failed ({e})"),
            Self::Stop(e) => write!(f, "LEDC stop failed ({e})"),
        }
    }
}

impl From<ServoError> for Error {
    fn from(e: ServoError) -> Self {
        Self::Servo(e)
    }
}

// ---------------------------------------------------------------------------
// Channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// The receiving half is gone; the message could never be consumed.
    Disconnected,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "receiver dropped"),
        }
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}
