//! System configuration parameters
//!
//! Servo signal geometry and task scheduling parameters. Defaults match the
//! SG90-class servo and the two-task layout the board ships with.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::pins;

/// Servo signal geometry and LEDC wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoConfig {
    // --- Pulse geometry ---
    /// Pulse width at 0 degrees (microseconds)
    pub min_pulse_us: u32,
    /// Pulse width at `max_degree` (microseconds)
    pub max_pulse_us: u32,
    /// Mechanical travel (degrees)
    pub max_degree: i32,

    // --- LEDC ---
    /// Refresh frequency (Hz)
    pub frequency_hz: u32,
    /// Duty resolution (bits)
    pub resolution_bits: u32,
    pub ledc_timer: u32,
    pub ledc_channel: u32,
    /// Signal output pin
    pub gpio: i32,

    /// Angle commanded once the LEDC is configured
    pub initial_angle: i32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            max_degree: 180,

            frequency_hz: pins::SERVO_PWM_FREQ_HZ,
            resolution_bits: pins::SERVO_PWM_RESOLUTION_BITS,
            ledc_timer: pins::SERVO_LEDC_TIMER,
            ledc_channel: pins::SERVO_LEDC_CHANNEL,
            gpio: pins::SERVO_PWM_GPIO,

            initial_angle: 0,
        }
    }
}

impl ServoConfig {
    /// Signal period in microseconds (20 000 at 50 Hz).
    pub fn period_us(&self) -> u32 {
        1_000_000 / self.frequency_hz
    }

    /// Largest duty value the timer accepts (8191 at 13 bits).
    pub fn max_duty(&self) -> u32 {
        (1u32 << self.resolution_bits) - 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_pulse_us >= self.max_pulse_us {
            return Err(ConfigError::ValidationFailed(
                "min_pulse_us must be below max_pulse_us",
            ));
        }
        if self.max_degree <= 0 {
            return Err(ConfigError::ValidationFailed("max_degree must be positive"));
        }
        if self.frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed("frequency_hz must be non-zero"));
        }
        if !(1..=14).contains(&self.resolution_bits) {
            return Err(ConfigError::ValidationFailed(
                "resolution_bits must be within 1..=14",
            ));
        }
        if self.max_pulse_us > self.period_us() {
            return Err(ConfigError::ValidationFailed(
                "max_pulse_us exceeds the signal period",
            ));
        }
        if !(0..=self.max_degree).contains(&self.initial_angle) {
            return Err(ConfigError::ValidationFailed(
                "initial_angle outside servo travel",
            ));
        }
        Ok(())
    }
}

/// Scheduling parameters for the two application tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Inbound queue poll timeout for both task loops (milliseconds)
    pub poll_timeout_ms: u32,

    // --- GUI task (higher priority for responsiveness) ---
    pub ui_priority: u8,
    pub ui_stack_kb: usize,

    // --- Logic task ---
    pub logic_priority: u8,
    pub logic_stack_kb: usize,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 10,

            ui_priority: 6,
            ui_stack_kb: 8,

            logic_priority: 4,
            logic_stack_kb: 4,
        }
    }
}

impl TaskConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "poll_timeout_ms must be non-zero",
            ));
        }
        if self.ui_stack_kb == 0 || self.logic_stack_kb == 0 {
            return Err(ConfigError::ValidationFailed("task stacks must be non-zero"));
        }
        Ok(())
    }
}

/// Everything the bootstrap needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub servo: ServoConfig,
    pub tasks: TaskConfig,
}

impl SystemConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.servo.validate()?;
        self.tasks.validate()
    }
}

/// A config field failed range validation.
///
/// The `&'static str` describes which field and why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
