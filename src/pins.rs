//! GPIO / peripheral assignments for the servo panel board.
//!
//! Single source of truth: drivers and config defaults reference this
//! module rather than hard-coding pin or peripheral numbers.

// ---------------------------------------------------------------------------
// Servo output (LEDC PWM)
// ---------------------------------------------------------------------------

/// PWM output to the servo signal wire.
pub const SERVO_PWM_GPIO: i32 = 11;
/// LEDC timer driving the servo channel.
pub const SERVO_LEDC_TIMER: u32 = 0;
/// LEDC channel wired to [`SERVO_PWM_GPIO`].
pub const SERVO_LEDC_CHANNEL: u32 = 1;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Standard hobby-servo refresh rate (20 ms period).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  13-bit gives 0 – 8191 duty levels.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 13;

// ---------------------------------------------------------------------------
// Display / touch (brought up by the board support layer)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 1;
pub const I2C_SCL_GPIO: i32 = 2;
