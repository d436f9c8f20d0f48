//! Port traits — the boundary between task logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ServoDriver / UiTask (domain)
//! ```
//!
//! Driven adapters (LEDC peripheral, GUI widgets) implement these traits.
//! The domain consumes them via generics, so the tasks never touch
//! registers or widget handles directly.

use crate::error::PwmError;

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → LEDC peripheral)
// ───────────────────────────────────────────────────────────────

/// Periodic-signal generator used to drive the servo.
///
/// Mirrors the LEDC call sequence: a timer fixes frequency and
/// resolution, a channel binds a timer to a GPIO, and a duty write only
/// takes effect once committed.
pub trait PwmPort {
    /// Configure `timer` for `frequency_hz` at `resolution_bits` of duty
    /// resolution, with the clock source picked automatically.
    fn configure_timer(
        &mut self,
        timer: u32,
        frequency_hz: u32,
        resolution_bits: u32,
    ) -> Result<(), PwmError>;

    /// Bind `channel` to `timer` and route it to `gpio`.
    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        gpio: i32,
        initial_duty: u32,
    ) -> Result<(), PwmError>;

    /// Stage a new duty value. Has no visible effect until [`commit_duty`].
    ///
    /// [`commit_duty`]: PwmPort::commit_duty
    fn set_duty(&mut self, channel: u32, duty: u32) -> Result<(), PwmError>;

    /// Latch the staged duty into the output.
    fn commit_duty(&mut self, channel: u32) -> Result<(), PwmError>;

    /// Stop signal generation; the output idles low.
    fn stop(&mut self, channel: u32) -> Result<(), PwmError>;
}

// ───────────────────────────────────────────────────────────────
// Widget port (driven adapter: domain ↔ GUI widgets)
// ───────────────────────────────────────────────────────────────

/// Presentation surface owned by the GUI layer.
///
/// Only the GUI task calls into this port; the widget toolkit owns
/// rendering, layout and widget lifetimes.
pub trait WidgetPort {
    /// Update the angle readout label.
    fn show_angle(&mut self, angle: i32);

    /// Update the servo pin label.
    fn show_pin(&mut self, pin: i32);

    /// Move the angle slider without triggering its change callback.
    fn set_slider(&mut self, angle: i32);

    /// Value the user released the slider at since the last poll, if any.
    fn poll_input(&mut self) -> Option<i32> {
        None
    }
}
