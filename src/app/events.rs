//! Status events sent from the logic task to the GUI task.

/// Structured events emitted by the logic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// Servo bring-up succeeded. Sent exactly once, before any
    /// [`AngleApplied`](Self::AngleApplied).
    Initialized { angle: i32, pin: i32 },

    /// A [`SetAngle`](super::commands::AngleCommand::SetAngle) command was
    /// applied. Rejected commands produce no event.
    AngleApplied { angle: i32 },
}
