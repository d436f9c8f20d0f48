//! Commands sent from the GUI task to the logic task.
//!
//! The GUI only relays what the user touched; it never validates. The
//! logic task checks every value against the servo's travel before acting.

/// Commands the GUI task can send into the logic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleCommand {
    /// Move the servo to `angle` degrees.
    SetAngle { angle: i32 },
}
