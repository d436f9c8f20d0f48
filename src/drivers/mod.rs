//! Servo driver, LEDC backend and task spawning helpers.

pub mod ledc;
pub mod servo;
pub mod task_pin;
