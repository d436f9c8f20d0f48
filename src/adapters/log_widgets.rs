//! Log-backed widget adapter.
//!
//! Implements [`WidgetPort`] by keeping the label texts and slider value
//! in memory and writing every update to the logger. Stands in for the
//! LVGL screen until a display adapter is wired in, and doubles as the
//! host-side presentation layer.

use core::fmt::Write;

use heapless::String;
use log::{info, warn};

use crate::app::ports::WidgetPort;

/// Longest label the angle / pin readouts ever show ("-2147483648").
const LABEL_LEN: usize = 12;

#[derive(Debug, Default)]
pub struct LogWidgets {
    angle_label: String<LABEL_LEN>,
    pin_label: String<LABEL_LEN>,
    slider: i32,
    pending_input: Option<i32>,
}

impl LogWidgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle_label(&self) -> &str {
        &self.angle_label
    }

    pub fn pin_label(&self) -> &str {
        &self.pin_label
    }

    pub fn slider(&self) -> i32 {
        self.slider
    }

    /// Simulate the user releasing the slider at `angle`.
    pub fn release_slider(&mut self, angle: i32) {
        self.slider = angle;
        self.pending_input = Some(angle);
    }
}

fn set_label(label: &mut String<LABEL_LEN>, value: i32) {
    label.clear();
    if write!(label, "{}", value).is_err() {
        warn!("WIDGET | label overflow for {}", value);
    }
}

impl WidgetPort for LogWidgets {
    fn show_angle(&mut self, angle: i32) {
        set_label(&mut self.angle_label, angle);
        info!("WIDGET | angle={}", self.angle_label);
    }

    fn show_pin(&mut self, pin: i32) {
        set_label(&mut self.pin_label, pin);
        info!("WIDGET | servo_pin=GPIO{}", self.pin_label);
    }

    fn set_slider(&mut self, angle: i32) {
        self.slider = angle;
        info!("WIDGET | slider={}", angle);
    }

    fn poll_input(&mut self) -> Option<i32> {
        self.pending_input.take()
    }
}
