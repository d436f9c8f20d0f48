//! Servo Panel Firmware — Main Entry Point
//!
//! Two cooperating tasks linked by bounded queues, with the hardware and
//! GUI behind port traits.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │     LedcPwm (PwmPort)         LogWidgets / LVGL (WidgetPort)   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌──────────────────────┐  AngleCommand  ┌─────────────────┐   │
//! │  │  GUI_Task  (prio 6)  │───────────────▶│ Main_Logic_Task │   │
//! │  │  UiTask              │◀───────────────│ LogicTask       │   │
//! │  └──────────────────────┘  StatusEvent   │ + ServoDriver   │   │
//! │                                          └─────────────────┘   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info};

use servopanel::adapters::log_widgets::LogWidgets;
use servopanel::bootstrap;
use servopanel::config::SystemConfig;
use servopanel::drivers::ledc::LedcPwm;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ServoPanel v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();

    // ── 2. Board bring-up (I2C, IO expander, LCD, touch, LVGL) ─
    // Owned by the board support layer; it must finish before widgets
    // are handed to the GUI task.
    info!(
        "Board: display/touch bring-up on I2C SDA={} SCL={}",
        servopanel::pins::I2C_SDA_GPIO,
        servopanel::pins::I2C_SCL_GPIO
    );
    let widgets = LogWidgets::new();

    // ── 3. Servo, queues, tasks ───────────────────────────────
    let handles = match bootstrap::start(&config, LedcPwm::new(), widgets) {
        Ok(h) => h,
        Err(e) => {
            error!("Bootstrap failed: {}, halting", e);
            return Err(e);
        }
    };
    info!(
        "System ready (servo ok={}, GPIO{})",
        handles.servo.ok, handles.servo.control_pin
    );

    // ── 4. Nothing left for the main task ─────────────────────
    // Both tasks loop forever; joining parks this task for good.
    if handles.logic.join().is_err() {
        error!("Main_Logic_Task panicked");
    }
    Ok(())
}
