//! One-time system bring-up.
//!
//! Order matters: the servo is configured first so its result can be
//! handed to the logic task, then both queues are created, then both tasks
//! are spawned. Nothing is sent on a queue until both tasks exist; the
//! `Initialized` event is emitted by the logic task itself, which is
//! spawned last.
//!
//! Display, I2C and touch bring-up belong to the board support layer and
//! must have completed before the widgets are handed in here.

use core::time::Duration;
use std::thread::JoinHandle;

use anyhow::Result;
use log::{info, warn};

use crate::app::logic::LogicTask;
use crate::app::ports::{PwmPort, WidgetPort};
use crate::app::ui::UiTask;
use crate::channels::command_channels;
use crate::config::SystemConfig;
use crate::drivers::servo::{ServoDriver, ServoInit};
use crate::drivers::task_pin::spawn_on_core;
use crate::error::Error;

/// Handles to the running tasks. The tasks never return.
pub struct SystemHandles {
    pub ui: JoinHandle<()>,
    pub logic: JoinHandle<()>,
    pub servo: ServoInit,
}

/// Bring up the servo, create the queues and spawn both tasks.
pub fn start<P, W>(config: &SystemConfig, pwm: P, widgets: W) -> Result<SystemHandles>
where
    P: PwmPort + Send + 'static,
    W: WidgetPort + Send + 'static,
{
    config.validate().map_err(Error::from)?;

    let mut servo = ServoDriver::new(pwm, config.servo.clone());
    let init = servo.initialize();
    if !init.ok {
        warn!("Bootstrap: servo init failed, GUI will not receive servo status");
    }

    let (ui_end, logic_end) = command_channels();
    let poll_timeout = Duration::from_millis(u64::from(config.tasks.poll_timeout_ms));

    let ui_task = UiTask::new(widgets, ui_end, poll_timeout);
    let logic_task = LogicTask::new(servo, init, logic_end, poll_timeout);

    // GUI first and at higher priority so the screen stays responsive.
    let ui: JoinHandle<()> = spawn_on_core(
        config.tasks.ui_priority,
        config.tasks.ui_stack_kb,
        "GUI_Task\0",
        move || {
            ui_task.run();
        },
    )?;
    let logic: JoinHandle<()> = spawn_on_core(
        config.tasks.logic_priority,
        config.tasks.logic_stack_kb,
        "Main_Logic_Task\0",
        move || {
            logic_task.run();
        },
    )?;

    info!("Bootstrap: all tasks created");
    Ok(SystemHandles {
        ui,
        logic,
        servo: init,
    })
}
