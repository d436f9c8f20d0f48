//! GUI task.
//!
//! Mirrors logic-task status on the widgets and turns slider releases
//! into [`AngleCommand`]s. Polls its inbound queue with a short timeout so
//! widget input is picked up between events.

use core::time::Duration;

use log::{info, warn};

use super::commands::AngleCommand;
use super::events::StatusEvent;
use super::ports::WidgetPort;
use crate::channels::UiEndpoint;
use crate::error::ChannelError;

pub struct UiTask<W: WidgetPort> {
    widgets: W,
    endpoint: UiEndpoint,
    poll_timeout: Duration,
}

impl<W: WidgetPort> UiTask<W> {
    pub fn new(widgets: W, endpoint: UiEndpoint, poll_timeout: Duration) -> Self {
        Self {
            widgets,
            endpoint,
            poll_timeout,
        }
    }

    /// Ask the logic task to move the servo. Blocks while the command
    /// queue is full. The angle is not checked here.
    pub fn request_angle(&self, angle: i32) -> Result<(), ChannelError> {
        let result = self.endpoint.commands.send(AngleCommand::SetAngle { angle });
        info!(
            "UI: request angle {}, result: {}",
            angle,
            if result.is_ok() { "success" } else { "failure" }
        );
        result
    }

    /// Reflect one status event on the widgets.
    pub fn handle_event(&mut self, event: StatusEvent) {
        match event {
            StatusEvent::Initialized { angle, pin } => {
                self.widgets.show_angle(angle);
                self.widgets.set_slider(angle);
                self.widgets.show_pin(pin);
                info!("UI: servo initialized (angle={}, GPIO{})", angle, pin);
            }
            StatusEvent::AngleApplied { angle } => {
                self.widgets.show_angle(angle);
                info!("UI: servo angle now {}", angle);
            }
        }
    }

    /// Forward pending widget input, then wait up to the poll timeout for
    /// one status event. Returns `true` if an event was handled.
    pub fn poll(&mut self) -> bool {
        if let Some(angle) = self.widgets.poll_input() {
            if let Err(e) = self.request_angle(angle) {
                warn!("UI: slider value {} not sent: {}", angle, e);
            }
        }

        match self.endpoint.events.receive(self.poll_timeout) {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Task body: serve widgets and events forever.
    pub fn run(mut self) -> ! {
        info!("UI: task started");
        loop {
            self.poll();
        }
    }

    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    pub fn widgets_mut(&mut self) -> &mut W {
        &mut self.widgets
    }
}
