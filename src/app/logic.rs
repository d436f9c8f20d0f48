//! Servo logic task.
//!
//! Owns the [`ServoDriver`] and the logic-side channel halves. Each
//! inbound [`AngleCommand`] is applied to the servo; a successful apply is
//! confirmed to the GUI with [`StatusEvent::AngleApplied`]. Rejected
//! commands (out-of-range angle, LEDC write failure) are logged by the
//! driver and produce no event.
//!
//! ```text
//!          recv SetAngle           set_angle() done
//!   Idle ─────────────────▶ Applying ─────────────────▶ Idle
//!                              │ ok → send AngleApplied
//!                              │ err → nothing
//! ```

use core::time::Duration;

use log::{debug, info, trace, warn};

use super::commands::AngleCommand;
use super::events::StatusEvent;
use super::ports::PwmPort;
use crate::channels::LogicEndpoint;
use crate::drivers::servo::{ServoDriver, ServoInit};
use crate::error::ChannelError;

/// Loop phase, traced on every transition. Commands are applied
/// synchronously, so `Applying` only exists within one `handle_command`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogicState {
    /// Waiting on the command queue.
    Idle,
    /// Processing one command.
    Applying,
}

pub struct LogicTask<P: PwmPort> {
    servo: ServoDriver<P>,
    init: ServoInit,
    endpoint: LogicEndpoint,
    poll_timeout: Duration,
    state: LogicState,
    announced: bool,
}

impl<P: PwmPort> LogicTask<P> {
    /// `init` is the result of the servo bring-up already performed by the
    /// bootstrap; it decides whether [`announce`](Self::announce) sends
    /// anything.
    pub fn new(
        servo: ServoDriver<P>,
        init: ServoInit,
        endpoint: LogicEndpoint,
        poll_timeout: Duration,
    ) -> Self {
        Self {
            servo,
            init,
            endpoint,
            poll_timeout,
            state: LogicState::Idle,
            announced: false,
        }
    }

    /// Send the one-time [`StatusEvent::Initialized`] if the servo came up.
    ///
    /// Idempotent: later calls send nothing.
    pub fn announce(&mut self) -> Result<(), ChannelError> {
        if self.announced || !self.init.ok {
            return Ok(());
        }
        self.endpoint.events.send(StatusEvent::Initialized {
            angle: self.init.initial_angle,
            pin: self.init.control_pin,
        })?;
        self.announced = true;
        info!(
            "Logic: servo ready (angle={}, GPIO{})",
            self.init.initial_angle, self.init.control_pin
        );
        Ok(())
    }

    /// Apply one command. Returns `true` if an `AngleApplied` was sent.
    pub fn handle_command(&mut self, command: AngleCommand) -> bool {
        self.transition(LogicState::Applying);

        let sent = match command {
            AngleCommand::SetAngle { angle } => match self.servo.set_angle(angle) {
                Ok(()) => {
                    debug!("Logic: SetAngle({}) applied", angle);
                    match self.endpoint.events.send(StatusEvent::AngleApplied { angle }) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!("Logic: AngleApplied({}) not delivered: {}", angle, e);
                            false
                        }
                    }
                }
                Err(e) => {
                    debug!("Logic: SetAngle({}) dropped: {}", angle, e);
                    false
                }
            },
        };

        self.transition(LogicState::Idle);
        sent
    }

    /// Wait up to the poll timeout for one command and apply it.
    /// Returns `false` if the timeout elapsed with nothing to do.
    pub fn poll(&mut self) -> bool {
        match self.endpoint.commands.receive(self.poll_timeout) {
            Some(command) => {
                self.handle_command(command);
                true
            }
            None => false,
        }
    }

    /// Task body: announce the servo, then serve commands forever.
    pub fn run(mut self) -> ! {
        info!("Logic: task started");
        if let Err(e) = self.announce() {
            warn!("Logic: Initialized not delivered: {}", e);
        }
        loop {
            self.poll();
        }
    }

    fn transition(&mut self, next: LogicState) {
        trace!("Logic: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn servo(&self) -> &ServoDriver<P> {
        &self.servo
    }
}
