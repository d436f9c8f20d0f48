//! Inter-task command channels.
//!
//! Uses `embassy-sync` bounded channels to connect the GUI task and the
//! servo logic task. Each direction is a separate queue with exactly one
//! producer half and one consumer half; neither half is `Clone`, so the
//! single-writer role of each queue is fixed at construction.
//!
//! ```text
//! ┌──────────────┐  AngleCommand  ┌──────────────┐
//! │   GUI Task   │───────────────▶│  Logic Task  │
//! │  (prio 6)    │◀───────────────│  (prio 4)    │
//! └──────────────┘  StatusEvent   └──────────────┘
//! ```
//!
//! `send` blocks while the queue is full (back-pressure: nothing is ever
//! dropped or overwritten). `receive` waits at most `timeout` so polling
//! loops stay live.

use core::time::Duration;
use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use futures_lite::future;
use log::{debug, error, trace};

use crate::app::commands::AngleCommand;
use crate::app::events::StatusEvent;
use crate::error::ChannelError;

/// Queue depth for both directions.
pub const QUEUE_DEPTH: usize = 10;

type Queue<T> = Channel<CriticalSectionRawMutex, T, QUEUE_DEPTH>;

/// Create one directional queue and split it into its two halves.
pub fn channel<T>(name: &'static str) -> (Sender<T>, Receiver<T>) {
    let queue = Arc::new(Queue::new());
    (
        Sender {
            queue: Arc::clone(&queue),
            name,
        },
        Receiver { queue, name },
    )
}

/// Producer half of a directional queue.
pub struct Sender<T> {
    queue: Arc<Queue<T>>,
    name: &'static str,
}

impl<T> Sender<T> {
    /// Enqueue `msg`, blocking the calling task for as long as the queue is
    /// full. Wakes a receiver parked in [`Receiver::receive`].
    pub fn send(&self, msg: T) -> Result<(), ChannelError> {
        if Arc::strong_count(&self.queue) < 2 {
            error!("{}: receiver dropped, message discarded", self.name);
            return Err(ChannelError::Disconnected);
        }

        match self.queue.try_send(msg) {
            Ok(()) => {}
            Err(TrySendError::Full(msg)) => {
                debug!("{}: queue full, waiting for space", self.name);
                future::block_on(self.queue.send(msg));
            }
        }
        Ok(())
    }

}

/// Consumer half of a directional queue.
pub struct Receiver<T> {
    queue: Arc<Queue<T>>,
    name: &'static str,
}

impl<T> Receiver<T> {
    /// Dequeue the oldest message, waiting up to `timeout` for one to
    /// arrive. `None` means the timeout elapsed with the queue empty.
    pub fn receive(&self, timeout: Duration) -> Option<T> {
        if let Ok(msg) = self.queue.try_receive() {
            return Some(msg);
        }
        if timeout.is_zero() {
            return None;
        }

        let msg = future::block_on(future::or(
            async { Some(self.queue.receive().await) },
            async {
                async_io_mini::Timer::after(timeout).await;
                None
            },
        ));
        if msg.is_none() {
            trace!("{}: no message within {:?}", self.name, timeout);
        }
        msg
    }

    /// Non-blocking dequeue.
    pub fn try_receive(&self) -> Option<T> {
        self.queue.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// ── Task endpoints ────────────────────────────────────────────

/// The GUI task's view of the two queues.
pub struct UiEndpoint {
    pub commands: Sender<AngleCommand>,
    pub events: Receiver<StatusEvent>,
}

/// The logic task's view of the two queues.
pub struct LogicEndpoint {
    pub commands: Receiver<AngleCommand>,
    pub events: Sender<StatusEvent>,
}

/// Build both directional queues (capacity [`QUEUE_DEPTH`] each) and hand
/// each task the halves it is allowed to use.
pub fn command_channels() -> (UiEndpoint, LogicEndpoint) {
    let (cmd_tx, cmd_rx) = channel("ui->logic");
    let (evt_tx, evt_rx) = channel("logic->ui");
    log::info!("Channels: created ui->logic and logic->ui (depth {})", QUEUE_DEPTH);
    (
        UiEndpoint {
            commands: cmd_tx,
            events: evt_rx,
        },
        LogicEndpoint {
            commands: cmd_rx,
            events: evt_tx,
        },
    )
}
