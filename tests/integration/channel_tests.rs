//! Cross-thread behaviour of the bounded inter-task queues.

use std::thread;
use std::time::{Duration, Instant};

use servopanel::app::commands::AngleCommand;
use servopanel::app::events::StatusEvent;
use servopanel::channels::{QUEUE_DEPTH, channel, command_channels};
use servopanel::error::ChannelError;

const WAIT: Duration = Duration::from_secs(2);

#[test]
fn fifo_order_survives_more_messages_than_capacity() {
    let (tx, rx) = channel::<i32>("fifo");
    let total = (QUEUE_DEPTH * 3) as i32;

    let producer = thread::spawn(move || {
        for i in 0..total {
            tx.send(i).unwrap();
        }
        tx
    });

    let mut received = Vec::new();
    while received.len() < total as usize {
        if let Some(v) = rx.receive(WAIT) {
            received.push(v);
        } else {
            panic!("producer stalled after {} messages", received.len());
        }
    }
    let _tx = producer.join().unwrap();

    assert_eq!(received, (0..total).collect::<Vec<_>>());
}

#[test]
fn eleventh_send_blocks_until_a_slot_frees() {
    let (tx, rx) = channel::<i32>("backpressure");

    let producer = thread::spawn(move || {
        for i in 0..=QUEUE_DEPTH as i32 {
            tx.send(i).unwrap();
        }
        tx
    });

    // Wait for the queue to fill, then give the 11th send time to park.
    let deadline = Instant::now() + WAIT;
    while rx.len() < QUEUE_DEPTH {
        assert!(Instant::now() < deadline, "queue never filled");
        thread::sleep(Duration::from_millis(1));
    }
    thread::sleep(Duration::from_millis(50));
    assert!(!producer.is_finished(), "send must block while full");
    assert_eq!(rx.len(), QUEUE_DEPTH, "nothing dropped or overwritten");

    assert_eq!(rx.receive(Duration::ZERO), Some(0));
    let _tx = producer.join().unwrap();

    let rest: Vec<i32> = std::iter::from_fn(|| rx.try_receive()).collect();
    assert_eq!(rest, (1..=QUEUE_DEPTH as i32).collect::<Vec<_>>());
}

#[test]
fn receive_wakes_on_send_from_another_thread() {
    let (ui, logic) = command_channels();

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        ui.commands
            .send(AngleCommand::SetAngle { angle: 135 })
            .unwrap();
        ui
    });

    let started = Instant::now();
    let got = logic.commands.receive(WAIT);
    assert_eq!(got, Some(AngleCommand::SetAngle { angle: 135 }));
    assert!(started.elapsed() < WAIT, "woken by the send, not the timeout");
    let _ui = sender.join().unwrap();
}

#[test]
fn receive_times_out_on_empty_queue() {
    let (_ui, logic) = command_channels();
    let timeout = Duration::from_millis(20);

    let started = Instant::now();
    assert_eq!(logic.commands.receive(timeout), None);
    assert!(started.elapsed() >= timeout);
}

#[test]
fn each_direction_is_independent() {
    let (ui, logic) = command_channels();

    logic
        .events
        .send(StatusEvent::AngleApplied { angle: 10 })
        .unwrap();
    assert!(logic.commands.is_empty());
    assert_eq!(
        ui.events.try_receive(),
        Some(StatusEvent::AngleApplied { angle: 10 })
    );
}

#[test]
fn send_after_peer_dropped_reports_disconnected() {
    let (ui, logic) = command_channels();
    drop(logic);

    assert_eq!(
        ui.commands.send(AngleCommand::SetAngle { angle: 0 }),
        Err(ChannelError::Disconnected)
    );
}
