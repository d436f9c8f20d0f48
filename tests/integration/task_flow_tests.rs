//! End-to-end flow between the GUI task and the logic task.
//!
//! Single-threaded tests drive `poll()` / `handle_command()` by hand;
//! the bootstrap tests run the real task loops on spawned threads.

use std::thread;
use std::time::{Duration, Instant};

use super::mock_hw::{MockPwm, MockWidgets, SharedWidgets, WidgetCall};

use servopanel::app::commands::AngleCommand;
use servopanel::app::events::StatusEvent;
use servopanel::app::logic::LogicTask;
use servopanel::app::ui::UiTask;
use servopanel::bootstrap;
use servopanel::channels::{UiEndpoint, command_channels};
use servopanel::config::{ServoConfig, SystemConfig};
use servopanel::drivers::servo::ServoDriver;

const SHORT: Duration = Duration::from_millis(5);
const WAIT: Duration = Duration::from_secs(3);

fn make_logic(pwm: MockPwm) -> (LogicTask<MockPwm>, UiEndpoint) {
    let mut servo = ServoDriver::new(pwm, ServoConfig::default());
    let init = servo.initialize();
    let (ui, logic) = command_channels();
    (LogicTask::new(servo, init, logic, SHORT), ui)
}

fn wait_for(widgets: &SharedWidgets, call: WidgetCall) {
    let deadline = Instant::now() + WAIT;
    while !widgets.calls().contains(&call) {
        assert!(
            Instant::now() < deadline,
            "timed out waiting for {:?}, saw {:?}",
            call,
            widgets.calls()
        );
        thread::sleep(Duration::from_millis(2));
    }
}

// ── Logic task ────────────────────────────────────────────────

#[test]
fn set_angle_command_yields_one_applied_event() {
    let (mut logic, ui) = make_logic(MockPwm::new());

    ui.commands
        .send(AngleCommand::SetAngle { angle: 90 })
        .unwrap();
    assert!(logic.poll());

    assert_eq!(
        ui.events.receive(SHORT),
        Some(StatusEvent::AngleApplied { angle: 90 })
    );
    assert_eq!(ui.events.receive(SHORT), None, "exactly one event");
    assert_eq!(logic.servo().current_angle(), Some(90));
}

#[test]
fn rejected_command_emits_nothing() {
    let (mut logic, ui) = make_logic(MockPwm::new());

    assert!(!logic.handle_command(AngleCommand::SetAngle { angle: 200 }));
    assert!(!logic.handle_command(AngleCommand::SetAngle { angle: -5 }));
    assert!(ui.events.is_empty());
    assert_eq!(logic.servo().current_angle(), Some(0));
}

#[test]
fn failed_hardware_write_emits_nothing() {
    let mut pwm = MockPwm::new();
    pwm.fail_duty = Some(614);
    let (mut logic, ui) = make_logic(pwm);

    assert!(!logic.handle_command(AngleCommand::SetAngle { angle: 90 }));
    assert!(ui.events.is_empty());
    assert_eq!(logic.servo().current_angle(), Some(0));
}

#[test]
fn repeated_angle_is_confirmed_again_with_one_write() {
    let (mut logic, ui) = make_logic(MockPwm::new());
    let writes_after_init = logic.servo().pwm().duty_writes();

    assert!(logic.handle_command(AngleCommand::SetAngle { angle: 45 }));
    assert!(logic.handle_command(AngleCommand::SetAngle { angle: 45 }));

    assert_eq!(logic.servo().pwm().duty_writes(), writes_after_init + 1);
    assert_eq!(
        ui.events.try_receive(),
        Some(StatusEvent::AngleApplied { angle: 45 })
    );
    assert_eq!(
        ui.events.try_receive(),
        Some(StatusEvent::AngleApplied { angle: 45 })
    );
}

#[test]
fn poll_times_out_without_commands() {
    let (mut logic, _ui) = make_logic(MockPwm::new());
    assert!(!logic.poll());
    assert_eq!(logic.servo().pwm().duty_writes(), 1, "only the init write");
}

#[test]
fn announce_sends_initialized_once() {
    let (mut logic, ui) = make_logic(MockPwm::new());

    logic.announce().unwrap();
    logic.announce().unwrap();

    assert_eq!(
        ui.events.try_receive(),
        Some(StatusEvent::Initialized { angle: 0, pin: 11 })
    );
    assert_eq!(ui.events.try_receive(), None);
}

#[test]
fn announce_is_silent_after_failed_init() {
    let mut pwm = MockPwm::new();
    pwm.fail_channel = true;
    let (mut logic, ui) = make_logic(pwm);

    logic.announce().unwrap();
    assert!(ui.events.is_empty());
}

#[test]
fn initialized_precedes_applied() {
    let (mut logic, ui) = make_logic(MockPwm::new());

    logic.announce().unwrap();
    logic.handle_command(AngleCommand::SetAngle { angle: 30 });

    assert!(matches!(
        ui.events.try_receive(),
        Some(StatusEvent::Initialized { .. })
    ));
    assert_eq!(
        ui.events.try_receive(),
        Some(StatusEvent::AngleApplied { angle: 30 })
    );
}

// ── GUI task ──────────────────────────────────────────────────

#[test]
fn initialized_event_updates_label_slider_and_pin() {
    let (ui_end, _logic_end) = command_channels();
    let mut ui = UiTask::new(MockWidgets::new(), ui_end, SHORT);

    ui.handle_event(StatusEvent::Initialized { angle: 0, pin: 11 });
    assert_eq!(
        ui.widgets().calls,
        vec![
            WidgetCall::ShowAngle(0),
            WidgetCall::SetSlider(0),
            WidgetCall::ShowPin(11),
        ]
    );
}

#[test]
fn applied_event_updates_label_only() {
    let (ui_end, _logic_end) = command_channels();
    let mut ui = UiTask::new(MockWidgets::new(), ui_end, SHORT);

    ui.handle_event(StatusEvent::AngleApplied { angle: 150 });
    assert_eq!(ui.widgets().calls, vec![WidgetCall::ShowAngle(150)]);
}

#[test]
fn slider_input_is_forwarded_unchecked() {
    let (ui_end, logic_end) = command_channels();
    let mut ui = UiTask::new(MockWidgets::new(), ui_end, SHORT);

    ui.widgets_mut().inputs.extend([60, 999]);
    assert!(!ui.poll());
    assert!(!ui.poll());

    assert_eq!(
        logic_end.commands.try_receive(),
        Some(AngleCommand::SetAngle { angle: 60 })
    );
    assert_eq!(
        logic_end.commands.try_receive(),
        Some(AngleCommand::SetAngle { angle: 999 })
    );
}

#[test]
fn ui_poll_handles_pending_event() {
    let (ui_end, logic_end) = command_channels();
    let mut ui = UiTask::new(MockWidgets::new(), ui_end, SHORT);

    logic_end
        .events
        .send(StatusEvent::AngleApplied { angle: 20 })
        .unwrap();
    assert!(ui.poll());
    assert_eq!(ui.widgets().calls, vec![WidgetCall::ShowAngle(20)]);
}

// ── Bootstrap ─────────────────────────────────────────────────

#[test]
fn bootstrap_runs_full_round_trip() {
    let widgets = SharedWidgets::new();
    let handles = bootstrap::start(&SystemConfig::default(), MockPwm::new(), widgets.clone())
        .expect("bootstrap");
    assert!(handles.servo.ok);
    assert_eq!(handles.servo.control_pin, 11);

    wait_for(&widgets, WidgetCall::ShowPin(11));
    assert_eq!(
        widgets.calls()[..3],
        [
            WidgetCall::ShowAngle(0),
            WidgetCall::SetSlider(0),
            WidgetCall::ShowPin(11),
        ]
    );

    widgets.push_input(90);
    wait_for(&widgets, WidgetCall::ShowAngle(90));
}

#[test]
fn bootstrap_rejects_invalid_config() {
    let mut config = SystemConfig::default();
    config.servo.max_degree = 0;

    assert!(bootstrap::start(&config, MockPwm::new(), MockWidgets::new()).is_err());
}

#[test]
fn bootstrap_continues_when_servo_fails() {
    let mut pwm = MockPwm::new();
    pwm.fail_timer = true;
    let widgets = SharedWidgets::new();

    let handles = bootstrap::start(&SystemConfig::default(), pwm, widgets.clone())
        .expect("tasks still start");
    assert!(!handles.servo.ok);

    thread::sleep(Duration::from_millis(50));
    assert!(
        widgets.calls().is_empty(),
        "no Initialized without a working servo"
    );
}
