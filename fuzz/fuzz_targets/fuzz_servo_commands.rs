//! Fuzz target: `ServoDriver` command stream
//!
//! Feeds arbitrary sequences of `set_angle` / `sweep` / `deinitialize`
//! calls to a driver backed by the in-memory LEDC model.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - The tracked angle is always `None` or within 0..=180
//! - The committed LEDC duty always equals the mapping of the tracked angle
//!
//! cargo fuzz run fuzz_servo_commands

#![no_main]

use libfuzzer_sys::fuzz_target;
use servopanel::config::ServoConfig;
use servopanel::drivers::ledc::LedcPwm;
use servopanel::drivers::servo::{ServoDriver, duty_for_angle};
use servopanel::pins::SERVO_LEDC_CHANNEL;

struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn word(chunk: &[u8]) -> i32 {
    i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
}

fuzz_target!(|data: &[u8]| {
    let mut servo = ServoDriver::new(LedcPwm::new(), ServoConfig::default());
    if !servo.initialize().ok {
        return;
    }

    // 13-byte records: opcode, then three little-endian i32 operands.
    for rec in data.chunks_exact(13) {
        let (a, b, c) = (word(&rec[1..5]), word(&rec[5..9]), word(&rec[9..13]));
        match rec[0] % 3 {
            0 => {
                let _ = servo.set_angle(a);
            }
            1 => {
                // Keep sweeps short so a run stays fast; huge steps pass through.
                let step = if c > 0 { c.max(10) } else { c };
                let _ = servo.sweep(a, b, step, 0, &mut NoDelay);
            }
            _ => {
                let _ = servo.deinitialize();
                let _ = servo.initialize();
            }
        }

        if let Some(angle) = servo.current_angle() {
            assert!((0..=180).contains(&angle), "angle {angle} escaped travel");
            let ch = servo.pwm().channel(SERVO_LEDC_CHANNEL).unwrap();
            assert_eq!(ch.duty, duty_for_angle(servo.config(), angle));
        }
    }
});
