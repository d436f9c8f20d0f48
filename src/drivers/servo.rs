//! Hobby servo driver (50 Hz position PWM).
//!
//! Maps a commanded angle to a pulse width between `min_pulse_us` (0°)
//! and `max_pulse_us` (`max_degree`), quantises it to the LEDC duty
//! resolution and writes it through a [`PwmPort`].
//!
//! The driver owns the last applied angle. Re-commanding that angle is a
//! no-op: the LEDC is neither written nor re-latched, so repeated slider
//! events never retrigger a duty update.
//!
//! ## Ownership
//!
//! Only the logic task holds a `ServoDriver`; it is moved into the task
//! at spawn, so the angle state has a single writer without any lock.

use embedded_hal::delay::DelayNs;
use log::{debug, error, info, warn};

use crate::app::ports::PwmPort;
use crate::config::ServoConfig;
use crate::error::ServoError;

/// Outcome of [`ServoDriver::initialize`].
///
/// Dependent tasks should only be told about the servo when `ok` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoInit {
    pub ok: bool,
    pub initial_angle: i32,
    pub control_pin: i32,
}

/// Pulse width in microseconds for `angle`, clamped to the servo travel.
///
/// Integer interpolation, truncating toward zero.
pub fn pulse_width_us(config: &ServoConfig, angle: i32) -> u32 {
    let angle = angle.clamp(0, config.max_degree) as u32;
    config.min_pulse_us
        + (config.max_pulse_us - config.min_pulse_us) * angle / config.max_degree as u32
}

/// LEDC duty value for `angle`, never above the timer's maximum duty.
pub fn duty_for_angle(config: &ServoConfig, angle: i32) -> u32 {
    let max_duty = config.max_duty();
    let duty = pulse_width_us(config, angle) * max_duty / config.period_us();
    duty.min(max_duty)
}

pub struct ServoDriver<P: PwmPort> {
    pwm: P,
    config: ServoConfig,
    current_angle: Option<i32>,
}

impl<P: PwmPort> ServoDriver<P> {
    pub fn new(pwm: P, config: ServoConfig) -> Self {
        Self {
            pwm,
            config,
            current_angle: None,
        }
    }

    /// Configure the LEDC timer and channel, then move to the initial angle.
    ///
    /// Never panics: a rejected timer or channel config is logged and
    /// reported as `ok == false`.
    pub fn initialize(&mut self) -> ServoInit {
        let mut result = ServoInit {
            ok: false,
            initial_angle: self.config.initial_angle,
            control_pin: self.config.gpio,
        };

        if let Err(e) = self.pwm.configure_timer(
            self.config.ledc_timer,
            self.config.frequency_hz,
            self.config.resolution_bits,
        ) {
            error!("Servo: {}", ServoError::TimerConfig(e));
            return result;
        }

        if let Err(e) = self.pwm.configure_channel(
            self.config.ledc_channel,
            self.config.ledc_timer,
            self.config.gpio,
            0,
        ) {
            error!("Servo: {}", ServoError::ChannelConfig(e));
            return result;
        }

        if let Err(e) = self.set_angle(self.config.initial_angle) {
            warn!(
                "Servo: initial angle {} not applied ({})",
                self.config.initial_angle, e
            );
        }

        info!("Servo: initialized on GPIO{}", self.config.gpio);
        result.ok = true;
        result
    }

    /// Move to `angle` degrees.
    ///
    /// Rejects angles outside `0..=max_degree` without touching hardware.
    /// On a failed duty write or commit the last applied angle is kept.
    pub fn set_angle(&mut self, angle: i32) -> Result<(), ServoError> {
        if !(0..=self.config.max_degree).contains(&angle) {
            error!(
                "Servo: invalid angle {}, must be within 0..={}",
                angle, self.config.max_degree
            );
            return Err(ServoError::InvalidAngle(angle));
        }

        if self.current_angle == Some(angle) {
            debug!("Servo: already at {}°, skipping write", angle);
            return Ok(());
        }

        let channel = self.config.ledc_channel;
        let duty = duty_for_angle(&self.config, angle);

        self.pwm.set_duty(channel, duty).map_err(|e| {
            let e = ServoError::DutyWrite(e);
            error!("Servo: {}", e);
            e
        })?;
        self.pwm.commit_duty(channel).map_err(|e| {
            let e = ServoError::DutyCommit(e);
            error!("Servo: {}", e);
            e
        })?;

        self.current_angle = Some(angle);
        info!("Servo: angle set to {}° (duty {})", angle, duty);
        Ok(())
    }

    /// Stop the PWM output and forget the last applied angle.
    pub fn deinitialize(&mut self) -> Result<(), ServoError> {
        self.pwm.stop(self.config.ledc_channel).map_err(|e| {
            let e = ServoError::Stop(e);
            error!("Servo: {}", e);
            e
        })?;
        self.current_angle = None;
        info!("Servo: deinitialized");
        Ok(())
    }

    /// Last successfully applied angle, `None` before the first write and
    /// after [`deinitialize`](Self::deinitialize).
    pub fn current_angle(&self) -> Option<i32> {
        self.current_angle
    }

    /// Step from `start` to `end` (inclusive of `start`, and of `end` when
    /// the step lands on it), pausing `delay_ms` between steps.
    ///
    /// Direction follows `start`/`end`; `step` is a magnitude. Stops at the
    /// first failed step, leaving the servo at the last applied angle.
    pub fn sweep<D: DelayNs>(
        &mut self,
        start: i32,
        end: i32,
        step: i32,
        delay_ms: i32,
        delay: &mut D,
    ) -> Result<(), ServoError> {
        let travel = 0..=self.config.max_degree;
        if !travel.contains(&start) || !travel.contains(&end) || step <= 0 || delay_ms < 0 {
            error!(
                "Servo: invalid sweep (start={}, end={}, step={}, delay={}ms)",
                start, end, step, delay_ms
            );
            return Err(ServoError::InvalidSweep);
        }

        let step = if start > end { -step } else { step };
        let mut angle = start;
        loop {
            self.set_angle(angle)?;

            let past_end = match angle.checked_add(step) {
                Some(next) if step > 0 => next > end,
                Some(next) => next < end,
                None => true,
            };
            if past_end {
                break;
            }
            if delay_ms > 0 {
                delay.delay_ms(delay_ms as u32);
            }
            angle += step;
        }

        info!("Servo: sweep {}° -> {}° complete", start, end);
        Ok(())
    }

    pub fn config(&self) -> &ServoConfig {
        &self.config
    }

    /// The PWM backend, for inspection.
    pub fn pwm(&self) -> &P {
        &self.pwm
    }
}
