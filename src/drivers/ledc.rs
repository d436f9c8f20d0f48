//! LEDC PWM peripheral backend.
//!
//! Implements [`PwmPort`] on top of the ESP-IDF LEDC driver (low-speed
//! mode, automatic clock source).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: raw `ledc_*` sys calls, every non-`ESP_OK` code surfaced
//! as a [`PwmError`].
//! On host/test: an in-memory register model that enforces the same call
//! ordering rules as the real driver (timer before channel, duty within
//! resolution, commit to make a duty visible).

use crate::app::ports::PwmPort;
use crate::error::PwmError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// `ESP_ERR_INVALID_ARG`
pub const ERR_INVALID_ARG: i32 = 0x102;
/// `ESP_ERR_INVALID_STATE`
pub const ERR_INVALID_STATE: i32 = 0x103;

/// LEDC timers available in low-speed mode.
pub const LEDC_TIMER_COUNT: usize = 4;
/// LEDC channels available in low-speed mode (ESP32-S3).
pub const LEDC_CHANNEL_COUNT: usize = 8;

// ── ESP-IDF backend ───────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct LedcPwm;

#[cfg(target_os = "espidf")]
impl LedcPwm {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl Default for LedcPwm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn check(ret: esp_err_t) -> Result<(), PwmError> {
    if ret == ESP_OK as esp_err_t {
        Ok(())
    } else {
        Err(PwmError(ret))
    }
}

#[cfg(target_os = "espidf")]
impl PwmPort for LedcPwm {
    fn configure_timer(
        &mut self,
        timer: u32,
        frequency_hz: u32,
        resolution_bits: u32,
    ) -> Result<(), PwmError> {
        let cfg = ledc_timer_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            timer_num: timer,
            // ledc_timer_bit_t values equal their bit count.
            duty_resolution: resolution_bits,
            freq_hz: frequency_hz,
            clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
            ..Default::default()
        };
        // SAFETY: cfg outlives the call; the driver copies it.
        check(unsafe { ledc_timer_config(&cfg) })
    }

    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        gpio: i32,
        initial_duty: u32,
    ) -> Result<(), PwmError> {
        let cfg = ledc_channel_config_t {
            speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
            channel,
            timer_sel: timer,
            intr_type: ledc_intr_type_t_LEDC_INTR_DISABLE,
            gpio_num: gpio,
            duty: initial_duty,
            hpoint: 0,
            ..Default::default()
        };
        // SAFETY: cfg outlives the call; the driver copies it.
        check(unsafe { ledc_channel_config(&cfg) })
    }

    fn set_duty(&mut self, channel: u32, duty: u32) -> Result<(), PwmError> {
        // SAFETY: only the logic task owns this backend, so duty register
        // writes for the channel are never interleaved.
        check(unsafe { ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, duty) })
    }

    fn commit_duty(&mut self, channel: u32) -> Result<(), PwmError> {
        // SAFETY: see set_duty.
        check(unsafe { ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel) })
    }

    fn stop(&mut self, channel: u32) -> Result<(), PwmError> {
        // SAFETY: see set_duty.
        check(unsafe { ledc_stop(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, 0) })
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SimTimer {
    frequency_hz: u32,
    resolution_bits: u32,
}

/// Observable state of one simulated LEDC channel.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimChannel {
    pub timer: u32,
    pub gpio: i32,
    /// Written by `set_duty`, not yet visible on the pin.
    pub staged_duty: u32,
    /// Duty currently driven on the pin.
    pub duty: u32,
    pub running: bool,
}

#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct LedcPwm {
    timers: [Option<SimTimer>; LEDC_TIMER_COUNT],
    channels: [Option<SimChannel>; LEDC_CHANNEL_COUNT],
}

#[cfg(not(target_os = "espidf"))]
impl LedcPwm {
    pub fn new() -> Self {
        log::info!("ledc(sim): in-memory LEDC model");
        Self::default()
    }

    /// Snapshot of a configured channel.
    pub fn channel(&self, channel: u32) -> Option<SimChannel> {
        self.channels.get(channel as usize).copied().flatten()
    }

    /// Frequency a timer was configured for.
    pub fn timer_frequency(&self, timer: u32) -> Option<u32> {
        self.timers
            .get(timer as usize)
            .copied()
            .flatten()
            .map(|t| t.frequency_hz)
    }

    fn channel_mut(&mut self, channel: u32) -> Result<&mut SimChannel, PwmError> {
        self.channels
            .get_mut(channel as usize)
            .ok_or(PwmError(ERR_INVALID_ARG))?
            .as_mut()
            .ok_or(PwmError(ERR_INVALID_STATE))
    }

    fn max_duty(&self, timer: u32) -> u32 {
        self.timers[timer as usize].map_or(0, |t| (1u32 << t.resolution_bits) - 1)
    }
}

#[cfg(not(target_os = "espidf"))]
impl PwmPort for LedcPwm {
    fn configure_timer(
        &mut self,
        timer: u32,
        frequency_hz: u32,
        resolution_bits: u32,
    ) -> Result<(), PwmError> {
        let slot = self
            .timers
            .get_mut(timer as usize)
            .ok_or(PwmError(ERR_INVALID_ARG))?;
        if frequency_hz == 0 || !(1..=14).contains(&resolution_bits) {
            return Err(PwmError(ERR_INVALID_ARG));
        }
        *slot = Some(SimTimer {
            frequency_hz,
            resolution_bits,
        });
        Ok(())
    }

    fn configure_channel(
        &mut self,
        channel: u32,
        timer: u32,
        gpio: i32,
        initial_duty: u32,
    ) -> Result<(), PwmError> {
        if self.timers.get(timer as usize).copied().flatten().is_none() {
            return Err(PwmError(ERR_INVALID_STATE));
        }
        let slot = self
            .channels
            .get_mut(channel as usize)
            .ok_or(PwmError(ERR_INVALID_ARG))?;
        *slot = Some(SimChannel {
            timer,
            gpio,
            staged_duty: initial_duty,
            duty: initial_duty,
            running: true,
        });
        Ok(())
    }

    fn set_duty(&mut self, channel: u32, duty: u32) -> Result<(), PwmError> {
        let timer = self.channel_mut(channel)?.timer;
        if duty > self.max_duty(timer) {
            return Err(PwmError(ERR_INVALID_ARG));
        }
        self.channel_mut(channel)?.staged_duty = duty;
        Ok(())
    }

    fn commit_duty(&mut self, channel: u32) -> Result<(), PwmError> {
        let ch = self.channel_mut(channel)?;
        ch.duty = ch.staged_duty;
        ch.running = true;
        Ok(())
    }

    fn stop(&mut self, channel: u32) -> Result<(), PwmError> {
        let ch = self.channel_mut(channel)?;
        ch.running = false;
        ch.duty = 0;
        Ok(())
    }
}
