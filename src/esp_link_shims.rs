//! Runtime symbol providers for the queue wait path.
//!
//! `embassy-sync` channels take a `critical-section` lock, and the
//! receive timeout in [`crate::channels`] runs on an `async-io-mini`
//! timer, which reads and schedules through the `embassy-time` driver
//! symbols. On ESP-IDF these are backed by a std mutex and `esp_timer`;
//! on the host `embassy-time`'s `std` driver supplies them.

#[cfg(not(target_os = "espidf"))]
use embassy_time as _;

#[cfg(target_os = "espidf")]
use core::cell::{Cell, RefCell};
#[cfg(target_os = "espidf")]
use core::time::Duration;
#[cfg(target_os = "espidf")]
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(target_os = "espidf")]
static QUEUE_LOCK: Mutex<()> = Mutex::new(());

#[cfg(target_os = "espidf")]
thread_local! {
    static LOCK_DEPTH: Cell<u8> = const { Cell::new(0) };
    static LOCK_GUARD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

/// `critical-section` 1.x acquire. Re-entrant per task.
#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    LOCK_DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            let guard = QUEUE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
            LOCK_GUARD.with(|slot| *slot.borrow_mut() = Some(guard));
        }
        let next = d.saturating_add(1);
        depth.set(next);
        next
    })
}

/// `critical-section` 1.x release.
#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    LOCK_DEPTH.with(|depth| {
        let d = depth.get();
        if d == 0 {
            return;
        }
        depth.set(d - 1);
        if d == 1 {
            LOCK_GUARD.with(|slot| *slot.borrow_mut() = None);
        }
    })
}

/// Monotonic time in microseconds (1 MHz tick, `esp_timer`).
#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_now() -> u64 {
    // SAFETY: esp_timer is started by the IDF before app_main.
    unsafe { esp_idf_svc::sys::esp_timer_get_time() as u64 }
}

/// Wake `waker` once `at` has passed.
#[cfg(target_os = "espidf")]
#[unsafe(no_mangle)]
pub extern "C" fn _embassy_time_schedule_wake(at: u64, waker: *mut core::ffi::c_void) {
    if waker.is_null() {
        return;
    }

    // SAFETY: embassy-time hands over a valid `&Waker` for the duration of
    // this call; it is cloned before returning.
    let waker = unsafe { (&*(waker as *const core::task::Waker)).clone() };
    let fallback = waker.clone();
    let spawned = std::thread::Builder::new()
        .name("queue_timer".into())
        .stack_size(3 * 1024)
        .spawn(move || {
            let now = _embassy_time_now();
            if at > now {
                std::thread::sleep(Duration::from_micros(at - now));
            }
            waker.wake();
        });
    if let Err(e) = spawned {
        // Wake now so the waiter re-polls instead of hanging.
        log::error!("queue timer spawn failed: {}", e);
        fallback.wake();
    }
}
