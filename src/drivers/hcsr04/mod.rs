//! HC-SR04 ultrasonic rangefinder driver.
//!
//! The sensor reports distance as the width of a pulse on its echo line: the
//! line goes high when the ultrasonic burst leaves and drops when the
//! reflection returns. A hardware timer captures the counter value at both
//! edges, so the measured width is exact regardless of interrupt latency.
//!
//! One measurement is a trigger pulse, two edge captures, and a conversion:
//!
//! 1. [`HcSr04::begin_cycle`] restarts the capture timer, arms the state
//!    machine, and fires the trigger pulse.
//! 2. The capture interrupt feeds edge timestamps into [`EchoCapture`].
//! 3. The foreground polls [`HcSr04::poll_once`] until the cycle completes.
//!
//! The polling loop and the echo interrupt can end up phase-locked: the
//! loop's check interval races the echo's arrival and keeps missing the
//! capture window. Each unsuccessful poll therefore sleeps a fixed
//! phase-shift delay chosen to drift the loop relative to the echo timing.
//! If [`MAX_PHASE_ERROR`] polls go by without a completed cycle, the driver
//! assumes the cycle is stuck, rebuilds the timer from scratch, and fires a
//! fresh trigger. A missing echo is an expected condition (target out of
//! range, absorbing surfaces), so none of this surfaces as an error.

pub mod capture;
pub mod distance;

pub use capture::{CaptureStep, EchoCapture, EchoPulse};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

/// Consecutive unsuccessful polls tolerated before a hard reset.
pub const MAX_PHASE_ERROR: u8 = 0x0A;

/// Phase-shift sleep between polls, in microseconds. Deliberately
/// incommensurate with the echo round-trip timing.
pub const PHASE_SHIFT_DELAY_US: u32 = 0x96;

/// Minimum hold time of the trigger pulse, in microseconds.
pub const TRIGGER_HOLD_US: u32 = 0x05;

/// Free-running capture timer owned by the ranging engine.
///
/// The hardware behind this captures the counter value at every electrical
/// transition of the echo line and hands it to the shared [`EchoCapture`]
/// from interrupt context. Implementations guard `with_capture` with a
/// critical section so the foreground never observes a torn update.
pub trait CaptureTimer {
    /// Reconfigure and restart the free-running counter from zero.
    fn restart(&mut self);

    /// Zero the counter without stopping it. Bounds the elapsed-tick
    /// arithmetic between retry cycles.
    fn clear(&mut self);

    /// Unmask the edge-capture interrupt.
    fn listen(&mut self);

    /// Mask the edge-capture interrupt.
    fn unlisten(&mut self);

    /// Run `f` against the shared capture state with edge notifications
    /// held off.
    fn with_capture<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut EchoCapture) -> R;
}

/// What a single polling step did.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PollOutcome {
    /// No completed cycle yet; slept the phase-shift delay and advanced the
    /// retry counter.
    Waiting,
    /// The retry bound was hit; the timer and state machine were rebuilt and
    /// a fresh trigger fired.
    HardReset,
    /// Both edges captured. Holds the distance in centimeters.
    Complete(u16),
}

/// HC-SR04 driver: trigger output, capture timer, and retry policy.
///
/// `TIMER` owns the hardware capture path, `TRIG` drives the sensor's
/// trigger input, and `DELAY` provides the calibrated waits (trigger hold
/// and phase shift) independent of the capture timer.
pub struct HcSr04<TIMER, TRIG, DELAY> {
    timer: TIMER,
    trigger: TRIG,
    delay: DELAY,
    bad_phase: u8,
}

impl<TIMER, TRIG, DELAY> HcSr04<TIMER, TRIG, DELAY>
where
    TIMER: CaptureTimer,
    TRIG: OutputPin,
    DELAY: DelayNs,
{
    /// Create the driver. The trigger line is driven low so the first cycle
    /// starts from a known pin state.
    pub fn new(timer: TIMER, mut trigger: TRIG, delay: DELAY) -> Self {
        trigger.set_low().ok();
        Self {
            timer,
            trigger,
            delay,
            bad_phase: 0,
        }
    }

    /// Measure the distance to the nearest obstacle, in centimeters.
    ///
    /// Blocks until a cycle completes. Missed echoes are retried with the
    /// phase-shift policy and, past the retry bound, a hard reset; a
    /// permanently silent transducer keeps this spinning, so callers that
    /// need a wall-clock bound should drive [`poll_once`](Self::poll_once)
    /// themselves.
    pub fn capture_distance(&mut self) -> u16 {
        self.begin_cycle();
        loop {
            if let PollOutcome::Complete(cm) = self.poll_once() {
                return cm;
            }
        }
    }

    /// Start a fresh ranging cycle: reconfigure the timer inside an
    /// interrupt-masked window, arm the capture state machine, and fire the
    /// trigger pulse.
    pub fn begin_cycle(&mut self) {
        self.timer.unlisten();
        self.timer.restart();
        self.timer.listen();
        self.timer.with_capture(|cap| cap.arm());
        self.bad_phase = 0;
        self.fire_trigger();
    }

    /// Drive the trigger line high for the sensor's minimum pulse width,
    /// then low. Blocking.
    pub fn fire_trigger(&mut self) {
        self.trigger.set_high().ok();
        self.delay.delay_us(TRIGGER_HOLD_US);
        self.trigger.set_low().ok();
    }

    /// One iteration of the completion-wait loop.
    ///
    /// Exactly one of three things happens: the completed pulse is consumed
    /// and converted, the retry bound forces a hard reset, or the
    /// phase-shift delay elapses and the retry counter advances.
    pub fn poll_once(&mut self) -> PollOutcome {
        if let Some(pulse) = self.timer.with_capture(|cap| cap.pulse()) {
            self.finish_cycle();
            return PollOutcome::Complete(distance::pulse_distance_cm(pulse));
        }

        if self.bad_phase == MAX_PHASE_ERROR {
            self.hard_reset();
            return PollOutcome::HardReset;
        }

        self.delay.delay_us(PHASE_SHIFT_DELAY_US);
        self.bad_phase += 1;
        PollOutcome::Waiting
    }

    /// Consecutive unsuccessful polls since the last (re)start.
    #[inline]
    pub fn bad_phase(&self) -> u8 {
        self.bad_phase
    }

    /// Mutable access to the capture timer, e.g. to release or inspect it.
    pub fn inner_timer(&mut self) -> &mut TIMER {
        &mut self.timer
    }

    /// Release the hardware.
    pub fn free(self) -> (TIMER, TRIG, DELAY) {
        (self.timer, self.trigger, self.delay)
    }

    /// Mask captures and zero the counter once a cycle has completed.
    fn finish_cycle(&mut self) {
        self.timer.unlisten();
        self.timer.clear();
    }

    /// Throw away the stuck cycle: idle the state machine, zero and
    /// reconfigure the timer, and start over with a fresh trigger pulse.
    fn hard_reset(&mut self) {
        self.timer.with_capture(|cap| cap.disarm());
        self.timer.clear();
        self.begin_cycle();
    }
}
