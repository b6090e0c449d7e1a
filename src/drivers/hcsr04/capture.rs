//! Echo pulse capture state machine.
//!
//! One ranging cycle walks the state machine forward: the trigger pulse arms
//! it, the echo line's rising edge records the first timestamp, the falling
//! edge records the second, and the cycle is complete. Edges seen in any
//! other state are spurious and discarded.
//!
//! The interrupt context only ever calls [`EchoCapture::record_edge`]; the
//! foreground only arms and disarms. That keeps each field single-writer, so
//! no state here needs more protection than the critical section the timer
//! wrapper already takes around access.

/// Phase of the current ranging cycle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CaptureStep {
    /// Idle; no cycle in flight. Edges are discarded.
    AwaitingTrigger,
    /// Trigger fired, waiting for the echo line to go high.
    AwaitingRising,
    /// Rising edge captured, waiting for the echo line to drop.
    AwaitingFalling,
    /// Both timestamps recorded. Edges are discarded until the next cycle.
    Complete,
}

/// The two edge timestamps of a completed echo pulse, in timer ticks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EchoPulse {
    pub rising: u16,
    pub falling: u16,
}

/// Capture state shared between the edge-capture interrupt and the polling
/// loop.
///
/// Timestamps are written once per cycle, in order, and are only meaningful
/// once [`step`](EchoCapture::step) reports [`CaptureStep::Complete`].
pub struct EchoCapture {
    step: CaptureStep,
    rising: u16,
    falling: u16,
}

impl EchoCapture {
    /// A fresh, disarmed capture. `const` so it can back a `static` shared
    /// with an interrupt handler.
    pub const fn new() -> Self {
        Self {
            step: CaptureStep::AwaitingTrigger,
            rising: 0,
            falling: 0,
        }
    }

    /// Current phase of the cycle.
    #[inline]
    pub fn step(&self) -> CaptureStep {
        self.step
    }

    /// Start a new cycle: discard the previous timestamps and wait for the
    /// rising edge. Valid from any state.
    pub fn arm(&mut self) {
        self.step = CaptureStep::AwaitingRising;
        self.rising = 0;
        self.falling = 0;
    }

    /// Abandon the in-flight cycle and return to idle. Valid from any state.
    pub fn disarm(&mut self) {
        self.step = CaptureStep::AwaitingTrigger;
    }

    /// Feed one hardware-captured edge timestamp.
    ///
    /// Called from the capture interrupt. The first edge of an armed cycle is
    /// the echo's rising edge, the second its falling edge; anything else is
    /// a spurious or duplicate interrupt and is ignored without touching the
    /// recorded timestamps.
    pub fn record_edge(&mut self, ticks: u16) {
        match self.step {
            CaptureStep::AwaitingRising => {
                self.rising = ticks;
                self.step = CaptureStep::AwaitingFalling;
            }
            CaptureStep::AwaitingFalling => {
                self.falling = ticks;
                self.step = CaptureStep::Complete;
            }
            CaptureStep::AwaitingTrigger | CaptureStep::Complete => {}
        }
    }

    /// The completed pulse, or `None` while the cycle is still in flight.
    pub fn pulse(&self) -> Option<EchoPulse> {
        match self.step {
            CaptureStep::Complete => Some(EchoPulse {
                rising: self.rising,
                falling: self.falling,
            }),
            _ => None,
        }
    }
}

impl Default for EchoCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_walks_forward_and_keeps_edge_order() {
        let mut cap = EchoCapture::new();
        assert_eq!(cap.step(), CaptureStep::AwaitingTrigger);

        cap.arm();
        assert_eq!(cap.step(), CaptureStep::AwaitingRising);
        assert_eq!(cap.pulse(), None);

        cap.record_edge(1000);
        assert_eq!(cap.step(), CaptureStep::AwaitingFalling);
        assert_eq!(cap.pulse(), None);

        cap.record_edge(1058);
        assert_eq!(cap.step(), CaptureStep::Complete);
        assert_eq!(
            cap.pulse(),
            Some(EchoPulse {
                rising: 1000,
                falling: 1058,
            })
        );
    }

    #[test]
    fn edges_while_idle_are_discarded() {
        let mut cap = EchoCapture::new();
        cap.record_edge(123);
        assert_eq!(cap.step(), CaptureStep::AwaitingTrigger);
        assert_eq!(cap.pulse(), None);
    }

    #[test]
    fn extra_edges_after_completion_do_not_touch_timestamps() {
        let mut cap = EchoCapture::new();
        cap.arm();
        cap.record_edge(10);
        cap.record_edge(20);
        cap.record_edge(999);
        cap.record_edge(1000);
        assert_eq!(
            cap.pulse(),
            Some(EchoPulse {
                rising: 10,
                falling: 20,
            })
        );
    }

    #[test]
    fn arm_resets_a_cycle_in_flight() {
        let mut cap = EchoCapture::new();
        cap.arm();
        cap.record_edge(500);
        assert_eq!(cap.step(), CaptureStep::AwaitingFalling);

        cap.arm();
        assert_eq!(cap.step(), CaptureStep::AwaitingRising);
        cap.record_edge(7);
        cap.record_edge(9);
        assert_eq!(
            cap.pulse(),
            Some(EchoPulse {
                rising: 7,
                falling: 9,
            })
        );
    }

    #[test]
    fn disarm_returns_to_idle_from_any_state() {
        let mut cap = EchoCapture::new();
        cap.disarm();
        assert_eq!(cap.step(), CaptureStep::AwaitingTrigger);

        cap.arm();
        cap.disarm();
        assert_eq!(cap.step(), CaptureStep::AwaitingTrigger);

        cap.arm();
        cap.record_edge(1);
        cap.record_edge(2);
        cap.disarm();
        assert_eq!(cap.step(), CaptureStep::AwaitingTrigger);
        assert_eq!(cap.pulse(), None);
    }
}
