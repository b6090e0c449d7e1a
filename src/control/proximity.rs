// SPDX-License-Identifier: MIT

//! Proximity threshold monitor.
//!
//! Application-level policy on top of the ranging driver: each distance
//! reading is compared against a centimeter threshold and the indicator LED
//! is driven accordingly. Typical usage pattern:
//!
//! ```ignore
//! loop {
//!     let cm = sensor.capture_distance();
//!     alert.observe(cm);
//! }
//! ```

use embedded_hal::digital::OutputPin;

use crate::hw::Led;

/// Obstacles nearer than this many centimeters light the indicator.
pub const DEFAULT_THRESHOLD_CM: u16 = 100;

/// Threshold comparator driving the proximity indicator LED.
pub struct ProximityAlert<PIN: OutputPin> {
    led: Led<PIN>,
    threshold_cm: u16,
}

impl<PIN: OutputPin> ProximityAlert<PIN> {
    /// Create a monitor with [`DEFAULT_THRESHOLD_CM`].
    pub fn new(led: Led<PIN>) -> Self {
        Self::with_threshold(led, DEFAULT_THRESHOLD_CM)
    }

    pub fn with_threshold(led: Led<PIN>, threshold_cm: u16) -> Self {
        Self { led, threshold_cm }
    }

    /// Feed one distance reading. Lights the indicator and returns `true`
    /// when an obstacle is inside the threshold.
    pub fn observe(&mut self, distance_cm: u16) -> bool {
        let near = distance_cm < self.threshold_cm;
        self.led.set(near);
        near
    }

    #[inline]
    pub fn threshold_cm(&self) -> u16 {
        self.threshold_cm
    }

    pub fn set_threshold_cm(&mut self, cm: u16) {
        self.threshold_cm = cm;
    }

    /// Release the indicator LED.
    pub fn free(self) -> Led<PIN> {
        self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn near_obstacle_lights_the_indicator() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),  // LED construction
            PinTransaction::set(PinState::High), // 42 cm -> near
            PinTransaction::set(PinState::Low),  // 150 cm -> clear
        ]);
        let mut handle = pin.clone();

        let mut alert = ProximityAlert::new(Led::active_high(pin));
        assert!(alert.observe(42));
        assert!(!alert.observe(150));

        handle.done();
    }

    #[test]
    fn threshold_boundary_is_exclusive() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::Low),  // exactly at threshold -> clear
            PinTransaction::set(PinState::High), // one below -> near
        ]);
        let mut handle = pin.clone();

        let mut alert = ProximityAlert::with_threshold(Led::active_high(pin), 100);
        assert!(!alert.observe(100));
        assert!(alert.observe(99));

        handle.done();
    }
}
