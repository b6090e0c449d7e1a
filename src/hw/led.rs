//! Indicator LED wrapper.

use embedded_hal::digital::OutputPin;

/// A single LED with its drive polarity and last commanded state.
pub struct Led<PIN: OutputPin> {
    pin: PIN,
    on_is_high: bool,
    lit: bool,
}

impl<PIN: OutputPin> Led<PIN> {
    /// Wrap a pin whose high level lights the LED. Starts OFF.
    pub fn active_high(pin: PIN) -> Self {
        Self::with_polarity(pin, true)
    }

    /// Wrap a pin whose low level lights the LED. Starts OFF.
    pub fn active_low(pin: PIN) -> Self {
        Self::with_polarity(pin, false)
    }

    fn with_polarity(mut pin: PIN, on_is_high: bool) -> Self {
        if on_is_high {
            pin.set_low().ok();
        } else {
            pin.set_high().ok();
        }
        Self {
            pin,
            on_is_high,
            lit: false,
        }
    }

    /// Drive the LED logically on or off.
    pub fn set(&mut self, lit: bool) {
        if lit == self.on_is_high {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
        self.lit = lit;
    }

    #[inline]
    pub fn on(&mut self) {
        self.set(true);
    }

    #[inline]
    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn toggle(&mut self) {
        self.set(!self.lit);
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn free(self) -> PIN {
        self.pin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    #[test]
    fn active_high_led_tracks_logical_state() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::Low),  // construction forces OFF
            PinTransaction::set(PinState::High), // on
            PinTransaction::set(PinState::Low),  // toggle -> off
        ]);
        let mut handle = pin.clone();

        let mut led = Led::active_high(pin);
        assert!(!led.is_lit());
        led.on();
        assert!(led.is_lit());
        led.toggle();
        assert!(!led.is_lit());

        handle.done();
    }

    #[test]
    fn active_low_led_inverts_the_drive_level() {
        let pin = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut handle = pin.clone();

        let mut led = Led::active_low(pin);
        led.on();
        assert!(led.is_lit());

        handle.done();
    }
}
