//! Echo pulse capture via TIM3 input capture.
//!
//! TIM3 runs as a free-running 16-bit counter with channel 1 in input
//! capture mode on both edges. Every transition of the echo line latches the
//! counter into CCR1 in hardware, so the timestamps handed to the capture
//! state machine are exact regardless of how late the interrupt runs.
//!
//! The capture state lives in a `static` shared with the `TIM3` interrupt
//! handler; the handler body is [`on_capture`]. Wiring, in the application:
//!
//! ```ignore
//! use core::cell::RefCell;
//! use cortex_m::interrupt::Mutex;
//! use sonarnode::drivers::hcsr04::EchoCapture;
//! use sonarnode::hw::echo_timer::{self, EchoTimer};
//!
//! static ECHO: Mutex<RefCell<EchoCapture>> = Mutex::new(RefCell::new(EchoCapture::new()));
//!
//! let timer = EchoTimer::tim3(dp.TIM3, &ECHO);
//!
//! #[interrupt]
//! fn TIM3() {
//!     echo_timer::on_capture(&ECHO);
//! }
//! ```

use core::cell::RefCell;

use cortex_m::interrupt::{self, Mutex};
use cortex_m::peripheral::NVIC;
use stm32f7xx_hal::pac;

use crate::drivers::hcsr04::{CaptureTimer, EchoCapture};

/// Counter prescaler: APB1 timer clock divided by 8, one tick per count.
const PRESCALER: u16 = 8 - 1;

/// TIM3 configured for echo pulse capture, plus the capture state it shares
/// with the interrupt handler.
pub struct EchoTimer {
    tim: pac::TIM3,
    shared: &'static Mutex<RefCell<EchoCapture>>,
}

impl EchoTimer {
    /// Take ownership of TIM3 and configure it for dual-edge capture.
    ///
    /// Enables the TIM3 bus clock and its NVIC line. The capture interrupt
    /// itself stays masked until [`listen`](CaptureTimer::listen).
    pub fn tim3(tim: pac::TIM3, shared: &'static Mutex<RefCell<EchoCapture>>) -> Self {
        let rcc = unsafe { &*pac::RCC::ptr() };
        rcc.apb1enr.modify(|_, w| w.tim3en().set_bit());

        let mut timer = Self { tim, shared };
        timer.restart();

        unsafe { NVIC::unmask(pac::Interrupt::TIM3) };
        timer
    }

    /// Release the timer peripheral.
    pub fn free(self) -> pac::TIM3 {
        self.tim
    }
}

impl CaptureTimer for EchoTimer {
    fn restart(&mut self) {
        let tim = &self.tim;

        // Stop while configuring
        tim.cr1.modify(|_, w| w.cen().clear_bit());

        // Full 16-bit range so wrapping tick arithmetic matches the counter
        tim.psc.write(|w| w.psc().bits(PRESCALER));
        tim.arr.write(|w| unsafe { w.bits(0xFFFF) });

        // CH1 captures TI1 (the echo input) on both edges
        tim.ccmr1_input().modify(|_, w| w.cc1s().ti1());
        tim.ccer.modify(|_, w| {
            w.cc1p().set_bit().cc1np().set_bit().cc1e().set_bit()
        });

        // Drop any stale capture flag, zero, and run
        tim.sr.modify(|_, w| w.cc1if().clear_bit());
        tim.cnt.write(|w| unsafe { w.bits(0) });
        tim.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn clear(&mut self) {
        self.tim.cnt.write(|w| unsafe { w.bits(0) });
    }

    fn listen(&mut self) {
        self.tim.sr.modify(|_, w| w.cc1if().clear_bit());
        self.tim.dier.modify(|_, w| w.cc1ie().set_bit());
    }

    fn unlisten(&mut self) {
        self.tim.dier.modify(|_, w| w.cc1ie().clear_bit());
    }

    fn with_capture<R, F>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut EchoCapture) -> R,
    {
        interrupt::free(|cs| f(&mut *self.shared.borrow(cs).borrow_mut()))
    }
}

/// Body of the `TIM3` interrupt handler.
///
/// Reads the captured counter value and advances the shared state machine.
/// Reading CCR1 also clears the capture flag, so a spurious wakeup with no
/// capture pending leaves everything untouched.
pub fn on_capture(shared: &Mutex<RefCell<EchoCapture>>) {
    let tim = unsafe { &*pac::TIM3::ptr() };
    if tim.sr.read().cc1if().bit_is_set() {
        let ticks = tim.ccr1().read().bits() as u16;
        interrupt::free(|cs| shared.borrow(cs).borrow_mut().record_edge(ticks));
    }
}
