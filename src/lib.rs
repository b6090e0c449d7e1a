// SPDX-License-Identifier: MIT

//! # Obstacle-Sensor Node Firmware
//!
//! Support crate for a small CAN-attached obstacle-avoidance sensor node
//! built around an HC-SR04 ultrasonic rangefinder, targeting an STM32F777
//! MCU.
//!
//! ## Crate Structure
//!
//! | Module | Purpose |
//! | ------ | -------- |
//! | [`hw`] | MCU-level wrappers: board pins, capture timer, USART, CAN, LED |
//! | [`drivers`] | Device-level drivers (HC-SR04 ranging engine) |
//! | [`control`] | Application logic (proximity threshold monitor) |
//! | [`protocol`] | CAN report format for publishing readings |
//!
//! ## Getting Started
//!
//! The application owns bring-up (clocks, `#[entry]`, interrupt
//! registration) and wires the pieces together:
//!
//! ```ignore
//! static ECHO: Mutex<RefCell<EchoCapture>> = Mutex::new(RefCell::new(EchoCapture::new()));
//!
//! let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
//! let timer = EchoTimer::tim3(dp.TIM3, &ECHO);
//! let delay = cp.SYST.delay(&clocks);
//!
//! let mut sensor = HcSr04::new(timer, pins.ranging.trigger, delay);
//! let mut alert = ProximityAlert::new(Led::active_high(pins.led.red));
//!
//! #[interrupt]
//! fn TIM3() {
//!     echo_timer::on_capture(&ECHO);
//! }
//!
//! loop {
//!     let cm = sensor.capture_distance();
//!     alert.observe(cm);
//!     can.transmit_report(&DistanceReport::new(cm)).ok();
//! }
//! ```
//!
//! Build docs:
//!
//! ```bash
//! cargo doc --no-deps --open
//! ```

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod control;
pub mod drivers;
pub mod hw;
pub mod protocol;
