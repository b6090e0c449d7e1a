// SPDX-License-Identifier: MIT

//! Debug USART output.
//!
//! TX-only wrapper used to print distance readings and node status to an
//! attached debug terminal.
//!
//! Note: When using `writeln!`, be sure to include `\r` (CR) in the format
//! string to ensure correct line endings on the terminal.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct DebugUsart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> DebugUsart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    pub fn write_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
    }

    /// Write string and CRLF terminator.
    #[inline]
    pub fn println(&mut self, s: &str) {
        self.write_str(s);
        self.write_str("\r\n");
    }

    /// Print an unsigned value in decimal, e.g. a centimeter reading.
    pub fn print_u16(&mut self, mut n: u16) {
        let mut buf = [0u8; 5];
        let mut i = buf.len();
        if n == 0 {
            self.write_byte(b'0');
            return;
        }
        while n > 0 {
            i -= 1;
            buf[i] = b'0' + (n % 10) as u8;
            n /= 10;
        }
        for &b in &buf[i..] {
            self.write_byte(b);
        }
    }

    /// Block until the hardware TX FIFO is drained.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

// `core::fmt::Write` so `write!` / `writeln!` work on the debug channel.
impl<U: Instance> fmt::Write for DebugUsart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        DebugUsart::write_str(self, s);
        Ok(())
    }
}
