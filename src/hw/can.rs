//! Controller Area Network (CAN) abstraction layer.
//!
//! The node is a CAN talker: it periodically publishes distance reports and
//! never needs to receive. `CanBus` wraps a HAL `can::Can` instance in
//! `bxcan::Can` with just the transmit surface.

use core::convert::Infallible;
use nb::block;

use bxcan::{self, Frame, TransmitStatus};
use stm32f7xx_hal::can as hal_can;

use crate::protocol::DistanceReport;

/// Wrapper around a bxcan CAN instance built from a HAL CAN peripheral.
pub struct CanBus<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    can: bxcan::Can<hal_can::Can<I>>,
}

impl<I> CanBus<I>
where
    hal_can::Can<I>: bxcan::Instance,
{
    /// Create and enable a bxcan instance from a HAL CAN peripheral.
    ///
    /// * `hal_can` – the HAL CAN wrapper
    /// * `btr` – value for the CAN_BTR register (bit timing). Get this from
    ///           the reference manual or the bxcan timing tables.
    pub fn new(hal_can: hal_can::Can<I>, btr: u32) -> Self {
        let can = bxcan::Can::builder(hal_can)
            .set_bit_timing(btr)
            .enable();

        Self { can }
    }

    /// Transmit a pre-built CAN frame, blocking until a mailbox is free.
    pub fn transmit_frame(&mut self, frame: &Frame) -> Result<TransmitStatus, Infallible> {
        block!(self.can.transmit(frame))
    }

    /// Publish a distance report.
    pub fn transmit_report(
        &mut self,
        report: &DistanceReport,
    ) -> Result<TransmitStatus, Infallible> {
        self.transmit_frame(&report.to_frame())
    }

    /// Access the underlying bxcan instance for advanced configuration.
    pub fn inner(&mut self) -> &mut bxcan::Can<hal_can::Can<I>> {
        &mut self.can
    }

    /// Consume the wrapper and get back the underlying HAL CAN instance.
    pub fn free(self) -> hal_can::Can<I> {
        self.can.free()
    }
}
