// SPDX-License-Identifier: MIT

//! CAN report messages published by the sensor node.

use bxcan::{Data, Frame, StandardId};

/// Standard 11-bit identifier for distance reports.
pub const DISTANCE_REPORT_ID: u16 = 0x120;

/// One ranging result, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceReport {
    pub cm: u16,
}

impl DistanceReport {
    pub fn new(cm: u16) -> Self {
        Self { cm }
    }

    /// Wire payload: centimeters, big-endian.
    pub fn payload(&self) -> [u8; 2] {
        self.cm.to_be_bytes()
    }

    /// Build the CAN data frame for this report.
    pub fn to_frame(&self) -> Frame {
        // Both constructions are infallible here: the ID fits 11 bits and
        // the payload fits 8 bytes.
        let id = StandardId::new(DISTANCE_REPORT_ID).unwrap();
        let data = Data::new(&self.payload()).unwrap();
        Frame::new_data(id, data)
    }

    /// Decode a report payload, e.g. on the receiving bus node.
    pub fn parse(data: &[u8]) -> Option<Self> {
        match data {
            [hi, lo, ..] => Some(Self {
                cm: u16::from_be_bytes([*hi, *lo]),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_is_big_endian_centimeters() {
        assert_eq!(DistanceReport::new(0x0123).payload(), [0x01, 0x23]);
    }

    #[test]
    fn parse_round_trips_and_rejects_short_data() {
        let report = DistanceReport::new(250);
        assert_eq!(DistanceReport::parse(&report.payload()), Some(report));
        assert_eq!(DistanceReport::parse(&[0x05]), None);
    }

    #[test]
    fn frame_carries_the_report_id() {
        let frame = DistanceReport::new(15).to_frame();
        let expected = bxcan::Id::Standard(StandardId::new(DISTANCE_REPORT_ID).unwrap());
        assert_eq!(frame.id(), expected);
        assert_eq!(frame.data().map(|d| d.len()), Some(2));
    }
}
