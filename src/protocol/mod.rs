// SPDX-License-Identifier: MIT

pub mod messages;

pub use messages::{DistanceReport, DISTANCE_REPORT_ID};
