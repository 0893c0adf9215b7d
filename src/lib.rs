//! Weekly timetable generation for class sections.
//!
//! Lab pairings are placed first as two-slot blocks on separate weekdays,
//! then theory lectures fill the remaining slots. One [`ledger::AvailabilityLedger`]
//! is shared by every section so a faculty member is never booked twice at
//! the same time.

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod grid;
pub mod labs;
pub mod ledger;
pub mod pairing;
pub mod server;
pub mod session;
pub mod theory;
pub mod workload;
