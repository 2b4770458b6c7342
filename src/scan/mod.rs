//! Focus drivers, including the line-scanning state machine.

pub mod driver;
pub mod path;
