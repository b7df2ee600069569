//! Library side of the `ayush-lookup` binary.

pub mod logging;
pub mod report;
