//! Store module exports

pub mod memory;
pub mod postgres;
pub mod traits;
