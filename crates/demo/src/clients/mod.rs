//! Outbound clients - traits, mocks and real implementations

pub mod remote;
pub mod storage;
