//! Command implementations

pub mod admin;
pub mod contribute;
pub mod offline;
pub mod places;
pub mod profile;
pub mod search;
pub mod vendor;
pub mod watch;
pub mod weather;
