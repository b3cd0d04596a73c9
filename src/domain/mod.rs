//! Domain types for membership payments and the ports the store depends on.

pub mod filter;
pub mod payment;
pub mod ports;
pub mod stats;
