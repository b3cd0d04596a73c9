//! Adapters behind the domain ports: the simulated backend, id sources,
//! notification sink and built-in seed data.

pub mod id;
pub mod notifier;
pub mod seed;
pub mod simulated;
