//! Application layer: the payments view-model store.
//!
//! `PaymentStore` owns the screen state and exposes the actions the UI
//! invokes. Backend calls go through the `PaymentTransport` port so a
//! deterministic fake can stand in for the simulated delay.

pub mod store;
