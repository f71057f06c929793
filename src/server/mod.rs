//! Listening socket and connection admission.

pub mod admission;
pub mod listener;

pub use admission::{Admission, AdmissionController, AdmissionSlot};
pub use listener::Server;
