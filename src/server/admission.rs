//! Connection admission control
//!
//! A single counter with a hard limit decides whether a connection is served
//! or turned away with 503. There is no queue: a connection that does not
//! fit is answered and closed straight away.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Concurrent connections served when no limit is configured.
pub const DEFAULT_MAX_CONNECTIONS: usize = 25;

#[derive(Debug)]
struct AdmissionState {
    active: usize,
    limit: usize,
}

/// Shared handle to the admission counter.
///
/// Cloning is cheap; every clone refers to the same counter. The lock is
/// held only for the compare and the increment or decrement.
#[derive(Debug, Clone)]
pub struct AdmissionController {
    state: Arc<Mutex<AdmissionState>>,
}

/// Result of asking for an admission slot.
#[derive(Debug)]
pub enum Admission {
    Admitted(AdmissionSlot),
    Rejected,
}

/// A held admission slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct AdmissionSlot {
    controller: AdmissionController,
}

impl AdmissionController {
    pub fn new(limit: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(AdmissionState { active: 0, limit })),
        }
    }

    /// Takes a slot if fewer than `limit` are held. A rejection leaves the
    /// counter untouched.
    pub fn enter(&self) -> Admission {
        let mut state = self.lock();

        if state.active < state.limit {
            state.active += 1;
            Admission::Admitted(AdmissionSlot {
                controller: self.clone(),
            })
        } else {
            Admission::Rejected
        }
    }

    /// Number of slots currently held.
    pub fn active(&self) -> usize {
        self.lock().active
    }

    pub fn limit(&self) -> usize {
        self.lock().limit
    }

    fn exit(&self) {
        let mut state = self.lock();
        state.active = state.active.saturating_sub(1);
    }

    // A panic elsewhere never leaves the counter half-updated, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, AdmissionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AdmissionController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONNECTIONS)
    }
}

impl Drop for AdmissionSlot {
    fn drop(&mut self) {
        self.controller.exit();
    }
}
