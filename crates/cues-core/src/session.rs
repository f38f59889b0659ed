//! Motion sessions and snapshot publication.
//!
//! A session is one start/stop cycle of the sensor feed. Each session gets a
//! fresh [`MotionEstimator`], so a resumed feed never integrates across the
//! pause. Snapshots are published whole through a [`SnapshotCell`], which the
//! render side may read from another thread.

use crate::motion::{InertialSample, MotionEstimator, MotionSnapshot, Orientation};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("no motion session is running")]
    NotRunning,
    #[error("session {stale} is not the running session ({current})")]
    Stale { stale: u64, current: u64 },
}

#[derive(Clone, Debug, Default)]
pub struct SnapshotCell {
    inner: Arc<Mutex<MotionSnapshot>>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, snapshot: MotionSnapshot) {
        *self.lock() = snapshot;
    }

    pub fn load(&self) -> MotionSnapshot {
        *self.lock()
    }

    // A writer that panicked mid-store still left a whole snapshot behind.
    fn lock(&self) -> MutexGuard<'_, MotionSnapshot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct MotionTracker {
    next_id: u64,
    running: Option<(SessionHandle, MotionEstimator)>,
    cell: SnapshotCell,
}

impl MotionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session with fresh filter state, replacing any running one.
    pub fn start_session(&mut self) -> SessionHandle {
        self.next_id += 1;
        let handle = SessionHandle(self.next_id);
        if let Some((old, _)) = self.running.replace((handle, MotionEstimator::new())) {
            log::debug!("motion session {} replaced", old.id());
        }
        log::debug!("motion session {} started", handle.id());
        handle
    }

    pub fn stop_session(&mut self, handle: SessionHandle) -> Result<(), SessionError> {
        let current = self.current().ok_or(SessionError::NotRunning)?;
        if current != handle {
            return Err(SessionError::Stale {
                stale: handle.id(),
                current: current.id(),
            });
        }
        self.running = None;
        log::debug!("motion session {} stopped", handle.id());
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    pub fn current(&self) -> Option<SessionHandle> {
        self.running.as_ref().map(|(h, _)| *h)
    }

    /// Feed a sample to the running session and publish the result.
    ///
    /// Samples tagged with a stopped or replaced session are dropped.
    pub fn push(
        &mut self,
        handle: SessionHandle,
        sample: InertialSample,
        orientation: Orientation,
    ) -> Option<MotionSnapshot> {
        let (current, estimator) = self.running.as_mut()?;
        if *current != handle {
            return None;
        }
        let snapshot = estimator.process(sample, orientation);
        self.cell.publish(snapshot);
        Some(snapshot)
    }

    pub fn snapshot(&self) -> MotionSnapshot {
        self.cell.load()
    }

    pub fn snapshot_cell(&self) -> SnapshotCell {
        self.cell.clone()
    }
}
