//! Optimistic counter updates
//!
//! Likes and shares are shown as changed before the backend confirms them.
//! The update runs through an explicit state machine so the rollback path is
//! a real transition instead of a pair of booleans.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum UpdateState {
    Idle,
    Pending { shown: u64 },
    Committed,
    RolledBack,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimisticError {
    #[error("An update is already pending")]
    AlreadyPending,

    #[error("No update is pending")]
    NothingPending,
}

/// A counter with at most one unconfirmed change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimisticCounter {
    confirmed: u64,
    state: UpdateState,
}

impl OptimisticCounter {
    pub fn new(confirmed: u64) -> Self {
        Self {
            confirmed,
            state: UpdateState::Idle,
        }
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    pub fn confirmed(&self) -> u64 {
        self.confirmed
    }

    /// Value to display: the optimistic one while pending
    pub fn shown(&self) -> u64 {
        match self.state {
            UpdateState::Pending { shown } => shown,
            _ => self.confirmed,
        }
    }

    /// Apply `delta` optimistically
    ///
    /// Negative deltas saturate at zero.
    pub fn begin(&mut self, delta: i64) -> Result<u64, OptimisticError> {
        if let UpdateState::Pending { .. } = self.state {
            return Err(OptimisticError::AlreadyPending);
        }

        let shown = if delta >= 0 {
            self.confirmed.saturating_add(delta.unsigned_abs())
        } else {
            self.confirmed.saturating_sub(delta.unsigned_abs())
        };
        self.state = UpdateState::Pending { shown };
        Ok(shown)
    }

    /// The backend accepted the change and reported `confirmed` as the new count
    ///
    /// The reported count wins over the optimistic one, so concurrent updates
    /// from other readers show up once the request settles.
    pub fn commit(&mut self, confirmed: u64) -> Result<u64, OptimisticError> {
        if !matches!(self.state, UpdateState::Pending { .. }) {
            return Err(OptimisticError::NothingPending);
        }
        self.confirmed = confirmed;
        self.state = UpdateState::Committed;
        Ok(self.confirmed)
    }

    /// The backend rejected the change; restore the confirmed value
    pub fn rollback(&mut self) -> Result<u64, OptimisticError> {
        if !matches!(self.state, UpdateState::Pending { .. }) {
            return Err(OptimisticError::NothingPending);
        }
        self.state = UpdateState::RolledBack;
        Ok(self.confirmed)
    }
}
