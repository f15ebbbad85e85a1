//! Timed release of pooled instances
//!
//! Transient effects (explosions, muzzle flashes, one-shot sounds) usually go back
//! to their pool after a fixed duration. A [`ReleaseSchedule`] keeps those
//! countdowns and releases the handles through the manager as simulation time advances.

use super::{EntityHandle, PoolManager, PoolResult, Template};

/// Duration used when a non-positive or non-finite duration is requested (seconds)
pub const DEFAULT_RELEASE_DURATION: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRelease {
    handle: EntityHandle,
    remaining: f32,
}

/// Countdown list of handles to release once their duration elapses
#[derive(Debug, Clone, Default)]
pub struct ReleaseSchedule {
    pending: Vec<PendingRelease>,
}

impl ReleaseSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Release `handle` after `duration` seconds, replacing any earlier countdown for it
    ///
    /// Returns the duration actually scheduled.
    pub fn schedule(&mut self, handle: EntityHandle, duration: f32) -> f32 {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            DEFAULT_RELEASE_DURATION
        };
        
        match self.pending.iter_mut().find(|entry| entry.handle == handle) {
            Some(entry) => entry.remaining = duration,
            None => self.pending.push(PendingRelease { handle, remaining: duration }),
        }
        duration
    }
    
    /// Stop the countdown for `handle`
    pub fn cancel(&mut self, handle: EntityHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        self.pending.len() != before
    }
    
    /// Seconds left before `handle` is released
    pub fn remaining(&self, handle: EntityHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|entry| entry.handle == handle)
            .map(|entry| entry.remaining)
    }
    
    /// Number of countdowns still running
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
    
    /// Whether no countdowns are running
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
    
    /// Drop every countdown without releasing anything
    pub fn clear(&mut self) {
        self.pending.clear();
    }
    
    /// Advance every countdown by `delta_time` seconds and release the expired handles
    ///
    /// Returns how many instances went from active to inactive. Handles that were
    /// already released, or whose slot has been handed to someone else since, are
    /// dropped without effect. A handle whose pool no longer exists is dropped as
    /// well, and the first such `InvalidHandle` error is returned once every other
    /// expired countdown has been processed.
    pub fn tick<T: Template>(&mut self, pools: &mut PoolManager<T>, delta_time: f32) -> PoolResult<usize> {
        let mut released = 0;
        let mut first_error = None;
        
        self.pending.retain_mut(|entry| {
            entry.remaining -= delta_time;
            if entry.remaining > 0.0 {
                return true;
            }
            
            match pools.release(entry.handle) {
                Ok(true) => released += 1,
                Ok(false) => {}
                Err(err) => {
                    log::warn!("Timed release failed: {}", err);
                    first_error.get_or_insert(err);
                }
            }
            false
        });
        
        match first_error {
            Some(err) => Err(err),
            None => Ok(released),
        }
    }
}
