//! Entity handles and acquisition parameters

use crate::foundation::math::{Quat, Vec3};

slotmap::new_key_type! {
    /// Generational key of a pool inside a [`PoolManager`](super::PoolManager)
    pub struct PoolKey;
}

/// Handle to one pooled instance
///
/// A handle names a slot in exactly one pool of exactly one manager for its whole
/// life. The generation counter changes every time the slot is handed out again,
/// so a handle kept past its release can be told apart from the slot's current
/// reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    owner: u32,
    pool: PoolKey,
    index: usize,
    generation: u32,
}

impl EntityHandle {
    pub(crate) fn new(owner: u32, pool: PoolKey, index: usize, generation: u32) -> Self {
        Self { owner, pool, index, generation }
    }
    
    /// Id of the manager that issued this handle (0 for a standalone pool)
    pub fn owner(&self) -> u32 {
        self.owner
    }
    
    /// Key of the owning pool
    pub fn pool_key(&self) -> PoolKey {
        self.pool
    }
    
    /// Position of the slot in the pool's insertion order
    pub fn index(&self) -> usize {
        self.index
    }
    
    /// Reservation counter of the slot at the time this handle was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
    
    /// Whether both handles refer to the same underlying instance
    pub fn same_instance(&self, other: &Self) -> bool {
        self.owner == other.owner && self.pool == other.pool && self.index == other.index
    }
}

/// Where and how to place an instance when it is acquired
#[derive(Debug, Clone, PartialEq)]
pub struct AcquireParams {
    /// World position
    pub position: Vec3,
    /// World orientation
    pub orientation: Quat,
    /// Whether the instance comes out active
    pub start_active: bool,
}

impl Default for AcquireParams {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            start_active: true,
        }
    }
}

impl AcquireParams {
    /// Active instance at `position` with identity orientation
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
    
    /// Replace the orientation
    pub fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = orientation;
        self
    }
    
    /// Set whether the instance comes out active
    pub fn with_start_active(mut self, start_active: bool) -> Self {
        self.start_active = start_active;
        self
    }
    
    /// Shorthand for `with_start_active(false)`
    ///
    /// An inactive slot stays available, so the next acquire from the same pool may
    /// hand it out again and the handle returned here becomes stale. The pool offers
    /// no way to activate it later; use it for instances that are only placed, never
    /// reserved.
    pub fn inactive(self) -> Self {
        self.with_start_active(false)
    }
}
