//! Pool statistics for monitoring

/// Snapshot of a single pool
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolStats {
    /// Number of slots in the pool
    pub capacity: usize,
    /// Slots currently reserved by callers
    pub active: usize,
    /// Slots built during warm-up
    pub warm_capacity: usize,
    /// Successful acquisitions since creation
    pub acquisitions: u64,
    /// Acquisitions served by an existing slot
    pub reuses: u64,
    /// Acquisitions that had to build a new slot
    pub growths: u64,
    /// Active-to-inactive transitions (release and clear)
    pub releases: u64,
    /// Peak number of slots active simultaneously
    pub peak_active: usize,
}

impl PoolStats {
    /// Slots available for reuse
    pub fn inactive(&self) -> usize {
        self.capacity - self.active
    }
    
    /// Fraction of slots in use (0.0 to 1.0)
    pub fn utilization(&self) -> f32 {
        if self.capacity > 0 {
            self.active as f32 / self.capacity as f32
        } else {
            0.0
        }
    }
    
    /// Whether the pool had to grow past its warm-up size
    pub fn has_grown(&self) -> bool {
        self.capacity > self.warm_capacity
    }
}

/// Aggregate statistics across every pool a manager owns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolManagerStats {
    /// Number of registered pools
    pub pools: usize,
    /// Slots across all pools
    pub total_capacity: usize,
    /// Active slots across all pools
    pub total_active: usize,
    /// Acquisitions across all pools
    pub total_acquisitions: u64,
    /// Growth events across all pools
    pub total_growths: u64,
    /// Releases across all pools
    pub total_releases: u64,
}

impl PoolManagerStats {
    /// Fold one pool's snapshot into the totals
    pub fn accumulate(&mut self, pool: &PoolStats) {
        self.pools += 1;
        self.total_capacity += pool.capacity;
        self.total_active += pool.active;
        self.total_acquisitions += pool.acquisitions;
        self.total_growths += pool.growths;
        self.total_releases += pool.releases;
    }
    
    /// Fraction of all slots in use (0.0 to 1.0)
    pub fn utilization(&self) -> f32 {
        if self.total_capacity > 0 {
            self.total_active as f32 / self.total_capacity as f32
        } else {
            0.0
        }
    }
}
