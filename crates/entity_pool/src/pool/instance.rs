//! Pool Instance
//!
//! Owns every instance built from one template and hands them out first-fit in
//! insertion order. The slot list never shrinks: when no inactive slot is left the
//! pool builds exactly one more and appends it.

use super::{
    AcquireParams, EntityHandle, PoolError, PoolKey, PoolResult, PoolStats, PooledInstance,
    Template, TemplateId,
};
use crate::foundation::math::{Quat, Vec3};

/// One pooled instance and its bookkeeping
#[derive(Debug)]
struct Slot<I> {
    instance: I,
    active: bool,
    generation: u32,
}

/// Reusable collection of instances for one template
#[derive(Debug)]
pub struct PoolInstance<T: Template> {
    template: T,
    id: TemplateId,
    owner: u32,
    key: PoolKey,
    slots: Vec<Slot<T::Instance>>,
    active_count: usize,
    log_growth: bool,
    stats: PoolStats,
}

impl<T: Template> PoolInstance<T> {
    /// Build a pool and warm it up with `initial_capacity` inactive instances
    ///
    /// A factory failure aborts creation entirely; no partially filled pool is returned.
    pub fn new(template: T, initial_capacity: usize) -> PoolResult<Self> {
        let id = template.id();
        let mut slots = Vec::with_capacity(initial_capacity);
        
        for _ in 0..initial_capacity {
            let mut instance = template
                .build(Vec3::zeros(), Quat::identity())
                .map_err(|err| {
                    log::warn!("Warm-up of pool '{}' failed after {} instances: {}", id, slots.len(), err);
                    PoolError::FactoryFailure {
                        template: id.clone(),
                        reason: err.to_string(),
                    }
                })?;
            instance.set_active(false);
            slots.push(Slot { instance, active: false, generation: 0 });
        }
        
        Ok(Self {
            template,
            id,
            owner: 0,
            key: PoolKey::default(),
            slots,
            active_count: 0,
            log_growth: true,
            stats: PoolStats {
                capacity: initial_capacity,
                warm_capacity: initial_capacity,
                ..Default::default()
            },
        })
    }
    
    /// Enable or disable the debug line logged on every growth
    pub fn with_growth_logging(mut self, enabled: bool) -> Self {
        self.log_growth = enabled;
        self
    }
    
    pub(crate) fn with_owner(mut self, owner: u32, key: PoolKey) -> Self {
        self.owner = owner;
        self.key = key;
        self
    }
    
    /// Hand out the first inactive instance, growing by one if every slot is active
    pub fn acquire(&mut self, params: &AcquireParams) -> PoolResult<EntityHandle> {
        let index = match self.first_inactive() {
            Some(index) => {
                let instance = &mut self.slots[index].instance;
                instance.set_position(params.position);
                instance.set_orientation(params.orientation);
                self.stats.reuses += 1;
                index
            }
            None => self.grow(params)?,
        };
        
        let slot = &mut self.slots[index];
        slot.generation = slot.generation.wrapping_add(1);
        slot.active = params.start_active;
        slot.instance.set_active(params.start_active);
        let handle = EntityHandle::new(self.owner, self.key, index, slot.generation);
        
        if params.start_active {
            self.active_count += 1;
            self.stats.peak_active = self.stats.peak_active.max(self.active_count);
        }
        self.stats.acquisitions += 1;
        
        log::trace!("Pool '{}' handed out slot {} (active: {})", self.id, index, params.start_active);
        Ok(handle)
    }
    
    /// Return an instance to the pool
    ///
    /// Returns `true` if the slot went from active to inactive. Releasing an inactive
    /// slot, or a handle whose slot has since been handed out again, changes nothing.
    pub fn release(&mut self, handle: EntityHandle) -> PoolResult<bool> {
        let index = self.check_handle(handle)?;
        let slot = &mut self.slots[index];
        
        if slot.generation != handle.generation() || !slot.active {
            return Ok(false);
        }
        
        slot.active = false;
        slot.instance.set_active(false);
        self.active_count -= 1;
        self.stats.releases += 1;
        Ok(true)
    }
    
    /// Deactivate every active instance, returning how many were released
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.active) {
            slot.active = false;
            slot.instance.set_active(false);
            released += 1;
        }
        
        self.active_count = 0;
        self.stats.releases += released as u64;
        released
    }
    
    /// Whether the handle's reservation is still active
    pub fn is_active(&self, handle: EntityHandle) -> PoolResult<bool> {
        let slot = &self.slots[self.check_handle(handle)?];
        Ok(slot.active && slot.generation == handle.generation())
    }
    
    /// Borrow the instance behind a handle
    pub fn get(&self, handle: EntityHandle) -> PoolResult<&T::Instance> {
        let index = self.check_current(handle)?;
        Ok(&self.slots[index].instance)
    }
    
    /// Mutably borrow the instance behind a handle
    pub fn get_mut(&mut self, handle: EntityHandle) -> PoolResult<&mut T::Instance> {
        let index = self.check_current(handle)?;
        Ok(&mut self.slots[index].instance)
    }
    
    /// Iterate over active instances in insertion order
    pub fn iter_active(&self) -> impl Iterator<Item = (EntityHandle, &T::Instance)> + '_ {
        let (owner, key) = (self.owner, self.key);
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.active)
            .map(move |(index, slot)| (EntityHandle::new(owner, key, index, slot.generation), &slot.instance))
    }
    
    /// Template this pool builds from
    pub fn template(&self) -> &T {
        &self.template
    }
    
    /// Identity of the template
    pub fn id(&self) -> &TemplateId {
        &self.id
    }
    
    /// Registry key of this pool
    pub fn key(&self) -> PoolKey {
        self.key
    }
    
    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    
    /// Whether the pool holds no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    
    /// Number of active slots
    pub fn active_count(&self) -> usize {
        self.active_count
    }
    
    /// Number of slots available for reuse
    pub fn inactive_count(&self) -> usize {
        self.slots.len() - self.active_count
    }
    
    /// Current statistics
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.slots.len(),
            active: self.active_count,
            ..self.stats.clone()
        }
    }
    
    fn first_inactive(&self) -> Option<usize> {
        if self.active_count == self.slots.len() {
            return None;
        }
        self.slots.iter().position(|slot| !slot.active)
    }
    
    fn grow(&mut self, params: &AcquireParams) -> PoolResult<usize> {
        let instance = self
            .template
            .build(params.position, params.orientation)
            .map_err(|err| {
                log::warn!("Pool '{}' could not grow past {} instances: {}", self.id, self.slots.len(), err);
                PoolError::FactoryFailure {
                    template: self.id.clone(),
                    reason: err.to_string(),
                }
            })?;
        
        self.slots.push(Slot { instance, active: false, generation: 0 });
        self.stats.growths += 1;
        
        if self.log_growth {
            log::debug!("Pool '{}' exhausted, grew to {} instances", self.id, self.slots.len());
        }
        Ok(self.slots.len() - 1)
    }
    
    fn check_handle(&self, handle: EntityHandle) -> PoolResult<usize> {
        if handle.owner() != self.owner || handle.pool_key() != self.key {
            return Err(PoolError::InvalidHandle {
                handle,
                reason: format!("handle does not belong to pool '{}'", self.id),
            });
        }
        if handle.index() >= self.slots.len() {
            return Err(PoolError::InvalidHandle {
                handle,
                reason: format!("slot {} out of range for {} slots", handle.index(), self.slots.len()),
            });
        }
        Ok(handle.index())
    }
    
    fn check_current(&self, handle: EntityHandle) -> PoolResult<usize> {
        let index = self.check_handle(handle)?;
        if self.slots[index].generation != handle.generation() {
            return Err(PoolError::InvalidHandle {
                handle,
                reason: "slot was handed out again since this handle was issued".to_string(),
            });
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::test_support::DummyTemplate;
    use approx::assert_relative_eq;
    use std::collections::HashSet;
    
    fn pool(capacity: usize) -> PoolInstance<DummyTemplate> {
        PoolInstance::new(DummyTemplate::named("Bullet"), capacity).unwrap()
    }
    
    #[test]
    fn test_warm_up_builds_inactive_instances() {
        let template = DummyTemplate::named("Bullet");
        let pool = PoolInstance::new(template.clone(), 3).unwrap();
        
        assert_eq!(template.build_count(), 3);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.active_count(), 0);
        assert!(pool.slots.iter().all(|slot| !slot.instance.active));
    }
    
    #[test]
    fn test_warm_up_failure_aborts_creation() {
        let result = PoolInstance::new(DummyTemplate::failing_after("Broken", 2), 5);
        
        match result {
            Err(PoolError::FactoryFailure { template, reason }) => {
                assert_eq!(template, TemplateId::from("Broken"));
                assert!(reason.contains("exhausted"));
            }
            other => panic!("Expected FactoryFailure, got {:?}", other.map(|p| p.len())),
        }
    }
    
    #[test]
    fn test_zero_capacity_pool_grows_on_first_acquire() {
        let mut pool = pool(0);
        assert!(pool.is_empty());
        
        let handle = pool.acquire(&AcquireParams::default()).unwrap();
        assert_eq!(handle.index(), 0);
        assert_eq!(pool.len(), 1);
    }
    
    #[test]
    fn test_acquire_repositions_reused_instance() {
        let mut pool = pool(1);
        let orientation = crate::foundation::math::utils::yaw(45.0);
        let params = AcquireParams::at(Vec3::new(1.0, 2.0, 3.0)).with_orientation(orientation);
        
        let handle = pool.acquire(&params).unwrap();
        let instance = pool.get(handle).unwrap();
        assert_eq!(instance.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(instance.orientation, orientation, epsilon = 1e-6);
        assert!(instance.active);
    }
    
    #[test]
    fn test_growth_places_new_instance() {
        let mut pool = pool(1);
        pool.acquire(&AcquireParams::default()).unwrap();
        
        let handle = pool.acquire(&AcquireParams::at(Vec3::new(5.0, 0.0, 0.0))).unwrap();
        assert_eq!(handle.index(), 1);
        assert_eq!(pool.get(handle).unwrap().position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(pool.stats().growths, 1);
    }
    
    #[test]
    fn test_first_fit_prefers_lowest_inactive_index() {
        let mut pool = pool(4);
        let handles: Vec<_> = (0..4).map(|_| pool.acquire(&AcquireParams::default()).unwrap()).collect();
        
        pool.release(handles[3]).unwrap();
        pool.release(handles[1]).unwrap();
        
        let next = pool.acquire(&AcquireParams::default()).unwrap();
        assert_eq!(next.index(), 1);
    }
    
    #[test]
    fn test_no_double_allocation() {
        let mut pool = pool(3);
        let handles: HashSet<_> = (0..10)
            .map(|_| pool.acquire(&AcquireParams::default()).unwrap().index())
            .collect();
        
        assert_eq!(handles.len(), 10);
        assert_eq!(pool.len(), 10);
    }
    
    #[test]
    fn test_release_is_idempotent() {
        let mut pool = pool(2);
        let handle = pool.acquire(&AcquireParams::default()).unwrap();
        
        assert!(pool.release(handle).unwrap());
        assert!(!pool.release(handle).unwrap());
        assert!(!pool.is_active(handle).unwrap());
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.stats().releases, 1);
    }
    
    #[test]
    fn test_stale_release_does_not_affect_new_holder() {
        let mut pool = pool(1);
        let first = pool.acquire(&AcquireParams::default()).unwrap();
        pool.release(first).unwrap();
        let second = pool.acquire(&AcquireParams::default()).unwrap();
        
        assert!(first.same_instance(&second));
        assert!(!pool.release(first).unwrap());
        assert!(pool.is_active(second).unwrap());
        assert!(!pool.is_active(first).unwrap());
        assert!(matches!(pool.get(first), Err(PoolError::InvalidHandle { .. })));
    }
    
    #[test]
    fn test_start_inactive_on_reuse_and_growth() {
        let mut pool = pool(1);
        
        let reused = pool.acquire(&AcquireParams::default().inactive()).unwrap();
        assert!(!pool.is_active(reused).unwrap());
        assert!(!pool.get(reused).unwrap().active);
        
        pool.acquire(&AcquireParams::default()).unwrap();
        let grown = pool.acquire(&AcquireParams::default().inactive()).unwrap();
        assert_eq!(grown.index(), 1);
        assert!(!pool.is_active(grown).unwrap());
        // Template builds come out enabled; the pool must still switch them off
        assert!(!pool.get(grown).unwrap().active);
    }
    
    #[test]
    fn test_inactive_handle_goes_stale_on_next_acquire() {
        let mut pool = pool(1);
        let parked = pool.acquire(&AcquireParams::default().inactive()).unwrap();
        assert_eq!(pool.inactive_count(), 1);
        
        let next = pool.acquire(&AcquireParams::default()).unwrap();
        assert_eq!(next.index(), parked.index());
        assert_eq!(pool.len(), 1);
        assert!(!pool.is_active(parked).unwrap());
        assert!(matches!(pool.get(parked), Err(PoolError::InvalidHandle { .. })));
        assert!(pool.is_active(next).unwrap());
    }
    
    #[test]
    fn test_clear_only_touches_active_slots() {
        let mut pool = pool(3);
        let a = pool.acquire(&AcquireParams::default()).unwrap();
        let b = pool.acquire(&AcquireParams::default()).unwrap();
        
        assert_eq!(pool.clear(), 2);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.inactive_count(), 3);
        assert!(!pool.is_active(a).unwrap());
        assert!(!pool.is_active(b).unwrap());
        assert_eq!(pool.clear(), 0);
    }
    
    #[test]
    fn test_foreign_handle_is_invalid() {
        let mut pool = pool(1);
        let handle = pool.acquire(&AcquireParams::default()).unwrap();
        
        let foreign = EntityHandle::new(handle.owner(), handle.pool_key(), 9, handle.generation());
        assert!(matches!(pool.release(foreign), Err(PoolError::InvalidHandle { .. })));
        
        let other_owner = EntityHandle::new(handle.owner() + 1, handle.pool_key(), 0, handle.generation());
        assert!(matches!(pool.release(other_owner), Err(PoolError::InvalidHandle { .. })));
        assert!(pool.is_active(handle).unwrap());
    }
    
    #[test]
    fn test_iter_active_in_insertion_order() {
        let mut pool = pool(3);
        let handles: Vec<_> = (0..3).map(|_| pool.acquire(&AcquireParams::default()).unwrap()).collect();
        pool.release(handles[1]).unwrap();
        
        let active: Vec<_> = pool.iter_active().map(|(handle, _)| handle).collect();
        assert_eq!(active, vec![handles[0], handles[2]]);
    }
    
    #[test]
    fn test_growth_failure_leaves_pool_unchanged() {
        let mut pool = PoolInstance::new(DummyTemplate::failing_after("Capped", 1), 1).unwrap();
        pool.acquire(&AcquireParams::default()).unwrap();
        
        let result = pool.acquire(&AcquireParams::default());
        assert!(matches!(result, Err(PoolError::FactoryFailure { .. })));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.active_count(), 1);
    }
}
