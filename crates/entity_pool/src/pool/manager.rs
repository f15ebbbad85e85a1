//! Pool Manager
//!
//! Resolves templates to their pools and exposes the acquire/release/clear surface
//! used by gameplay code. The manager is an ordinary value owned by the simulation
//! context, so independent simulations (and tests) never share pool state.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut pools = PoolManager::new(PoolConfig::default());
//!
//! // First use creates the "bullet" pool with the configured warm-up size
//! let bullet = pools.acquire(&bullet_template, AcquireParams::at(muzzle))?;
//!
//! // ...later
//! pools.release(bullet)?;
//! pools.clear_all_pools();
//! ```

use super::{
    AcquireParams, EntityHandle, PoolError, PoolInstance, PoolKey, PoolManagerStats, PoolResult,
    Template, TemplateId,
};
use crate::config::PoolConfig;
use slotmap::SlotMap;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Source of manager ids; 0 is left for standalone pools
static NEXT_MANAGER_ID: AtomicU32 = AtomicU32::new(1);

/// Registry of template pools and the public pooling API
///
/// At most one pool exists per template id. Pools are stored in a generational
/// slot map, so handles into a pool that was unregistered or reset are reported
/// as invalid instead of silently resolving to a newer pool. Every manager also
/// stamps its own id into the handles it issues, so a handle from one simulation
/// is rejected by another.
pub struct PoolManager<T: Template> {
    id: u32,
    config: PoolConfig,
    pools: SlotMap<PoolKey, PoolInstance<T>>,
    registry: HashMap<TemplateId, PoolKey>,
}

impl<T: Template> Default for PoolManager<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

impl<T: Template> PoolManager<T> {
    /// Create an empty manager
    pub fn new(config: PoolConfig) -> Self {
        Self {
            id: NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed),
            config,
            pools: SlotMap::with_key(),
            registry: HashMap::new(),
        }
    }
    
    /// Id stamped into every handle this manager issues
    pub fn id(&self) -> u32 {
        self.id
    }
    
    /// Active configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }
    
    /// Hand out an instance from an existing pool, looked up by id only
    ///
    /// Fails with `PoolNotFound`, without side effects, if no pool was ever created
    /// for `template`.
    pub fn acquire_by_key(&mut self, template: &TemplateId, params: AcquireParams) -> PoolResult<EntityHandle> {
        self.pool_mut(template)
            .ok_or_else(|| PoolError::PoolNotFound { template: template.clone() })?
            .acquire(&params)
    }
    
    /// Return an instance to its pool
    ///
    /// Returns `true` if the instance went from active to inactive; releasing twice
    /// is a no-op.
    pub fn release(&mut self, handle: EntityHandle) -> PoolResult<bool> {
        let released = self.owning_pool_mut(handle)?.release(handle)?;
        if released {
            log::trace!("Released slot {} of pool {:?}", handle.index(), handle.pool_key());
        }
        Ok(released)
    }
    
    /// Whether the handle's reservation is still active
    pub fn is_active(&self, handle: EntityHandle) -> PoolResult<bool> {
        self.owning_pool(handle)?.is_active(handle)
    }
    
    /// Borrow the instance behind a handle
    pub fn get(&self, handle: EntityHandle) -> PoolResult<&T::Instance> {
        self.owning_pool(handle)?.get(handle)
    }
    
    /// Mutably borrow the instance behind a handle
    pub fn get_mut(&mut self, handle: EntityHandle) -> PoolResult<&mut T::Instance> {
        self.owning_pool_mut(handle)?.get_mut(handle)
    }
    
    /// Deactivate every active instance of one template
    ///
    /// Clearing a template that has no pool is a no-op. Returns the number released.
    pub fn clear_pool(&mut self, template: &TemplateId) -> usize {
        match self.pool_mut(template) {
            Some(pool) => pool.clear(),
            None => {
                log::debug!("clear_pool: no pool registered for '{}'", template);
                0
            }
        }
    }
    
    /// Deactivate every active instance of every pool, returning the number released
    pub fn clear_all_pools(&mut self) -> usize {
        self.pools.values_mut().map(PoolInstance::clear).sum()
    }
    
    /// Pool registered for `template`, if any
    pub fn pool(&self, template: &TemplateId) -> Option<&PoolInstance<T>> {
        self.registry.get(template).and_then(|key| self.pools.get(*key))
    }
    
    /// Mutable pool registered for `template`, if any
    pub fn pool_mut(&mut self, template: &TemplateId) -> Option<&mut PoolInstance<T>> {
        let key = *self.registry.get(template)?;
        self.pools.get_mut(key)
    }
    
    /// Whether a pool exists for `template`
    pub fn contains_pool(&self, template: &TemplateId) -> bool {
        self.registry.contains_key(template)
    }
    
    /// Number of registered pools
    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }
    
    /// Ids of every registered template
    pub fn template_ids(&self) -> impl Iterator<Item = &TemplateId> {
        self.registry.keys()
    }
    
    /// Drop the pool for `template`; its outstanding handles become invalid
    pub fn unregister(&mut self, template: &TemplateId) -> bool {
        match self.registry.remove(template) {
            Some(key) => {
                let removed = self.pools.remove(key);
                if let Some(pool) = &removed {
                    log::info!("Unregistered pool '{}' ({} instances)", template, pool.len());
                }
                removed.is_some()
            }
            None => false,
        }
    }
    
    /// Tear down every pool; all outstanding handles become invalid
    pub fn reset(&mut self) {
        log::info!("Resetting {} pools", self.pools.len());
        self.registry.clear();
        self.pools.clear();
    }
    
    /// Aggregate statistics across all pools
    pub fn stats(&self) -> PoolManagerStats {
        let mut stats = PoolManagerStats::default();
        for pool in self.pools.values() {
            stats.accumulate(&pool.stats());
        }
        stats
    }
    
    fn owning_pool(&self, handle: EntityHandle) -> PoolResult<&PoolInstance<T>> {
        self.check_owner(handle)?;
        self.pools.get(handle.pool_key()).ok_or_else(|| Self::missing_pool(handle))
    }
    
    fn owning_pool_mut(&mut self, handle: EntityHandle) -> PoolResult<&mut PoolInstance<T>> {
        self.check_owner(handle)?;
        self.pools.get_mut(handle.pool_key()).ok_or_else(|| Self::missing_pool(handle))
    }
    
    fn check_owner(&self, handle: EntityHandle) -> PoolResult<()> {
        if handle.owner() == self.id {
            return Ok(());
        }
        Err(PoolError::InvalidHandle {
            handle,
            reason: format!("issued by pool manager {}, not {}", handle.owner(), self.id),
        })
    }
    
    fn missing_pool(handle: EntityHandle) -> PoolError {
        PoolError::InvalidHandle {
            handle,
            reason: "owning pool no longer exists".to_string(),
        }
    }
}

impl<T: Template + Clone> PoolManager<T> {
    /// Find the pool for `template`, creating and warming it up on first use
    ///
    /// `initial_capacity` only applies when the pool is created; an existing pool
    /// keeps the size it was created with.
    pub fn get_or_create_pool(&mut self, template: &T, initial_capacity: usize) -> PoolResult<&mut PoolInstance<T>> {
        let id = template.id();
        let existing = self.registry.get(&id).copied();
        let key = match existing {
            Some(key) => key,
            None => self.create_pool(template, id.clone(), initial_capacity)?,
        };
        
        self.pools.get_mut(key).ok_or(PoolError::PoolNotFound { template: id })
    }
    
    /// Hand out an instance of `template`, creating its pool with the configured size if needed
    pub fn acquire(&mut self, template: &T, params: AcquireParams) -> PoolResult<EntityHandle> {
        let capacity = self.config.capacity_for(&template.id());
        self.acquire_with_capacity(template, params, capacity)
    }
    
    /// Hand out an instance of `template`, creating its pool with `initial_capacity_if_new` if needed
    pub fn acquire_with_capacity(
        &mut self,
        template: &T,
        params: AcquireParams,
        initial_capacity_if_new: usize,
    ) -> PoolResult<EntityHandle> {
        self.get_or_create_pool(template, initial_capacity_if_new)?
            .acquire(&params)
    }
    
    /// Create pools up front for every template not registered yet
    ///
    /// Returns the number of pools created. Stops at the first factory failure.
    pub fn prewarm<'a, I>(&mut self, templates: I) -> PoolResult<usize>
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut created = 0;
        for template in templates {
            let id = template.id();
            if !self.registry.contains_key(&id) {
                let capacity = self.config.capacity_for(&id);
                self.create_pool(template, id, capacity)?;
                created += 1;
            }
        }
        Ok(created)
    }
    
    fn create_pool(&mut self, template: &T, id: TemplateId, initial_capacity: usize) -> PoolResult<PoolKey> {
        let pool = PoolInstance::new(template.clone(), initial_capacity)?
            .with_growth_logging(self.config.log_growth);
        let owner = self.id;
        let key = self.pools.insert_with_key(|key| pool.with_owner(owner, key));
        
        log::info!("Created pool '{}' with {} instances", id, initial_capacity);
        self.registry.insert(id, key);
        Ok(key)
    }
}
