//! Fixed-step projectile simulation driving the pools

use crate::config::SimulationConfig;
use crate::entities::SandboxTemplate;
use entity_pool::foundation::math::utils;
use entity_pool::foundation::math::Vec3;
use entity_pool::pool::PoolManagerStats;
use entity_pool::{AcquireParams, EntityHandle, PoolManager, PoolResult, ReleaseSchedule};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationStats {
    /// Bullets fired
    pub fired: u64,
    /// Bullets that left the arena and exploded
    pub exploded: u64,
    /// Instances handed back by timers
    pub timed_out: u64,
}

/// Turret firing volleys into an arena
pub struct Simulation {
    config: SimulationConfig,
    pools: PoolManager<SandboxTemplate>,
    schedule: ReleaseSchedule,
    bullet: SandboxTemplate,
    explosion: SandboxTemplate,
    in_flight: Vec<EntityHandle>,
    rng: StdRng,
    fire_cooldown: f32,
    stats: SimulationStats,
}

impl Simulation {
    /// Create a simulation that owns `pools`
    pub fn new(config: SimulationConfig, pools: PoolManager<SandboxTemplate>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            bullet: SandboxTemplate::bullet(config.bullet_speed),
            explosion: SandboxTemplate::explosion(),
            config,
            pools,
            schedule: ReleaseSchedule::new(),
            in_flight: Vec::new(),
            rng,
            fire_cooldown: 0.0,
            stats: SimulationStats::default(),
        }
    }
    
    /// Warm up every pool the simulation uses
    pub fn prewarm(&mut self) -> PoolResult<usize> {
        self.pools.prewarm([&self.bullet, &self.explosion])
    }
    
    /// Advance one fixed step
    pub fn step(&mut self) -> PoolResult<()> {
        let delta_time = self.config.timestep;
        
        self.fire_cooldown -= delta_time;
        if self.fire_cooldown <= 0.0 {
            self.fire_volley()?;
            self.fire_cooldown += self.config.fire_interval;
        }
        
        self.move_bullets(delta_time)?;
        self.stats.timed_out += self.schedule.tick(&mut self.pools, delta_time)? as u64;
        Ok(())
    }
    
    /// Run `ticks` fixed steps
    pub fn run(&mut self, ticks: u32) -> PoolResult<()> {
        for tick in 0..ticks {
            self.step()?;
            if tick % 60 == 59 {
                let pools = self.pools.stats();
                log::info!(
                    "tick {}: {} active / {} pooled ({:.0}% used), {} growths",
                    tick + 1,
                    pools.total_active,
                    pools.total_capacity,
                    pools.utilization() * 100.0,
                    pools.total_growths,
                );
            }
        }
        Ok(())
    }
    
    /// Return every instance to its pool
    pub fn shutdown(&mut self) -> usize {
        self.schedule.clear();
        self.in_flight.clear();
        self.pools.clear_all_pools()
    }
    
    /// Simulation counters
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }
    
    /// Pool counters
    pub fn pool_stats(&self) -> PoolManagerStats {
        self.pools.stats()
    }
    
    /// Bullets currently tracked as flying
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
    
    fn fire_volley(&mut self) -> PoolResult<()> {
        for _ in 0..self.config.volley_size {
            let spread = self.config.spread_degrees.abs();
            let yaw = if spread > 0.0 { self.rng.gen_range(-spread..=spread) } else { 0.0 };
            let params = AcquireParams::at(Vec3::zeros()).with_orientation(utils::yaw(yaw));
            
            let handle = self.pools.acquire(&self.bullet, params)?;
            self.schedule.schedule(handle, self.config.bullet_lifetime);
            self.in_flight.push(handle);
            self.stats.fired += 1;
        }
        Ok(())
    }
    
    fn move_bullets(&mut self, delta_time: f32) -> PoolResult<()> {
        let radius = self.config.arena_radius;
        let mut index = 0;
        
        while index < self.in_flight.len() {
            let handle = self.in_flight[index];
            if !self.pools.is_active(handle)? {
                // Timed out or cleared since the last step
                self.in_flight.swap_remove(index);
                continue;
            }
            
            let bullet = self.pools.get_mut(handle)?;
            bullet.advance(delta_time);
            let position = bullet.transform.position;
            
            if position.norm() > radius {
                self.pools.release(handle)?;
                self.schedule.cancel(handle);
                self.in_flight.swap_remove(index);
                
                let blast = self.pools.acquire(&self.explosion, AcquireParams::at(position))?;
                self.schedule.schedule(blast, self.config.explosion_duration);
                self.stats.exploded += 1;
                continue;
            }
            index += 1;
        }
        Ok(())
    }
}
