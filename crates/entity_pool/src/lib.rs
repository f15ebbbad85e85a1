//! # Entity Pool
//!
//! Template-keyed object pools for recycling transient simulation entities such as
//! projectiles, effects and enemies.
//!
//! ## Features
//!
//! - **Template Registry**: One pool per template id, created on first use
//! - **First-Fit Reuse**: Inactive instances are handed out in insertion order
//! - **Lazy Growth**: Exhausted pools grow by exactly one instance
//! - **Bulk Clear**: Deactivate one pool or every pool at once
//! - **Timed Release**: Hand instances back after a duration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use entity_pool::prelude::*;
//!
//! #[derive(Clone)]
//! struct BulletTemplate;
//!
//! struct Bullet {
//!     transform: Transform,
//!     visible: bool,
//! }
//!
//! impl PooledInstance for Bullet {
//!     fn set_position(&mut self, position: Vec3) { self.transform.position = position; }
//!     fn set_orientation(&mut self, orientation: Quat) { self.transform.rotation = orientation; }
//!     fn set_active(&mut self, active: bool) { self.visible = active; }
//!     fn is_active(&self) -> bool { self.visible }
//! }
//!
//! impl Template for BulletTemplate {
//!     type Instance = Bullet;
//!
//!     fn id(&self) -> TemplateId {
//!         TemplateId::from("bullet")
//!     }
//!
//!     fn build(&self, position: Vec3, orientation: Quat) -> Result<Bullet, BuildError> {
//!         Ok(Bullet { transform: Transform::from_position_rotation(position, orientation), visible: true })
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut pools = PoolManager::new(PoolConfig::default());
//!     let bullet = pools.acquire(&BulletTemplate, AcquireParams::at(Vec3::new(0.0, 1.0, 0.0)))?;
//!     pools.release(bullet)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod pool;

pub use pool::{
    AcquireParams, BuildError, EntityHandle, PoolError, PoolInstance, PoolManager, PoolResult,
    PooledInstance, ReleaseSchedule, Template, TemplateId,
};

/// Common imports for pool users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, PoolConfig},
        foundation::math::{Quat, Transform, Vec3},
        pool::{
            AcquireParams, BuildError, EntityHandle, PoolError, PoolManager, PoolResult,
            PooledInstance, ReleaseSchedule, Template, TemplateId,
        },
    };
}
