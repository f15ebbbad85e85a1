//! Entity pooling
//!
//! Keeps a reservoir of pre-built instances per template and recycles inactive
//! ones instead of building and dropping transient entities every frame.
//!
//! # Architecture
//!
//! ```text
//! Gameplay → PoolManager ──(TemplateId)──→ PoolInstance → slots [instance, active, generation]
//!    |            |                              |
//! acquire()   find or create pool          first inactive slot,
//! release()   resolve handle's pool        or build one more
//! ```

pub mod template;
pub mod handle;
pub mod error;
pub mod instance;
pub mod manager;
pub mod stats;
pub mod auto_release;

#[cfg(test)]
pub(crate) mod test_support;

pub use template::{BuildError, PooledInstance, Template, TemplateId};
pub use handle::{AcquireParams, EntityHandle, PoolKey};
pub use error::{PoolError, PoolResult};
pub use instance::PoolInstance;
pub use manager::PoolManager;
pub use stats::{PoolManagerStats, PoolStats};
pub use auto_release::{ReleaseSchedule, DEFAULT_RELEASE_DURATION};
