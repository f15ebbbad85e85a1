//! Templates and the instances they build
//!
//! A template is the immutable "what to build" side of a pool. Its identity is an
//! explicit key chosen by the caller, never an engine-assigned object id.

use crate::foundation::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, user-defined identity of a template
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateId {
    /// Numeric key, displayed as `#<n>`
    Index(u64),
    /// Named key, displayed verbatim
    Name(String),
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl TemplateId {
    /// Key used for this id in configuration tables
    ///
    /// Numeric ids are written `#<n>`. A name that itself starts with `#` gets an
    /// extra leading `#`, so `Name("#7")` maps to `##7` and never to `Index(7)`'s key.
    pub fn config_key(&self) -> String {
        match self {
            Self::Index(index) => format!("#{index}"),
            Self::Name(name) if name.starts_with('#') => format!("#{name}"),
            Self::Name(name) => name.clone(),
        }
    }
}

impl From<u64> for TemplateId {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for TemplateId {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

/// Reason a template could not build an instance
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct BuildError {
    reason: String,
}

impl BuildError {
    /// Create a build error with a human-readable reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
    
    /// The reason given by the template
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A concrete instance that a pool can place, show and hide
///
/// The pool owns the activity bookkeeping. `set_active` is called to mirror that
/// state onto whatever the instance drives (renderer visibility, audio, AI), and
/// the pool never reads `is_active` back to decide reuse.
pub trait PooledInstance {
    /// Move the instance to a world position
    fn set_position(&mut self, position: Vec3);
    
    /// Rotate the instance to a world orientation
    fn set_orientation(&mut self, orientation: Quat);
    
    /// Enable or disable the instance
    fn set_active(&mut self, active: bool);
    
    /// Whether the instance currently considers itself enabled
    fn is_active(&self) -> bool;
}

/// Immutable prototype plus the factory that builds instances from it
pub trait Template {
    /// Instance type produced by [`Template::build`]
    type Instance: PooledInstance;
    
    /// Key that identifies this template's pool
    fn id(&self) -> TemplateId;
    
    /// Build a new instance placed at `position` with `orientation`
    ///
    /// Must either return a usable instance or fail; there is no "empty" result.
    fn build(&self, position: Vec3, orientation: Quat) -> Result<Self::Instance, BuildError>;
}
