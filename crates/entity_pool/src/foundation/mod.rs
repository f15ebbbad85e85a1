//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the pool:
//! - Math types for placing pooled instances
//! - Logging utilities

pub mod math;
pub mod logging;
