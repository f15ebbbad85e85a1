//! Configuration system
//!
//! Pool sizing is read once at startup from TOML or RON, chosen by file extension.

use std::collections::BTreeMap;

pub use serde::{Serialize, Deserialize};

use crate::pool::TemplateId;

/// Capacity used for a new pool when nothing else is configured
pub const DEFAULT_INITIAL_CAPACITY: usize = 200;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;
        
        Self::from_str_with_format(&contents, path)
    }
    
    /// Parse configuration text, picking the format from `path`'s extension
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }
    
    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };
        
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),
    
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
    
    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    
    /// A value failed validation
    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        /// Field that failed validation
        field: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Pool sizing and diagnostics settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Capacity for pools created without an explicit size
    pub default_initial_capacity: usize,
    
    /// Emit a debug log line every time a pool grows past its warm-up size
    pub log_growth: bool,
    
    /// Per-template capacity overrides, keyed by [`TemplateId::config_key`]
    pub capacities: BTreeMap<String, usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            default_initial_capacity: DEFAULT_INITIAL_CAPACITY,
            log_growth: true,
            capacities: BTreeMap::new(),
        }
    }
}

impl Config for PoolConfig {}

impl PoolConfig {
    /// Set the capacity override for one template
    pub fn with_capacity(mut self, template: &TemplateId, capacity: usize) -> Self {
        self.capacities.insert(template.config_key(), capacity);
        self
    }
    
    /// Initial capacity a new pool for `template` should warm up with
    pub fn capacity_for(&self, template: &TemplateId) -> usize {
        self.capacities
            .get(&template.config_key())
            .copied()
            .unwrap_or(self.default_initial_capacity)
    }
    
    /// Reject override keys that no template id could ever display as
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(key) = self.capacities.keys().find(|key| key.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: format!("capacities.{key:?}"),
                reason: "template key must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_default_capacity_is_200() {
        let config = PoolConfig::default();
        assert_eq!(config.default_initial_capacity, 200);
        assert_eq!(config.capacity_for(&TemplateId::from("bullet")), 200);
    }
    
    #[test]
    fn test_capacity_override_by_name_and_index() {
        let config = PoolConfig::default()
            .with_capacity(&TemplateId::from("bullet"), 64)
            .with_capacity(&TemplateId::from(7u64), 3);
        
        assert_eq!(config.capacity_for(&TemplateId::from("bullet")), 64);
        assert_eq!(config.capacity_for(&TemplateId::from(7u64)), 3);
        assert_eq!(config.capacity_for(&TemplateId::from("explosion")), 200);
    }
    
    #[test]
    fn test_index_override_does_not_leak_to_hash_prefixed_name() {
        let config = PoolConfig::default().with_capacity(&TemplateId::from(7u64), 3);
        
        assert_eq!(config.capacity_for(&TemplateId::from(7u64)), 3);
        assert_eq!(config.capacity_for(&TemplateId::from("#7")), DEFAULT_INITIAL_CAPACITY);
        
        let config = config.with_capacity(&TemplateId::from("#7"), 9);
        assert_eq!(config.capacities.get("##7"), Some(&9));
        assert_eq!(config.capacity_for(&TemplateId::from(7u64)), 3);
    }
    
    #[test]
    fn test_parse_toml() {
        let text = r#"
            default_initial_capacity = 16
            log_growth = false

            [capacities]
            bullet = 64
        "#;
        
        let config = PoolConfig::from_str_with_format(text, "pools.toml").unwrap();
        assert_eq!(config.default_initial_capacity, 16);
        assert!(!config.log_growth);
        assert_eq!(config.capacity_for(&TemplateId::from("bullet")), 64);
    }
    
    #[test]
    fn test_parse_ron_with_missing_fields_uses_defaults() {
        let text = r#"(capacities: {"enemy": 12})"#;
        
        let config = PoolConfig::from_str_with_format(text, "pools.ron").unwrap();
        assert_eq!(config.default_initial_capacity, DEFAULT_INITIAL_CAPACITY);
        assert!(config.log_growth);
        assert_eq!(config.capacity_for(&TemplateId::from("enemy")), 12);
    }
    
    #[test]
    fn test_unsupported_format() {
        let result = PoolConfig::from_str_with_format("", "pools.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
    
    #[test]
    fn test_save_and_reload_toml() {
        let path = std::env::temp_dir().join(format!("entity_pool_config_{}.toml", std::process::id()));
        let path = path.to_string_lossy().to_string();
        
        let config = PoolConfig::default().with_capacity(&TemplateId::from("spark"), 5);
        config.save_to_file(&path).unwrap();
        
        let loaded = PoolConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
    
    #[test]
    fn test_validate_rejects_blank_key() {
        let mut config = PoolConfig::default();
        config.capacities.insert("  ".to_string(), 4);
        
        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("must not be blank"));
    }
}
