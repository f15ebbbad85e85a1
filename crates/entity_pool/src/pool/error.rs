//! Pool error taxonomy

use super::{EntityHandle, TemplateId};

/// Errors surfaced by pool operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The template could not build an instance
    #[error("Template '{template}' failed to build an instance: {reason}")]
    FactoryFailure {
        /// Template whose factory failed
        template: TemplateId,
        /// Reason reported by the template
        reason: String,
    },
    
    /// No pool was ever created for the template
    #[error("No pool registered for template '{template}'")]
    PoolNotFound {
        /// The template that was looked up
        template: TemplateId,
    },
    
    /// The handle does not belong to any live pool slot
    #[error("Invalid handle {handle:?}: {reason}")]
    InvalidHandle {
        /// The problematic handle
        handle: EntityHandle,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_pool_error_display() {
        let error = PoolError::PoolNotFound {
            template: TemplateId::from("Unregistered"),
        };
        assert_eq!(error.to_string(), "No pool registered for template 'Unregistered'");
        
        let error = PoolError::FactoryFailure {
            template: TemplateId::from(3u64),
            reason: "out of meshes".to_string(),
        };
        assert!(error.to_string().contains("'#3' failed to build"));
    }
}
