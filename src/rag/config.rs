//! Retrieval service configuration

use serde::{Deserialize, Serialize};

use super::error::{Result, RetrievalError};

/// Returned as the sole passage when a search legitimately finds nothing
pub const DEFAULT_NO_RESULTS_MARKER: &str = "No relevant documents found.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Passages returned when the caller does not choose k
    pub default_k: usize,

    /// Placeholder passage for an empty result
    pub no_results_marker: String,

    /// Pages per embedder call during build
    pub batch_size: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_k: 3,
            no_results_marker: DEFAULT_NO_RESULTS_MARKER.to_string(),
            batch_size: 32,
        }
    }
}

impl RetrievalConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RetrievalError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_k == 0 {
            return Err(RetrievalError::InvalidConfig(
                "default_k must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(RetrievalError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builder: set default k
    pub fn with_default_k(mut self, k: usize) -> Self {
        self.default_k = k;
        self
    }

    /// Builder: set the empty-result placeholder
    pub fn with_no_results_marker(mut self, marker: impl Into<String>) -> Self {
        self.no_results_marker = marker.into();
        self
    }

    /// Builder: set build batch size
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RetrievalConfig::default();
        assert_eq!(config.default_k, 3);
        assert_eq!(config.no_results_marker, "No relevant documents found.");
        assert_eq!(config.batch_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_partial_json() {
        let config = RetrievalConfig::from_json(r#"{"default_k": 5}"#).unwrap();
        assert_eq!(config.default_k, 5);
        assert_eq!(config.batch_size, 32);
    }

    #[test]
    fn test_from_json_rejects_zero_k() {
        let err = RetrievalConfig::from_json(r#"{"default_k": 0}"#).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(RetrievalConfig::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_builders() {
        let config = RetrievalConfig::default()
            .with_default_k(1)
            .with_batch_size(4)
            .with_no_results_marker("nothing here");
        assert_eq!(config.default_k, 1);
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.no_results_marker, "nothing here");
    }

    #[test]
    fn test_zero_batch_size_invalid() {
        let config = RetrievalConfig::default().with_batch_size(0);
        assert!(config.validate().is_err());
    }
}
