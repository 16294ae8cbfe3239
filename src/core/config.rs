//! Configuration for the recognition algorithms.
//!
//! Defaults come from the environment:
//!
//! - `CRUSHING_TRACE`: when set, every crushing loop logs its per-iteration
//!   state through `tracing::debug!`.
//!
//! # Examples
//!
//! ```rust
//! use crushing::core::config::{RecognitionConfig, RecognitionConfigBuilder};
//!
//! let config = RecognitionConfigBuilder::default()
//!     .trace(true)
//!     .subdivide_multi_vertex(false)
//!     .build()
//!     .unwrap();
//! assert!(config.trace);
//! assert!(!config.subdivide_multi_vertex);
//! ```

/// Environment variable enabling per-iteration traces.
pub const TRACE_ENV_VAR: &str = "CRUSHING_TRACE";

/// Returns `true` if [`TRACE_ENV_VAR`] is set.
#[must_use]
pub fn trace_enabled_from_env() -> bool {
    std::env::var_os(TRACE_ENV_VAR).is_some()
}

/// Tunables shared by every recognizer.
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq)]
#[builder(default)]
pub struct RecognitionConfig {
    /// Log per-iteration diagnostics of the crushing loops.
    pub trace: bool,
    /// Before each LP-driven search on a multi-vertex triangulation, subdivide
    /// and re-simplify in the hope of reaching a single vertex.
    pub subdivide_multi_vertex: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            trace: false,
            subdivide_multi_vertex: true,
        }
    }
}

impl RecognitionConfig {
    /// Default configuration with tracing taken from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            trace: trace_enabled_from_env(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RecognitionConfig::default();
        assert!(!config.trace);
        assert!(config.subdivide_multi_vertex);
    }

    #[test]
    fn test_builder_overrides_single_field() {
        let config = RecognitionConfigBuilder::default()
            .subdivide_multi_vertex(false)
            .build()
            .unwrap();
        assert!(!config.subdivide_multi_vertex);
        assert!(!config.trace);
    }

    #[test]
    fn test_from_env_keeps_other_defaults() {
        let config = RecognitionConfig::from_env();
        assert_eq!(config.trace, trace_enabled_from_env());
        assert!(config.subdivide_multi_vertex);
    }
}
