// Copyright 2025 the Penumbra Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Construction-time options for a
/// [`ComponentDispatcher`](crate::ComponentDispatcher).
///
/// Deserializable from host-provided configuration; unrecognized keys are
/// retained in [`Self::extra`] and have no effect on dispatch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Emit informational diagnostics at debug level. Warnings and errors are
    /// emitted regardless.
    pub debug: bool,
    /// Default settling delay before a request's search begins, in
    /// milliseconds. A coarse fixed wait for the host to finish attaching
    /// shadow trees, not a readiness poll. Overridable per request.
    pub search_delay_ms: u64,
    /// Unrecognized configuration, kept as provided.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            debug: false,
            search_delay_ms: 300,
            extra: BTreeMap::new(),
        }
    }
}

impl DispatcherConfig {
    /// The default settling delay as a [`Duration`].
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DispatcherConfig::default();
        assert!(!config.debug);
        assert_eq!(config.search_delay(), Duration::from_millis(300));
        assert!(config.extra.is_empty());
    }

    #[test]
    fn unrecognized_options_are_retained() {
        let config: DispatcherConfig =
            serde_json::from_str(r#"{"debug": true, "theme": "dark", "retries": 3}"#).unwrap();
        assert!(config.debug);
        assert_eq!(config.search_delay_ms, 300, "missing field keeps default");
        assert_eq!(config.extra["theme"], serde_json::json!("dark"));
        assert_eq!(config.extra["retries"], serde_json::json!(3));
    }
}
