//! Notification workflow configuration.

use serde::{Deserialize, Serialize};

/// Controls how strictly the review endpoint guards status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// When `true`, review actions are checked against the current status
    /// and written with a compare-and-set. When `false`, approve, back and
    /// validate apply from any status.
    #[serde(default)]
    pub enforce_transitions: bool,
    /// Items per page on notification listings.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            enforce_transitions: false,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u64 {
    10
}
