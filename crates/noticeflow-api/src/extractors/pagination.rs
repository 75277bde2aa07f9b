//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

/// Query parameters for paginated endpoints. The page size is fixed by
/// configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PaginationParams {
    /// The requested page, never below 1.
    pub fn page(self) -> u64 {
        self.page.max(1)
    }
}
