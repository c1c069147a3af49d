//! The paged list envelope returned by `GET /api/<resource>`.

use serde::{Deserialize, Serialize};

/// One page of entities, in the order the server returned them.
///
/// Only `content` and `totalPages` are relied upon; the remaining fields are
/// kept when present so they can be shown by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default = "default_total_pages")]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

const fn default_total_pages() -> u32 {
    1
}

impl<T> Page<T> {
    /// Page count as seen by pagination controls. Never below 1, even when
    /// the server reports 0 pages for an empty collection.
    #[must_use]
    pub fn page_count(&self) -> u32 {
        self.total_pages.max(1)
    }

    /// Highest valid page index.
    #[must_use]
    pub fn last_index(&self) -> u32 {
        self.page_count() - 1
    }
}
