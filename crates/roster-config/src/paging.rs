//! Page sizes used by the entity screens.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_page_size() -> u32 {
    5
}

const fn default_lookup_size() -> u32 {
    100
}

const fn default_bulk_size() -> u32 {
    1000
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct PagingConfig {
    /// Rows per page on paginated screens.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Rows fetched to fill a reference picker.
    #[serde(default = "default_lookup_size")]
    pub lookup_size: u32,

    /// Rows fetched by screens that search a client-held set.
    #[serde(default = "default_bulk_size")]
    pub bulk_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            lookup_size: default_lookup_size(),
            bulk_size: default_bulk_size(),
        }
    }
}

impl PagingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("paging.page_size", self.page_size),
            ("paging.lookup_size", self.lookup_size),
            ("paging.bulk_size", self.bulk_size),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }
}
