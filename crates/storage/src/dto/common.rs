use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::StorageError;

#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("pageSize must be between 1 and 100".to_string());
        }
        if self.checked_offset().is_none() {
            return Err("page is out of range".to_string());
        }
        Ok(())
    }

    fn checked_offset(&self) -> Option<u32> {
        self.page.checked_sub(1)?.checked_mul(self.page_size)
    }

    /// Rows to skip. Saturates for pages that fail [`Self::validate`].
    pub fn offset(&self) -> u32 {
        self.checked_offset().unwrap_or(u32::MAX)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

/// Query keys a list endpoint takes on top of `page` and `pageSize`.
pub trait ListFilter {
    const KEYS: &'static [&'static str];
}

const PAGINATION_KEYS: &[&str] = &["page", "pageSize"];

/// Fails on the first query key that is neither a pagination key nor one of
/// the filter's keys.
pub fn check_list_keys<'k, F: ListFilter>(
    keys: impl IntoIterator<Item = &'k str>,
) -> Result<(), StorageError> {
    match keys
        .into_iter()
        .find(|key| !PAGINATION_KEYS.contains(key) && !F::KEYS.contains(key))
    {
        Some(key) => Err(StorageError::validation(format!("unknown filter '{}'", key))),
        None => Ok(()),
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(page: u32, page_size: u32, total_items: i64) -> Self {
        let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;
        Self {
            page,
            page_size,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, params: &PaginationParams, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(params.page, params.page_size, total_items),
        }
    }
}
