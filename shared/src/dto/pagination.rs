//! Paginated list envelope shared by every admin list endpoint.
//!
//! The backend names the item array after the resource (`users`, `deposits`,
//! `logs`, ...). [`Paginated::from_value`] accepts either that key or a plain
//! `items` key, and derives `pages` from `total` when the server omits it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size used by the console list pages
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a server-side list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-indexed page number
    pub page: u32,
    /// Total page count (0 when the result set is empty)
    pub pages: u32,
    pub total: Option<u64>,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            pages: 0,
            total: None,
        }
    }
}

/// Why a list payload could not be read as an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    NotAnObject,
    MissingItems(&'static str),
    InvalidItems(String),
    MissingPageCount,
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvelopeError::NotAnObject => write!(f, "list response is not a JSON object"),
            EnvelopeError::MissingItems(key) => {
                write!(f, "list response has neither `{}` nor `items`", key)
            }
            EnvelopeError::InvalidItems(e) => write!(f, "list items are malformed: {}", e),
            EnvelopeError::MissingPageCount => {
                write!(f, "list response has neither `pages` nor `total`")
            }
        }
    }
}

impl std::error::Error for EnvelopeError {}

impl<T: DeserializeOwned> Paginated<T> {
    /// Read an envelope whose item array lives under `items_key`.
    ///
    /// `limit` is the page size that was requested; it is only used to derive
    /// the page count when the server reports `total` without `pages`.
    pub fn from_value(value: Value, items_key: &'static str, limit: u32) -> Result<Self, EnvelopeError> {
        let Value::Object(mut map) = value else {
            return Err(EnvelopeError::NotAnObject);
        };

        let raw_items = map
            .remove(items_key)
            .or_else(|| map.remove("items"))
            .ok_or(EnvelopeError::MissingItems(items_key))?;
        let items: Vec<T> = serde_json::from_value(raw_items)
            .map_err(|e| EnvelopeError::InvalidItems(e.to_string()))?;

        let total = map.get("total").and_then(Value::as_u64);
        let pages = match map.get("pages").and_then(Value::as_u64) {
            Some(pages) => u32::try_from(pages).unwrap_or(u32::MAX),
            None => match total {
                Some(total) => page_count(total, limit),
                None => return Err(EnvelopeError::MissingPageCount),
            },
        };
        let page = map
            .get("page")
            .and_then(Value::as_u64)
            .and_then(|p| u32::try_from(p).ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        Ok(Self {
            items,
            page,
            pages,
            total,
        })
    }
}

/// `ceil(total / limit)`; a zero limit is treated as one item per page
pub fn page_count(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Clamp a requested page into `[1, max(total_pages, 1)]`
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// Filters that know how to render themselves as ordered query pairs.
///
/// `None` values are skipped by the implementors, so the pairs returned are
/// exactly what goes on the wire.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Push `key=value` only when the option is set
pub fn push_opt<V: ToString>(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<V>) {
    if let Some(value) = value {
        pairs.push((key, value.to_string()));
    }
}
