//! Shared query parameters for list endpoints.
//!
//! Every list endpoint accepts the same trio of parameters: a free-text
//! `search` term plus `sort`/`order` keys that are validated against a
//! per-resource whitelist. Anything outside the whitelist silently falls back
//! to the resource's default so ORDER BY clauses are always assembled from
//! known-safe column names.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ListParams {
    /// Free-text search term, matched case-insensitively
    pub search: Option<String>,
    /// Column to sort by, validated against the endpoint's whitelist
    pub sort: Option<String>,
    /// "asc" or "desc"; anything else falls back to the endpoint's default
    pub order: Option<String>,
}

impl ListParams {
    /// Trimmed search term, `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Resolve the sort column against `allowed`, falling back to `default`.
    /// Returns the whitelisted static name, never caller input.
    pub fn resolve_sort(&self, allowed: &[&'static str], default: &'static str) -> &'static str {
        match self.sort.as_deref().map(str::trim) {
            Some(requested) => allowed
                .iter()
                .copied()
                .find(|col| *col == requested)
                .unwrap_or(default),
            None => default,
        }
    }

    /// Resolve the sort direction, falling back to `default` for anything
    /// other than asc/desc.
    pub fn resolve_order(&self, default: SortOrder) -> SortOrder {
        match self.order.as_deref().map(str::trim) {
            Some(requested) if requested.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            Some(requested) if requested.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => default,
        }
    }
}
