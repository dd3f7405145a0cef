//! Page categories for tab pages.
//!
//! Every page rendered inside a tab carries an HTML `id` of the form
//! `{entity}--{category}` (e.g. `"a001_product--list"`) and a
//! `data-page-category` attribute with one of the constants below.

/// Table of records with filters.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail view or edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Login, registration and other session pages.
pub const PAGE_CAT_SYSTEM: &str = "system";

pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, category)) if !entity.is_empty() && !category.is_empty())
}
