//! Page category constants.
//!
//! Every page rendered inside a tab declares an HTML `id` of the form
//! `{entity}--{category}` (e.g. `"a004_inventory--list"`) and a
//! `data-page-category` taken from the constants below.

/// Records table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record view or edit form.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Workflow page that is neither a list nor a record (assignment board, chat).
pub const PAGE_CAT_WORKSPACE: &str = "workspace";

/// Login and other pages outside the tab shell.
pub const PAGE_CAT_SYSTEM: &str = "system";
