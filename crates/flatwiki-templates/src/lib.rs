//! Template composition for flatwiki.
//!
//! Every response is rendered in two passes: a content template renders the
//! payload of one operation, then the base layout wraps that output. The
//! content pass escapes user data; its output is handed to the layout as
//! trusted markup and inserted verbatim.
//!
//! The template set is parsed once (from a directory or from the built-in
//! copies) and is read-only afterwards, so a single [`Templates`] value can be
//! shared by every request.

mod compositor;
mod content;
mod error;

pub use compositor::{EDIT_TEMPLATE, INDEX_TEMPLATE, LAYOUT_TEMPLATE, Templates, VIEW_TEMPLATE};
pub use content::{Content, EditData, IndexData, ViewData};
pub use error::TemplateError;
