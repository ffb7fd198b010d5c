//! Presentation payloads for content templates.

use serde::Serialize;

use crate::compositor::{EDIT_TEMPLATE, INDEX_TEMPLATE, VIEW_TEMPLATE};

/// Payload for the page index.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexData {
    /// Titles of all existing pages.
    pub items: Vec<String>,
}

/// Payload for viewing a page.
#[derive(Debug, Clone, Serialize)]
pub struct ViewData {
    pub title: String,
    pub body: String,
}

/// Payload for the edit form.
#[derive(Debug, Clone, Serialize)]
pub struct EditData {
    pub title: String,
    /// Current body, empty for a new page.
    pub body: String,
    /// True when the page does not exist yet.
    pub is_new: bool,
}

/// Content of a response, one variant per content template.
#[derive(Debug, Clone)]
pub enum Content {
    Index(IndexData),
    View(ViewData),
    Edit(EditData),
}

impl Content {
    /// Name of the content template that renders this payload.
    #[must_use]
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::Index(_) => INDEX_TEMPLATE,
            Self::View(_) => VIEW_TEMPLATE,
            Self::Edit(_) => EDIT_TEMPLATE,
        }
    }
}
