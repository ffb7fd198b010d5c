//! CLI command implementations.

pub(crate) mod pages;
pub(crate) mod serve;

pub(crate) use pages::PagesArgs;
pub(crate) use serve::ServeArgs;
