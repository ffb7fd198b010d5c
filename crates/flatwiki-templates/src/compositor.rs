//! Two-pass rendering: content template, then base layout.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use minijinja::{Environment, ErrorKind, UndefinedBehavior, Value, context};
use serde::Serialize;

use crate::content::Content;
use crate::error::TemplateError;

/// Base layout wrapping every page.
pub const LAYOUT_TEMPLATE: &str = "base.html";
/// Page index.
pub const INDEX_TEMPLATE: &str = "index.html";
/// Single page view.
pub const VIEW_TEMPLATE: &str = "view.html";
/// Edit form.
pub const EDIT_TEMPLATE: &str = "edit.html";

/// Templates every deployment is expected to provide.
const REQUIRED: [&str; 4] = [LAYOUT_TEMPLATE, INDEX_TEMPLATE, VIEW_TEMPLATE, EDIT_TEMPLATE];

/// Built-in template set compiled into the binary.
const EMBEDDED: [(&str, &str); 4] = [
    (LAYOUT_TEMPLATE, include_str!("../templates/base.html")),
    (INDEX_TEMPLATE, include_str!("../templates/index.html")),
    (VIEW_TEMPLATE, include_str!("../templates/view.html")),
    (EDIT_TEMPLATE, include_str!("../templates/edit.html")),
];

/// Immutable, parsed template set.
///
/// Cloning is cheap: clones share the same parsed environment.
#[derive(Clone)]
pub struct Templates {
    env: Arc<Environment<'static>>,
}

impl fmt::Debug for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

impl Templates {
    /// Built-in templates.
    ///
    /// # Panics
    ///
    /// Panics if a built-in template fails to parse, which the crate's tests
    /// rule out.
    #[must_use]
    pub fn embedded() -> Self {
        let mut env = new_environment();
        for (name, source) in EMBEDDED {
            env.add_template(name, source)
                .expect("built-in template must parse");
        }
        Self { env: Arc::new(env) }
    }

    /// Parse every `*.html` file directly inside `dir`.
    ///
    /// Templates are named by file name (e.g., `base.html`). The layout is
    /// mandatory; a missing content template is only logged and rendering it
    /// fails later with [`TemplateError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingLayout`] if `dir` does not exist or has
    /// no `base.html`, or an error if a file cannot be read or does not parse.
    pub fn from_dir(dir: &Path) -> Result<Self, TemplateError> {
        let pattern = format!(
            "{}/*.html",
            glob::Pattern::escape(&dir.to_string_lossy())
        );

        let mut sources = Vec::new();
        for entry in glob::glob(&pattern)? {
            let path = entry.map_err(|e| TemplateError::Io {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };
            let source = std::fs::read_to_string(&path)
                .map_err(|source| TemplateError::Io { path: path.clone(), source })?;
            sources.push((name, source));
        }

        let templates = Self::from_sources(sources)?;
        if !templates.has_template(LAYOUT_TEMPLATE) {
            return Err(TemplateError::MissingLayout {
                dir: dir.to_path_buf(),
            });
        }
        for name in REQUIRED {
            if !templates.has_template(name) {
                tracing::warn!(dir = %dir.display(), template = name, "Template missing");
            }
        }
        tracing::debug!(dir = %dir.display(), "Loaded templates");
        Ok(templates)
    }

    /// Build a template set from `(name, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] if a source does not parse.
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = new_environment();
        for (name, source) in sources {
            let name: String = name.into();
            let source: String = source.into();
            env.add_template_owned(name.clone(), source)
                .map_err(|source| TemplateError::Syntax { name, source })?;
        }
        Ok(Self { env: Arc::new(env) })
    }

    /// Check whether a template with `name` is loaded.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Render `content` inside the layout under the document title `title`.
    ///
    /// # Errors
    ///
    /// See [`Templates::render_named`].
    pub fn render(&self, title: &str, content: &Content) -> Result<String, TemplateError> {
        let name = content.template_name();
        match content {
            Content::Index(data) => self.render_named(title, name, data),
            Content::View(data) => self.render_named(title, name, data),
            Content::Edit(data) => self.render_named(title, name, data),
        }
    }

    /// Render the content template `name` with `ctx`, then the layout.
    ///
    /// Both templates are resolved before anything is rendered, and the
    /// whole document is produced in memory, so a failure never leaves a
    /// partial document behind.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::NotFound`] if the layout or the content
    /// template is missing, or [`TemplateError::Render`] if either pass fails.
    pub fn render_named<S: Serialize>(
        &self,
        title: &str,
        name: &str,
        ctx: S,
    ) -> Result<String, TemplateError> {
        let layout = self.lookup(LAYOUT_TEMPLATE)?;
        let template = self.lookup(name)?;

        let content = template.render(ctx).map_err(|source| TemplateError::Render {
            name: name.to_owned(),
            source,
        })?;

        layout
            .render(context! {
                title => title,
                content => Value::from_safe_string(content),
            })
            .map_err(|source| TemplateError::Render {
                name: LAYOUT_TEMPLATE.to_owned(),
                source,
            })
    }

    fn lookup(&self, name: &str) -> Result<minijinja::Template<'_, '_>, TemplateError> {
        self.env.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound(name.to_owned())
            } else {
                TemplateError::Render {
                    name: name.to_owned(),
                    source,
                }
            }
        })
    }
}

/// Environment shared by all template sets.
///
/// `.html` templates are auto-escaped; undefined variables are errors so a
/// payload that does not fit its template fails instead of rendering blanks.
fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}
