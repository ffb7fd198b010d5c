//! Page identity and content.

use std::fmt;
use std::str::FromStr;

/// Validated page title.
///
/// A page title is both the display name and the storage key, so it is
/// restricted to ASCII letters and digits. Anything else (separators, dots,
/// spaces, punctuation) is rejected at construction, which keeps every
/// derived filename inside the storage root.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(String);

/// Error returned when a string is not a valid [`PageId`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidPageId(String);

impl InvalidPageId {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvalidPageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid page title {:?}: only ASCII letters and digits are allowed",
            self.0
        )
    }
}

impl std::error::Error for InvalidPageId {}

impl PageId {
    /// Validate `title` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageId`] if `title` is empty or contains anything
    /// other than ASCII alphanumerics.
    pub fn new(title: impl Into<String>) -> Result<Self, InvalidPageId> {
        let title = title.into();
        if Self::is_valid(&title) {
            Ok(Self(title))
        } else {
            Err(InvalidPageId(title))
        }
    }

    /// Check whether `title` matches `[a-zA-Z0-9]+`.
    #[must_use]
    pub fn is_valid(title: &str) -> bool {
        !title.is_empty() && title.bytes().all(|b| b.is_ascii_alphanumeric())
    }

    /// Borrow the title.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the title.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for PageId {
    type Err = InvalidPageId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page: a title and its raw body bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Page title (storage key).
    pub title: PageId,
    /// Raw page content.
    pub body: Vec<u8>,
}

impl Page {
    /// Create a page.
    #[must_use]
    pub fn new(title: PageId, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// Create an empty page, used as the starting point of the edit form.
    #[must_use]
    pub fn blank(title: PageId) -> Self {
        Self {
            title,
            body: Vec::new(),
        }
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
