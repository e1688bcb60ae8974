use chrono::{DateTime, Utc};

/// Default page size for content listings.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Upper bound on a requested page size.
pub const MAX_PER_PAGE: u32 = 100;

/// A persisted content row.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub thumb: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A submitted field value, before any rule has looked at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    /// Sent, but not as a string (number, boolean, array or object).
    NotText,
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Unvalidated create payload, as received from a caller.
#[derive(Debug, Clone, Default)]
pub struct ContentDraft {
    pub title: Option<FieldInput>,
    pub description: Option<FieldInput>,
    pub subtitle: Option<FieldInput>,
    pub thumb: Option<FieldInput>,
    pub source: Option<FieldInput>,
}

/// Unvalidated update payload.
///
/// The outer `Option` records whether the key was sent at all, the inner one
/// whether it was sent as `null`.
#[derive(Debug, Clone, Default)]
pub struct ContentPatch {
    pub title: Option<Option<FieldInput>>,
    pub description: Option<Option<FieldInput>>,
    pub subtitle: Option<Option<FieldInput>>,
    pub thumb: Option<Option<FieldInput>>,
    pub source: Option<Option<FieldInput>>,
}

/// Validated row for insertion. Timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContent {
    pub title: String,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub thumb: Option<String>,
    pub source: String,
}

/// Validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub subtitle: Option<Option<String>>,
    pub thumb: Option<Option<String>>,
    pub source: Option<String>,
}

impl ContentChanges {
    /// True when no column would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.subtitle.is_none()
            && self.thumb.is_none()
            && self.source.is_none()
    }

    /// Apply the changes to an in-memory row.
    pub fn apply_to(&self, content: &mut Content) {
        if let Some(title) = &self.title {
            content.title = title.clone();
        }
        if let Some(description) = &self.description {
            content.description = description.clone();
        }
        if let Some(subtitle) = &self.subtitle {
            content.subtitle = subtitle.clone();
        }
        if let Some(thumb) = &self.thumb {
            content.thumb = thumb.clone();
        }
        if let Some(source) = &self.source {
            content.source = source.clone();
        }
    }
}

/// Page selection for listings. Construct with [`PageRequest::new`] to clamp inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub per_page: u32,
    pub page: u32,
}

impl PageRequest {
    /// Out-of-range values fall back to sane defaults: a missing or zero
    /// `per_page` becomes [`DEFAULT_PER_PAGE`], larger than [`MAX_PER_PAGE`]
    /// is capped, and pages are 1-based.
    pub fn new(per_page: Option<u32>, page: Option<u32>) -> Self {
        let per_page = match per_page {
            None | Some(0) => DEFAULT_PER_PAGE,
            Some(n) => n.min(MAX_PER_PAGE),
        };
        let page = page.unwrap_or(1).max(1);
        Self { per_page, page }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the totals needed to describe the rest.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
}

impl<T> Page<T> {
    /// Last page number; never less than 1, even for an empty table.
    pub fn last_page(&self) -> u32 {
        let per_page = u64::from(self.per_page.max(1));
        let pages = self.total.div_ceil(per_page).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based position of the first item on this page.
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.offset() + 1)
        }
    }

    /// 1-based position of the last item on this page.
    pub fn to(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.offset() + self.items.len() as u64)
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
        }
    }

    fn offset(&self) -> u64 {
        u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page)
    }
}
