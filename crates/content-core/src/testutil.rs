//! Test utilities: an in-memory [`ContentStore`].
//!
//! Shares its rows through `Arc<Mutex<_>>`, so clones handed to a service
//! stay observable from the test body.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::error::AppError;
use crate::models::{Content, ContentChanges, NewContent, Page, PageRequest};
use crate::traits::ContentStore;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Content>,
    next_id: i64,
    fail_next: Option<AppError>,
}

/// In-memory store with auto-incrementing ids starting at 1.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next store call return `error`.
    pub fn fail_next(&self, error: AppError) {
        self.inner.lock().unwrap().fail_next = Some(error);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().rows.len()
    }

    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> Result<T, AppError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(e) = inner.fail_next.take() {
            return Err(e);
        }
        Ok(f(&mut inner))
    }
}

impl ContentStore for InMemoryStore {
    async fn insert(&self, content: &NewContent) -> Result<Content, AppError> {
        self.with_inner(|inner| {
            inner.next_id += 1;
            let now = Utc::now();
            let row = Content {
                id: inner.next_id,
                title: content.title.clone(),
                description: content.description.clone(),
                subtitle: content.subtitle.clone(),
                thumb: content.thumb.clone(),
                source: content.source.clone(),
                created_at: now,
                updated_at: now,
            };
            inner.rows.insert(row.id, row.clone());
            row
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Content>, AppError> {
        self.with_inner(|inner| inner.rows.get(&id).cloned())
    }

    async fn update_by_id(
        &self,
        id: i64,
        changes: &ContentChanges,
    ) -> Result<Option<Content>, AppError> {
        self.with_inner(|inner| {
            inner.rows.get_mut(&id).map(|row| {
                changes.apply_to(row);
                row.updated_at = Utc::now();
                row.clone()
            })
        })
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        self.with_inner(|inner| inner.rows.remove(&id).is_some())
    }

    async fn list_paginated(&self, page: PageRequest) -> Result<Page<Content>, AppError> {
        self.with_inner(|inner| {
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            Page {
                items: inner
                    .rows
                    .values()
                    .skip(offset)
                    .take(page.per_page as usize)
                    .cloned()
                    .collect(),
                total: inner.rows.len() as u64,
                per_page: page.per_page,
                current_page: page.page,
            }
        })
    }

    async fn list_all(&self) -> Result<Vec<Content>, AppError> {
        self.with_inner(|inner| inner.rows.values().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.with_inner(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_content(title: &str) -> NewContent {
        NewContent {
            title: title.into(),
            description: None,
            subtitle: None,
            thumb: None,
            source: "https://example.com".into(),
        }
    }

    #[tokio::test]
    async fn test_ids_increment_and_survive_deletes() {
        let store = InMemoryStore::new();
        let a = store.insert(&new_content("a")).await.unwrap();
        let b = store.insert(&new_content("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete_by_id(b.id).await.unwrap());
        assert!(!store.delete_by_id(b.id).await.unwrap());

        let c = store.insert(&new_content("c")).await.unwrap();
        assert_eq!(c.id, 3);

        let all = store.list_all().await.unwrap();
        let titles: Vec<_> = all.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let store = InMemoryStore::new();
        store.fail_next(AppError::DatabaseError("down".into()));

        assert!(store.health_check().await.is_err());
        assert!(store.health_check().await.is_ok());
    }
}
