use crate::error::AppError;
use crate::models::{Content, ContentDraft, ContentPatch, Page, PageRequest};
use crate::traits::ContentStore;

/// Runs each content operation: validate input, perform one store call,
/// translate a missing row into [`AppError::NotFound`].
///
/// Generic over the store so it can be exercised without a database.
pub struct ContentService<S>
where
    S: ContentStore,
{
    store: S,
}

impl<S> ContentService<S>
where
    S: ContentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<Content>, AppError> {
        self.store.list_paginated(page).await
    }

    pub async fn create(&self, draft: ContentDraft) -> Result<Content, AppError> {
        let new_content = draft.validated()?;
        let content = self.store.insert(&new_content).await?;
        tracing::info!(id = content.id, "Content created");
        Ok(content)
    }

    pub async fn show(&self, id: i64) -> Result<Content, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Partial update. An empty patch returns the row unchanged.
    pub async fn update(&self, id: i64, patch: ContentPatch) -> Result<Content, AppError> {
        let changes = patch.validated()?;
        if changes.is_empty() {
            return self.show(id).await;
        }

        let content = self
            .store
            .update_by_id(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        tracing::info!(id, "Content updated");
        Ok(content)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        tracing::info!(id, "Content deleted");
        Ok(())
    }
}
