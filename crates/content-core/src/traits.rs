use std::future::Future;

use crate::error::AppError;
use crate::models::{Content, ContentChanges, NewContent, Page, PageRequest};

/// Persists and retrieves content rows.
///
/// Implementations own timestamp assignment: `insert` sets both
/// `created_at` and `updated_at`, `update_by_id` refreshes `updated_at`.
pub trait ContentStore: Send + Sync + Clone {
    /// Insert a new row and return it as stored.
    fn insert(&self, content: &NewContent)
    -> impl Future<Output = Result<Content, AppError>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Content>, AppError>> + Send;

    /// Apply `changes` to the row. Returns `None` when the id does not exist.
    fn update_by_id(
        &self,
        id: i64,
        changes: &ContentChanges,
    ) -> impl Future<Output = Result<Option<Content>, AppError>> + Send;

    /// Delete the row. Returns `false` when the id does not exist.
    fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<bool, AppError>> + Send;

    /// One page of rows ordered by id, plus the total row count.
    fn list_paginated(
        &self,
        page: PageRequest,
    ) -> impl Future<Output = Result<Page<Content>, AppError>> + Send;

    /// Every row ordered by id.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Content>, AppError>> + Send;

    /// Check that the backing store is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}
