//! Content entity, validation rules, and the service that ties them to a store.

pub mod error;
pub mod models;
pub mod service;
#[cfg(test)]
pub mod testutil;
pub mod traits;
pub mod validation;

pub use error::AppError;
pub use models::{
    Content, ContentChanges, ContentDraft, ContentPatch, FieldInput, NewContent, Page, PageRequest,
};
pub use service::ContentService;
pub use traits::ContentStore;
