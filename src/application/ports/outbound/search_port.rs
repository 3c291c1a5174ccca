//! Global search port

use async_trait::async_trait;

use super::ApiError;
use crate::application::dto::SearchResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchPort: Send + Sync {
    async fn global_search(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;
}
