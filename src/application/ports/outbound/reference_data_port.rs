//! Reference catalog port

use async_trait::async_trait;

use super::ApiError;
use crate::domain::entities::ReferenceData;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDataPort: Send + Sync {
    /// Fetch heritages, vices and abilities in one go
    async fn fetch_reference_data(&self) -> Result<ReferenceData, ApiError>;
}
