use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::application::ports::outbound::ReferenceDataPort;
use crate::domain::entities::ReferenceData;

/// Loads the heritage/vice/ability catalog once per session.
///
/// A failed fetch falls back to the built-in catalog; the fallback is not
/// cached so the next `load` tries the backend again.
pub struct ReferenceDataService {
    port: Arc<dyn ReferenceDataPort>,
    cache: RwLock<Option<Arc<ReferenceData>>>,
}

impl ReferenceDataService {
    pub fn new(port: Arc<dyn ReferenceDataPort>) -> Self {
        Self {
            port,
            cache: RwLock::new(None),
        }
    }

    pub async fn load(&self) -> Arc<ReferenceData> {
        let cache = self.cache.read().await;
        if let Some(data) = &*cache {
            return data.clone();
        }
        drop(cache);

        match self.port.fetch_reference_data().await {
            Ok(data) => {
                info!(
                    heritages = data.heritages.len(),
                    vices = data.vices.len(),
                    abilities = data.abilities.len(),
                    "Loaded reference data"
                );
                let data = Arc::new(data);
                *self.cache.write().await = Some(data.clone());
                data
            }
            Err(e) => {
                warn!(error = %e, "Reference data unavailable, using built-in defaults");
                Arc::new(ReferenceData::fallback())
            }
        }
    }

    /// Drop the cached catalog and fetch again
    pub async fn refresh(&self) -> Arc<ReferenceData> {
        *self.cache.write().await = None;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{ApiError, MockReferenceDataPort};
    use crate::domain::entities::Heritage;
    use crate::domain::value_objects::HeritageId;

    #[tokio::test]
    async fn test_failure_falls_back_and_retries() {
        let mut port = MockReferenceDataPort::new();
        let mut seq = mockall::Sequence::new();
        port.expect_fetch_reference_data()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(ApiError::Unavailable("timeout".to_string())));
        port.expect_fetch_reference_data()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(ReferenceData::new(
                    vec![Heritage::new(HeritageId::new(5), "Pillar Man", 8)],
                    vec![],
                    vec![],
                ))
            });
        let service = ReferenceDataService::new(Arc::new(port));

        let first = service.load().await;
        assert!(first.is_fallback);
        assert_eq!(first.heritages[0].name, "Human");

        let second = service.load().await;
        assert!(!second.is_fallback);
        assert_eq!(second.heritages[0].name, "Pillar Man");

        // Cached from here on
        let third = service.load().await;
        assert!(Arc::ptr_eq(&second, &third));
    }
}
