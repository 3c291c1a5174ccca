//! Search Service - Debounced global search
//!
//! Every keystroke calls `query_changed`; only the last query within the
//! debounce window reaches the backend. Results are published on a watch
//! channel so readers always see the latest set.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::application::dto::SearchResult;
use crate::application::ports::outbound::SearchPort;
use crate::infrastructure::scheduler::Debouncer;

pub struct SearchService {
    port: Arc<dyn SearchPort>,
    debouncer: Debouncer,
    results: Arc<watch::Sender<Vec<SearchResult>>>,
}

impl SearchService {
    pub fn new(port: Arc<dyn SearchPort>, debounce: Duration) -> Self {
        let (results, _) = watch::channel(Vec::new());
        Self {
            port,
            debouncer: Debouncer::new(debounce),
            results: Arc::new(results),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<SearchResult>> {
        self.results.subscribe()
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.results.borrow().clone()
    }

    /// Schedule a search for `query`, replacing any pending one.
    ///
    /// A blank query clears the results right away without a request.
    pub fn query_changed(&self, query: &str) {
        let query = query.trim().to_string();
        if query.is_empty() {
            self.clear();
            return;
        }

        let port = self.port.clone();
        let results = self.results.clone();
        self.debouncer.call(async move {
            let found = run_search(port.as_ref(), &query).await;
            results.send_replace(found);
        });
    }

    /// Search immediately, skipping the debounce window
    pub async fn search_now(&self, query: &str) -> Vec<SearchResult> {
        self.debouncer.cancel();
        let query = query.trim();
        if query.is_empty() {
            self.clear();
            return Vec::new();
        }
        let found = run_search(self.port.as_ref(), query).await;
        self.results.send_replace(found.clone());
        found
    }

    pub fn clear(&self) {
        self.debouncer.cancel();
        self.results.send_replace(Vec::new());
    }

    /// Cancel any pending search
    pub fn shutdown(&self) {
        self.debouncer.cancel();
    }
}

#[instrument(skip(port))]
async fn run_search(port: &dyn SearchPort, query: &str) -> Vec<SearchResult> {
    match port.global_search(query).await {
        Ok(results) => {
            debug!(count = results.len(), "Search finished");
            results
        }
        Err(e) => {
            warn!(error = %e, "Search failed");
            Vec::new()
        }
    }
}
