use chrono::{DateTime, Utc};
use std::sync::Arc;
use tally_storage::MetricStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MetricStore>,
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn MetricStore>) -> Self {
        Self {
            store,
            start_time: Utc::now(),
        }
    }
}
