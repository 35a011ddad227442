use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::LearningLogStore;

/// Shared handler state: the data-access implementation and configuration
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LearningLogStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn LearningLogStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
