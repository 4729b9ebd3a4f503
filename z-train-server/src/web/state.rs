//! Application state for the web layer.

use std::sync::Arc;

use crate::digitraffic::TrainSource;

use super::templates::IndexTemplate;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Where the day's line trains come from (live, cached or mock)
    pub trains: Arc<dyn TrainSource>,

    /// Dashboard page layout
    pub dashboard: Arc<IndexTemplate>,
}

impl AppState {
    /// Create a new app state with the default dashboard.
    pub fn new(trains: Arc<dyn TrainSource>) -> Self {
        Self::with_dashboard(trains, IndexTemplate::default())
    }

    /// Create a new app state with a custom dashboard layout.
    pub fn with_dashboard(trains: Arc<dyn TrainSource>, dashboard: IndexTemplate) -> Self {
        Self {
            trains,
            dashboard: Arc::new(dashboard),
        }
    }
}
