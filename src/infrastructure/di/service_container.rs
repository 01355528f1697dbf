//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::{CommandService, QueryService};
use crate::config::Settings;
use crate::infrastructure::store::TomlNodeStore;
use crate::infrastructure::traits::NodeStore;

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Node store shared by both services
    pub store: Arc<dyn NodeStore>,

    pub query: QueryService,
    pub commands: CommandService,
}

impl ServiceContainer {
    /// Create a new service container backed by the TOML file store.
    pub fn new(settings: Settings) -> Self {
        debug!("node store: {}", settings.store_path.display());
        let store = Arc::new(TomlNodeStore::new(settings.store_path.clone()));
        Self::with_deps(settings, store)
    }

    /// Create a service container with a custom store (for testing).
    pub fn with_deps(settings: Settings, store: Arc<dyn NodeStore>) -> Self {
        let settings = Arc::new(settings);
        let query = QueryService::new(Arc::clone(&store));
        let commands = CommandService::new(Arc::clone(&store));

        Self {
            settings,
            store,
            query,
            commands,
        }
    }
}
