use reelshelf_core::{CatalogService, Config, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    catalog: CatalogService,
}

impl AppState {
    pub fn new(config: Config, catalog: CatalogService) -> Self {
        Self { config, catalog }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }
}
