use std::sync::Arc;

use campus_config::CampusConfig;
use campus_crud::{EntityCrud, Notifier, QueryCache, RestEndpoints, TracingNotifier};
use campus_schema::SchemaRegistry;

/// Shared state for one CLI invocation.
pub struct AppContext {
    pub config: CampusConfig,
    pub schemas: SchemaRegistry,
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn init(config: CampusConfig) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            schemas: SchemaRegistry::new()?,
            cache: Arc::new(QueryCache::new()),
            notifier: Arc::new(TracingNotifier),
        })
    }

    /// CRUD facade for `resource`, also invalidating `invalidates`.
    pub fn entity(
        &self,
        resource: &str,
        invalidates: &[String],
    ) -> anyhow::Result<EntityCrud<RestEndpoints>> {
        let base_url = self.config.api.require()?;
        let endpoints = RestEndpoints::new(base_url, resource, self.config.api.timeout())?;

        let mut namespaces = vec![resource.to_string()];
        namespaces.extend(invalidates.iter().cloned());

        Ok(EntityCrud::new(
            endpoints,
            namespaces,
            Arc::clone(&self.cache),
            Arc::clone(&self.notifier),
        )?)
    }
}
