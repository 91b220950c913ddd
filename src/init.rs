use std::sync::Arc;
use anyhow::{Context, Result};
use tracing::{info, warn};
use crate::config::Settings;
use crate::controllers::ShadowGateway;
use crate::models::EventRecord;
use crate::repositories::{EventRecordRepository, Repository};
use crate::rules::create_default_evaluator;
use crate::services::{IotShadowClient, RestClient, ShadowService};
use crate::state_management::ChangeProcessor;

/// Everything the running service needs, wired from one `Settings`
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub shadow_service: Arc<dyn ShadowService>,
    pub repository: Arc<dyn Repository<EventRecord>>,
    pub gateway: Arc<ShadowGateway>,
}

/// Builds the shadow client, the event store and the gateway from `settings`.
///
/// A store without credentials is not an error: the service starts and every insert is skipped.
pub async fn initialize(settings: Settings) -> Result<AppContext> {
    let settings = Arc::new(settings);

    let shadow_client = IotShadowClient::new(&settings.shadow, &settings.http)
        .await
        .context("Failed to create shadow client")?;
    info!("Shadow endpoint: {} (thing {})", settings.shadow.endpoint, shadow_client.thing_name());
    let shadow_service: Arc<dyn ShadowService> = Arc::new(shadow_client);

    let rest_client = RestClient::from_settings(&settings.store, &settings.http)
        .context("Failed to create store client")?;
    let event_repository = EventRecordRepository::new(rest_client, settings.store.table.clone());
    if !event_repository.is_configured() {
        warn!("Store credentials missing; records will not be saved");
    }
    let repository: Arc<dyn Repository<EventRecord>> = Arc::new(event_repository);

    let evaluator = create_default_evaluator();
    info!("Loaded {} transition rules", evaluator.rule_count());

    let processor = ChangeProcessor::new(Arc::clone(&shadow_service), Arc::clone(&repository), evaluator);
    let gateway = Arc::new(ShadowGateway::new(Arc::clone(&shadow_service), processor));

    Ok(AppContext {
        settings,
        shadow_service,
        repository,
        gateway,
    })
}
