use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use backend_application::{AppState, Metrics};
use backend_domain::{HolderDirectory, RegistrationRepository, RosterRepository};
use backend_infrastructure::{
    AppConfig, DefaultHealthService, InMemoryHolderDirectory, InMemoryRegistrationRepository,
    PostgresRegistrationRepository, QrTicketRenderer, RosterFileRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let (registration_repo, holder_directory): (
            Arc<dyn RegistrationRepository>,
            Arc<dyn HolderDirectory>,
        ) = if db_config.database_url.is_some() {
            let repo = Arc::new(PostgresRegistrationRepository::connect(&db_config).await?);
            info!("using postgres registration store");
            (repo.clone(), repo)
        } else {
            warn!("database_url not set, registrations are kept in memory only");
            (
                Arc::new(InMemoryRegistrationRepository::new()),
                Arc::new(InMemoryHolderDirectory::new()),
            )
        };
        registration_repo.ensure_schema().await?;

        let roster_repo = RosterFileRepository::new();
        match roster_repo.load_holders(&db_config.holders_path).await {
            Ok(holders) if holders.is_empty() => {}
            Ok(holders) => {
                holder_directory.upsert_holders(&holders).await?;
                info!(
                    "loaded {} holders from {}",
                    holders.len(),
                    db_config.holders_path
                );
            }
            Err(err) => warn!(
                "failed to load holders from {}: {}",
                db_config.holders_path, err
            ),
        }

        let state = AppState {
            config: runtime_config,
            health_service: Arc::new(DefaultHealthService::new(registration_repo.clone())),
            registration_repo,
            holder_directory,
            ticket_renderer: Arc::new(QrTicketRenderer::new(config.to_qr_config()?)),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
