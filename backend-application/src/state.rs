use std::sync::Arc;

use backend_domain::ports::{HealthCheckService, HolderDirectory, RegistrationRepository, TicketRenderer};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub registration_repo: Arc<dyn RegistrationRepository>,
    pub holder_directory: Arc<dyn HolderDirectory>,
    pub ticket_renderer: Arc<dyn TicketRenderer>,
    pub health_service: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
