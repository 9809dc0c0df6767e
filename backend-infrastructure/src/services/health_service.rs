use std::sync::Arc;

use async_trait::async_trait;
use backend_domain::ports::{HealthCheckService, RegistrationRepository};

pub struct DefaultHealthService {
    registration_repo: Arc<dyn RegistrationRepository>,
}

impl DefaultHealthService {
    pub fn new(registration_repo: Arc<dyn RegistrationRepository>) -> Self {
        Self { registration_repo }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.registration_repo
            .ping()
            .await
            .map(|_| true)
            .map_err(anyhow::Error::from)
    }
}
