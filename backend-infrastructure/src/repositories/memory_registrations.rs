use std::collections::HashMap;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use backend_domain::{
    EventId, NewRegistration, Registration, RegistrationRepository, StoreError, UserId,
};

/// Process-local registration store.
///
/// Every mutation happens while holding the write lock, which makes the
/// duplicate check in `create` and the read-modify-write in
/// `increment_scan_count` atomic with respect to other callers.
#[derive(Default)]
pub struct InMemoryRegistrationRepository {
    registrations: RwLock<HashMap<(EventId, UserId), Registration>>,
}

impl InMemoryRegistrationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.registrations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.registrations.read().await.is_empty()
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_by_pair(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Registration>, StoreError> {
        Ok(self
            .registrations
            .read()
            .await
            .get(&(event_id, user_id))
            .cloned())
    }

    async fn create(&self, registration: NewRegistration) -> Result<Registration, StoreError> {
        let key = (registration.event_id, registration.user_id);
        let mut registrations = self.registrations.write().await;
        if registrations.contains_key(&key) {
            return Err(StoreError::Duplicate);
        }
        let created = registration.into_registration(Utc::now());
        registrations.insert(key, created.clone());
        Ok(created)
    }

    async fn increment_scan_count(
        &self,
        registration: &Registration,
    ) -> Result<Registration, StoreError> {
        let mut registrations = self.registrations.write().await;
        let stored = registrations
            .get_mut(&(registration.event_id, registration.user_id))
            .ok_or(StoreError::Missing)?;
        stored.scan_count = stored
            .scan_count
            .checked_add(1)
            .ok_or_else(|| StoreError::Unavailable(anyhow!("scan count overflow")))?;
        Ok(stored.clone())
    }

    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError> {
        let registrations = self.registrations.read().await;
        let mut list = registrations
            .values()
            .filter(|registration| registration.event_id == event_id)
            .cloned()
            .collect::<Vec<_>>();
        list.sort_by_key(|registration| registration.user_id);
        Ok(list)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
