use async_trait::async_trait;

use crate::entities::{Holder, NewRegistration, Registration};
use crate::errors::StoreError;
use crate::value_objects::{EventId, UserId};

/// Persistence port for registrations.
///
/// Implementations own the scan counter: `increment_scan_count` must be a
/// single atomic step so concurrent scanners never lose an update, and
/// `create` must enforce (event, user) uniqueness under the same guarantee.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), StoreError>;
    async fn find_by_pair(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> Result<Option<Registration>, StoreError>;
    /// Fails with [`StoreError::Duplicate`] when the pair is already taken.
    async fn create(&self, registration: NewRegistration) -> Result<Registration, StoreError>;
    /// Returns the registration as persisted after the increment.
    async fn increment_scan_count(
        &self,
        registration: &Registration,
    ) -> Result<Registration, StoreError>;
    async fn list_by_event(&self, event_id: EventId) -> Result<Vec<Registration>, StoreError>;
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait HolderDirectory: Send + Sync {
    async fn find_holder(&self, user_id: UserId) -> anyhow::Result<Option<Holder>>;
    async fn upsert_holders(&self, holders: &[Holder]) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn load_holders(&self, path: &str) -> anyhow::Result<Vec<Holder>>;
}
