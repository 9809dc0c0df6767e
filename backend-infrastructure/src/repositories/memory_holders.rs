use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use backend_domain::{Holder, HolderDirectory, UserId};

#[derive(Default)]
pub struct InMemoryHolderDirectory {
    holders: RwLock<HashMap<UserId, Holder>>,
}

impl InMemoryHolderDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HolderDirectory for InMemoryHolderDirectory {
    async fn find_holder(&self, user_id: UserId) -> anyhow::Result<Option<Holder>> {
        Ok(self.holders.read().await.get(&user_id).cloned())
    }

    async fn upsert_holders(&self, holders: &[Holder]) -> anyhow::Result<()> {
        let mut map = self.holders.write().await;
        for holder in holders {
            map.insert(holder.user_id, holder.clone());
        }
        Ok(())
    }
}
