use async_trait::async_trait;

/// Turns a ticket string into a scannable image. Pure: same input, same bytes.
pub trait TicketRenderer: Send + Sync {
    fn content_type(&self) -> &'static str;
    fn render(&self, ticket: &str) -> anyhow::Result<Vec<u8>>;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_database(&self) -> anyhow::Result<bool>;
}
