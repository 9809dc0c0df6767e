pub mod registration_queries;
pub mod ticket_queries;
