pub mod check_in_handlers;
pub mod ops_handlers;
pub mod registration_handlers;
pub mod ticket_handlers;

pub use check_in_handlers::*;
pub use ops_handlers::*;
pub use registration_handlers::*;
pub use ticket_handlers::*;
