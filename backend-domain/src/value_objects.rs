// Domain value objects
pub mod entry_classification;
pub mod identifiers;
pub mod participation_type;
pub mod ticket_id;

pub use entry_classification::*;
pub use identifiers::*;
pub use participation_type::*;
pub use ticket_id::*;
