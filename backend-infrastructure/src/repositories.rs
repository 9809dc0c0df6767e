pub mod memory_holders;
pub mod memory_registrations;
pub mod postgres_registrations;
pub mod roster_files;

pub use memory_holders::*;
pub use memory_registrations::*;
pub use postgres_registrations::*;
pub use roster_files::*;
