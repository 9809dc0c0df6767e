// Domain entities
pub mod config;
pub mod holder;
pub mod registration;

pub use config::*;
pub use holder::*;
pub use registration::*;
