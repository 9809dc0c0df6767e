pub mod health_service;
pub mod qr_renderer;

pub use health_service::*;
pub use qr_renderer::*;
