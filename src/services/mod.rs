pub mod csv_export;
pub mod geolocation;
pub mod jwt;
pub mod tip;

pub use geolocation::{resolve_position, FallbackLocation};
pub use jwt::JwtService;
pub use tip::TipService;
