pub mod distance;
pub mod pipeline;
pub mod session;

pub use distance::Coordinates;
pub use pipeline::*;
pub use session::{BrowseSession, SessionView, TipRequest};
