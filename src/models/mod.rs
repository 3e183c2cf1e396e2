pub mod worker;
pub mod review;
pub mod category;
pub mod booking;
pub mod offer;
pub mod cart;

pub use worker::*;
pub use review::*;
pub use category::*;
pub use booking::*;
pub use offer::*;
pub use cart::*;
