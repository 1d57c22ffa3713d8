pub mod asset;
pub mod schedule;

pub use asset::*;
pub use schedule::*;
