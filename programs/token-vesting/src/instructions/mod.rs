pub mod create_schedule;
pub mod otc;
pub mod register_asset;
pub mod release;
pub mod revoke;

pub use create_schedule::*;
pub use otc::*;
pub use register_asset::*;
pub use release::*;
pub use revoke::*;
