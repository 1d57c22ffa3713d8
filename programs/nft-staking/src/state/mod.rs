pub mod farmer;
pub mod pool;

pub use farmer::*;
pub use pool::*;
