pub mod config;
pub mod scale;
pub mod task;

pub use config::*;
pub use scale::*;
pub use task::*;
