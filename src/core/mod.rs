pub mod config;
mod responses;
mod telemetry;
pub mod utils;

pub use self::config::AppConfig;
pub use responses::*;
pub use telemetry::*;
pub use utils::*;
