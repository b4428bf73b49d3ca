pub mod errors;
pub mod exit;
pub mod types;

pub use errors::{ConfigError, HorizonError, PlatformError};
pub use exit::StartupFailure;
pub use types::Color;
