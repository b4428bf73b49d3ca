//! TOML config file loading.

mod loader;


pub use loader::{load_from_path, parse_toml};
