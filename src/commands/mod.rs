//! CLI command implementations.
//!
//! - **check**: find converter functions that leak fields
//! - **init**: write a default `.fieldleak.toml`

pub mod check;
pub mod init;

pub use check::{check_sources, discover_files, handle_check, load_sources, CheckConfig};
pub use init::init_config;
