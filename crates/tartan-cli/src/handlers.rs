//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; shared file and table loading
//! lives in `utils`.

mod completions;
mod config;
mod get;
mod transform;
mod utils;
mod validate;

pub use completions::handle_completions;
pub use config::handle_config;
pub use get::handle_get;
pub use transform::handle_transform;
pub use validate::handle_validate;
