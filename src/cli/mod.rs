mod commands;
mod handlers;

pub use commands::{normalize_args, Cli, ServeConfig, DEFAULT_BIND};
pub use handlers::handle_serve;
