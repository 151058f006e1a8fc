//! CLI command modules

pub mod lookup;
pub mod serve;

pub use lookup::{execute_lookup_command, execute_show_command, LookupArgs};
pub use serve::{execute_serve_command, init_tracing, ServeArgs};
