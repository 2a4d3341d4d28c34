//! Commands Layer
//!
//! Tauri command handlers that bridge frontend to backend services.

mod toolbox_cmd;
mod log_cmd;

pub use toolbox_cmd::*;
pub use log_cmd::*;
