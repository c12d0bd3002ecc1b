//! HTTP inbound adapter: session API, navigation API, health probes and
//! the page shell.

pub mod auth;
pub mod error;
pub mod health;
pub mod navigation;
pub mod session;
pub mod session_config;
pub mod shell;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::ApiResult;
