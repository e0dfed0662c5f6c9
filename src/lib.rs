pub mod components;
pub mod config;
pub mod error;
#[cfg(feature = "web-interface")]
pub mod server;
pub mod shutdown;
pub mod startup;
pub mod utils;
