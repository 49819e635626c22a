//! DOM-free building blocks shared by the features and the wasm glue.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod notify;
pub mod store;
pub mod transport;
