//! Browser transports for the file-manager endpoints.

pub mod api;
