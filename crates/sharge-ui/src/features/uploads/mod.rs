//! Upload feature: queue rows and the sequential transfer pipeline.

pub mod pipeline;
pub mod state;
