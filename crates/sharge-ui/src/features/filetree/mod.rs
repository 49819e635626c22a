//! File tree feature: selection, derived toolbar state, and batch actions.

pub mod actions;
pub mod affordances;
pub mod selection;
pub mod state;
