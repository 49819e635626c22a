//! Feature slices of the file manager.

pub mod filetree;
pub mod uploads;
