//! Yew components for the file manager.

pub(crate) mod action_bar;
pub(crate) mod filetree;
pub(crate) mod modals;
pub(crate) mod toast;
pub(crate) mod uploads;
