//! Render notification.

pub(crate) mod signal;
