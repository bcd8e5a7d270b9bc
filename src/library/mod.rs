//! Asset catalog for filling node slots.

pub(crate) mod catalog;
