//! Typed parameter values.
//!
//! A closed set of variants mirroring the VRML single-field types the designer edits, plus
//! the two list kinds that can be declared but not yet edited.

pub(crate) mod parse;
pub(crate) mod types;
