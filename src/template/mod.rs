//! Template definitions and their expansion lifecycle.
//!
//! - `definition`: the JSON definition format (parameter interface + declarative body)
//! - `fetch`: url → definition resolution
//! - `expand`: definition + values → node descriptors
//! - `pipeline`: teardown / re-expand of a live instance

pub(crate) mod definition;
pub(crate) mod expand;
pub(crate) mod fetch;
pub(crate) mod pipeline;
