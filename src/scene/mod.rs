//! Scene-graph access.
//!
//! The engine only talks to the scene through [`graph::SceneAccess`]. [`graph::SceneGraph`] is
//! the in-memory implementation used by the CLI and the tests.

pub(crate) mod graph;
pub(crate) mod node;
