//! Live template instances and parameter propagation.
//!
//! An edit enters through [`manager::ProtoManager::set_parameter_value`], is validated against
//! the parameter's declared kind, then either patches the fields returned by
//! [`bindings::resolve_bindings`] (fanned out to aliases by [`alias::propagate`]) or rebuilds
//! the instance through [`crate::template::pipeline`].

pub(crate) mod alias;
pub(crate) mod bindings;
pub(crate) mod instance;
pub(crate) mod manager;
pub(crate) mod opts;
pub(crate) mod parameter;
