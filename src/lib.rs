//! proto-designer is a live editing engine for PROTO (parameterized scene template) instances.
//!
//! A user edits a typed parameter of a template instance; the engine either patches every
//! scene-node field wired to that parameter (plus the `USE` aliases of those nodes) or, for
//! structural parameters, tears the instance's scene fragment down and expands the template
//! again in the same place. Either way a re-render is requested.
//!
//! # Edit flow
//!
//! 1. **Validate**: the value must match the parameter's declared [`ValueKind`]; a rejected
//!    value changes nothing.
//! 2. **Branch**: structural (`regenerates`) parameters go through the regeneration pipeline,
//!    the others through binding resolution and alias propagation.
//! 3. **Signal**: [`RenderSignal::request_render`].
//!
//! Collaborators are injected per call through [`EditContext`]: a [`SceneAccess`] scene graph,
//! a [`TemplateFetch`] url resolver, a pure [`TemplateExpander`] and a [`RenderSignal`]. The
//! crate ships in-memory and filesystem implementations of each so the engine runs end to end.
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: every operation runs to completion on `&mut ProtoManager`.
//! - **Fetch before mutate**: loading and expansion finish before any instance state changes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod library;
mod proto;
mod render;
mod scene;
mod template;
mod value;

pub use foundation::core::{
    Binding, InstanceId, NodeId, ParamRef, Vec2, Vec3, Vec4, Vector2, Vector3, Vector4,
};
pub use foundation::error::{ProtoError, ProtoResult};
pub use library::catalog::{AssetEntry, AssetLibrary, REMOVE_KEY};
pub use proto::alias::{FieldWriteFailure, Propagation, propagate};
pub use proto::instance::ProtoInstance;
pub use proto::manager::{EditContext, EditOutcome, EditReport, ParameterRow, ProtoManager};
pub use proto::opts::{EngineOpts, SlotFilterPolicy};
pub use proto::parameter::Parameter;
pub use render::signal::{NullRender, RenderCounter, RenderSignal};
pub use scene::graph::{SceneAccess, SceneGraph};
pub use scene::node::{FieldConnection, NodeDescriptor, SceneNode};
pub use template::definition::{CountSource, FieldSource, NodeTemplate, ParameterDecl, TemplateDef};
pub use template::expand::{BodyExpander, ParameterValues, TemplateExpander};
pub use template::fetch::{FsTemplateStore, MemoryTemplateStore, TemplateFetch};
pub use template::pipeline::RegenState;
pub use value::types::{Value, ValueKind, validate};
