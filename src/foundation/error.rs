use crate::foundation::core::{InstanceId, NodeId};
use crate::value::types::ValueKind;

/// Convenience result type used across the engine.
pub type ProtoResult<T> = Result<T, ProtoError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ProtoError {
    /// An edit value's variant differs from the parameter's declared kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Declared parameter kind.
        expected: ValueKind,
        /// Kind of the rejected value.
        found: ValueKind,
    },

    /// A field write targeted a field the node does not declare.
    #[error("field not found: node {node} has no field '{field}'")]
    FieldNotFound {
        /// Target node.
        node: NodeId,
        /// Missing field name.
        field: String,
    },

    /// Editing list-typed parameters is not implemented.
    #[error("unsupported variant: editing {0} parameters is not implemented")]
    UnsupportedVariant(ValueKind),

    /// A template definition could not be fetched or parsed.
    #[error("load error: {0}")]
    Load(String),

    /// A template body could not be expanded into scene nodes.
    #[error("expansion error: {0}")]
    Expansion(String),

    /// Regeneration of an instance failed; the instance is now `Failed`.
    #[error("regeneration of {instance} failed: {source}")]
    RegenerationFailed {
        /// Instance that entered the `Failed` state.
        instance: InstanceId,
        /// Underlying expansion or installation error.
        #[source]
        source: Box<ProtoError>,
    },

    /// No live instance has this id.
    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),

    /// The instance has no parameter with this name.
    #[error("{instance} has no parameter '{parameter}'")]
    UnknownParameter {
        /// Instance that was searched.
        instance: InstanceId,
        /// Requested parameter name.
        parameter: String,
    },

    /// The scene graph has no node with this id.
    #[error("unknown scene node {0}")]
    UnknownNode(NodeId),

    /// Invalid user-provided or definition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProtoError {
    /// Build a [`ProtoError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`ProtoError::Expansion`] value.
    pub fn expansion(msg: impl Into<String>) -> Self {
        Self::Expansion(msg.into())
    }

    /// Build a [`ProtoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ProtoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ProtoError::FieldNotFound`] value.
    pub fn field_not_found(node: NodeId, field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            node,
            field: field.into(),
        }
    }

    /// Build a [`ProtoError::UnknownParameter`] value.
    pub fn unknown_parameter(instance: InstanceId, parameter: impl Into<String>) -> Self {
        Self::UnknownParameter {
            instance,
            parameter: parameter.into(),
        }
    }

    /// `true` for errors that reject an edit before any state was touched.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::UnsupportedVariant(_)
                | Self::Validation(_)
                | Self::UnknownInstance(_)
                | Self::UnknownParameter { .. }
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
