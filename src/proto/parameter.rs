use crate::foundation::error::ProtoResult;
use crate::template::definition::ParameterDecl;
use crate::value::types::{Value, ValueKind, validate};

/// A live parameter of a template instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Parameter {
    /// Name, unique within the instance.
    pub name: String,
    /// Declared kind.
    pub kind: ValueKind,
    /// Current value. Always valid for `kind`.
    pub value: Value,
    /// Edits rebuild the instance's expansion.
    pub regenerates: bool,
    /// Parameter of the enclosing instance this one mirrors.
    pub link: Option<String>,
}

impl Parameter {
    /// Fresh parameter holding the declaration's initial value.
    pub fn from_decl(decl: &ParameterDecl) -> Self {
        Self {
            name: decl.name.clone(),
            kind: decl.kind,
            value: decl.initial_value(),
            regenerates: decl.regenerates,
            link: None,
        }
    }

    /// Replace the value after checking it against the declared kind.
    pub fn set(&mut self, value: Value) -> ProtoResult<()> {
        validate(self.kind, &value)?;
        self.value = value;
        Ok(())
    }
}
