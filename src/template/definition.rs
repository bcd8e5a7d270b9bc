use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::foundation::error::{ProtoError, ProtoResult};
use crate::value::types::{Value, ValueKind, validate};

/// A template (PROTO) definition: its parameter interface and its body.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateDef {
    /// Template name.
    pub name: String,
    /// Declared parameters in interface order.
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    /// Body node templates, expanded by a [`crate::TemplateExpander`].
    #[serde(default)]
    pub body: Vec<NodeTemplate>,
}

/// One entry of a template's parameter interface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParameterDecl {
    /// Parameter name, unique within the template.
    pub name: String,
    /// Declared kind.
    pub kind: ValueKind,
    /// Initial value. `None` uses the kind's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Edits to this parameter rebuild the whole expansion instead of patching fields.
    #[serde(default)]
    pub regenerates: bool,
}

/// Where a body field takes its value from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FieldSource {
    /// `IS` connection to a parameter.
    Is {
        /// Parameter name.
        is: String,
    },
    /// Fixed value.
    Literal(Value),
}

/// Number of copies of a body node.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CountSource {
    /// Fixed count.
    Fixed(u32),
    /// Count read from an `SFInt32` parameter.
    Is {
        /// Parameter name.
        is: String,
    },
}

/// A body node of the declarative template format.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeTemplate {
    /// Node type name. Empty for `use` nodes.
    #[serde(rename = "type", default)]
    pub type_name: String,
    /// `DEF` name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<String>,
    /// `USE` name.
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub use_name: Option<String>,
    /// Field sources.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldSource>,
    /// Child node templates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeTemplate>,
    /// Emit this node several times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<CountSource>,
    /// Emit this node only while the named `SFBool` parameter is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
}

impl TemplateDef {
    /// Empty template named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a parameter declaration.
    pub fn param(mut self, decl: ParameterDecl) -> Self {
        self.parameters.push(decl);
        self
    }

    /// Append a body node.
    pub fn node(mut self, node: NodeTemplate) -> Self {
        self.body.push(node);
        self
    }

    /// Parse and validate a JSON definition.
    pub fn from_reader(r: impl std::io::Read) -> ProtoResult<Self> {
        let def: Self = serde_json::from_reader(r)
            .map_err(|e| ProtoError::serde(format!("parse template JSON: {e}")))?;
        def.validate()?;
        Ok(def)
    }

    /// Parse and validate a JSON definition held in memory.
    pub fn from_json_str(s: &str) -> ProtoResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse and validate a JSON definition file.
    pub fn from_path(path: impl AsRef<Path>) -> ProtoResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| ProtoError::load(format!("open '{}': {e}", path.display())))?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    /// Declaration of `name`, if declared.
    pub fn decl(&self, name: &str) -> Option<&ParameterDecl> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Check the interface and every parameter reference of the body.
    pub fn validate(&self) -> ProtoResult<()> {
        if self.name.trim().is_empty() {
            return Err(ProtoError::validation("template name must be non-empty"));
        }

        let mut seen = HashSet::new();
        for p in &self.parameters {
            if !seen.insert(p.name.as_str()) {
                return Err(ProtoError::validation(format!(
                    "template '{}' declares parameter '{}' twice",
                    self.name, p.name
                )));
            }
            if let Some(default) = &p.default {
                validate(p.kind, default).map_err(|e| {
                    ProtoError::validation(format!("default of '{}': {e}", p.name))
                })?;
                if p.kind == ValueKind::Node && default.as_instance().is_some() {
                    return Err(ProtoError::validation(format!(
                        "default of node parameter '{}' must be NULL",
                        p.name
                    )));
                }
            }
        }

        for node in &self.body {
            self.validate_node(node)?;
        }
        Ok(())
    }

    fn validate_node(&self, node: &NodeTemplate) -> ProtoResult<()> {
        if node.type_name.is_empty() && node.use_name.is_none() {
            return Err(ProtoError::validation(format!(
                "template '{}' has a body node without a type",
                self.name
            )));
        }
        if let Some(guard) = &node.when {
            self.expect_kind(guard, ValueKind::Bool, "when")?;
        }
        if let Some(CountSource::Is { is }) = &node.repeat {
            self.expect_kind(is, ValueKind::Int32, "repeat")?;
        }
        for (field, source) in &node.fields {
            if let FieldSource::Is { is } = source {
                if self.decl(is).is_none() {
                    return Err(ProtoError::validation(format!(
                        "field '{field}' of {} is connected to undeclared parameter '{is}'",
                        node.type_name
                    )));
                }
            }
        }
        for child in &node.children {
            self.validate_node(child)?;
        }
        Ok(())
    }

    fn expect_kind(&self, name: &str, kind: ValueKind, what: &str) -> ProtoResult<()> {
        match self.decl(name) {
            Some(decl) if decl.kind == kind => Ok(()),
            Some(decl) => Err(ProtoError::validation(format!(
                "{what} parameter '{name}' must be {kind}, is {}",
                decl.kind
            ))),
            None => Err(ProtoError::validation(format!(
                "{what} refers to undeclared parameter '{name}'"
            ))),
        }
    }
}

impl ParameterDecl {
    /// Declaration with the kind's default value.
    pub fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            regenerates: false,
        }
    }

    /// Set the initial value.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// Mark the parameter as structural.
    pub fn regenerating(mut self) -> Self {
        self.regenerates = true;
        self
    }

    /// Value a fresh instance starts with.
    pub fn initial_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| Value::default_for(self.kind))
    }
}

impl NodeTemplate {
    /// Node of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    /// `USE` of the `DEF` named `def_name`.
    pub fn use_of(def_name: impl Into<String>) -> Self {
        Self {
            use_name: Some(def_name.into()),
            ..Self::default()
        }
    }

    /// Set the `DEF` name.
    pub fn def(mut self, name: impl Into<String>) -> Self {
        self.def = Some(name.into());
        self
    }

    /// Literal field.
    pub fn literal(mut self, field: impl Into<String>, value: Value) -> Self {
        self.fields.insert(field.into(), FieldSource::Literal(value));
        self
    }

    /// Field connected to `parameter`.
    pub fn is(mut self, field: impl Into<String>, parameter: impl Into<String>) -> Self {
        self.fields.insert(
            field.into(),
            FieldSource::Is {
                is: parameter.into(),
            },
        );
        self
    }

    /// Append a child.
    pub fn child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }

    /// Repeat this node.
    pub fn repeat(mut self, count: CountSource) -> Self {
        self.repeat = Some(count);
        self
    }

    /// Guard this node with a boolean parameter.
    pub fn when(mut self, parameter: impl Into<String>) -> Self {
        self.when = Some(parameter.into());
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/definition.rs"]
mod tests;
