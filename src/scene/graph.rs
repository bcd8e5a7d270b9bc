use std::collections::{BTreeMap, HashMap, HashSet};

use crate::foundation::core::{InstanceId, NodeId};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::scene::node::{NodeDescriptor, SceneNode};
use crate::value::types::Value;

/// Scene-graph mutation and lookup contract used by the engine.
///
/// Implementations must make `insert_nodes` all-or-nothing and `remove_node` idempotent.
pub trait SceneAccess {
    /// Install `descriptors` as children of `anchor` (root level when `None`), tagging every
    /// created node with `owner`. Returns the ids of the fragment roots in order.
    fn insert_nodes(
        &mut self,
        descriptors: &[NodeDescriptor],
        anchor: Option<NodeId>,
        owner: InstanceId,
    ) -> ProtoResult<Vec<NodeId>>;

    /// Remove a node and its subtree. Returns `false` if the node was already absent.
    fn remove_node(&mut self, id: NodeId) -> bool;

    /// Look up a node.
    fn node(&self, id: NodeId) -> Option<&SceneNode>;

    /// Look up a node for mutation.
    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode>;

    /// `root` and its descendants in pre-order. Empty if `root` is absent.
    fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}

#[derive(Clone, Debug, Default, serde::Serialize)]
/// In-memory scene graph.
///
/// `DEF`/`USE` pairs inside one inserted fragment become alias lists on the `DEF` node.
/// Alias nodes copy the `DEF` node's type and fields at insertion time; their children are
/// not duplicated.
pub struct SceneGraph {
    nodes: BTreeMap<NodeId, SceneNode>,
    roots: Vec<NodeId>,
    next_id: u32,
}

impl SceneGraph {
    /// Empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a host node (not owned by any template instance), e.g. a world group used as an
    /// anchor.
    pub fn add_node(
        &mut self,
        type_name: impl Into<String>,
        fields: BTreeMap<String, Value>,
        parent: Option<NodeId>,
    ) -> ProtoResult<NodeId> {
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                return Err(ProtoError::UnknownNode(p));
            }
        }
        let id = self.alloc_id();
        self.nodes.insert(
            id,
            SceneNode {
                id,
                type_name: type_name.into(),
                fields,
                parent,
                children: Vec::new(),
                alias_ids: Vec::new(),
                alias_of: None,
                owner: None,
                connections: Vec::new(),
            },
        );
        self.attach(id, parent);
        Ok(id)
    }

    /// Declare `alias` as a `USE` of `owner`. Both nodes must exist.
    pub fn add_alias(&mut self, owner: NodeId, alias: NodeId) -> ProtoResult<()> {
        if !self.nodes.contains_key(&alias) {
            return Err(ProtoError::UnknownNode(alias));
        }
        let owner_node = self
            .nodes
            .get_mut(&owner)
            .ok_or(ProtoError::UnknownNode(owner))?;
        if !owner_node.alias_ids.contains(&alias) {
            owner_node.alias_ids.push(alias);
        }
        if let Some(a) = self.nodes.get_mut(&alias) {
            a.alias_of = Some(owner);
        }
        Ok(())
    }

    /// Root-level node ids in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// `true` if the node is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the scene has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id`, or an empty slice if it is absent.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// All live nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &SceneNode> {
        self.nodes.values()
    }

    fn alloc_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn attach(&mut self, id: NodeId, parent: Option<NodeId>) {
        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(p) => p.children.push(id),
            None => self.roots.push(id),
        }
    }

    fn check_fragment(
        descriptors: &[NodeDescriptor],
        defs: &mut HashSet<String>,
    ) -> ProtoResult<()> {
        for d in descriptors {
            match (&d.def_name, &d.use_name) {
                (Some(def), Some(_)) => {
                    return Err(ProtoError::expansion(format!(
                        "node '{def}' cannot be both DEF and USE"
                    )));
                }
                (_, Some(name)) => {
                    if !defs.contains(name) {
                        return Err(ProtoError::expansion(format!(
                            "USE '{name}' refers to an undeclared DEF"
                        )));
                    }
                    if !d.children.is_empty() {
                        return Err(ProtoError::expansion(format!(
                            "USE '{name}' cannot declare children"
                        )));
                    }
                }
                (def, None) => {
                    if d.type_name.is_empty() {
                        return Err(ProtoError::expansion("node descriptor without a type"));
                    }
                    if let Some(def) = def {
                        defs.insert(def.clone());
                    }
                }
            }
            for c in &d.connections {
                if !d.fields.contains_key(&c.field) {
                    return Err(ProtoError::expansion(format!(
                        "IS connection on undeclared field '{}' of {}",
                        c.field, d.type_name
                    )));
                }
            }
            Self::check_fragment(&d.children, defs)?;
        }
        Ok(())
    }

    fn build(
        &mut self,
        desc: &NodeDescriptor,
        parent: Option<NodeId>,
        owner: InstanceId,
        defs: &mut HashMap<String, NodeId>,
    ) -> NodeId {
        let id = self.alloc_id();

        let source = desc
            .use_name
            .as_ref()
            .and_then(|name| defs.get(name).copied())
            .and_then(|def_id| self.nodes.get(&def_id).map(|n| (def_id, n)));
        let node = match source {
            Some((def_id, def_node)) => SceneNode {
                id,
                type_name: def_node.type_name.clone(),
                fields: def_node.fields.clone(),
                parent,
                children: Vec::new(),
                alias_ids: Vec::new(),
                alias_of: Some(def_id),
                owner: Some(owner),
                connections: Vec::new(),
            },
            None => SceneNode {
                id,
                type_name: desc.type_name.clone(),
                fields: desc.fields.clone(),
                parent,
                children: Vec::new(),
                alias_ids: Vec::new(),
                alias_of: None,
                owner: Some(owner),
                connections: desc.connections.clone(),
            },
        };
        let alias_of = node.alias_of;
        self.nodes.insert(id, node);
        self.attach(id, parent);

        if let Some(def_id) = alias_of {
            if let Some(def_node) = self.nodes.get_mut(&def_id) {
                def_node.alias_ids.push(id);
            }
            return id;
        }
        if let Some(def) = &desc.def_name {
            defs.insert(def.clone(), id);
        }
        for child in &desc.children {
            self.build(child, Some(id), owner, defs);
        }
        id
    }
}

impl SceneAccess for SceneGraph {
    fn insert_nodes(
        &mut self,
        descriptors: &[NodeDescriptor],
        anchor: Option<NodeId>,
        owner: InstanceId,
    ) -> ProtoResult<Vec<NodeId>> {
        if let Some(a) = anchor {
            if !self.nodes.contains_key(&a) {
                return Err(ProtoError::UnknownNode(a));
            }
        }
        // Validate the whole fragment before touching the graph.
        Self::check_fragment(descriptors, &mut HashSet::new())?;

        let mut defs = HashMap::new();
        let ids = descriptors
            .iter()
            .map(|d| self.build(d, anchor, owner, &mut defs))
            .collect::<Vec<_>>();
        tracing::debug!(
            owner = %owner,
            roots = ids.len(),
            total = descriptors.iter().map(NodeDescriptor::count).sum::<usize>(),
            "inserted fragment"
        );
        Ok(ids)
    }

    fn remove_node(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.nodes.get(&id).map(|n| n.parent) else {
            return false;
        };
        let doomed = self.subtree(id);
        let doomed_set: HashSet<NodeId> = doomed.iter().copied().collect();

        match parent.and_then(|p| self.nodes.get_mut(&p)) {
            Some(p) => p.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }

        for node_id in &doomed {
            let Some(node) = self.nodes.remove(node_id) else {
                continue;
            };
            // Keep surviving alias relations consistent in both directions.
            if let Some(def_id) = node.alias_of {
                if !doomed_set.contains(&def_id) {
                    if let Some(def_node) = self.nodes.get_mut(&def_id) {
                        def_node.alias_ids.retain(|a| a != node_id);
                    }
                }
            }
            for alias in node.alias_ids {
                if doomed_set.contains(&alias) {
                    continue;
                }
                if let Some(alias_node) = self.nodes.get_mut(&alias) {
                    alias_node.alias_of = None;
                }
            }
        }
        true
    }

    fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(&id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
