use std::collections::BTreeMap;

use crate::foundation::core::{Binding, InstanceId, NodeId, ParamRef};
use crate::foundation::error::{ProtoError, ProtoResult};
use crate::library::catalog::{AssetLibrary, REMOVE_KEY};
use crate::proto::alias::{FieldWriteFailure, Propagation, propagate};
use crate::proto::bindings::resolve_bindings;
use crate::proto::instance::ProtoInstance;
use crate::proto::opts::{EngineOpts, SlotFilterPolicy};
use crate::render::signal::RenderSignal;
use crate::scene::graph::SceneAccess;
use crate::template::expand::TemplateExpander;
use crate::template::fetch::TemplateFetch;
use crate::template::pipeline::{self, RegenState};
use crate::value::types::{Value, ValueKind, validate};

/// External collaborators an engine operation may use.
pub struct EditContext<'a> {
    /// Scene graph holding the expanded fragments.
    pub scene: &'a mut dyn SceneAccess,
    /// Template url resolution.
    pub fetch: &'a mut dyn TemplateFetch,
    /// Template body expansion.
    pub expander: &'a dyn TemplateExpander,
    /// Re-render notification.
    pub render: &'a mut dyn RenderSignal,
}

impl<'a> EditContext<'a> {
    /// Bundle the collaborators.
    pub fn new(
        scene: &'a mut dyn SceneAccess,
        fetch: &'a mut dyn TemplateFetch,
        expander: &'a dyn TemplateExpander,
        render: &'a mut dyn RenderSignal,
    ) -> Self {
        Self {
            scene,
            fetch,
            expander,
            render,
        }
    }
}

/// What an accepted edit did to the scene.
#[derive(Debug)]
pub enum EditOutcome {
    /// Bound fields (and their aliases) were written in place.
    Patched {
        /// Bindings resolved for the edited parameter.
        bindings: Vec<Binding>,
        /// Nodes that received the value, aliases included.
        written: Vec<NodeId>,
        /// Writes that were skipped.
        failures: Vec<FieldWriteFailure>,
    },
    /// The instance's fragment was rebuilt.
    Regenerated {
        /// Roots of the new fragment.
        nodes: Vec<NodeId>,
    },
    /// A node parameter was cleared.
    Cleared {
        /// Nested instance that was removed, if the slot held one.
        removed: Option<InstanceId>,
    },
}

/// Result of [`ProtoManager::set_parameter_value`].
#[derive(Debug)]
pub struct EditReport {
    /// Edited parameter.
    pub target: ParamRef,
    /// Effect on the scene.
    pub outcome: EditOutcome,
    /// Nested-instance parameters that mirrored the new value.
    pub linked: Vec<ParamRef>,
    /// Nested instances that could not be rebuilt by this edit; they are now `Failed`.
    pub failed: Vec<(InstanceId, ProtoError)>,
}

impl EditReport {
    /// Number of field writes that were skipped.
    pub fn failure_count(&self) -> usize {
        match &self.outcome {
            EditOutcome::Patched { failures, .. } => failures.len(),
            _ => 0,
        }
    }
}

/// One line of the parameter listing.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ParameterRow {
    /// Owning instance.
    pub instance: InstanceId,
    /// Nesting depth of the owning instance (0 for top-level instances).
    pub depth: usize,
    /// Parameter name.
    pub name: String,
    /// Declared kind.
    pub kind: ValueKind,
    /// Current value, rendered for display.
    pub label: String,
    /// Edits rebuild the expansion.
    pub regenerates: bool,
    /// Linked parent parameter.
    pub link: Option<String>,
}

/// Owner of all live template instances.
///
/// Every operation runs to completion on `&mut self`. Fetching and expansion happen before
/// any instance or parameter is changed, so a failed load leaves the manager untouched.
#[derive(Debug, Default)]
pub struct ProtoManager {
    opts: EngineOpts,
    instances: BTreeMap<InstanceId, ProtoInstance>,
    roots: Vec<InstanceId>,
    next_id: u32,
}

impl ProtoManager {
    /// Empty manager.
    pub fn new(opts: EngineOpts) -> Self {
        Self {
            opts,
            ..Self::default()
        }
    }

    /// Options in effect.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Live instance `id`.
    pub fn instance(&self, id: InstanceId) -> ProtoResult<&ProtoInstance> {
        self.instances
            .get(&id)
            .ok_or(ProtoError::UnknownInstance(id))
    }

    fn instance_mut(&mut self, id: InstanceId) -> ProtoResult<&mut ProtoInstance> {
        self.instances
            .get_mut(&id)
            .ok_or(ProtoError::UnknownInstance(id))
    }

    /// All live instances in creation order.
    pub fn instances(&self) -> impl Iterator<Item = &ProtoInstance> {
        self.instances.values()
    }

    /// Top-level instances in load order.
    pub fn roots(&self) -> &[InstanceId] {
        &self.roots
    }

    /// Number of live instances, nested ones included.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// `true` if no instance is live.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Current value of `instance.parameter`.
    pub fn value(&self, instance: InstanceId, parameter: &str) -> ProtoResult<&Value> {
        Ok(&self.instance(instance)?.parameter(parameter)?.value)
    }

    /// Bindings of `instance.parameter` in the current scene.
    pub fn bindings(
        &self,
        scene: &dyn SceneAccess,
        instance: InstanceId,
        parameter: &str,
    ) -> ProtoResult<Vec<Binding>> {
        resolve_bindings(&self.instances, scene, instance, parameter)
    }

    /// Nesting depth of `id`; top-level instances have depth 0.
    pub fn depth(&self, id: InstanceId) -> usize {
        let mut depth = 0;
        let mut cur = self.instances.get(&id).and_then(|i| i.parent.as_ref());
        while let Some(slot) = cur {
            depth += 1;
            if depth > self.instances.len() {
                break;
            }
            cur = self
                .instances
                .get(&slot.instance)
                .and_then(|i| i.parent.as_ref());
        }
        depth
    }

    fn children_of(&self, id: InstanceId) -> Vec<InstanceId> {
        self.instances
            .values()
            .filter(|c| c.parent.as_ref().is_some_and(|p| p.instance == id))
            .map(|c| c.id)
            .collect()
    }

    fn is_ancestor(&self, ancestor: InstanceId, of: InstanceId) -> bool {
        let mut cur = self.instances.get(&of).and_then(|i| i.parent.as_ref());
        let mut steps = 0;
        while let Some(slot) = cur {
            if slot.instance == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.instances.len() {
                return false;
            }
            cur = self
                .instances
                .get(&slot.instance)
                .and_then(|i| i.parent.as_ref());
        }
        false
    }

    fn alloc_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Fetch `url`, create a top-level instance with declared defaults and expand it under
    /// `anchor` (root level when `None`).
    #[tracing::instrument(skip(self, ctx))]
    pub fn load_root(
        &mut self,
        ctx: &mut EditContext<'_>,
        url: &str,
        anchor: Option<NodeId>,
    ) -> ProtoResult<InstanceId> {
        let def = ctx.fetch.fetch(url)?;
        def.validate()?;

        let id = self.alloc_id();
        let mut inst = ProtoInstance::new(id, Some(url.to_string()), def, None);
        let nodes = pipeline::expand_at(&mut inst, &mut *ctx.scene, ctx.expander, anchor)?;
        tracing::debug!(instance = %id, template = inst.name(), nodes = nodes.len(), "loaded");

        self.instances.insert(id, inst);
        self.roots.push(id);
        ctx.render.request_render();
        Ok(id)
    }

    /// Destroy a top-level instance and everything nested in it.
    pub fn remove_root(&mut self, ctx: &mut EditContext<'_>, id: InstanceId) -> ProtoResult<()> {
        if self.instance(id)?.parent.is_some() {
            return Err(ProtoError::validation(format!(
                "{id} is nested; clear its slot instead"
            )));
        }
        self.destroy_instance(ctx, id);
        ctx.render.request_render();
        Ok(())
    }

    /// Apply a user edit to `instance.parameter`.
    ///
    /// The value is checked first; a rejected value changes nothing. Structural parameters
    /// (and any edit of a `Failed` instance) regenerate the instance, the others patch every
    /// bound field and its aliases. A render is requested once the edit completed, and also
    /// after a failed regeneration when [`EngineOpts::render_after_failed_regeneration`] is set.
    #[tracing::instrument(skip(self, ctx, instance, value), fields(instance = %instance))]
    pub fn set_parameter_value(
        &mut self,
        ctx: &mut EditContext<'_>,
        instance: InstanceId,
        parameter: &str,
        value: Value,
    ) -> ProtoResult<EditReport> {
        let inst = self.instance(instance)?;
        let param = inst.parameter(parameter)?;
        let kind = param.kind;
        let regenerates = param.regenerates || inst.state == RegenState::Failed;
        validate(kind, &value)?;
        if kind.is_list() {
            return Err(ProtoError::UnsupportedVariant(kind));
        }
        let target = ParamRef::new(instance, parameter);

        if kind == ValueKind::Node {
            if value.as_instance().is_some() {
                return Err(ProtoError::validation(format!(
                    "{target} holds nested instances; use instantiate_nested to fill it"
                )));
            }
            let removed = self.remove_instance_at(ctx, &target)?;
            return Ok(EditReport {
                target,
                outcome: EditOutcome::Cleared { removed },
                linked: Vec::new(),
                failed: Vec::new(),
            });
        }

        self.instance_mut(instance)?
            .parameter_mut(parameter)?
            .set(value.clone())?;
        let mut linked = Vec::new();
        self.sync_linked(instance, parameter, &value, &mut linked);

        let mut failed = Vec::new();
        let outcome = if regenerates {
            match self.regenerate_instance(ctx, instance, &mut failed) {
                Ok(nodes) => EditOutcome::Regenerated { nodes },
                Err(source) => {
                    if self.opts.render_after_failed_regeneration {
                        ctx.render.request_render();
                    }
                    return Err(ProtoError::RegenerationFailed {
                        instance,
                        source: Box::new(source),
                    });
                }
            }
        } else {
            let outcome = self.patch(ctx, instance, parameter, &value)?;
            self.regenerate_linked(ctx, &linked, &mut failed);
            outcome
        };
        for (id, e) in &failed {
            tracing::warn!(instance = %id, error = %e, "nested instance failed");
        }

        ctx.render.request_render();
        Ok(EditReport {
            target,
            outcome,
            linked,
            failed,
        })
    }

    fn patch(
        &mut self,
        ctx: &mut EditContext<'_>,
        instance: InstanceId,
        parameter: &str,
        value: &Value,
    ) -> ProtoResult<EditOutcome> {
        let bindings = resolve_bindings(&self.instances, &*ctx.scene, instance, parameter)?;
        if bindings.is_empty() {
            tracing::debug!(parameter, "parameter drives no field");
        }

        let mut prop = Propagation::default();
        for b in &bindings {
            prop.merge(propagate(&mut *ctx.scene, b.node, &b.field, value));
        }
        for f in &prop.failures {
            tracing::warn!(node = %f.node, field = %f.field, error = %f.error, "field write skipped");
        }

        Ok(EditOutcome::Patched {
            bindings,
            written: prop.written,
            failures: prop.failures,
        })
    }

    fn sync_linked(
        &mut self,
        instance: InstanceId,
        parameter: &str,
        value: &Value,
        out: &mut Vec<ParamRef>,
    ) {
        for child in self.children_of(instance) {
            let Some(c) = self.instances.get_mut(&child) else {
                continue;
            };
            let mut names = Vec::new();
            for p in c.parameters.values_mut() {
                if p.link.as_deref() == Some(parameter) {
                    p.value = value.clone();
                    names.push(p.name.clone());
                }
            }
            for name in names {
                let r = ParamRef::new(child, name.clone());
                if out.contains(&r) {
                    continue;
                }
                out.push(r);
                self.sync_linked(child, &name, value, out);
            }
        }
    }

    fn regenerate_linked(
        &mut self,
        ctx: &mut EditContext<'_>,
        linked: &[ParamRef],
        failed: &mut Vec<(InstanceId, ProtoError)>,
    ) {
        let mut done: Vec<InstanceId> = Vec::new();
        for r in linked {
            let Some(child) = self.instances.get(&r.instance) else {
                continue;
            };
            let structural = child
                .parameters
                .get(&r.parameter)
                .is_some_and(|p| p.regenerates);
            if !structural && child.state != RegenState::Failed {
                continue;
            }
            // Rebuilding an ancestor already rebuilt this one.
            if done
                .iter()
                .any(|d| *d == r.instance || self.is_ancestor(*d, r.instance))
            {
                continue;
            }
            if let Err(e) = self.regenerate_instance(ctx, r.instance, failed) {
                failed.push((r.instance, e));
            }
            done.push(r.instance);
        }
    }

    fn regenerate_instance(
        &mut self,
        ctx: &mut EditContext<'_>,
        id: InstanceId,
        failed: &mut Vec<(InstanceId, ProtoError)>,
    ) -> ProtoResult<Vec<NodeId>> {
        let inst = self.instance_mut(id)?;
        match pipeline::regenerate(inst, &mut *ctx.scene, ctx.expander) {
            Ok(nodes) => {
                self.reanchor_children(ctx, id, failed);
                Ok(nodes)
            }
            Err(e) => {
                self.fail_descendants(ctx, id);
                Err(e)
            }
        }
    }

    /// Re-expand nested instances of `parent` whose nodes went away with the parent's old
    /// fragment. They go back under their own anchor if it survived, else under the first
    /// binding of their slot. Children still in the scene are left alone.
    fn reanchor_children(
        &mut self,
        ctx: &mut EditContext<'_>,
        parent: InstanceId,
        failed: &mut Vec<(InstanceId, ProtoError)>,
    ) {
        for child in self.children_of(parent) {
            let Some(inst) = self.instances.get(&child) else {
                continue;
            };
            let Some(slot) = inst.parent.clone() else {
                continue;
            };
            let alive = inst.state == RegenState::Expanded
                && inst
                    .expanded_nodes
                    .iter()
                    .any(|id| ctx.scene.node(*id).is_some());
            if alive {
                continue;
            }
            let anchor = match inst.anchor.filter(|a| ctx.scene.node(*a).is_some()) {
                Some(a) => Some(a),
                None => self.slot_anchor(ctx, parent, &slot),
            };

            let Some(inst) = self.instances.get_mut(&child) else {
                continue;
            };
            pipeline::teardown(inst, &mut *ctx.scene);
            let Some(anchor) = anchor else {
                inst.state = RegenState::Failed;
                failed.push((
                    child,
                    ProtoError::validation(format!("{slot} is no longer bound to a node")),
                ));
                self.fail_descendants(ctx, child);
                continue;
            };
            match pipeline::expand_at(inst, &mut *ctx.scene, ctx.expander, Some(anchor)) {
                Ok(_) => self.reanchor_children(ctx, child, failed),
                Err(e) => {
                    failed.push((child, e));
                    self.fail_descendants(ctx, child);
                }
            }
        }
    }

    fn slot_anchor(
        &self,
        ctx: &EditContext<'_>,
        parent: InstanceId,
        slot: &ParamRef,
    ) -> Option<NodeId> {
        match resolve_bindings(&self.instances, &*ctx.scene, parent, &slot.parameter) {
            Ok(bindings) => {
                if bindings.len() > 1 {
                    tracing::warn!(
                        slot = %slot,
                        bindings = bindings.len(),
                        "slot bound to several nodes; using the first"
                    );
                }
                bindings.first().map(|b| b.node)
            }
            Err(e) => {
                tracing::warn!(slot = %slot, error = %e, "cannot resolve slot");
                None
            }
        }
    }

    /// Write the current value of the node parameter `target` into its bound slot fields.
    fn mirror_slot(&mut self, ctx: &mut EditContext<'_>, target: &ParamRef) {
        let value = match self.value(target.instance, &target.parameter) {
            Ok(v) => v.clone(),
            Err(_) => return,
        };
        if let Err(e) = self.patch(ctx, target.instance, &target.parameter, &value) {
            tracing::warn!(target = %target, error = %e, "cannot mirror slot value");
        }
    }

    fn fail_descendants(&mut self, ctx: &mut EditContext<'_>, id: InstanceId) {
        for child in self.children_of(id) {
            if let Some(inst) = self.instances.get_mut(&child) {
                pipeline::teardown(inst, &mut *ctx.scene);
                inst.state = RegenState::Failed;
            }
            self.fail_descendants(ctx, child);
        }
    }

    fn destroy_instance(&mut self, ctx: &mut EditContext<'_>, id: InstanceId) -> usize {
        let mut destroyed = 0;
        for child in self.children_of(id) {
            destroyed += self.destroy_instance(ctx, child);
        }
        if let Some(mut inst) = self.instances.remove(&id) {
            pipeline::teardown(&mut inst, &mut *ctx.scene);
            destroyed += 1;
        }
        self.roots.retain(|r| *r != id);
        destroyed
    }

    /// Instantiate the template at `url` under `anchor` and place it in the node parameter
    /// `target`.
    ///
    /// The new instance is fully expanded before the slot's previous instance is torn down,
    /// so a failed load or expansion leaves the slot as it was. `anchor` may not belong to
    /// the instance being replaced or to anything nested in it. The new instance always gets a
    /// fresh id, so it cannot become its own ancestor.
    #[tracing::instrument(skip(self, ctx, target), fields(target = %target))]
    pub fn instantiate_nested(
        &mut self,
        ctx: &mut EditContext<'_>,
        url: &str,
        anchor: NodeId,
        target: &ParamRef,
    ) -> ProtoResult<InstanceId> {
        let kind = self.instance(target.instance)?.parameter(&target.parameter)?.kind;
        if kind != ValueKind::Node {
            return Err(ProtoError::TypeMismatch {
                expected: ValueKind::Node,
                found: kind,
            });
        }
        let depth = self.depth(target.instance) + 1;
        if depth > self.opts.max_nesting_depth {
            return Err(ProtoError::validation(format!(
                "nesting depth {depth} exceeds the limit of {}",
                self.opts.max_nesting_depth
            )));
        }
        let anchor_owner = ctx
            .scene
            .node(anchor)
            .ok_or(ProtoError::UnknownNode(anchor))?
            .owner;
        let previous = self.value(target.instance, &target.parameter)?.as_instance();
        if let (Some(old), Some(owner)) = (previous, anchor_owner) {
            if owner == old || self.is_ancestor(old, owner) {
                return Err(ProtoError::validation(format!(
                    "anchor {anchor} belongs to {owner}, which {target} is about to replace"
                )));
            }
        }

        let def = ctx.fetch.fetch(url)?;
        def.validate()?;
        let id = self.alloc_id();

        let mut inst = ProtoInstance::new(id, Some(url.to_string()), def, Some(target.clone()));
        pipeline::expand_at(&mut inst, &mut *ctx.scene, ctx.expander, Some(anchor))?;
        self.instances.insert(id, inst);

        if let Some(old) = previous {
            let destroyed = self.destroy_instance(ctx, old);
            tracing::debug!(replaced = %old, destroyed, "replaced nested instance");
        }
        self.instance_mut(target.instance)?
            .parameter_mut(&target.parameter)?
            .value = Value::Node(Some(id));
        self.mirror_slot(ctx, target);

        ctx.render.request_render();
        Ok(id)
    }

    /// Tear down the instance held by the node parameter `target` and clear it to `NULL`.
    /// Returns the removed instance, if any.
    #[tracing::instrument(skip(self, ctx, target), fields(target = %target))]
    pub fn remove_instance_at(
        &mut self,
        ctx: &mut EditContext<'_>,
        target: &ParamRef,
    ) -> ProtoResult<Option<InstanceId>> {
        let param = self.instance(target.instance)?.parameter(&target.parameter)?;
        if param.kind != ValueKind::Node {
            return Err(ProtoError::TypeMismatch {
                expected: ValueKind::Node,
                found: param.kind,
            });
        }
        let held = param.value.as_instance();
        if let Some(old) = held {
            let destroyed = self.destroy_instance(ctx, old);
            tracing::debug!(removed = %old, destroyed, "cleared slot");
        }
        self.instance_mut(target.instance)?
            .parameter_mut(&target.parameter)?
            .value = Value::Node(None);
        self.mirror_slot(ctx, target);

        ctx.render.request_render();
        Ok(held)
    }

    /// Make `child.child_param` mirror `parent_param` of the instance holding `child`.
    ///
    /// Takes effect from the next edit of `parent_param`. Kinds must match; node and list
    /// parameters cannot be linked.
    pub fn link_parameter(
        &mut self,
        child: InstanceId,
        child_param: &str,
        parent_param: &str,
    ) -> ProtoResult<()> {
        let c = self.instance(child)?;
        let slot = c
            .parent
            .clone()
            .ok_or_else(|| ProtoError::validation(format!("{child} is not nested")))?;
        let child_kind = c.parameter(child_param)?.kind;
        let parent_kind = self.instance(slot.instance)?.parameter(parent_param)?.kind;
        if parent_kind == ValueKind::Node || parent_kind.is_list() {
            return Err(ProtoError::validation(format!(
                "{parent_kind} parameters cannot be linked"
            )));
        }
        if child_kind != parent_kind {
            return Err(ProtoError::TypeMismatch {
                expected: child_kind,
                found: parent_kind,
            });
        }
        self.instance_mut(child)?.parameter_mut(child_param)?.link = Some(parent_param.to_string());
        Ok(())
    }

    /// Depth-first listing of every parameter, nested instances right after their slot.
    pub fn parameter_rows(&self) -> Vec<ParameterRow> {
        let mut rows = Vec::new();
        for root in &self.roots {
            self.push_rows(*root, 0, &mut rows);
        }
        rows
    }

    fn push_rows(&self, id: InstanceId, depth: usize, rows: &mut Vec<ParameterRow>) {
        let Some(inst) = self.instances.get(&id) else {
            return;
        };
        for p in inst.parameters() {
            rows.push(ParameterRow {
                instance: id,
                depth,
                name: p.name.clone(),
                kind: p.kind,
                label: p.value.label(),
                regenerates: p.regenerates,
                link: p.link.clone(),
            });
            if let Some(child) = p.value.as_instance() {
                self.push_rows(child, depth + 1, rows);
            }
        }
    }

    /// Asset types the node parameter `instance.parameter` accepts.
    ///
    /// Read from the `type` string field of the slot's bound nodes and combined per
    /// [`EngineOpts::slot_policy`]. Empty means unrestricted.
    pub fn slot_filter(
        &self,
        scene: &dyn SceneAccess,
        instance: InstanceId,
        parameter: &str,
    ) -> ProtoResult<Vec<String>> {
        let kind = self.instance(instance)?.parameter(parameter)?.kind;
        if kind != ValueKind::Node {
            return Err(ProtoError::TypeMismatch {
                expected: ValueKind::Node,
                found: kind,
            });
        }

        let mut types: Vec<String> = Vec::new();
        for b in self.bindings(scene, instance, parameter)? {
            let Some(Value::String(ty)) = scene.node(b.node).and_then(|n| n.field("type")) else {
                continue;
            };
            if ty.is_empty() {
                continue;
            }
            if !types.contains(ty) {
                types.push(ty.clone());
            }
            if self.opts.slot_policy == SlotFilterPolicy::FirstWins {
                break;
            }
        }
        Ok(types)
    }

    /// Fill `target` from the asset library: [`REMOVE_KEY`] clears the slot, any other key
    /// instantiates that asset's template under the slot's first bound node.
    #[tracing::instrument(skip(self, ctx, library, target), fields(target = %target))]
    pub fn insert_asset(
        &mut self,
        ctx: &mut EditContext<'_>,
        library: &AssetLibrary,
        key: &str,
        target: &ParamRef,
    ) -> ProtoResult<Option<InstanceId>> {
        if key == REMOVE_KEY {
            self.remove_instance_at(ctx, target)?;
            return Ok(None);
        }

        let entry = library
            .get(key)
            .ok_or_else(|| ProtoError::validation(format!("unknown asset '{key}'")))?;
        let filter = self.slot_filter(&*ctx.scene, target.instance, &target.parameter)?;
        if !entry.fits(&filter) {
            return Err(ProtoError::validation(format!(
                "asset '{key}' does not fit {target} (accepts {})",
                filter.join(", ")
            )));
        }
        let anchor = self
            .bindings(&*ctx.scene, target.instance, &target.parameter)?
            .first()
            .map(|b| b.node)
            .ok_or_else(|| {
                ProtoError::validation(format!("{target} is not bound to any node"))
            })?;

        self.instantiate_nested(ctx, &entry.url, anchor, target)
            .map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/proto/manager.rs"]
mod tests;
