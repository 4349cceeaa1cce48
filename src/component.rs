//! Component ownership tree.
//!
//! A component is a lifecycle-managed node: it is created by an explicit
//! spawn from a live parent (the parent becomes sole owner), may hold one
//! host-owned scene resource, and is destroyed exactly once — either
//! directly or cascaded from its parent. The tree only records structure;
//! teardown ordering lives in [`crate::stage::Stage::destroy`], which also
//! clears the scheduler and bus entries a node left behind.
//!
//! There is no "destroyed" flag: absence from the tree *is* destruction.
//! Operations against a stale id resolve to nothing and are treated as
//! logged no-ops by the stage.

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;

use std::collections::HashMap;

use uuid::Uuid;

/// Unique identifier for a component.
pub type ComponentId = Uuid;

/// Opaque token for a host-owned scene/GPU resource held by a component.
///
/// The stage never dereferences the token; it only queues it for release
/// when the owning component is destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// One node in the ownership tree.
pub(crate) struct ComponentNode {
    pub parent: Option<ComponentId>,
    /// Owned children in creation order.
    pub children: Vec<ComponentId>,
    /// Scene resource held directly by this component, if any.
    pub scene: Option<SceneHandle>,
}

/// Id-keyed store of live components.
pub(crate) struct ComponentTree {
    nodes: HashMap<ComponentId, ComponentNode>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self { nodes: HashMap::new() }
    }

    /// Insert a parentless root node and return its id.
    pub fn insert_root(&mut self) -> ComponentId {
        let id = Uuid::new_v4();
        self.nodes.insert(id, ComponentNode { parent: None, children: Vec::new(), scene: None });
        id
    }

    /// Create a child under `parent`. Returns `None` if the parent is not live.
    pub fn spawn(&mut self, parent: ComponentId) -> Option<ComponentId> {
        if !self.nodes.contains_key(&parent) {
            return None;
        }
        let id = Uuid::new_v4();
        self.nodes
            .insert(id, ComponentNode { parent: Some(parent), children: Vec::new(), scene: None });
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        Some(id)
    }

    /// Remove a node, returning it if it was present. Children are not touched.
    pub fn remove(&mut self, id: ComponentId) -> Option<ComponentNode> {
        self.nodes.remove(&id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Parent of `id`, if `id` is live and not the root.
    pub fn parent_of(&self, id: ComponentId) -> Option<ComponentId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children of `id` in creation order. Empty for stale ids.
    pub fn children_of(&self, id: ComponentId) -> &[ComponentId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    /// Drain the child list of `id`, leaving the node childless.
    pub fn take_children(&mut self, id: ComponentId) -> Vec<ComponentId> {
        self.nodes.get_mut(&id).map_or_else(Vec::new, |n| std::mem::take(&mut n.children))
    }

    /// Remove `child` from `parent`'s ownership list.
    pub fn detach_child(&mut self, parent: ComponentId, child: ComponentId) {
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
    }

    /// Attach a scene resource to a live node. Returns `false` for stale ids.
    pub fn set_scene(&mut self, id: ComponentId, handle: SceneHandle) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.scene = Some(handle);
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}
