use super::transform::PartTransform;
use glam::Vec3;

/// Named node of a rig blueprint, listed after its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDef {
    pub name: String,
    /// Parent node name (None for the rig root)
    pub parent: Option<String>,
    /// Bind-pose translation relative to the parent
    pub offset: Vec3,
}

impl NodeDef {
    pub fn new(name: impl Into<String>, parent: Option<&str>, offset: Vec3) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_owned),
            offset,
        }
    }
}

/// Index of a node inside a [`RigHierarchy`], resolved once by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) usize);

impl NodeHandle {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct RigNode {
    name: String,
    parent: Option<usize>,
    local: PartTransform,
}

/// Tree of named nodes with local transforms.
///
/// Nodes are stored in topological order (parents before children) and that
/// order is kept by every mutation, so forward passes can compute world
/// transforms in one sweep.
#[derive(Debug, Clone)]
pub struct RigHierarchy {
    nodes: Vec<RigNode>,
}

impl RigHierarchy {
    /// Build from a blueprint. The first entry is the root. Entries whose
    /// parent is unknown are dropped (with everything below them).
    pub fn from_blueprint(defs: &[NodeDef]) -> Self {
        let mut hierarchy = RigHierarchy { nodes: Vec::with_capacity(defs.len()) };

        for def in defs {
            let parent = match &def.parent {
                None if hierarchy.nodes.is_empty() => None,
                None => {
                    log::warn!("Second root `{}` attached under the rig root", def.name);
                    Some(0)
                }
                Some(name) => match hierarchy.find(name) {
                    Some(handle) => Some(handle.0),
                    None => {
                        log::warn!("Node `{}` skipped: parent `{}` not found", def.name, name);
                        continue;
                    }
                },
            };
            hierarchy.nodes.push(RigNode {
                name: def.name.clone(),
                parent,
                local: PartTransform::from_translation(def.offset),
            });
        }
        hierarchy
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The rig root, if the hierarchy has any node
    pub fn root(&self) -> Option<NodeHandle> {
        (!self.nodes.is_empty()).then_some(NodeHandle(0))
    }

    pub fn find(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|node| node.name == name)
            .map(NodeHandle)
    }

    pub fn name(&self, handle: NodeHandle) -> &str {
        &self.nodes[handle.0].name
    }

    pub fn parent(&self, handle: NodeHandle) -> Option<NodeHandle> {
        self.nodes[handle.0].parent.map(NodeHandle)
    }

    pub fn local(&self, handle: NodeHandle) -> &PartTransform {
        &self.nodes[handle.0].local
    }

    pub fn local_mut(&mut self, handle: NodeHandle) -> &mut PartTransform {
        &mut self.nodes[handle.0].local
    }

    /// World transform of one node (walks the parent chain)
    pub fn world(&self, handle: NodeHandle) -> PartTransform {
        let node = &self.nodes[handle.0];
        match node.parent {
            Some(parent) => self.world(NodeHandle(parent)).then(&node.local),
            None => node.local,
        }
    }

    /// World transforms of all nodes in one forward pass
    pub fn world_transforms(&self) -> Vec<PartTransform> {
        let mut world: Vec<PartTransform> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            // World = parent world * local
            let transform = match node.parent {
                Some(parent) => world[parent].then(&node.local),
                None => node.local,
            };
            world.push(transform);
        }
        world
    }

    /// Move `handle` under `new_parent`, keeping its world transform.
    ///
    /// Returns false (and changes nothing) when the move would break
    /// topological order, i.e. the new parent is not stored before the node.
    pub fn reparent(&mut self, handle: NodeHandle, new_parent: NodeHandle) -> bool {
        if new_parent.0 >= handle.0 {
            log::warn!(
                "Cannot move `{}` under `{}`",
                self.nodes[handle.0].name,
                self.nodes[new_parent.0].name
            );
            return false;
        }
        if self.nodes[handle.0].parent == Some(new_parent.0) {
            return true;
        }

        let world = self.world(handle);
        let parent_world = self.world(new_parent);
        let node = &mut self.nodes[handle.0];
        node.parent = Some(new_parent.0);
        node.local = parent_world.relative(&world);
        true
    }
}
