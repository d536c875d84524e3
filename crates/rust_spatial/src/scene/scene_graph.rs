//! Arena-backed transform hierarchy
//!
//! Nodes live in a slot map and refer to their children by key; a node never
//! stores its parent. Operations that move a node therefore take the old
//! parent explicitly.
//!
//! World transforms are cached per node ([`RelatedTransform`]) and refreshed
//! only when the topology changes. Editing a pose leaves descendants stale
//! until [`SceneGraph::resync_subtree`] is called.

use slotmap::SlotMap;

use crate::bounds::Aabb;
use crate::culling::FrustumCuller;
use crate::foundation::math::Mat4;
use crate::scene::NodeKey;
use crate::transform::{EulerTransform, RelatedTransform};
use crate::{Result, SpatialError};

/// A single node of the hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Optional display name
    pub name: Option<String>,
    /// Local bounds used for culling, if the node is drawable
    pub bounds: Option<Aabb>,
    transform: RelatedTransform,
    children: Vec<NodeKey>,
}

impl SceneNode {
    fn new(local: EulerTransform) -> Self {
        Self {
            name: None,
            bounds: None,
            transform: RelatedTransform::new(local),
            children: Vec::new(),
        }
    }

    /// Pose plus cached world transform
    pub fn transform(&self) -> &RelatedTransform {
        &self.transform
    }

    /// Edit the local pose; see [`RelatedTransform::modify`]
    pub fn modify<R>(&mut self, edit: impl FnOnce(&mut EulerTransform) -> R) -> R {
        self.transform.modify(edit)
    }

    /// Child keys in insertion order
    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}

/// Hierarchy of posed nodes
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: SlotMap<NodeKey, SceneNode>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node
    pub fn insert(&mut self, local: EulerTransform) -> NodeKey {
        self.nodes.insert(SceneNode::new(local))
    }

    /// Add a named root node
    pub fn insert_named(&mut self, name: impl Into<String>, local: EulerTransform) -> NodeKey {
        let mut node = SceneNode::new(local);
        node.name = Some(name.into());
        self.nodes.insert(node)
    }

    /// Node by key
    pub fn get(&self, key: NodeKey) -> Option<&SceneNode> {
        self.nodes.get(key)
    }

    /// Mutable node by key
    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut SceneNode> {
        self.nodes.get_mut(key)
    }

    /// Transform of a node
    pub fn transform(&self, key: NodeKey) -> Result<&RelatedTransform> {
        Ok(&self.node(key)?.transform)
    }

    /// Children of a node
    pub fn children(&self, key: NodeKey) -> Result<&[NodeKey]> {
        Ok(&self.node(key)?.children)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a root node under `parent`
    pub fn add_child(&mut self, parent: NodeKey, child: NodeKey) -> Result<()> {
        self.reparent(child, parent, None)
    }

    /// Move `child` from `old_parent` (or from the roots) under `new_parent`
    ///
    /// The moved node's world cache is recomposed from its local pose, the
    /// stale old parent and the new parent; every descendant is then refreshed
    /// in pre-order from its own local pose.
    ///
    /// Passing `None` for a node that already has a parent is rejected with
    /// [`SpatialError::NotARoot`], so a node never sits in two child lists.
    pub fn reparent(&mut self, child: NodeKey, new_parent: NodeKey, old_parent: Option<NodeKey>) -> Result<()> {
        let child_is_parented = self.node(child)?.transform.is_parented();
        let new_transform = self.node(new_parent)?.transform;
        let old_transform = match old_parent {
            Some(old) => {
                let old_node = self.node(old)?;
                if !old_node.children.contains(&child) {
                    return Err(SpatialError::NotAChild);
                }
                Some(old_node.transform)
            }
            None if child_is_parented => return Err(SpatialError::NotARoot),
            None => None,
        };

        if self.subtree(child)?.iter().any(|(key, _)| *key == new_parent) {
            return Err(SpatialError::CycleDetected);
        }

        let mut transform = self.node(child)?.transform;
        transform.on_reparent(&new_transform, old_transform.as_ref())?;

        if let Some(old) = old_parent {
            self.node_mut(old)?.children.retain(|key| *key != child);
        }
        let siblings = &mut self.node_mut(new_parent)?.children;
        if !siblings.contains(&child) {
            siblings.push(child);
        }
        self.node_mut(child)?.transform = transform;

        log::debug!("Re-parented {child:?} under {new_parent:?} (was {old_parent:?})");
        self.resync_subtree(child)
    }

    /// Make `child` a root again
    pub fn detach(&mut self, child: NodeKey, parent: NodeKey) -> Result<()> {
        let siblings = &mut self.node_mut(parent)?.children;
        let before = siblings.len();
        siblings.retain(|key| *key != child);
        if siblings.len() == before {
            return Err(SpatialError::NotAChild);
        }

        self.node_mut(child)?.transform.detach();
        log::debug!("Detached {child:?} from {parent:?}");
        self.resync_subtree(child)
    }

    /// Remove a node and everything below it, returning how many nodes went
    ///
    /// A parented node must be removed together with its parent key.
    pub fn remove_subtree(&mut self, key: NodeKey, parent: Option<NodeKey>) -> Result<usize> {
        if parent.is_none() && self.node(key)?.transform.is_parented() {
            return Err(SpatialError::NotARoot);
        }
        if let Some(parent) = parent {
            let siblings = &mut self.node_mut(parent)?.children;
            if !siblings.contains(&key) {
                return Err(SpatialError::NotAChild);
            }
            siblings.retain(|k| *k != key);
        }

        let doomed = self.subtree(key)?;
        for (node, _) in &doomed {
            self.nodes.remove(*node);
        }
        log::debug!("Removed {} node(s) rooted at {key:?}", doomed.len());
        Ok(doomed.len())
    }

    /// Recompose the world cache of every descendant of `root` from the
    /// parent's cache and the descendant's local pose
    ///
    /// `root` itself is left as is.
    pub fn resync_subtree(&mut self, root: NodeKey) -> Result<()> {
        for (key, parent) in self.subtree(root)? {
            let Some(parent) = parent else { continue };
            let parent_transform = self.node(parent)?.transform;
            self.node_mut(key)?.transform.on_reparent(&parent_transform, None)?;
        }
        Ok(())
    }

    /// Depth-first pre-order walk below and including `root`
    pub fn visit_pre_order<F>(&self, root: NodeKey, mut visit: F) -> Result<()>
    where
        F: FnMut(NodeKey, &SceneNode, usize),
    {
        self.node(root)?;
        let mut stack = vec![(root, 0)];
        while let Some((key, depth)) = stack.pop() {
            let node = self.node(key)?;
            visit(key, node, depth);
            stack.extend(node.children.iter().rev().map(|child| (*child, depth + 1)));
        }
        Ok(())
    }

    /// Number of nodes in the subtree rooted at `root`
    pub fn instance_count(&self, root: NodeKey) -> Result<usize> {
        let mut count = 0;
        self.visit_pre_order(root, |_, _, _| count += 1)?;
        Ok(count)
    }

    /// Cached world matrices of the subtree, in pre-order
    pub fn world_matrices(&self, root: NodeKey) -> Result<Vec<Mat4>> {
        let mut matrices = Vec::new();
        self.visit_pre_order(root, |_, node, _| {
            matrices.push(node.transform.abs_local_to_world_matrix());
        })?;
        Ok(matrices)
    }

    /// Nodes of the subtree whose bounds survive frustum culling, in pre-order
    pub fn visible_nodes(&self, root: NodeKey, culler: &FrustumCuller) -> Result<Vec<NodeKey>> {
        let mut visible = Vec::new();
        self.visit_pre_order(root, |key, node, _| {
            if let Some(bounds) = &node.bounds {
                if culler.is_visible(bounds, &node.transform) {
                    visible.push(key);
                }
            }
        })?;
        Ok(visible)
    }

    /// Pre-order keys of the subtree, each with its parent inside the subtree
    fn subtree(&self, root: NodeKey) -> Result<Vec<(NodeKey, Option<NodeKey>)>> {
        self.node(root)?;
        let mut out = Vec::new();
        let mut stack = vec![(root, None)];
        while let Some((key, parent)) = stack.pop() {
            out.push((key, parent));
            let node = self.node(key)?;
            stack.extend(node.children.iter().rev().map(|child| (*child, Some(key))));
        }
        Ok(out)
    }

    fn node(&self, key: NodeKey) -> Result<&SceneNode> {
        self.nodes.get(key).ok_or(SpatialError::NodeNotFound)
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut SceneNode> {
        self.nodes.get_mut(key).ok_or(SpatialError::NodeNotFound)
    }
}
