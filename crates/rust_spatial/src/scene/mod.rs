//! Scene hierarchy

pub mod scene_graph;

pub use scene_graph::{SceneGraph, SceneNode};

slotmap::new_key_type! {
    /// Handle to a node in a [`SceneGraph`]
    pub struct NodeKey;
}
