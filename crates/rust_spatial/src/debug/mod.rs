//! Debug visualization
//!
//! Wireframe builders for bounding volumes and frustums. Rendering them is
//! left to the caller.

pub mod wireframe;

pub use wireframe::{DebugVertex, WireframeBatch, WireframeMesh, BOX_EDGES};
