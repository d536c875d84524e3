//! Render-facing primitives
//!
//! Only the camera lives here; shader and buffer management belong to the
//! renderer that consumes the matrices.

pub mod camera;

pub use camera::Camera;
