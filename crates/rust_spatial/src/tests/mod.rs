//! Cross-module scenarios
//!
//! Unit tests live next to the code they cover; these exercise the camera,
//! scene graph, culling and picking together.

mod hierarchy_scenarios;
mod picking_scenarios;

use crate::bounds::Aabb;
use crate::foundation::math::Vec3;

/// Unit cube centered on the local origin, the shared instance bounds
fn unit_cube() -> Aabb {
    Aabb::from_center_extents(Vec3::zeros(), Vec3::new(0.5, 0.5, 0.5))
}
