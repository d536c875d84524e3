//! Ray picking
//!
//! [`screen_ray`] produces a world ray for a pixel; [`Ray::hit`] and
//! [`Ray::closest_hit`] test it against anything implementing [`RayCast`].

pub mod ray;
pub mod screen_ray;

pub use ray::{Ray, RayCast, RayHit, Triangle};
pub use screen_ray::{project_point, screen_ray, CameraView, Viewport};
