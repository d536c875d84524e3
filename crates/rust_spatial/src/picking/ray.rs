//! Rays and ray-vs-volume hit tests

use crate::bounds::{Aabb, BoundingSphere, OrientedBox};
use crate::foundation::math::{Vec3, DEGENERATE_LENGTH};
use crate::{Result, SpatialError};

/// Allowed deviation of a ray direction from unit length
pub const UNIT_TOLERANCE: f32 = 1e-5;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray, unit length
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray from an already normalized direction
    ///
    /// A direction that is not unit length is a caller bug and trips a debug
    /// assertion; use [`Ray::normalized`] for arbitrary input.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        debug_assert!(
            (direction.magnitude() - 1.0).abs() <= UNIT_TOLERANCE,
            "ray direction must be unit length, got {direction:?}"
        );
        Self { origin, direction }
    }

    /// Creates a ray, normalizing `direction`
    pub fn normalized(origin: Vec3, direction: Vec3) -> Result<Self> {
        let direction = direction
            .try_normalize(DEGENERATE_LENGTH)
            .ok_or(SpatialError::ZeroVector("ray direction"))?;
        Ok(Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Test the ray against `target`, reporting a hit only within `max_distance`
    ///
    /// A primitive further away than `max_distance` still reports its
    /// distance with `hit == false`.
    pub fn hit<V: RayCast + ?Sized>(&self, target: &V, max_distance: f32) -> RayHit {
        match target.ray_intersection(self) {
            Some(distance) => RayHit { hit: distance <= max_distance, distance },
            None => RayHit::MISS,
        }
    }

    /// Index and distance of the nearest target hit within `max_distance`
    pub fn closest_hit<V: RayCast>(&self, targets: &[V], max_distance: f32) -> Option<(usize, f32)> {
        targets
            .iter()
            .enumerate()
            .filter_map(|(i, target)| {
                let hit = self.hit(target, max_distance);
                hit.hit.then_some((i, hit.distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Whether the primitive was hit within the allowed distance
    pub hit: bool,
    /// Distance from the ray origin; infinite when the primitive was missed
    pub distance: f32,
}

impl RayHit {
    /// The ray missed the primitive entirely
    pub const MISS: Self = Self { hit: false, distance: f32::INFINITY };
}

/// Anything a ray can be tested against
pub trait RayCast {
    /// Distance along `ray` to the first intersection, `None` on a miss
    ///
    /// Origins inside a solid volume report a distance of zero.
    fn ray_intersection(&self, ray: &Ray) -> Option<f32>;
}

impl RayCast for Aabb {
    /// Slab method, after "An Efficient and Robust Ray–Box Intersection Algorithm"
    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Entry distance, or 0 when starting inside the box
        if tmax >= tmin && tmax >= 0.0 {
            Some(tmin.max(0.0))
        } else {
            None
        }
    }
}

impl RayCast for OrientedBox {
    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        // Into the box frame, where it is an AABB around the origin
        let local = Ray {
            origin: self.orientation * (ray.origin - self.center),
            direction: self.orientation * ray.direction,
        };
        Aabb::new(-self.extents, self.extents).ray_intersection(&local)
    }
}

impl RayCast for BoundingSphere {
    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;
        if c <= 0.0 {
            return Some(0.0);
        }

        // Unit direction, so the quadratic reduces to the half-b form
        let b = oc.dot(&ray.direction);
        let discriminant = b * b - c;
        if b > 0.0 || discriminant < 0.0 {
            return None;
        }
        Some(-b - discriminant.sqrt())
    }
}

/// A triangle for picking against mesh geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Face normal, wound clockwise for a left-handed view
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).normalize()
    }

    /// Calculates the centroid of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Möller-Trumbore intersection returning `(t, u, v)`
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000_001;

        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None
        }
    }
}

impl RayCast for Triangle {
    fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.intersect_ray(ray).map(|(t, _, _)| t)
    }
}
