use super::unit_cube;
use crate::bounds::{BoundingSphere, OrientedBox};
use crate::config::PickingConfig;
use crate::foundation::logging;
use crate::foundation::math::Vec3;
use crate::picking::{project_point, screen_ray, Viewport};
use crate::render::Camera;
use crate::scene::SceneGraph;
use crate::transform::EulerTransform;
use approx::assert_relative_eq;

fn camera() -> Camera {
    let mut camera = Camera::perspective(Vec3::new(0.0, 0.0, -10.0), 60.0, 4.0 / 3.0, 0.5, 1000.0);
    camera.set_viewport(Viewport::new(800.0, 600.0));
    camera
}

#[test]
fn center_pixel_picks_the_nearest_sphere() {
    logging::init();
    let spheres = [
        BoundingSphere::new(Vec3::new(0.0, 0.0, 20.0), 1.0),
        BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0),
    ];
    let ray = screen_ray(&camera(), 400.0, 300.0).unwrap();

    let (index, distance) = ray.closest_hit(&spheres, PickingConfig::default().max_distance).unwrap();
    assert_eq!(index, 1);
    assert_relative_eq!(distance, 14.0, epsilon = 1e-3);

    assert!(ray.closest_hit(&spheres, 10.0).is_none());
}

#[test]
fn projected_point_picks_back_to_itself() {
    logging::init();
    let camera = camera();
    let target = BoundingSphere::new(Vec3::new(2.0, 1.0, 5.0), 0.1);

    let pixel = project_point(&camera, &target.center).unwrap();
    let ray = screen_ray(&camera, pixel.x, pixel.y).unwrap();
    let hit = ray.hit(&target, 100.0);
    assert!(hit.hit);
    assert_relative_eq!(ray.point_at(hit.distance + 0.1), target.center, epsilon = 1e-2);
}

#[test]
fn scene_node_boxes_are_pickable() {
    logging::init();
    let mut graph = SceneGraph::new();
    let near = graph.insert(EulerTransform::from_parts(
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(0.3, 0.4, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
    ));
    let far = graph.insert(EulerTransform::from_position(Vec3::new(0.0, 0.0, 12.0)));

    let boxes: Vec<OrientedBox> = [near, far]
        .iter()
        .map(|key| {
            let world = graph.transform(*key).unwrap().abs_local_to_world_matrix();
            OrientedBox::from_aabb(&unit_cube(), &world)
        })
        .collect();

    let ray = screen_ray(&camera(), 400.0, 300.0).unwrap();
    let (index, distance) = ray.closest_hit(&boxes, 100.0).unwrap();
    assert_eq!(index, 0);
    assert!(distance < 13.0);
}
