use super::unit_cube;
use crate::culling::FrustumCuller;
use crate::foundation::logging;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::foundation::math::constants::HALF_PI;
use crate::scene::SceneGraph;
use crate::transform::EulerTransform;
use approx::assert_relative_eq;

fn culler() -> FrustumCuller {
    FrustumCuller::new(&Mat4::identity(), &Mat4::perspective_fov_lh(HALF_PI, 1.0, 0.5, 1000.0))
}

#[test]
fn moved_parent_culls_child_only_after_resync() {
    logging::init();
    let mut graph = SceneGraph::new();
    let parent = graph.insert(EulerTransform::from_position(Vec3::new(0.0, 0.0, 10.0)));
    let child = graph.insert(EulerTransform::new());
    graph.add_child(parent, child).unwrap();
    graph.get_mut(child).unwrap().bounds = Some(unit_cube());

    assert_eq!(graph.visible_nodes(parent, &culler()).unwrap(), vec![child]);

    graph
        .get_mut(parent)
        .unwrap()
        .modify(|pose| pose.set_position(Vec3::new(0.0, 0.0, -10.0)));

    // The child cache still holds the old parent placement
    assert_eq!(graph.visible_nodes(parent, &culler()).unwrap(), vec![child]);

    graph.resync_subtree(parent).unwrap();
    assert!(graph.visible_nodes(parent, &culler()).unwrap().is_empty());
}

#[test]
fn orbiting_pose_matches_scene_composition() {
    logging::init();
    // A moon orbiting its planet by a quarter turn ends where a child of a
    // quarter-turned parent would
    let mut moon = EulerTransform::from_position(Vec3::new(0.0, 0.0, 5.0));
    moon.rotate_around(&Vec3::zeros(), &Vec3::y(), HALF_PI).unwrap();

    let mut graph = SceneGraph::new();
    let planet = graph.insert(EulerTransform::from_parts(
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, HALF_PI, 0.0),
        Vec3::zeros(),
    ));
    let satellite = graph.insert(EulerTransform::from_position(Vec3::new(0.0, 0.0, 5.0)));
    graph.add_child(planet, satellite).unwrap();

    let composed = graph.transform(satellite).unwrap();
    assert_relative_eq!(composed.abs_position(), moon.position(), epsilon = 1e-4);
    assert_relative_eq!(composed.abs_forward_axis(), moon.forward_axis(), epsilon = 1e-4);
}

#[test]
fn world_matrices_feed_gpu_upload_in_pre_order() {
    logging::init();
    let mut graph = SceneGraph::new();
    let root = graph.insert(EulerTransform::from_position(Vec3::new(1.0, 0.0, 0.0)));
    let child = graph.insert(EulerTransform::from_position(Vec3::new(0.0, 2.0, 0.0)));
    graph.add_child(root, child).unwrap();

    let matrices = graph.world_matrices(root).unwrap();
    assert_eq!(matrices.len(), graph.instance_count(root).unwrap());
    assert_relative_eq!(matrices[1].transform_coord(&Vec3::zeros()), Vec3::new(1.0, 2.0, 0.0));

    // Column-major shaders take the transpose: translation moves to column 3
    let uploaded = matrices[1].transpose();
    assert_relative_eq!(uploaded[(0, 3)], 1.0);
    assert_relative_eq!(uploaded[(1, 3)], 2.0);
}
