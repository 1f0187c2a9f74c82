use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3, Vector4};
use living_room::data_structures::{
    instance::{InstanceRaw, Transform},
    material::Material,
};

use crate::common::test_utils::{EPSILON, assert_vec3_close};

mod common;

fn apply(transform: &Transform, point: [f32; 3]) -> Vector3<f32> {
    let p = transform.to_matrix() * Vector4::new(point[0], point[1], point[2], 1.0);
    p.truncate()
}

#[test]
fn identity_transform_is_identity_matrix() {
    assert_eq!(Transform::identity().to_matrix(), Matrix4::identity());
    assert_eq!(Transform::default(), Transform::identity());
}

#[test]
fn scales_before_translating() {
    let transform = Transform::new([2.0, 3.0, 4.0], [0.0; 3], [1.0, 2.0, 3.0]);
    assert_vec3_close(apply(&transform, [1.0, 1.0, 1.0]), Vector3::new(3.0, 5.0, 7.0));
}

#[test]
fn rotates_around_x_then_y_then_z() {
    // X first takes +Y to +Z, Y then takes +Z to +X
    let transform = Transform::new([1.0; 3], [90.0, 90.0, 0.0], [0.0; 3]);
    assert_vec3_close(apply(&transform, [0.0, 1.0, 0.0]), Vector3::new(1.0, 0.0, 0.0));

    // Z is applied last: +X goes to +Z after X and Y, Z leaves it alone
    let transform = Transform::new([1.0; 3], [0.0, -90.0, 90.0], [0.0; 3]);
    assert_vec3_close(apply(&transform, [1.0, 0.0, 0.0]), Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn rotated_wall_stands_upright() {
    // the back wall is a plane rotated 90 degrees around X
    let wall = Transform::new([20.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 9.0, -10.0]);
    assert_vec3_close(apply(&wall, [1.0, 0.0, 1.0]), Vector3::new(20.0, -1.0, -10.0));
    assert_vec3_close(apply(&wall, [-1.0, 0.0, -1.0]), Vector3::new(-20.0, 19.0, -10.0));
    assert_vec3_close(wall.normal_matrix() * Vector3::unit_y(), Vector3::new(0.0, 0.0, 1.0));
}

#[test]
fn normal_matrix_keeps_normals_perpendicular_under_non_uniform_scale() {
    let transform = Transform::new([4.0, 1.0, 1.0], [0.0, 30.0, 0.0], [5.0, 0.0, 0.0]);
    let normal = Vector3::new(1.0, 1.0, 0.0).normalize();
    let tangent = Vector3::new(1.0, -1.0, 0.0);

    let model = transform.to_matrix();
    let world_tangent = (model * tangent.extend(0.0)).truncate();
    let world_normal = transform.normal_matrix() * normal;
    assert!(world_normal.dot(world_tangent).abs() < EPSILON);
}

#[test]
fn zero_scale_falls_back_to_rotation_for_normals() {
    let transform = Transform::new([0.0, 1.0, 1.0], [0.0, 90.0, 0.0], [0.0; 3]);
    assert_eq!(transform.normal_matrix(), transform.rotation_matrix());
}

#[test]
fn negative_scale_mirrors() {
    let shade = Transform::new([0.75, -1.5, 0.75], [0.0; 3], [0.0, 7.6, 0.0]);
    assert!(shade.to_matrix().determinant() < 0.0);
    assert_vec3_close(apply(&shade, [0.0, 1.0, 0.0]), Vector3::new(0.0, 6.1, 0.0));
}

#[test]
fn instance_packs_transform_and_surface() {
    let transform = Transform::new([2.0, 2.0, 2.0], [0.0; 3], [1.0, 0.0, 0.0]);
    let wood = Material::new("wood", [0.5; 3], [0.4; 3], 0.3);
    let raw = InstanceRaw::new(&transform, [0.1, 0.2, 0.3, 1.0], &wood, [2.0, 1.0], true);

    assert_eq!(std::mem::size_of::<InstanceRaw>(), 156);
    assert_eq!(raw.model, Into::<[[f32; 4]; 4]>::into(transform.to_matrix()));
    assert_eq!(raw.color, [0.1, 0.2, 0.3, 1.0]);
    assert_eq!(raw.diffuse, [0.5; 3]);
    assert_eq!(raw.specular, [0.4; 3]);
    assert_eq!(raw.shininess, 0.3);
    assert_eq!(raw.uv_scale, [2.0, 1.0]);
    assert_eq!(raw.use_texture, 1);

    let flat = InstanceRaw::new(&transform, [1.0; 4], &wood, [1.0, 1.0], false);
    assert_eq!(flat.use_texture, 0);
}
