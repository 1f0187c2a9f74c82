use cgmath::{InnerSpace, Vector3};
use living_room::data_structures::shapes::{
    MeshData, ShapeKind, generate_box, generate_cylinder, generate_plane, generate_sphere,
};

const EPSILON: f32 = 1e-4;

fn position(data: &MeshData, index: u32) -> Vector3<f32> {
    data.vertices[index as usize].position.into()
}

/// Every triangle's winding has to agree with its vertex normals.
fn assert_counter_clockwise(data: &MeshData) {
    for triangle in data.indices.chunks(3) {
        let (a, b, c) = (
            position(data, triangle[0]),
            position(data, triangle[1]),
            position(data, triangle[2]),
        );
        let face = (b - a).cross(c - a);
        let normal: Vector3<f32> = data.vertices[triangle[0] as usize].normal.into();
        assert!(face.dot(normal) > 0.0, "triangle {triangle:?} is wound clockwise");
    }
}

#[test]
fn every_shape_is_well_formed() {
    for shape in ShapeKind::ALL {
        let data = shape.mesh_data();
        let count = data.vertices.len() as u32;
        assert!(!data.vertices.is_empty(), "{}", shape.name());
        assert_eq!(data.indices.len() % 3, 0, "{}", shape.name());
        assert_eq!(data.line_indices.len() % 2, 0, "{}", shape.name());
        assert!(!data.line_indices.is_empty(), "{} has no outline", shape.name());
        assert!(data.indices.iter().all(|i| *i < count), "{}", shape.name());
        assert!(data.line_indices.iter().all(|i| *i < count), "{}", shape.name());
        for vertex in &data.vertices {
            let normal: Vector3<f32> = vertex.normal.into();
            assert!((normal.magnitude() - 1.0).abs() < EPSILON, "{}", shape.name());
            assert!(vertex.tex_coords.iter().all(|uv| (0.0..=1.0).contains(uv)));
        }
    }
}

#[test]
fn shape_names_are_unique() {
    let mut names: Vec<_> = ShapeKind::ALL.iter().map(|shape| shape.name()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), ShapeKind::ALL.len());
}

#[test]
fn plane_is_a_two_by_two_square_facing_up() {
    let plane = generate_plane();
    assert_eq!(plane.vertices.len(), 4);
    assert_eq!(plane.triangle_count(), 2);
    assert_eq!(plane.line_indices.len(), 8);
    for vertex in &plane.vertices {
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.position[1], 0.0);
        assert_eq!(vertex.position[0].abs(), 1.0);
        assert_eq!(vertex.position[2].abs(), 1.0);
    }
    assert_counter_clockwise(&plane);
}

#[test]
fn box_is_a_unit_cube_with_flat_faces() {
    let cube = generate_box();
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);
    // four edges per face
    assert_eq!(cube.line_indices.len(), 6 * 4 * 2);
    assert!(
        cube.vertices
            .iter()
            .all(|v| v.position.iter().all(|p| p.abs() == 0.5))
    );
    assert_counter_clockwise(&cube);
}

#[test]
fn cylinder_stands_on_the_origin() {
    let segments = 36;
    let cylinder = generate_cylinder(segments);
    // side wall with a duplicated seam plus two caps with a centre vertex each
    let expected_vertices = 2 * (segments + 1) + 2 * (segments + 1);
    assert_eq!(cylinder.vertices.len() as u32, expected_vertices);
    assert_eq!(cylinder.triangle_count() as u32, 4 * segments);

    for vertex in &cylinder.vertices {
        let [x, y, z] = vertex.position;
        assert!((0.0..=1.0).contains(&y));
        assert!((x * x + z * z).sqrt() <= 1.0 + EPSILON);
    }
    assert_counter_clockwise(&cylinder);
}

#[test]
fn cylinder_needs_at_least_three_segments() {
    assert_eq!(generate_cylinder(1).vertices, generate_cylinder(3).vertices);
}

#[test]
fn sphere_has_radius_one() {
    let sphere = ShapeKind::Sphere.mesh_data();
    for vertex in &sphere.vertices {
        let p: Vector3<f32> = vertex.position.into();
        assert!((p.magnitude() - 1.0).abs() < EPSILON);
    }
    let lowest = sphere
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MAX, f32::min);
    assert!((lowest + 1.0).abs() < EPSILON);
}

#[test]
fn half_sphere_is_the_open_upper_dome() {
    let dome = generate_sphere(36, 9, true);
    assert_eq!(dome.vertices.len(), 10 * 37);
    assert_eq!(dome.triangle_count(), 9 * 36 * 2);
    assert!(dome.vertices.iter().all(|v| v.position[1] >= -EPSILON));

    // the rim sits on the equator and no cap closes it
    let rim = dome
        .vertices
        .iter()
        .filter(|v| v.position[1].abs() < EPSILON)
        .count();
    assert_eq!(rim, 37);
    assert!(dome.vertices.iter().all(|v| v.normal[1] >= -EPSILON));
}
