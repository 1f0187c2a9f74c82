//! The living room: a textured floor and back wall, a couch and two side tables
//! with a lamp each. A bowl sits on the left table.

use crate::{
    data_structures::{instance::Transform, material::Material, shapes::ShapeKind},
    pipelines::light::PointLight,
    scene::{SceneDescription, SceneObject, Surface, TextureSource},
};

pub const COUCH_TEXTURE: &str = "couch";
pub const WALL_TEXTURE: &str = "wall";
pub const FLOOR_TEXTURE: &str = "floor";

pub const FABRIC: &str = "fabric";
pub const WOOD: &str = "wood";

/// Centre of the left side table on the X axis, the right one is mirrored.
pub const SIDE_TABLE_X: f32 = 15.0;

const LAMP_COLOR: [f32; 3] = [0.392, 0.584, 0.929];
const BULB_COLOR: [f32; 3] = [1.0, 1.0, 0.878];
const TABLE_COLOR: [f32; 3] = [0.545, 0.271, 0.075];

fn transform(scale: [f32; 3], rotation: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(scale, rotation, position)
}

fn placed(scale: [f32; 3], position: [f32; 3]) -> Transform {
    Transform::new(scale, [0.0; 3], position)
}

/// Flat colour lit with the wood material. Everything but the floor, wall and cushions uses it.
fn wooden(color: [f32; 3]) -> Surface {
    Surface::rgb(color[0], color[1], color[2]).with_material(WOOD)
}

pub fn textures() -> Vec<TextureSource> {
    vec![
        TextureSource::new(COUCH_TEXTURE, "textures/couch.png"),
        TextureSource::new(WALL_TEXTURE, "textures/wall.png"),
        TextureSource::new(FLOOR_TEXTURE, "textures/floor.png"),
    ]
}

pub fn materials() -> Vec<Material> {
    vec![
        Material::new(FABRIC, [0.5; 3], [0.4; 3], 0.5),
        Material::new(WOOD, [0.5; 3], [0.4; 3], 0.3),
    ]
}

/// One light above each lamp.
pub fn lights() -> Vec<PointLight> {
    [-SIDE_TABLE_X, SIDE_TABLE_X]
        .into_iter()
        .map(|x| PointLight::new([x, 10.0, -5.75], 0.05, 0.5, 0.2))
        .collect()
}

fn room() -> Vec<SceneObject> {
    vec![
        SceneObject::new(
            "floor",
            ShapeKind::Plane,
            placed([20.0, 1.0, 10.0], [0.0, 0.0, 0.0]),
            Surface::grey(0.753)
                .textured(FLOOR_TEXTURE)
                .with_material(WOOD),
        )
        .without_outline(),
        SceneObject::new(
            "back wall",
            ShapeKind::Plane,
            transform([20.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 9.0, -10.0]),
            Surface::grey(0.827)
                .textured(WALL_TEXTURE)
                .with_material(WOOD),
        )
        .without_outline(),
    ]
}

fn couch() -> Vec<SceneObject> {
    let mut objects = vec![SceneObject::new(
        "couch base",
        ShapeKind::Box,
        transform([5.0, 0.25, 20.0], [0.0, 90.0, 0.0], [0.0, 2.0, -5.0]),
        wooden([1.0; 3]),
    )];

    for (x, z) in [(-9.0, -7.0), (-9.0, -3.0), (9.0, -7.0), (9.0, -3.0)] {
        objects.push(SceneObject::new(
            "couch leg",
            ShapeKind::Cylinder,
            transform([0.2, 2.0, 0.2], [0.0, 90.0, 0.0], [x, 0.0, z]),
            wooden([1.0; 3]),
        ));
    }

    let cushion = || {
        Surface::grey(0.663)
            .textured(COUCH_TEXTURE)
            .with_material(FABRIC)
    };
    for (width, x) in [(6.5, -6.25), (6.5, 0.25), (6.0, 6.5)] {
        objects.push(SceneObject::new(
            "back cushion",
            ShapeKind::Box,
            transform([width, 0.25, 5.0], [90.0, 0.0, 0.0], [x, 4.5, -7.0]),
            cushion(),
        ));
    }
    for x in [-6.25, 0.25, 6.25] {
        objects.push(SceneObject::new(
            "seat cushion",
            ShapeKind::Box,
            placed([6.5, 0.5, 4.5], [x, 2.25, -5.0]),
            cushion(),
        ));
    }
    objects
}

/// Table top, legs, rails and lamp centred on `x`. Mirrored tables share the same
/// layout relative to the couch.
fn side_table(x: f32) -> Vec<SceneObject> {
    let outward = x.signum();
    let outer = x + 3.0 * outward;
    let inner = x - 3.0 * outward;
    let white = || wooden([1.0; 3]);

    let mut objects = vec![SceneObject::new(
        "table top",
        ShapeKind::Box,
        placed([6.5, 0.5, 4.5], [x, 3.25, -5.0]),
        wooden(TABLE_COLOR).textured(FLOOR_TEXTURE),
    )];

    // The inner front corner has no leg.
    for (leg_x, leg_z) in [(outer, -7.0), (inner, -7.0), (outer, -3.0)] {
        objects.push(SceneObject::new(
            "table leg",
            ShapeKind::Box,
            placed([0.5, 3.0, 0.5], [leg_x, 1.5, leg_z]),
            white(),
        ));
    }

    let rails = [
        ([5.5, 0.5, 0.5], [x, 0.25, -7.0]),
        ([0.5, 0.5, 4.5], [outer, 0.25, -5.0]),
        ([0.5, 0.5, 4.5], [inner, 0.25, -5.0]),
        ([5.5, 0.5, 0.5], [x, 0.25, -3.0]),
    ];
    for (scale, position) in rails {
        objects.push(SceneObject::new(
            "table rail",
            ShapeKind::Box,
            placed(scale, position),
            white(),
        ));
    }

    objects.extend(lamp(x));
    objects
}

fn lamp(x: f32) -> Vec<SceneObject> {
    vec![
        SceneObject::new(
            "lamp base",
            ShapeKind::Box,
            placed([1.5, 0.08, 1.5], [x, 3.55, -5.75]),
            wooden(LAMP_COLOR),
        ),
        SceneObject::new(
            "lamp stand",
            ShapeKind::Box,
            placed([0.15, 3.0, 0.15], [x, 5.0, -5.75]),
            wooden(LAMP_COLOR),
        ),
        // the negative Y scale turns the dome into a shade opening downwards
        SceneObject::new(
            "lamp shade",
            ShapeKind::HalfSphere,
            placed([0.75, -1.5, 0.75], [x, 7.6, -5.75]),
            wooden(LAMP_COLOR),
        ),
        SceneObject::new(
            "light bulb",
            ShapeKind::HalfSphere,
            placed([0.6, 0.5, 0.6], [x, 7.4, -5.75]),
            wooden(BULB_COLOR),
        ),
        SceneObject::new(
            "power button",
            ShapeKind::Box,
            placed([0.25, 0.01, 0.05], [x, 3.6, -5.25]),
            wooden([0.753; 3]),
        ),
    ]
}

fn bowl() -> SceneObject {
    SceneObject::new(
        "bowl",
        ShapeKind::HalfSphere,
        placed([1.2, -0.8, 1.2], [-17.0, 4.3, -3.8]),
        wooden([0.753; 3]),
    )
}

/// The complete living room in draw order.
pub fn living_room() -> SceneDescription {
    let mut objects = room();
    objects.extend(couch());
    objects.extend(side_table(-SIDE_TABLE_X));
    objects.push(bowl());
    objects.extend(side_table(SIDE_TABLE_X));

    SceneDescription {
        textures: textures(),
        materials: materials(),
        lights: lights(),
        use_lighting: true,
        objects,
    }
}
