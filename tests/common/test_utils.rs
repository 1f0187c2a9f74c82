use std::io::Cursor;

use cgmath::Vector3;
use image::{DynamicImage, ImageFormat};
use living_room::scene::{SceneManager, living_room::living_room};

pub const EPSILON: f32 = 1e-5;

pub fn assert_vec3_close(actual: Vector3<f32>, expected: Vector3<f32>) {
    let diff = actual - expected;
    assert!(
        diff.x.abs() < EPSILON && diff.y.abs() < EPSILON && diff.z.abs() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

/// Encode `img` as an in-memory PNG file.
pub fn png_bytes(img: DynamicImage) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .expect("PNG encoding of a test image failed");
    bytes.into_inner()
}

/// An RGB image whose top row is red and every other row blue.
pub fn red_top_row(width: u32, height: u32) -> DynamicImage {
    let img = image::RgbImage::from_fn(width, height, |_, y| {
        if y == 0 {
            image::Rgb([255, 0, 0])
        } else {
            image::Rgb([0, 0, 255])
        }
    });
    DynamicImage::ImageRgb8(img)
}

/// The living room with every texture registered under a numeric placeholder handle.
pub fn textured_living_room() -> SceneManager<u32> {
    let mut scene = SceneManager::new(living_room()).expect("the living room is valid");
    let tags: Vec<String> = scene
        .texture_sources()
        .iter()
        .map(|source| source.tag.clone())
        .collect();
    for (handle, tag) in tags.iter().enumerate() {
        assert!(scene.register_loaded(tag, Ok(handle as u32)));
    }
    scene
}

#[cfg(feature = "integration-tests")]
pub async fn headless_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    let instance = living_room::context::mk_instance();
    match living_room::context::request_device(&instance, None).await {
        Ok((_, device, queue)) => Some((device, queue)),
        Err(e) => {
            eprintln!("Skipping GPU test: {e:#}");
            None
        }
    }
}
