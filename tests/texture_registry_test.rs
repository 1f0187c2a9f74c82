use image::{DynamicImage, RgbaImage};
use living_room::{
    data_structures::texture::mip_chain,
    resources::{
        asset_path, load_binary,
        texture::{MAX_TEXTURE_SLOTS, TextureRegistry, decode_texture_image},
    },
};

use crate::common::test_utils::{png_bytes, red_top_row};

mod common;

#[test]
fn registers_textures_in_slot_order() {
    let mut registry = TextureRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.register("couch", 'c').unwrap(), 0);
    assert_eq!(registry.register("wall", 'w').unwrap(), 1);
    assert_eq!(registry.register("floor", 'f').unwrap(), 2);

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.find_slot("wall"), Some(1));
    assert_eq!(registry.find("floor"), Some(&'f'));
    assert_eq!(registry.get(0).map(|entry| entry.tag.as_str()), Some("couch"));
    let tags: Vec<_> = registry.iter().map(|entry| entry.tag.clone()).collect();
    assert_eq!(tags, ["couch", "wall", "floor"]);
}

#[test]
fn unknown_tags_are_not_found() {
    let mut registry = TextureRegistry::new();
    registry.register("couch", ()).unwrap();
    assert_eq!(registry.find_slot("sofa"), None);
    assert_eq!(registry.find("sofa"), None);
    assert!(registry.get(1).is_none());
}

#[test]
fn rejects_duplicate_tags() {
    let mut registry = TextureRegistry::new();
    registry.register("wall", 1).unwrap();
    let err = registry.register("wall", 2).unwrap_err();
    assert!(err.to_string().contains("already registered"));
    assert_eq!(registry.find("wall"), Some(&1));
    assert_eq!(registry.len(), 1);
}

#[test]
fn holds_at_most_sixteen_textures() {
    let mut registry = TextureRegistry::new();
    for slot in 0..MAX_TEXTURE_SLOTS {
        assert_eq!(registry.register(&format!("texture {slot}"), slot).unwrap(), slot);
    }
    assert!(registry.register("one too many", 99).is_err());
    assert_eq!(registry.len(), MAX_TEXTURE_SLOTS);
    assert_eq!(registry.find_slot("one too many"), None);
}

#[test]
fn clearing_frees_all_slots() {
    let mut registry = TextureRegistry::default();
    registry.register("couch", 0).unwrap();
    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.register("wall", 1).unwrap(), 0);
}

#[test]
fn decodes_rgb_images_bottom_row_first() {
    let decoded = decode_texture_image(&png_bytes(red_top_row(4, 2)), "rgb.png").unwrap();
    assert_eq!(decoded.channels, 3);
    assert_eq!(decoded.pixels.dimensions(), (4, 2));
    // the red top row of the file ends up last
    assert_eq!(decoded.pixels.get_pixel(0, 1).0, [255, 0, 0, 255]);
    assert_eq!(decoded.pixels.get_pixel(3, 0).0, [0, 0, 255, 255]);
}

#[test]
fn decodes_rgba_images() {
    let img = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 128]));
    let decoded = decode_texture_image(&png_bytes(DynamicImage::ImageRgba8(img)), "rgba.png")
        .unwrap();
    assert_eq!(decoded.channels, 4);
    assert_eq!(decoded.pixels.get_pixel(1, 1).0, [10, 20, 30, 128]);
}

#[test]
fn rejects_other_channel_counts() {
    let grey = DynamicImage::ImageLuma8(image::GrayImage::new(2, 2));
    let err = decode_texture_image(&png_bytes(grey), "grey.png").unwrap_err();
    assert!(err.to_string().contains("1 channels"), "{err}");
}

#[test]
fn rejects_files_that_are_not_images() {
    let err = decode_texture_image(b"definitely not a png", "broken.png").unwrap_err();
    assert!(err.to_string().contains("broken.png"));
}

#[test]
fn mip_chain_halves_down_to_one_pixel() {
    let sizes = |img: &RgbaImage| -> Vec<(u32, u32)> {
        mip_chain(img).iter().map(|level| level.dimensions()).collect()
    };
    assert_eq!(
        sizes(&RgbaImage::new(8, 4)),
        [(8, 4), (4, 2), (2, 1), (1, 1)]
    );
    assert_eq!(sizes(&RgbaImage::new(5, 3)), [(5, 3), (2, 1), (1, 1)]);
    assert_eq!(sizes(&RgbaImage::new(1, 1)), [(1, 1)]);
}

#[test]
fn mip_levels_average_the_image() {
    let img = RgbaImage::from_pixel(4, 4, image::Rgba([200, 100, 50, 255]));
    let levels = mip_chain(&img);
    let smallest = levels.last().unwrap();
    assert_eq!(smallest.get_pixel(0, 0).0, [200, 100, 50, 255]);
}

#[test]
fn asset_paths_are_relative_to_the_root() {
    let root = std::path::Path::new("/srv/room");
    assert_eq!(
        asset_path(root, "textures/floor.png"),
        std::path::PathBuf::from("/srv/room/textures/floor.png")
    );
}

#[tokio::test]
async fn loads_files_from_the_asset_root() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("textures")).unwrap();
    let bytes = png_bytes(red_top_row(2, 2));
    std::fs::write(dir.path().join("textures/couch.png"), &bytes).unwrap();

    let loaded = load_binary(dir.path(), "textures/couch.png").await.unwrap();
    assert_eq!(loaded, bytes);
}

#[tokio::test]
async fn missing_files_report_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_binary(dir.path(), "textures/missing.png")
        .await
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Could not load image"), "{message}");
    assert!(message.contains("missing.png"), "{message}");
}
