#[cfg(feature = "integration-tests")]
mod common;

#[cfg(feature = "integration-tests")]
mod gpu {
    use living_room::{
        config::RoomConfig,
        data_structures::texture::Texture,
        render::SceneRenderer,
        resources::texture::load_scene_textures,
        scene::{SceneDescription, SceneManager, living_room::living_room},
    };

    use crate::common::test_utils::headless_device;

    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    #[tokio::test]
    async fn should_render_clear_colour() {
        let Some((device, queue)) = headless_device().await else {
            return;
        };
        let config = RoomConfig {
            clear_colour: wgpu::Color::WHITE,
            ..Default::default()
        };
        let scene: SceneManager<Texture> = SceneManager::new(SceneDescription::default()).unwrap();
        let renderer = SceneRenderer::new(&device, &queue, FORMAT, (100, 60), &scene, &config)
            .unwrap();

        let img = renderer.render_to_image(&device, &queue).await.unwrap();
        assert_eq!(img.dimensions(), (100, 60));
        assert!(img.pixels().all(|pixel| pixel.0 == [255, 255, 255, 255]));
    }

    #[tokio::test]
    async fn should_render_the_living_room() {
        let Some((device, queue)) = headless_device().await else {
            return;
        };
        let config = RoomConfig {
            clear_colour: wgpu::Color::BLACK,
            ..Default::default()
        };
        let mut scene = SceneManager::new(living_room()).unwrap();
        let loaded = load_scene_textures(&mut scene, &config.asset_root, &device, &queue).await;
        assert_eq!(loaded, 3);

        let renderer = SceneRenderer::new(&device, &queue, FORMAT, (320, 180), &scene, &config)
            .unwrap();
        assert_eq!(renderer.commands().len(), 40);

        let img = renderer.render_to_image(&device, &queue).await.unwrap();
        let covered = img
            .pixels()
            .filter(|pixel| pixel.0 != [0, 0, 0, 255])
            .count();
        // the floor and back wall fill most of the view
        assert!(covered > img.pixels().len() / 2, "only {covered} pixels drawn");
    }

    #[tokio::test]
    async fn missing_textures_still_render() {
        let Some((device, queue)) = headless_device().await else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let config = RoomConfig {
            asset_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut scene = SceneManager::new(living_room()).unwrap();
        let loaded = load_scene_textures(&mut scene, &config.asset_root, &device, &queue).await;
        assert_eq!(loaded, 0);
        assert!(scene.textures().is_empty());

        let renderer = SceneRenderer::new(&device, &queue, FORMAT, (64, 64), &scene, &config)
            .unwrap();
        assert!(renderer.commands().iter().all(|c| c.texture_slot.is_none()));
        let img = renderer.render_to_image(&device, &queue).await.unwrap();
        assert_eq!(img.dimensions(), (64, 64));
    }
}
