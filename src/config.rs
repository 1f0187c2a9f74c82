//! Runtime configuration.
//!
//! Defaults can be overridden through environment variables:
//! - `LIVING_ROOM_ASSETS`: directory the texture files are resolved against
//! - `LIVING_ROOM_SIZE`: initial window size as `WIDTHxHEIGHT`
//! - `LIVING_ROOM_OUTLINES`: `0`/`false`/`off` disables the wireframe overlay

use std::path::PathBuf;

pub const ASSETS_VAR: &str = "LIVING_ROOM_ASSETS";
pub const SIZE_VAR: &str = "LIVING_ROOM_SIZE";
pub const OUTLINES_VAR: &str = "LIVING_ROOM_OUTLINES";

#[derive(Clone, Debug, PartialEq)]
pub struct RoomConfig {
    pub asset_root: PathBuf,
    pub window_title: String,
    pub width: u32,
    pub height: u32,
    pub clear_colour: wgpu::Color,
    pub draw_outlines: bool,
    pub camera_speed: f32,
    pub camera_sensitivity: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets")),
            window_title: "Living Room".to_string(),
            width: 1280,
            height: 720,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            draw_outlines: true,
            camera_speed: 10.0,
            camera_sensitivity: 0.4,
        }
    }
}

impl RoomConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` on top of the defaults. Values that cannot be
    /// parsed are reported and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(root) = lookup(ASSETS_VAR) {
            if root.trim().is_empty() {
                log::warn!("{ASSETS_VAR} is empty, using {}", config.asset_root.display());
            } else {
                config.asset_root = PathBuf::from(root);
            }
        }

        if let Some(size) = lookup(SIZE_VAR) {
            match parse_size(&size) {
                Some((width, height)) => {
                    config.width = width;
                    config.height = height;
                }
                None => log::warn!(
                    "Ignoring {SIZE_VAR}={size:?}, expected WIDTHxHEIGHT, using {}x{}",
                    config.width,
                    config.height
                ),
            }
        }

        if let Some(outlines) = lookup(OUTLINES_VAR) {
            match parse_flag(&outlines) {
                Some(flag) => config.draw_outlines = flag,
                None => log::warn!("Ignoring {OUTLINES_VAR}={outlines:?}, expected a boolean"),
            }
        }

        log::debug!("{config:?}");
        config
    }
}

/// Parse `WIDTHxHEIGHT` with both sides non-zero.
pub fn parse_size(value: &str) -> Option<(u32, u32)> {
    let (width, height) = value.trim().split_once(['x', 'X'])?;
    let width: u32 = width.trim().parse().ok()?;
    let height: u32 = height.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
