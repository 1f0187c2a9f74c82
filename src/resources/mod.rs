use std::path::{Path, PathBuf};

use anyhow::Context;

/**
 * This module contains all logic for loading textures from the asset directory.
 */
pub mod texture;

/// Resolve `file_name` against the asset root.
pub fn asset_path(asset_root: &Path, file_name: &str) -> PathBuf {
    asset_root.join(file_name)
}

pub async fn load_binary(asset_root: &Path, file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(asset_root, file_name);
    let data = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Could not load image: {}", path.display()))?;
    Ok(data)
}
