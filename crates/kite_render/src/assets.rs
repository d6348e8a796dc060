use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontRef;
use kite_core::{AssetLoader, EngineError, Font, Image, Result};

/// Loads images and fonts from a directory on disk.
pub struct FsAssetLoader {
    root: PathBuf,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl AssetLoader for FsAssetLoader {
    fn load_image(&self, path: &str) -> Result<Image> {
        let full = self.resolve(path);
        let decoded = image::open(&full).map_err(|e| {
            log::error!("Failed to load image '{}': {e}", full.display());
            EngineError::ImageNotFound(full.display().to_string())
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Loaded image '{}' ({}x{})", full.display(), width, height);
        Image::new(width, height, rgba.into_raw())
    }

    fn load_font(&self, path: &str, size: u32) -> Result<Font> {
        let full = self.resolve(path);
        let data = fs::read(&full).map_err(|e| {
            log::error!("Failed to read font '{}': {e}", full.display());
            EngineError::FontNotFound(full.display().to_string())
        })?;
        FontRef::try_from_slice(&data).map_err(|e| {
            log::error!("Failed to parse font '{}': {e}", full.display());
            EngineError::FontNotFound(full.display().to_string())
        })?;
        log::debug!("Loaded font '{}' at {}px", full.display(), size);
        Ok(Font::new(full.display().to_string(), size, data))
    }
}
