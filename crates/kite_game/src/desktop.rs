use std::path::PathBuf;

use kite_core::{Platform, PlatformLauncher, Result, WindowConfig};
use kite_platform::DesktopEvents;
use kite_render::{FsAssetLoader, GpuSurface};

/// winit window, wgpu surface and filesystem assets.
pub struct DesktopLauncher {
    asset_root: PathBuf,
}

impl DesktopLauncher {
    pub fn new(asset_root: impl Into<PathBuf>) -> Self {
        Self {
            asset_root: asset_root.into(),
        }
    }
}

impl PlatformLauncher for DesktopLauncher {
    fn launch(&self, window: &WindowConfig) -> Result<Platform> {
        let events = DesktopEvents::open(window)?;
        let surface = GpuSurface::new(events.window(), window.vsync, window.clear_color)?;
        log::info!("Asset root: {}", self.asset_root.display());
        Ok(Platform {
            surface: Box::new(surface),
            events: Box::new(events),
            assets: Box::new(FsAssetLoader::new(self.asset_root.clone())),
        })
    }
}
