//! Contracts for the collaborators the engine core drives but does not own:
//! the rendering surface, the asset loader and the input event source.
//!
//! GPU resources cross this boundary as scoped handles. A [`Texture`] queues
//! its id on the surface's [`ReleaseQueue`] when dropped, so a texture that is
//! replaced (for example when a text label is re-rendered) or owned by an
//! entity that goes away is always released, on every exit path.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{EngineError, Result};
use crate::event::InputEvent;
use crate::geometry::{Color, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// Ids of dropped textures waiting for the surface to free them.
#[derive(Debug, Clone, Default)]
pub struct ReleaseQueue(Rc<RefCell<Vec<TextureId>>>);

impl ReleaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, id: TextureId) {
        self.0.borrow_mut().push(id);
    }

    pub fn drain(&self) -> Vec<TextureId> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    releases: ReleaseQueue,
}

impl Texture {
    pub fn new(id: TextureId, width: u32, height: u32, releases: &ReleaseQueue) -> Self {
        Self {
            id,
            width,
            height,
            releases: releases.clone(),
        }
    }

    pub fn id(&self) -> TextureId {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.releases.push(self.id);
    }
}

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(EngineError::Render(format!(
                "image is {width}x{height} but has {} bytes (expected {expected})",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn solid(width: u32, height: u32, color: Color) -> Self {
        let pixels = [color.r, color.g, color.b, color.a]
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// A loaded font face at a fixed pixel size. Cloning shares the font data.
#[derive(Debug, Clone)]
pub struct Font {
    path: String,
    size: u32,
    data: Rc<[u8]>,
}

impl Font {
    pub fn new(path: impl Into<String>, size: u32, data: impl Into<Rc<[u8]>>) -> Self {
        Self {
            path: path.into(),
            size,
            data: data.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

pub trait RenderSurface {
    /// Starts a new frame. Frees textures released since the last frame.
    fn clear(&mut self);

    /// Shows everything drawn since the last [`RenderSurface::clear`].
    fn present(&mut self) -> Result<()>;

    fn create_texture(&mut self, image: &Image) -> Result<Texture>;

    fn render_text(&mut self, font: &Font, text: &str, color: Color) -> Result<Texture>;

    fn draw_quad(&mut self, texture: &Texture, dest: Rect);

    /// Window position and size in screen pixels.
    fn window_rect(&self) -> Rect;

    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Resolves paths relative to a fixed asset root.
pub trait AssetLoader {
    fn load_image(&self, path: &str) -> Result<Image>;

    fn load_font(&self, path: &str, size: u32) -> Result<Font>;
}

pub trait EventSource {
    /// Returns every event that arrived since the previous call.
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    /// `None` opens a fullscreen window at the display's resolution.
    pub size: Option<(u32, u32)>,
    pub vsync: bool,
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Kite".to_string(),
            size: Some((1280, 720)),
            vsync: true,
            clear_color: Color::BLACK,
        }
    }
}

/// Everything [`PlatformLauncher::launch`] brings up. Dropping it tears the
/// subsystems down: the surface goes first, then the event source.
pub struct Platform {
    pub surface: Box<dyn RenderSurface>,
    pub events: Box<dyn EventSource>,
    pub assets: Box<dyn AssetLoader>,
}

pub trait PlatformLauncher {
    fn launch(&self, window: &WindowConfig) -> Result<Platform>;
}
