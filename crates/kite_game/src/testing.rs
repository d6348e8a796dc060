//! Headless platform for driving the engine without a window or GPU.
//!
//! Every piece shares its state through `Rc`, so a test can keep a handle
//! after the launcher has moved clones into the game's `Platform` and inspect
//! what the frame loop did.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use kite_core::{
    AssetLoader, Color, EngineError, EventSource, Font, IdAllocator, Image, InputEvent,
    InputState, Platform, PlatformLauncher, Rect, ReleaseQueue, RenderSurface, Result,
    SignalSlot, Texture, TextureId, WindowConfig,
};

use crate::component::ComponentRef;
use crate::context::{Context, PendingNotify};
use crate::registry::Registered;

/// Screen size reported for fullscreen headless windows.
pub const HEADLESS_SCREEN: (u32, u32) = (1920, 1080);

/// Everything a [`HeadlessSurface`] was asked to do.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceRecord {
    pub clears: usize,
    pub presents: usize,
    pub textures_created: usize,
    /// Quads drawn since the last clear.
    pub draws: Vec<(TextureId, Rect)>,
    /// Texture ids freed so far, in release order.
    pub released: Vec<TextureId>,
    pub live_textures: HashSet<TextureId>,
    pub resizes: Vec<(u32, u32)>,
    pub window: Rect,
}

#[derive(Clone, Default)]
pub struct HeadlessSurface {
    record: Rc<RefCell<SurfaceRecord>>,
    releases: ReleaseQueue,
    next_texture: Rc<RefCell<u64>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size a string renders to: half the font size per character, one font
    /// size tall, at least one pixel wide.
    pub fn text_size(text: &str, font_size: u32) -> (u32, u32) {
        let width = (text.chars().count() as u32 * font_size / 2).max(1);
        (width, font_size.max(1))
    }

    pub fn record(&self) -> SurfaceRecord {
        self.record.borrow().clone()
    }

    fn set_window(&self, window: Rect) {
        self.record.borrow_mut().window = window;
    }
}

impl RenderSurface for HeadlessSurface {
    fn clear(&mut self) {
        let mut record = self.record.borrow_mut();
        for id in self.releases.drain() {
            record.live_textures.remove(&id);
            record.released.push(id);
        }
        record.draws.clear();
        record.clears += 1;
    }

    fn present(&mut self) -> Result<()> {
        self.record.borrow_mut().presents += 1;
        Ok(())
    }

    fn create_texture(&mut self, image: &Image) -> Result<Texture> {
        if image.width == 0 || image.height == 0 {
            return Err(EngineError::Render(format!(
                "cannot create a {}x{} texture",
                image.width, image.height
            )));
        }
        let id = {
            let mut next = self.next_texture.borrow_mut();
            let id = TextureId(*next);
            *next += 1;
            id
        };
        let mut record = self.record.borrow_mut();
        record.textures_created += 1;
        record.live_textures.insert(id);
        Ok(Texture::new(id, image.width, image.height, &self.releases))
    }

    fn render_text(&mut self, font: &Font, text: &str, color: Color) -> Result<Texture> {
        let (width, height) = Self::text_size(text, font.size());
        self.create_texture(&Image::solid(width, height, color))
    }

    fn draw_quad(&mut self, texture: &Texture, dest: Rect) {
        self.record.borrow_mut().draws.push((texture.id(), dest));
    }

    fn window_rect(&self) -> Rect {
        self.record.borrow().window
    }

    fn resize(&mut self, width: u32, height: u32) {
        let mut record = self.record.borrow_mut();
        record.resizes.push((width, height));
        record.window.w = width as i32;
        record.window.h = height as i32;
    }
}

/// Event source fed by the test, one batch per frame.
#[derive(Clone, Default)]
pub struct ScriptedEvents {
    frames: Rc<RefCell<VecDeque<Vec<InputEvent>>>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the events returned by one future `poll_events` call.
    pub fn push_frame(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.frames.borrow_mut().push_back(events.into_iter().collect());
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.borrow().len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.frames.borrow_mut().pop_front().unwrap_or_default()
    }
}

/// In-memory images and fonts keyed by their asset path.
#[derive(Clone, Default)]
pub struct MemoryAssets {
    images: HashMap<String, Image>,
    fonts: HashSet<String>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, path: impl Into<String>, image: Image) -> Self {
        self.images.insert(path.into(), image);
        self
    }

    pub fn with_font(mut self, path: impl Into<String>) -> Self {
        self.fonts.insert(path.into());
        self
    }
}

impl AssetLoader for MemoryAssets {
    fn load_image(&self, path: &str) -> Result<Image> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| EngineError::ImageNotFound(path.to_string()))
    }

    fn load_font(&self, path: &str, size: u32) -> Result<Font> {
        if self.fonts.contains(path) {
            Ok(Font::new(path, size, Vec::new()))
        } else {
            Err(EngineError::FontNotFound(path.to_string()))
        }
    }
}

/// Launches a [`HeadlessSurface`] + [`ScriptedEvents`] + [`MemoryAssets`]
/// platform, or fails like a real backend would when asked to.
#[derive(Clone, Default)]
pub struct HeadlessLauncher {
    pub surface: HeadlessSurface,
    pub events: ScriptedEvents,
    pub assets: MemoryAssets,
    failure: Option<String>,
    launched: Rc<RefCell<Vec<WindowConfig>>>,
}

impl HeadlessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets(mut self, assets: MemoryAssets) -> Self {
        self.assets = assets;
        self
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Window configurations passed to `launch`, oldest first.
    pub fn launched(&self) -> Vec<WindowConfig> {
        self.launched.borrow().clone()
    }
}

impl PlatformLauncher for HeadlessLauncher {
    fn launch(&self, window: &WindowConfig) -> Result<Platform> {
        if let Some(message) = &self.failure {
            return Err(EngineError::Initialization(message.clone()));
        }
        self.launched.borrow_mut().push(window.clone());
        let (w, h) = window.size.unwrap_or(HEADLESS_SCREEN);
        self.surface.set_window(Rect::new(0, 0, w as i32, h as i32));
        Ok(Platform {
            surface: Box::new(self.surface.clone()),
            events: Box::new(self.events.clone()),
            assets: Box::new(self.assets.clone()),
        })
    }
}

/// Owns everything a [`Context`] borrows, for testing objects and
/// components outside a running game.
#[derive(Default)]
pub struct ContextHarness {
    pub surface: HeadlessSurface,
    pub assets: MemoryAssets,
    pub input: InputState,
    pub ids: IdAllocator,
    pub signal: SignalSlot,
    pub status: String,
    pub registry: Vec<Registered>,
    pub deferred: Vec<ComponentRef>,
    pending: Vec<PendingNotify>,
}

impl ContextHarness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a solid white `width` x `height` image at `path`.
    pub fn with_image(mut self, path: &str, width: u32, height: u32) -> Self {
        self.assets = self
            .assets
            .with_image(path, Image::solid(width, height, Color::WHITE));
        self
    }

    pub fn with_font(mut self, path: &str) -> Self {
        self.assets = self.assets.with_font(path);
        self
    }

    pub fn register(&mut self, component: ComponentRef) -> Result<()> {
        self.registry.push(Registered::new(component)?);
        Ok(())
    }

    pub fn context(&mut self) -> Context<'_> {
        Context::new(
            &mut self.surface,
            &self.assets,
            &self.input,
            &self.ids,
            &mut self.signal,
            &mut self.status,
            &self.registry,
            &mut self.deferred,
            &mut self.pending,
        )
    }
}
