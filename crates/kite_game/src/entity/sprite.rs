use kite_core::{ObjectId, Rect, RenderSurface, Result, Texture};

use super::{apply_change, shared_rect, Object, SharedRect};
use crate::context::Context;

/// Directory under the asset root that sprite images are loaded from.
pub const TEXTURE_DIR: &str = "textures";

/// A textured rect. The texture is released when the sprite is dropped.
pub struct Sprite {
    id: ObjectId,
    rect: SharedRect,
    texture: Texture,
    pub change_x: i32,
    pub change_y: i32,
}

impl Sprite {
    /// Placement used when no rect is given.
    pub const DEFAULT_RECT: Rect = Rect::new(0, 0, 100, 100);

    /// Loads `textures/<path>` and places it at `rect`.
    pub fn new(ctx: &mut Context<'_>, path: &str, rect: Option<Rect>) -> Result<Self> {
        let image = ctx.assets().load_image(&format!("{TEXTURE_DIR}/{path}"))?;
        let texture = ctx.surface().create_texture(&image)?;
        Ok(Self::from_texture(
            ctx.ids().object(),
            texture,
            shared_rect(rect.unwrap_or(Self::DEFAULT_RECT)),
        ))
    }

    pub fn from_texture(id: ObjectId, texture: Texture, rect: SharedRect) -> Self {
        Self {
            id,
            rect,
            texture,
            change_x: 0,
            change_y: 0,
        }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Swaps the texture; the old one is released.
    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = texture;
    }
}

impl Object for Sprite {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn rect(&self) -> &SharedRect {
        &self.rect
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        surface.draw_quad(&self.texture, self.rect.get());
    }

    fn update(&mut self) {
        apply_change(&self.rect, &mut self.change_x, &mut self.change_y);
    }
}
