use kite_core::{Color, Font, ObjectId, Rect, RenderSurface, Result, Texture};

use super::{apply_change, shared_rect, Object, SharedRect};
use crate::context::Context;

/// A single line of rendered text.
///
/// The rect's size always matches the last rendered texture; any change to
/// the source, color or font re-renders and resizes.
pub struct Text {
    id: ObjectId,
    rect: SharedRect,
    source: String,
    font: Font,
    color: Color,
    texture: Texture,
    pub change_x: i32,
    pub change_y: i32,
}

impl Text {
    /// Loads the font at `font_path` and renders `source` with its top-left
    /// corner at `(x, y)`, or centered on it when `center` is set.
    pub fn new(
        ctx: &mut Context<'_>,
        source: impl Into<String>,
        color: Color,
        (x, y): (i32, i32),
        font_path: &str,
        font_size: u32,
        center: bool,
    ) -> Result<Self> {
        let font = ctx.assets().load_font(font_path, font_size)?;
        let id = ctx.ids().object();
        Self::with_font(ctx.surface(), id, source, font, color, (x, y), center)
    }

    pub fn with_font(
        surface: &mut dyn RenderSurface,
        id: ObjectId,
        source: impl Into<String>,
        font: Font,
        color: Color,
        (x, y): (i32, i32),
        center: bool,
    ) -> Result<Self> {
        let source = source.into();
        let texture = surface.render_text(&font, &source, color)?;
        let rect = shared_rect(Rect::new(
            x,
            y,
            texture.width() as i32,
            texture.height() as i32,
        ));
        let mut text = Self {
            id,
            rect,
            source,
            font,
            color,
            texture,
            change_x: 0,
            change_y: 0,
        };
        if center {
            text.center();
        }
        Ok(text)
    }

    /// Shifts the rect so its current origin becomes its center.
    pub fn center(&mut self) {
        let rect = self.rect.get();
        self.rect.set(Rect {
            x: rect.x - rect.w / 2,
            y: rect.y - rect.h / 2,
            ..rect
        });
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn set_source(
        &mut self,
        surface: &mut dyn RenderSurface,
        source: impl Into<String>,
    ) -> Result<()> {
        self.source = source.into();
        self.render(surface)
    }

    pub fn set_color(&mut self, surface: &mut dyn RenderSurface, color: Color) -> Result<()> {
        self.color = color;
        self.render(surface)
    }

    pub fn set_font(&mut self, ctx: &mut Context<'_>, font_path: &str, font_size: u32) -> Result<()> {
        self.font = ctx.assets().load_font(font_path, font_size)?;
        self.render(ctx.surface())
    }

    fn render(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        let texture = surface.render_text(&self.font, &self.source, self.color)?;
        let rect = self.rect.get();
        self.rect.set(Rect {
            w: texture.width() as i32,
            h: texture.height() as i32,
            ..rect
        });
        // Dropping the previous texture queues it for release.
        self.texture = texture;
        Ok(())
    }
}

impl Object for Text {
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
