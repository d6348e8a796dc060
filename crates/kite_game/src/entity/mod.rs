//! Renderable, updatable objects placed on screen by integer rects.

mod button;
mod sprite;
mod text;

use std::cell::Cell;
use std::rc::Rc;

use kite_core::{ObjectId, Rect, RenderSurface};

pub use button::{Button, ButtonCallback};
pub use sprite::Sprite;
pub use text::Text;

/// An object's placement. Shared so that other code (a layout, another
/// object) can move it; [`Rect`] itself is `Copy`, so `get()` is always an
/// independent snapshot.
pub type SharedRect = Rc<Cell<Rect>>;

pub fn shared_rect(rect: Rect) -> SharedRect {
    Rc::new(Cell::new(rect))
}

pub trait Object {
    fn id(&self) -> ObjectId;

    fn rect(&self) -> &SharedRect;

    fn draw(&self, surface: &mut dyn RenderSurface);

    fn update(&mut self) {}

    fn move_to(&mut self, x: i32, y: i32) {
        let rect = self.rect().get();
        self.rect().set(Rect { x, y, ..rect });
    }

    fn resize(&mut self, w: i32, h: i32) {
        let rect = self.rect().get();
        self.rect().set(Rect { w, h, ..rect });
    }

    fn collides_with(&self, other: &dyn Object) -> bool {
        self.collides_with_rect(&other.rect().get())
    }

    fn collides_with_rect(&self, rect: &Rect) -> bool {
        self.rect().get().overlaps(rect)
    }
}

/// Applies and clears a per-frame displacement.
fn apply_change(rect: &SharedRect, change_x: &mut i32, change_y: &mut i32) {
    let current = rect.get();
    rect.set(Rect {
        x: current.x.saturating_add(*change_x),
        y: current.y.saturating_add(*change_y),
        ..current
    });
    *change_x = 0;
    *change_y = 0;
}
