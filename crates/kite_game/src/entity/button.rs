use kite_core::{ObjectId, Rect, RenderSurface, Result};

use super::{Object, SharedRect, Sprite, Text};
use crate::context::Context;

pub type ButtonCallback = Box<dyn FnMut(&mut Context<'_>) -> Result<()>>;

/// A sprite that fires a callback when clicked: pressed inside, then
/// released inside. An optional text label is drawn on top.
pub struct Button {
    sprite: Sprite,
    label: Option<Text>,
    on_press: ButtonCallback,
    is_pressed: bool,
}

impl Button {
    pub fn new(
        ctx: &mut Context<'_>,
        path: &str,
        rect: Option<Rect>,
        on_press: impl FnMut(&mut Context<'_>) -> Result<()> + 'static,
    ) -> Result<Self> {
        let sprite = Sprite::new(ctx, path, rect)?;
        Ok(Self::from_sprite(sprite, on_press))
    }

    pub fn from_sprite(
        sprite: Sprite,
        on_press: impl FnMut(&mut Context<'_>) -> Result<()> + 'static,
    ) -> Self {
        Self {
            sprite,
            label: None,
            on_press: Box::new(on_press),
            is_pressed: false,
        }
    }

    pub fn set_text(&mut self, label: Text) {
        self.label = Some(label);
    }

    pub fn label(&self) -> Option<&Text> {
        self.label.as_ref()
    }

    pub fn label_mut(&mut self) -> Option<&mut Text> {
        self.label.as_mut()
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    pub fn on_mouse_down(&mut self, x: i32, y: i32) {
        if self.sprite.rect().get().contains_point(x, y) {
            self.is_pressed = true;
        }
    }

    /// Fires the callback if the button was pressed and the release is
    /// inside it. Always clears the pressed state. Returns whether the
    /// callback fired.
    pub fn on_mouse_up(&mut self, ctx: &mut Context<'_>, x: i32, y: i32) -> Result<bool> {
        let fire = self.is_pressed && self.sprite.rect().get().contains_point(x, y);
        self.is_pressed = false;
        if fire {
            (self.on_press)(ctx)?;
        }
        Ok(fire)
    }

    pub fn on_mouse_motion(&mut self, _x: i32, _y: i32) {}
}

impl Object for Button {
    fn id(&self) -> ObjectId {
        self.sprite.id()
    }

    fn rect(&self) -> &SharedRect {
        self.sprite.rect()
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        self.sprite.draw(surface);
        if let Some(label) = &self.label {
            label.draw(surface);
        }
    }

    fn update(&mut self) {
        self.sprite.update();
        if let Some(label) = &mut self.label {
            label.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use crate::testing::ContextHarness;
    use kite_core::{Color, EngineError, SignalKind};

    fn harness() -> ContextHarness {
        ContextHarness::new()
            .with_image("textures/button.png", 8, 8)
            .with_font("fonts/ui.ttf")
    }

    fn counting_button(harness: &mut ContextHarness) -> (Button, Rc<Cell<u32>>) {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();
        let button = Button::new(
            &mut harness.context(),
            "button.png",
            Some(Rect::new(0, 0, 10, 10)),
            move |_| {
                counter.set(counter.get() + 1);
                Ok(())
            },
        )
        .expect("button loads");
        (button, count)
    }

    #[test]
    fn press_and_release_inside_fires_once() {
        let mut harness = harness();
        let (mut button, count) = counting_button(&mut harness);
        button.on_mouse_down(5, 5);
        assert!(button.is_pressed());
        assert!(button.on_mouse_up(&mut harness.context(), 5, 5).expect("callback ok"));
        assert_eq!(count.get(), 1);
        assert!(!button.is_pressed());
        assert!(!button.on_mouse_up(&mut harness.context(), 5, 5).expect("no-op"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn release_outside_never_fires_and_clears_press() {
        let mut harness = harness();
        let (mut button, count) = counting_button(&mut harness);
        button.on_mouse_down(5, 5);
        assert!(!button.on_mouse_up(&mut harness.context(), 50, 50).expect("ok"));
        assert_eq!(count.get(), 0);
        assert!(!button.is_pressed());
    }

    #[test]
    fn release_inside_without_press_does_not_fire() {
        let mut harness = harness();
        let (mut button, count) = counting_button(&mut harness);
        button.on_mouse_down(20, 20);
        assert!(!button.is_pressed());
        assert!(!button.on_mouse_up(&mut harness.context(), 5, 5).expect("ok"));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn edges_count_as_inside() {
        let mut harness = harness();
        let (mut button, count) = counting_button(&mut harness);
        button.on_mouse_down(10, 10);
        assert!(button.on_mouse_up(&mut harness.context(), 0, 10).expect("ok"));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn callback_can_raise_signals_and_errors_propagate() {
        let mut harness = harness();
        let mut quit = Button::new(&mut harness.context(), "button.png", None, |ctx| {
            ctx.raise_signal(SignalKind::Close, "quit pressed");
            Ok(())
        })
        .expect("loads");
        quit.on_mouse_down(1, 1);
        quit.on_mouse_up(&mut harness.context(), 1, 1).expect("ok");
        assert_eq!(
            harness.signal.peek().map(|s| s.kind.clone()),
            Some(SignalKind::Close)
        );

        let mut broken = Button::new(&mut harness.context(), "button.png", None, |_| {
            Err(EngineError::Component("broken".to_string()))
        })
        .expect("loads");
        broken.on_mouse_down(1, 1);
        let err = broken
            .on_mouse_up(&mut harness.context(), 1, 1)
            .expect_err("callback error");
        assert!(matches!(err, EngineError::Component(_)));
        assert!(!broken.is_pressed());
    }

    #[test]
    fn draw_and_update_delegate_to_sprite_then_label() {
        let mut harness = harness();
        let (mut button, _) = counting_button(&mut harness);
        let label = Text::new(
            &mut harness.context(),
            "OK",
            Color::WHITE,
            (5, 5),
            "fonts/ui.ttf",
            8,
            true,
        )
        .expect("label renders");
        let label_texture = label.texture().id();
        button.set_text(label);

        button.sprite_mut().change_x = 2;
        if let Some(label) = button.label_mut() {
            label.change_y = 3;
        }
        button.update();
        assert_eq!(button.rect().get().x, 2);

        button.draw(&mut harness.surface);
        let draws = harness.surface.record().draws;
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0, button.sprite().texture().id());
        assert_eq!(draws[1].0, label_texture);
        assert_eq!(draws[1].1.y, button.label().map(|l| l.rect().get().y).unwrap_or_default());
    }
}
