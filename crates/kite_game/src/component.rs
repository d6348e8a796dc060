//! Pluggable game components.
//!
//! A component is anything the frame loop drives: it gets its objects loaded
//! once during setup, then receives input, update and draw callbacks every
//! frame while [`GameComponent::can_render`] is true, plus notifications from
//! other components. Every callback gets a [`Context`] for reaching the
//! surface, the assets and the rest of the engine.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kite_core::{ComponentId, Key, MouseBtn, Result};

use crate::context::Context;

/// Shared handle stored in the registry. Callers may keep their own clone.
pub type ComponentRef = Rc<RefCell<dyn GameComponent>>;

/// Identity of a component: its unique id and the optional name used for
/// targeted notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentInfo {
    id: ComponentId,
    name: Option<String>,
}

impl ComponentInfo {
    pub fn new(id: ComponentId) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: ComponentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for ComponentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} '{}'", self.id, name),
            None => write!(f, "{}", self.id),
        }
    }
}

#[allow(unused_variables)]
pub trait GameComponent {
    fn info(&self) -> &ComponentInfo;

    /// Called once from `Game::setup`, or on registration for components
    /// added while the game is running.
    fn load_objects(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Components that return false receive no input, update or draw calls.
    /// Notifications are still delivered.
    fn can_render(&self) -> bool {
        true
    }

    fn on_notify(
        &mut self,
        ctx: &mut Context<'_>,
        sender: Option<ComponentId>,
        message: &str,
    ) -> Result<()> {
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        Ok(())
    }

    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> Result<()> {
        Ok(())
    }

    fn on_key_up(&mut self, ctx: &mut Context<'_>, key: Key) -> Result<()> {
        Ok(())
    }

    fn on_mouse_down(&mut self, ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        Ok(())
    }

    fn on_mouse_up(&mut self, ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        Ok(())
    }

    fn on_mouse_motion(&mut self, ctx: &mut Context<'_>, x: i32, y: i32) -> Result<()> {
        Ok(())
    }

    /// Teardown hook, called once from `Game::close` while the platform is
    /// still alive.
    fn close(&mut self) {}
}
