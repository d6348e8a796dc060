#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use kite_core::{ComponentId, EngineConfig, Key, MouseBtn, Result};
use kite_game::testing::HeadlessLauncher;
use kite_game::{ComponentInfo, Context, Game, GameComponent};

pub type Journal = Rc<RefCell<Vec<String>>>;
pub type Hook = Box<dyn FnMut(&mut Context<'_>) -> Result<()>>;
pub type NotifyHook = Box<dyn FnMut(&mut Context<'_>, Option<ComponentId>, &str) -> Result<()>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.borrow().clone()
}

pub fn count(journal: &Journal, entry: &str) -> usize {
    journal.borrow().iter().filter(|e| e.as_str() == entry).count()
}

/// Component that writes `"<label> <event>"` to a shared journal for every
/// callback it receives, with optional behavior hooks.
pub struct Probe {
    info: ComponentInfo,
    label: String,
    journal: Journal,
    pub renders: bool,
    pub on_update: Option<Hook>,
    pub on_notify: Option<NotifyHook>,
}

impl Probe {
    pub fn new(info: ComponentInfo, label: &str, journal: &Journal) -> Self {
        Self {
            info,
            label: label.to_string(),
            journal: journal.clone(),
            renders: true,
            on_update: None,
            on_notify: None,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.renders = false;
        self
    }

    pub fn updating(mut self, hook: impl FnMut(&mut Context<'_>) -> Result<()> + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn notified(
        mut self,
        hook: impl FnMut(&mut Context<'_>, Option<ComponentId>, &str) -> Result<()> + 'static,
    ) -> Self {
        self.on_notify = Some(Box::new(hook));
        self
    }

    pub fn shared(self) -> Rc<RefCell<Probe>> {
        Rc::new(RefCell::new(self))
    }

    fn write(&self, event: impl AsRef<str>) {
        self.journal
            .borrow_mut()
            .push(format!("{} {}", self.label, event.as_ref()));
    }
}

impl GameComponent for Probe {
    fn info(&self) -> &ComponentInfo {
        &self.info
    }

    fn load_objects(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        self.write("load");
        Ok(())
    }

    fn can_render(&self) -> bool {
        self.renders
    }

    fn on_notify(
        &mut self,
        ctx: &mut Context<'_>,
        sender: Option<ComponentId>,
        message: &str,
    ) -> Result<()> {
        self.write(format!("notify {message}"));
        match &mut self.on_notify {
            Some(hook) => hook(ctx, sender, message),
            None => Ok(()),
        }
    }

    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        self.write("update");
        match &mut self.on_update {
            Some(hook) => hook(ctx),
            None => Ok(()),
        }
    }

    fn draw(&mut self, _ctx: &mut Context<'_>) -> Result<()> {
        self.write("draw");
        Ok(())
    }

    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> Result<()> {
        let held = ctx.input().is_held(key);
        self.write(format!("key_down {key} held={held}"));
        Ok(())
    }

    fn on_key_up(&mut self, _ctx: &mut Context<'_>, key: Key) -> Result<()> {
        self.write(format!("key_up {key}"));
        Ok(())
    }

    fn on_mouse_down(&mut self, _ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        self.write(format!("mouse_down {button:?} {x},{y}"));
        Ok(())
    }

    fn on_mouse_up(&mut self, _ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        self.write(format!("mouse_up {button:?} {x},{y}"));
        Ok(())
    }

    fn on_mouse_motion(&mut self, _ctx: &mut Context<'_>, x: i32, y: i32) -> Result<()> {
        self.write(format!("mouse_motion {x},{y}"));
        Ok(())
    }

    fn close(&mut self) {
        self.write("close");
    }
}

/// A game initialized on `launcher` with a 640x480 window.
pub fn headless_game(launcher: &HeadlessLauncher) -> Game {
    headless_game_with(launcher, EngineConfig::default())
}

pub fn headless_game_with(launcher: &HeadlessLauncher, config: EngineConfig) -> Game {
    let mut game = Game::new(config);
    game.initialize(launcher, "kite test", Some((640, 480)))
        .expect("headless launch never fails");
    game
}
