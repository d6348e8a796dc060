//! The engine core: lifecycle, frame loop and control-signal handling.
//!
//! A frame runs in a fixed order:
//!
//!   1. clear the surface, drain input into [`InputState`] and fan it out
//!   2. update pass, then draw pass, over render-eligible components
//!   3. absorb the pending signal (game over) or act on it (close, fault)
//!   4. present
//!   5. register components added from callbacks during the frame
//!
//! Components are visited in registration order in every pass, each pass
//! over a snapshot of the registry taken when the pass starts.

use kite_core::{
    ComponentId, EngineConfig, EngineError, IdAllocator, InputEvent, InputState, Key,
    Platform, PlatformLauncher, Rect, RenderSurface, Result, Signal, SignalKind, SignalSlot,
};

use crate::component::{ComponentRef, GameComponent};
use crate::context::{Context, PendingNotify};
use crate::registry::{Registered, Registry, ALL};

/// Broadcast to every component when `run` starts.
pub const START_RENDERING: &str = "start rendering";
/// Broadcast on game over; also the status the game is left in.
pub const GAME_OVER: &str = "gameOver";

const QUIT_MESSAGE: &str = "User close game!";
const ESCAPE_MESSAGE: &str = "User close game with escape key!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    Running,
    Closed,
}

impl EngineState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Ready => "ready",
            Self::Running => "running",
            Self::Closed => "closed",
        }
    }
}

pub struct Game {
    config: EngineConfig,
    ids: IdAllocator,
    platform: Option<Platform>,
    input: InputState,
    registry: Registry,
    deferred: Vec<ComponentRef>,
    pending: Vec<PendingNotify>,
    signal: SignalSlot,
    status: String,
    running: bool,
    closed: bool,
    state: EngineState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Game {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            platform: None,
            input: InputState::new(),
            registry: Registry::new(),
            deferred: Vec::new(),
            pending: Vec::new(),
            signal: SignalSlot::default(),
            status: String::new(),
            running: false,
            closed: false,
            state: EngineState::Uninitialized,
        }
    }

    /// Opens the window titled `name` and brings up the surface, event
    /// source and asset loader. Without a size the window is fullscreen.
    pub fn initialize(
        &mut self,
        launcher: &dyn PlatformLauncher,
        name: &str,
        size: Option<(u32, u32)>,
    ) -> Result<()> {
        self.expect_state(EngineState::Uninitialized)?;
        let mut window = self.config.window();
        window.title = name.to_string();
        window.size = size;

        let platform = launcher.launch(&window)?;
        self.platform = Some(platform);
        self.state = EngineState::Ready;
        match size {
            Some((w, h)) => log::info!("Initialized '{}' ({}x{})", name, w, h),
            None => log::info!("Initialized '{}' (fullscreen)", name),
        }
        Ok(())
    }

    /// Loads every registered component's objects, in registration order,
    /// and arms the loop.
    pub fn setup(&mut self) -> Result<()> {
        self.expect_state(EngineState::Ready)?;
        let snapshot = self.registry.snapshot();
        for entry in &snapshot {
            self.with_context(&snapshot, |ctx| entry.borrow_mut()?.load_objects(ctx))?;
        }
        self.running = true;
        self.closed = false;
        self.state = EngineState::Running;
        self.apply_deferred()?;
        log::info!("Setup complete: {} component(s)", self.registry.len());
        Ok(())
    }

    /// Runs frames until a close signal (or the window's close button) stops
    /// the loop, then tears the engine down. A fault signal is returned as
    /// [`EngineError::UnhandledSignal`].
    pub fn run(&mut self) -> Result<()> {
        self.expect_state(EngineState::Running)?;
        self.notify(None, ALL, START_RENDERING)?;
        while self.running {
            self.frame()?;
        }
        self.close();
        Ok(())
    }

    /// One iteration of the loop.
    pub fn frame(&mut self) -> Result<()> {
        self.expect_state(EngineState::Running)?;
        self.surface_mut()?.clear();
        self.update()?;
        self.draw()?;
        self.handle_signal()?;
        self.surface_mut()?.present()?;
        self.apply_deferred()
    }

    /// Drains input, then runs the update pass.
    pub fn update(&mut self) -> Result<()> {
        self.poll_events()?;
        self.run_pass(|component, ctx| component.update(ctx))
    }

    pub fn draw(&mut self) -> Result<()> {
        self.run_pass(|component, ctx| component.draw(ctx))
    }

    /// Calls every component's teardown hook and releases the platform.
    /// Safe to call more than once; also runs on drop.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.running = false;
        for entry in self.registry.iter() {
            match entry.borrow_mut() {
                Ok(mut component) => component.close(),
                Err(e) => log::warn!("Skipping close hook: {e}"),
            }
        }
        self.deferred.clear();
        self.pending.clear();
        if self.platform.take().is_some() {
            log::info!("Platform shut down");
        }
        self.state = EngineState::Closed;
        log::info!("Game closed");
    }

    pub fn raise_signal(&mut self, kind: SignalKind, message: impl Into<String>) {
        self.signal.raise(Signal::new(kind, message));
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// See [`Context::notify`].
    pub fn notify(
        &mut self,
        sender: Option<ComponentId>,
        target: &str,
        message: &str,
    ) -> Result<()> {
        let snapshot = self.registry.snapshot();
        self.with_context(&snapshot, |ctx| ctx.notify(sender, target, message))
    }

    /// Registers a component. Once the game is running its objects are
    /// loaded right away; before that, `setup` loads them.
    pub fn add_component(&mut self, component: ComponentRef) -> Result<()> {
        let entry = self.registry.push(component)?;
        if self.state == EngineState::Running {
            let snapshot = self.registry.snapshot();
            self.with_context(&snapshot, |ctx| entry.borrow_mut()?.load_objects(ctx))?;
        }
        Ok(())
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn pending_signal(&self) -> Option<&Signal> {
        self.signal.peek()
    }

    pub fn component_count(&self) -> usize {
        self.registry.len()
    }

    pub fn window_rect(&self) -> Result<Rect> {
        let platform = self.platform.as_ref().ok_or(EngineError::NotInitialized)?;
        Ok(platform.surface.window_rect())
    }

    fn expect_state(&self, expected: EngineState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(EngineError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }

    fn surface_mut(&mut self) -> Result<&mut dyn RenderSurface> {
        let platform = self.platform.as_mut().ok_or(EngineError::NotInitialized)?;
        Ok(platform.surface.as_mut())
    }

    /// Runs `f` against a fresh [`Context`], then delivers notifications
    /// that were queued for components busy during `f`.
    fn with_context<R>(
        &mut self,
        registry: &[Registered],
        f: impl FnOnce(&mut Context<'_>) -> Result<R>,
    ) -> Result<R> {
        let platform = self.platform.as_mut().ok_or(EngineError::NotInitialized)?;
        let result = {
            let mut ctx = Context::new(
                platform.surface.as_mut(),
                platform.assets.as_ref(),
                &self.input,
                &self.ids,
                &mut self.signal,
                &mut self.status,
                registry,
                &mut self.deferred,
                &mut self.pending,
            );
            f(&mut ctx).and_then(|value| {
                ctx.flush_notifications()?;
                Ok(value)
            })
        };
        if result.is_err() {
            self.pending.clear();
        }
        result
    }

    /// Runs `step` on each render-eligible component until a signal is
    /// raised; the remaining components are skipped for this pass.
    fn run_pass(
        &mut self,
        mut step: impl FnMut(&mut dyn GameComponent, &mut Context<'_>) -> Result<()>,
    ) -> Result<()> {
        let snapshot = self.registry.snapshot();
        for entry in &snapshot {
            if self.signal.is_pending() {
                break;
            }
            self.with_context(&snapshot, |ctx| {
                let mut component = entry.borrow_mut()?;
                if component.can_render() {
                    step(&mut *component, ctx)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Result<()> {
        let events = {
            let platform = self.platform.as_mut().ok_or(EngineError::NotInitialized)?;
            platform.events.poll_events()
        };
        for event in events {
            match event {
                InputEvent::Quit => {
                    self.signal.raise(Signal::close(QUIT_MESSAGE));
                    break;
                }
                InputEvent::Resized { width, height } => {
                    self.surface_mut()?.resize(width, height);
                }
                InputEvent::KeyDown(key) => {
                    self.input.key_down(key);
                    if key == Key::Escape && self.config.close_on_escape {
                        self.signal.raise(Signal::close(ESCAPE_MESSAGE));
                    }
                    self.dispatch_input(|component, ctx| component.on_key_down(ctx, key))?;
                }
                InputEvent::KeyUp(key) => {
                    self.input.key_up(key);
                    self.dispatch_input(|component, ctx| component.on_key_up(ctx, key))?;
                }
                InputEvent::MouseDown { button, x, y } => {
                    self.input.mouse_down(button);
                    self.dispatch_input(|component, ctx| {
                        component.on_mouse_down(ctx, button, x, y)
                    })?;
                }
                InputEvent::MouseUp { button, x, y } => {
                    self.input.mouse_up(button);
                    self.dispatch_input(|component, ctx| component.on_mouse_up(ctx, button, x, y))?;
                }
                InputEvent::MouseMotion { x, y } => {
                    self.input.mouse_motion(x, y);
                    self.dispatch_input(|component, ctx| component.on_mouse_motion(ctx, x, y))?;
                }
            }
        }
        Ok(())
    }

    fn dispatch_input(
        &mut self,
        mut handler: impl FnMut(&mut dyn GameComponent, &mut Context<'_>) -> Result<()>,
    ) -> Result<()> {
        let snapshot = self.registry.snapshot();
        for entry in &snapshot {
            self.with_context(&snapshot, |ctx| {
                let mut component = entry.borrow_mut()?;
                if component.can_render() {
                    handler(&mut *component, ctx)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }

    fn handle_signal(&mut self) -> Result<()> {
        let Some(signal) = self.signal.take() else {
            return Ok(());
        };
        match signal.kind {
            SignalKind::GameOver => {
                log::info!("Game over: {}", signal.message);
                self.notify(None, ALL, GAME_OVER)?;
                self.status = GAME_OVER.to_string();
            }
            SignalKind::Close => {
                log::info!("{}", signal.message);
                self.running = false;
            }
            SignalKind::Fault(_) => {
                log::error!(
                    "Unhandled signal '{}': {}",
                    signal.kind.name(),
                    signal.message
                );
                return Err(signal.into_fault());
            }
        }
        Ok(())
    }

    fn apply_deferred(&mut self) -> Result<()> {
        while !self.deferred.is_empty() {
            for component in std::mem::take(&mut self.deferred) {
                self.add_component(component)?;
            }
        }
        Ok(())
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.close();
    }
}
