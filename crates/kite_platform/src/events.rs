//! winit-backed [`EventSource`].
//!
//! winit normally owns the main loop through `run_app`. The engine drives its
//! own loop instead, so the event loop is pumped once per frame with a zero
//! timeout and whatever arrived is handed back as [`InputEvent`]s.

use std::sync::Arc;
use std::time::Duration;

use kite_core::{EngineError, EventSource, InputEvent, Result, WindowConfig};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::keymap::{map_button, map_key};
use crate::window::window_attributes;

const MAX_STARTUP_PUMPS: usize = 64;

struct EventPump {
    config: WindowConfig,
    window: Option<Arc<Window>>,
    startup_error: Option<String>,
    cursor: (i32, i32),
    events: Vec<InputEvent>,
}

impl ApplicationHandler for EventPump {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.startup_error.is_some() {
            return;
        }
        let attrs = window_attributes(event_loop, &self.config);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let size = window.inner_size();
                log::info!(
                    "Window created: '{}' {}x{}",
                    self.config.title,
                    size.width,
                    size.height
                );
                self.window = Some(Arc::new(window));
            }
            Err(err) => self.startup_error = Some(err.to_string()),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested.");
                self.events.push(InputEvent::Quit);
            }

            WindowEvent::Resized(size) => self.events.push(InputEvent::Resized {
                width: size.width,
                height: size.height,
            }),

            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = map_key(event.physical_key) {
                    self.events.push(match event.state {
                        ElementState::Pressed => InputEvent::KeyDown(key),
                        ElementState::Released => InputEvent::KeyUp(key),
                    });
                } else {
                    log::trace!("Ignoring unmapped key {:?}", event.physical_key);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as i32, position.y as i32);
                self.events.push(InputEvent::MouseMotion {
                    x: self.cursor.0,
                    y: self.cursor.1,
                });
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(button) else {
                    return;
                };
                let (x, y) = self.cursor;
                self.events.push(match state {
                    ElementState::Pressed => InputEvent::MouseDown { button, x, y },
                    ElementState::Released => InputEvent::MouseUp { button, x, y },
                });
            }

            _ => {}
        }
    }
}

pub struct DesktopEvents {
    // Field order is drop order: the window handle goes before its loop.
    window: Arc<Window>,
    pump: EventPump,
    event_loop: EventLoop<()>,
}

impl DesktopEvents {
    /// Creates the event loop and the game window.
    pub fn open(config: &WindowConfig) -> Result<Self> {
        let mut event_loop =
            EventLoop::new().map_err(|e| EngineError::Initialization(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut pump = EventPump {
            config: config.clone(),
            window: None,
            startup_error: None,
            cursor: (0, 0),
            events: Vec::new(),
        };

        // Windows can only be created from an active loop, so pump until
        // `resumed` has run.
        for _ in 0..MAX_STARTUP_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut pump)
            {
                return Err(EngineError::Initialization(format!(
                    "event loop exited during startup (code {code})"
                )));
            }
            if let Some(err) = pump.startup_error.take() {
                return Err(EngineError::Initialization(err));
            }
            if pump.window.is_some() {
                break;
            }
        }

        let window = pump.window.clone().ok_or_else(|| {
            EngineError::Initialization("window was not created during startup".to_string())
        })?;

        Ok(Self {
            window,
            pump,
            event_loop,
        })
    }

    pub fn window(&self) -> Arc<Window> {
        self.window.clone()
    }
}

impl EventSource for DesktopEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        if let PumpStatus::Exit(code) = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.pump)
        {
            log::debug!("Event loop exited with code {code}");
            self.pump.events.push(InputEvent::Quit);
        }
        self.window.request_redraw();
        std::mem::take(&mut self.pump.events)
    }
}
