pub mod component;
pub mod context;
pub mod desktop;
pub mod engine;
pub mod entity;
pub mod registry;
pub mod testing;

pub use component::{ComponentInfo, ComponentRef, GameComponent};
pub use context::Context;
pub use desktop::DesktopLauncher;
pub use engine::{EngineState, Game, GAME_OVER, START_RENDERING};
pub use entity::{Button, Object, SharedRect, Sprite, Text};
pub use registry::ALL;
