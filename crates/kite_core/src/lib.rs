pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod id;
pub mod input;
pub mod platform;
pub mod signal;
pub mod time;

pub use config::{load_config_from_path, EngineConfig};
pub use error::{EngineError, Result};
pub use event::InputEvent;
pub use geometry::{Color, Rect};
pub use id::{ComponentId, IdAllocator, ObjectId};
pub use input::{InputState, Key, MouseBtn};
pub use platform::{
    AssetLoader, EventSource, Font, Image, Platform, PlatformLauncher, ReleaseQueue,
    RenderSurface, Texture, TextureId, WindowConfig,
};
pub use signal::{Signal, SignalKind, SignalSlot};
pub use time::Timer;
