pub mod events;
pub mod keymap;
pub mod window;

pub use events::DesktopEvents;
pub use keymap::{map_button, map_key};
pub use window::window_attributes;
