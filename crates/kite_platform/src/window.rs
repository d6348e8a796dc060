use kite_core::WindowConfig;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, WindowAttributes};

/// Attributes for the game window. A sized window is centered on the primary
/// monitor when one is known; an unsized one goes borderless fullscreen.
pub fn window_attributes(event_loop: &ActiveEventLoop, config: &WindowConfig) -> WindowAttributes {
    let attrs = WindowAttributes::default().with_title(&config.title);

    let Some((width, height)) = config.size else {
        return attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    };

    let attrs = attrs.with_inner_size(LogicalSize::new(width, height));
    match event_loop.primary_monitor() {
        Some(monitor) => {
            let screen = monitor.size();
            let scale = monitor.scale_factor();
            let (w, h) = (
                (width as f64 * scale) as i32,
                (height as f64 * scale) as i32,
            );
            let x = (screen.width as i32 - w) / 2;
            let y = (screen.height as i32 - h) / 2;
            attrs.with_position(PhysicalPosition::new(x.max(0), y.max(0)))
        }
        None => attrs,
    }
}
