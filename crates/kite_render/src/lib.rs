pub mod assets;
pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod quad_pipeline;
pub mod surface;
pub mod text;

pub use assets::FsAssetLoader;
pub use camera::ScreenCamera;
pub use gpu_context::GpuContext;
pub use quad_pipeline::{QuadPipeline, QuadVertex};
pub use surface::GpuSurface;
pub use text::rasterize_text;
