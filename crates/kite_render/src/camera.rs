use glam::{Mat4, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Maps window pixels (origin top-left, y down) to clip space, so quads can
/// be submitted with the same integer rects the entities use.
#[derive(Debug, Clone, Copy)]
pub struct ScreenCamera {
    pub viewport: (u32, u32),
}

impl ScreenCamera {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn projection(&self) -> Mat4 {
        let w = self.viewport.0.max(1) as f32;
        let h = self.viewport.1.max(1) as f32;
        Mat4::orthographic_rh(0.0, w, h, 0.0, -1.0, 1.0)
    }

    pub fn build_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.projection().to_cols_array_2d(),
        }
    }

    pub fn to_clip(&self, x: f32, y: f32) -> Vec4 {
        self.projection() * Vec4::new(x, y, 0.0, 1.0)
    }
}
