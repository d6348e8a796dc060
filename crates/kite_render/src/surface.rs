//! wgpu implementation of [`RenderSurface`].
//!
//! Draw requests are queued between `clear` and `present`; `present` builds
//! one mesh for the whole frame, streams it into GPU buffers that grow
//! (power-of-two) but never shrink, and issues one draw call per run of
//! same-texture quads.

use std::collections::HashMap;
use std::sync::Arc;

use kite_core::{
    Color, EngineError, Font, Image, Rect, ReleaseQueue, RenderSurface, Result, Texture, TextureId,
};
use winit::window::Window;

use crate::batch::{build_mesh, QueuedQuad};
use crate::camera::ScreenCamera;
use crate::gpu_context::GpuContext;
use crate::quad_pipeline::{QuadPipeline, QuadVertex};
use crate::text::rasterize_text;

struct GpuTexture {
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

pub struct GpuSurface {
    window: Arc<Window>,
    gpu: GpuContext,
    pipeline: QuadPipeline,
    camera: ScreenCamera,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    index_capacity: usize,
    clear_color: Color,
    textures: HashMap<TextureId, GpuTexture>,
    releases: ReleaseQueue,
    next_texture: u64,
    queued: Vec<QueuedQuad>,
}

impl GpuSurface {
    pub fn new(window: Arc<Window>, vsync: bool, clear_color: Color) -> Result<Self> {
        let gpu = GpuContext::new(window.clone(), vsync)?;
        let pipeline = QuadPipeline::new(&gpu.device, gpu.surface_format);
        let camera = ScreenCamera::new(gpu.size.0, gpu.size.1);
        let (camera_buffer, camera_bind_group) =
            pipeline.create_camera_buffer(&gpu.device, camera.build_uniform());
        let vertex_buffer = create_vertex_buffer(&gpu.device, 4);
        let index_buffer = create_index_buffer(&gpu.device, 6);

        Ok(Self {
            window,
            gpu,
            pipeline,
            camera,
            camera_buffer,
            camera_bind_group,
            vertex_buffer,
            index_buffer,
            vertex_capacity: 4,
            index_capacity: 6,
            clear_color,
            textures: HashMap::new(),
            releases: ReleaseQueue::new(),
            next_texture: 0,
            queued: Vec::new(),
        })
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    fn free_released_textures(&mut self) {
        for id in self.releases.drain() {
            if self.textures.remove(&id).is_none() {
                log::warn!("Released unknown texture {:?}", id);
            }
        }
    }

    fn ensure_mesh_capacity(&mut self, vertex_count: usize, index_count: usize) {
        if vertex_count > self.vertex_capacity {
            self.vertex_capacity = vertex_count.next_power_of_two();
            self.vertex_buffer = create_vertex_buffer(&self.gpu.device, self.vertex_capacity);
        }
        if index_count > self.index_capacity {
            self.index_capacity = index_count.next_power_of_two();
            self.index_buffer = create_index_buffer(&self.gpu.device, self.index_capacity);
        }
    }
}

impl RenderSurface for GpuSurface {
    fn clear(&mut self) {
        self.free_released_textures();
        self.queued.clear();
    }

    fn present(&mut self) -> Result<()> {
        let mesh = build_mesh(&self.queued);
        self.ensure_mesh_capacity(mesh.vertices.len(), mesh.indices.len());
        if !mesh.vertices.is_empty() {
            self.gpu.queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&mesh.vertices),
            );
            self.gpu
                .queue
                .write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&mesh.indices));
        }

        let Some((frame, view)) = self.gpu.begin_frame() else {
            return Ok(());
        };

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Kite Frame Encoder"),
            });
        {
            let [r, g, b, a] = self.clear_color.to_f32();
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Kite Quad Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !mesh.draw_calls.is_empty() {
                pass.set_pipeline(&self.pipeline.pipeline);
                pass.set_bind_group(0, &self.camera_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for call in &mesh.draw_calls {
                    let Some(texture) = self.textures.get(&call.texture) else {
                        log::trace!("Skipping draw for freed texture {:?}", call.texture);
                        continue;
                    };
                    pass.set_bind_group(1, &texture.bind_group, &[]);
                    pass.draw_indexed(
                        call.index_start..call.index_start + call.index_count,
                        0,
                        0..1,
                    );
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        frame.present();
        Ok(())
    }

    fn create_texture(&mut self, image: &Image) -> Result<Texture> {
        if image.width == 0 || image.height == 0 {
            return Err(EngineError::Render(format!(
                "cannot create a {}x{} texture",
                image.width, image.height
            )));
        }
        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let texture = self.gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Kite Texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self
            .pipeline
            .create_texture_bind_group(&self.gpu.device, &view);

        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(
            id,
            GpuTexture {
                _texture: texture,
                bind_group,
            },
        );
        Ok(Texture::new(id, image.width, image.height, &self.releases))
    }

    fn render_text(&mut self, font: &Font, text: &str, color: Color) -> Result<Texture> {
        let image = rasterize_text(font, text, color)?;
        self.create_texture(&image)
    }

    fn draw_quad(&mut self, texture: &Texture, dest: Rect) {
        self.queued.push(QueuedQuad {
            texture: texture.id(),
            dest,
            tint: Color::WHITE.to_f32(),
        });
    }

    fn window_rect(&self) -> Rect {
        let (x, y) = self
            .window
            .outer_position()
            .map(|p| (p.x, p.y))
            .unwrap_or((0, 0));
        Rect::new(x, y, self.gpu.size.0 as i32, self.gpu.size.1 as i32)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        self.camera.viewport = (width, height);
        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera.build_uniform()]),
        );
        log::info!("Resized to {}x{}", width, height);
    }
}

impl Drop for GpuSurface {
    fn drop(&mut self) {
        self.free_released_textures();
        if !self.textures.is_empty() {
            log::debug!(
                "Dropping surface with {} live texture(s)",
                self.textures.len()
            );
        }
    }
}

fn create_vertex_buffer(device: &wgpu::Device, vertex_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Vertex Buffer"),
        size: (vertex_capacity.max(1) * std::mem::size_of::<QuadVertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn create_index_buffer(device: &wgpu::Device, index_capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Quad Index Buffer"),
        size: (index_capacity.max(1) * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
