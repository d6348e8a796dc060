//! CPU-side mesh building for a frame's quads.
//!
//! Quads are emitted in submission order. Consecutive quads sharing a texture
//! are merged into one draw call so the pass switches bind groups only when
//! the texture actually changes.

use kite_core::{Rect, TextureId};

use crate::quad_pipeline::QuadVertex;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedQuad {
    pub texture: TextureId,
    pub dest: Rect,
    pub tint: [f32; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCall {
    pub texture: TextureId,
    pub index_start: u32,
    pub index_count: u32,
}

#[derive(Debug, Default)]
pub struct FrameMesh {
    pub vertices: Vec<QuadVertex>,
    pub indices: Vec<u32>,
    pub draw_calls: Vec<DrawCall>,
}

pub fn build_mesh(quads: &[QueuedQuad]) -> FrameMesh {
    let mut mesh = FrameMesh {
        vertices: Vec::with_capacity(quads.len() * 4),
        indices: Vec::with_capacity(quads.len() * 6),
        draw_calls: Vec::new(),
    };
    for quad in quads {
        let index_start = mesh.indices.len() as u32;
        add_quad(&mut mesh.vertices, &mut mesh.indices, quad);
        push_draw_call(&mut mesh.draw_calls, quad.texture, index_start, 6);
    }
    mesh
}

fn add_quad(vertices: &mut Vec<QuadVertex>, indices: &mut Vec<u32>, quad: &QueuedQuad) {
    let left = quad.dest.x as f32;
    let top = quad.dest.y as f32;
    let right = quad.dest.right() as f32;
    let bottom = quad.dest.bottom() as f32;
    let base = vertices.len() as u32;

    let corners = [
        ([left, top], [0.0, 0.0]),
        ([right, top], [1.0, 0.0]),
        ([left, bottom], [0.0, 1.0]),
        ([right, bottom], [1.0, 1.0]),
    ];
    for (position, tex_coords) in corners {
        vertices.push(QuadVertex {
            position,
            tex_coords,
            color: quad.tint,
        });
    }
    indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 1, base + 3]);
}

fn push_draw_call(calls: &mut Vec<DrawCall>, texture: TextureId, index_start: u32, count: u32) {
    if let Some(last) = calls.last_mut() {
        if last.texture == texture && last.index_start + last.index_count == index_start {
            last.index_count += count;
            return;
        }
    }
    calls.push(DrawCall {
        texture,
        index_start,
        index_count: count,
    });
}
