//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    pub player: [f32; 4],
    pub bullet: [f32; 4],
    pub enemy: [f32; 4],
    pub text: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        background: [0.02, 0.02, 0.05, 1.0],
        player: [0.2, 0.5, 1.0, 1.0],
        bullet: [1.0, 0.9, 0.3, 1.0],
        enemy: [0.9, 0.25, 0.25, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: [0.0, 0.0, 0.0, 1.0],
        player: [0.0, 1.0, 1.0, 1.0],
        bullet: [1.0, 1.0, 0.0, 1.0],
        enemy: [1.0, 0.0, 1.0, 1.0],
        text: [1.0, 1.0, 1.0, 1.0],
    };

    pub fn for_settings(high_contrast: bool) -> Palette {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }
}
