use std::mem::{offset_of, size_of};

use glam::{Vec2, Vec3};

use crate::ogl::buffer::{GlDataType, VertexArray, VertexAttribute, VertexBuffer};

pub const POS_INDEX: u32 = 0;
pub const COLOR_INDEX: u32 = 1;
pub const TEXCOORDS_INDEX: u32 = 2;

/// Interleaved per-vertex data as it is laid out in the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    /// Uploaded for texturing, the built-in shaders don't read it
    pub tex_coords: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, color: Vec3, tex_coords: Vec2) -> Self {
        Self {
            position,
            color,
            tex_coords,
        }
    }

    pub fn attributes() -> [VertexAttribute; 3] {
        let stride = size_of::<Vertex>() as i32;
        let attrib = |index, size, offset| VertexAttribute {
            index,
            size,
            data_type: GlDataType::Float,
            normalized: false,
            stride,
            offset,
        };

        [
            attrib(POS_INDEX, 3, offset_of!(Vertex, position)),
            attrib(COLOR_INDEX, 3, offset_of!(Vertex, color)),
            attrib(TEXCOORDS_INDEX, 2, offset_of!(Vertex, tex_coords)),
        ]
    }
}

/// Red bottom right, green bottom left and blue top corner
pub fn triangle() -> [Vertex; 3] {
    [
        Vertex::new(Vec3::new(0.5, -0.5, 0.), Vec3::X, Vec2::new(1., 0.)),
        Vertex::new(Vec3::new(-0.5, -0.5, 0.), Vec3::Y, Vec2::new(0., 0.)),
        Vertex::new(Vec3::new(0., 0.5, 0.), Vec3::Z, Vec2::new(0.5, 1.)),
    ]
}

/// Non-indexed geometry drawn as a triangle list
pub struct Mesh {
    vao: VertexArray,
    vertex_count: i32,
}

impl Mesh {
    pub fn new(vertices: &[Vertex]) -> Self {
        let mut vbo = VertexBuffer::new(vertices);
        for attribute in Vertex::attributes() {
            vbo.add_vertex_attribute(attribute);
        }

        let mut vao = VertexArray::new();
        vao.bind_vertex_buffer(vbo);

        Self {
            vao,
            vertex_count: vertices.len() as i32,
        }
    }

    pub fn draw(&self) {
        self.vao.bind();
        unsafe {
            gl::DrawArrays(gl::TRIANGLES, 0, self.vertex_count);
        }
        self.vao.unbind();
    }
}
