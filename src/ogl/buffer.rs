use std::ffi::c_void;
use std::mem::size_of_val;

use gl::types::{GLenum, GLint, GLsizei};

/// A vertex array object together with the vertex buffers it reads from.
pub struct VertexArray {
    id: u32,
    vbos: Vec<VertexBuffer>,
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut id);
        }

        Self {
            id,
            vbos: Vec::new(),
        }
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindVertexArray(self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindVertexArray(0);
        }
    }

    /// Records the buffer's attribute layout in this VAO and takes ownership of the buffer
    pub fn bind_vertex_buffer(&mut self, vbo: VertexBuffer) {
        self.bind();
        vbo.bind();
        vbo.bind_vertex_attributes();
        self.unbind();
        vbo.unbind();

        self.vbos.push(vbo);
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        // The buffers are deleted after the array that references them
        tracing::debug!("Deleting vertex array with id: {}", self.id);
        unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlDataType {
    Float = gl::FLOAT as isize,
}

/// Where one vertex attribute lives inside an interleaved buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    /// Number of components
    pub size: i32,
    pub data_type: GlDataType,
    pub normalized: bool,
    /// Byte distance between two consecutive vertices
    pub stride: GLint,
    /// Byte offset of the first component
    pub offset: usize,
}

pub struct VertexBuffer {
    id: u32,
    vertex_attributes: Vec<VertexAttribute>,
}

impl VertexBuffer {
    /// Creates a buffer and uploads `data` with GL_STATIC_DRAW
    pub fn new<T: Copy>(data: &[T]) -> Self {
        let mut id = 0;
        unsafe {
            gl::GenBuffers(1, &mut id);
        }
        let vbo = Self {
            id,
            vertex_attributes: Vec::new(),
        };

        vbo.bind();
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                size_of_val(data) as isize,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
        }
        vbo.unbind();

        vbo
    }

    pub fn bind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.id);
        }
    }

    pub fn unbind(&self) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }
    }

    pub fn add_vertex_attribute(&mut self, attribute: VertexAttribute) {
        self.vertex_attributes.push(attribute);
    }

    fn bind_vertex_attributes(&self) {
        for attr in &self.vertex_attributes {
            unsafe {
                gl::VertexAttribPointer(
                    attr.index,
                    attr.size,
                    attr.data_type as GLenum,
                    if attr.normalized { gl::TRUE } else { gl::FALSE },
                    attr.stride as GLsizei,
                    attr.offset as *const c_void,
                );
                gl::EnableVertexAttribArray(attr.index);
            }
        }
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        tracing::debug!("Deleting vertex buffer with id: {}", self.id);
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}
