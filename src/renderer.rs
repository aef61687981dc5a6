use glam::Vec4;

use crate::{animation, mesh::Mesh, shader::Shader, texture::Texture};

/// Everything that is drawn each frame.
///
/// Fields drop in declaration order, so GL objects are released while the context is still alive
/// as long as the Renderer is dropped before the window.
pub struct Renderer {
    clear_color: Vec4,
    shader: Shader,
    mesh: Mesh,
    /// Kept alive for the run, never bound while drawing
    _texture: Option<Texture>,
}

impl Renderer {
    pub fn new(shader: Shader, mesh: Mesh, texture: Option<Texture>) -> Self {
        Self {
            clear_color: Vec4::new(0.2, 0.3, 0.3, 1.0),
            shader,
            mesh,
            _texture: texture,
        }
    }

    /// Draws one frame, `time` is in seconds
    pub fn render(&self, time: f32) {
        let c = self.clear_color;
        unsafe {
            gl::ClearColor(c.x, c.y, c.z, c.w);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }

        self.shader.use_program();
        self.shader.set_f32(animation::multiplier(time), "multiplier\0");

        self.mesh.draw();
    }
}
