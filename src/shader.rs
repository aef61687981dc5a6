use eyre::{eyre, Context, Result};
use gl::types::{GLenum, GLint};
use std::{ffi::CString, fmt, fs, path::Path, ptr};

pub const TRIANGLE_VS: &str = include_str!("../shaders/triangle.vert");
pub const TRIANGLE_FS: &str = include_str!("../shaders/triangle.frag");

const INFO_LOG_LEN: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "VERTEX"),
            ShaderStage::Fragment => write!(f, "FRAGMENT"),
        }
    }
}

/// Represents a linked OpenGL shader program.
/// Allows setting uniforms with set_<> methods
pub struct Shader {
    pub id: u32,
}

impl Shader {
    pub fn from_file(vs_path: &Path, fs_path: &Path) -> Result<Shader> {
        let vs_src = read_source(vs_path, ShaderStage::Vertex)?;
        let fs_src = read_source(fs_path, ShaderStage::Fragment)?;

        Self::from_c_sources(&vs_src, &fs_src)
    }

    pub fn from_source(vs_src: &str, fs_src: &str) -> Result<Shader> {
        let vs_src = to_c_source(vs_src.as_bytes().to_vec(), ShaderStage::Vertex)?;
        let fs_src = to_c_source(fs_src.as_bytes().to_vec(), ShaderStage::Fragment)?;

        Self::from_c_sources(&vs_src, &fs_src)
    }

    fn from_c_sources(vs_src: &CString, fs_src: &CString) -> Result<Shader> {
        let vs = Self::compile_shader(vs_src, ShaderStage::Vertex)?;
        let fs = match Self::compile_shader(fs_src, ShaderStage::Fragment) {
            Ok(fs) => fs,
            Err(e) => {
                unsafe { gl::DeleteShader(vs) };
                return Err(e);
            }
        };

        let shader_program = Self::link_shaders(vs, fs)?;
        tracing::debug!("Linked shader program with id: {shader_program}");

        Ok(Shader { id: shader_program })
    }

    pub fn use_program(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }

    /// `name` has to be a null-terminated ASCII string
    pub fn set_f32(&self, v: f32, name: &str) {
        assert!(name.is_ascii());
        assert!(name.ends_with('\0'));
        unsafe {
            let loc = gl::GetUniformLocation(self.id, name.as_ptr() as _);
            gl::Uniform1f(loc, v);
        }
    }

    fn compile_shader(src: &CString, stage: ShaderStage) -> Result<u32> {
        unsafe {
            let shader = gl::CreateShader(stage.gl_type());
            gl::ShaderSource(shader, 1, &src.as_ptr(), ptr::null());
            gl::CompileShader(shader);

            let mut res = 0;
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut res);

            if res == 0 {
                let mut info_log = [0u8; INFO_LOG_LEN];
                let mut info_len: GLint = 0;
                gl::GetShaderInfoLog(
                    shader,
                    INFO_LOG_LEN as i32,
                    &mut info_len,
                    info_log.as_mut_ptr() as _,
                );
                gl::DeleteShader(shader);

                let info_msg = info_log_to_string(&info_log, info_len);
                return Err(eyre!("{stage} shader compilation failed: '{info_msg}'"));
            }

            Ok(shader)
        }
    }

    fn link_shaders(vs: u32, fs: u32) -> Result<u32> {
        unsafe {
            let shader_program = gl::CreateProgram();
            gl::AttachShader(shader_program, vs);
            gl::AttachShader(shader_program, fs);
            gl::LinkProgram(shader_program);

            // Flagged for deletion, freed once the program releases them
            gl::DeleteShader(vs);
            gl::DeleteShader(fs);

            let mut res = 0;
            gl::GetProgramiv(shader_program, gl::LINK_STATUS, &mut res);

            if res == 0 {
                let mut info_log = [0u8; INFO_LOG_LEN];
                let mut info_len: GLint = 0;
                gl::GetProgramInfoLog(
                    shader_program,
                    INFO_LOG_LEN as i32,
                    &mut info_len,
                    info_log.as_mut_ptr() as _,
                );
                gl::DeleteProgram(shader_program);

                let info_msg = info_log_to_string(&info_log, info_len);
                return Err(eyre!("Shader program linking failed: '{info_msg}'"));
            }

            Ok(shader_program)
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        tracing::debug!("Deleting shader program with id: {}", self.id);
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

fn read_source(path: &Path, stage: ShaderStage) -> Result<CString> {
    tracing::info!("Loading {stage} shader from '{}'", path.display());

    let src = fs::read(path)
        .wrap_err_with(|| format!("Couldn't load the {stage} shader file '{}'", path.display()))?;

    to_c_source(src, stage)
}

fn to_c_source(src: Vec<u8>, stage: ShaderStage) -> Result<CString> {
    CString::new(src).wrap_err_with(|| format!("{stage} shader source contains a NUL byte"))
}

/// Drivers report the log length inconsistently, some include the terminator
fn info_log_to_string(buf: &[u8], len: GLint) -> String {
    let len = (len.max(0) as usize).min(buf.len());
    let end = buf[..len].iter().position(|&b| b == 0).unwrap_or(len);

    String::from_utf8_lossy(&buf[..end]).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_log_is_cut_at_reported_length() {
        let mut buf = [0u8; 32];
        buf[..14].copy_from_slice(b"0:1: error \n\0X");

        assert_eq!(info_log_to_string(&buf, 14), "0:1: error");
        assert_eq!(info_log_to_string(&buf, 4), "0:1:");
    }

    #[test]
    fn info_log_tolerates_bogus_lengths() {
        let buf = *b"bad\0\0\0";

        assert_eq!(info_log_to_string(&buf, -1), "");
        assert_eq!(info_log_to_string(&buf, 1000), "bad");
    }

    #[test]
    fn stage_names_appear_in_messages() {
        assert_eq!(ShaderStage::Vertex.to_string(), "VERTEX");
        assert_eq!(ShaderStage::Fragment.to_string(), "FRAGMENT");
        assert_eq!(ShaderStage::Vertex.gl_type(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_type(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn missing_file_names_the_stage() {
        let path = std::env::temp_dir().join("glitter-does-not-exist.frag");
        let err = read_source(&path, ShaderStage::Fragment).unwrap_err();

        assert!(err.to_string().contains("FRAGMENT"));
    }

    #[test]
    fn file_source_is_read_whole() {
        let path = std::env::temp_dir().join(format!("glitter-{}.vert", std::process::id()));
        fs::write(&path, TRIANGLE_VS).unwrap();

        let src = read_source(&path, ShaderStage::Vertex).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(src.to_str().unwrap(), TRIANGLE_VS);
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = to_c_source(b"void main() {}\0junk".to_vec(), ShaderStage::Vertex).unwrap_err();
        assert!(err.to_string().contains("VERTEX"));
    }

    #[test]
    fn builtin_sources_match_the_vertex_layout() {
        assert!(TRIANGLE_VS.starts_with("#version 410 core"));
        assert!(TRIANGLE_VS.contains("layout (location = 0) in vec3 position"));
        assert!(TRIANGLE_VS.contains("layout (location = 1) in vec3 color"));
        assert!(TRIANGLE_FS.contains("uniform float multiplier"));
    }
}
