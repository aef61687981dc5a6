use std::{
    ffi::{c_void, CStr},
    ptr,
};

use gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};

/// RAII wrappers around vertex arrays and vertex buffers.
pub mod buffer;

/// Logs the driver's version string and vertex attribute limit.
pub fn log_context_info() {
    unsafe {
        let version = gl::GetString(gl::VERSION);
        if !version.is_null() {
            let version = CStr::from_ptr(version as *const _);
            tracing::info!("OpenGL {}", version.to_string_lossy());
        }

        let mut max_attribs: GLint = 0;
        gl::GetIntegerv(gl::MAX_VERTEX_ATTRIBS, &mut max_attribs);
        tracing::info!("Maximum nr of vertex attributes supported: {max_attribs}");
    }
}

/// Routes driver debug messages into the log.
///
/// Debug output is core since 4.3, a 4.1 context usually doesn't have it.
pub fn init_debug() {
    if !gl::DebugMessageCallback::is_loaded() {
        tracing::debug!("GL debug output isn't available on this context");
        return;
    }

    unsafe {
        gl::Enable(gl::DEBUG_OUTPUT);
        gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
        gl::DebugMessageCallback(Some(gl_debug_callback), ptr::null());
        gl::DebugMessageControl(
            gl::DONT_CARE,
            gl::DONT_CARE,
            gl::DONT_CARE,
            0,
            ptr::null(),
            gl::TRUE,
        );
    };
}

pub fn set_viewport(width: u32, height: u32) {
    unsafe {
        gl::Viewport(0, 0, width as i32, height as i32);
    }
}

/// Buffer creation on NVidia cards
const IGNORED_MESSAGE_ID: GLuint = 131185;

extern "system" fn gl_debug_callback(
    _src: GLenum,
    _typ: GLenum,
    id: GLuint,
    severity: GLenum,
    _len: GLsizei,
    msg: *const GLchar,
    _user_param: *mut c_void,
) {
    if id == IGNORED_MESSAGE_ID || msg.is_null() {
        return;
    }

    let msg = unsafe { CStr::from_ptr(msg) };
    let msg = msg.to_string_lossy();

    match severity {
        gl::DEBUG_SEVERITY_NOTIFICATION => tracing::trace!("OpenGL debug message: '{msg}'"),
        gl::DEBUG_SEVERITY_LOW => tracing::debug!("OpenGL debug message: '{msg}'"),
        gl::DEBUG_SEVERITY_MEDIUM => tracing::warn!("OpenGL debug message: '{msg}'"),
        gl::DEBUG_SEVERITY_HIGH => tracing::error!("OpenGL debug message: '{msg}'"),
        _ => tracing::warn!("OpenGL debug message with unknown severity {severity}: '{msg}'"),
    }
}
