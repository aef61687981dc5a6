use std::time::Instant;

use eyre::{eyre, Result};
use sdl2::{
    event::Event,
    keyboard::Keycode,
    video::Window,
    video::{GLContext, GLProfile, SwapInterval},
    EventPump, Sdl, VideoSubsystem,
};

pub struct AppWindow {
    _sdl_context: Sdl,
    _video_subsystem: VideoSubsystem,
    window: Window,
    _gl_ctx: GLContext,
    event_pump: EventPump,
    start_time: Instant,
}

impl AppWindow {
    /// Opens a fixed-size window with a 4.1 core context and loads the GL functions
    pub fn new(title: &str, dim: (u32, u32)) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(|e| eyre!("{e}"))?;
        let video_subsystem = sdl_context.video().map_err(|e| eyre!("{e}"))?;

        // Context attributes have to be set before the window is created
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_major_version(4);
        gl_attr.set_context_minor_version(1);
        gl_attr.set_context_profile(GLProfile::Core);
        gl_attr.set_context_flags().forward_compatible().set();
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(title, dim.0, dim.1)
            .opengl()
            .position_centered()
            .allow_highdpi()
            .build()
            .map_err(|e| eyre!("Failed to create OpenGL context: {e}"))?;

        let gl_ctx = window
            .gl_create_context()
            .map_err(|e| eyre!("Failed to create OpenGL context: {e}"))?;
        window.gl_make_current(&gl_ctx).map_err(|e| eyre!("{e}"))?;

        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as _);

        if let Err(e) = video_subsystem.gl_set_swap_interval(SwapInterval::VSync) {
            tracing::warn!("VSync unavailable: {e}");
        }

        let event_pump = sdl_context.event_pump().map_err(|e| eyre!("{e}"))?;

        Ok(Self {
            _sdl_context: sdl_context,
            _video_subsystem: video_subsystem,
            window,
            _gl_ctx: gl_ctx,
            event_pump,
            start_time: Instant::now(),
        })
    }

    /// Drains pending events and returns if the render loop should terminate
    pub fn poll_events(&mut self) -> bool {
        let mut should_quit = false;

        for event in self.event_pump.poll_iter() {
            if is_quit_event(&event) {
                should_quit = true;
            }
        }

        should_quit
    }

    pub fn swap(&self) {
        self.window.gl_swap_window();
    }

    /// Size of the drawable area in pixels, may differ from the window size on HiDPI screens
    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }

    /// Seconds since the window was created
    pub fn elapsed(&self) -> f32 {
        self.start_time.elapsed().as_secs_f32()
    }
}

fn is_quit_event(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit { .. }
            | Event::KeyDown {
                keycode: Some(Keycode::Escape),
                ..
            }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::Mod;

    fn key_down(keycode: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 0,
            keycode: Some(keycode),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn escape_and_close_quit() {
        assert!(is_quit_event(&Event::Quit { timestamp: 0 }));
        assert!(is_quit_event(&key_down(Keycode::Escape)));
    }

    #[test]
    fn other_keys_keep_running() {
        assert!(!is_quit_event(&key_down(Keycode::Space)));
        assert!(!is_quit_event(&Event::KeyUp {
            timestamp: 0,
            window_id: 0,
            keycode: Some(Keycode::Escape),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        }));
    }
}
