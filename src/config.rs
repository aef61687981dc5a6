use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::level_filters::LevelFilter;

/// Command-line options
#[derive(Parser, Debug)]
#[command(name = "glitter", about = "Draws an animated triangle with OpenGL")]
pub struct Config {
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    #[arg(long, default_value = "OpenGL")]
    pub title: String,

    /// Vertex shader source file, the built-in shader is used when omitted
    #[arg(long, requires = "fragment_shader")]
    pub vertex_shader: Option<PathBuf>,

    /// Fragment shader source file, the built-in shader is used when omitted
    #[arg(long, requires = "vertex_shader")]
    pub fragment_shader: Option<PathBuf>,

    /// Image to upload as a texture. It is loaded but not drawn with.
    #[arg(long)]
    pub texture: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Config {
    /// Both shader paths, if they were given
    pub fn shader_files(&self) -> Option<(&PathBuf, &PathBuf)> {
        match (&self.vertex_shader, &self.fragment_shader) {
            (Some(vs), Some(fs)) => Some((vs, fs)),
            _ => None,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.tracing_level_filter()
    }
}
