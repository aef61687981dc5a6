use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use config::Config;
use mesh::Mesh;
use renderer::Renderer;
use shader::Shader;
use texture::{Texture, TextureImage};
use window::AppWindow;

mod animation;
mod config;
mod mesh;
mod ogl;
mod renderer;
mod shader;
mod texture;
mod window;

fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(config.log_level().into())
                .from_env_lossy(),
        )
        .init();

    let mut window = AppWindow::new(&config.title, (config.width, config.height))?;

    ogl::log_context_info();
    ogl::init_debug();

    let (fb_width, fb_height) = window.framebuffer_size();
    ogl::set_viewport(fb_width, fb_height);

    let renderer = setup_renderer(&config)?;

    loop {
        if window.poll_events() {
            break;
        }

        renderer.render(window.elapsed());

        window.swap();
    }

    // GL objects have to go before the context does
    drop(renderer);
    drop(window);

    Ok(())
}

fn setup_renderer(config: &Config) -> Result<Renderer> {
    let shader = match config.shader_files() {
        Some((vs_path, fs_path)) => Shader::from_file(vs_path, fs_path)?,
        None => Shader::from_source(shader::TRIANGLE_VS, shader::TRIANGLE_FS)?,
    };

    let mesh = Mesh::new(&mesh::triangle());

    let texture = config.texture.as_deref().and_then(|path| {
        let start = std::time::Instant::now();

        match TextureImage::open(path) {
            Ok(image) => {
                let texture = Texture::new(&image);
                tracing::info!("Loading '{}' took '{:?}'", path.display(), start.elapsed());
                Some(texture)
            }
            Err(e) => {
                tracing::warn!("{e:#}");
                None
            }
        }
    });

    Ok(Renderer::new(shader, mesh, texture))
}
