use std::{fs, path::Path};

use eyre::{Context, Result};
use image::ImageError;

/// Decoded RGBA8 pixels, rows ordered bottom-up like OpenGL expects.
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an image file. The format is picked from the extension, files with
    /// an unknown extension are sniffed by content instead.
    pub fn open(path: &Path) -> Result<Self> {
        let image = match image::open(path) {
            Ok(image) => image,
            Err(ImageError::Unsupported(e)) => {
                tracing::debug!("{e}, guessing the format of '{}'", path.display());
                let bytes = fs::read(path)
                    .wrap_err_with(|| format!("Couldn't load the texture '{}'", path.display()))?;
                return Self::from_memory(&bytes);
            }
            Err(e) => {
                return Err(e)
                    .wrap_err_with(|| format!("Couldn't load the texture '{}'", path.display()));
            }
        };

        Ok(Self::from_dynamic(image))
    }

    /// Decodes an in-memory image, the format is guessed from its header
    pub fn from_memory(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).wrap_err("Couldn't decode the texture")?;

        Ok(Self::from_dynamic(image))
    }

    fn from_dynamic(image: image::DynamicImage) -> Self {
        let image = image.flipv().into_rgba8();

        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }
}

/// An OpenGL 2D texture with generated mipmaps.
pub struct Texture {
    pub id: u32,
}

impl Texture {
    pub fn new(image: &TextureImage) -> Self {
        if !image.width.is_power_of_two() || !image.height.is_power_of_two() {
            tracing::debug!(
                "Texture size {}x{} isn't a power of two",
                image.width,
                image.height
            );
        }

        let id = unsafe {
            let mut texture = 0;

            gl::GenTextures(1, &mut texture);
            gl::BindTexture(gl::TEXTURE_2D, texture);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as i32);
            gl::TexParameteri(
                gl::TEXTURE_2D,
                gl::TEXTURE_MIN_FILTER,
                gl::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGBA8 as i32,
                image.width as i32,
                image.height as i32,
                0,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                image.pixels.as_ptr() as _,
            );
            gl::GenerateMipmap(gl::TEXTURE_2D);

            gl::BindTexture(gl::TEXTURE_2D, 0);

            texture
        };

        tracing::debug!(
            "Created {}x{} texture with id: {id}",
            image.width,
            image.height
        );

        Self { id }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        tracing::debug!("Deleting texture with id: {}", self.id);
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn encode(image: &RgbaImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    /// 2x2 image, red top row and blue bottom row
    fn two_rows() -> RgbaImage {
        RgbaImage::from_fn(2, 2, |_, y| {
            if y == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn decoded_rows_are_flipped() {
        let image = TextureImage::from_memory(&encode(&two_rows(), ImageFormat::Png)).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.pixels.len(), 2 * 2 * 4);
        // The first row in memory is the bottom of the source image
        assert_eq!(&image.pixels[..4], &[0, 0, 255, 255]);
        assert_eq!(&image.pixels[8..12], &[255, 0, 0, 255]);
    }

    #[test]
    fn rgb_sources_gain_an_alpha_channel() {
        let rgb = image::DynamicImage::ImageRgba8(two_rows()).into_rgb8();
        let mut bytes = Cursor::new(Vec::new());
        rgb.write_to(&mut bytes, ImageFormat::Png).unwrap();

        let image = TextureImage::from_memory(bytes.get_ref()).unwrap();
        assert_eq!(image.pixels.len(), 2 * 2 * 4);
        assert!(image.pixels.chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn file_loader_uses_the_extension() {
        let path = std::env::temp_dir().join(format!("glitter-{}.png", std::process::id()));
        std::fs::write(&path, encode(&two_rows(), ImageFormat::Png)).unwrap();

        let image = TextureImage::open(&path);
        std::fs::remove_file(&path).unwrap();

        let image = image.unwrap();
        assert_eq!((image.width, image.height), (2, 2));
    }

    #[test]
    fn unknown_extension_falls_back_to_sniffing() {
        let path = std::env::temp_dir().join(format!("glitter-{}.texture", std::process::id()));
        std::fs::write(&path, encode(&two_rows(), ImageFormat::Png)).unwrap();

        let image = TextureImage::open(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(image.unwrap().pixels.len(), 16);
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(TextureImage::from_memory(b"definitely not an image").is_err());

        let path = std::env::temp_dir().join("glitter-missing-texture.png");
        assert!(TextureImage::open(&path).is_err());
    }
}
