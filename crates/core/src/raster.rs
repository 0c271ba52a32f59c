//! Raster images placed on slide pages.
//!
//! Images are decoded with the `image` crate (PNG, JPEG and GIF are
//! enabled) and flattened to 8-bit RGB, which is what the `colorimage`
//! operator consumes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};

use crate::error::{Result, SlidesError};

/// A decoded image waiting to be rendered on the next page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageImage {
    pixels: RgbImage,
}

impl PageImage {
    /// Open and decode the image at `path`.
    ///
    /// The format is detected from the file contents, not the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SlidesError::ImageOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let decoded = ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .map_err(|source| SlidesError::ImageDecode {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(source),
            })?
            .decode()
            .map_err(|source| SlidesError::ImageDecode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_dynamic(decoded))
    }

    /// Flatten an already decoded image.
    ///
    /// Channels are premultiplied by alpha, so fully transparent pixels
    /// come out black.
    pub fn from_dynamic(decoded: DynamicImage) -> Self {
        let rgba = decoded.to_rgba8();
        let pixels = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let premultiply = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            image::Rgb([premultiply(r), premultiply(g), premultiply(b)])
        });
        Self { pixels }
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB triple at (x, y), with y = 0 the top row.
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn opaque_pixels_keep_their_color() {
        let img = RgbaImage::from_pixel(2, 1, Rgba([10, 200, 30, 255]));
        let page = PageImage::from_dynamic(DynamicImage::ImageRgba8(img));
        assert_eq!(page.width(), 2);
        assert_eq!(page.height(), 1);
        assert_eq!(page.rgb(1, 0), [10, 200, 30]);
    }

    #[test]
    fn transparent_pixels_are_premultiplied() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 0]));
        let page = PageImage::from_dynamic(DynamicImage::ImageRgba8(img));
        assert_eq!(page.rgb(0, 0), [0, 0, 0]);
    }

    #[test]
    fn sixteen_bit_channels_are_downsampled() {
        let img = image::ImageBuffer::<image::Rgb<u16>, Vec<u16>>::from_pixel(
            1,
            1,
            image::Rgb([0xffff, 0x8080, 0]),
        );
        let page = PageImage::from_dynamic(DynamicImage::ImageRgb16(img));
        assert_eq!(page.rgb(0, 0), [0xff, 0x80, 0]);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = PageImage::open("/nonexistent/slide.png").unwrap_err();
        assert!(matches!(err, SlidesError::ImageOpen { .. }));
    }
}
