//! Encoding rendered canvases to JPEG or PNG bytes.

use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use log::debug;

use crate::canvas::Canvas;
use crate::error::{PuzzleError, Result};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Lossy, quality 1..=100. Alpha is dropped.
    Jpeg { quality: u8 },
    Png,
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg { .. } => "jpg",
            ImageFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg { .. } => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    /// `jpeg`/`jpg` (default quality) or `png`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(ImageFormat::default()),
            "png" => Ok(ImageFormat::Png),
            other => Err(format!("unknown image format {other:?}, expected jpeg or png")),
        }
    }
}

/// Encode `canvas` into an in-memory buffer.
pub fn encode(canvas: &Canvas, format: ImageFormat) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    match format {
        ImageFormat::Jpeg { quality } => {
            let rgb = DynamicImage::ImageRgba8(canvas.to_rgba_image()).to_rgb8();
            let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
            rgb.write_with_encoder(encoder)?;
        }
        ImageFormat::Png => {
            canvas
                .to_rgba_image()
                .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        }
    }
    debug!(
        "encoded {}x{} canvas as {} ({} bytes)",
        canvas.width(),
        canvas.height(),
        format.extension(),
        bytes.len()
    );
    Ok(bytes)
}

/// Decode any supported encoding back to RGBA.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Encode `canvas` and write it to `path`.
pub fn save(canvas: &Canvas, path: &Path, format: ImageFormat) -> Result<()> {
    let bytes = encode(canvas, format)?;
    std::fs::write(path, bytes).map_err(PuzzleError::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba8;

    #[test]
    fn test_png_is_lossless() {
        let mut canvas = Canvas::new(13, 7, Rgba8::WHITE);
        canvas.fill_rect(2, 2, 5, 5, Rgba8::opaque(10, 200, 30));
        let decoded = decode(&encode(&canvas, ImageFormat::Png).unwrap()).unwrap();
        assert_eq!(decoded.dimensions(), (13, 7));
        assert_eq!(decoded.as_raw().as_slice(), canvas.as_bytes());
    }

    #[test]
    fn test_jpeg_keeps_dimensions() {
        let canvas = Canvas::new(64, 48, Rgba8::opaque(0x33, 0x44, 0x88));
        let bytes = encode(&canvas, ImageFormat::default()).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.dimensions(), (64, 48));
        let px = decoded.get_pixel(30, 20).0;
        assert!((px[2] as i32 - 0x88).abs() <= 4, "{px:?}");
    }

    #[test]
    fn test_format_names() {
        assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("jpg".parse::<ImageFormat>().unwrap().extension(), "jpg");
        assert!("gif".parse::<ImageFormat>().is_err());
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        assert!(matches!(decode(b"not an image"), Err(PuzzleError::Encode(_))));
    }

    #[test]
    fn test_save_writes_file() {
        let dir = std::env::temp_dir().join(format!("spot-glyph-encode-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.png");
        save(&Canvas::new(4, 4, Rgba8::BLACK), &path, ImageFormat::Png).unwrap();
        assert_eq!(decode(&std::fs::read(&path).unwrap()).unwrap().dimensions(), (4, 4));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
