//! Fixed-width resizing with format detection.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Output of a resize.
#[derive(Debug, Clone)]
pub struct Resized {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// Encoding used for `bytes`
    pub format: ImageFormat,
    /// Source dimensions
    pub from: (u32, u32),
    /// Stored dimensions
    pub to: (u32, u32),
}

/// Scales images to a fixed width, keeping the aspect ratio.
#[derive(Debug, Clone, Copy)]
pub struct Resizer {
    target_width: u32,
    max_height: u32,
}

impl Resizer {
    pub fn new(target_width: u32, max_height: u32) -> Self {
        Self {
            target_width,
            max_height,
        }
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    /// Decode `bytes`, scale to the target width with Lanczos3 and re-encode.
    ///
    /// The encoding follows the detected input format when it is JPEG or
    /// PNG, otherwise `fallback` (the format implied by the filename).
    /// Images already at the target width are returned untouched. Images
    /// whose scaled height would exceed the height bound are rejected.
    pub fn resize(&self, bytes: Vec<u8>, fallback: ImageFormat) -> Result<Resized, String> {
        let reader = image::ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| format!("Cannot detect image format: {e}"))?;
        let detected = reader.format();
        let image = reader.decode().map_err(|e| e.to_string())?;

        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(format!("Image has no pixels ({width}x{height})"));
        }
        let target = (self.target_width, target_height(width, height, self.target_width));
        if target.1 > self.max_height {
            return Err(format!(
                "Scaled size {}x{} exceeds the height limit of {} ({width}x{height} source)",
                target.0, target.1, self.max_height
            ));
        }

        let format = match detected {
            Some(f @ (ImageFormat::Jpeg | ImageFormat::Png)) => f,
            _ => fallback,
        };

        if width == self.target_width && detected == Some(format) {
            return Ok(Resized {
                bytes,
                format,
                from: (width, height),
                to: (width, height),
            });
        }

        let resized = image.resize_exact(target.0, target.1, FilterType::Lanczos3);
        let encoded = encode(resized, format)?;

        Ok(Resized {
            bytes: encoded,
            format,
            from: (width, height),
            to: target,
        })
    }
}

/// `round(height * target_width / width)`, at least one pixel.
pub fn target_height(width: u32, height: u32, target_width: u32) -> u32 {
    let scaled = (f64::from(height) * f64::from(target_width) / f64::from(width)).round();
    (scaled as u32).max(1)
}

fn encode(image: DynamicImage, format: ImageFormat) -> Result<Vec<u8>, String> {
    // JPEG has no alpha channel.
    let image = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    };
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, format)
        .map_err(|e| format!("Cannot encode {format:?}: {e}"))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encoded_image;

    fn dimensions(bytes: &[u8]) -> (u32, u32) {
        image::load_from_memory(bytes).unwrap().dimensions()
    }

    #[test]
    fn test_target_height_rounds() {
        assert_eq!(target_height(4000, 3000, 1920), 1440);
        assert_eq!(target_height(1000, 667, 1920), 1281); // 1280.64
        assert_eq!(target_height(3, 1, 1920), 640);
        assert_eq!(target_height(7, 3, 10), 4); // 4.2857
        assert_eq!(target_height(10_000, 1, 10), 1);
    }

    #[test]
    fn test_resize_png_keeps_aspect_ratio() {
        let resizer = Resizer::new(100, 1000);
        let bytes = encoded_image(400, 300, ImageFormat::Png);

        let resized = resizer.resize(bytes, ImageFormat::Png).unwrap();
        assert_eq!(resized.format, ImageFormat::Png);
        assert_eq!(resized.from, (400, 300));
        assert_eq!(resized.to, (100, 75));
        assert_eq!(dimensions(&resized.bytes), (100, 75));
    }

    #[test]
    fn test_resize_upscales_small_jpeg() {
        let resizer = Resizer::new(64, 1000);
        let bytes = encoded_image(32, 20, ImageFormat::Jpeg);

        let resized = resizer.resize(bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(resized.format, ImageFormat::Jpeg);
        assert_eq!(dimensions(&resized.bytes), (64, 40));
        assert_eq!(&resized.bytes[..3], &[0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_detected_format_wins_over_fallback() {
        // PNG bytes behind a .jpg name stay PNG
        let resizer = Resizer::new(50, 1000);
        let bytes = encoded_image(100, 100, ImageFormat::Png);

        let resized = resizer.resize(bytes, ImageFormat::Jpeg).unwrap();
        assert_eq!(resized.format, ImageFormat::Png);
    }

    #[test]
    fn test_already_at_target_width_is_untouched() {
        let resizer = Resizer::new(80, 1000);
        let bytes = encoded_image(80, 60, ImageFormat::Png);

        let resized = resizer.resize(bytes.clone(), ImageFormat::Png).unwrap();
        assert_eq!(resized.bytes, bytes);
        assert_eq!(resized.to, (80, 60));
    }

    #[test]
    fn test_extreme_aspect_ratio_is_rejected() {
        // 1x400 at width 64 would be 64x25600
        let resizer = Resizer::new(64, 1000);
        let bytes = encoded_image(1, 400, ImageFormat::Png);

        let err = resizer.resize(bytes, ImageFormat::Png).unwrap_err();
        assert!(err.contains("height limit"));
    }

    #[test]
    fn test_height_at_limit_is_accepted() {
        let resizer = Resizer::new(10, 20);
        let bytes = encoded_image(5, 10, ImageFormat::Png);

        let resized = resizer.resize(bytes, ImageFormat::Png).unwrap();
        assert_eq!(resized.to, (10, 20));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let resizer = Resizer::new(80, 1000);
        assert!(resizer
            .resize(b"definitely not an image".to_vec(), ImageFormat::Jpeg)
            .is_err());
    }
}
