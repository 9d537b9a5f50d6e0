//! Image upload processing and watermarking.
//!
//! All functions work on in-memory byte buffers; reading and writing files is
//! the caller's business.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::Serialize;

/// Extensions accepted for image uploads.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Uploads are shrunk to fit inside this box.
pub const MAX_UPLOAD_DIMENSIONS: (u32, u32) = (1920, 1080);

/// JPEG re-encode quality for uploads and watermarked output.
pub const JPEG_QUALITY: u8 = 85;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Unsupported image extension: {0}")]
    UnsupportedExtension(String),

    #[error("Rotation must be 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(i32),

    #[error("Image processing failed: {0}")]
    Codec(#[from] image::ImageError),
}

/// Output encoding chosen from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl OutputFormat {
    /// Map an extension (without dot, any case). Unknown extensions are `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Format for a stored path, defaulting to JPEG.
    pub fn for_path(path: &str) -> Self {
        path.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(Self::Jpeg)
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }
}

/// Lower-cased extension of `filename` if it is an accepted image type.
pub fn allowed_image_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Random storage name keeping the upload's extension (`jpeg` becomes `jpg`).
pub fn generate_image_filename(original: &str) -> String {
    let ext = original
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "jpg".to_string());
    let ext = if ext == "jpeg" { "jpg".to_string() } else { ext };
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{}.{ext}", &id[..12])
}

/// Decode an upload, shrink it to [`MAX_UPLOAD_DIMENSIONS`] and re-encode it
/// in the format implied by `ext`.
pub fn process_upload(bytes: &[u8], ext: &str) -> Result<Vec<u8>, ImageError> {
    let format = OutputFormat::from_extension(ext)
        .ok_or_else(|| ImageError::UnsupportedExtension(ext.to_string()))?;
    let img = image::load_from_memory(bytes)?;
    let (max_w, max_h) = MAX_UPLOAD_DIMENSIONS;
    let img = shrink_to_fit(img, max_w, max_h);
    encode(&img, format)
}

/// Resize down (never up) so the image fits in `max_w` x `max_h`.
pub fn shrink_to_fit(img: DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_w && h <= max_h {
        return img;
    }
    img.resize(max_w, max_h, FilterType::Lanczos3)
}

/// Encode an image; JPEG drops the alpha channel.
pub fn encode(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            DynamicImage::ImageRgb8(img.to_rgb8()).write_with_encoder(encoder)?;
        }
        OutputFormat::Png => img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?,
        OutputFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)?,
        OutputFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Gif)?,
    }
    Ok(buf)
}

/// Prepare a gallery image for display: rotate it clockwise by `rotation`
/// degrees, then overlay `mark` (if any) with [`watermark_image`].
///
/// The mark is applied after rotating so it always reads upright.
pub fn render_gallery_image(
    base: &[u8],
    mark: Option<&[u8]>,
    rotation: i32,
    opacity: f32,
    format: OutputFormat,
) -> Result<Vec<u8>, ImageError> {
    let base = rotate(image::load_from_memory(base)?, rotation)?;
    let out = match mark {
        Some(mark) => watermark_image(&base, &image::load_from_memory(mark)?, opacity),
        None => base,
    };
    encode(&out, format)
}

/// Overlay `mark` centred on `base`.
///
/// The watermark is scaled to at most a third of the base width (never
/// enlarged) and its alpha is multiplied by `opacity` (clamped to `0..=1`).
pub fn watermark_image(base: &DynamicImage, mark: &DynamicImage, opacity: f32) -> DynamicImage {
    let mut canvas = base.to_rgba8();
    let (base_w, base_h) = canvas.dimensions();

    let max_mark_w = (base_w / 3).max(1);
    let mark = if mark.width() > max_mark_w {
        let ratio = max_mark_w as f32 / mark.width() as f32;
        let new_h = ((mark.height() as f32 * ratio).round() as u32).max(1);
        mark.resize_exact(max_mark_w, new_h, FilterType::Lanczos3)
    } else {
        mark.clone()
    };

    let mut mark = mark.to_rgba8();
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity < 1.0 {
        for pixel in mark.pixels_mut() {
            pixel[3] = (pixel[3] as f32 * opacity).round() as u8;
        }
    }

    let x = (base_w.saturating_sub(mark.width()) / 2) as i64;
    let y = (base_h.saturating_sub(mark.height()) / 2) as i64;
    imageops::overlay(&mut canvas, &mark, x, y);
    DynamicImage::ImageRgba8(canvas)
}

/// Rotate clockwise by a multiple of 90 degrees.
pub fn rotate(img: DynamicImage, degrees: i32) -> Result<DynamicImage, ImageError> {
    match degrees.rem_euclid(360) {
        0 => Ok(img),
        90 => Ok(img.rotate90()),
        180 => Ok(img.rotate180()),
        270 => Ok(img.rotate270()),
        _ => Err(ImageError::InvalidRotation(degrees)),
    }
}

/// Dimensions and size of an encoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageInfo {
    pub file_size: u64,
    pub file_size_str: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

/// Inspect an encoded image without fully decoding it.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo, ImageError> {
    let format = image::guess_format(bytes)?;
    let reader = image::ImageReader::with_format(Cursor::new(bytes), format);
    let (width, height) = reader.into_dimensions()?;
    let file_size = bytes.len() as u64;
    Ok(ImageInfo {
        file_size,
        file_size_str: human_size(file_size),
        width,
        height,
        format: format!("{format:?}").to_uppercase(),
    })
}

/// `512 B`, `1.5 KB`, `2.25 MB`.
pub fn human_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    }
}
