use crate::error::AppError;
use image::ImageFormat;
use std::path::Path;
use std::sync::Arc;

/// Which slot a background load is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoTarget {
    Source,
    Result,
}

/// Decoded photo, still carrying the original encoded bytes so it can be
/// re-sent or saved without re-encoding.
#[derive(Debug, Clone)]
pub struct DecodedPhoto {
    pub name: String,
    pub encoded: Arc<Vec<u8>>,
    pub mime: &'static str,
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub enum PhotoLoadResult {
    Success {
        target: PhotoTarget,
        photo: DecodedPhoto,
    },
    Error {
        target: PhotoTarget,
        error: String,
    },
}

/// Load photo bytes from a local file
pub async fn load_from_file(path: &Path) -> Result<Vec<u8>, AppError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| AppError::new("photo-read").with_arg("path", path.display()).push_std(e))
}

/// MIME type of a supported photo, sniffed from its header bytes.
pub fn sniff_mime(data: &[u8]) -> Result<&'static str, AppError> {
    let format = image::guess_format(data)?;
    match format {
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::WebP | ImageFormat::Gif => {
            Ok(format.to_mime_type())
        }
        other => Err(AppError::new("unsupported-photo-format").with_arg("format", format!("{other:?}"))),
    }
}

/// Decode encoded photo bytes to RGBA8
pub fn decode(name: impl Into<String>, data: Vec<u8>) -> Result<DecodedPhoto, AppError> {
    let name = name.into();
    let mime = sniff_mime(&data).map_err(|e| AppError::new("photo-decode").with_arg("name", &name).push_app(e))?;
    let img = image::load_from_memory(&data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedPhoto {
        name,
        encoded: Arc::new(data),
        mime,
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// Read and decode a photo from disk
pub async fn load_photo(path: &Path) -> Result<DecodedPhoto, AppError> {
    let data = load_from_file(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    decode(name, data)
}

/// File extension for a MIME type we can produce or accept.
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn tiny_png() -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(3, 2, |x, y| Rgba([x as u8 * 80, y as u8 * 120, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let photo = decode("tiny.png", tiny_png()).unwrap();
        assert_eq!(photo.mime, "image/png");
        assert_eq!((photo.width, photo.height), (3, 2));
        assert_eq!(photo.rgba.len(), 3 * 2 * 4);
        assert_eq!(&photo.rgba[4..8], &[80, 0, 30, 255]);
    }

    #[test]
    fn rejects_garbage() {
        let err = decode("notes.txt", b"hello there".to_vec()).unwrap_err();
        assert_eq!(err.key, "photo-decode");
    }

    #[test]
    fn sniffs_jpeg_header() {
        let jpeg_magic = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(sniff_mime(&jpeg_magic).unwrap(), "image/jpeg");
    }

    #[test]
    fn extensions() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("application/octet-stream"), "png");
    }
}
