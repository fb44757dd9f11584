use crate::error::AppError;
use base64::Engine;
use std::io::Cursor;
use std::path::Path;

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

// Files larger than this are decoded and re-encoded as a bounded JPEG
// before being inlined; a multi-megabyte data URI stalls the webview.
const INLINE_PREVIEW_LIMIT: usize = 2 * 1024 * 1024;
const PREVIEW_MAX_DIM: u32 = 1024;

/// MIME type declared by the file's extension, or None when the
/// extension is not a known image type.
pub fn declared_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension().and_then(|ext| ext.to_str())?;
    let ext = ext.to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// Encode raw file bytes as a base64 data URI. The MIME type is
/// sniffed from the content where possible; the declared type is only
/// a fallback (extensions lie, magic bytes rarely do).
pub fn encode_data_uri(bytes: &[u8], declared_mime: &str) -> String {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(declared_mime);
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, b64)
}

/// Build the inline preview for a selected file. Small files are
/// inlined as-is; large ones are downscaled first, falling back to the
/// raw bytes if they cannot be decoded (e.g. SVG).
pub fn preview_data_uri(bytes: &[u8], declared_mime: &str) -> String {
    if bytes.len() > INLINE_PREVIEW_LIMIT {
        match downscale_to_jpeg(bytes) {
            Ok(jpeg) => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&jpeg);
                return format!("data:image/jpeg;base64,{}", b64);
            }
            Err(e) => {
                eprintln!("Failed to downscale preview, inlining raw bytes: {}", e);
            }
        }
    }
    encode_data_uri(bytes, declared_mime)
}

/// Decode, cap to the preview bounding box, re-encode as JPEG.
fn downscale_to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width() > PREVIEW_MAX_DIM || img.height() > PREVIEW_MAX_DIM {
        img = img.thumbnail(PREVIEW_MAX_DIM, PREVIEW_MAX_DIM);
    }

    // JPEG cannot carry an alpha channel
    let img = image::DynamicImage::ImageRgb8(img.into_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Jpeg)?;
    Ok(buffer.into_inner())
}
