use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::imageops::FilterType;
use std::path::PathBuf;
use thiserror::Error;
use tiny_skia::{ColorU8, Pixmap};

#[derive(Debug, Error)]
pub enum LogoError {
    #[error("malformed data URI")]
    MalformedDataUri,
    #[error("only base64 data URIs are supported")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unsupported logo location '{0}' (use a file path or data: URI)")]
    UnsupportedScheme(String),
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    Empty,
    #[error("logo loader stopped: {0}")]
    Task(String),
}

/// Where the logo bytes come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoSource {
    Inline(Vec<u8>),
    File(PathBuf),
}

impl LogoSource {
    pub fn parse(uri: &str) -> Result<LogoSource, LogoError> {
        let uri = uri.trim();
        if let Some(rest) = uri.strip_prefix("data:") {
            let (header, payload) = rest.split_once(',').ok_or(LogoError::MalformedDataUri)?;
            if !header.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
                return Err(LogoError::NotBase64);
            }
            return Ok(LogoSource::Inline(STANDARD.decode(payload.trim())?));
        }
        if let Some(path) = uri.strip_prefix("file://") {
            return Ok(LogoSource::File(PathBuf::from(path)));
        }
        if let Some((scheme, _)) = uri.split_once("://") {
            return Err(LogoError::UnsupportedScheme(format!("{}://", scheme)));
        }
        Ok(LogoSource::File(PathBuf::from(uri)))
    }

    fn bytes(self) -> Result<Vec<u8>, LogoError> {
        match self {
            LogoSource::Inline(bytes) => Ok(bytes),
            LogoSource::File(path) => {
                std::fs::read(&path).map_err(|source| LogoError::Io { path, source })
            }
        }
    }
}

/// Fetch and decode the logo into a `size`×`size` square. Reading and
/// decoding run together on the blocking pool; this is the only await in a
/// render.
pub async fn load(uri: &str, size: u32) -> Result<Pixmap, LogoError> {
    let source = LogoSource::parse(uri)?;
    tokio::task::spawn_blocking(move || decode(&source.bytes()?, size))
        .await
        .map_err(|e| LogoError::Task(e.to_string()))?
}

/// Centre-crop to a square, resample, premultiply.
pub fn decode(bytes: &[u8], size: u32) -> Result<Pixmap, LogoError> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    let side = img.width().min(img.height());
    if side == 0 {
        return Err(LogoError::Empty);
    }
    let left = (img.width() - side) / 2;
    let top = (img.height() - side) / 2;
    let square = image::imageops::crop_imm(&img, left, top, side, side).to_image();
    let resized = image::imageops::resize(&square, size, size, FilterType::Lanczos3);

    let mut pixmap = Pixmap::new(size, size).ok_or(LogoError::Empty)?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(resized.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
