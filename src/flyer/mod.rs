//! The flyer rendering engine: data model in, PNG bytes out.
//!
//! `sections` decides what appears, `layout` decides where, `paint` and
//! `text` draw it, `renderer` ties the pipeline together.

pub mod layout;
pub mod logo;
pub mod paint;
pub mod renderer;
pub mod sections;
pub mod text;
pub mod theme;

use std::path::PathBuf;
use thiserror::Error;

pub use layout::{Canvas, Layout};
pub use renderer::Renderer;
pub use sections::{LogoState, Section};

/// Failures that abort a render. Nothing is written when one of these is
/// returned.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("could not allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("loading font {path:?}: {source}")]
    FontFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
