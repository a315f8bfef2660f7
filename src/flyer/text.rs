use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache, Weight, fontdb,
};
use log::{debug, warn};
use tiny_skia::{Pixmap, PremultipliedColorU8};

use super::RenderError;
use super::theme::Rgba;
use crate::config::FontConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Rgba,
}

impl TextStyle {
    pub const fn regular(size: f32, color: Rgba) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            color,
        }
    }

    pub const fn bold(size: f32, color: Rgba) -> Self {
        Self {
            bold: true,
            ..Self::regular(size, color)
        }
    }

    pub const fn italic(size: f32, color: Rgba) -> Self {
        Self {
            italic: true,
            ..Self::regular(size, color)
        }
    }
}

/// Shapes and rasterizes text straight into a pixmap. Holds only caches, so
/// reusing one across renders does not change what gets drawn.
pub struct TextEngine {
    fonts: FontSystem,
    cache: SwashCache,
    family: Option<String>,
}

impl TextEngine {
    pub fn new(config: &FontConfig) -> Result<Self, RenderError> {
        let mut db = fontdb::Database::new();
        if config.use_system {
            db.load_system_fonts();
        }
        for path in &config.files {
            db.load_font_file(path).map_err(|source| RenderError::FontFile {
                path: path.clone(),
                source,
            })?;
        }
        if db.is_empty() {
            warn!("No fonts available; flyer text will not be drawn");
        } else {
            debug!("Loaded {} font faces", db.len());
        }
        Ok(Self {
            fonts: FontSystem::new_with_locale_and_db(config.locale.clone(), db),
            cache: SwashCache::new(),
            family: config.family.clone(),
        })
    }

    fn shape(&mut self, text: &str, style: &TextStyle) -> Buffer {
        let family = match &self.family {
            Some(name) => Family::Name(name.as_str()),
            None => Family::SansSerif,
        };
        let mut attrs = Attrs::new().family(family);
        if style.bold {
            attrs = attrs.weight(Weight::BOLD);
        }
        if style.italic {
            attrs = attrs.style(Style::Italic);
        }
        let mut buffer = Buffer::new(&mut self.fonts, Metrics::new(style.size, style.size * 1.25));
        buffer.set_size(&mut self.fonts, None, None);
        buffer.set_text(&mut self.fonts, text, attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.fonts, false);
        buffer
    }

    /// Width of the widest line and the baseline offset from the buffer top.
    fn measure(buffer: &Buffer) -> (f32, f32) {
        let width = buffer.layout_runs().map(|run| run.line_w).fold(0.0, f32::max);
        let ascent = buffer.layout_runs().next().map(|run| run.line_y).unwrap_or(0.0);
        (width, ascent)
    }

    /// Draw `text` with its baseline at `baseline`; `x` is the left edge,
    /// centre or right edge depending on `align`.
    pub fn draw(
        &mut self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        baseline: f32,
        align: Align,
        style: &TextStyle,
    ) {
        if text.trim().is_empty() {
            return;
        }
        let buffer = self.shape(text, style);
        let (width, ascent) = Self::measure(&buffer);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let origin_x = left.round() as i32;
        let origin_y = (baseline - ascent).round() as i32;
        buffer.draw(
            &mut self.fonts,
            &mut self.cache,
            style.color.to_text(),
            |gx, gy, w, h, color| {
                blend_rect(pixmap, origin_x + gx, origin_y + gy, w, h, color);
            },
        );
    }

    /// Render `text` onto its own transparent pixmap, for drawing under a
    /// transform. Returns the pixmap and the baseline within it.
    pub fn draw_detached(&mut self, text: &str, style: &TextStyle) -> Option<(Pixmap, f32)> {
        let buffer = self.shape(text, style);
        let (width, ascent) = Self::measure(&buffer);
        let line_height = buffer.metrics().line_height;
        let mut pixmap = Pixmap::new(width.ceil() as u32 + 2, line_height.ceil() as u32 + 2)?;
        buffer.draw(
            &mut self.fonts,
            &mut self.cache,
            style.color.to_text(),
            |gx, gy, w, h, color| {
                blend_rect(&mut pixmap, gx + 1, gy + 1, w, h, color);
            },
        );
        Some((pixmap, ascent + 1.0))
    }
}

/// Source-over blend of a solid colour onto a premultiplied pixmap.
fn blend_rect(pixmap: &mut Pixmap, x: i32, y: i32, w: u32, h: u32, color: cosmic_text::Color) {
    if color.a() == 0 {
        return;
    }
    let (pw, ph) = (pixmap.width() as i32, pixmap.height() as i32);
    let pixels = pixmap.pixels_mut();
    for py in y.max(0)..(y + h as i32).min(ph) {
        for px in x.max(0)..(x + w as i32).min(pw) {
            let idx = (py * pw + px) as usize;
            pixels[idx] = over(pixels[idx], color);
        }
    }
}

fn over(dst: PremultipliedColorU8, src: cosmic_text::Color) -> PremultipliedColorU8 {
    let a = src.a() as u32;
    let inv = 255 - a;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
    let alpha = (a + (dst.alpha() as u32 * inv + 127) / 255) as u8;
    PremultipliedColorU8::from_rgba(
        mix(src.r(), dst.red()),
        mix(src.g(), dst.green()),
        mix(src.b(), dst.blue()),
        alpha,
    )
    .unwrap_or(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        let dst = PremultipliedColorU8::from_rgba(10, 20, 30, 255).unwrap();
        let out = over(dst, cosmic_text::Color::rgba(200, 100, 50, 255));
        assert_eq!((out.red(), out.green(), out.blue(), out.alpha()), (200, 100, 50, 255));
    }

    #[test]
    fn transparent_source_is_a_no_op() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(1, 2, 3, 255));
        let before = pixmap.data().to_vec();
        blend_rect(&mut pixmap, 0, 0, 4, 4, cosmic_text::Color::rgba(255, 255, 255, 0));
        assert_eq!(pixmap.data(), &before[..]);
    }

    #[test]
    fn blending_clips_to_the_pixmap() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        blend_rect(&mut pixmap, -5, -5, 100, 100, cosmic_text::Color::rgba(255, 0, 0, 255));
        assert!(pixmap.pixels().iter().all(|p| p.red() == 255 && p.alpha() == 255));
    }

    #[test]
    fn half_alpha_over_transparent_stays_premultiplied() {
        let dst = PremultipliedColorU8::TRANSPARENT;
        let out = over(dst, cosmic_text::Color::rgba(255, 255, 255, 128));
        assert_eq!(out.alpha(), 128);
        assert!(out.red() <= out.alpha());
    }
}
