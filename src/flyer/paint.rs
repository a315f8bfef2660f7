use tiny_skia::{
    BlendMode, FillRule, FilterQuality, GradientStop, LinearGradient, Mask, Paint, PathBuilder,
    Pixmap, PixmapPaint, Point, Rect, SpreadMode, Stroke, Transform,
};

use super::layout::{Canvas, Placed};
use super::sections::{JUMUAH_ARABIC, JUMUAH_LABEL, Section, TITLE_ARABIC, TITLE_ENGLISH};
use super::text::{Align, TextEngine, TextStyle};
use super::theme::{self, Background, Rgba};
use crate::models::Theme;

pub const LOGO_SIZE: u32 = 100;

const ROW_MARGIN: f32 = 70.0;
const ROW_HEIGHT: f32 = 70.0;
/// Distance from the row top down to the text baseline.
const ROW_RISE: f32 = 52.0;
const ROW_PADDING: f32 = 25.0;

const SCRIPTURE_MARGIN: f32 = 60.0;
const SCRIPTURE_HEIGHT: f32 = 170.0;
const FOOTER_MARGIN: f32 = 50.0;
const FOOTER_HEIGHT: f32 = 110.0;

const WATERMARK_ROTATION: f32 = -0.35; // radians
const WATERMARK_OPACITY: f32 = 0.06;

const TITLE_AR: TextStyle = TextStyle::bold(60.0, theme::WHITE);
const TITLE_EN: TextStyle = TextStyle::bold(48.0, theme::WHITE);
const LOCATION: TextStyle = TextStyle::regular(32.0, theme::ACCENT);
const ADDRESS: TextStyle = TextStyle::regular(24.0, theme::ADDRESS_TEXT);
const DATE: TextStyle = TextStyle::regular(28.0, theme::ACCENT_SOFT);
const HIJRI: TextStyle = TextStyle::regular(26.0, theme::ACCENT_SOFT);
const ROW_NAME: TextStyle = TextStyle::bold(32.0, theme::WHITE);
const ROW_ARABIC: TextStyle = TextStyle::bold(36.0, theme::ACCENT);
const ROW_TIME: TextStyle = TextStyle::bold(40.0, theme::ACCENT_SOFT);
const JUMUAH_NAME: TextStyle = TextStyle::bold(32.0, theme::ACCENT);
const JUMUAH_TIME: TextStyle = TextStyle::bold(40.0, theme::WHITE);
const AYAH: TextStyle = TextStyle::bold(28.0, theme::ACCENT_SOFT);
const TRANSLATION: TextStyle = TextStyle::regular(22.0, theme::WHITE);
const CITATION: TextStyle = TextStyle::italic(20.0, theme::ACCENT);
const ANNOUNCEMENT: TextStyle = TextStyle::italic(22.0, theme::ADDRESS_TEXT);
const WATERMARK: TextStyle = TextStyle::bold(80.0, theme::WHITE);
const ATTRIBUTION: TextStyle = TextStyle::regular(26.0, theme::WHITE);
const LAST_UPDATED: TextStyle = TextStyle::regular(24.0, theme::ACCENT_SOFT);

fn solid(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// Draws placed sections onto one pixmap.
pub struct Painter<'a> {
    pixmap: &'a mut Pixmap,
    text: &'a mut TextEngine,
    canvas: Canvas,
}

impl<'a> Painter<'a> {
    pub fn new(pixmap: &'a mut Pixmap, text: &'a mut TextEngine, canvas: Canvas) -> Self {
        Self {
            pixmap,
            text,
            canvas,
        }
    }

    fn width(&self) -> f32 {
        self.canvas.width as f32
    }

    fn center_x(&self) -> f32 {
        self.width() / 2.0
    }

    /// Theme fill plus the double border.
    pub fn background(&mut self, theme_choice: Theme) {
        let (w, h) = (self.width(), self.canvas.height as f32);
        let Some(full) = Rect::from_xywh(0.0, 0.0, w, h) else {
            return;
        };
        let paint = match theme::background(theme_choice) {
            Background::Gradient { top, bottom } => {
                let shader = LinearGradient::new(
                    Point::from_xy(0.0, 0.0),
                    Point::from_xy(0.0, h),
                    vec![
                        GradientStop::new(0.0, top.to_skia()),
                        GradientStop::new(1.0, bottom.to_skia()),
                    ],
                    SpreadMode::Pad,
                    Transform::identity(),
                );
                match shader {
                    Some(shader) => Paint {
                        shader,
                        ..Paint::default()
                    },
                    None => solid(top),
                }
            }
            Background::Flat(color) => solid(color),
        };
        self.pixmap.fill_rect(full, &paint, Transform::identity(), None);

        self.stroke_rect(15.0, 15.0, w - 30.0, h - 30.0, theme::ACCENT, 6.0);
        self.stroke_rect(25.0, 25.0, w - 50.0, h - 50.0, theme::ACCENT_SOFT, 2.0);
    }

    pub fn section(&mut self, placed: &Placed, logo: Option<&Pixmap>) {
        let y = placed.y;
        let cx = self.center_x();
        match &placed.section {
            Section::Logo => {
                if let Some(logo) = logo {
                    self.logo(logo, y);
                }
            }
            Section::LogoSpacer | Section::HeaderGap => {}
            Section::Title => {
                self.text_at(TITLE_ARABIC, cx, y, Align::Center, &TITLE_AR);
                self.text_at(TITLE_ENGLISH, cx, y + 60.0, Align::Center, &TITLE_EN);
            }
            Section::Location { text } => self.text_at(text, cx, y, Align::Center, &LOCATION),
            Section::Address { text } => self.text_at(text, cx, y, Align::Center, &ADDRESS),
            Section::Date { gregorian, hijri } => match (gregorian, hijri) {
                (Some(date), Some(hijri)) => {
                    let inset = ROW_MARGIN + ROW_PADDING;
                    self.text_at(date, inset, y, Align::Left, &DATE);
                    self.text_at(hijri, self.width() - inset, y, Align::Right, &HIJRI);
                }
                (Some(date), None) => self.text_at(date, cx, y, Align::Center, &DATE),
                (None, Some(hijri)) => self.text_at(hijri, cx, y, Align::Center, &HIJRI),
                (None, None) => {}
            },
            Section::PrayerRow { slot, time } => {
                let (left, right) = self.row_box(y, theme::ROW_FILL, 1.0);
                self.text_at(slot.display_name(), left, y, Align::Left, &ROW_NAME);
                self.text_at(slot.arabic_name(), right, y, Align::Right, &ROW_ARABIC);
                self.text_at(time, cx, y, Align::Center, &ROW_TIME);
            }
            Section::Jumuah { times } => {
                let (left, right) = self.row_box(y, theme::JUMUAH_FILL, 3.0);
                self.text_at(JUMUAH_LABEL, left, y, Align::Left, &JUMUAH_NAME);
                self.text_at(JUMUAH_ARABIC, right, y, Align::Right, &JUMUAH_NAME);
                self.text_at(&times.join(" • "), cx, y, Align::Center, &JUMUAH_TIME);
            }
            Section::Scripture {
                arabic,
                translation,
                citation,
            } => {
                let base = y + 30.0;
                self.panel(
                    SCRIPTURE_MARGIN,
                    base - 20.0,
                    SCRIPTURE_HEIGHT,
                    theme::SCRIPTURE_FILL,
                );
                for (line, offset) in arabic.iter().zip([10.0, 45.0]) {
                    self.text_at(line, cx, base + offset, Align::Center, &AYAH);
                }
                for (line, offset) in translation.iter().zip([85.0, 112.0]) {
                    self.text_at(line, cx, base + offset, Align::Center, &TRANSLATION);
                }
                if let Some(citation) = citation {
                    self.text_at(citation, cx, base + 142.0, Align::Center, &CITATION);
                }
            }
            Section::Announcement { text } => {
                self.text_at(text, cx, y + 20.0, Align::Center, &ANNOUNCEMENT)
            }
            Section::FooterPanel => {
                self.panel(FOOTER_MARGIN, y, FOOTER_HEIGHT, theme::FOOTER_FILL);
            }
            Section::Watermark { text } => self.watermark(text, y),
            Section::Attribution { text } => {
                self.text_at(text, cx, y, Align::Center, &ATTRIBUTION)
            }
            Section::LastUpdated { text } => {
                self.text_at(text, cx, y, Align::Center, &LAST_UPDATED)
            }
        }
    }

    fn text_at(&mut self, text: &str, x: f32, baseline: f32, align: Align, style: &TextStyle) {
        self.text.draw(self.pixmap, text, x, baseline, align, style);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba, width: f32) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap
                .fill_rect(rect, &solid(color), Transform::identity(), None);
        }
    }

    /// Full-width bordered box inset by `margin` on both sides.
    fn panel(&mut self, margin: f32, top: f32, height: f32, fill: Rgba) {
        let w = self.width() - 2.0 * margin;
        self.fill_rect(margin, top, w, height, fill);
        self.stroke_rect(margin, top, w, height, theme::ACCENT, 2.0);
    }

    /// Draws a schedule row box for baseline `y`; returns the left and
    /// right text anchors.
    fn row_box(&mut self, y: f32, fill: Rgba, border: f32) -> (f32, f32) {
        let w = self.width() - 2.0 * ROW_MARGIN;
        let top = y - ROW_RISE;
        self.fill_rect(ROW_MARGIN, top, w, ROW_HEIGHT, fill);
        self.stroke_rect(ROW_MARGIN, top, w, ROW_HEIGHT, theme::ACCENT, border);
        (ROW_MARGIN + ROW_PADDING, ROW_MARGIN + w - ROW_PADDING)
    }

    fn logo(&mut self, logo: &Pixmap, top: f32) {
        let size = LOGO_SIZE as f32;
        let left = (self.width() - size) / 2.0;
        let Some(mut mask) = Mask::new(self.pixmap.width(), self.pixmap.height()) else {
            return;
        };
        let Some(circle) = PathBuilder::from_circle(left + size / 2.0, top + size / 2.0, size / 2.0)
        else {
            return;
        };
        mask.fill_path(&circle, FillRule::Winding, true, Transform::identity());
        self.pixmap.draw_pixmap(
            left.round() as i32,
            top.round() as i32,
            logo.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            Some(&mask),
        );
    }

    /// Large, faint, rotated copy of the name about the canvas centre.
    fn watermark(&mut self, text: &str, center_y: f32) {
        let Some((mark, baseline)) = self.text.draw_detached(text, &WATERMARK) else {
            return;
        };
        let cx = self.center_x();
        let paint = PixmapPaint {
            opacity: WATERMARK_OPACITY,
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        self.pixmap.draw_pixmap(
            (cx - mark.width() as f32 / 2.0).round() as i32,
            (center_y - baseline).round() as i32,
            mark.as_ref(),
            &paint,
            Transform::from_rotate_at(WATERMARK_ROTATION.to_degrees(), cx, center_y),
            None,
        );
    }
}
