use log::{debug, warn};
use thiserror::Error;
use tiny_skia::Pixmap;

use super::layout::{Canvas, Layout};
use super::logo;
use super::paint::{LOGO_SIZE, Painter};
use super::sections::{self, LogoState};
use super::text::TextEngine;
use super::RenderError;
use crate::config::FontConfig;
use crate::models::FlyerData;

/// Something that went wrong but didn't stop the flyer from being made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderWarning {
    #[error("logo left out: {0}")]
    LogoUnavailable(String),
    #[error("content runs {0}px into the footer; shorten the text or drop a section")]
    Overflow(f32),
}

#[derive(Debug)]
pub struct RenderedFlyer {
    pub png: Vec<u8>,
    pub layout: Layout,
    pub warnings: Vec<RenderWarning>,
}

pub struct Renderer {
    text: TextEngine,
    canvas: Canvas,
}

impl Renderer {
    pub fn new(fonts: &FontConfig, canvas: Canvas) -> Result<Self, RenderError> {
        Ok(Self {
            text: TextEngine::new(fonts)?,
            canvas,
        })
    }

    /// Render one flyer. Same data and canvas, same bytes.
    pub async fn render(&mut self, data: &FlyerData) -> Result<RenderedFlyer, RenderError> {
        let mut warnings = Vec::new();

        let logo = match data.identity.logo() {
            Some(uri) => match logo::load(uri, LOGO_SIZE).await {
                Ok(pixmap) => Some(pixmap),
                Err(e) => {
                    warn!("Skipping logo: {}", e);
                    warnings.push(RenderWarning::LogoUnavailable(e.to_string()));
                    None
                }
            },
            None => None,
        };
        let logo_state = if logo.is_some() {
            LogoState::Drawn
        } else {
            LogoState::Absent
        };

        let layout = Layout::compute(sections::plan(data, logo_state), self.canvas);
        debug!("Laid out {} sections", layout.items.len());
        if let Some(over) = layout.overflow() {
            warn!("Flowed content ends {}px inside the footer", over);
            warnings.push(RenderWarning::Overflow(over));
        }

        let Canvas { width, height } = self.canvas;
        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        {
            let mut painter = Painter::new(&mut pixmap, &mut self.text, self.canvas);
            painter.background(data.display.theme);
            for placed in &layout.items {
                painter.section(placed, logo.as_ref());
            }
        }

        let png = pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        if png.is_empty() {
            return Err(RenderError::Encode("encoder produced no bytes".into()));
        }

        Ok(RenderedFlyer {
            png,
            layout,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::Section;
    use crate::flyer::logo::tests::png_data_uri;
    use crate::models::{PrayerSlot, SlotTime, Theme};
    use sha2::{Digest, Sha256};

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn renderer() -> Renderer {
        Renderer::new(&FontConfig::default(), Canvas::default()).unwrap()
    }

    fn central_masjid() -> FlyerData {
        let mut data = FlyerData::default();
        for (slot, t) in [
            (PrayerSlot::Fajr, "05:10"),
            (PrayerSlot::Sunrise, ""),
            (PrayerSlot::Dhuhr, "12:30"),
            (PrayerSlot::Asr, "15:45"),
            (PrayerSlot::Maghrib, "18:20"),
            (PrayerSlot::Isha, "19:40"),
        ] {
            data.schedule.set(slot, SlotTime::parse(t).unwrap());
        }
        data.identity.name = Some("Central Masjid".into());
        data.identity.date = Some("2025-01-10".into());
        data
    }

    fn digest(bytes: &[u8]) -> String {
        hex::encode(Sha256::digest(bytes))
    }

    fn png_size(png: &[u8]) -> (u32, u32) {
        let w = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let h = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        (w, h)
    }

    #[tokio::test]
    async fn central_masjid_scenario() {
        let flyer = renderer().render(&central_masjid()).await.unwrap();
        assert!(flyer.png.starts_with(PNG_SIGNATURE));
        assert_eq!(png_size(&flyer.png), (1080, 1350));
        assert!(flyer.warnings.is_empty());

        let layout = &flyer.layout;
        assert_eq!(
            layout.prayer_rows(),
            vec![
                PrayerSlot::Fajr,
                PrayerSlot::Dhuhr,
                PrayerSlot::Asr,
                PrayerSlot::Maghrib,
                PrayerSlot::Isha
            ]
        );
        assert!(layout.sections().any(|s| *s
            == Section::Location {
                text: "CENTRAL MASJID".into()
            }));
        assert!(layout.sections().any(|s| *s
            == Section::Date {
                gregorian: Some("Friday, 10 January 2025".into()),
                hijri: None,
            }));
        assert!(!layout.sections().any(|s| matches!(s, Section::Scripture { .. })));
    }

    #[tokio::test]
    async fn scripture_panel_keeps_its_height_whatever_the_text() {
        let mut short = central_masjid();
        short.display.ayah_arabic = Some("إِنَّ الصَّلَاةَ".into());
        short.display.ayah_translation = Some("Indeed, prayer".into());
        short.display.announcement = Some("All are welcome".into());
        let mut long = short.clone();
        long.display.ayah_translation = Some(
            "Indeed, prayer has been decreed upon the believers a decree of specified times."
                .into(),
        );
        long.display.ayah_citation = Some("(Surah An-Nisa 4:103)".into());

        let mut r = renderer();
        let mut announcement_ys = Vec::new();
        for data in [&short, &long] {
            let flyer = r.render(data).await.unwrap();
            let layout = &flyer.layout;
            let y_of = |pred: fn(&Section) -> bool| layout.find(pred).map(|p| p.y).unwrap();
            let last_row = layout
                .items
                .iter()
                .filter(|p| matches!(p.section, Section::PrayerRow { .. }))
                .map(|p| p.y)
                .fold(f32::MIN, f32::max);
            let scripture = y_of(|s| matches!(s, Section::Scripture { .. }));
            let announcement = y_of(|s| matches!(s, Section::Announcement { .. }));
            assert!(scripture > last_row);
            assert!(announcement > scripture);
            assert!(layout.flow_end <= y_of(|s| *s == Section::FooterPanel));
            announcement_ys.push(announcement);
        }
        assert_eq!(announcement_ys[0], announcement_ys[1]);
    }

    #[tokio::test]
    async fn rendering_leaves_the_flyer_file_unchanged() {
        let mut data = central_masjid();
        data.identity.name = Some("  Central Masjid ".into());
        data.identity.logo = Some(png_data_uri(30, 30));
        data.display.ayah_translation = Some("Indeed, prayer".into());
        let before = data.to_toml_string().unwrap();

        renderer().render(&data).await.unwrap();
        assert_eq!(data.to_toml_string().unwrap(), before);
        assert_eq!(FlyerData::from_toml_str(&before).unwrap(), data);
    }

    #[tokio::test]
    async fn crowded_flyer_warns_about_footer_overlap() {
        let mut data = FlyerData::from_toml_str(include_str!("../../demos/central-masjid.toml"))
            .unwrap();
        data.identity.logo = Some(png_data_uri(30, 30));
        let flyer = renderer().render(&data).await.unwrap();
        assert!(
            flyer
                .warnings
                .iter()
                .any(|w| matches!(w, RenderWarning::Overflow(_)))
        );

        data.identity.logo = None;
        let flyer = renderer().render(&data).await.unwrap();
        assert!(flyer.warnings.is_empty());
    }

    #[tokio::test]
    async fn identical_input_gives_identical_bytes() {
        let mut data = central_masjid();
        data.identity.logo = Some(png_data_uri(64, 48));
        data.identity.poster_name = Some("Aisha".into());
        data.display.theme = Theme::Burgundy;

        let mut r = renderer();
        let first = r.render(&data).await.unwrap();
        let second = r.render(&data).await.unwrap();
        let fresh = renderer().render(&data).await.unwrap();
        assert_eq!(digest(&first.png), digest(&second.png));
        assert_eq!(digest(&first.png), digest(&fresh.png));
    }

    #[tokio::test]
    async fn themes_change_pixels() {
        let mut r = renderer();
        let mut data = central_masjid();
        let emerald = r.render(&data).await.unwrap();
        data.display.theme = Theme::Gold;
        let gold = r.render(&data).await.unwrap();
        assert_ne!(digest(&emerald.png), digest(&gold.png));
    }

    #[tokio::test]
    async fn corrupt_logo_degrades_to_no_logo() {
        let mut data = central_masjid();
        data.identity.logo = Some("data:image/png;base64,bm90IGEgcG5n".into());
        let broken = renderer().render(&data).await.unwrap();
        assert_eq!(broken.warnings.len(), 1);
        assert!(matches!(broken.warnings[0], RenderWarning::LogoUnavailable(_)));

        data.identity.logo = None;
        let plain = renderer().render(&data).await.unwrap();
        assert_eq!(broken.layout, plain.layout);
        assert!(broken.layout.sections().any(|s| *s == Section::LogoSpacer));
    }

    #[tokio::test]
    async fn unreachable_logo_file_is_not_fatal() {
        let mut data = central_masjid();
        data.identity.logo = Some("/no/such/dir/logo.png".into());
        let flyer = renderer().render(&data).await.unwrap();
        assert!(!flyer.png.is_empty());
        assert_eq!(flyer.warnings.len(), 1);
    }

    #[tokio::test]
    async fn decoded_logo_is_placed() {
        let mut data = central_masjid();
        data.identity.logo = Some(png_data_uri(40, 40));
        let flyer = renderer().render(&data).await.unwrap();
        assert!(flyer.warnings.is_empty());
        assert_eq!(flyer.layout.items[0].section, Section::Logo);
    }

    #[tokio::test]
    async fn zero_sized_canvas_is_fatal() {
        let mut r = Renderer::new(&FontConfig::default(), Canvas::new(0, 1350)).unwrap();
        let err = r.render(&central_masjid()).await.unwrap_err();
        assert!(matches!(err, RenderError::Surface { width: 0, .. }));
    }

    #[test]
    fn missing_font_file_is_reported() {
        let fonts = FontConfig {
            use_system: false,
            files: vec!["/no/such/font.ttf".into()],
            ..FontConfig::default()
        };
        let err = Renderer::new(&fonts, Canvas::default()).err().unwrap();
        assert!(matches!(err, RenderError::FontFile { .. }));
    }
}
