//! Which parts of the flyer appear, and in what order.
//!
//! Both the PNG renderer and the terminal preview build their output from
//! [`plan`], so a field that is hidden in one is hidden in the other.

use serde::Serialize;

use crate::models::{FlyerData, PrayerSlot};
use crate::utils::format::{format_last_updated, format_long_date, split_two_lines};

pub const TITLE_ARABIC: &str = "أوقات الصلاة";
pub const TITLE_ENGLISH: &str = "PRAYER TIMES";
pub const JUMUAH_LABEL: &str = "Jumu'ah";
pub const JUMUAH_ARABIC: &str = "الجمعة";

/// Cursor advance of a schedule row before any closing up.
pub const ROW_PITCH: f32 = 90.0;

const ARABIC_LINE_CHARS: usize = 32;
const TRANSLATION_LINE_CHARS: usize = 44;

/// Whether a logo will actually be drawn. A logo that failed to load is
/// `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoState {
    Drawn,
    Absent,
}

/// Where a section sits vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Placed at the running cursor, which then advances by `advance()`.
    Flow,
    /// Fixed offset from the footer line, independent of the content above.
    Footer(f32),
    /// Vertical centre of the canvas.
    Middle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Logo,
    LogoSpacer,
    Title,
    Location { text: String },
    Address { text: String },
    /// Gregorian date on the left and Hijri on the right when both are set;
    /// a lone date is centred.
    Date {
        gregorian: Option<String>,
        hijri: Option<String>,
    },
    HeaderGap,
    PrayerRow { slot: PrayerSlot, time: String },
    Jumuah { times: Vec<String> },
    Scripture {
        arabic: Vec<String>,
        translation: Vec<String>,
        citation: Option<String>,
    },
    Announcement { text: String },
    FooterPanel,
    Watermark { text: String },
    Attribution { text: String },
    LastUpdated { text: String },
}

impl Section {
    pub fn anchor(&self) -> Anchor {
        match self {
            Section::FooterPanel => Anchor::Footer(-10.0),
            Section::Attribution { .. } => Anchor::Footer(25.0),
            Section::LastUpdated { .. } => Anchor::Footer(60.0),
            Section::Watermark { .. } => Anchor::Middle,
            _ => Anchor::Flow,
        }
    }

    pub fn is_row(&self) -> bool {
        matches!(self, Section::PrayerRow { .. } | Section::Jumuah { .. })
    }

    /// How far the cursor moves past a flowed section. The logo/no-logo
    /// difference is intentional.
    pub fn advance(&self) -> f32 {
        match self {
            Section::Logo => 140.0,
            Section::LogoSpacer => 20.0,
            Section::Title => 130.0,
            Section::Location { .. } => 45.0,
            Section::Address { .. } => 32.0,
            Section::Date { .. } => 45.0,
            Section::HeaderGap => 35.0,
            Section::PrayerRow { .. } | Section::Jumuah { .. } => ROW_PITCH,
            Section::Scripture { .. } => 200.0,
            Section::Announcement { .. } => 50.0,
            Section::FooterPanel
            | Section::Watermark { .. }
            | Section::Attribution { .. }
            | Section::LastUpdated { .. } => 0.0,
        }
    }

    /// One-line plain description, used by `sections` and logs.
    pub fn describe(&self) -> String {
        match self {
            Section::Logo => "logo".to_string(),
            Section::LogoSpacer => "(no logo)".to_string(),
            Section::Title => format!("{} / {}", TITLE_ARABIC, TITLE_ENGLISH),
            Section::Location { text } => text.clone(),
            Section::Address { text } => text.clone(),
            Section::Date { gregorian, hijri } => [gregorian.as_deref(), hijri.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("  |  "),
            Section::HeaderGap => "".to_string(),
            Section::PrayerRow { slot, time } => {
                format!("{}  {}  {}", slot.display_name(), time, slot.arabic_name())
            }
            Section::Jumuah { times } => {
                format!("{}  {}  {}", JUMUAH_LABEL, times.join(" • "), JUMUAH_ARABIC)
            }
            Section::Scripture {
                arabic,
                translation,
                citation,
            } => {
                let mut parts = vec![arabic.join(" "), translation.join(" ")];
                parts.extend(citation.clone());
                parts.retain(|p| !p.is_empty());
                parts.join(" | ")
            }
            Section::Announcement { text } => text.clone(),
            Section::FooterPanel => "footer".to_string(),
            Section::Watermark { text } => format!("watermark: {}", text),
            Section::Attribution { text } => text.clone(),
            Section::LastUpdated { text } => text.clone(),
        }
    }
}

/// A slot in the fixed flyer template. `order()` is the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Logo,
    LogoSpacer,
    Title,
    Location,
    Address,
    Date,
    HeaderGap,
    Prayer(PrayerSlot),
    Jumuah,
    Scripture,
    Announcement,
    FooterPanel,
    Watermark,
    Attribution,
    LastUpdated,
}

impl Slot {
    fn order() -> Vec<Slot> {
        let mut order = vec![
            Slot::Logo,
            Slot::LogoSpacer,
            Slot::Title,
            Slot::Location,
            Slot::Address,
            Slot::Date,
            Slot::HeaderGap,
        ];
        order.extend(PrayerSlot::all().into_iter().map(Slot::Prayer));
        order.extend([
            Slot::Jumuah,
            Slot::Scripture,
            Slot::Announcement,
            Slot::FooterPanel,
            Slot::Watermark,
            Slot::Attribution,
            Slot::LastUpdated,
        ]);
        order
    }

    fn visible(&self, data: &FlyerData, logo: LogoState) -> bool {
        let id = &data.identity;
        let display = &data.display;
        match self {
            Slot::Logo => logo == LogoState::Drawn,
            Slot::LogoSpacer => logo == LogoState::Absent,
            Slot::Title | Slot::HeaderGap | Slot::FooterPanel => true,
            Slot::Location => id.name().is_some(),
            Slot::Address => id.address().is_some(),
            Slot::Date => id.date().is_some() || id.hijri_date().is_some(),
            Slot::Prayer(PrayerSlot::Sunrise) if !display.show_sunrise => false,
            Slot::Prayer(slot) => data.schedule.time(*slot).is_some(),
            Slot::Jumuah => !data.schedule.jumuah_times().is_empty(),
            Slot::Scripture => display.has_scripture(),
            Slot::Announcement => display.announcement().is_some(),
            Slot::Watermark => display.show_watermark && id.name().is_some(),
            Slot::Attribution => id.attribution_line().is_some(),
            Slot::LastUpdated => id.last_updated().is_some(),
        }
    }

    /// Only called for visible slots.
    fn build(&self, data: &FlyerData) -> Section {
        let id = &data.identity;
        let display = &data.display;
        let text = |v: Option<&str>| v.unwrap_or_default().to_string();
        match self {
            Slot::Logo => Section::Logo,
            Slot::LogoSpacer => Section::LogoSpacer,
            Slot::Title => Section::Title,
            Slot::Location => Section::Location {
                text: text(id.name()).to_uppercase(),
            },
            Slot::Address => Section::Address {
                text: text(id.address()),
            },
            Slot::Date => Section::Date {
                gregorian: id.date().map(format_long_date),
                hijri: id.hijri_date().map(str::to_string),
            },
            Slot::HeaderGap => Section::HeaderGap,
            Slot::Prayer(slot) => Section::PrayerRow {
                slot: *slot,
                time: data
                    .schedule
                    .time(*slot)
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
            },
            Slot::Jumuah => Section::Jumuah {
                times: data
                    .schedule
                    .jumuah_times()
                    .into_iter()
                    .map(|t| t.as_str().to_string())
                    .collect(),
            },
            Slot::Scripture => Section::Scripture {
                arabic: display
                    .ayah_arabic()
                    .map(|t| split_two_lines(t, ARABIC_LINE_CHARS))
                    .unwrap_or_default(),
                translation: display
                    .ayah_translation()
                    .map(|t| split_two_lines(&format!("\"{}\"", t), TRANSLATION_LINE_CHARS))
                    .unwrap_or_default(),
                citation: display.ayah_citation().map(str::to_string),
            },
            Slot::Announcement => Section::Announcement {
                text: text(display.announcement()),
            },
            Slot::FooterPanel => Section::FooterPanel,
            Slot::Watermark => Section::Watermark {
                text: text(id.name()).to_uppercase(),
            },
            Slot::Attribution => Section::Attribution {
                text: id.attribution_line().unwrap_or_default(),
            },
            Slot::LastUpdated => Section::LastUpdated {
                text: format!("Last Updated: {}", format_last_updated(&text(id.last_updated()))),
            },
        }
    }
}

/// The visible sections of `data`, in paint order.
pub fn plan(data: &FlyerData, logo: LogoState) -> Vec<Section> {
    Slot::order()
        .into_iter()
        .filter(|slot| slot.visible(data, logo))
        .map(|slot| slot.build(data))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlotTime;

    fn kinds(sections: &[Section]) -> Vec<String> {
        sections
            .iter()
            .map(|s| match s {
                Section::PrayerRow { slot, .. } => {
                    format!("row:{}", serde_json::to_value(slot).unwrap().as_str().unwrap())
                }
                other => serde_json::to_value(other).unwrap()["kind"]
                    .as_str()
                    .unwrap()
                    .to_string(),
            })
            .collect()
    }

    fn full() -> FlyerData {
        let mut data = FlyerData::default();
        for (slot, t) in PrayerSlot::all().into_iter().zip([
            "05:10", "06:35", "12:30", "15:45", "18:20", "19:40",
        ]) {
            data.schedule.set(slot, SlotTime::parse(t).unwrap());
        }
        data.schedule.jumuah = SlotTime::parse("13:15").unwrap();
        data.identity.name = Some("Central Masjid".into());
        data.identity.address = Some("12 Broad Street, Lagos".into());
        data.identity.date = Some("2025-01-10".into());
        data.identity.hijri_date = Some("10 Rajab 1446".into());
        data.identity.poster_name = Some("Aisha".into());
        data.identity.phone = Some("+234 801 234 5678".into());
        data.identity.last_updated = Some("2025-01-09T21:00".into());
        data.display.ayah_arabic = Some("إِنَّ الصَّلَاةَ كَانَتْ عَلَى الْمُؤْمِنِينَ كِتَابًا مَوْقُوتًا".into());
        data.display.ayah_translation = Some("Indeed, prayer has been decreed upon the believers a decree of specified times.".into());
        data.display.ayah_citation = Some("(Surah An-Nisa 4:103)".into());
        data.display.announcement = Some("All are welcome".into());
        data
    }

    #[test]
    fn everything_present() {
        let sections = plan(&full(), LogoState::Drawn);
        assert_eq!(
            kinds(&sections),
            vec![
                "logo", "title", "location", "address", "date", "header_gap",
                "row:fajr", "row:sunrise", "row:dhuhr", "row:asr", "row:maghrib", "row:isha",
                "jumuah", "scripture", "announcement", "footer_panel", "watermark",
                "attribution", "last_updated",
            ]
        );
    }

    fn assert_only_removes(removed: &str, clear: impl Fn(&mut FlyerData)) {
        let baseline = kinds(&plan(&full(), LogoState::Drawn));
        let mut data = full();
        clear(&mut data);
        let expected: Vec<String> = baseline.into_iter().filter(|k| k != removed).collect();
        assert_eq!(kinds(&plan(&data, LogoState::Drawn)), expected, "clearing {}", removed);
    }

    #[test]
    fn each_optional_field_removes_only_its_own_section() {
        assert_only_removes("address", |d| d.identity.address = None);
        assert_only_removes("date", |d| {
            d.identity.date = Some(" ".into());
            d.identity.hijri_date = None;
        });
        assert_only_removes("row:asr", |d| d.schedule.asr = None);
        assert_only_removes("jumuah", |d| d.schedule.jumuah = None);
        assert_only_removes("announcement", |d| d.display.announcement = None);
        assert_only_removes("last_updated", |d| d.identity.last_updated = None);
        assert_only_removes("attribution", |d| d.identity.poster_name = None);
    }

    #[test]
    fn name_drives_location_and_watermark() {
        let mut data = full();
        data.identity.name = None;
        let k = kinds(&plan(&data, LogoState::Drawn));
        assert!(!k.contains(&"location".to_string()));
        assert!(!k.contains(&"watermark".to_string()));

        let mut data = full();
        data.display.show_watermark = false;
        let k = kinds(&plan(&data, LogoState::Drawn));
        assert!(k.contains(&"location".to_string()));
        assert!(!k.contains(&"watermark".to_string()));
    }

    #[test]
    fn scripture_is_one_unit() {
        let mut data = full();
        data.display.ayah_arabic = None;
        let sections = plan(&data, LogoState::Absent);
        let scripture = sections
            .iter()
            .find(|s| matches!(s, Section::Scripture { .. }))
            .unwrap();
        match scripture {
            Section::Scripture { arabic, translation, .. } => {
                assert!(arabic.is_empty());
                assert_eq!(translation.len(), 2);
                assert!(translation[0].starts_with('"'));
            }
            _ => unreachable!(),
        }

        data.display.ayah_translation = Some("".into());
        assert!(!kinds(&plan(&data, LogoState::Absent)).contains(&"scripture".to_string()));
    }

    #[test]
    fn sunrise_toggle_hides_row() {
        let mut data = full();
        data.display.show_sunrise = false;
        let k = kinds(&plan(&data, LogoState::Absent));
        assert!(!k.contains(&"row:sunrise".to_string()));
        assert_eq!(k.iter().filter(|k| k.starts_with("row:")).count(), 5);
    }

    #[test]
    fn logo_state_swaps_logo_for_spacer() {
        let k = kinds(&plan(&full(), LogoState::Absent));
        assert_eq!(k[0], "logo_spacer");
        assert!(!k.contains(&"logo".to_string()));
    }

    #[test]
    fn text_is_prepared_for_display() {
        let sections = plan(&full(), LogoState::Absent);
        assert!(sections.contains(&Section::Location {
            text: "CENTRAL MASJID".into()
        }));
        assert!(sections.contains(&Section::Date {
            gregorian: Some("Friday, 10 January 2025".into()),
            hijri: Some("10 Rajab 1446".into()),
        }));
        assert!(sections.contains(&Section::LastUpdated {
            text: "Last Updated: 9 January 2025, 21:00".into()
        }));
        assert!(sections.contains(&Section::Attribution {
            text: "Uploaded by: Aisha • +234 801 234 5678".into()
        }));
    }

    #[test]
    fn either_calendar_keeps_the_date_line() {
        let mut data = full();
        data.identity.date = None;
        let sections = plan(&data, LogoState::Absent);
        assert!(sections.contains(&Section::Date {
            gregorian: None,
            hijri: Some("10 Rajab 1446".into()),
        }));

        data.identity.hijri_date = Some("".into());
        assert!(!kinds(&plan(&data, LogoState::Absent)).contains(&"date".to_string()));
    }
}
