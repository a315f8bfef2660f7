use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::flyer::sections::{JUMUAH_ARABIC, JUMUAH_LABEL, TITLE_ARABIC, TITLE_ENGLISH};
use crate::flyer::theme::{self as paint_theme, Rgba};
use crate::flyer::Section;
use crate::models::Theme;

fn color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn accent() -> Style {
    Style::default().fg(color(paint_theme::ACCENT))
}

fn accent_soft() -> Style {
    Style::default().fg(color(paint_theme::ACCENT_SOFT))
}

fn white() -> Style {
    Style::default().fg(Color::White)
}

/// A schedule row: name on the left, time in the middle, Arabic on the right.
fn row(name: &str, time: &str, arabic: &str, width: usize, emphasis: Style) -> Line<'static> {
    let inner = width.saturating_sub(4);
    let third = inner / 3;
    Line::from(vec![
        Span::styled(format!("{:<third$}", name), emphasis.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{:^w$}", time, w = inner.saturating_sub(2 * third)),
            accent_soft().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:>third$}", arabic), accent()),
    ])
}

/// Terminal lines for the planned sections, top to bottom. Footer items come
/// last because they are anchored to the bottom of the flyer.
pub fn lines(sections: &[Section], width: usize) -> Vec<Line<'static>> {
    let mut out = Vec::new();
    let mut footer = Vec::new();
    for section in sections {
        match section {
            Section::Logo => out.push(Line::styled("◉", accent())),
            Section::LogoSpacer => {}
            Section::Title => {
                out.push(Line::styled(TITLE_ARABIC, white().add_modifier(Modifier::BOLD)));
                out.push(Line::styled(TITLE_ENGLISH, white().add_modifier(Modifier::BOLD)));
                out.push(Line::from(""));
            }
            Section::Location { text } => out.push(Line::styled(text.clone(), accent())),
            Section::Address { text } => out.push(Line::styled(
                text.clone(),
                Style::default().fg(Color::Gray),
            )),
            Section::Date { gregorian, hijri } => {
                let parts: Vec<&str> = [gregorian, hijri]
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .collect();
                out.push(Line::styled(parts.join("   ·   "), accent_soft()))
            }
            Section::HeaderGap => out.push(Line::from("")),
            Section::PrayerRow { slot, time } => out.push(row(
                slot.display_name(),
                time,
                slot.arabic_name(),
                width,
                white(),
            )),
            Section::Jumuah { times } => out.push(row(
                JUMUAH_LABEL,
                &times.join(" • "),
                JUMUAH_ARABIC,
                width,
                accent(),
            )),
            Section::Scripture {
                arabic,
                translation,
                citation,
            } => {
                out.push(Line::from(""));
                for line in arabic {
                    out.push(Line::styled(line.clone(), accent_soft()));
                }
                for line in translation {
                    out.push(Line::styled(line.clone(), white()));
                }
                if let Some(citation) = citation {
                    out.push(Line::styled(
                        citation.clone(),
                        accent().add_modifier(Modifier::ITALIC),
                    ));
                }
            }
            Section::Announcement { text } => {
                out.push(Line::from(""));
                out.push(Line::styled(
                    text.clone(),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
                ));
            }
            Section::FooterPanel => footer.push(Line::styled("─".repeat(width / 2), accent())),
            Section::Watermark { text } => footer.push(Line::styled(
                format!("~ {} ~", text),
                Style::default().fg(Color::DarkGray),
            )),
            Section::Attribution { text } => footer.push(Line::styled(text.clone(), white())),
            Section::LastUpdated { text } => {
                footer.push(Line::styled(text.clone(), accent_soft()))
            }
        }
    }
    if !footer.is_empty() {
        out.push(Line::from(""));
        out.extend(footer);
    }
    out
}

pub fn render(frame: &mut Frame, area: Rect, sections: &[Section], theme_choice: Theme) {
    let bg = color(paint_theme::background(theme_choice).base());
    let block = Block::default()
        .title(Span::styled(format!(" {} ", theme_choice.as_str()), accent()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(accent())
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines(sections, area.width as usize))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flyer::sections::{plan, LogoState};
    use crate::models::{FlyerData, PrayerSlot, SlotTime};

    fn text_of(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect()
    }

    #[test]
    fn preview_hides_what_the_renderer_hides() {
        let mut data = FlyerData::default();
        data.schedule
            .set(PrayerSlot::Fajr, SlotTime::parse("05:10").unwrap());
        data.schedule
            .set(PrayerSlot::Sunrise, SlotTime::parse("06:35").unwrap());
        data.display.show_sunrise = false;

        let text = text_of(&lines(&plan(&data, LogoState::Absent), 60)).join("\n");
        assert!(text.contains("Fajr"));
        assert!(text.contains("05:10"));
        assert!(!text.contains("06:35"));
        assert!(!text.contains("Dhuhr"));
    }

    #[test]
    fn footer_lines_come_last() {
        let mut data = FlyerData::default();
        data.identity.name = Some("Central Masjid".into());
        data.identity.poster_name = Some("Aisha".into());
        data.schedule
            .set(PrayerSlot::Isha, SlotTime::parse("19:40").unwrap());

        let text = text_of(&lines(&plan(&data, LogoState::Absent), 60));
        let isha = text.iter().position(|l| l.contains("19:40")).unwrap();
        let attribution = text
            .iter()
            .position(|l| l.contains("Uploaded by: Aisha"))
            .unwrap();
        assert!(attribution > isha);
    }
}
