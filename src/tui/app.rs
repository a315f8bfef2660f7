use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use log::{debug, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::flyer::sections::{self, LogoState};
use crate::flyer::Section;
use crate::models::FlyerData;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{flyer, statusbar};

/// Widest the preview card gets, in terminal columns.
const CARD_WIDTH: u16 = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    pub path: PathBuf,
    pub data: FlyerData,
    pub should_quit: bool,
    pub show_help: bool,
    pub status: Option<Status>,
    modified: Option<SystemTime>,
}

impl App {
    pub fn new(path: PathBuf, data: FlyerData) -> Self {
        let modified = modified_at(&path);
        App {
            path,
            data,
            should_quit: false,
            show_help: false,
            status: None,
            modified,
        }
    }

    /// Sections exactly as the renderer would plan them. A configured logo
    /// is assumed to load.
    pub fn sections(&self) -> Vec<Section> {
        let logo = if self.data.identity.logo().is_some() {
            LogoState::Drawn
        } else {
            LogoState::Absent
        };
        sections::plan(&self.data, logo)
    }

    /// Re-read the flyer file. On failure the last good data stays on screen.
    pub fn reload(&mut self) {
        self.modified = modified_at(&self.path);
        match FlyerData::load(&self.path) {
            Ok(data) => {
                self.data = data;
                self.status = Some(Status::Info(format!("Reloaded {}", self.path.display())));
            }
            Err(e) => {
                warn!("Reload failed: {:#}", e);
                self.status = Some(Status::Error(format!("{:#}", e)));
            }
        }
    }

    pub fn tick(&mut self) {
        let now = modified_at(&self.path);
        if now.is_some() && now != self.modified {
            debug!("{:?} changed on disk", self.path);
            self.reload();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ignore release/repeat events from some terminals
        if key.kind != KeyEventKind::Press {
            return;
        }
        if self.show_help {
            self.show_help = false;
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('t') => {
                self.data.display.theme = self.data.display.theme.next();
                self.status = Some(Status::Info(format!(
                    "Theme: {} (preview only)",
                    self.data.display.theme.as_str()
                )));
            }
            KeyCode::Char('s') => {
                let display = &mut self.data.display;
                display.show_sunrise = !display.show_sunrise;
                self.status = Some(Status::Info(format!(
                    "Sunrise {} (preview only)",
                    if display.show_sunrise { "shown" } else { "hidden" }
                )));
            }
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(10),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Line::from(vec![
            Span::styled("  salat-flyer  ", theme::gold().add_modifier(Modifier::BOLD)),
            Span::styled(self.path.display().to_string(), theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[0]);

        let card_width = chunks[1].width.min(CARD_WIDTH);
        let card = Rect {
            x: chunks[1].x + (chunks[1].width - card_width) / 2,
            width: card_width,
            ..chunks[1]
        };
        flyer::render(frame, card, &self.sections(), self.data.display.theme);

        if let Some(status) = &self.status {
            let line = match status {
                Status::Info(msg) => Line::styled(format!("  {}", msg), theme::green()),
                Status::Error(msg) => Line::styled(format!("  ✗ {}", msg), theme::red()),
            };
            frame.render_widget(Paragraph::new(line), chunks[2]);
        }
        statusbar::render(frame, chunks[3]);

        if self.show_help {
            self.draw_help(frame);
        }
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = Rect {
            x: area.width / 4,
            y: area.height / 4,
            width: area.width / 2,
            height: (area.height / 2).min(12),
        };
        frame.render_widget(Clear, popup_area);

        let keys = [
            ("[r]  ", "Reload the flyer file"),
            ("[t]  ", "Cycle theme"),
            ("[s]  ", "Toggle sunrise row"),
            ("[?]  ", "Toggle help"),
            ("[q]  ", "Quit"),
        ];
        let mut text = vec![
            Line::from(Span::styled(
                "  Keybindings",
                theme::gold().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for (key, label) in keys {
            text.push(Line::from(vec![
                Span::styled(format!("  {}", key), theme::gold()),
                Span::styled(label, theme::dim()),
            ]));
        }
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "  Changes to the file are picked up automatically.",
            theme::dim(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::gold())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Run the preview event loop.
pub fn run(path: PathBuf, data: FlyerData) -> Result<()> {
    let mut app = App::new(path, data);

    let mut terminal = ratatui::init();
    let events = EventHandler::new(500);

    let result: Result<()> = loop {
        if let Err(e) = terminal.draw(|frame| app.draw(frame)) {
            break Err(e.into());
        }
        match events.next() {
            Ok(Event::Key(key)) => {
                app.handle_key(key);
                if app.should_quit {
                    break Ok(());
                }
            }
            Ok(Event::Tick) => app.tick(),
            Err(e) => break Err(e.into()),
        }
    };

    ratatui::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PrayerSlot, SlotTime, Theme};
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app_with_file() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flyer.toml");
        let mut data = FlyerData::default();
        data.schedule
            .set(PrayerSlot::Sunrise, SlotTime::parse("06:35").unwrap());
        data.save(&path).unwrap();
        let app = App::new(path, data);
        (dir, app)
    }

    fn has_sunrise(app: &App) -> bool {
        app.sections().iter().any(|s| {
            matches!(
                s,
                Section::PrayerRow {
                    slot: PrayerSlot::Sunrise,
                    ..
                }
            )
        })
    }

    #[test]
    fn theme_key_cycles() {
        let (_dir, mut app) = app_with_file();
        assert_eq!(app.data.display.theme, Theme::Emerald);
        app.handle_key(press('t'));
        assert_eq!(app.data.display.theme, Theme::Navy);
    }

    #[test]
    fn sunrise_key_toggles_row() {
        let (_dir, mut app) = app_with_file();
        assert!(has_sunrise(&app));
        app.handle_key(press('s'));
        assert!(!has_sunrise(&app));
        app.handle_key(press('s'));
        assert!(has_sunrise(&app));
    }

    #[test]
    fn reload_picks_up_edits_and_survives_bad_files() {
        let (_dir, mut app) = app_with_file();
        let mut edited = app.data.clone();
        edited.identity.name = Some("Central Masjid".into());
        edited.save(&app.path).unwrap();

        app.handle_key(press('r'));
        assert_eq!(app.data.identity.name(), Some("Central Masjid"));
        assert!(matches!(app.status, Some(Status::Info(_))));

        std::fs::write(&app.path, "[schedule]\nfajr = \"25:99\"\n").unwrap();
        app.handle_key(press('r'));
        assert!(matches!(app.status, Some(Status::Error(_))));
        assert_eq!(app.data.identity.name(), Some("Central Masjid"));
    }

    #[test]
    fn help_swallows_next_key() {
        let (_dir, mut app) = app_with_file();
        app.handle_key(press('?'));
        assert!(app.show_help);
        app.handle_key(press('q'));
        assert!(!app.show_help);
        assert!(!app.should_quit);
        app.handle_key(press('q'));
        assert!(app.should_quit);
    }
}
