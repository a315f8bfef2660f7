use anyhow::{Context, Result, anyhow, bail};
use chrono::{Local, NaiveDate};
use log::info;
use std::path::{Path, PathBuf};
use unicode_width::UnicodeWidthStr;

use crate::config::AppConfig;
use crate::flyer::{Canvas, Layout, LogoState, Renderer, Section, sections};
use crate::models::{FlyerData, SlotTime, Theme};
use crate::prayer_times::PrayerCalculator;
use crate::utils::format::flyer_filename;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

// ─── Init ────────────────────────────────────────────────────────────────────

pub fn handle_init(
    config: &AppConfig,
    output: &Path,
    calculate: bool,
    date: Option<&str>,
    force: bool,
) -> Result<()> {
    if output.exists() && !force {
        bail!("{:?} already exists. Use --force to overwrite.", output);
    }
    let date = match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", d))?,
        None => Local::now().date_naive(),
    };

    let mut data = starter_flyer(config, date)?;
    if calculate {
        let calc = PrayerCalculator::from_config(&config.salah)?;
        let computed = calc.schedule_for_date(date)?;
        data.schedule = crate::models::PrayerSchedule {
            jumuah: data.schedule.jumuah.take(),
            ..computed
        };
    }
    data.save(output)?;

    println_colored!(GREEN, "  ✓ Wrote {}", output.display());
    if calculate {
        println_colored!(
            DIM,
            "  Times calculated for {} ({}). Check them against your masjid before sharing.",
            config.salah.location_name,
            config.salah.calc_method
        );
    }
    println_colored!(DIM, "  Next: salat-flyer preview {}", output.display());
    Ok(())
}

/// A new flyer with the stock verse and announcement filled in.
fn starter_flyer(config: &AppConfig, date: NaiveDate) -> Result<FlyerData> {
    let mut data = FlyerData::default();
    data.identity.name = Some(config.salah.location_name.clone());
    data.identity.date = Some(date.format("%Y-%m-%d").to_string());
    data.schedule.jumuah = SlotTime::parse("13:30")?;
    data.display.ayah_arabic =
        Some("إِنَّ الصَّلَاةَ كَانَتْ عَلَى الْمُؤْمِنِينَ كِتَابًا مَوْقُوتًا".to_string());
    data.display.ayah_translation = Some(
        "Indeed, prayer has been decreed upon the believers a decree of specified times."
            .to_string(),
    );
    data.display.ayah_citation = Some("(Surah An-Nisa 4:103)".to_string());
    data.display.announcement = Some(
        "Join us for our daily prayers and community events. All are welcome!".to_string(),
    );
    Ok(data)
}

// ─── Render ──────────────────────────────────────────────────────────────────

pub async fn handle_render(
    config: &AppConfig,
    input: &Path,
    output: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
    theme: Option<&str>,
) -> Result<()> {
    let mut data = FlyerData::load(input)?;
    if let Some(theme) = theme {
        data.display.theme = theme.parse::<Theme>()?;
    }
    check_export_policy(config, &data)?;

    let canvas = Canvas::new(
        width.unwrap_or(config.canvas.width),
        height.unwrap_or(config.canvas.height),
    );
    let mut renderer = Renderer::new(&config.fonts, canvas).context("Preparing renderer")?;
    let flyer = renderer.render(&data).await.context("Rendering flyer")?;

    for warning in &flyer.warnings {
        println_colored!(AMBER, "  ! {}", warning);
    }

    let path = output.unwrap_or_else(|| default_output_path(config, &data));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &flyer.png).with_context(|| format!("Writing {:?}", path))?;
    info!("Wrote {} bytes to {:?}", flyer.png.len(), path);

    println_colored!(
        GREEN,
        "  ✓ Saved {} ({}x{}, {} prayer rows)",
        path.display(),
        canvas.width,
        canvas.height,
        flyer.layout.prayer_rows().len()
    );
    Ok(())
}

/// The flyer must say who posted it before it can be shared.
pub fn check_export_policy(config: &AppConfig, data: &FlyerData) -> Result<()> {
    if !config.export.require_attribution {
        return Ok(());
    }
    let id = &data.identity;
    let has_name = id.poster_name().is_some() || id.verifier_name().is_some();
    if !has_name || id.phone().is_none() {
        return Err(anyhow!(
            "A poster name and phone are required to export the flyer. \
             Set identity.poster_name (or verifier_name) and identity.phone, \
             or turn off export.require_attribution in {}",
            AppConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "config.toml".to_string())
        ));
    }
    Ok(())
}

fn default_output_path(config: &AppConfig, data: &FlyerData) -> PathBuf {
    let file = flyer_filename(data.identity.date(), data.identity.name());
    match &config.export.output_dir {
        Some(dir) => dir.join(file),
        None => PathBuf::from(file),
    }
}

// ─── Preview ─────────────────────────────────────────────────────────────────

pub fn handle_preview(input: &Path) -> Result<()> {
    let data = FlyerData::load(input)?;
    crate::tui::app::run(input.to_path_buf(), data)
}

// ─── Sections ────────────────────────────────────────────────────────────────

pub fn handle_sections(config: &AppConfig, input: &Path, json: bool) -> Result<()> {
    let data = FlyerData::load(input)?;
    // Without decoding, assume a configured logo will load.
    let logo = if data.identity.logo().is_some() {
        LogoState::Drawn
    } else {
        LogoState::Absent
    };
    let canvas = Canvas::new(config.canvas.width, config.canvas.height);
    let layout = Layout::compute(sections::plan(&data, logo), canvas);

    if json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Flyer sections: {}", input.display());
    println!();
    for placed in &layout.items {
        let label = section_label(&placed.section);
        let pad = 14usize.saturating_sub(label.width());
        let line = format!("  {:>6.0}  {}{}{}", placed.y, label, " ".repeat(pad), placed.section.describe());
        match placed.section {
            Section::PrayerRow { .. } | Section::Jumuah { .. } => println_colored!(BOLD, "{}", line),
            Section::LogoSpacer | Section::HeaderGap | Section::FooterPanel => {
                println_colored!(DIM, "{}", line)
            }
            _ => println!("{}", line),
        }
    }
    if let Some(over) = layout.overflow() {
        println!();
        println_colored!(AMBER, "  ! Content runs {:.0}px into the footer", over);
    }
    println!();
    Ok(())
}

fn section_label(section: &Section) -> &'static str {
    match section {
        Section::Logo | Section::LogoSpacer => "logo",
        Section::Title => "title",
        Section::Location { .. } => "location",
        Section::Address { .. } => "address",
        Section::Date { .. } => "date",
        Section::HeaderGap => "gap",
        Section::PrayerRow { .. } => "prayer",
        Section::Jumuah { .. } => "jumu'ah",
        Section::Scripture { .. } => "scripture",
        Section::Announcement { .. } => "announcement",
        Section::FooterPanel => "footer",
        Section::Watermark { .. } => "watermark",
        Section::Attribution { .. } => "attribution",
        Section::LastUpdated { .. } => "last updated",
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path()?;
    println!();
    println_colored!(GOLD, "  Config file: {}", path.display());
    if !path.exists() {
        println_colored!(DIM, "  (not created yet, showing defaults)");
    }
    println!();
    for line in config.to_toml_string()?.lines() {
        println!("  {}", line);
    }
    println!();
    Ok(())
}
