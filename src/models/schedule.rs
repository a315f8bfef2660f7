use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::ModelError;

/// One named daily prayer slot. `all()` is the canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrayerSlot {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerSlot {
    pub fn all() -> [PrayerSlot; 6] {
        [
            PrayerSlot::Fajr,
            PrayerSlot::Sunrise,
            PrayerSlot::Dhuhr,
            PrayerSlot::Asr,
            PrayerSlot::Maghrib,
            PrayerSlot::Isha,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PrayerSlot::Fajr => "Fajr",
            PrayerSlot::Sunrise => "Sunrise",
            PrayerSlot::Dhuhr => "Dhuhr",
            PrayerSlot::Asr => "Asr",
            PrayerSlot::Maghrib => "Maghrib",
            PrayerSlot::Isha => "Isha",
        }
    }

    pub fn arabic_name(&self) -> &'static str {
        match self {
            PrayerSlot::Fajr => "الفجر",
            PrayerSlot::Sunrise => "الشروق",
            PrayerSlot::Dhuhr => "الظهر",
            PrayerSlot::Asr => "العصر",
            PrayerSlot::Maghrib => "المغرب",
            PrayerSlot::Isha => "العشاء",
        }
    }
}

impl std::fmt::Display for PrayerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A populated 24-hour "HH:MM" time, kept exactly as entered (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotTime(String);

impl SlotTime {
    /// Empty or whitespace-only input means the slot is not shown.
    pub fn parse(raw: &str) -> Result<Option<SlotTime>, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        NaiveTime::parse_from_str(trimmed, "%H:%M")
            .map_err(|_| ModelError::InvalidTime(trimmed.to_string()))?;
        Ok(Some(SlotTime(trimmed.to_string())))
    }

    pub fn from_time(t: NaiveTime) -> SlotTime {
        SlotTime(crate::utils::format::format_time(t))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SlotTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn optional_time<'de, D>(deserializer: D) -> Result<Option<SlotTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => SlotTime::parse(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// The day's times. No ordering between slots is enforced; whatever was
/// entered is displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrayerSchedule {
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub fajr: Option<SlotTime>,
    #[serde(
        default,
        alias = "shuruq",
        deserialize_with = "optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub sunrise: Option<SlotTime>,
    #[serde(
        default,
        alias = "zuhr",
        deserialize_with = "optional_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub dhuhr: Option<SlotTime>,
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub asr: Option<SlotTime>,
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub maghrib: Option<SlotTime>,
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub isha: Option<SlotTime>,
    /// Friday congregational prayer, first and optional second session.
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub jumuah: Option<SlotTime>,
    #[serde(default, deserialize_with = "optional_time", skip_serializing_if = "Option::is_none")]
    pub jumuah2: Option<SlotTime>,
}

impl PrayerSchedule {
    pub fn time(&self, slot: PrayerSlot) -> Option<&SlotTime> {
        match slot {
            PrayerSlot::Fajr => self.fajr.as_ref(),
            PrayerSlot::Sunrise => self.sunrise.as_ref(),
            PrayerSlot::Dhuhr => self.dhuhr.as_ref(),
            PrayerSlot::Asr => self.asr.as_ref(),
            PrayerSlot::Maghrib => self.maghrib.as_ref(),
            PrayerSlot::Isha => self.isha.as_ref(),
        }
    }

    pub fn set(&mut self, slot: PrayerSlot, time: Option<SlotTime>) {
        let field = match slot {
            PrayerSlot::Fajr => &mut self.fajr,
            PrayerSlot::Sunrise => &mut self.sunrise,
            PrayerSlot::Dhuhr => &mut self.dhuhr,
            PrayerSlot::Asr => &mut self.asr,
            PrayerSlot::Maghrib => &mut self.maghrib,
            PrayerSlot::Isha => &mut self.isha,
        };
        *field = time;
    }

    /// Jumu'ah sessions that have a time, first session first.
    pub fn jumuah_times(&self) -> Vec<&SlotTime> {
        [self.jumuah.as_ref(), self.jumuah2.as_ref()]
            .into_iter()
            .flatten()
            .collect()
    }
}
