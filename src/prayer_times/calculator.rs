use anyhow::{anyhow, Result};
use chrono::{FixedOffset, NaiveDate};
use salah::prelude::*;

use crate::config::SalahConfig;
use crate::models::{PrayerSlot, SlotTime};

/// Computes a starting schedule for a new flyer. The result is ordinary
/// editable data; the renderer never calculates anything.
pub struct PrayerCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl PrayerCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_config(config: &SalahConfig) -> Result<Self> {
        Self::new(
            config.latitude,
            config.longitude,
            &config.calc_method,
            &config.madhab,
            config.timezone_offset,
        )
    }

    /// The six daily slots for `date`, in local "HH:MM". Jumu'ah is left
    /// for the masjid to fill in.
    pub fn schedule_for_date(&self, date: NaiveDate) -> Result<crate::models::PrayerSchedule> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> Option<SlotTime> {
            Some(SlotTime::from_time(utc.with_timezone(&offset).time()))
        };

        let mut schedule = crate::models::PrayerSchedule::default();
        for slot in PrayerSlot::all() {
            let prayer = match slot {
                PrayerSlot::Fajr => Prayer::Fajr,
                PrayerSlot::Sunrise => Prayer::Sunrise,
                PrayerSlot::Dhuhr => Prayer::Dhuhr,
                PrayerSlot::Asr => Prayer::Asr,
                PrayerSlot::Maghrib => Prayer::Maghrib,
                PrayerSlot::Isha => Prayer::Isha,
            };
            schedule.set(slot, to_local(times.time(prayer)));
        }
        Ok(schedule)
    }
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!(
            "Unknown calculation method: '{}'. Use one of: {}",
            s,
            CALC_METHODS.join(", ")
        )),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unknown_method() {
        let err = PrayerCalculator::new(0.0, 0.0, "Lunar", "Hanafi", 0).err().unwrap();
        assert!(err.to_string().contains("MuslimWorldLeague"));
    }

    #[test]
    fn fills_all_six_slots() {
        let calc = PrayerCalculator::from_config(&SalahConfig::default()).unwrap();
        let schedule = calc
            .schedule_for_date(NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
            .unwrap();
        for slot in PrayerSlot::all() {
            assert!(schedule.time(slot).is_some(), "{} missing", slot);
        }
        assert!(schedule.jumuah.is_none());
        let fajr = schedule.time(PrayerSlot::Fajr).unwrap().as_str().to_string();
        let isha = schedule.time(PrayerSlot::Isha).unwrap().as_str().to_string();
        assert!(fajr < isha);
    }
}
