pub mod display;
pub mod flyer;
pub mod identity;
pub mod schedule;

use thiserror::Error;

pub use display::{DisplayConfig, Theme};
pub use flyer::FlyerData;
pub use identity::Identity;
pub use schedule::{PrayerSchedule, PrayerSlot, SlotTime};

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("invalid time '{0}', expected 24-hour HH:MM")]
    InvalidTime(String),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

/// Blank strings count as absent everywhere in the model.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
