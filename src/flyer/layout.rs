use log::debug;
use serde::Serialize;

use super::sections::{Anchor, ROW_PITCH, Section};
use crate::models::PrayerSlot;

/// Baseline of the first flowed element.
pub const START_Y: f32 = 80.0;
/// Footer line, measured up from the bottom edge.
pub const FOOTER_OFFSET: f32 = 140.0;
/// The footer panel starts this far above the footer line.
const FOOTER_CLEARANCE: f32 = 10.0;
/// Tightest row spacing: a 70px box plus a 10px gap.
const MIN_ROW_PITCH: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn footer_y(&self) -> f32 {
        self.height as f32 - FOOTER_OFFSET
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(1080, 1350)
    }
}

/// A section pinned to its vertical anchor. For text this is the
/// baseline, for flowed blocks it is the cursor value the block started at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placed {
    pub y: f32,
    #[serde(flatten)]
    pub section: Section,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub canvas: Canvas,
    pub items: Vec<Placed>,
    /// Where the cursor stopped after the last flowed section.
    pub flow_end: f32,
}

impl Layout {
    /// Single top-to-bottom pass with a running cursor. Footer items ignore
    /// the cursor entirely. When the flowed content would reach the footer
    /// panel, schedule rows close up towards `MIN_ROW_PITCH`.
    pub fn compute(sections: Vec<Section>, canvas: Canvas) -> Layout {
        let limit = flow_limit(canvas);
        let natural_end: f32 = START_Y
            + sections
                .iter()
                .filter(|s| s.anchor() == Anchor::Flow)
                .map(Section::advance)
                .sum::<f32>();
        let rows = sections.iter().filter(|s| s.is_row()).count();
        let row_cut = if natural_end > limit && rows > 0 {
            ((natural_end - limit) / rows as f32)
                .ceil()
                .min(ROW_PITCH - MIN_ROW_PITCH)
        } else {
            0.0
        };

        let mut cursor = START_Y;
        let items = sections
            .into_iter()
            .map(|section| {
                let y = match section.anchor() {
                    Anchor::Flow => {
                        let y = cursor;
                        cursor += section.advance();
                        if section.is_row() {
                            cursor -= row_cut;
                        }
                        y
                    }
                    Anchor::Footer(offset) => canvas.footer_y() + offset,
                    Anchor::Middle => canvas.height as f32 / 2.0,
                };
                Placed { y, section }
            })
            .collect();
        if row_cut > 0.0 {
            debug!("Rows closed up by {}px to clear the footer", row_cut);
        }
        Layout {
            canvas,
            items,
            flow_end: cursor,
        }
    }

    /// Pixels by which flowed content runs into the footer panel, if any.
    pub fn overflow(&self) -> Option<f32> {
        let over = self.flow_end - flow_limit(self.canvas);
        (over > 0.0).then_some(over)
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.items.iter().map(|p| &p.section)
    }

    pub fn prayer_rows(&self) -> Vec<PrayerSlot> {
        self.sections()
            .filter_map(|s| match s {
                Section::PrayerRow { slot, .. } => Some(*slot),
                _ => None,
            })
            .collect()
    }
}

/// Top edge of the footer panel; flowed content must stop above it.
fn flow_limit(canvas: Canvas) -> f32 {
    canvas.footer_y() - FOOTER_CLEARANCE
}
