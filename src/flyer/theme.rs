use crate::models::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }

    pub fn to_text(self) -> cosmic_text::Color {
        cosmic_text::Color::rgba(self.r, self.g, self.b, self.a)
    }
}

pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const ACCENT: Rgba = Rgba::rgb(251, 191, 36); // #fbbf24
pub const ACCENT_SOFT: Rgba = Rgba::rgb(252, 211, 77); // #fcd34d

pub const ROW_FILL: Rgba = WHITE.with_alpha(31);
pub const JUMUAH_FILL: Rgba = ACCENT.with_alpha(46);
pub const SCRIPTURE_FILL: Rgba = ACCENT.with_alpha(26);
pub const FOOTER_FILL: Rgba = ACCENT.with_alpha(38);
pub const ADDRESS_TEXT: Rgba = WHITE.with_alpha(204);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Gradient { top: Rgba, bottom: Rgba },
    Flat(Rgba),
}

impl Background {
    /// The colour a non-raster preview should use for the whole card.
    pub fn base(&self) -> Rgba {
        match self {
            Background::Gradient { top, .. } => *top,
            Background::Flat(c) => *c,
        }
    }
}

pub fn background(theme: Theme) -> Background {
    match theme {
        Theme::Emerald => Background::Gradient {
            top: Rgba::rgb(0x06, 0x5f, 0x46),
            bottom: Rgba::rgb(0x06, 0x4e, 0x3b),
        },
        Theme::Navy => Background::Gradient {
            top: Rgba::rgb(0x0f, 0x17, 0x2a),
            bottom: Rgba::rgb(0x02, 0x06, 0x17),
        },
        Theme::Burgundy => Background::Gradient {
            top: Rgba::rgb(0x88, 0x13, 0x37),
            bottom: Rgba::rgb(0x4c, 0x05, 0x19),
        },
        Theme::Gold => Background::Flat(Rgba::rgb(0xb4, 0x53, 0x09)),
    }
}
