//! Glyph art standing in for the sprite images.
//!
//! Each glyph is drawn at its sprite's logical position plus `offset`, the
//! distance from the top-left of the full-size sprite image to its visible part.
//! Spaces in the art are transparent.

use crossterm::style::Color;
use key_crossing::error::ResourceError;
use key_crossing::resources::{Sprite, SpriteSource};

#[derive(Clone, Debug)]
pub struct Glyph {
    pub art: &'static [&'static str],
    pub fg: Color,
    /// Cell background; `None` keeps whatever is underneath.
    pub bg: Option<Color>,
    pub offset: (f32, f32),
}

// ── Terrain (one tile = 10 × 4 cells) ────────────────────────────────────────

const WATER: &[&str] = &[
    "~~~  ~~~  ",
    "  ~~~  ~~~",
    "~~~  ~~~  ",
    "  ~~~  ~~~",
];
const STONE: &[&str] = &[
    "▁▁▁▁▁▁▁▁▁▏",
    "         ▏",
    "▁▁▁▁▏▁▁▁▁▁",
    "    ▏     ",
];
const GRASS: &[&str] = &[
    " ,  '  ,  ",
    "   ,   '  ",
    " '   ,   ,",
    "   '   ,  ",
];

// ── Actors ────────────────────────────────────────────────────────────────────

const ENEMY_BUG: &[&str] = &[
    "  ▄▆██▆▄  ",
    " ▀█▀▀▀█▀▶ ",
];
const CAT_GIRL: &[&str] = &[
    "   /\\_/\\  ",
    "  ( o.o ) ",
    "   /|_|\\  ",
];
const ROCK: &[&str] = &[
    "  ▄▆██▆▄  ",
    " ▐██████▌ ",
];
const KEY: &[&str] = &["    o━┳┓  "];

/// Serves glyphs for every sprite.  Nothing can fail to load, but the
/// loader contract is the same as for real images.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlyphSheet;

impl SpriteSource for GlyphSheet {
    type Handle = Glyph;

    fn fetch(&mut self, sprite: Sprite) -> Result<Glyph, ResourceError> {
        let glyph = match sprite {
            Sprite::WaterBlock => Glyph {
                art: WATER,
                fg: Color::Cyan,
                bg: Some(Color::DarkBlue),
                offset: (0.0, 50.0),
            },
            Sprite::StoneBlock => Glyph {
                art: STONE,
                fg: Color::Grey,
                bg: Some(Color::DarkGrey),
                offset: (0.0, 50.0),
            },
            Sprite::GrassBlock => Glyph {
                art: GRASS,
                fg: Color::Green,
                bg: Some(Color::DarkGreen),
                offset: (0.0, 50.0),
            },
            Sprite::EnemyBug => Glyph {
                art: ENEMY_BUG,
                fg: Color::Red,
                bg: None,
                offset: (0.0, 77.0),
            },
            Sprite::CharCatGirl => Glyph {
                art: CAT_GIRL,
                fg: Color::Magenta,
                bg: None,
                offset: (0.0, 80.0),
            },
            Sprite::Rock => Glyph {
                art: ROCK,
                fg: Color::Grey,
                bg: None,
                offset: (0.0, 75.0),
            },
            Sprite::Key => Glyph {
                art: KEY,
                fg: Color::Yellow,
                bg: None,
                offset: (0.0, 75.0),
            },
        };
        Ok(glyph)
    }
}
