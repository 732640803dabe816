//! Render coordinator.
//!
//! Translates a `Session` into drawing calls on a `Surface`.  No game logic
//! is performed here and nothing in the session is mutated.

use std::fmt;

use crate::entities::{
    Enemy, GameStatus, Goal, Player, Session, CANVAS_WIDTH, COLUMN_WIDTH, NUM_COLUMNS, ROW_HEIGHT,
};
use crate::error::GameError;
use crate::resources::{Resources, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Font {
    pub size_px: u16,
    pub family: &'static str,
}

impl Font {
    pub const fn arial(size_px: u16) -> Self {
        Self {
            size_px,
            family: "Arial",
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// A 2D drawing target with a fixed 505×606 logical canvas.
pub trait Surface {
    type Handle;

    fn draw_image(&mut self, image: &Self::Handle, x: f32, y: f32) -> Result<(), GameError>;
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), GameError>;

    fn set_fill_style(&mut self, color: Rgb);
    fn set_stroke_style(&mut self, color: Rgb);
    fn set_line_width(&mut self, width: f32);
    fn set_font(&mut self, font: Font);

    /// `y` is the text baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError>;
    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError>;

    /// Show everything drawn since the last call.
    fn present(&mut self) -> Result<(), GameError>;
}

/// Anything that knows how to put itself on a surface.
pub trait Drawable {
    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        sprites: &Resources<S::Handle>,
    ) -> Result<(), GameError>;
}

impl Drawable for Enemy {
    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        sprites: &Resources<S::Handle>,
    ) -> Result<(), GameError> {
        surface.draw_image(sprites.get(Sprite::EnemyBug)?, self.x, self.y)
    }
}

impl Drawable for Goal {
    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        sprites: &Resources<S::Handle>,
    ) -> Result<(), GameError> {
        let (x, y) = (self.x as f32, self.y as f32);
        surface.draw_image(sprites.get(Sprite::Rock)?, x, y)?;
        if self.key_present {
            surface.draw_image(sprites.get(Sprite::Key)?, x, y)?;
        }
        Ok(())
    }
}

impl Drawable for Player {
    fn draw<S: Surface>(
        &self,
        surface: &mut S,
        sprites: &Resources<S::Handle>,
    ) -> Result<(), GameError> {
        surface.draw_image(sprites.get(Sprite::CharCatGirl)?, self.x as f32, self.y as f32)
    }
}

// ── Text overlays ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outline {
    pub color: Rgb,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub fill: Rgb,
    pub outline: Option<Outline>,
    pub font: Font,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    pub style: TextStyle,
    pub text: String,
    pub position: (f32, f32),
}

const HUD_STYLE: TextStyle = TextStyle {
    fill: Rgb::WHITE,
    outline: None,
    font: Font::arial(15),
};

const BANNER_OUTLINE: Option<Outline> = Some(Outline {
    color: Rgb::BLACK,
    width: 1.0,
});

/// Level and high score, bottom-left below the grid.
pub fn hud_overlays(state: &Session) -> Vec<TextOverlay> {
    vec![
        TextOverlay {
            style: HUD_STYLE,
            text: format!("Level: {}", state.level),
            position: (5.0, 562.0),
        },
        TextOverlay {
            style: HUD_STYLE,
            text: format!("HighScore: {}", state.high_score),
            position: (5.0, 580.0),
        },
    ]
}

pub fn game_over_overlays() -> Vec<TextOverlay> {
    vec![
        TextOverlay {
            style: TextStyle {
                fill: Rgb::WHITE,
                outline: BANNER_OUTLINE,
                font: Font::arial(56),
            },
            text: "You are dead!".to_string(),
            position: (80.0, 270.0),
        },
        TextOverlay {
            style: TextStyle {
                fill: Rgb::WHITE,
                outline: BANNER_OUTLINE,
                font: Font::arial(30),
            },
            text: "Click anywhere to restart".to_string(),
            position: (90.0, 350.0),
        },
    ]
}

pub fn render_hud<S: Surface>(surface: &mut S, overlays: &[TextOverlay]) -> Result<(), GameError> {
    for overlay in overlays {
        let (x, y) = overlay.position;
        surface.set_fill_style(overlay.style.fill);
        surface.set_font(overlay.style.font);
        surface.fill_text(&overlay.text, x, y)?;

        if let Some(outline) = overlay.style.outline {
            surface.set_stroke_style(outline.color);
            surface.set_line_width(outline.width);
            surface.stroke_text(&overlay.text, x, y)?;
        }
    }
    Ok(())
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// Terrain per grid row, top to bottom.
pub const ROW_SPRITES: [Sprite; 6] = [
    Sprite::WaterBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::StoneBlock,
    Sprite::GrassBlock,
    Sprite::GrassBlock,
];

/// Height of the strip above the grid where the key is drawn.
pub const KEY_BAND_HEIGHT: f32 = 50.0;

fn draw_background<S: Surface>(
    surface: &mut S,
    sprites: &Resources<S::Handle>,
) -> Result<(), GameError> {
    // The key pokes out above the tiles; wipe what the last frame left there
    surface.set_fill_style(Rgb::WHITE);
    surface.fill_rect(0.0, 0.0, CANVAS_WIDTH, KEY_BAND_HEIGHT)?;

    for (row, sprite) in ROW_SPRITES.iter().enumerate() {
        let tile = sprites.get(*sprite)?;
        for col in 0..NUM_COLUMNS {
            let x = (col * COLUMN_WIDTH) as f32;
            let y = (row as i32 * ROW_HEIGHT) as f32;
            surface.draw_image(tile, x, y)?;
        }
    }
    Ok(())
}

/// Render one complete frame.
pub fn render_frame<S: Surface>(
    surface: &mut S,
    sprites: &Resources<S::Handle>,
    state: &Session,
) -> Result<(), GameError> {
    draw_background(surface, sprites)?;

    for enemy in &state.enemies {
        enemy.draw(surface, sprites)?;
    }
    // Goal and player last so enemies never hide them
    state.goal.draw(surface, sprites)?;
    state.player.draw(surface, sprites)?;

    render_hud(surface, &hud_overlays(state))?;
    if state.status == GameStatus::GameOver {
        render_hud(surface, &game_over_overlays())?;
    }

    surface.present()
}
