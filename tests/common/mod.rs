#![allow(dead_code)]

use key_crossing::error::{GameError, ResourceError};
use key_crossing::render::{Font, Rgb, Surface};
use key_crossing::resources::{Resources, Sprite, SpriteSource};

/// Every call a `Surface` received, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Image(Sprite, f32, f32),
    Rect(f32, f32, f32, f32),
    FillStyle(Rgb),
    StrokeStyle(Rgb),
    LineWidth(f32),
    Font(Font),
    FillText(String, f32, f32),
    StrokeText(String, f32, f32),
    Present,
}

#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<Call>,
}

impl RecordingSurface {
    pub fn images(&self) -> Vec<(Sprite, f32, f32)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Image(s, x, y) => Some((*s, *x, *y)),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::FillText(t, _, _) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn presents(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Present).count()
    }
}

impl Surface for RecordingSurface {
    type Handle = Sprite;

    fn draw_image(&mut self, image: &Sprite, x: f32, y: f32) -> Result<(), GameError> {
        self.calls.push(Call::Image(*image, x, y));
        Ok(())
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) -> Result<(), GameError> {
        self.calls.push(Call::Rect(x, y, width, height));
        Ok(())
    }

    fn set_fill_style(&mut self, color: Rgb) {
        self.calls.push(Call::FillStyle(color));
    }

    fn set_stroke_style(&mut self, color: Rgb) {
        self.calls.push(Call::StrokeStyle(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::LineWidth(width));
    }

    fn set_font(&mut self, font: Font) {
        self.calls.push(Call::Font(font));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError> {
        self.calls.push(Call::FillText(text.to_string(), x, y));
        Ok(())
    }

    fn stroke_text(&mut self, text: &str, x: f32, y: f32) -> Result<(), GameError> {
        self.calls.push(Call::StrokeText(text.to_string(), x, y));
        Ok(())
    }

    fn present(&mut self) -> Result<(), GameError> {
        self.calls.push(Call::Present);
        Ok(())
    }
}

/// Hands back the sprite itself as its handle.
pub struct TagSource;

impl SpriteSource for TagSource {
    type Handle = Sprite;

    fn fetch(&mut self, sprite: Sprite) -> Result<Sprite, ResourceError> {
        Ok(sprite)
    }
}

/// Fails on one particular sprite.
pub struct FailingSource(pub Sprite);

impl SpriteSource for FailingSource {
    type Handle = Sprite;

    fn fetch(&mut self, sprite: Sprite) -> Result<Sprite, ResourceError> {
        if sprite == self.0 {
            return Err(ResourceError::LoadFailed {
                path: sprite.path(),
                reason: "file not found".to_string(),
            });
        }
        Ok(sprite)
    }
}

pub fn loaded_sprites() -> Resources<Sprite> {
    let mut sprites = Resources::load(&Sprite::ALL, TagSource);
    sprites.wait().expect("tag source never fails");
    sprites
}
