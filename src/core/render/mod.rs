//=========================================================================
// Render Interface
//=========================================================================
//
// Contract between the game core and the rendering/windowing layer.
//
// The core never touches pixels or OS handles directly. It draws through
// `Canvas`, creates drawable handles through `Assets`, and drives the
// frame through `Backend`. Backends live in `crate::platform`.
//
// Architecture:
// ```text
//   Backend ─┬─ Graphics ─┬─ Canvas  (draw color, clear, fill, blit)
//            │            └─ Assets  (textures, fonts, text)
//            ├─ poll_events()
//            ├─ mouse_position()
//            └─ present()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

//=== Internal Dependencies ===============================================

use crate::core::error::CollaboratorError;
use crate::core::geometry::Rect;
use crate::core::input::GameEvent;

//=== Color ===============================================================

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

//=== Handles =============================================================

/// Backend-assigned identifier of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Drawable image handle with its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    pub id: TextureId,
    pub width: i32,
    pub height: i32,
}

impl Texture {
    /// Full-size destination box at `(x, y)`.
    pub fn rect_at(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

/// Backend-assigned identifier of a loaded font at a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font(pub u32);

//=== Canvas ==============================================================

/// Drawing primitives of the render target.
pub trait Canvas {
    /// Render target size in pixels (arena bounds).
    fn output_size(&self) -> (i32, i32);

    fn set_draw_color(&mut self, color: Color);

    /// Fills the whole target with the current draw color.
    fn clear(&mut self);

    /// Fills `rect` with the current draw color.
    fn fill_rect(&mut self, rect: Rect);

    /// Blits `texture` into `dst`, scaling if the sizes differ.
    fn copy(&mut self, texture: &Texture, dst: Rect);
}

//=== Assets ==============================================================

/// Texture, font and text creation.
///
/// All operations are synchronous and fatal on failure.
pub trait Assets {
    fn load_texture(&mut self, path: &Path) -> Result<Texture, CollaboratorError>;

    fn load_font(&mut self, path: &Path, point_size: f32) -> Result<Font, CollaboratorError>;

    /// Rasterizes `text` into a new texture.
    fn render_text(&mut self, font: Font, text: &str, color: Color)
        -> Result<Texture, CollaboratorError>;

    /// Frees a texture. Using the handle afterwards draws nothing.
    fn release_texture(&mut self, texture: Texture);

    /// Frees a font.
    fn release_font(&mut self, font: Font);
}

//=== Graphics ============================================================

/// Everything a scene needs to draw and build itself.
pub trait Graphics: Canvas + Assets {}

impl<T: Canvas + Assets + ?Sized> Graphics for T {}

//=== Backend =============================================================

/// A complete windowing backend driven by the scene stack.
pub trait Backend: Graphics {
    /// Drains every event queued since the previous call, in arrival order.
    fn poll_events(&mut self) -> Vec<GameEvent>;

    /// Current cursor position in window coordinates.
    fn mouse_position(&self) -> (i32, i32);

    /// Shows the frame drawn since the previous present.
    fn present(&mut self) -> Result<(), CollaboratorError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
