//=========================================================================
// Pixmap Canvas
//=========================================================================
//
// Software render target backed by tiny-skia.
//
// Owns the frame pixmap plus every texture and font created through
// `Assets`. Handles are plain ids into those stores, so a released
// handle simply stops resolving.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::path::Path;

use log::{debug, trace};
use tiny_skia::{Paint, Pixmap, PixmapPaint, Transform};

//=== Internal Dependencies ===============================================

use crate::core::error::CollaboratorError;
use crate::core::geometry::Rect;
use crate::core::render::{Assets, Canvas, Color, Font, Texture, TextureId};
use crate::platform::text::LoadedFont;

//=== PixmapCanvas ========================================================

pub struct PixmapCanvas {
    target: Pixmap,
    color: Color,
    textures: HashMap<TextureId, Pixmap>,
    fonts: HashMap<Font, LoadedFont>,
    next_id: u32,
}

impl PixmapCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self, CollaboratorError> {
        let target = Pixmap::new(width, height)
            .ok_or_else(|| CollaboratorError::Window(format!("invalid render target {}x{}", width, height)))?;
        Ok(Self {
            target,
            color: Color::BLACK,
            textures: HashMap::new(),
            fonts: HashMap::new(),
            next_id: 1,
        })
    }

    pub fn width(&self) -> u32 {
        self.target.width()
    }

    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Frame pixels packed as `0x00RRGGBB`, row-major.
    pub fn xrgb_pixels(&self) -> impl Iterator<Item = u32> + '_ {
        self.target.pixels().iter().map(|px| {
            let c = px.demultiply();
            (u32::from(c.red()) << 16) | (u32::from(c.green()) << 8) | u32::from(c.blue())
        })
    }

    /// Adopts `pixmap` as a new texture.
    pub(crate) fn insert_texture(&mut self, pixmap: Pixmap) -> Texture {
        let id = TextureId(self.allocate_id());
        let texture = Texture {
            id,
            width: pixmap.width() as i32,
            height: pixmap.height() as i32,
        };
        self.textures.insert(id, pixmap);
        texture
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(self.color.r, self.color.g, self.color.b, self.color.a);
        paint.anti_alias = false;
        paint
    }
}

//=== Canvas ==============================================================

impl Canvas for PixmapCanvas {
    fn output_size(&self) -> (i32, i32) {
        (self.target.width() as i32, self.target.height() as i32)
    }

    fn set_draw_color(&mut self, color: Color) {
        self.color = color;
    }

    fn clear(&mut self) {
        let c = self.color;
        self.target.fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn fill_rect(&mut self, rect: Rect) {
        let Some(area) = tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32)
        else {
            return;
        };
        let paint = self.paint();
        self.target.fill_rect(area, &paint, Transform::identity(), None);
    }

    fn copy(&mut self, texture: &Texture, dst: Rect) {
        let Some(source) = self.textures.get(&texture.id) else {
            trace!(target: "platform", "Copy of released texture {:?} skipped", texture.id);
            return;
        };
        if dst.w <= 0 || dst.h <= 0 {
            return;
        }
        let sx = dst.w as f32 / source.width() as f32;
        let sy = dst.h as f32 / source.height() as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, dst.x as f32, dst.y as f32);
        self.target
            .draw_pixmap(0, 0, source.as_ref(), &PixmapPaint::default(), transform, None);
    }
}

//=== Assets ==============================================================

impl Assets for PixmapCanvas {
    fn load_texture(&mut self, path: &Path) -> Result<Texture, CollaboratorError> {
        let pixmap = Pixmap::load_png(path).map_err(|e| CollaboratorError::Asset {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let texture = self.insert_texture(pixmap);
        debug!(target: "platform", "Loaded {} ({}x{})", path.display(), texture.width, texture.height);
        Ok(texture)
    }

    fn load_font(&mut self, path: &Path, point_size: f32) -> Result<Font, CollaboratorError> {
        let font_error = |reason: String| CollaboratorError::Font {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
        let loaded = LoadedFont::from_bytes(data, point_size).map_err(font_error)?;

        let font = Font(self.allocate_id());
        self.fonts.insert(font, loaded);
        debug!(target: "platform", "Loaded font {} at {}px", path.display(), point_size);
        Ok(font)
    }

    fn render_text(&mut self, font: Font, text: &str, color: Color) -> Result<Texture, CollaboratorError> {
        let loaded = self
            .fonts
            .get(&font)
            .ok_or_else(|| CollaboratorError::Text(format!("unknown font {:?}", font)))?;
        let pixmap = loaded.rasterize(text, color)?;
        Ok(self.insert_texture(pixmap))
    }

    fn release_texture(&mut self, texture: Texture) {
        self.textures.remove(&texture.id);
    }

    fn release_font(&mut self, font: Font) {
        self.fonts.remove(&font);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(canvas: &PixmapCanvas, x: u32, y: u32) -> u32 {
        canvas.xrgb_pixels().nth((y * canvas.width() + x) as usize).unwrap()
    }

    fn solid(width: u32, height: u32, color: tiny_skia::Color) -> Pixmap {
        let mut pixmap = Pixmap::new(width, height).unwrap();
        pixmap.fill(color);
        pixmap
    }

    #[test]
    fn zero_sized_target_is_rejected() {
        assert!(matches!(PixmapCanvas::new(0, 10), Err(CollaboratorError::Window(_))));
    }

    #[test]
    fn clear_and_fill_use_draw_color() {
        let mut canvas = PixmapCanvas::new(8, 8).unwrap();
        canvas.set_draw_color(Color::WHITE);
        canvas.clear();
        canvas.set_draw_color(Color::RED);
        canvas.fill_rect(Rect::new(2, 2, 2, 2));

        assert_eq!(pixel(&canvas, 0, 0), 0x00FF_FFFF);
        assert_eq!(pixel(&canvas, 2, 2), 0x00FF_0000);
        assert_eq!(pixel(&canvas, 3, 3), 0x00FF_0000);
        assert_eq!(pixel(&canvas, 4, 4), 0x00FF_FFFF, "Fill must stop at the rect edge");
    }

    #[test]
    fn copy_blits_texture_into_destination() {
        let mut canvas = PixmapCanvas::new(8, 8).unwrap();
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        let texture = canvas.insert_texture(solid(2, 2, tiny_skia::Color::from_rgba8(0, 0, 255, 255)));

        canvas.copy(&texture, Rect::new(4, 4, 2, 2));
        assert_eq!(pixel(&canvas, 4, 4), 0x0000_00FF);
        assert_eq!(pixel(&canvas, 3, 3), 0);
    }

    #[test]
    fn released_texture_draws_nothing() {
        let mut canvas = PixmapCanvas::new(4, 4).unwrap();
        canvas.set_draw_color(Color::BLACK);
        canvas.clear();
        let texture = canvas.insert_texture(solid(2, 2, tiny_skia::Color::WHITE));
        canvas.release_texture(texture);

        canvas.copy(&texture, Rect::new(0, 0, 2, 2));
        assert!(canvas.xrgb_pixels().all(|px| px == 0));
    }

    #[test]
    fn missing_files_report_their_path() {
        let mut canvas = PixmapCanvas::new(4, 4).unwrap();
        match canvas.load_texture(Path::new("no/such/paddle.png")) {
            Err(CollaboratorError::Asset { path, .. }) => assert_eq!(path, Path::new("no/such/paddle.png")),
            other => panic!("Expected asset error, got {:?}", other),
        }
        assert!(matches!(
            canvas.load_font(Path::new("no/such/font.ttf"), 32.0),
            Err(CollaboratorError::Font { .. })
        ));
    }

    #[test]
    fn unknown_font_cannot_render() {
        let mut canvas = PixmapCanvas::new(4, 4).unwrap();
        assert!(matches!(
            canvas.render_text(Font(99), "0 - 0", Color::BLACK),
            Err(CollaboratorError::Text(_))
        ));
    }
}
